// crates/poetry-contract/src/checks.rs
// ============================================================================
// Module: Contract Checks
// Description: Assertion vocabulary applied to captured responses.
// Purpose: Evaluate named predicates against a response and a search term.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A [`Check`] is one named predicate over a [`ResponseRecord`]. Checks are
//! plain data so declarations can be built statically, listed, and reported.
//! Each check is evaluated independently; a failing check never prevents its
//! siblings from running.
//!
//! Two reusable bundles cover the shared behavior:
//! - [`success_checks`]: status 200, non-empty array, required fields, plus the
//!   one content predicate matching the search field.
//! - [`ErrorShape::checks`]: status 200 plus the status/reason pair of the
//!   error class.
//!
//! Per-element checks report the first offending record and how many records
//! failed in total. Over an empty array they pass; emptiness is the job of
//! [`Check::NonEmptyArray`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use thiserror::Error;

use crate::endpoint::SearchField;
use crate::endpoint::SearchTerm;
use crate::response::ErrorBody;
use crate::response::ErrorStatus;
use crate::response::PoemRecord;
use crate::response::REQUIRED_POEM_FIELDS;
use crate::response::ResponseRecord;

// ============================================================================
// SECTION: Error Contract Constants
// ============================================================================

/// HTTP status the service uses for every answer, errors included.
pub const EXPECTED_HTTP_STATUS: u16 = 200;

/// `status` of the invalid-endpoint error body. A JSON string.
pub const INVALID_ENDPOINT_STATUS: &str = "405";

/// Substring of the invalid-endpoint `reason`.
pub const INVALID_ENDPOINT_REASON: &str = "input field not available";

/// `status` of the no-match error body. A JSON integer.
pub const NO_MATCH_STATUS: i64 = 404;

/// Exact `reason` of the no-match error body.
pub const NO_MATCH_REASON: &str = "Not found";

// ============================================================================
// SECTION: Violations
// ============================================================================

/// A check that ran and did not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{check}: expected {expected}, observed {observed}")]
pub struct ContractViolation {
    /// Name of the failed check.
    pub check: String,
    /// What the contract requires.
    pub expected: String,
    /// What the service returned.
    pub observed: String,
    /// Index of the first offending record, for per-element checks.
    pub element: Option<usize>,
}

impl ContractViolation {
    fn new(check: &Check, expected: impl Into<String>, observed: impl Into<String>) -> Self {
        Self {
            check: check.name().to_string(),
            expected: expected.into(),
            observed: observed.into(),
            element: None,
        }
    }

    fn at(mut self, element: usize) -> Self {
        self.element = Some(element);
        self
    }
}

// ============================================================================
// SECTION: Checks
// ============================================================================

/// One named predicate over a captured response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    /// HTTP status equals the value exactly.
    StatusIs(u16),
    /// Body is an array with at least one record.
    NonEmptyArray,
    /// Every record carries `title`, `author`, `lines`, and `linecount`.
    RequiredFields,
    /// Every record's field equals the search term exactly (case-sensitive).
    FieldEquals(SearchField),
    /// Every record has a line containing the term, case-insensitively.
    LineContains,
    /// Every record's `linecount` text equals the term and its non-empty line
    /// count equals the term as an integer.
    LinecountEquals,
    /// Number of records equals the term as an integer.
    PoemCountEquals,
    /// Error body `status` is this JSON string.
    ErrorStatusText(String),
    /// Error body `status` is this JSON integer.
    ErrorStatusCode(i64),
    /// Error body `reason` contains this substring (case-sensitive).
    ReasonContains(String),
    /// Error body `reason` equals this text exactly.
    ReasonEquals(String),
}

impl Check {
    /// Stable check name used in reports and test names.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::StatusIs(_) => "status_code",
            Self::NonEmptyArray => "json_array",
            Self::RequiredFields => "poem_fields",
            Self::FieldEquals(SearchField::Author) => "author_matches",
            Self::FieldEquals(SearchField::Title) => "title_matches",
            Self::FieldEquals(_) => "field_matches",
            Self::LineContains => "line_contains_term",
            Self::LinecountEquals => "linecount_matches",
            Self::PoemCountEquals => "poem_count",
            Self::ErrorStatusText(_) | Self::ErrorStatusCode(_) => "error_status",
            Self::ReasonContains(_) | Self::ReasonEquals(_) => "error_reason",
        }
    }

    /// Human-readable statement of what the check requires.
    #[must_use]
    pub fn describe(&self, term: &SearchTerm) -> String {
        match self {
            Self::StatusIs(status) => format!("HTTP status is {status}"),
            Self::NonEmptyArray => "body is a non-empty JSON array".to_string(),
            Self::RequiredFields => {
                format!("every record has fields {}", REQUIRED_POEM_FIELDS.join(", "))
            }
            Self::FieldEquals(field) => format!("every record has {field} == `{term}`"),
            Self::LineContains => {
                format!("every record has a line containing `{term}` (case-insensitive)")
            }
            Self::LinecountEquals => {
                format!("every record has linecount `{term}` and {term} non-empty lines")
            }
            Self::PoemCountEquals => format!("exactly {term} records are returned"),
            Self::ErrorStatusText(status) => format!("error status is the string \"{status}\""),
            Self::ErrorStatusCode(status) => format!("error status is the integer {status}"),
            Self::ReasonContains(reason) => format!("error reason contains `{reason}`"),
            Self::ReasonEquals(reason) => format!("error reason is `{reason}`"),
        }
    }

    /// Evaluates the check against a response.
    ///
    /// # Errors
    ///
    /// Returns a [`ContractViolation`] describing the expected and observed
    /// values when the predicate does not hold.
    pub fn evaluate(
        &self,
        term: &SearchTerm,
        record: &ResponseRecord,
    ) -> Result<(), ContractViolation> {
        match self {
            Self::StatusIs(status) => {
                if record.status == *status {
                    Ok(())
                } else {
                    Err(ContractViolation::new(self, status.to_string(), record.status.to_string()))
                }
            }
            Self::NonEmptyArray => {
                let poems = self.poems(record)?;
                if poems.is_empty() {
                    Err(ContractViolation::new(self, "non-empty JSON array", "empty array"))
                } else {
                    Ok(())
                }
            }
            Self::RequiredFields => self.each_poem(record, "all required fields", |poem| {
                let missing = poem.missing_fields();
                if missing.is_empty() {
                    Ok(())
                } else {
                    Err(format!("{} missing {}", poem.label(), missing.join(", ")))
                }
            }),
            Self::FieldEquals(field) => {
                let key = field.as_str();
                self.each_poem(record, format!("{key} `{term}`"), |poem| {
                    match poem.str_field(key) {
                        Some(value) if value == term.as_str() => Ok(()),
                        Some(value) => Err(format!("{} has {key} `{value}`", poem.label())),
                        None => Err(format!("{} has no string {key}", poem.label())),
                    }
                })
            }
            Self::LineContains => {
                let needle = term.as_str().to_lowercase();
                self.each_poem(record, format!("a line containing `{term}`"), |poem| {
                    let Some(lines) = poem.lines() else {
                        return Err(format!("{} has no string lines", poem.label()));
                    };
                    if lines.iter().any(|line| line.to_lowercase().contains(&needle)) {
                        Ok(())
                    } else {
                        Err(format!("{} has no matching line", poem.label()))
                    }
                })
            }
            Self::LinecountEquals => {
                let count = self.term_count(term)?;
                self.each_poem(
                    record,
                    format!("linecount `{term}` and {count} non-empty lines"),
                    |poem| check_linecount(poem, term.as_str(), count),
                )
            }
            Self::PoemCountEquals => {
                let count = self.term_count(term)?;
                let poems = self.poems(record)?;
                if poems.len() == count {
                    Ok(())
                } else {
                    Err(ContractViolation::new(
                        self,
                        format!("{count} records"),
                        format!("{} records", poems.len()),
                    ))
                }
            }
            Self::ErrorStatusText(expected) => {
                let body = self.error_body(record)?;
                match &body.status {
                    Some(ErrorStatus::Text(text)) if text == expected => Ok(()),
                    other => Err(ContractViolation::new(
                        self,
                        format!("string \"{expected}\""),
                        describe_status(other.as_ref()),
                    )),
                }
            }
            Self::ErrorStatusCode(expected) => {
                let body = self.error_body(record)?;
                match &body.status {
                    Some(ErrorStatus::Code(code)) if code == expected => Ok(()),
                    other => Err(ContractViolation::new(
                        self,
                        format!("integer {expected}"),
                        describe_status(other.as_ref()),
                    )),
                }
            }
            Self::ReasonContains(expected) => {
                let body = self.error_body(record)?;
                match body.reason_text() {
                    Some(reason) if reason.contains(expected.as_str()) => Ok(()),
                    _ => Err(ContractViolation::new(
                        self,
                        format!("reason containing `{expected}`"),
                        describe_reason(body),
                    )),
                }
            }
            Self::ReasonEquals(expected) => {
                let body = self.error_body(record)?;
                match body.reason_text() {
                    Some(reason) if reason == expected => Ok(()),
                    _ => Err(ContractViolation::new(
                        self,
                        format!("reason `{expected}`"),
                        describe_reason(body),
                    )),
                }
            }
        }
    }

    fn poems<'a>(&self, record: &'a ResponseRecord) -> Result<&'a [PoemRecord], ContractViolation> {
        record
            .body
            .poems()
            .ok_or_else(|| ContractViolation::new(self, "JSON array", record.body.describe()))
    }

    fn error_body<'a>(&self, record: &'a ResponseRecord) -> Result<&'a ErrorBody, ContractViolation> {
        record
            .body
            .error()
            .ok_or_else(|| ContractViolation::new(self, "error object", record.body.describe()))
    }

    fn term_count(&self, term: &SearchTerm) -> Result<usize, ContractViolation> {
        term.as_count().ok_or_else(|| {
            ContractViolation::new(self, "an integer search term", format!("term `{term}`"))
        })
    }

    /// Applies `predicate` to every record, reporting the first failure.
    fn each_poem(
        &self,
        record: &ResponseRecord,
        expected: impl Into<String>,
        predicate: impl Fn(&PoemRecord) -> Result<(), String>,
    ) -> Result<(), ContractViolation> {
        let poems = self.poems(record)?;
        let mut first: Option<(usize, String)> = None;
        let mut failures = 0usize;
        for (index, poem) in poems.iter().enumerate() {
            if let Err(observed) = predicate(poem) {
                failures += 1;
                if first.is_none() {
                    first = Some((index, observed));
                }
            }
        }
        match first {
            None => Ok(()),
            Some((index, observed)) => Err(ContractViolation::new(
                self,
                expected,
                format!("record {index}: {observed} ({failures} of {} records failed)", poems.len()),
            )
            .at(index)),
        }
    }
}

fn check_linecount(poem: &PoemRecord, term: &str, count: usize) -> Result<(), String> {
    match poem.linecount() {
        Some(linecount) if linecount == term => {}
        Some(linecount) => return Err(format!("{} has linecount `{linecount}`", poem.label())),
        None => return Err(format!("{} has no string linecount", poem.label())),
    }
    match poem.non_empty_line_count() {
        Some(lines) if lines == count => Ok(()),
        Some(lines) => Err(format!("{} has {lines} non-empty lines", poem.label())),
        None => Err(format!("{} has no string lines", poem.label())),
    }
}

fn describe_status(status: Option<&ErrorStatus>) -> String {
    status.map_or_else(|| "no status".to_string(), ErrorStatus::describe)
}

fn describe_reason(body: &ErrorBody) -> String {
    match &body.reason {
        Some(serde_json::Value::String(reason)) => format!("reason `{reason}`"),
        Some(other) => format!("non-string reason {other}"),
        None => "no reason".to_string(),
    }
}

// ============================================================================
// SECTION: Bundles
// ============================================================================

impl SearchField {
    /// Returns the content predicate specific to this search field.
    #[must_use]
    pub const fn content_check(self) -> Check {
        match self {
            Self::Author | Self::Title => Check::FieldEquals(self),
            Self::Lines => Check::LineContains,
            Self::Linecount => Check::LinecountEquals,
            Self::Poemcount => Check::PoemCountEquals,
        }
    }
}

/// Checks shared by every success case plus the field's content predicate.
#[must_use]
pub fn success_checks(field: SearchField) -> Vec<Check> {
    vec![
        Check::StatusIs(EXPECTED_HTTP_STATUS),
        Check::NonEmptyArray,
        Check::RequiredFields,
        field.content_check(),
    ]
}

/// Error classes the service distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorShape {
    /// Unknown endpoint: `{"status": "405", "reason": "...input field not available..."}`.
    InvalidEndpoint,
    /// Valid endpoint, no match: `{"status": 404, "reason": "Not found"}`.
    NoMatch,
}

impl ErrorShape {
    /// Returns the checks for this error class.
    #[must_use]
    pub fn checks(self) -> Vec<Check> {
        match self {
            Self::InvalidEndpoint => vec![
                Check::StatusIs(EXPECTED_HTTP_STATUS),
                Check::ErrorStatusText(INVALID_ENDPOINT_STATUS.to_string()),
                Check::ReasonContains(INVALID_ENDPOINT_REASON.to_string()),
            ],
            Self::NoMatch => vec![
                Check::StatusIs(EXPECTED_HTTP_STATUS),
                Check::ErrorStatusCode(NO_MATCH_STATUS),
                Check::ReasonEquals(NO_MATCH_REASON.to_string()),
            ],
        }
    }

    /// Returns a stable label for reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidEndpoint => "invalid_endpoint",
            Self::NoMatch => "no_match",
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
