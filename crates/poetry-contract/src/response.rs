// crates/poetry-contract/src/response.rs
// ============================================================================
// Module: Response Records
// Description: Typed view over a captured service response.
// Purpose: Validate the top-level body shape once, before any check runs.
// Dependencies: serde, serde_json, serde_jcs
// ============================================================================

//! ## Overview
//! The service answers with one of two top-level shapes: an array of poem
//! objects or a single error object. [`ResponseBody::from_json`] classifies a
//! parsed body into one of those and fails fast with
//! [`HarnessError::UnexpectedShape`] otherwise.
//!
//! Classification is deliberately shallow. A poem object missing `linecount`
//! or an error object whose `status` is the wrong JSON type still classifies;
//! those are contract violations for the checks to report, not harness errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use url::Url;

use crate::error::HarnessError;
use crate::transport::RawResponse;

// ============================================================================
// SECTION: Field Names
// ============================================================================

/// Keys every poem record must carry.
pub const REQUIRED_POEM_FIELDS: [&str; 4] = ["title", "author", "lines", "linecount"];

// ============================================================================
// SECTION: Poem Records
// ============================================================================

/// One element of a success response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PoemRecord {
    /// Raw object fields, extra keys included.
    fields: Map<String, Value>,
}

impl PoemRecord {
    /// Wraps a JSON object as a poem record.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self {
            fields,
        }
    }

    /// Returns the raw object fields.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Returns true when `key` is present, whatever its type.
    #[must_use]
    pub fn has_field(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Returns the required fields missing from this record.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        REQUIRED_POEM_FIELDS.into_iter().filter(|key| !self.has_field(key)).collect()
    }

    /// Returns a field as a string when present and a JSON string.
    #[must_use]
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Returns `title` when it is a string.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    /// Returns `author` when it is a string.
    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.str_field("author")
    }

    /// Returns `linecount` when it is a string. The service sends it as text.
    #[must_use]
    pub fn linecount(&self) -> Option<&str> {
        self.str_field("linecount")
    }

    /// Returns `lines` when it is an array made only of strings.
    #[must_use]
    pub fn lines(&self) -> Option<Vec<&str>> {
        self.fields.get("lines")?.as_array()?.iter().map(Value::as_str).collect()
    }

    /// Counts the non-empty entries of `lines`. Blank lines are empty strings.
    #[must_use]
    pub fn non_empty_line_count(&self) -> Option<usize> {
        self.lines().map(|lines| lines.iter().filter(|line| !line.is_empty()).count())
    }

    /// Returns a one-line label for reports.
    #[must_use]
    pub fn label(&self) -> String {
        match (self.title(), self.author()) {
            (Some(title), Some(author)) => format!("`{title}` by {author}"),
            (Some(title), None) => format!("`{title}`"),
            _ => "<untitled record>".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Error Bodies
// ============================================================================

/// `status` member of an error body, kept with its JSON type.
///
/// The service reports a bad endpoint with the string `"405"` and a missing
/// match with the integer `404`. Neither is coerced into the other.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorStatus {
    /// JSON string status, e.g. `"405"`.
    Text(String),
    /// JSON integer status, e.g. `404`.
    Code(i64),
    /// Any other JSON value.
    Other(Value),
}

impl ErrorStatus {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text.clone()),
            Value::Number(number) => {
                number.as_i64().map_or_else(|| Self::Other(value.clone()), Self::Code)
            }
            other => Self::Other(other.clone()),
        }
    }

    /// Renders the status with its JSON typing visible (`"405"` vs `404`).
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Text(text) => format!("string {}", Value::String(text.clone())),
            Self::Code(code) => format!("integer {code}"),
            Self::Other(value) => format!("json {value}"),
        }
    }
}

/// Object returned by the service instead of an array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    /// `status` member, absent when the service omitted it.
    pub status: Option<ErrorStatus>,
    /// `reason` member, kept raw so a non-string reason can be reported.
    pub reason: Option<Value>,
}

impl ErrorBody {
    fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            status: object.get("status").map(ErrorStatus::from_value),
            reason: object.get("reason").cloned(),
        }
    }

    /// Returns `reason` when it is a JSON string.
    #[must_use]
    pub fn reason_text(&self) -> Option<&str> {
        self.reason.as_ref().and_then(Value::as_str)
    }
}

// ============================================================================
// SECTION: Body Classification
// ============================================================================

/// Parsed body of a response, classified by top-level shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ResponseBody {
    /// Array of poem objects (possibly empty).
    Poems(Vec<PoemRecord>),
    /// Error object.
    Error(ErrorBody),
}

impl ResponseBody {
    /// Classifies a parsed JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::UnexpectedShape`] when the document is neither
    /// an array of objects nor an object.
    pub fn from_json(value: Value) -> Result<Self, HarnessError> {
        match value {
            Value::Array(items) => {
                let mut poems = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    let Value::Object(fields) = item else {
                        return Err(HarnessError::UnexpectedShape(format!(
                            "array element {index} is {}, expected an object",
                            json_type(&item)
                        )));
                    };
                    poems.push(PoemRecord::new(fields));
                }
                Ok(Self::Poems(poems))
            }
            Value::Object(object) => Ok(Self::Error(ErrorBody::from_object(&object))),
            other => Err(HarnessError::UnexpectedShape(format!(
                "top-level body is {}, expected an array or an object",
                json_type(&other)
            ))),
        }
    }

    /// Parses and classifies raw body bytes.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::InvalidJson`] when the bytes are not JSON, or
    /// [`HarnessError::UnexpectedShape`] as for [`ResponseBody::from_json`].
    pub fn parse(bytes: &[u8]) -> Result<Self, HarnessError> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|err| HarnessError::InvalidJson(err.to_string()))?;
        Self::from_json(value)
    }

    /// Returns the poem records when the body is an array.
    #[must_use]
    pub fn poems(&self) -> Option<&[PoemRecord]> {
        match self {
            Self::Poems(poems) => Some(poems),
            Self::Error(_) => None,
        }
    }

    /// Returns the error object when the body is an object.
    #[must_use]
    pub const fn error(&self) -> Option<&ErrorBody> {
        match self {
            Self::Poems(_) => None,
            Self::Error(body) => Some(body),
        }
    }

    /// Short description of the shape for violation messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Poems(poems) => format!("array of {} record(s)", poems.len()),
            Self::Error(body) => {
                let status = body.status.as_ref().map_or_else(|| "missing".to_string(), ErrorStatus::describe);
                format!("error object with status {status}")
            }
        }
    }
}

/// Names the JSON type of a value.
pub(crate) const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// SECTION: Response Record
// ============================================================================

/// Captured result of the single request a case makes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseRecord {
    /// URL that was requested.
    pub url: Url,
    /// HTTP status code.
    pub status: u16,
    /// Classified body.
    pub body: ResponseBody,
}

impl ResponseRecord {
    /// Builds a record from a raw transport response.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::InvalidJson`] or
    /// [`HarnessError::UnexpectedShape`] when the body cannot be classified.
    pub fn from_raw(url: Url, raw: &RawResponse) -> Result<Self, HarnessError> {
        let body = ResponseBody::parse(&raw.body)?;
        Ok(Self {
            url,
            status: raw.status,
            body,
        })
    }

    /// Compares two responses for equal content, ignoring record order.
    ///
    /// Records are compared through their canonical (JCS) serialization.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::InvalidJson`] when canonical serialization fails.
    pub fn same_content(&self, other: &Self) -> Result<bool, HarnessError> {
        if self.status != other.status {
            return Ok(false);
        }
        match (&self.body, &other.body) {
            (ResponseBody::Poems(left), ResponseBody::Poems(right)) => {
                Ok(canonical_sorted(left)? == canonical_sorted(right)?)
            }
            (ResponseBody::Error(left), ResponseBody::Error(right)) => Ok(left == right),
            _ => Ok(false),
        }
    }
}

fn canonical_sorted(poems: &[PoemRecord]) -> Result<Vec<String>, HarnessError> {
    let mut encoded = poems
        .iter()
        .map(|poem| serde_jcs::to_string(poem).map_err(|err| HarnessError::InvalidJson(err.to_string())))
        .collect::<Result<Vec<_>, _>>()?;
    encoded.sort_unstable();
    Ok(encoded)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
