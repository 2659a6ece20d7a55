// crates/poetry-contract/src/report.rs
// ============================================================================
// Module: Run Reports
// Description: Per-case and per-run outcome summaries.
// Purpose: Expose check results to runners as data, text, or JSON.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Reports are the only thing a runner needs from the harness. A case is
//! either `evaluated` (every declared check ran, each passed or failed) or
//! `aborted` (a harness error prevented any check from running). Aborted
//! cases are counted apart from failed ones.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write;

use serde::Serialize;

use crate::case::Expectation;
use crate::checks::ContractViolation;
use crate::endpoint::EndpointId;
use crate::endpoint::SearchTerm;

// ============================================================================
// SECTION: Case Reports
// ============================================================================

/// Result of one check within an evaluated case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    /// Check name.
    pub name: String,
    /// What the check requires.
    pub description: String,
    /// Violation when the check failed.
    pub violation: Option<ContractViolation>,
}

impl CheckOutcome {
    /// Returns true when the check held.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.violation.is_none()
    }
}

/// How a case ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CaseOutcome {
    /// A response was obtained and every check ran.
    Evaluated {
        /// HTTP status of the response.
        status: u16,
        /// One entry per declared check, in declaration order.
        checks: Vec<CheckOutcome>,
    },
    /// A harness error prevented evaluation.
    Aborted {
        /// Stable error class label.
        error_kind: String,
        /// Error message.
        error: String,
    },
}

/// Three-way case status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// Every check passed.
    Passed,
    /// At least one check failed.
    Failed,
    /// A harness error aborted the case.
    Aborted,
}

impl CaseStatus {
    /// Returns a stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Aborted => "aborted",
        }
    }
}

/// Outcome of one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseReport {
    /// Case name.
    pub name: String,
    /// Endpoint requested.
    pub endpoint: EndpointId,
    /// Raw search term.
    pub term: SearchTerm,
    /// Expected answer class.
    pub expectation: Expectation,
    /// Requested URL, when it could be built.
    pub url: Option<String>,
    /// Evaluated checks or abort reason.
    pub outcome: CaseOutcome,
}

impl CaseReport {
    /// Returns the case status.
    #[must_use]
    pub fn status(&self) -> CaseStatus {
        match &self.outcome {
            CaseOutcome::Aborted { .. } => CaseStatus::Aborted,
            CaseOutcome::Evaluated { checks, .. } => {
                if checks.iter().all(CheckOutcome::passed) {
                    CaseStatus::Passed
                } else {
                    CaseStatus::Failed
                }
            }
        }
    }

    /// Returns the failed checks' violations.
    #[must_use]
    pub fn violations(&self) -> Vec<&ContractViolation> {
        match &self.outcome {
            CaseOutcome::Aborted { .. } => Vec::new(),
            CaseOutcome::Evaluated { checks, .. } => {
                checks.iter().filter_map(|check| check.violation.as_ref()).collect()
            }
        }
    }
}

// ============================================================================
// SECTION: Run Reports
// ============================================================================

/// Summary of a batch of cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Number of cases run.
    pub total: usize,
    /// Cases whose checks all passed.
    pub passed: usize,
    /// Cases with at least one failed check.
    pub failed: usize,
    /// Cases aborted by a harness error.
    pub aborted: usize,
    /// Wall-clock duration of the batch in milliseconds.
    pub duration_ms: u128,
    /// Per-case reports in run order.
    pub cases: Vec<CaseReport>,
}

impl RunReport {
    /// Tallies case reports into a run report.
    #[must_use]
    pub fn from_cases(cases: Vec<CaseReport>, duration_ms: u128) -> Self {
        let (mut passed, mut failed, mut aborted) = (0, 0, 0);
        for case in &cases {
            match case.status() {
                CaseStatus::Passed => passed += 1,
                CaseStatus::Failed => failed += 1,
                CaseStatus::Aborted => aborted += 1,
            }
        }
        Self {
            total: cases.len(),
            passed,
            failed,
            aborted,
            duration_ms,
            cases,
        }
    }

    /// Returns true when every case passed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed == 0 && self.aborted == 0
    }

    /// Renders a plain-text summary listing every failing check.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for case in &self.cases {
            let status = case.status();
            let _ = writeln!(out, "[{}] {}", status.as_str(), case.name);
            if let Some(url) = &case.url {
                let _ = writeln!(out, "    GET {url}");
            }
            match &case.outcome {
                CaseOutcome::Aborted { error_kind, error } => {
                    let _ = writeln!(out, "    harness error ({error_kind}): {error}");
                }
                CaseOutcome::Evaluated { checks, .. } => {
                    for check in checks {
                        if let Some(violation) = &check.violation {
                            let _ = writeln!(out, "    FAIL {}: {}", check.name, check.description);
                            let _ = writeln!(out, "         expected: {}", violation.expected);
                            let _ = writeln!(out, "         observed: {}", violation.observed);
                        }
                    }
                }
            }
        }
        let _ = writeln!(
            out,
            "\n{} case(s): {} passed, {} failed, {} aborted ({} ms)",
            self.total, self.passed, self.failed, self.aborted, self.duration_ms
        );
        out
    }

    /// Renders the report as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
