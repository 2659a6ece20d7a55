// crates/poetry-contract/src/error.rs
// ============================================================================
// Module: Harness Errors
// Description: Infrastructure failures raised by the contract harness.
// Purpose: Keep harness failures distinct from contract violations.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! A [`HarnessError`] means the harness could not obtain a response it can
//! judge: bad configuration, a failed network round trip, or a body that is not
//! one of the two top-level shapes the service is allowed to return. These
//! errors abort a case. They are never reported as assertion failures.
//!
//! Payloads are plain strings so a memoized failure can be cloned out to every
//! check that reads the same fixture.

use thiserror::Error;

/// Errors raised by the harness itself rather than by the service under test.
///
/// # Invariants
/// - Variant meanings are stable for reports and tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarnessError {
    /// Invalid harness configuration (base URL, timeout, environment values).
    #[error("config error: {0}")]
    Config(String),
    /// Endpoint identifier that cannot be placed in a URL path verbatim.
    #[error("invalid endpoint identifier `{0}`")]
    InvalidEndpoint(String),
    /// Network failure: connect, timeout, or body read.
    #[error("transport error: {0}")]
    Transport(String),
    /// Response body was not valid JSON.
    #[error("invalid json body: {0}")]
    InvalidJson(String),
    /// Response body was JSON but neither an array of records nor an error object.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
}

impl HarnessError {
    /// Returns a stable short label for the error class.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::InvalidEndpoint(_) => "invalid_endpoint",
            Self::Transport(_) => "transport",
            Self::InvalidJson(_) => "invalid_json",
            Self::UnexpectedShape(_) => "unexpected_shape",
        }
    }
}
