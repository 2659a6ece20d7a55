// crates/poetry-contract/src/case.rs
// ============================================================================
// Module: Case Declarations and Fixtures
// Description: Declarative contract cases and their memoized fixtures.
// Purpose: Guarantee one network call per case shared by all of its checks.
// Dependencies: serde, tracing, url
// ============================================================================

//! ## Overview
//! A [`CaseDeclaration`] is leaf data: a name, an endpoint, a term, an
//! expectation, and the ordered checks that follow from the expectation.
//! A [`CaseFixture`] binds a declaration to a URL builder and a transport and
//! holds the memoized response.
//!
//! Fixture lifecycle:
//! - not requested: nothing has touched the network;
//! - requested: the first reader performs the single GET and the outcome,
//!   success or harness error, is cached in a [`OnceLock`];
//! - evaluated: checks read the cached value; none of them can trigger a
//!   second request.
//!
//! Fixtures are `Sync` when the transport is, so a static fixture can back
//! many test functions running on different threads.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::OnceLock;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use tracing::warn;
use url::Url;

use crate::checks::Check;
use crate::checks::ContractViolation;
use crate::checks::ErrorShape;
use crate::checks::success_checks;
use crate::endpoint::EndpointId;
use crate::endpoint::SearchField;
use crate::endpoint::SearchTerm;
use crate::endpoint::UrlBuilder;
use crate::error::HarnessError;
use crate::report::CaseOutcome;
use crate::report::CaseReport;
use crate::report::CheckOutcome;
use crate::response::ResponseRecord;
use crate::transport::Transport;

// ============================================================================
// SECTION: Declarations
// ============================================================================

/// What a case expects the service to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "shape", rename_all = "snake_case")]
pub enum Expectation {
    /// Non-empty array of matching records.
    Success,
    /// Error object of the given class.
    Error(ErrorShape),
}

impl Expectation {
    /// Returns a stable label for listings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error(ErrorShape::InvalidEndpoint) => "error:invalid_endpoint",
            Self::Error(ErrorShape::NoMatch) => "error:no_match",
        }
    }
}

/// One contract scenario.
///
/// # Invariants
/// - `checks` is non-empty and its names are unique within the case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseDeclaration {
    /// Case name, unique within a catalog.
    name: String,
    /// Endpoint the request targets.
    endpoint: EndpointId,
    /// Raw search term.
    term: SearchTerm,
    /// Expected answer class.
    expectation: Expectation,
    /// Checks evaluated against the response, in order.
    checks: Vec<Check>,
}

impl CaseDeclaration {
    /// Declares a case expecting matching records for a valid search field.
    #[must_use]
    pub fn expect_success(
        name: impl Into<String>,
        field: SearchField,
        term: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint: field.endpoint(),
            term: SearchTerm::new(term),
            expectation: Expectation::Success,
            checks: success_checks(field),
        }
    }

    /// Declares a case expecting an error object of the given class.
    #[must_use]
    pub fn expect_error(
        name: impl Into<String>,
        endpoint: EndpointId,
        term: impl Into<String>,
        shape: ErrorShape,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint,
            term: SearchTerm::new(term),
            expectation: Expectation::Error(shape),
            checks: shape.checks(),
        }
    }

    /// Returns the case name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the endpoint identifier.
    #[must_use]
    pub const fn endpoint(&self) -> &EndpointId {
        &self.endpoint
    }

    /// Returns the raw search term.
    #[must_use]
    pub const fn term(&self) -> &SearchTerm {
        &self.term
    }

    /// Returns the expectation.
    #[must_use]
    pub const fn expectation(&self) -> Expectation {
        self.expectation
    }

    /// Returns the ordered checks.
    #[must_use]
    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// Looks up a check by name.
    #[must_use]
    pub fn check(&self, name: &str) -> Option<&Check> {
        self.checks.iter().find(|check| check.name() == name)
    }

    /// Returns the request path, e.g. `/author/Mark%20Twain`.
    #[must_use]
    pub fn path(&self) -> String {
        UrlBuilder::path(&self.endpoint, &self.term)
    }
}

// ============================================================================
// SECTION: Check Failures
// ============================================================================

/// Why a single check did not pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckFailure {
    /// The response could not be obtained; the check never ran.
    #[error(transparent)]
    Harness(#[from] HarnessError),
    /// The check ran and the contract did not hold.
    #[error(transparent)]
    Violation(#[from] ContractViolation),
}

// ============================================================================
// SECTION: Fixture
// ============================================================================

/// A declaration bound to a transport, with its response memoized.
pub struct CaseFixture<T> {
    /// Case being exercised.
    declaration: CaseDeclaration,
    /// Builder for the request URL.
    urls: UrlBuilder,
    /// Transport performing the single GET.
    transport: T,
    /// Outcome of the single GET, set on first access.
    response: OnceLock<Result<ResponseRecord, HarnessError>>,
}

impl<T: Transport> CaseFixture<T> {
    /// Creates a fixture. No request is made until the response is read.
    #[must_use]
    pub const fn new(declaration: CaseDeclaration, urls: UrlBuilder, transport: T) -> Self {
        Self {
            declaration,
            urls,
            transport,
            response: OnceLock::new(),
        }
    }

    /// Returns the declaration under test.
    #[must_use]
    pub const fn declaration(&self) -> &CaseDeclaration {
        &self.declaration
    }

    /// Builds the request URL without touching the network.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::InvalidEndpoint`] for an unusable endpoint.
    pub fn url(&self) -> Result<Url, HarnessError> {
        self.urls.build(&self.declaration.endpoint, &self.declaration.term)
    }

    /// Returns true once the single request has been attempted.
    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.response.get().is_some()
    }

    /// Returns the memoized response, issuing the request on first call.
    ///
    /// # Errors
    ///
    /// Returns the cached [`HarnessError`] when the request or body parsing
    /// failed. The failure is not retried.
    pub fn response(&self) -> Result<&ResponseRecord, HarnessError> {
        self.response.get_or_init(|| self.fetch()).as_ref().map_err(HarnessError::clone)
    }

    fn fetch(&self) -> Result<ResponseRecord, HarnessError> {
        let case = self.declaration.name();
        debug!(case, "issuing case request");
        let outcome = self.url().and_then(|url| {
            let raw = self.transport.get(&url)?;
            ResponseRecord::from_raw(url, &raw)
        });
        if let Err(err) = &outcome {
            warn!(case, error = %err, "case aborted by harness error");
        }
        outcome
    }

    /// Evaluates one check against the memoized response.
    ///
    /// # Errors
    ///
    /// Returns [`CheckFailure::Harness`] when no response is available and
    /// [`CheckFailure::Violation`] when the check does not hold.
    pub fn check(&self, check: &Check) -> Result<(), CheckFailure> {
        let record = self.response()?;
        check.evaluate(&self.declaration.term, record).map_err(|violation| {
            warn!(case = self.declaration.name(), violation = %violation, "contract check failed");
            CheckFailure::from(violation)
        })
    }

    /// Evaluates the declared check with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`CheckFailure::Harness`] with [`HarnessError::Config`] when the
    /// case declares no such check, otherwise as for [`CaseFixture::check`].
    pub fn check_named(&self, name: &str) -> Result<(), CheckFailure> {
        let check = self.declaration.check(name).ok_or_else(|| {
            HarnessError::Config(format!(
                "case `{}` declares no check named `{name}`",
                self.declaration.name()
            ))
        })?;
        self.check(check)
    }

    /// Evaluates every declared check and collects a report.
    ///
    /// Each check is evaluated even when an earlier one failed.
    #[must_use]
    pub fn evaluate(&self) -> CaseReport {
        let declaration = &self.declaration;
        let url = self.url().ok().map(|url| url.to_string());
        let outcome = match self.response() {
            Err(err) => CaseOutcome::Aborted {
                error_kind: err.kind().to_string(),
                error: err.to_string(),
            },
            Ok(record) => CaseOutcome::Evaluated {
                status: record.status,
                checks: declaration
                    .checks
                    .iter()
                    .map(|check| CheckOutcome {
                        name: check.name().to_string(),
                        description: check.describe(&declaration.term),
                        violation: self.check(check).err().and_then(|failure| match failure {
                            CheckFailure::Violation(violation) => Some(violation),
                            CheckFailure::Harness(_) => None,
                        }),
                    })
                    .collect(),
            },
        };
        CaseReport {
            name: declaration.name.clone(),
            endpoint: declaration.endpoint.clone(),
            term: declaration.term.clone(),
            expectation: declaration.expectation,
            url,
            outcome,
        }
    }
}
