// crates/poetry-contract/src/lib.rs
// ============================================================================
// Module: PoetryDB Contract Harness Library
// Description: Public API surface for the contract harness core.
// Purpose: Expose declarations, fixtures, checks, runners, and reports.
// Dependencies: crate::{case, catalog, checks, config, endpoint, report, response, runner, transport}
// ============================================================================

//! ## Overview
//! The harness turns "endpoint + search term + expected shape" declarations
//! into executable checks against the PoetryDB search API. Three layers:
//! - declarations ([`CaseDeclaration`], [`catalog`]): leaf data;
//! - the request pipeline ([`UrlBuilder`], [`Transport`], [`CaseFixture`]):
//!   one memoized GET per case;
//! - the assertion suite ([`Check`], [`success_checks`], [`ErrorShape`]):
//!   independent predicates over the memoized [`ResponseRecord`].
//!
//! Harness failures ([`HarnessError`]) and contract violations
//! ([`ContractViolation`]) are kept apart all the way into the [`RunReport`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod case;
pub mod catalog;
pub mod checks;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod report;
pub mod response;
pub mod runner;
pub mod transport;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use case::CaseDeclaration;
pub use case::CaseFixture;
pub use case::CheckFailure;
pub use case::Expectation;
pub use checks::Check;
pub use checks::ContractViolation;
pub use checks::ErrorShape;
pub use checks::success_checks;
pub use config::HarnessConfig;
pub use endpoint::EndpointId;
pub use endpoint::SearchField;
pub use endpoint::SearchTerm;
pub use endpoint::UrlBuilder;
pub use error::HarnessError;
pub use report::CaseOutcome;
pub use report::CaseReport;
pub use report::CaseStatus;
pub use report::CheckOutcome;
pub use report::RunReport;
pub use response::ErrorBody;
pub use response::ErrorStatus;
pub use response::PoemRecord;
pub use response::ResponseBody;
pub use response::ResponseRecord;
pub use runner::CaseRunner;
pub use transport::HttpTransport;
pub use transport::MAX_REDIRECTS;
pub use transport::RawResponse;
pub use transport::Transport;
