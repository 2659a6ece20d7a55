// system-tests/tests/helpers/fixtures.rs
// ============================================================================
// Module: Live Case Fixtures
// Description: Shared per-case fixtures against the live service.
// Purpose: Issue one request per case no matter how many tests read it.
// Dependencies: poetry-contract, system-tests
// ============================================================================

//! ## Overview
//! Each suite module owns one [`FixtureCell`]. The first test that touches it
//! loads configuration and performs the case's single request; every other
//! test in the module reads the memoized response. A harness failure is
//! memoized too, so every test of the case reports the same error.

use std::error::Error;
use std::sync::OnceLock;

use poetry_contract::CaseDeclaration;
use poetry_contract::CaseFixture;
use poetry_contract::CheckFailure;
use poetry_contract::HarnessError;
use poetry_contract::HttpTransport;
use poetry_contract::UrlBuilder;
use system_tests::config::SystemTestConfig;

use super::artifacts::SUMMARY_JSON;
use super::artifacts::SUMMARY_MD;
use super::artifacts::TestReporter;

/// Fixture bound to the blocking HTTP transport.
pub type LiveFixture = CaseFixture<HttpTransport>;

/// Module-level storage for one live fixture.
pub type FixtureCell = OnceLock<Result<LiveFixture, HarnessError>>;

/// Builds an unrequested live fixture from environment configuration.
pub fn live_fixture(declaration: CaseDeclaration) -> Result<LiveFixture, HarnessError> {
    let config = SystemTestConfig::load().map_err(HarnessError::Config)?;
    let urls = UrlBuilder::new(&config.harness.base_url)?;
    let transport = HttpTransport::new(&config.harness)?;
    Ok(CaseFixture::new(declaration, urls, transport))
}

/// Returns the fixture stored in `cell`, creating it on first use.
pub fn shared(
    cell: &'static FixtureCell,
    declaration: fn() -> CaseDeclaration,
) -> Result<&'static LiveFixture, Box<dyn Error>> {
    cell.get_or_init(|| live_fixture(declaration()))
        .as_ref()
        .map_err(|err| Box::new(err.clone()) as Box<dyn Error>)
}

/// Evaluates one named check and records the outcome as test artifacts.
///
/// Harness failures surface as errors just like violations, but the summary
/// status tells them apart (`aborted` vs `fail`).
pub fn verify_check(fixture: &LiveFixture, check: &str) -> Result<(), Box<dyn Error>> {
    let declaration = fixture.declaration();
    let mut reporter = TestReporter::new(&format!("{}__{check}", declaration.name()))?;
    let outcome = fixture.check_named(check);

    let mut artifacts = vec![SUMMARY_JSON.to_string(), SUMMARY_MD.to_string()];
    if let Ok(record) = fixture.response() {
        reporter.artifacts().write_json("response.json", record)?;
        artifacts.push("response.json".to_string());
    }
    let description = declaration
        .check(check)
        .map_or_else(|| check.to_string(), |known| known.describe(declaration.term()));

    match outcome {
        Ok(()) => {
            reporter.finish("pass", vec![description], artifacts)?;
            Ok(())
        }
        Err(failure) => {
            let status = match &failure {
                CheckFailure::Harness(_) => "aborted",
                CheckFailure::Violation(_) => "fail",
            };
            reporter.finish(status, vec![description, failure.to_string()], artifacts)?;
            Err(failure.into())
        }
    }
}
