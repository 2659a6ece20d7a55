// system-tests/tests/suites/title.rs
// ============================================================================
// Module: Title Search Suite
// Description: Live checks for GET /title/A%20Sweltering%20Day%20In%20Australia.
// Purpose: One test per contract check, sharing a single live request.
// Dependencies: poetry-contract, helpers
// ============================================================================

use std::error::Error;

use helpers::fixtures::FixtureCell;
use helpers::fixtures::LiveFixture;
use helpers::fixtures::shared;
use helpers::fixtures::verify_check;
use poetry_contract::catalog;

use crate::helpers;

static FIXTURE: FixtureCell = FixtureCell::new();

fn fixture() -> Result<&'static LiveFixture, Box<dyn Error>> {
    shared(&FIXTURE, catalog::title)
}

#[test]
fn status_code() -> Result<(), Box<dyn Error>> {
    verify_check(fixture()?, "status_code")
}

#[test]
fn json_array() -> Result<(), Box<dyn Error>> {
    verify_check(fixture()?, "json_array")
}

#[test]
fn poem_fields() -> Result<(), Box<dyn Error>> {
    verify_check(fixture()?, "poem_fields")
}

#[test]
fn title_matches() -> Result<(), Box<dyn Error>> {
    verify_check(fixture()?, "title_matches")
}
