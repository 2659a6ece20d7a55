// system-tests/tests/suites/invalid_search_term.rs
// ============================================================================
// Module: Unmatched Search Term Suite
// Description: Live checks for GET /author/NonExistentAuthor.
// Purpose: One test per contract check, sharing a single live request.
// Dependencies: poetry-contract, helpers
// ============================================================================

//! ## Overview
//! An unmatched author yields HTTP 200 and `{"status": 404, "reason": "Not found"}`
//! with an integer status.

use std::error::Error;

use helpers::fixtures::FixtureCell;
use helpers::fixtures::LiveFixture;
use helpers::fixtures::shared;
use helpers::fixtures::verify_check;
use poetry_contract::catalog;

use crate::helpers;

static FIXTURE: FixtureCell = FixtureCell::new();

fn fixture() -> Result<&'static LiveFixture, Box<dyn Error>> {
    shared(&FIXTURE, catalog::invalid_search_term)
}

#[test]
fn status_code() -> Result<(), Box<dyn Error>> {
    verify_check(fixture()?, "status_code")
}

#[test]
fn error_status() -> Result<(), Box<dyn Error>> {
    verify_check(fixture()?, "error_status")
}

#[test]
fn error_reason() -> Result<(), Box<dyn Error>> {
    verify_check(fixture()?, "error_reason")
}
