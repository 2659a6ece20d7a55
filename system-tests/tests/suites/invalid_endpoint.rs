// system-tests/tests/suites/invalid_endpoint.rs
// ============================================================================
// Module: Invalid Endpoint Suite
// Description: Live checks for GET /invalidendpoint/test.
// Purpose: One test per contract check, sharing a single live request.
// Dependencies: poetry-contract, helpers
// ============================================================================

//! ## Overview
//! The service answers an unknown endpoint with HTTP 200 and an error object
//! whose `status` is the string `"405"`, not an integer.

use std::error::Error;

use helpers::fixtures::FixtureCell;
use helpers::fixtures::LiveFixture;
use helpers::fixtures::shared;
use helpers::fixtures::verify_check;
use poetry_contract::catalog;

use crate::helpers;

static FIXTURE: FixtureCell = FixtureCell::new();

fn fixture() -> Result<&'static LiveFixture, Box<dyn Error>> {
    shared(&FIXTURE, catalog::invalid_endpoint)
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
