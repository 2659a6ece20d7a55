// system-tests/tests/suites/idempotence.rs
// ============================================================================
// Module: Idempotence Suite
// Description: Repeated identical requests return the same content.
// Purpose: Detect nondeterministic answers from the search endpoints.
// Dependencies: poetry-contract, helpers
// ============================================================================

//! ## Overview
//! Each declaration is requested twice through independent fixtures. Record
//! order is not part of the contract, so responses are compared as multisets
//! of canonicalized records.

use std::error::Error;

use helpers::artifacts::SUMMARY_JSON;
use helpers::artifacts::SUMMARY_MD;
use helpers::artifacts::TestReporter;
use helpers::fixtures::live_fixture;
use poetry_contract::CaseDeclaration;
use poetry_contract::catalog;

use crate::helpers;

fn assert_repeatable(
    test_name: &str,
    declaration: fn() -> CaseDeclaration,
) -> Result<(), Box<dyn Error>> {
    let mut reporter = TestReporter::new(test_name)?;
    let first = live_fixture(declaration())?;
    let second = live_fixture(declaration())?;
    let first = first.response()?;
    let second = second.response()?;
    reporter.artifacts().write_json("first.json", first)?;
    reporter.artifacts().write_json("second.json", second)?;
    let artifacts = vec![
        SUMMARY_JSON.to_string(),
        SUMMARY_MD.to_string(),
        "first.json".to_string(),
        "second.json".to_string(),
    ];

    if !first.same_content(second)? {
        reporter.finish("fail", vec![format!("{} answered differently", first.url)], artifacts)?;
        return Err(format!("repeated GET {} returned different content", first.url).into());
    }
    reporter.finish("pass", vec![format!("{} answered identically twice", first.url)], artifacts)?;
    Ok(())
}

#[test]
fn author_search_is_repeatable() -> Result<(), Box<dyn Error>> {
    assert_repeatable("idempotence_author", catalog::author)
}

#[test]
fn unmatched_search_is_repeatable() -> Result<(), Box<dyn Error>> {
    assert_repeatable("idempotence_invalid_search_term", catalog::invalid_search_term)
}
