// crates/poetry-contract/src/catalog.rs
// ============================================================================
// Module: Contract Catalog
// Description: The enumerated PoetryDB contract cases.
// Purpose: Declare every scenario once so runners can list and execute them.
// Dependencies: crate::case
// ============================================================================

//! ## Overview
//! Seven scenarios cover the contract: one success case per search field and
//! one case per error class. Cases are enumerated, never generated.

use crate::case::CaseDeclaration;
use crate::checks::ErrorShape;
use crate::endpoint::EndpointId;
use crate::endpoint::SearchField;

/// `GET /author/Mark%20Twain`: every record's author is `Mark Twain`.
#[must_use]
pub fn author() -> CaseDeclaration {
    CaseDeclaration::expect_success("author", SearchField::Author, "Mark Twain")
}

/// `GET /title/A%20Sweltering%20Day%20In%20Australia`: exact title match.
#[must_use]
pub fn title() -> CaseDeclaration {
    CaseDeclaration::expect_success("title", SearchField::Title, "A Sweltering Day In Australia")
}

/// `GET /lines/one%20swift`: every record has a line containing `one swift`.
#[must_use]
pub fn lines() -> CaseDeclaration {
    CaseDeclaration::expect_success("lines", SearchField::Lines, "one swift")
}

/// `GET /linecount/80`: every record reports and has 80 non-empty lines.
#[must_use]
pub fn linecount() -> CaseDeclaration {
    CaseDeclaration::expect_success("linecount", SearchField::Linecount, "80")
}

/// `GET /poemcount/7`: exactly seven records.
#[must_use]
pub fn poemcount() -> CaseDeclaration {
    CaseDeclaration::expect_success("poemcount", SearchField::Poemcount, "7")
}

/// `GET /invalidendpoint/test`: string `"405"` error.
#[must_use]
pub fn invalid_endpoint() -> CaseDeclaration {
    CaseDeclaration::expect_error(
        "error_invalid_endpoint",
        EndpointId::new("invalidendpoint"),
        "test",
        ErrorShape::InvalidEndpoint,
    )
}

/// `GET /author/NonExistentAuthor`: integer `404` error.
#[must_use]
pub fn invalid_search_term() -> CaseDeclaration {
    CaseDeclaration::expect_error(
        "error_invalid_search_term",
        SearchField::Author.endpoint(),
        "NonExistentAuthor",
        ErrorShape::NoMatch,
    )
}

/// Every declared case, success cases first.
#[must_use]
pub fn all() -> Vec<CaseDeclaration> {
    vec![
        author(),
        title(),
        lines(),
        linecount(),
        poemcount(),
        invalid_endpoint(),
        invalid_search_term(),
    ]
}

/// Looks up a declared case by name.
#[must_use]
pub fn find(name: &str) -> Option<CaseDeclaration> {
    all().into_iter().find(|case| case.name() == name)
}
