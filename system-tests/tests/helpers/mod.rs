// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for the live contract suites.
// Purpose: Provide shared fixtures and artifact utilities.
// Dependencies: system-tests, poetry-contract
// ============================================================================

//! ## Overview
//! Shared helpers for the live contract suites.
//! Invariants:
//! - Each case issues exactly one request per test binary.
//! - Every test leaves a summary behind, including on panic.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod fixtures;
