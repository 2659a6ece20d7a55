// system-tests/src/lib.rs
// ============================================================================
// Module: PoetryDB Contract System Tests Library
// Description: Shared configuration for the live contract suites.
// Purpose: Provide typed settings to the system-test binaries.
// Dependencies: poetry-contract
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration used by the live contract suites in
//! `system-tests/tests`. The suites are compiled only with the `system-tests`
//! feature because every test performs a real request against the service.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
