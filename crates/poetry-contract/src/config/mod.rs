// crates/poetry-contract/src/config/mod.rs
// ============================================================================
// Module: Harness Configuration
// Description: Centralized configuration for the contract harness.
// Purpose: Provide typed access to base URL, timeout, and client identity.
// Dependencies: std, url
// ============================================================================

//! ## Overview
//! Harness configuration is read from environment variables and mapped into a
//! small typed structure shared by the CLI runner and the live suites.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::DEFAULT_BASE_URL;
pub use env::DEFAULT_TIMEOUT;
pub use env::HarnessConfig;
pub use env::HarnessEnv;
pub use env::parse_timeout_seconds;
pub use env::read_env_strict;
