// crates/poetry-contract/src/config/env.rs
// ============================================================================
// Module: Harness Environment
// Description: Environment-backed configuration for the contract harness.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 fails closed. Unset variables fall back to
//! the defaults below; set-but-empty variables are rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use crate::error::HarnessError;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Base address of the public service.
pub const DEFAULT_BASE_URL: &str = "https://poetrydb.org";

/// Request timeout used when no override is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for harness configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessEnv {
    /// Optional base URL override (absolute, no trailing slash).
    BaseUrl,
    /// Optional timeout override in seconds (positive integer).
    TimeoutSeconds,
    /// Optional user agent override.
    UserAgent,
}

impl HarnessEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BaseUrl => "POETRY_CONTRACT_BASE_URL",
            Self::TimeoutSeconds => "POETRY_CONTRACT_TIMEOUT_SEC",
            Self::UserAgent => "POETRY_CONTRACT_USER_AGENT",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed harness configuration.
///
/// # Invariants
/// - `timeout` is strictly positive once loaded from the environment.
/// - `base_url` is validated when a [`crate::UrlBuilder`] is built from it,
///   not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Base address of the service under test.
    pub base_url: String,
    /// Whole-request timeout applied by the HTTP client.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
        }
    }
}

impl HarnessConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Config`] when an environment value is not valid
    /// UTF-8, is empty, or fails validation (for example, a zero timeout).
    pub fn load() -> Result<Self, HarnessError> {
        let defaults = Self::default();
        let base_url = read_env_nonempty(HarnessEnv::BaseUrl.as_str())?
            .map_or(defaults.base_url, |value| value.trim().to_string());
        let timeout = read_env_nonempty(HarnessEnv::TimeoutSeconds.as_str())?
            .map(|value| parse_timeout_seconds(HarnessEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?
            .unwrap_or(defaults.timeout);
        let user_agent =
            read_env_nonempty(HarnessEnv::UserAgent.as_str())?.unwrap_or(defaults.user_agent);
        Ok(Self {
            base_url,
            timeout,
            user_agent,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn default_user_agent() -> String {
    format!("poetry-contract/{}", env!("CARGO_PKG_VERSION"))
}

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, HarnessError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string()
            .map(Some)
            .map_err(|_| HarnessError::Config(format!("{name} must be valid UTF-8")))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
fn read_env_nonempty(name: &str) -> Result<Option<String>, HarnessError> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => {
            Err(HarnessError::Config(format!("{name} must not be empty")))
        }
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a positive timeout value given in whole seconds.
///
/// # Errors
///
/// Returns an error when the value is missing, non-numeric, or zero.
pub fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, HarnessError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(HarnessError::Config(format!(
            "{name} must be a positive integer number of seconds"
        )));
    }
    let secs: u64 = trimmed.parse().map_err(|_| {
        HarnessError::Config(format!("{name} must be a positive integer number of seconds"))
    })?;
    if secs == 0 {
        return Err(HarnessError::Config(format!("{name} must be greater than zero")));
    }
    Ok(Duration::from_secs(secs))
}
