// crates/poetry-contract/src/transport.rs
// ============================================================================
// Module: HTTP Transport
// Description: GET capability consumed by case fixtures.
// Purpose: Issue one blocking GET and return status plus raw body bytes.
// Dependencies: reqwest, tracing, url
// ============================================================================

//! ## Overview
//! Fixtures only need "GET this URL, give me the status and the bytes". The
//! [`Transport`] trait is that seam; [`HttpTransport`] backs it with a blocking
//! `reqwest` client. Transport failures are harness errors and are never
//! retried here.
//!
//! Invariants:
//! - Each [`Transport::get`] call issues one request and never retries it.
//! - Redirects are followed up to [`MAX_REDIRECTS`] hops; the reported status
//!   and body are those of the final response.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Instant;

use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use tracing::info;
use tracing::warn;
use url::Url;

use crate::config::HarnessConfig;
use crate::error::HarnessError;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum number of redirect hops followed for one request.
pub const MAX_REDIRECTS: usize = 10;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Status code and raw body of one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Unparsed body bytes.
    pub body: Vec<u8>,
}

/// Capability to issue a single HTTP GET.
pub trait Transport {
    /// Issues one GET request to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Transport`] when the request cannot be
    /// completed or the body cannot be read.
    fn get(&self, url: &Url) -> Result<RawResponse, HarnessError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &Url) -> Result<RawResponse, HarnessError> {
        (**self).get(url)
    }
}

// ============================================================================
// SECTION: Blocking HTTP Transport
// ============================================================================

/// Transport backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Shared client; cloning shares the connection pool.
    client: Client,
}

impl HttpTransport {
    /// Builds a client with the configured timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Config`] when the HTTP client cannot be built.
    pub fn new(config: &HarnessConfig) -> Result<Self, HarnessError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|err| HarnessError::Config(format!("failed to build http client: {err}")))?;
        Ok(Self {
            client,
        })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url) -> Result<RawResponse, HarnessError> {
        let started = Instant::now();
        let response = self.client.get(url.as_str()).send().map_err(|err| {
            warn!(url = %url, error = %err, "request failed");
            HarnessError::Transport(format!("GET {url} failed: {err}"))
        })?;
        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.bytes().map_err(|err| {
            warn!(url = %url, error = %err, "failed to read response body");
            HarnessError::Transport(format!("failed to read body of {url}: {err}"))
        })?;
        info!(
            url = %url,
            final_url = %final_url,
            status,
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "request completed"
        );
        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}
