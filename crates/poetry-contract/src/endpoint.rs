// crates/poetry-contract/src/endpoint.rs
// ============================================================================
// Module: Endpoint Addressing
// Description: Endpoint identifiers, search terms, and request URL building.
// Purpose: Produce `{base}/{endpoint}/{percent-encoded term}` without I/O.
// Dependencies: serde, url, urlencoding
// ============================================================================

//! ## Overview
//! The service is addressed as `{base}/{endpoint}/{term}`. The endpoint is an
//! ASCII identifier placed verbatim; the term is raw user text and is
//! percent-encoded as a single path segment, so a space becomes `%20` and a `/`
//! becomes `%2F`. Building a URL never touches the network.
//!
//! Invariants:
//! - The base is validated once, when the [`UrlBuilder`] is created.
//! - `decode_term(&encode_term(t)) == t` for every term.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::error::HarnessError;

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Path segment naming the server-side search dimension.
///
/// Intentionally invalid names are allowed here; they are part of the error
/// contract. Only the character set is checked, and only when a URL is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EndpointId(String);

impl EndpointId {
    /// Creates an endpoint identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when the identifier can be placed in a path verbatim.
    #[must_use]
    pub fn is_path_safe(&self) -> bool {
        !self.0.is_empty()
            && self.0.bytes().all(|byte| byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-')
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw, pre-encoding search term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Creates a search term.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw term text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the term as a non-negative count (linecount, poemcount).
    #[must_use]
    pub fn as_count(&self) -> Option<usize> {
        self.0.trim().parse().ok()
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The five search dimensions the service supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    /// Exact author name.
    Author,
    /// Exact poem title.
    Title,
    /// Text contained in at least one line.
    Lines,
    /// Number of non-empty lines.
    Linecount,
    /// Number of poems to return.
    Poemcount,
}

impl SearchField {
    /// All supported search fields in endpoint order.
    pub const ALL: [Self; 5] =
        [Self::Author, Self::Title, Self::Lines, Self::Linecount, Self::Poemcount];

    /// Returns the endpoint path segment for the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Title => "title",
            Self::Lines => "lines",
            Self::Linecount => "linecount",
            Self::Poemcount => "poemcount",
        }
    }

    /// Returns the endpoint identifier for the field.
    #[must_use]
    pub fn endpoint(self) -> EndpointId {
        EndpointId::new(self.as_str())
    }

    /// Resolves a field from its endpoint identifier.
    #[must_use]
    pub fn from_endpoint(endpoint: &EndpointId) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == endpoint.as_str())
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Term Encoding
// ============================================================================

/// Percent-encodes a term as one URL path segment.
///
/// Every byte outside `A-Z a-z 0-9 - . _ ~` is encoded.
#[must_use]
pub fn encode_term(term: &SearchTerm) -> String {
    urlencoding::encode(term.as_str()).into_owned()
}

/// Reverses [`encode_term`].
///
/// # Errors
///
/// Returns [`HarnessError::Config`] when the decoded bytes are not UTF-8.
pub fn decode_term(encoded: &str) -> Result<SearchTerm, HarnessError> {
    urlencoding::decode(encoded)
        .map(|decoded| SearchTerm::new(decoded.into_owned()))
        .map_err(|err| HarnessError::Config(format!("term is not valid utf-8: {err}")))
}

// ============================================================================
// SECTION: URL Builder
// ============================================================================

/// Builds request URLs against a fixed base address.
///
/// # Invariants
/// - `base` is an absolute `http`/`https` URL with a host, no trailing slash,
///   no query, and no fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    /// Configured base address with surrounding whitespace trimmed.
    base: String,
}

impl UrlBuilder {
    /// Creates a builder after validating the base address.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Config`] when the base is not an absolute
    /// `http`/`https` URL, ends with `/`, or carries a query or fragment.
    pub fn new(base: &str) -> Result<Self, HarnessError> {
        let base = base.trim();
        let parsed = Url::parse(base)
            .map_err(|err| HarnessError::Config(format!("invalid base url `{base}`: {err}")))?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(HarnessError::Config(format!(
                    "base url scheme must be http or https, got `{other}`"
                )));
            }
        }
        if parsed.host_str().is_none() {
            return Err(HarnessError::Config(format!("base url `{base}` has no host")));
        }
        if base.ends_with('/') {
            return Err(HarnessError::Config(format!(
                "base url `{base}` must not end with a trailing slash"
            )));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(HarnessError::Config(format!(
                "base url `{base}` must not carry a query or fragment"
            )));
        }
        Ok(Self {
            base: base.to_string(),
        })
    }

    /// Returns the configured base address.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Returns the request path for an endpoint and term, without the base.
    #[must_use]
    pub fn path(endpoint: &EndpointId, term: &SearchTerm) -> String {
        format!("/{}/{}", endpoint.as_str(), encode_term(term))
    }

    /// Builds `{base}/{endpoint}/{percent-encoded term}`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::InvalidEndpoint`] when the endpoint contains
    /// characters outside `[A-Za-z0-9_-]`, and [`HarnessError::Config`] for
    /// the terms `.` and `..`, which URL parsing collapses as dot segments.
    pub fn build(&self, endpoint: &EndpointId, term: &SearchTerm) -> Result<Url, HarnessError> {
        if !endpoint.is_path_safe() {
            return Err(HarnessError::InvalidEndpoint(endpoint.to_string()));
        }
        if matches!(term.as_str(), "." | "..") {
            return Err(HarnessError::Config(format!(
                "term `{term}` cannot be sent as a path segment"
            )));
        }
        let raw = format!("{}{}", self.base, Self::path(endpoint, term));
        let url = Url::parse(&raw)
            .map_err(|err| HarnessError::Config(format!("built url `{raw}` is invalid: {err}")))?;
        debug!(url = %url, endpoint = %endpoint, "built request url");
        Ok(url)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
