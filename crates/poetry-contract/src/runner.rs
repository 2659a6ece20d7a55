// crates/poetry-contract/src/runner.rs
// ============================================================================
// Module: Case Runner
// Description: Composes URL building, transport, and checks per case.
// Purpose: Run declarations in isolation and collect run reports.
// Dependencies: tracing
// ============================================================================

//! ## Overview
//! The runner owns one [`UrlBuilder`] and one [`Transport`] and creates a
//! fresh [`CaseFixture`] for every declaration, so nothing cached for one case
//! is visible to another. A case that aborts or fails does not stop the run.

use std::time::Instant;

use tracing::info;

use crate::case::CaseDeclaration;
use crate::case::CaseFixture;
use crate::config::HarnessConfig;
use crate::endpoint::UrlBuilder;
use crate::error::HarnessError;
use crate::report::CaseReport;
use crate::report::RunReport;
use crate::transport::HttpTransport;
use crate::transport::Transport;

/// Runs case declarations against one base address and transport.
#[derive(Debug, Clone)]
pub struct CaseRunner<T> {
    /// Builder shared by every case.
    urls: UrlBuilder,
    /// Transport shared by every case; fixtures borrow it.
    transport: T,
}

impl CaseRunner<HttpTransport> {
    /// Builds a runner backed by the blocking HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Config`] when the base URL is invalid or the
    /// HTTP client cannot be built.
    pub fn from_config(config: &HarnessConfig) -> Result<Self, HarnessError> {
        let urls = UrlBuilder::new(&config.base_url)?;
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(urls, transport))
    }
}

impl<T: Transport> CaseRunner<T> {
    /// Creates a runner.
    #[must_use]
    pub const fn new(urls: UrlBuilder, transport: T) -> Self {
        Self {
            urls,
            transport,
        }
    }

    /// Creates a fresh fixture for a declaration.
    #[must_use]
    pub fn fixture(&self, declaration: CaseDeclaration) -> CaseFixture<&T> {
        CaseFixture::new(declaration, self.urls.clone(), &self.transport)
    }

    /// Runs one case: one request, then every declared check.
    #[must_use]
    pub fn run_case(&self, declaration: &CaseDeclaration) -> CaseReport {
        let report = self.fixture(declaration.clone()).evaluate();
        info!(case = %report.name, status = report.status().as_str(), "case finished");
        report
    }

    /// Runs every declaration in order and tallies the results.
    #[must_use]
    pub fn run_all(&self, declarations: &[CaseDeclaration]) -> RunReport {
        let started = Instant::now();
        info!(base = self.urls.base(), cases = declarations.len(), "running contract cases");
        let cases = declarations.iter().map(|declaration| self.run_case(declaration)).collect();
        RunReport::from_cases(cases, started.elapsed().as_millis())
    }
}
