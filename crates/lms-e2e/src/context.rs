//! Shared state handed to every scenario.

use lms_client::{CoverageTracker, CurlRecorder, LmsClients, LmsConfig};
use std::path::Path;
use tracing::debug;

/// Number of curl reproductions kept per scenario.
const CURL_HISTORY: usize = 16;

/// Clients, configuration and observability sinks for one suite run.
///
/// One context lives for the whole run, so every scenario shares the same
/// session cache and coverage counters.
#[derive(Debug)]
pub struct ScenarioContext {
    pub config: LmsConfig,
    pub clients: LmsClients,
    pub curl: CurlRecorder,
    pub coverage: CoverageTracker,
}

impl ScenarioContext {
    /// Builds the clients with request logging, curl recording and coverage
    /// tracking attached to every transport.
    pub fn new(config: LmsConfig) -> lms_client::Result<Self> {
        let curl = CurlRecorder::new(CURL_HISTORY);
        let coverage = CoverageTracker::new();

        let transport = config
            .transport_config()
            .with_logging()
            .on_request(curl.hook())
            .on_response(coverage.hook());
        let clients = LmsClients::new(transport)?;
        debug!(base_url = %config.base_url, "Scenario context ready");

        Ok(Self {
            config,
            clients,
            curl,
            coverage,
        })
    }

    pub fn base_url(&self) -> &str {
        self.clients.base_url()
    }

    /// Image uploaded by the file fixtures.
    pub fn image_png_file(&self) -> &Path {
        &self.config.image_png_file
    }
}
