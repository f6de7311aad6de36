//! HTTP fetcher for the chart sites.
//!
//! All three sources serve plain public pages, but some of them reject
//! default client identifiers, so every request goes out with a fixed
//! browser-like header set.  No retries here: single-chart callers fail
//! the whole request, the yearly aggregator skips the snapshot.

use std::time::Duration;

use crate::error::ChartError;

/// Default per-page timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub struct Fetcher {
    agent: ureq::Agent,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT_SECS)
    }
}

impl Fetcher {
    pub fn new(timeout_secs: u64) -> Self {
        Fetcher {
            agent: ureq::AgentBuilder::new()
                .timeout(Duration::from_secs(timeout_secs))
                .build(),
        }
    }

    /// GET a page and return its raw markup.
    pub fn get(&self, url: &str) -> Result<String, ChartError> {
        let response = self
            .agent
            .get(url)
            .set("User-Agent", USER_AGENT)
            .set(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
            )
            .set("Accept-Language", "en-US,en;q=0.9")
            .set("Upgrade-Insecure-Requests", "1")
            .set("Sec-Fetch-Dest", "document")
            .set("Sec-Fetch-Mode", "navigate")
            .set("Sec-Fetch-Site", "none")
            .set("Sec-Fetch-User", "?1")
            .set("Cache-Control", "max-age=0")
            .call()
            .map_err(|e| ChartError::network(url, e))?;

        response
            .into_string()
            .map_err(|e| ChartError::network(url, e))
    }
}
