//! Crate-wide error type for the chart scrapers.
//!
//! Every failure surfaced to a caller carries a machine-readable kind
//! (for structured error payloads) and a human-readable message.

use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum ChartError {
    /// Malformed caller input (year, date, source id, chart type).
    /// Raised before any network activity.
    Validation(String),
    /// An upstream fetch failed or timed out.
    Network { url: String, message: String },
    /// Year enumeration found no snapshots at all.
    NoData(String),
}

impl ChartError {
    /// Stable machine identifier for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ChartError::Validation(_) => "validation",
            ChartError::Network { .. } => "network",
            ChartError::NoData(_) => "no_data",
        }
    }

    pub(crate) fn network(url: &str, err: impl fmt::Display) -> Self {
        ChartError::Network {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartError::Validation(msg) => write!(f, "invalid input: {}", msg),
            ChartError::Network { url, message } => {
                write!(f, "request to {} failed: {}", url, message)
            }
            ChartError::NoData(msg) => write!(f, "no chart data: {}", msg),
        }
    }
}

impl Error for ChartError {}
