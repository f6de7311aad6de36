//! Dispatch surface consumed by routing layers and the CLI bins.
//!
//! One `Source` id selects a site module; the free functions below are
//! the whole inbound contract.  The caller supplies the fetcher, and
//! concurrent callers share no other state.

use crate::archive;
use crate::dates::ChartDate;
use crate::error::ChartError;
use crate::fetch::Fetcher;
use crate::kworb;
use crate::record::{AggregatedSongEntry, ChartRecord};
use crate::shazam::{self, ChartType};

const DEFAULT_CHART_TYPE: &str = "top-200";

/// The upstream chart sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Weekly singles-chart archive (musicchartsarchive.com).
    Archive,
    /// Daily Apple Music stats (kworb.net).
    Kworb,
    /// Current trend charts (shazam.com).
    Shazam,
}

impl Source {
    pub fn parse(id: &str) -> Result<Self, ChartError> {
        match id {
            "archive" => Ok(Source::Archive),
            "kworb" => Ok(Source::Kworb),
            "shazam" => Ok(Source::Shazam),
            other => Err(ChartError::Validation(format!(
                "unknown source '{}', available: archive, kworb, shazam",
                other
            ))),
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Source::Archive => "archive",
            Source::Kworb => "kworb",
            Source::Shazam => "shazam",
        }
    }
}

/// Which snapshot dates exist for a year on this source.
pub fn available_dates(
    fetcher: &Fetcher,
    source: Source,
    year: &str,
) -> Result<Vec<ChartDate>, ChartError> {
    match source {
        Source::Archive => archive::available_dates(fetcher, year),
        Source::Kworb => kworb::available_dates(fetcher, year),
        Source::Shazam => {
            crate::dates::validate_year(year)?;
            Ok(shazam::available_dates(year))
        }
    }
}

/// One chart snapshot.  `token` is a dashed date for the archive
/// sources or ignored for the trend source, where `chart_type` selects
/// the chart instead.
pub fn chart_data(
    fetcher: &Fetcher,
    source: Source,
    token: &str,
    chart_type: Option<&str>,
) -> Result<Vec<ChartRecord>, ChartError> {
    match source {
        Source::Archive => archive::chart(fetcher, token),
        Source::Kworb => kworb::chart(fetcher, token),
        Source::Shazam => shazam::chart(fetcher, chart_type.unwrap_or(DEFAULT_CHART_TYPE)),
    }
}

/// The yearly aggregate ranking for a source.
pub fn yearly_top_songs(
    fetcher: &Fetcher,
    source: Source,
    year: &str,
    chart_type: Option<&str>,
) -> Result<Vec<AggregatedSongEntry>, ChartError> {
    match source {
        Source::Archive => archive::yearly_top(fetcher, year),
        Source::Kworb => kworb::yearly_top(fetcher, year),
        Source::Shazam => {
            crate::dates::validate_year(year)?;
            shazam::yearly_top(fetcher, chart_type.unwrap_or(DEFAULT_CHART_TYPE))
        }
    }
}

/// Chart types exist for the trend source only.
pub fn available_chart_types() -> Vec<ChartType> {
    shazam::chart_types()
}
