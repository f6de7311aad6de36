pub mod aggregate;
pub mod archive;
pub mod config;
pub mod dates;
pub mod error;
pub mod extract_strategies;
pub mod fetch;
pub mod kworb;
pub mod rate_limiter;
pub mod record;
pub mod service;
pub mod shazam;

pub use config::Config;
pub use dates::{ChartDate, TODAY_TOKEN};
pub use error::ChartError;
pub use fetch::Fetcher;
pub use rate_limiter::RateLimiter;
pub use record::{
    normalize, AggregatedSongEntry, ChartRecord, CHART_DISPLAY_SIZE, MAX_CHART_POSITION,
};
pub use service::{available_chart_types, available_dates, chart_data, yearly_top_songs, Source};
