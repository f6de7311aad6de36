//! Shazam charts client (shazam.com/charts).
//!
//! The trend site is a JS-heavy app whose markup shifts often, so this
//! is the source that runs the full extraction chain and unions the
//! results — the structural strategy finds what it can and the text
//! strategies mop up.  No historical archive exists; every request is
//! against the current chart.

use scraper::Html;
use serde::Serialize;

use crate::dates::ChartDate;
use crate::error::ChartError;
use crate::extract_strategies::{self, full_chain};
use crate::fetch::Fetcher;
use crate::record::{self, AggregatedSongEntry, ChartRecord};

const BASE_URL: &str = "https://www.shazam.com/charts";

/// One selectable chart on the trend site.
#[derive(Debug, Clone, Serialize)]
pub struct ChartType {
    pub id: &'static str,
    pub name: &'static str,
    pub url: String,
}

/// The fixed set of charts the site exposes.
pub fn chart_types() -> Vec<ChartType> {
    vec![
        ChartType {
            id: "top-200",
            name: "Top 200",
            url: format!("{}/top-200/united-states", BASE_URL),
        },
        ChartType {
            id: "pop",
            name: "Pop",
            url: format!("{}/genre/united-states/pop", BASE_URL),
        },
        ChartType {
            id: "hip-hop-rap",
            name: "Hip-Hop/Rap",
            url: format!("{}/genre/united-states/hip-hop-rap", BASE_URL),
        },
        ChartType {
            id: "country",
            name: "Country",
            url: format!("{}/genre/united-states/country", BASE_URL),
        },
    ]
}

/// The trend site has no archive; only `today` exists.
pub fn available_dates(_year: &str) -> Vec<ChartDate> {
    vec![ChartDate::today()]
}

/// Fetch the current chart of the given type.  An empty result means
/// every strategy came up blank — legitimate, if unhelpful.
pub fn chart(fetcher: &Fetcher, chart_type: &str) -> Result<Vec<ChartRecord>, ChartError> {
    let charts = chart_types();
    let chart = charts.iter().find(|c| c.id == chart_type).ok_or_else(|| {
        let ids: Vec<&str> = charts.iter().map(|c| c.id).collect();
        ChartError::Validation(format!(
            "unknown chart type '{}', available: {}",
            chart_type,
            ids.join(", ")
        ))
    })?;

    println!("[shazam] fetching chart: {}", chart.url);
    let html = fetcher.get(&chart.url)?;
    let doc = Html::parse_document(&html);

    let candidates = extract_strategies::run_all(&full_chain(), &doc);
    let records = record::normalize(candidates);
    println!("[shazam] extracted {} records", records.len());
    Ok(records)
}

/// No history to fold: the "yearly" view is the current chart, each
/// entry marked with a single appearance and re-ranked 1..=N.
pub fn yearly_top(
    fetcher: &Fetcher,
    chart_type: &str,
) -> Result<Vec<AggregatedSongEntry>, ChartError> {
    let records = chart(fetcher, chart_type)?;
    Ok(records
        .into_iter()
        .enumerate()
        .map(|(index, r)| AggregatedSongEntry {
            order: index as u32 + 1,
            title: r.title,
            artist: r.artist,
            total_points: None,
            highest_position: None,
            appearances: 1,
            best_us: None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_types_fixed_set() {
        let charts = chart_types();
        let ids: Vec<&str> = charts.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["top-200", "pop", "hip-hop-rap", "country"]);
        assert!(charts[0].url.ends_with("/top-200/united-states"));
    }

    #[test]
    fn test_available_dates_is_today_only() {
        let found = available_dates("2024");
        assert_eq!(found, vec![ChartDate::today()]);
    }

    #[test]
    fn test_unknown_chart_type_is_validation_error() {
        let fetcher = Fetcher::new(1);
        let err = chart(&fetcher, "classical").unwrap_err();
        assert_eq!(err.kind(), "validation");
        assert!(err.to_string().contains("top-200"));
    }
}
