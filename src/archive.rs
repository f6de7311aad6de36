//! Singles-chart archive client (musicchartsarchive.com).
//!
//! The archive publishes one weekly chart page per date and a per-year
//! index of those dates.  Charts are plain three-column tables, so a
//! single structural parse suffices here — the strategy chain is for
//! the messier trend source.

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;

use crate::aggregate::{self, Scoring};
use crate::dates::{self, ChartDate};
use crate::error::ChartError;
use crate::fetch::Fetcher;
use crate::rate_limiter::RateLimiter;
use crate::record::{self, AggregatedSongEntry, ChartRecord};

const BASE_URL: &str = "https://musicchartsarchive.com";

/// Pause between snapshot fetches during a yearly aggregation.
const PAUSE_MS: u64 = 100;

fn chart_href_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/singles-chart/(\d{4}-\d{2}-\d{2})").unwrap())
}

/// Enumerate the chart dates published for one year.
pub fn available_dates(fetcher: &Fetcher, year: &str) -> Result<Vec<ChartDate>, ChartError> {
    let year = dates::validate_year(year)?;
    let url = format!("{}/singles-charts/{}", BASE_URL, year);
    println!("[archive] fetching date index: {}", url);
    let html = fetcher.get(&url)?;
    let mut found = parse_available_dates(&Html::parse_document(&html));
    found.sort_by(|a, b| a.date.cmp(&b.date));
    println!("[archive] {} dates for {}", found.len(), year);
    Ok(found)
}

fn parse_available_dates(doc: &Html) -> Vec<ChartDate> {
    let anchor_sel = Selector::parse(r#"a[href^="/singles-chart/"]"#).unwrap();
    let mut found = Vec::new();
    for anchor in doc.select(&anchor_sel) {
        let href = match anchor.value().attr("href") {
            Some(href) => href,
            None => continue,
        };
        if let Some(caps) = chart_href_re().captures(href) {
            let date = caps[1].to_string();
            let label = anchor.text().collect::<String>().trim().to_string();
            let formatted = if label.is_empty() {
                dates::format_date(&date)
            } else {
                label
            };
            found.push(ChartDate::new(date, formatted));
        }
    }
    found
}

/// Fetch and parse the chart for one date.
pub fn chart(fetcher: &Fetcher, date: &str) -> Result<Vec<ChartRecord>, ChartError> {
    dates::validate_date(date)?;
    let url = format!("{}/singles-chart/{}", BASE_URL, date);
    println!("[archive] fetching chart: {}", url);
    let html = fetcher.get(&url)?;
    let records = parse_chart_rows(&Html::parse_document(&html));
    Ok(record::normalize(records))
}

fn parse_chart_rows(doc: &Html) -> Vec<ChartRecord> {
    let row_sel = Selector::parse(".chart-table tr").unwrap();
    let cell_sel = Selector::parse("td").unwrap();
    let link_sel = Selector::parse("a").unwrap();

    let mut records = Vec::new();
    for row in doc.select(&row_sel) {
        let cells: Vec<_> = row.select(&cell_sel).collect();
        if cells.len() < 3 {
            continue; // header or filler row
        }
        let order: u32 = match cells[0].text().collect::<String>().trim().parse() {
            Ok(n) => n,
            Err(_) => continue,
        };
        let title = cells[1]
            .select(&link_sel)
            .next()
            .map(|a| a.text().collect::<String>().trim().to_string())
            .unwrap_or_default();
        let artist = cells[2]
            .select(&link_sel)
            .next()
            .map(|a| a.text().collect::<String>().trim().to_string())
            .unwrap_or_default();
        if !title.is_empty() && !artist.is_empty() {
            records.push(ChartRecord::new(order, title, artist));
        }
    }
    records
}

/// Compute the yearly top 50 with inverse-rank points scoring, pacing
/// snapshot fetches to be polite to the archive.
pub fn yearly_top(fetcher: &Fetcher, year: &str) -> Result<Vec<AggregatedSongEntry>, ChartError> {
    let all_dates = available_dates(fetcher, year)?;
    let limiter = RateLimiter::from_millis("archive", PAUSE_MS);
    aggregate::aggregate(
        "archive",
        &all_dates,
        Scoring::Points,
        |date| chart(fetcher, date),
        Some(limiter),
    )
}
