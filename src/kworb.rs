//! Apple Music stats client (kworb.net/apple_songs).
//!
//! kworb archives a daily snapshot table as `YYYYMMDD.html` from 2022
//! onward and serves the live chart at `index.html`.  Rows carry many
//! per-country columns; the US position column is the rank.

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;

use crate::aggregate::{self, Scoring};
use crate::dates::{self, ChartDate, TODAY_TOKEN};
use crate::error::ChartError;
use crate::fetch::Fetcher;
use crate::record::{self, AggregatedSongEntry, ChartRecord};

use chrono::{Datelike, Utc};

const BASE_URL: &str = "https://kworb.net/apple_songs/";

/// No archived snapshots exist before this year.
const EARLIEST_YEAR: i32 = 2022;

/// Index of the US-position column in the snapshot table.
const US_COLUMN: usize = 9;

/// Minimum cells for a data row; shorter rows are headers or separators.
const MIN_COLUMNS: usize = 13;

fn archive_href_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{8})\.html").unwrap())
}

/// Enumerate archived snapshot dates for one year.  Years before the
/// archive's floor yield an empty list, not an error.
pub fn available_dates(fetcher: &Fetcher, year: &str) -> Result<Vec<ChartDate>, ChartError> {
    let year = dates::validate_year(year)?;
    if year < EARLIEST_YEAR {
        return Ok(Vec::new());
    }
    let url = format!("{}archive/", BASE_URL);
    println!("[kworb] fetching archive index: {}", url);
    let html = fetcher.get(&url)?;
    let mut found = parse_archive_index(&Html::parse_document(&html), year);

    if year == Utc::now().year() {
        found.push(ChartDate::today());
    }
    // The `today` token sorts after dashed dates, keeping the live
    // chart at the end of the list.
    found.sort_by(|a, b| a.date.cmp(&b.date));
    println!("[kworb] {} dates for {}", found.len(), year);
    Ok(found)
}

fn parse_archive_index(doc: &Html, year: i32) -> Vec<ChartDate> {
    let anchor_sel = Selector::parse("a").unwrap();
    let year_prefix = year.to_string();
    let mut found = Vec::new();
    for anchor in doc.select(&anchor_sel) {
        let href = match anchor.value().attr("href") {
            Some(href) => href,
            None => continue,
        };
        if let Some(caps) = archive_href_re().captures(href) {
            if let Some(date) = dates::compact_to_dashed(&caps[1]) {
                if date.starts_with(&year_prefix) {
                    let formatted = date.clone();
                    found.push(ChartDate::new(date, formatted));
                }
            }
        }
    }
    found
}

/// Fetch and parse the snapshot for one date (`today` = live chart).
pub fn chart(fetcher: &Fetcher, date: &str) -> Result<Vec<ChartRecord>, ChartError> {
    let url = if date == TODAY_TOKEN {
        format!("{}index.html", BASE_URL)
    } else {
        dates::validate_date(date)?;
        format!("{}archive/{}.html", BASE_URL, date.replace('-', ""))
    };
    println!("[kworb] fetching chart: {}", url);
    let html = fetcher.get(&url)?;
    let records = parse_snapshot_rows(&Html::parse_document(&html));
    Ok(record::normalize(records))
}

fn parse_snapshot_rows(doc: &Html) -> Vec<ChartRecord> {
    let row_sel = Selector::parse("table.sortable tbody tr").unwrap();
    let cell_sel = Selector::parse("td").unwrap();

    let mut records = Vec::new();
    for row in doc.select(&row_sel) {
        let cells: Vec<_> = row.select(&cell_sel).collect();
        if cells.len() < MIN_COLUMNS {
            continue;
        }
        // Songs without a US position are charting elsewhere only.
        let us: u32 = match cells[US_COLUMN].text().collect::<String>().trim().parse() {
            Ok(n) => n,
            Err(_) => continue,
        };
        let combined = cells[2].text().collect::<String>();
        let combined = combined.trim();
        let (artist, title) = match combined.split_once(" - ") {
            Some((artist, title)) => (artist.trim(), title.trim()),
            None => continue,
        };
        if !artist.is_empty() && !title.is_empty() {
            records.push(ChartRecord::new(us, title, artist));
        }
    }
    records
}

/// Yearly top 50 ordered by the best US position ever held.  Snapshot
/// pages are static files, so no inter-request pause is needed.
pub fn yearly_top(fetcher: &Fetcher, year: &str) -> Result<Vec<AggregatedSongEntry>, ChartError> {
    let all_dates = available_dates(fetcher, year)?;
    aggregate::aggregate(
        "kworb",
        &all_dates,
        Scoring::BestRank,
        |date| chart(fetcher, date),
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARCHIVE_PAGE: &str = r#"
        <pre>
          <a href="20240105.html">20240105.html</a>
          <a href="20240112.html">20240112.html</a>
          <a href="20231229.html">20231229.html</a>
          <a href="../index.html">current</a>
        </pre>"#;

    #[test]
    fn test_parse_archive_index_filters_year() {
        let found = parse_archive_index(&Html::parse_document(ARCHIVE_PAGE), 2024);
        assert_eq!(
            found,
            vec![
                ChartDate::new("2024-01-05", "2024-01-05"),
                ChartDate::new("2024-01-12", "2024-01-12"),
            ]
        );
    }

    fn snapshot_row(pos: &str, entry: &str, us: &str) -> String {
        let mut cells = vec![pos.to_string(), "=".to_string(), entry.to_string()];
        for i in 3..14 {
            cells.push(if i == US_COLUMN { us.to_string() } else { i.to_string() });
        }
        let tds: String = cells.iter().map(|c| format!("<td>{}</td>", c)).collect();
        format!("<tr>{}</tr>", tds)
    }

    #[test]
    fn test_parse_snapshot_rows() {
        let html = format!(
            "<table class=\"sortable\"><tbody>{}{}{}</tbody></table>",
            snapshot_row("1", "Miley Cyrus - Flowers", "2"),
            snapshot_row("2", "Tate McRae - Greedy", "--"),
            snapshot_row("3", "Doja Cat - Paint The Town Red", "1"),
        );
        let records = parse_snapshot_rows(&Html::parse_document(&html));
        // The row without a US position is dropped; rank is the US
        // column, not the global row position.
        assert_eq!(
            records,
            vec![
                ChartRecord::new(2, "Flowers", "Miley Cyrus"),
                ChartRecord::new(1, "Paint The Town Red", "Doja Cat"),
            ]
        );
    }

    #[test]
    fn test_artist_title_split_on_first_dash() {
        let html = format!(
            "<table class=\"sortable\"><tbody>{}</tbody></table>",
            snapshot_row("1", "Artist - Title - With Dash", "5"),
        );
        let records = parse_snapshot_rows(&Html::parse_document(&html));
        assert_eq!(records[0].artist, "Artist");
        assert_eq!(records[0].title, "Title - With Dash");
    }

    #[test]
    fn test_short_rows_skipped() {
        let html = "<table class=\"sortable\"><tbody><tr><td>1</td><td>x</td></tr></tbody></table>";
        assert!(parse_snapshot_rows(&Html::parse_document(html)).is_empty());
    }

    #[test]
    fn test_today_sorts_last() {
        let mut found = vec![ChartDate::today(), ChartDate::new("2025-01-03", "2025-01-03")];
        found.sort_by(|a, b| a.date.cmp(&b.date));
        assert_eq!(found.last().unwrap().date, TODAY_TOKEN);
    }

    #[test]
    fn test_invalid_year_rejected_floor_year_empty() {
        let fetcher = Fetcher::new(1);
        let err = available_dates(&fetcher, "20x2").unwrap_err();
        assert_eq!(err.kind(), "validation");
        // Pre-archive years: empty list, no network call needed either
        // (the floor check fires before the fetch).
        assert!(available_dates(&fetcher, "2021").unwrap().is_empty());
    }
}
