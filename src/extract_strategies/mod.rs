//! Extraction strategies for recovering ranked songs from chart markup.
//!
//! Each strategy makes one structural assumption about the page:
//! - Song-item markup (the trend site's own list shape)
//! - JSON-LD structured data blocks
//! - Image alt/caption text
//! - Generic list items run through the line pattern table
//! - Free document text as a last resort
//!
//! Strategies are independent and cheap, so the driver runs the whole
//! chain and unions the results: a structural strategy may find only
//! some of the records and a text strategy the rest.

pub mod image_alt;
pub mod json_ld;
pub mod list_items;
pub mod patterns;
pub mod song_item;
pub mod text_lines;

use scraper::{ElementRef, Html};
use std::collections::HashSet;

use crate::record::ChartRecord;

pub use image_alt::ImageAltStrategy;
pub use json_ld::JsonLdStrategy;
pub use list_items::ListItemStrategy;
pub use song_item::SongItemStrategy;
pub use text_lines::TextLineStrategy;

/// Common trait for all chart extraction strategies.
pub trait ExtractionStrategy {
    /// Strategy name for log messages.
    fn name(&self) -> &str;

    /// Attempt to pull ranked records out of the parsed document.
    /// Malformed fragments are skipped per candidate, never fatal.
    fn extract(&self, doc: &Html) -> Vec<ChartRecord>;
}

/// The full chain in priority order, as run against the trend source.
pub fn full_chain() -> Vec<Box<dyn ExtractionStrategy>> {
    vec![
        Box::new(SongItemStrategy),
        Box::new(JsonLdStrategy),
        Box::new(ImageAltStrategy),
        Box::new(ListItemStrategy),
        Box::new(TextLineStrategy),
    ]
}

/// Run every strategy and union the results.  Duplicates keep the record
/// from the earlier (higher priority) strategy.
pub fn run_all(strategies: &[Box<dyn ExtractionStrategy>], doc: &Html) -> Vec<ChartRecord> {
    let mut seen: HashSet<(u32, String, String)> = HashSet::new();
    let mut records = Vec::new();
    for strategy in strategies {
        for record in strategy.extract(doc) {
            let key = (record.order, record.title.clone(), record.artist.clone());
            if seen.insert(key) {
                records.push(record);
            }
        }
    }
    records
}

/// Flatten an element's text into one whitespace-collapsed line.
pub(crate) fn flat_text(el: &ElementRef) -> String {
    el.text().collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<ChartRecord>);

    impl ExtractionStrategy for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }
        fn extract(&self, _doc: &Html) -> Vec<ChartRecord> {
            self.0.clone()
        }
    }

    #[test]
    fn test_run_all_unions_and_dedups() {
        let doc = Html::parse_document("<html></html>");
        let strategies: Vec<Box<dyn ExtractionStrategy>> = vec![
            Box::new(Fixed(vec![ChartRecord::new(1, "A", "X")])),
            Box::new(Fixed(vec![
                ChartRecord::new(1, "A", "X"),
                ChartRecord::new(2, "B", "Y"),
            ])),
        ];
        let records = run_all(&strategies, &doc);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "A");
        assert_eq!(records[1].title, "B");
    }
}
