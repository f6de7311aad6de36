//! Caption strategy: cover-art alt text.
//!
//! The trend site describes each cover as "Album artwork for album
//! titled X by Y" or "Listen to X by Y".  No rank is present, so
//! records are numbered sequentially in document order.

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;

use super::ExtractionStrategy;
use crate::record::ChartRecord;

pub struct ImageAltStrategy;

/// Most specific phrasing first; the bare "X by Y" catch-all last.
fn alt_patterns() -> &'static [Regex] {
    static TABLE: OnceLock<Vec<Regex>> = OnceLock::new();
    TABLE.get_or_init(|| {
        [
            r"(?i)album titled (.+?) by (.+)$",
            r"(?i)listen to (.+?) by (.+)$",
            r"(?i)^(.+?) by (.+)$",
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
    })
}

impl ExtractionStrategy for ImageAltStrategy {
    fn name(&self) -> &str {
        "image-alt"
    }

    fn extract(&self, doc: &Html) -> Vec<ChartRecord> {
        let img_sel = Selector::parse(r#"img[alt*="by"]"#).unwrap();
        let mut records: Vec<ChartRecord> = Vec::new();

        for img in doc.select(&img_sel) {
            let alt = match img.value().attr("alt") {
                Some(alt) => alt,
                None => continue,
            };
            for pattern in alt_patterns() {
                if let Some(caps) = pattern.captures(alt) {
                    let title = caps[1].trim().to_string();
                    let artist = caps[2].trim().to_string();
                    if !title.is_empty() && !artist.is_empty() {
                        let exists = records
                            .iter()
                            .any(|r| r.title == title && r.artist == artist);
                        if !exists {
                            let order = records.len() as u32 + 1;
                            records.push(ChartRecord::new(order, title, artist));
                        }
                    }
                    break;
                }
            }
        }

        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ranks_from_captions() {
        let doc = Html::parse_document(
            r#"<img alt="Album artwork for album titled Flowers by Miley Cyrus">
               <img alt="Listen to Greedy by Tate McRae">
               <img alt="Paint The Town Red by Doja Cat">"#,
        );
        let records = ImageAltStrategy.extract(&doc);
        assert_eq!(
            records,
            vec![
                ChartRecord::new(1, "Flowers", "Miley Cyrus"),
                ChartRecord::new(2, "Greedy", "Tate McRae"),
                ChartRecord::new(3, "Paint The Town Red", "Doja Cat"),
            ]
        );
    }

    #[test]
    fn test_duplicate_captions_counted_once() {
        let doc = Html::parse_document(
            r#"<img alt="Listen to Flowers by Miley Cyrus">
               <img alt="Listen to Flowers by Miley Cyrus">"#,
        );
        assert_eq!(ImageAltStrategy.extract(&doc).len(), 1);
    }

    #[test]
    fn test_unrelated_alts_ignored() {
        let doc = Html::parse_document(r#"<img alt="site logo"><img alt="">"#);
        assert!(ImageAltStrategy.extract(&doc).is_empty());
    }
}
