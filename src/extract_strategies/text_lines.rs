//! Free-text fallback: the whole document's visible text, line by
//! line, with no structural anchoring at all.  Lowest priority — only
//! useful when every structural assumption has failed.

use scraper::Html;

use super::{patterns, ExtractionStrategy};
use crate::record::ChartRecord;

pub struct TextLineStrategy;

impl ExtractionStrategy for TextLineStrategy {
    fn name(&self) -> &str {
        "text-lines"
    }

    fn extract(&self, doc: &Html) -> Vec<ChartRecord> {
        let mut records = Vec::new();

        for node in doc.root_element().text() {
            for line in node.lines() {
                if let Some(record) = patterns::match_line(line) {
                    records.push(record);
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
    fn test_plain_text_lines() {
        let doc = Html::parse_document(
            "<div>Weekly chart\n1. Flowers - Miley Cyrus\n2. Greedy - Tate McRae\n</div>",
        );
        let records = TextLineStrategy.extract(&doc);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], ChartRecord::new(1, "Flowers", "Miley Cyrus"));
    }

    #[test]
    fn test_no_chart_lines_is_empty() {
        let doc = Html::parse_document("<p>Nothing ranked here.</p>");
        assert!(TextLineStrategy.extract(&doc).is_empty());
    }
}
