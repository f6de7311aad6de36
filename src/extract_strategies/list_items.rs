//! Generic list strategy: every `li` element's flattened text run
//! through the shared line pattern table.

use scraper::{Html, Selector};

use super::{flat_text, patterns, ExtractionStrategy};
use crate::record::ChartRecord;

pub struct ListItemStrategy;

impl ExtractionStrategy for ListItemStrategy {
    fn name(&self) -> &str {
        "list-items"
    }

    fn extract(&self, doc: &Html) -> Vec<ChartRecord> {
        let li_sel = Selector::parse("li").unwrap();
        let mut records = Vec::new();

        for li in doc.select(&li_sel) {
            if let Some(record) = patterns::match_line(&flat_text(&li)) {
                records.push(record);
            }
        }

        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_text_parsed() {
        let doc = Html::parse_document(
            r#"<ul>
                <li>1. Flowers - Miley Cyrus</li>
                <li>2 Greedy by Tate McRae</li>
                <li>Browse all charts</li>
            </ul>"#,
        );
        let records = ListItemStrategy.extract(&doc);
        assert_eq!(
            records,
            vec![
                ChartRecord::new(1, "Flowers", "Miley Cyrus"),
                ChartRecord::new(2, "Greedy", "Tate McRae"),
            ]
        );
    }

    #[test]
    fn test_nested_markup_flattened() {
        let doc = Html::parse_document(
            r#"<ul><li><span>3.</span> <b>Song</b> - <i>Artist</i></li></ul>"#,
        );
        let records = ListItemStrategy.extract(&doc);
        assert_eq!(records, vec![ChartRecord::new(3, "Song", "Artist")]);
    }
}
