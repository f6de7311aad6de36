//! Ordered pattern table for ranked chart lines in free text.
//!
//! Evaluated top to bottom with first-match-wins per line: once a
//! pattern matches, later patterns are not consulted for that line even
//! if the match fails validation.

use regex::Regex;
use std::sync::OnceLock;

use crate::record::{ChartRecord, MAX_CHART_POSITION};

/// Recognized line shapes, in priority order:
/// `"1 - Title - Artist"`, `"1. Title - Artist"`, `"1 Title - Artist"`,
/// `"1 Title by Artist"`, `"1. Title by Artist"` (en-dash variants
/// included, `by` case-insensitive).
///
/// The leading-dash shape goes first: its dash sits right after the
/// rank, so it steals nothing from the generic dash patterns, while
/// the generic pattern would swallow it and leave the dash glued to
/// the title.
fn pattern_table() -> &'static [Regex] {
    static TABLE: OnceLock<Vec<Regex>> = OnceLock::new();
    TABLE.get_or_init(|| {
        [
            r"^(\d+)\s*[-–]\s*(.+?)\s*[-–]\s*(.+)$",
            r"^(\d+)\.?\s*(.+?)\s*[-–]\s*(.+)$",
            r"^(\d+)\s+(.+?)\s+[-–]\s+(.+)$",
            r"(?i)^(\d+)\s+(.+?)\s+by\s+(.+)$",
            r"(?i)^(\d+)\.\s*(.+?)\s+by\s+(.+)$",
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
    })
}

/// Match one flattened line against the table.
pub fn match_line(line: &str) -> Option<ChartRecord> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    for pattern in pattern_table() {
        if let Some(caps) = pattern.captures(line) {
            // First matching pattern decides the line, valid or not.
            let order: u32 = caps[1].parse().ok()?;
            let title = caps[2].trim();
            let artist = caps[3].trim();
            if order >= 1 && order <= MAX_CHART_POSITION && !title.is_empty() && !artist.is_empty()
            {
                return Some(ChartRecord::new(order, title, artist));
            }
            return None;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_dash_line() {
        let r = match_line("1. Flowers - Miley Cyrus").unwrap();
        assert_eq!(r, ChartRecord::new(1, "Flowers", "Miley Cyrus"));
    }

    #[test]
    fn test_no_period_variant() {
        let r = match_line("12 Paint The Town Red - Doja Cat").unwrap();
        assert_eq!(r.order, 12);
        assert_eq!(r.artist, "Doja Cat");
    }

    #[test]
    fn test_leading_dash_variant() {
        // The dash after the rank belongs to the shape, not the title.
        let r = match_line("3 - Greedy - Tate McRae").unwrap();
        assert_eq!(r, ChartRecord::new(3, "Greedy", "Tate McRae"));
        let r = match_line("10 – Houdini – Dua Lipa").unwrap();
        assert_eq!(r, ChartRecord::new(10, "Houdini", "Dua Lipa"));
    }

    #[test]
    fn test_by_variant() {
        let r = match_line("7 Cruel Summer by Taylor Swift").unwrap();
        assert_eq!(r, ChartRecord::new(7, "Cruel Summer", "Taylor Swift"));
    }

    #[test]
    fn test_en_dash() {
        let r = match_line("2. Lovin On Me – Jack Harlow").unwrap();
        assert_eq!(r.title, "Lovin On Me");
        assert_eq!(r.artist, "Jack Harlow");
    }

    #[test]
    fn test_rank_window_cutoff() {
        assert!(match_line("200. Last One - Someone").is_some());
        assert!(match_line("201. Not A Chart Row - Someone").is_none());
        assert!(match_line("1987 Best Year - Ever").is_none());
    }

    #[test]
    fn test_first_match_wins_per_line() {
        // The dash pattern matches first and decides the line; the
        // later `by` pattern never gets a look.
        let r = match_line("1 Song by Artist - The Band").unwrap();
        assert_eq!(r.title, "Song by Artist");
        assert_eq!(r.artist, "The Band");
    }

    #[test]
    fn test_non_chart_lines_ignored() {
        assert!(match_line("About us").is_none());
        assert!(match_line("").is_none());
        assert!(match_line("Charts").is_none());
    }

    #[test]
    fn test_split_at_first_dash() {
        // Lazy title group: the split lands on the first dash, spaced
        // or not.  Hyphenated titles are a known casualty.
        let r = match_line("4. Anti-Hero - Taylor Swift").unwrap();
        assert_eq!(r.title, "Anti");
        assert_eq!(r.artist, "Hero - Taylor Swift");
    }
}
