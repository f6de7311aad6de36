//! Chart record data model and the normalizer that every extracted
//! candidate list passes through before it is returned to a caller.

use serde::Serialize;
use std::collections::HashSet;

/// Highest rank any source chart can legitimately carry.  Numeric matches
/// above this are accidental (years, durations, stream counts) and are
/// rejected at extraction time as well as here.
pub const MAX_CHART_POSITION: u32 = 200;

/// How many entries a single snapshot (and the yearly aggregate) displays.
pub const CHART_DISPLAY_SIZE: usize = 50;

/// One entry of one chart snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartRecord {
    pub order: u32,
    pub title: String,
    pub artist: String,
}

impl ChartRecord {
    pub fn new(order: u32, title: impl Into<String>, artist: impl Into<String>) -> Self {
        ChartRecord {
            order,
            title: title.into(),
            artist: artist.into(),
        }
    }

    /// A record is valid when its rank is positive, within the chart
    /// window, and both strings survive trimming.
    pub fn is_valid(&self) -> bool {
        self.order >= 1
            && self.order <= MAX_CHART_POSITION
            && !self.title.trim().is_empty()
            && !self.artist.trim().is_empty()
    }
}

/// One entry of a yearly aggregate ranking.
///
/// The two scoring policies expose different figures, so the optional
/// fields are omitted from JSON when a policy does not produce them:
/// points scoring fills `totalPoints`/`highestPosition`, best-rank
/// scoring fills `bestUS`.
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedSongEntry {
    pub order: u32,
    pub title: String,
    pub artist: String,

    #[serde(rename = "totalPoints", skip_serializing_if = "Option::is_none")]
    pub total_points: Option<i64>,

    #[serde(rename = "highestPosition", skip_serializing_if = "Option::is_none")]
    pub highest_position: Option<u32>,

    pub appearances: u32,

    #[serde(rename = "bestUS", skip_serializing_if = "Option::is_none")]
    pub best_us: Option<u32>,
}

/// Validate, dedup and order one snapshot's candidate records.
///
/// Invalid candidates are dropped, exact `(order, title, artist)`
/// duplicates keep their first occurrence (preserving the priority of
/// the strategy that produced them), and the result is sorted by rank
/// and truncated to the display size.
pub fn normalize(candidates: Vec<ChartRecord>) -> Vec<ChartRecord> {
    let mut seen: HashSet<(u32, String, String)> = HashSet::new();
    let mut records: Vec<ChartRecord> = Vec::new();

    for mut candidate in candidates {
        candidate.title = candidate.title.trim().to_string();
        candidate.artist = candidate.artist.trim().to_string();
        if !candidate.is_valid() {
            continue;
        }
        let key = (
            candidate.order,
            candidate.title.clone(),
            candidate.artist.clone(),
        );
        if seen.insert(key) {
            records.push(candidate);
        }
    }

    // Stable sort keeps strategy priority for equal ranks.
    records.sort_by_key(|r| r.order);
    records.truncate(CHART_DISPLAY_SIZE);
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_record_passes() {
        let records = normalize(vec![ChartRecord::new(1, "Song", "Artist")]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], ChartRecord::new(1, "Song", "Artist"));
    }

    #[test]
    fn test_invalid_candidates_dropped() {
        let records = normalize(vec![
            ChartRecord::new(0, "Zero Rank", "Artist"),
            ChartRecord::new(201, "Beyond Window", "Artist"),
            ChartRecord::new(2, "   ", "Artist"),
            ChartRecord::new(3, "Song", "  "),
        ]);
        assert!(records.is_empty());
    }

    #[test]
    fn test_rank_at_window_edge_kept() {
        let records = normalize(vec![ChartRecord::new(MAX_CHART_POSITION, "Edge", "Artist")]);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_whitespace_trimmed() {
        let records = normalize(vec![ChartRecord::new(1, "  Song  ", " Artist ")]);
        assert_eq!(records[0].title, "Song");
        assert_eq!(records[0].artist, "Artist");
    }

    #[test]
    fn test_exact_duplicate_kept_once() {
        let records = normalize(vec![
            ChartRecord::new(1, "X", "Y"),
            ChartRecord::new(1, "X", "Y"),
        ]);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_same_rank_different_song_both_kept() {
        let records = normalize(vec![
            ChartRecord::new(1, "X", "Y"),
            ChartRecord::new(1, "Other", "Y"),
        ]);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_sorted_and_truncated() {
        let mut candidates: Vec<ChartRecord> = (1..=60)
            .rev()
            .map(|n| ChartRecord::new(n, format!("Song {}", n), "Artist"))
            .collect();
        candidates.push(ChartRecord::new(1, "Song 1", "Artist")); // duplicate
        let records = normalize(candidates);
        assert_eq!(records.len(), CHART_DISPLAY_SIZE);
        assert_eq!(records[0].order, 1);
        assert_eq!(records[49].order, 50);
    }

    #[test]
    fn test_optional_fields_omitted_from_json() {
        let entry = AggregatedSongEntry {
            order: 1,
            title: "Song".into(),
            artist: "Artist".into(),
            total_points: None,
            highest_position: None,
            appearances: 3,
            best_us: Some(2),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"bestUS\":2"));
        assert!(!json.contains("totalPoints"));
        assert!(!json.contains("highestPosition"));
    }
}
