//! Structured-data strategy: JSON-LD playlist blocks.
//!
//! Chart pages often embed a schema.org `MusicPlaylist` (or an `@graph`
//! of `MusicRecording` items) in `<script type="application/ld+json">`.
//! Malformed JSON is swallowed per block, never fatal.

use scraper::{Html, Selector};
use serde_json::Value;

use super::ExtractionStrategy;
use crate::record::{ChartRecord, MAX_CHART_POSITION};

pub struct JsonLdStrategy;

impl ExtractionStrategy for JsonLdStrategy {
    fn name(&self) -> &str {
        "json-ld"
    }

    fn extract(&self, doc: &Html) -> Vec<ChartRecord> {
        let script_sel = Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();
        let mut records = Vec::new();

        for script in doc.select(&script_sel) {
            let raw = script.text().collect::<String>();
            let data: Value = match serde_json::from_str(&raw) {
                Ok(v) => v,
                Err(_) => continue,
            };

            if let Some(graph) = data.get("@graph").and_then(Value::as_array) {
                for item in graph {
                    if item.get("@type").and_then(Value::as_str) == Some("MusicRecording") {
                        push_track(&mut records, item, None);
                    }
                }
            } else if data.get("@type").and_then(Value::as_str) == Some("MusicPlaylist") {
                if let Some(tracks) = data.get("track").and_then(Value::as_array) {
                    for (index, track) in tracks.iter().enumerate() {
                        push_track(&mut records, track, Some(index as u32 + 1));
                    }
                }
            }
        }

        records
    }
}

/// Map one track object to a record.  `fallback_position` covers tracks
/// that omit an explicit `position` (playlist order stands in).
fn push_track(records: &mut Vec<ChartRecord>, track: &Value, fallback_position: Option<u32>) {
    let title = match track.get("name").and_then(Value::as_str) {
        Some(name) => name.trim(),
        None => return,
    };
    let artist = match track.get("byArtist") {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Object(obj)) => match obj.get("name").and_then(Value::as_str) {
            Some(name) => name.trim().to_string(),
            None => return,
        },
        _ => return,
    };
    let order = track
        .get("position")
        .and_then(Value::as_u64)
        .map(|p| p as u32)
        .or(fallback_position)
        .unwrap_or(records.len() as u32 + 1);

    if order >= 1 && order <= MAX_CHART_POSITION && !title.is_empty() && !artist.is_empty() {
        // Same song from an earlier block wins.
        let exists = records
            .iter()
            .any(|r| r.title == title && r.artist == artist);
        if !exists {
            records.push(ChartRecord::new(order, title, artist));
        }
    }
}
