//! Cross-snapshot aggregation: folds a year's worth of chart snapshots
//! into one top-50 leaderboard.
//!
//! Snapshots are fetched sequentially (the fold map is plain local
//! state and the origin servers are small), sampled down to roughly one
//! per week, and per-snapshot failures are skipped so the batch always
//! completes with whatever data was reachable.

use std::collections::HashMap;

use crate::dates::ChartDate;
use crate::error::ChartError;
use crate::rate_limiter::RateLimiter;
use crate::record::{AggregatedSongEntry, ChartRecord, CHART_DISPLAY_SIZE};

/// How many snapshots a yearly aggregation aims to process.
pub const SAMPLE_TARGET: usize = 52;

/// Ranks deeper than this earn no points under points scoring.
const POINTS_WINDOW: i64 = 50;

/// How a source turns folded records into a final ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scoring {
    /// Inverse-rank points: rank 1 earns 50, rank 50 earns 1, deeper
    /// ranks earn nothing.  Orders by total points.
    Points,
    /// No additive score; orders by the best rank ever observed.
    BestRank,
}

#[derive(Debug)]
struct FoldEntry {
    title: String,
    artist: String,
    appearances: u32,
    best_rank: u32,
    points: i64,
}

/// Evenly sample the available dates down to roughly [`SAMPLE_TARGET`]
/// snapshots.  The chronologically last date is always included.
pub fn sample_dates(dates: &[ChartDate]) -> Vec<ChartDate> {
    if dates.is_empty() {
        return Vec::new();
    }
    let stride = (dates.len() / SAMPLE_TARGET).max(1);
    let mut sampled: Vec<ChartDate> = dates.iter().step_by(stride).cloned().collect();
    let last = dates.last().unwrap();
    if sampled.last() != Some(last) {
        sampled.push(last.clone());
    }
    sampled
}

/// Fold one snapshot's records into the running map.
fn fold_records(map: &mut HashMap<(String, String), FoldEntry>, records: &[ChartRecord]) {
    for record in records {
        let key = (record.title.clone(), record.artist.clone());
        let entry = map.entry(key).or_insert_with(|| FoldEntry {
            title: record.title.clone(),
            artist: record.artist.clone(),
            appearances: 0,
            best_rank: record.order,
            points: 0,
        });
        entry.appearances += 1;
        entry.best_rank = entry.best_rank.min(record.order);
        // Clamped at zero: ranks past the window contribute nothing
        // rather than going negative.
        entry.points += (POINTS_WINDOW + 1 - record.order as i64).max(0);
    }
}

/// Sort, truncate and re-rank the folded map into the final list.
///
/// The re-assigned `order` is a fresh contiguous 1..=N sequence; gaps in
/// the source ranks do not survive.  Tie-breaks end on title and artist
/// so the ordering is deterministic regardless of map iteration order.
fn finalize(map: HashMap<(String, String), FoldEntry>, scoring: Scoring) -> Vec<AggregatedSongEntry> {
    let mut entries: Vec<FoldEntry> = map.into_values().collect();

    match scoring {
        Scoring::Points => entries.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then(a.best_rank.cmp(&b.best_rank))
                .then(b.appearances.cmp(&a.appearances))
                .then(a.title.cmp(&b.title))
                .then(a.artist.cmp(&b.artist))
        }),
        Scoring::BestRank => entries.sort_by(|a, b| {
            a.best_rank
                .cmp(&b.best_rank)
                .then(b.appearances.cmp(&a.appearances))
                .then(a.title.cmp(&b.title))
                .then(a.artist.cmp(&b.artist))
        }),
    }

    entries.truncate(CHART_DISPLAY_SIZE);
    entries
        .into_iter()
        .enumerate()
        .map(|(index, e)| match scoring {
            Scoring::Points => AggregatedSongEntry {
                order: index as u32 + 1,
                title: e.title,
                artist: e.artist,
                total_points: Some(e.points),
                highest_position: Some(e.best_rank),
                appearances: e.appearances,
                best_us: None,
            },
            Scoring::BestRank => AggregatedSongEntry {
                order: index as u32 + 1,
                title: e.title,
                artist: e.artist,
                total_points: None,
                highest_position: None,
                appearances: e.appearances,
                best_us: Some(e.best_rank),
            },
        })
        .collect()
}

/// Run a full aggregation over the given snapshot dates.
///
/// `fetch_snapshot` maps one date token to that snapshot's normalized
/// records.  A failing snapshot is logged and skipped; only an empty
/// date list is terminal.
pub fn aggregate<F>(
    label: &str,
    dates: &[ChartDate],
    scoring: Scoring,
    mut fetch_snapshot: F,
    mut limiter: Option<RateLimiter>,
) -> Result<Vec<AggregatedSongEntry>, ChartError>
where
    F: FnMut(&str) -> Result<Vec<ChartRecord>, ChartError>,
{
    if dates.is_empty() {
        return Err(ChartError::NoData(format!(
            "no snapshots available for [{}]",
            label
        )));
    }

    let sampled = sample_dates(dates);
    println!(
        "[{}] aggregating {} of {} snapshots",
        label,
        sampled.len(),
        dates.len()
    );

    let mut map: HashMap<(String, String), FoldEntry> = HashMap::new();
    for (index, date) in sampled.iter().enumerate() {
        if let Some(l) = limiter.as_mut() {
            l.wait_if_needed();
        }
        println!("[{}] snapshot {}/{}: {}", label, index + 1, sampled.len(), date.date);
        match fetch_snapshot(&date.date) {
            Ok(records) => {
                if let Some(l) = limiter.as_mut() {
                    l.report_success();
                }
                fold_records(&mut map, &records);
            }
            Err(err) => {
                eprintln!("[{}] skipping snapshot {}: {}", label, date.date, err);
                if let Some(l) = limiter.as_mut() {
                    l.report_failure();
                }
            }
        }
    }

    Ok(finalize(map, scoring))
}
