//! Rising-edge trend detection over timestamped tag records
//!
//! This module provides functionality for:
//! - Partitioning records into recent and historical windows
//! - Scoring co-occurrence growth between the two windows
//! - Falling back to globally dominant pairs when windows are too sparse
//! - Reporting window diagnostics alongside every result
//!
//! All windows are anchored to the newest timestamp in the data itself,
//! never to the wall clock, so re-running over an old archive reproduces
//! the same windows.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

use crate::graph::TagGraph;
use crate::models::PostRecord;

/// Errors that can occur during trend detection
#[derive(Debug, Error)]
pub enum TrendError {
    /// The record collection had zero entries. Collections without usable
    /// timestamps are NOT this error; they take the fallback path.
    #[error("record collection is empty")]
    EmptyInput,
}

/// Result type for trend detection operations
pub type TrendResult<T> = Result<T, TrendError>;

/// Parameters for window construction and candidate filtering
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrendParams {
    /// Length of the recent window in days, counted back from the anchor
    pub recent_days: i64,

    /// Length of the historical window in days, preceding the recent window
    pub historical_days: i64,

    /// Maximum number of trend entries to return
    pub top_k: usize,

    /// Minimum records required in each window for rising-edge mode
    pub min_window_records: usize,

    /// Minimum recent co-occurrence weight for a rising candidate
    pub min_recent_weight: u64,
}

impl Default for TrendParams {
    fn default() -> Self {
        Self {
            recent_days: 7,
            historical_days: 30,
            top_k: 10,
            min_window_records: 5,
            min_recent_weight: 2,
        }
    }
}

/// How the trend entries were produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendMode {
    /// Window comparison found genuinely accelerating pairs
    Rising,

    /// Windows were absent or too sparse; entries are the globally
    /// heaviest pairs instead
    Fallback,
}

impl std::fmt::Display for TrendMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rising => write!(f, "rising"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// A single trending tag pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendEntry {
    /// First tag of the pair (lexicographically smaller)
    pub tag_a: String,

    /// Second tag of the pair
    pub tag_b: String,

    /// Co-occurrence weight inside the recent window. In fallback mode
    /// this is the pair's global weight.
    pub recent_weight: u64,

    /// Co-occurrence weight inside the historical window (0 in fallback mode)
    pub historical_weight: u64,

    /// Smoothed growth: (recent - historical) / (historical + 1).
    /// Always 0.0 in fallback mode.
    pub growth_score: f64,
}

/// Window construction diagnostics, attached to every analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowDiagnostics {
    /// Newest timestamp in the data; `None` when no record carried one
    pub anchor: Option<DateTime<Utc>>,

    /// Records in the analyzed collection
    pub total_count: usize,

    /// Records carrying a usable timestamp
    pub timestamped_count: usize,

    /// Records inside the recent window
    pub recent_count: usize,

    /// Records inside the historical window
    pub historical_count: usize,

    /// Distinct pairs in the recent window's sub-graph
    pub recent_edge_count: usize,

    /// Distinct pairs in the historical window's sub-graph
    pub historical_edge_count: usize,

    /// Mode the entries were produced in
    pub mode: TrendMode,
}

/// Outcome of a trend detection run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendAnalysis {
    /// Trending pairs, best first
    pub entries: Vec<TrendEntry>,

    /// How the windows were built and which path produced the entries
    pub diagnostics: WindowDiagnostics,
}

impl TrendAnalysis {
    /// True when the entries came from genuine window comparison
    #[must_use]
    pub fn is_rising(&self) -> bool {
        self.diagnostics.mode == TrendMode::Rising
    }
}

/// Detect rising tag pairs in a record collection.
///
/// The anchor is the maximum timestamp present in the data. The recent
/// window covers `recent_days` back from the anchor; the historical window
/// covers the `historical_days` before that. Untimed records belong to
/// neither window.
///
/// Rising mode requires both windows to hold at least
/// [`TrendParams::min_window_records`] records and at least one pair with
/// positive growth and recent weight of at least
/// [`TrendParams::min_recent_weight`]. Otherwise the result falls back to
/// the globally heaviest pairs, so a non-empty collection with at least one
/// multi-tag record always yields entries.
///
/// # Errors
/// Returns [`TrendError::EmptyInput`] only for a zero-length collection.
pub fn detect(records: &[PostRecord], params: &TrendParams) -> TrendResult<TrendAnalysis> {
    if records.is_empty() {
        return Err(TrendError::EmptyInput);
    }

    let timestamped_count = records.iter().filter(|r| r.timestamp.is_some()).count();
    let anchor = records.iter().filter_map(|r| r.timestamp).max();

    let Some(anchor) = anchor else {
        // Nothing to window over; rank pairs globally
        return Ok(fallback_analysis(
            records,
            params,
            WindowDiagnostics {
                anchor: None,
                total_count: records.len(),
                timestamped_count: 0,
                recent_count: 0,
                historical_count: 0,
                recent_edge_count: 0,
                historical_edge_count: 0,
                mode: TrendMode::Fallback,
            },
        ));
    };

    let recent_cut = anchor - Duration::days(params.recent_days);
    let historical_cut = recent_cut - Duration::days(params.historical_days);

    let mut recent: Vec<&PostRecord> = Vec::new();
    let mut historical: Vec<&PostRecord> = Vec::new();
    for record in records {
        let Some(ts) = record.timestamp else { continue };
        if ts >= recent_cut {
            recent.push(record);
        } else if ts >= historical_cut {
            historical.push(record);
        }
    }

    let recent_graph = TagGraph::collect(recent.iter().copied());
    let historical_graph = TagGraph::collect(historical.iter().copied());

    let mut diagnostics = WindowDiagnostics {
        anchor: Some(anchor),
        total_count: records.len(),
        timestamped_count,
        recent_count: recent.len(),
        historical_count: historical.len(),
        recent_edge_count: recent_graph.edge_count(),
        historical_edge_count: historical_graph.edge_count(),
        mode: TrendMode::Fallback,
    };

    let windows_populated = recent.len() >= params.min_window_records
        && historical.len() >= params.min_window_records;

    if windows_populated {
        let mut candidates: Vec<TrendEntry> = recent_graph
            .edges()
            .filter_map(|(a, b, recent_weight)| {
                let historical_weight = historical_graph.weight(a, b).unwrap_or(0);
                let growth_score = (recent_weight as f64 - historical_weight as f64)
                    / (historical_weight as f64 + 1.0);

                (growth_score > 0.0 && recent_weight >= params.min_recent_weight).then(|| {
                    TrendEntry {
                        tag_a: a.to_string(),
                        tag_b: b.to_string(),
                        recent_weight,
                        historical_weight,
                        growth_score,
                    }
                })
            })
            .collect();

        if !candidates.is_empty() {
            candidates.sort_by(|a, b| {
                b.growth_score
                    .partial_cmp(&a.growth_score)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| b.recent_weight.cmp(&a.recent_weight))
                    .then_with(|| a.tag_a.cmp(&b.tag_a))
                    .then_with(|| a.tag_b.cmp(&b.tag_b))
            });
            candidates.truncate(params.top_k);

            diagnostics.mode = TrendMode::Rising;
            return Ok(TrendAnalysis {
                entries: candidates,
                diagnostics,
            });
        }
    }

    Ok(fallback_analysis(records, params, diagnostics))
}

/// Build the fallback result: the globally heaviest pairs, marked as such.
fn fallback_analysis(
    records: &[PostRecord],
    params: &TrendParams,
    diagnostics: WindowDiagnostics,
) -> TrendAnalysis {
    let global = TagGraph::collect(records);
    let entries = global
        .top_edges(params.top_k)
        .into_iter()
        .map(|(tag_a, tag_b, weight)| TrendEntry {
            tag_a,
            tag_b,
            recent_weight: weight,
            historical_weight: 0,
            growth_score: 0.0,
        })
        .collect();

    TrendAnalysis {
        entries,
        diagnostics,
    }
}
