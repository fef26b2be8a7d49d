//! Analysis report assembly
//!
//! Combines the co-occurrence graph, importance ranking, trend analysis and
//! ingest counters into one immutable report value. The report is the only
//! artifact an analysis run produces; it is assembled once and never
//! mutated afterwards.
//!
//! Serialization is deterministic: node and edge lists are sorted, and no
//! hash-map ordering leaks into the output. Only `run_id` and
//! `generated_at` differ between two runs over the same input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::analytics::rank::{ranked_tags, RankedTag, Ranking};
use crate::analytics::trends::{TrendAnalysis, TrendEntry, WindowDiagnostics};
use crate::graph::{GraphStats, TagGraph};
use crate::models::IngestStats;

// ============================================================================
// Graph Export
// ============================================================================

/// A node in the exported graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    /// Tag string
    pub tag: String,

    /// Records containing the tag
    pub occurrence_count: u64,

    /// Importance score, when a ranking was attached
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// An edge in the exported graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEdge {
    /// First tag of the pair (lexicographically smaller)
    pub tag_a: String,

    /// Second tag of the pair
    pub tag_b: String,

    /// Records containing both tags
    pub weight: u64,
}

/// Sorted, serialization-ready view of a [`TagGraph`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphExport {
    /// Nodes sorted by tag
    pub nodes: Vec<GraphNode>,

    /// Edges sorted by pair
    pub edges: Vec<GraphEdge>,

    /// Structural statistics
    pub stats: GraphStats,
}

impl GraphExport {
    /// Export a graph, optionally attaching importance scores to nodes
    #[must_use]
    pub fn from_graph(graph: &TagGraph, scores: Option<&HashMap<String, f64>>) -> Self {
        let mut nodes: Vec<GraphNode> = graph
            .nodes()
            .map(|(tag, occurrence_count)| GraphNode {
                tag: tag.to_string(),
                occurrence_count,
                score: scores.and_then(|s| s.get(tag).copied()),
            })
            .collect();
        nodes.sort_by(|a, b| a.tag.cmp(&b.tag));

        let mut edges: Vec<GraphEdge> = graph
            .edges()
            .map(|(a, b, weight)| GraphEdge {
                tag_a: a.to_string(),
                tag_b: b.to_string(),
                weight,
            })
            .collect();
        edges.sort_by(|a, b| a.tag_a.cmp(&b.tag_a).then_with(|| a.tag_b.cmp(&b.tag_b)));

        Self {
            nodes,
            edges,
            stats: graph.stats(),
        }
    }
}

// ============================================================================
// Report
// ============================================================================

/// Immutable result of one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Unique identifier of this run
    pub run_id: Uuid,

    /// When the report was assembled
    pub generated_at: DateTime<Utc>,

    /// Top tags by importance, best first
    pub ranked_tags: Vec<RankedTag>,

    /// Whether the ranking converged before its iteration cap
    pub converged: bool,

    /// Power iterations performed
    pub iterations: usize,

    /// Trending pairs, best first
    pub trends: Vec<TrendEntry>,

    /// Window construction diagnostics
    pub diagnostics: WindowDiagnostics,

    /// Full graph export with scores attached
    pub graph: GraphExport,

    /// Input loading counters
    pub ingest: IngestStats,
}

impl Report {
    /// Assemble a report from the analysis stages.
    ///
    /// Consumes the trend analysis; graph and ranking are only read.
    #[must_use]
    pub fn assemble(
        graph: &TagGraph,
        ranking: &Ranking,
        trends: TrendAnalysis,
        ingest: IngestStats,
        top_k_ranking: usize,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            ranked_tags: ranked_tags(ranking, top_k_ranking),
            converged: ranking.converged,
            iterations: ranking.iterations,
            trends: trends.entries,
            diagnostics: trends.diagnostics,
            graph: GraphExport::from_graph(graph, Some(&ranking.scores)),
            ingest,
        }
    }

    /// One-line summary for command output
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Records: {} | Tags: {} | Pairs: {} | Ranking: {} in {} iterations | Trends: {} ({} entries)",
            self.ingest.record_count,
            self.graph.stats.node_count,
            self.graph.stats.edge_count,
            if self.converged { "converged" } else { "capped" },
            self.iterations,
            self.diagnostics.mode,
            self.trends.len()
        )
    }

    /// Multi-line report for command output
    #[must_use]
    pub fn detailed_report(&self) -> String {
        let mut report = String::new();

        report.push_str("=== Tag Analysis Report ===\n\n");

        report.push_str(&format!("Run: {}\n", self.run_id));
        report.push_str(&format!("Records: {}\n", self.ingest.record_count));
        report.push_str(&format!(
            "  - Skipped Lines: {}\n",
            self.ingest.skipped_lines
        ));
        report.push_str(&format!(
            "  - Malformed Timestamps: {}\n",
            self.ingest.malformed_timestamps
        ));
        report.push_str(&format!(
            "  - Untimed Records: {}\n\n",
            self.ingest.untimed_records
        ));

        report.push_str(&format!("Graph: {} tags, {} pairs\n", self.graph.stats.node_count, self.graph.stats.edge_count));
        report.push_str(&format!(
            "  - Total Weight: {}\n",
            self.graph.stats.total_weight
        ));
        report.push_str(&format!(
            "  - Components: {}\n\n",
            self.graph.stats.component_count
        ));

        report.push_str("Top Tags:\n");
        for (i, entry) in self.ranked_tags.iter().enumerate() {
            report.push_str(&format!(
                "  {:>2}. {} ({:.4})\n",
                i + 1,
                entry.tag,
                entry.score
            ));
        }
        report.push('\n');

        report.push_str(&format!("Trends ({} mode):\n", self.diagnostics.mode));
        for (i, entry) in self.trends.iter().enumerate() {
            report.push_str(&format!(
                "  {:>2}. {} + {} (recent {}, historical {}, growth {:.2})\n",
                i + 1,
                entry.tag_a,
                entry.tag_b,
                entry.recent_weight,
                entry.historical_weight,
                entry.growth_score
            ));
        }

        report
    }

    /// Serialize the report as pretty-printed JSON
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
