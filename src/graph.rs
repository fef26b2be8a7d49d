//! Tag co-occurrence graph construction
//!
//! This module provides functionality for:
//! - Building a weighted undirected graph from tagged post records
//! - Node occurrence counts and edge co-occurrence weights
//! - Global top-node / top-edge rankings
//! - Structural statistics for reports and diagnostics
//!
//! The graph is rebuilt from scratch for every analysis run; nothing is
//! cached or mutated across runs.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use thiserror::Error;

use crate::models::PostRecord;

/// Errors that can occur during graph construction
#[derive(Debug, Error)]
pub enum GraphError {
    /// The record collection had zero entries. An all-tagless collection is
    /// NOT this error; it builds an empty graph instead.
    #[error("record collection is empty")]
    EmptyInput,
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Normalize an unordered tag pair to its canonical (lexicographic) order
#[must_use]
pub fn ordered_pair(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// Structural statistics of a built graph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphStats {
    /// Distinct tags
    pub node_count: usize,

    /// Distinct co-occurring pairs
    pub edge_count: usize,

    /// Sum of all edge weights
    pub total_weight: u64,

    /// Average node degree (2E / N)
    pub avg_degree: f64,

    /// Graph density (2E / N(N-1))
    pub density: f64,

    /// Connected components (isolated nodes count as singletons)
    pub component_count: usize,
}

/// Weighted undirected tag co-occurrence graph.
///
/// Nodes are distinct tag strings with an `occurrence_count` (records
/// containing the tag). Edges are unordered pairs of distinct tags with a
/// `weight` (records containing both). Self-loops cannot occur because
/// per-record tags are deduplicated before pairing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagGraph {
    /// tag -> number of records containing it
    nodes: HashMap<String, u64>,

    /// canonical pair -> number of records containing both tags
    edges: HashMap<(String, String), u64>,
}

impl TagGraph {
    /// Build the graph over a record collection.
    ///
    /// # Errors
    /// Returns [`GraphError::EmptyInput`] only for a zero-length collection.
    /// Records with zero or one tag contribute occurrence counts but no
    /// edges; a collection of only such records yields a valid (possibly
    /// empty) graph.
    pub fn build(records: &[PostRecord]) -> GraphResult<Self> {
        if records.is_empty() {
            return Err(GraphError::EmptyInput);
        }
        Ok(Self::collect(records))
    }

    /// Accumulate a graph without the empty-input check.
    ///
    /// Used for windowed sub-graphs where an empty window legitimately
    /// produces an empty graph.
    pub(crate) fn collect<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a PostRecord>,
    {
        let mut graph = Self::default();

        for record in records {
            // Defensive trim + exact dedup; case normalization already
            // happened at the record boundary.
            let mut tags: Vec<&str> = record
                .tags
                .iter()
                .map(|tag| tag.trim())
                .filter(|tag| !tag.is_empty())
                .collect();
            tags.sort_unstable();
            tags.dedup();

            if tags.is_empty() {
                continue;
            }

            for tag in &tags {
                *graph.nodes.entry((*tag).to_string()).or_insert(0) += 1;
            }

            // tags is sorted, so (i, j) with i < j is already canonical
            for i in 0..tags.len() {
                for j in (i + 1)..tags.len() {
                    let key = (tags[i].to_string(), tags[j].to_string());
                    *graph.edges.entry(key).or_insert(0) += 1;
                }
            }
        }

        graph
    }

    /// Number of distinct tags
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct co-occurring pairs
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True when the graph has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Occurrence count for a tag, if present
    #[must_use]
    pub fn occurrence(&self, tag: &str) -> Option<u64> {
        self.nodes.get(tag).copied()
    }

    /// Co-occurrence weight for an unordered pair, if the edge exists
    #[must_use]
    pub fn weight(&self, a: &str, b: &str) -> Option<u64> {
        self.edges.get(&ordered_pair(a, b)).copied()
    }

    /// Iterate nodes as `(tag, occurrence_count)`
    pub fn nodes(&self) -> impl Iterator<Item = (&str, u64)> {
        self.nodes.iter().map(|(tag, count)| (tag.as_str(), *count))
    }

    /// Iterate edges as `(tag_a, tag_b, weight)` with `tag_a < tag_b`
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, u64)> {
        self.edges
            .iter()
            .map(|((a, b), weight)| (a.as_str(), b.as_str(), *weight))
    }

    /// Sum of all edge weights
    #[must_use]
    pub fn total_weight(&self) -> u64 {
        self.edges.values().sum()
    }

    /// Top tags by occurrence count, ties broken by tag order
    #[must_use]
    pub fn top_nodes(&self, n: usize) -> Vec<(String, u64)> {
        let mut ranked: Vec<_> = self
            .nodes
            .iter()
            .map(|(tag, count)| (tag.clone(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(n);
        ranked
    }

    /// Top edges by weight, ties broken by pair order
    #[must_use]
    pub fn top_edges(&self, n: usize) -> Vec<(String, String, u64)> {
        let mut ranked: Vec<_> = self
            .edges
            .iter()
            .map(|((a, b), weight)| (a.clone(), b.clone(), *weight))
            .collect();
        ranked.sort_by(|a, b| {
            b.2.cmp(&a.2)
                .then_with(|| a.0.cmp(&b.0))
                .then_with(|| a.1.cmp(&b.1))
        });
        ranked.truncate(n);
        ranked
    }

    /// Compute structural statistics for this graph
    #[must_use]
    pub fn stats(&self) -> GraphStats {
        let n = self.nodes.len();
        let e = self.edges.len();

        let avg_degree = if n == 0 { 0.0 } else { 2.0 * e as f64 / n as f64 };
        let density = if n < 2 {
            0.0
        } else {
            2.0 * e as f64 / (n as f64 * (n as f64 - 1.0))
        };

        GraphStats {
            node_count: n,
            edge_count: e,
            total_weight: self.total_weight(),
            avg_degree,
            density,
            component_count: self.component_count(),
        }
    }

    /// Count connected components with a breadth-first sweep
    #[must_use]
    pub fn component_count(&self) -> usize {
        let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
        for ((a, b), _) in &self.edges {
            adjacency.entry(a.as_str()).or_default().push(b.as_str());
            adjacency.entry(b.as_str()).or_default().push(a.as_str());
        }

        let mut visited: HashSet<&str> = HashSet::with_capacity(self.nodes.len());
        let mut components = 0;

        for tag in self.nodes.keys() {
            if visited.contains(tag.as_str()) {
                continue;
            }
            components += 1;

            let mut queue = VecDeque::from([tag.as_str()]);
            visited.insert(tag.as_str());
            while let Some(current) = queue.pop_front() {
                if let Some(neighbors) = adjacency.get(current) {
                    for &next in neighbors {
                        if visited.insert(next) {
                            queue.push_back(next);
                        }
                    }
                }
            }
        }

        components
    }
}
