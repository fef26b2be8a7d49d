//! Tag importance ranking via weighted PageRank
//!
//! Runs damped power iteration over the co-occurrence graph. Edge weights
//! bias the walk: a neighbor reached through a heavy edge receives a
//! proportionally larger share of a node's rank mass.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::graph::TagGraph;

/// Parameters for the power iteration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RankParams {
    /// Damping factor (probability of following an edge vs. teleporting)
    pub damping: f64,

    /// L1 convergence threshold between successive iterations
    pub tolerance: f64,

    /// Iteration cap; hitting it is not an error
    pub max_iterations: usize,
}

impl Default for RankParams {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-6,
            max_iterations: 100,
        }
    }
}

/// Outcome of a ranking run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ranking {
    /// tag -> importance score; scores sum to 1.0 over a non-empty graph
    pub scores: HashMap<String, f64>,

    /// Whether the L1 delta dropped below tolerance before the cap
    pub converged: bool,

    /// Iterations actually performed
    pub iterations: usize,
}

/// A single entry in the top-K importance list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedTag {
    pub tag: String,
    pub score: f64,
}

/// Compute weighted PageRank scores for every node in the graph.
///
/// Isolated nodes (no incident edges) donate their rank mass back to the
/// whole graph uniformly each sweep, so the score vector keeps summing to
/// 1.0 without a renormalization pass.
///
/// # Arguments
/// * `graph` - The co-occurrence graph to rank
/// * `params` - Damping, tolerance and iteration cap
///
/// # Returns
/// A [`Ranking`] with per-tag scores. An empty graph yields an empty score
/// map, zero iterations and `converged = true`. Hitting the iteration cap
/// returns the last iterate with `converged = false`.
#[must_use]
pub fn compute_pagerank(graph: &TagGraph, params: &RankParams) -> Ranking {
    let mut names: Vec<String> = graph.nodes().map(|(tag, _)| tag.to_string()).collect();
    names.sort_unstable();

    let n = names.len();
    if n == 0 {
        return Ranking {
            scores: HashMap::new(),
            converged: true,
            iterations: 0,
        };
    }

    let index: HashMap<&str, usize> = names
        .iter()
        .enumerate()
        .map(|(i, tag)| (tag.as_str(), i))
        .collect();

    // Adjacency with edge weights, plus each node's total incident weight
    let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
    let mut weight_sum: Vec<f64> = vec![0.0; n];
    for (a, b, weight) in graph.edges() {
        let (i, j) = (index[a], index[b]);
        let w = weight as f64;
        adjacency[i].push((j, w));
        adjacency[j].push((i, w));
        weight_sum[i] += w;
        weight_sum[j] += w;
    }

    // Fix the accumulation order so float sums do not depend on map
    // iteration order
    for neighbors in &mut adjacency {
        neighbors.sort_unstable_by_key(|&(j, _)| j);
    }

    let n_f = n as f64;
    let damping = params.damping;
    let mut ranks = vec![1.0 / n_f; n];
    let mut iterations = 0;
    let mut converged = false;

    while iterations < params.max_iterations {
        // Mass sitting on isolated nodes is spread uniformly
        let dangling: f64 = (0..n)
            .filter(|&i| weight_sum[i] == 0.0)
            .map(|i| ranks[i])
            .sum();
        let base = (1.0 - damping) / n_f + damping * dangling / n_f;

        let mut next = vec![base; n];
        for i in 0..n {
            if weight_sum[i] == 0.0 {
                continue;
            }
            let share = damping * ranks[i] / weight_sum[i];
            for &(j, w) in &adjacency[i] {
                next[j] += share * w;
            }
        }

        let delta: f64 = ranks
            .iter()
            .zip(next.iter())
            .map(|(old, new)| (new - old).abs())
            .sum();

        ranks = next;
        iterations += 1;

        if delta < params.tolerance {
            converged = true;
            break;
        }
    }

    let scores = names.into_iter().zip(ranks).collect();
    Ranking {
        scores,
        converged,
        iterations,
    }
}

/// Select the top-K tags by score, descending.
///
/// Equal scores are broken by tag order so output is stable across runs.
/// Fewer than `top_k` tags yields a shorter list, never padding.
#[must_use]
pub fn ranked_tags(ranking: &Ranking, top_k: usize) -> Vec<RankedTag> {
    let mut entries: Vec<RankedTag> = ranking
        .scores
        .iter()
        .map(|(tag, score)| RankedTag {
            tag: tag.clone(),
            score: *score,
        })
        .collect();

    entries.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.tag.cmp(&b.tag))
    });
    entries.truncate(top_k);
    entries
}
