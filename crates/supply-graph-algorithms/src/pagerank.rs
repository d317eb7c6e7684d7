//! PageRank algorithm implementation
//!
//! Power iteration over the directed graph. Dangling nodes (no outgoing
//! edges) spread their mass uniformly, so the scores form a probability
//! distribution.

use super::common::{AlgoError, AlgoResult, GraphView, NodeId};
use rayon::prelude::*;
use std::collections::HashMap;

/// PageRank configuration
#[derive(Debug, Clone)]
pub struct PageRankConfig {
    /// Damping factor (usually 0.85)
    pub damping_factor: f64,
    /// Maximum number of iterations before giving up
    pub iterations: usize,
    /// Per-node tolerance; the run converges when the L1 change drops below
    /// `node_count * tolerance`
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            iterations: 100,
            tolerance: 1.0e-6,
        }
    }
}

/// Calculate PageRank for the graph view
pub fn page_rank(view: &GraphView, config: &PageRankConfig) -> AlgoResult<HashMap<NodeId, f64>> {
    let n = view.node_count;
    if n == 0 {
        return Err(AlgoError::EmptyGraph);
    }

    let uniform = 1.0 / n as f64;
    let d = config.damping_factor;
    let mut scores = vec![uniform; n];

    for _ in 0..config.iterations {
        let dangling: f64 = (0..n)
            .filter(|&i| view.out_degree(i) == 0)
            .map(|i| scores[i])
            .sum();
        let base = (1.0 - d) * uniform + d * dangling * uniform;

        let next: Vec<f64> = (0..n)
            .into_par_iter()
            .map(|i| {
                let sum_incoming: f64 = view
                    .predecessors(i)
                    .iter()
                    .map(|&source| scores[source] / view.out_degree(source) as f64)
                    .sum();
                base + d * sum_incoming
            })
            .collect();

        let total_diff: f64 = next
            .iter()
            .zip(&scores)
            .map(|(a, b)| (a - b).abs())
            .sum();
        scores = next;

        if total_diff < n as f64 * config.tolerance {
            return Ok(scores
                .into_iter()
                .enumerate()
                .map(|(idx, score)| (view.index_to_node[idx], score))
                .collect());
        }
    }

    Err(AlgoError::NotConverged {
        algorithm: "PageRank",
        iterations: config.iterations,
    })
}
