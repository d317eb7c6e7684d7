//! Risk Scorer
//!
//! Synthetic supplier risk derived from centrality signals and a seeded
//! random source. The same seed and graph always produce the same output.

use super::stats::{top_degree_centrality, top_pagerank};
use crate::algo::GraphAlgorithms;
use crate::graph::{CoPurchaseGraph, NodeId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_RISK_SEED: u64 = 42;
/// Candidates considered for scoring, and thus the longest possible result
pub const MAX_CANDIDATES: usize = 50;
pub const MAX_SCORE: f64 = 0.95;

const DEGREE_THRESHOLD: usize = 10;
const DEGREE_SCALE: f64 = 20.0;
const DEGREE_FACTOR_CAP: f64 = 0.5;
const HISTORICAL_THRESHOLD: f64 = 0.7;

const HIGH_DEPENDENCY: &str = "High dependency on other suppliers";
const CRITICAL_FOR_PRODUCTS: &str = "Critical for many products";
const HISTORICAL_ISSUES: &str = "Historical performance issues";
const GENERAL_POSITION: &str = "General supply chain position";

const REASON_POOL: [&str; 7] = [
    "Geographic concentration risk",
    "Limited alternative sources",
    "Single sourcing for key components",
    "Long lead times",
    "Quality control challenges",
    "Contractual constraints",
    "Market volatility exposure",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskEntry {
    pub supplier: String,
    pub score: f64,
    pub reasons: Vec<String>,
}

/// Score the `num_suppliers` most central nodes (at most [`MAX_CANDIDATES`]).
pub fn score_risk(
    graph: &CoPurchaseGraph,
    algorithms: &dyn GraphAlgorithms,
    num_suppliers: usize,
    seed: u64,
) -> Vec<RiskEntry> {
    let mut rng = StdRng::seed_from_u64(seed);
    risk_candidates(graph, algorithms)
        .into_iter()
        .take(num_suppliers)
        .map(|node| assess(graph, node, &mut rng))
        .collect()
}

/// Top nodes by PageRank, or by degree centrality when PageRank fails.
fn risk_candidates(graph: &CoPurchaseGraph, algorithms: &dyn GraphAlgorithms) -> Vec<NodeId> {
    let ranked = match top_pagerank(graph, algorithms, MAX_CANDIDATES) {
        Ok(ranked) => ranked,
        Err(e) => {
            warn!(error = %e, "PageRank unavailable, ranking risk candidates by degree centrality");
            top_degree_centrality(graph, algorithms, MAX_CANDIDATES)
        }
    };
    ranked.into_iter().map(|(node, _)| node).collect()
}

fn assess(graph: &CoPurchaseGraph, node: NodeId, rng: &mut StdRng) -> RiskEntry {
    let base_risk: f64 = rng.gen_range(0.3..0.9);

    let in_degree = graph.in_degree(node).unwrap_or(0);
    let out_degree = graph.out_degree(node).unwrap_or(0);
    let in_factor = (in_degree as f64 / DEGREE_SCALE).min(DEGREE_FACTOR_CAP);
    let out_factor = (out_degree as f64 / DEGREE_SCALE).min(DEGREE_FACTOR_CAP);
    let score = ((base_risk + in_factor + out_factor) / 3.0).min(MAX_SCORE);

    let mut reasons: Vec<String> = Vec::new();
    if in_degree > DEGREE_THRESHOLD {
        reasons.push(HIGH_DEPENDENCY.to_string());
    }
    if out_degree > DEGREE_THRESHOLD {
        reasons.push(CRITICAL_FOR_PRODUCTS.to_string());
    }
    if base_risk > HISTORICAL_THRESHOLD {
        reasons.push(HISTORICAL_ISSUES.to_string());
    }
    if reasons.is_empty() {
        reasons.push(GENERAL_POSITION.to_string());
    }

    let extra: usize = rng.gen_range(1..=2);
    reasons.extend(
        REASON_POOL
            .choose_multiple(rng, extra)
            .map(|reason| reason.to_string()),
    );

    RiskEntry {
        supplier: format!("Supplier-{}", node),
        score,
        reasons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::NativeAlgorithms;
    use std::collections::HashSet;

    /// Hub 0 with 12 spokes in each direction, plus a ring 100..160
    fn sample() -> CoPurchaseGraph {
        let mut edges = Vec::new();
        for spoke in 1..=12i64 {
            edges.push((0, spoke));
            edges.push((spoke + 20, 0));
        }
        for i in 0..60i64 {
            edges.push((100 + i, 100 + (i + 1) % 60));
        }
        CoPurchaseGraph::from_edges(edges)
    }

    #[test]
    fn test_length_is_capped() {
        let graph = sample();
        let algorithms = NativeAlgorithms::default();

        assert_eq!(score_risk(&graph, &algorithms, 3, DEFAULT_RISK_SEED).len(), 3);
        assert_eq!(score_risk(&graph, &algorithms, 0, DEFAULT_RISK_SEED).len(), 0);
        assert_eq!(
            score_risk(&graph, &algorithms, 500, DEFAULT_RISK_SEED).len(),
            MAX_CANDIDATES
        );
    }

    #[test]
    fn test_small_graph_returns_every_node() {
        let graph = CoPurchaseGraph::from_edges([(1, 2)]);
        let risks = score_risk(&graph, &NativeAlgorithms::default(), 10, DEFAULT_RISK_SEED);
        assert_eq!(risks.len(), 2);
    }

    #[test]
    fn test_scores_are_bounded_and_reasons_well_formed() {
        let risks = score_risk(&sample(), &NativeAlgorithms::default(), 50, 7);

        for risk in &risks {
            assert!((0.0..=MAX_SCORE).contains(&risk.score));
            assert!(risk.supplier.starts_with("Supplier-"));
            assert!(risk.reasons.len() >= 2 && risk.reasons.len() <= 5);

            let pooled: Vec<&String> = risk
                .reasons
                .iter()
                .filter(|r| REASON_POOL.contains(&r.as_str()))
                .collect();
            let unique: HashSet<&String> = pooled.iter().copied().collect();
            assert!(!pooled.is_empty() && pooled.len() <= 2);
            assert_eq!(unique.len(), pooled.len());
        }
    }

    #[test]
    fn test_hub_gets_degree_reasons() {
        let risks = score_risk(&sample(), &NativeAlgorithms::default(), 50, DEFAULT_RISK_SEED);
        let hub = risks.iter().find(|r| r.supplier == "Supplier-0").unwrap();

        assert_eq!(hub.reasons[0], HIGH_DEPENDENCY);
        assert_eq!(hub.reasons[1], CRITICAL_FOR_PRODUCTS);
    }

    #[test]
    fn test_same_seed_same_output() {
        let graph = sample();
        let algorithms = NativeAlgorithms::default();

        let first = score_risk(&graph, &algorithms, 20, DEFAULT_RISK_SEED);
        let second = score_risk(&graph, &algorithms, 20, DEFAULT_RISK_SEED);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_different_seed_changes_scores() {
        let graph = sample();
        let algorithms = NativeAlgorithms::default();

        let a = score_risk(&graph, &algorithms, 20, 1);
        let b = score_risk(&graph, &algorithms, 20, 2);
        assert_ne!(a, b);
    }
}
