//! Statistics Engine
//!
//! Node/edge counts, density, largest weakly connected component, degree
//! distributions and hub rankings.

use crate::algo::{AlgoError, GraphAlgorithms};
use crate::graph::{CoPurchaseGraph, NodeId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::warn;

/// Number of nodes in each hub ranking
pub const TOP_K: usize = 10;
/// Number of entries kept per degree distribution
pub const DISTRIBUTION_ENTRIES: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicStats {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub density: f64,
    pub largest_cc_size: usize,
    pub largest_cc_percentage: f64,
    pub avg_in_degree: f64,
    pub avg_out_degree: f64,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
}

/// Degree -> fraction of nodes with that degree, ascending by degree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreeDistribution {
    pub in_degree: BTreeMap<usize, f64>,
    pub out_degree: BTreeMap<usize, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hubs {
    pub top_in_degree_nodes: Vec<(NodeId, usize)>,
    pub top_out_degree_nodes: Vec<(NodeId, usize)>,
    pub top_pagerank_nodes: Vec<(NodeId, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub basic_stats: BasicStats,
    pub degree_distribution: DegreeDistribution,
    pub hubs: Hubs,
}

/// Compute every statistic for the graph.
///
/// A PageRank failure only empties `hubs.top_pagerank_nodes`.
pub fn compute_stats(graph: &CoPurchaseGraph, algorithms: &dyn GraphAlgorithms) -> GraphStats {
    let top_pagerank_nodes = match top_pagerank(graph, algorithms, TOP_K) {
        Ok(top) => top,
        Err(e) => {
            warn!(error = %e, "PageRank calculation failed, returning no PageRank hubs");
            Vec::new()
        }
    };

    GraphStats {
        basic_stats: basic_stats(graph, algorithms),
        degree_distribution: degree_distribution(graph),
        hubs: Hubs {
            top_in_degree_nodes: top_k(in_degrees(graph), TOP_K, Ord::cmp),
            top_out_degree_nodes: top_k(out_degrees(graph), TOP_K, Ord::cmp),
            top_pagerank_nodes,
        },
    }
}

pub fn basic_stats(graph: &CoPurchaseGraph, algorithms: &dyn GraphAlgorithms) -> BasicStats {
    let num_nodes = graph.node_count();
    let num_edges = graph.edge_count();

    let largest_cc_size = algorithms
        .connected_components(graph.view())
        .largest()
        .map_or(0, <[usize]>::len);

    let view = graph.view();
    let max_in_degree = (0..num_nodes).map(|i| view.in_degree(i)).max().unwrap_or(0);
    let max_out_degree = (0..num_nodes).map(|i| view.out_degree(i)).max().unwrap_or(0);

    // Every edge adds one to an in-degree and one to an out-degree
    let avg_degree = ratio(num_edges as f64, num_nodes as f64);

    BasicStats {
        num_nodes,
        num_edges,
        density: density(num_nodes, num_edges),
        largest_cc_size,
        largest_cc_percentage: ratio(largest_cc_size as f64, num_nodes as f64) * 100.0,
        avg_in_degree: avg_degree,
        avg_out_degree: avg_degree,
        max_in_degree,
        max_out_degree,
    }
}

/// Directed density: `E / (N * (N - 1))`, 0 for graphs with at most one node.
pub fn density(nodes: usize, edges: usize) -> f64 {
    if nodes <= 1 {
        return 0.0;
    }
    edges as f64 / (nodes as f64 * (nodes - 1) as f64)
}

pub fn degree_distribution(graph: &CoPurchaseGraph) -> DegreeDistribution {
    let view = graph.view();
    let n = graph.node_count();
    DegreeDistribution {
        in_degree: distribution((0..n).map(|i| view.in_degree(i)), n),
        out_degree: distribution((0..n).map(|i| view.out_degree(i)), n),
    }
}

fn distribution(degrees: impl Iterator<Item = usize>, n: usize) -> BTreeMap<usize, f64> {
    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    for degree in degrees {
        *counts.entry(degree).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .take(DISTRIBUTION_ENTRIES)
        .map(|(degree, count)| (degree, count as f64 / n as f64))
        .collect()
}

/// Top `k` nodes by PageRank score.
pub fn top_pagerank(
    graph: &CoPurchaseGraph,
    algorithms: &dyn GraphAlgorithms,
    k: usize,
) -> Result<Vec<(NodeId, f64)>, AlgoError> {
    let scores = algorithms.pagerank(graph.view())?;
    Ok(top_k(
        scores.into_iter().map(|(id, s)| (NodeId::new(id), s)),
        k,
        f64::total_cmp,
    ))
}

/// Top `k` nodes by degree centrality.
pub fn top_degree_centrality(
    graph: &CoPurchaseGraph,
    algorithms: &dyn GraphAlgorithms,
    k: usize,
) -> Vec<(NodeId, f64)> {
    let scores = algorithms.degree_centrality(graph.view());
    top_k(
        scores.into_iter().map(|(id, s)| (NodeId::new(id), s)),
        k,
        f64::total_cmp,
    )
}

fn in_degrees(graph: &CoPurchaseGraph) -> impl Iterator<Item = (NodeId, usize)> + '_ {
    let view = graph.view();
    graph.nodes().enumerate().map(move |(i, id)| (id, view.in_degree(i)))
}

fn out_degrees(graph: &CoPurchaseGraph) -> impl Iterator<Item = (NodeId, usize)> + '_ {
    let view = graph.view();
    graph.nodes().enumerate().map(move |(i, id)| (id, view.out_degree(i)))
}

/// Highest `k` values, ties broken by ascending node id.
pub(crate) fn top_k<T, F>(
    items: impl IntoIterator<Item = (NodeId, T)>,
    k: usize,
    cmp: F,
) -> Vec<(NodeId, T)>
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut ranked: Vec<(NodeId, T)> = items.into_iter().collect();
    ranked.sort_by(|(a_id, a), (b_id, b)| cmp(b, a).then_with(|| a_id.cmp(b_id)));
    ranked.truncate(k);
    ranked
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::NativeAlgorithms;
    use std::collections::HashMap;
    use supply_graph_algorithms::{
        AlgoResult, GraphView, NodeId as AlgoNodeId, Partition, UndirectedView, WccResult,
    };

    /// Delegates to the native algorithms but always fails PageRank.
    struct FailingPageRank(NativeAlgorithms);

    impl GraphAlgorithms for FailingPageRank {
        fn pagerank(&self, _view: &GraphView) -> AlgoResult<HashMap<AlgoNodeId, f64>> {
            Err(AlgoError::NotConverged {
                algorithm: "PageRank",
                iterations: 0,
            })
        }

        fn degree_centrality(&self, view: &GraphView) -> HashMap<AlgoNodeId, f64> {
            self.0.degree_centrality(view)
        }

        fn connected_components(&self, view: &GraphView) -> WccResult {
            self.0.connected_components(view)
        }

        fn community_partition(
            &self,
            view: &UndirectedView,
            method: crate::algo::CommunityAlgorithm,
        ) -> AlgoResult<Partition> {
            self.0.community_partition(view, method)
        }
    }

    fn sample() -> CoPurchaseGraph {
        // Component A: 1 -> 2, 1 -> 3, 2 -> 3, 3 -> 1 ; component B: 10 -> 11
        CoPurchaseGraph::from_edges([(1, 2), (1, 3), (2, 3), (3, 1), (10, 11)])
    }

    #[test]
    fn test_basic_stats() {
        let stats = basic_stats(&sample(), &NativeAlgorithms::default());

        assert_eq!(stats.num_nodes, 5);
        assert_eq!(stats.num_edges, 5);
        assert!((stats.density - 5.0 / 20.0).abs() < 1e-12);
        assert_eq!(stats.largest_cc_size, 3);
        assert!((stats.largest_cc_percentage - 60.0).abs() < 1e-9);
        assert!((stats.avg_in_degree - 1.0).abs() < 1e-12);
        assert_eq!(stats.max_in_degree, 2);
        assert_eq!(stats.max_out_degree, 2);
    }

    #[test]
    fn test_density_edge_cases() {
        assert_eq!(density(0, 0), 0.0);
        assert_eq!(density(1, 1), 0.0);
        assert_eq!(density(2, 2), 1.0);
    }

    #[test]
    fn test_empty_graph_stats_are_zero() {
        let graph = CoPurchaseGraph::from_edges(std::iter::empty());
        let stats = compute_stats(&graph, &NativeAlgorithms::default());

        assert_eq!(stats.basic_stats.num_nodes, 0);
        assert_eq!(stats.basic_stats.density, 0.0);
        assert_eq!(stats.basic_stats.largest_cc_percentage, 0.0);
        assert!(stats.hubs.top_pagerank_nodes.is_empty());
        assert!(stats.degree_distribution.in_degree.is_empty());
    }

    #[test]
    fn test_degree_distribution_keys_are_observed_degrees() {
        let dist = degree_distribution(&sample());

        // in-degrees: 1:1, 2:1, 3:2, 10:0, 11:1
        let keys: Vec<usize> = dist.in_degree.keys().copied().collect();
        assert_eq!(keys, vec![0, 1, 2]);
        assert!((dist.in_degree[&1] - 0.6).abs() < 1e-12);

        let total: f64 = dist.out_degree.values().sum();
        assert!(total <= 1.0 + 1e-12);
    }

    #[test]
    fn test_distribution_is_truncated() {
        // A star in which node i has out-degree i, for i in 1..=25
        let mut edges = Vec::new();
        let mut next = 1_000;
        for source in 1..=25i64 {
            for _ in 0..source {
                edges.push((source, next));
                next += 1;
            }
        }
        let dist = degree_distribution(&CoPurchaseGraph::from_edges(edges));
        assert_eq!(dist.out_degree.len(), DISTRIBUTION_ENTRIES);
        assert_eq!(dist.out_degree.keys().next(), Some(&0));
    }

    #[test]
    fn test_hub_ties_break_by_ascending_id() {
        // 5, 3 and 9 all have out-degree 1
        let graph = CoPurchaseGraph::from_edges([(5, 100), (3, 100), (9, 100)]);
        let stats = compute_stats(&graph, &NativeAlgorithms::default());

        let top_out: Vec<i64> = stats
            .hubs
            .top_out_degree_nodes
            .iter()
            .map(|(id, _)| id.as_i64())
            .collect();
        assert_eq!(top_out, vec![3, 5, 9, 100]);
        assert_eq!(stats.hubs.top_in_degree_nodes[0], (NodeId::new(100), 3));
        assert_eq!(stats.hubs.top_pagerank_nodes[0].0, NodeId::new(100));
    }

    #[test]
    fn test_pagerank_failure_degrades_to_empty_list() {
        let stats = compute_stats(&sample(), &FailingPageRank(NativeAlgorithms::default()));

        assert!(stats.hubs.top_pagerank_nodes.is_empty());
        assert_eq!(stats.basic_stats.num_nodes, 5);
        assert_eq!(stats.hubs.top_in_degree_nodes.len(), 5);
    }
}
