//! Community Detector
//!
//! Partitions the largest weakly connected component (viewed as undirected)
//! and summarizes the biggest communities for display.

use crate::algo::{CommunityAlgorithm, GraphAlgorithms};
use crate::graph::CoPurchaseGraph;
use serde::{Deserialize, Serialize};
use supply_graph_algorithms::{Partition, UndirectedView};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Community {
    /// 1-based rank by size
    pub id: usize,
    pub name: String,
    pub count: usize,
    /// Share of the largest component, in percent
    pub percentage: f64,
    /// Internal edges over possible undirected pairs
    pub density: f64,
    pub color: String,
}

/// Detect communities and return the `max_communities` largest.
///
/// Louvain falls back to Girvan-Newman; if every attempt fails the result is
/// empty.
pub fn detect_communities(
    graph: &CoPurchaseGraph,
    algorithms: &dyn GraphAlgorithms,
    algorithm: CommunityAlgorithm,
    max_communities: usize,
) -> Vec<Community> {
    let view = graph.view();
    let components = algorithms.connected_components(view);
    let Some(largest) = components.largest() else {
        return Vec::new();
    };
    debug!(nodes = largest.len(), "Extracted largest connected component");

    let undirected = view.undirected_subgraph(largest);
    match partition_with_fallback(algorithms, &undirected, algorithm) {
        Some(partition) => summarize(&undirected, &partition, max_communities),
        None => Vec::new(),
    }
}

fn partition_with_fallback(
    algorithms: &dyn GraphAlgorithms,
    view: &UndirectedView,
    algorithm: CommunityAlgorithm,
) -> Option<Partition> {
    let attempts: &[CommunityAlgorithm] = match algorithm {
        CommunityAlgorithm::Louvain => &[CommunityAlgorithm::Louvain, CommunityAlgorithm::GirvanNewman],
        CommunityAlgorithm::GirvanNewman => &[CommunityAlgorithm::GirvanNewman],
    };

    for &method in attempts {
        match algorithms.community_partition(view, method) {
            Ok(partition) => {
                debug!(%method, communities = partition.len(), "Community detection finished");
                return Some(partition);
            }
            Err(e) => warn!(%method, error = %e, "Community detection failed"),
        }
    }
    None
}

fn summarize(view: &UndirectedView, partition: &Partition, max_communities: usize) -> Vec<Community> {
    let total = view.node_count as f64;

    // Stable sort keeps label order among equally sized communities
    let mut ranked: Vec<(usize, &Vec<usize>)> = partition.communities.iter().enumerate().collect();
    ranked.sort_by(|(_, a), (_, b)| b.len().cmp(&a.len()));

    ranked
        .into_iter()
        .take(max_communities)
        .enumerate()
        .map(|(rank, (label, members))| {
            let count = members.len();
            let pairs = count * count.saturating_sub(1) / 2;
            let density = if pairs == 0 {
                0.0
            } else {
                view.internal_edges(members) as f64 / pairs as f64
            };

            Community {
                id: rank + 1,
                name: format!("Community {}", rank + 1),
                count,
                percentage: count as f64 / total * 100.0,
                density,
                color: label_color(label),
            }
        })
        .collect()
}

/// Display color for an internal community label, as `#rrggbb`.
pub fn label_color(label: usize) -> String {
    let mixed = (label as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    format!("#{:06x}", (mixed >> 40) & 0xFF_FFFF)
}
