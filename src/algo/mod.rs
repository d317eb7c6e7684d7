//! Graph algorithms module
//!
//! Algorithms are implemented in the `supply-graph-algorithms` crate. This
//! module defines the capability interface the analytics layer depends on and
//! the native implementation backing it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use supply_graph_algorithms::{
    degree_centrality, girvan_newman, louvain, page_rank, weakly_connected_components,
    AlgoResult, GirvanNewmanConfig, GraphView, LouvainConfig, NodeId as AlgoNodeId,
    PageRankConfig, Partition, UndirectedView, WccResult,
};
use thiserror::Error;

// Re-export algorithm types used across the crate
pub use supply_graph_algorithms::AlgoError;

/// Community detection method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunityAlgorithm {
    #[default]
    Louvain,
    GirvanNewman,
}

/// A community algorithm name that is not recognized
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown community algorithm: {0}")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for CommunityAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "louvain" => Ok(CommunityAlgorithm::Louvain),
            "girvan_newman" => Ok(CommunityAlgorithm::GirvanNewman),
            other => Err(UnknownAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for CommunityAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommunityAlgorithm::Louvain => write!(f, "louvain"),
            CommunityAlgorithm::GirvanNewman => write!(f, "girvan_newman"),
        }
    }
}

/// Graph computations the analytics engines rely on.
///
/// Statistics, community and risk logic only talk to this trait, so any
/// backend producing the same shapes can be swapped in.
pub trait GraphAlgorithms: Send + Sync {
    /// Damped random-walk stationary distribution over directed edges
    fn pagerank(&self, view: &GraphView) -> AlgoResult<HashMap<AlgoNodeId, f64>>;

    /// Normalized count of incident edges
    fn degree_centrality(&self, view: &GraphView) -> HashMap<AlgoNodeId, f64>;

    /// Weakly connected components
    fn connected_components(&self, view: &GraphView) -> WccResult;

    /// Partition an undirected view into communities
    fn community_partition(
        &self,
        view: &UndirectedView,
        method: CommunityAlgorithm,
    ) -> AlgoResult<Partition>;
}

/// Algorithms from `supply-graph-algorithms`
#[derive(Debug, Clone, Default)]
pub struct NativeAlgorithms {
    pub pagerank: PageRankConfig,
    pub louvain: LouvainConfig,
    pub girvan_newman: GirvanNewmanConfig,
}

impl GraphAlgorithms for NativeAlgorithms {
    fn pagerank(&self, view: &GraphView) -> AlgoResult<HashMap<AlgoNodeId, f64>> {
        page_rank(view, &self.pagerank)
    }

    fn degree_centrality(&self, view: &GraphView) -> HashMap<AlgoNodeId, f64> {
        degree_centrality(view)
    }

    fn connected_components(&self, view: &GraphView) -> WccResult {
        weakly_connected_components(view)
    }

    fn community_partition(
        &self,
        view: &UndirectedView,
        method: CommunityAlgorithm,
    ) -> AlgoResult<Partition> {
        match method {
            CommunityAlgorithm::Louvain => louvain(view, &self.louvain),
            CommunityAlgorithm::GirvanNewman => girvan_newman(view, &self.girvan_newman),
        }
    }
}
