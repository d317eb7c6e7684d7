pub mod centrality;
pub mod common;
pub mod community;
pub mod pagerank;

pub use centrality::{degree_centrality, edge_betweenness};
pub use common::{AlgoError, AlgoResult, GraphView, NodeId, UndirectedView};
pub use community::{
    girvan_newman, louvain, weakly_connected_components, GirvanNewmanConfig, LouvainConfig,
    Partition, WccResult,
};
pub use pagerank::{page_rank, PageRankConfig};
