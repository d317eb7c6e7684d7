//! Supply Graph
//!
//! Analytics service over a static, directed product co-purchasing network.
//! The edge list is downloaded once, parsed into an in-memory graph and served
//! through a small JSON API.
//!
//! # Architecture
//!
//! - [`dataset`]: fetches the gzip edge list and parses it
//! - [`graph`]: immutable co-purchasing graph with CSR adjacency
//! - [`algo`]: the [`algo::GraphAlgorithms`] capability interface, backed by
//!   the `supply-graph-algorithms` crate
//! - [`analytics`]: statistics, community detection and risk scoring
//! - [`query`]: keyword rule tables routing free-text questions
//! - [`analyzer`]: load-once graph holder shared by every request
//! - [`http`]: axum routes and CORS
//!
//! ## Example Usage
//!
//! ```rust
//! use supply_graph::algo::NativeAlgorithms;
//! use supply_graph::analytics::compute_stats;
//! use supply_graph::graph::CoPurchaseGraph;
//!
//! let graph = CoPurchaseGraph::from_edges([(1, 2), (2, 3), (3, 1)]);
//! let stats = compute_stats(&graph, &NativeAlgorithms::default());
//!
//! assert_eq!(stats.basic_stats.num_nodes, 3);
//! assert_eq!(stats.basic_stats.largest_cc_size, 3);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod analytics;
pub mod analyzer;
pub mod config;
pub mod dataset;
pub mod graph;
pub mod http;
pub mod query;

// Re-export main types for convenience
pub use algo::{CommunityAlgorithm, GraphAlgorithms, NativeAlgorithms};
pub use analytics::{Community, GraphStats, RiskEntry};
pub use analyzer::{AnalyzerError, AnalyzerResult, GraphAnalyzer};
pub use config::ServiceConfig;
pub use dataset::{DatasetError, DatasetResult};
pub use graph::{CoPurchaseGraph, NodeId};
pub use http::HttpServer;
pub use query::{classify, QueryKind, QueryResponse, QueryRouter};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
