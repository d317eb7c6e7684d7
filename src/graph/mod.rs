//! Core graph data model
//!
//! A directed co-purchasing graph keyed by integer product identifiers,
//! loaded once and read-only afterwards.

pub mod store;
pub mod types;

// Re-export main types
pub use store::{CoPurchaseGraph, GraphBuilder};
pub use types::NodeId;
