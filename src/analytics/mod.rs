//! Analytic engines over the loaded graph
//!
//! Every function here is synchronous, CPU-bound and stateless given the
//! graph. Algorithm failures degrade to empty or partial results instead of
//! errors.

pub mod community;
pub mod risk;
pub mod stats;

pub use community::{detect_communities, Community};
pub use risk::{score_risk, RiskEntry};
pub use stats::{compute_stats, BasicStats, DegreeDistribution, GraphStats, Hubs};
