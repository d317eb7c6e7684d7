//! JSON API over the graph analyzer

pub mod handler;
pub mod server;

pub use handler::{ApiError, CommunitiesParams, HealthResponse, QueryRequest, RiskParams};
pub use server::{router, HttpServer};
