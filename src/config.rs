//! Service configuration
//!
//! Defaults match the public SNAP `amazon0302` dataset and the two local
//! front-end development origins. The binary overlays command-line flags and
//! `SUPPLY_GRAPH_*` environment variables on top of these.

use crate::analytics::risk::DEFAULT_RISK_SEED;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATASET_URL: &str = "https://snap.stanford.edu/data/amazon0302.txt.gz";
pub const DEFAULT_DATASET_FILE: &str = "amazon0302.txt.gz";
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:5173"];

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Bind address
    pub address: String,
    /// Port
    pub port: u16,
    /// Directory holding the downloaded dataset
    pub data_dir: PathBuf,
    /// File name of the dataset inside `data_dir`
    pub dataset_file: String,
    /// Where to fetch the dataset from when it is missing
    pub dataset_url: String,
    /// Origins allowed by CORS
    pub allowed_origins: Vec<String>,
    /// Seed for the synthetic risk scores
    pub risk_seed: u64,
    /// Upper bound on the dataset download
    pub download_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_string(),
            port: 8000,
            data_dir: PathBuf::from("./data"),
            dataset_file: DEFAULT_DATASET_FILE.to_string(),
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect(),
            risk_seed: DEFAULT_RISK_SEED,
            download_timeout: Duration::from_secs(300),
        }
    }
}

impl ServiceConfig {
    /// Full path of the local dataset file
    pub fn dataset_path(&self) -> PathBuf {
        self.data_dir.join(&self.dataset_file)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}
