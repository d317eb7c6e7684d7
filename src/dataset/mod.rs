//! Dataset acquisition and parsing
//!
//! [`provider`] makes sure the gzip edge list exists on disk, [`loader`]
//! turns it into a [`CoPurchaseGraph`](crate::graph::CoPurchaseGraph).

pub mod loader;
pub mod provider;

use std::path::PathBuf;
use thiserror::Error;

pub use loader::{load, load_reader};
pub use provider::ensure_dataset;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Download from {url} failed: {reason}")]
    Download { url: String, reason: String },

    #[error("Malformed edge on line {line} ({content:?}): {reason}")]
    Parse {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type DatasetResult<T> = Result<T, DatasetError>;
