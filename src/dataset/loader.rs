//! Edge-list parsing
//!
//! Format: one `source target` pair of integers per line, separated by
//! whitespace. Lines starting with `#` are comments. Every other line,
//! including a blank one, must hold exactly two ids or the whole load aborts.

use super::{DatasetError, DatasetResult};
use crate::graph::{CoPurchaseGraph, GraphBuilder, NodeId};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

const COMMENT_MARKER: char = '#';

/// Load a gzip-compressed edge list from disk.
pub fn load(path: &Path) -> DatasetResult<CoPurchaseGraph> {
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), "Loading graph from dataset");
    let graph = load_reader(BufReader::new(MultiGzDecoder::new(file))).map_err(|e| match e {
        DatasetError::Io { source, .. } => DatasetError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Graph loaded"
    );
    Ok(graph)
}

/// Parse an uncompressed edge list from any buffered reader.
pub fn load_reader<R: BufRead>(reader: R) -> DatasetResult<CoPurchaseGraph> {
    let mut builder = GraphBuilder::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| DatasetError::Io {
            path: "<stream>".into(),
            source,
        })?;
        if line.starts_with(COMMENT_MARKER) {
            continue;
        }

        let (source, target) = parse_edge(&line).map_err(|reason| DatasetError::Parse {
            line: idx + 1,
            content: line.clone(),
            reason,
        })?;
        builder.add_edge(source, target);
    }

    Ok(builder.build())
}

fn parse_edge(line: &str) -> Result<(NodeId, NodeId), String> {
    let mut tokens = line.split_whitespace();
    let (Some(source), Some(target), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        let count = line.split_whitespace().count();
        return Err(format!("expected 2 fields, found {}", count));
    };

    let parse = |token: &str| {
        token
            .parse::<i64>()
            .map(NodeId::new)
            .map_err(|e| format!("invalid node id {:?}: {}", token, e))
    };
    Ok((parse(source)?, parse(target)?))
}
