use flate2::write::GzEncoder;
use flate2::Compression;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use supply_graph::dataset::{self, DatasetError};
use supply_graph::NodeId;

fn write_gz(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    let mut encoder = GzEncoder::new(std::fs::File::create(&path).unwrap(), Compression::default());
    encoder.write_all(body.as_bytes()).unwrap();
    encoder.finish().unwrap();
    path
}

const SAMPLE: &str = "\
# Directed graph (each unordered pair of nodes is saved once): Amazon0302.txt
# Nodes: 5 Edges: 6
# FromNodeId\tToNodeId
0\t1
0\t2
1\t0
2\t3
3\t4
3\t4
";

#[test]
fn test_load_gzip_edge_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_gz(dir.path(), "sample.txt.gz", SAMPLE);

    let graph = dataset::load(&path).unwrap();
    assert_eq!(graph.node_count(), 5);
    // Duplicate 3 -> 4 collapses into one edge
    assert_eq!(graph.edge_count(), 5);
    assert!(graph.contains_edge(NodeId::new(1), NodeId::new(0)));
    assert!(!graph.contains_edge(NodeId::new(4), NodeId::new(3)));
}

#[test]
fn test_load_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_gz(dir.path(), "sample.txt.gz", SAMPLE);

    let first = dataset::load(&path).unwrap();
    let second = dataset::load(&path).unwrap();

    let nodes = |g: &supply_graph::CoPurchaseGraph| g.nodes().collect::<BTreeSet<_>>();
    let edges = |g: &supply_graph::CoPurchaseGraph| g.edges().collect::<BTreeSet<_>>();
    assert_eq!(nodes(&first), nodes(&second));
    assert_eq!(edges(&first), edges(&second));
}

#[test]
fn test_malformed_line_aborts_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_gz(dir.path(), "bad.txt.gz", "# header\n1 2\n3 x\n4 5\n");

    match dataset::load(&path) {
        Err(DatasetError::Parse { line, content, .. }) => {
            assert_eq!(line, 3);
            assert_eq!(content, "3 x");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.txt.gz");

    match dataset::load(&missing) {
        Err(DatasetError::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_ensure_dataset_keeps_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_gz(dir.path(), "sample.txt.gz", SAMPLE);
    let before = std::fs::read(&path).unwrap();

    dataset::ensure_dataset(&path, "http://127.0.0.1:9/never", std::time::Duration::from_secs(1))
        .await
        .unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), before);
}
