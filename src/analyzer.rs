//! Process-wide graph analyzer
//!
//! Owns the single graph instance. The first caller triggers download and
//! parsing; concurrent callers wait on the same initialization. Analytics run
//! on the blocking thread pool.

use crate::algo::{CommunityAlgorithm, GraphAlgorithms, NativeAlgorithms};
use crate::analytics::{
    compute_stats, detect_communities, score_risk, Community, GraphStats, RiskEntry,
};
use crate::config::ServiceConfig;
use crate::dataset::{self, DatasetError};
use crate::graph::CoPurchaseGraph;
use crate::query::{QueryResponse, QueryRouter};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::info;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("Background task failed: {0}")]
    Task(String),
}

pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

/// Where the dataset comes from
#[derive(Debug, Clone)]
pub struct DatasetSource {
    pub path: PathBuf,
    pub url: String,
    pub timeout: Duration,
}

impl From<&ServiceConfig> for DatasetSource {
    fn from(config: &ServiceConfig) -> Self {
        Self {
            path: config.dataset_path(),
            url: config.dataset_url.clone(),
            timeout: config.download_timeout,
        }
    }
}

pub struct GraphAnalyzer {
    source: Option<DatasetSource>,
    graph: OnceCell<Arc<CoPurchaseGraph>>,
    algorithms: Arc<dyn GraphAlgorithms>,
    risk_seed: u64,
}

impl GraphAnalyzer {
    /// Analyzer that loads its graph lazily from the configured dataset
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            source: Some(DatasetSource::from(config)),
            graph: OnceCell::new(),
            algorithms: Arc::new(NativeAlgorithms::default()),
            risk_seed: config.risk_seed,
        }
    }

    /// Analyzer over an already built graph
    pub fn with_graph(graph: CoPurchaseGraph, risk_seed: u64) -> Self {
        Self {
            source: None,
            graph: OnceCell::new_with(Some(Arc::new(graph))),
            algorithms: Arc::new(NativeAlgorithms::default()),
            risk_seed,
        }
    }

    /// Replace the algorithm backend
    #[cfg(test)]
    pub(crate) fn with_algorithms(mut self, algorithms: Arc<dyn GraphAlgorithms>) -> Self {
        self.algorithms = algorithms;
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.graph.initialized()
    }

    /// The graph, loading it on first use.
    ///
    /// A failed load leaves the analyzer unloaded so a later call retries.
    pub async fn graph(&self) -> AnalyzerResult<Arc<CoPurchaseGraph>> {
        let graph = self.graph.get_or_try_init(|| self.load()).await?;
        Ok(Arc::clone(graph))
    }

    async fn load(&self) -> AnalyzerResult<Arc<CoPurchaseGraph>> {
        let source = self.source.as_ref().ok_or_else(|| {
            AnalyzerError::Task("analyzer has neither a graph nor a dataset source".to_string())
        })?;

        dataset::ensure_dataset(&source.path, &source.url, source.timeout).await?;

        let path = source.path.clone();
        let graph = tokio::task::spawn_blocking(move || dataset::load(&path))
            .await
            .map_err(|e| AnalyzerError::Task(e.to_string()))??;

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Analyzer ready"
        );
        Ok(Arc::new(graph))
    }

    /// Run `job` against the graph on the blocking pool.
    async fn run<T, F>(&self, job: F) -> AnalyzerResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&CoPurchaseGraph, &dyn GraphAlgorithms) -> T + Send + 'static,
    {
        let graph = self.graph().await?;
        let algorithms = Arc::clone(&self.algorithms);
        tokio::task::spawn_blocking(move || job(&graph, algorithms.as_ref()))
            .await
            .map_err(|e| AnalyzerError::Task(e.to_string()))
    }

    pub async fn graph_stats(&self) -> AnalyzerResult<GraphStats> {
        self.run(|graph, algorithms| compute_stats(graph, algorithms))
            .await
    }

    pub async fn communities(
        &self,
        algorithm: CommunityAlgorithm,
        max_communities: usize,
    ) -> AnalyzerResult<Vec<Community>> {
        self.run(move |graph, algorithms| {
            detect_communities(graph, algorithms, algorithm, max_communities)
        })
        .await
    }

    pub async fn risk_analysis(&self, num_suppliers: usize) -> AnalyzerResult<Vec<RiskEntry>> {
        let seed = self.risk_seed;
        self.run(move |graph, algorithms| score_risk(graph, algorithms, num_suppliers, seed))
            .await
    }

    pub async fn query(&self, text: String) -> AnalyzerResult<QueryResponse> {
        let seed = self.risk_seed;
        self.run(move |graph, algorithms| QueryRouter::new(graph, algorithms, seed).dispatch(&text))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::AlgoError;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::collections::HashMap;
    use std::io::Write;
    use supply_graph_algorithms::{AlgoResult, GraphView, Partition, UndirectedView, WccResult};

    fn write_dataset(dir: &std::path::Path, body: &str) -> ServiceConfig {
        let path = dir.join("edges.txt.gz");
        let mut encoder = GzEncoder::new(std::fs::File::create(&path).unwrap(), Compression::default());
        encoder.write_all(body.as_bytes()).unwrap();
        encoder.finish().unwrap();

        ServiceConfig {
            data_dir: dir.to_path_buf(),
            dataset_file: "edges.txt.gz".to_string(),
            dataset_url: "http://127.0.0.1:9/unused".to_string(),
            ..ServiceConfig::default()
        }
    }

    #[tokio::test]
    async fn test_lazy_load_happens_once() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_dataset(dir.path(), "# comment\n1 2\n2 3\n");
        let analyzer = Arc::new(GraphAnalyzer::new(&config));
        assert!(!analyzer.is_loaded());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let analyzer = Arc::clone(&analyzer);
                tokio::spawn(async move { analyzer.graph().await.unwrap() })
            })
            .collect();

        let mut graphs = Vec::new();
        for handle in handles {
            graphs.push(handle.await.unwrap());
        }

        assert!(analyzer.is_loaded());
        assert!(graphs.iter().all(|g| Arc::ptr_eq(g, &graphs[0])));
        assert_eq!(graphs[0].edge_count(), 2);
    }

    #[tokio::test]
    async fn test_parse_failure_propagates_and_allows_retry() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_dataset(dir.path(), "1 2\nnot an edge\n");
        let analyzer = GraphAnalyzer::new(&config);

        let err = analyzer.graph_stats().await.unwrap_err();
        assert!(matches!(err, AnalyzerError::Dataset(DatasetError::Parse { line: 2, .. })));
        assert!(!analyzer.is_loaded());

        write_dataset(dir.path(), "1 2\n");
        assert_eq!(analyzer.graph().await.unwrap().node_count(), 2);
    }

    /// PageRank never converges; everything else is native.
    struct StalledPageRank(NativeAlgorithms);

    impl GraphAlgorithms for StalledPageRank {
        fn pagerank(&self, _view: &GraphView) -> AlgoResult<HashMap<i64, f64>> {
            Err(AlgoError::NotConverged {
                algorithm: "pagerank",
                iterations: 0,
            })
        }

        fn degree_centrality(&self, view: &GraphView) -> HashMap<i64, f64> {
            self.0.degree_centrality(view)
        }

        fn connected_components(&self, view: &GraphView) -> WccResult {
            self.0.connected_components(view)
        }

        fn community_partition(
            &self,
            view: &UndirectedView,
            method: CommunityAlgorithm,
        ) -> AlgoResult<Partition> {
            self.0.community_partition(view, method)
        }
    }

    #[tokio::test]
    async fn test_swapped_backend_degrades_instead_of_failing() {
        let analyzer =
            GraphAnalyzer::with_graph(CoPurchaseGraph::from_edges([(1, 2), (2, 3), (3, 1)]), 7)
                .with_algorithms(Arc::new(StalledPageRank(NativeAlgorithms::default())));

        let stats = analyzer.graph_stats().await.unwrap();
        assert!(stats.hubs.top_pagerank_nodes.is_empty());
        assert_eq!(stats.basic_stats.num_nodes, 3);

        // Risk falls back to degree centrality
        assert_eq!(analyzer.risk_analysis(2).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_preloaded_graph_serves_queries() {
        let analyzer =
            GraphAnalyzer::with_graph(CoPurchaseGraph::from_edges([(1, 2), (2, 1)]), 42);

        let stats = analyzer.graph_stats().await.unwrap();
        assert_eq!(stats.basic_stats.num_edges, 2);

        let risks = analyzer.risk_analysis(10).await.unwrap();
        assert_eq!(risks.len(), 2);
    }
}
