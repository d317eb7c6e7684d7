use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use supply_graph::config::{DEFAULT_DATASET_FILE, DEFAULT_DATASET_URL};
use supply_graph::{GraphAnalyzer, HttpServer, ServiceConfig};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "supply-graph", version, about = "Co-purchasing graph analytics API")]
struct Args {
    /// Bind address
    #[arg(long, default_value = "0.0.0.0", env = "SUPPLY_GRAPH_ADDRESS")]
    address: String,

    /// HTTP port
    #[arg(long, default_value_t = 8000, env = "SUPPLY_GRAPH_PORT")]
    port: u16,

    /// Directory holding the dataset
    #[arg(long, default_value = "./data", env = "SUPPLY_GRAPH_DATA_DIR")]
    data_dir: PathBuf,

    /// Dataset file name inside the data directory
    #[arg(long, default_value = DEFAULT_DATASET_FILE, env = "SUPPLY_GRAPH_DATASET_FILE")]
    dataset_file: String,

    /// Where to download the dataset from when it is missing
    #[arg(long, default_value = DEFAULT_DATASET_URL, env = "SUPPLY_GRAPH_DATASET_URL")]
    dataset_url: String,

    /// Allowed CORS origins (comma separated)
    #[arg(long, value_delimiter = ',', env = "SUPPLY_GRAPH_ALLOWED_ORIGINS")]
    allowed_origins: Vec<String>,

    /// Seed for the synthetic risk scores
    #[arg(long, env = "SUPPLY_GRAPH_RISK_SEED")]
    risk_seed: Option<u64>,

    /// Dataset download timeout in seconds
    #[arg(long, default_value_t = 300, env = "SUPPLY_GRAPH_DOWNLOAD_TIMEOUT")]
    download_timeout: u64,

    /// Load the graph at startup instead of on the first request
    #[arg(long, env = "SUPPLY_GRAPH_PRELOAD")]
    preload: bool,
}

impl Args {
    fn into_config(self) -> ServiceConfig {
        let defaults = ServiceConfig::default();
        ServiceConfig {
            address: self.address,
            port: self.port,
            data_dir: self.data_dir,
            dataset_file: self.dataset_file,
            dataset_url: self.dataset_url,
            allowed_origins: if self.allowed_origins.is_empty() {
                defaults.allowed_origins
            } else {
                self.allowed_origins
            },
            risk_seed: self.risk_seed.unwrap_or(defaults.risk_seed),
            download_timeout: Duration::from_secs(self.download_timeout),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let preload = args.preload;
    let config = args.into_config();

    info!("Supply Graph v{}", supply_graph::version());

    let analyzer = Arc::new(GraphAnalyzer::new(&config));

    if preload {
        let analyzer = Arc::clone(&analyzer);
        tokio::spawn(async move {
            if let Err(e) = analyzer.graph().await {
                error!(error = %e, "Preloading the graph failed, will retry on first request");
            }
        });
    }

    let server = HttpServer::new(analyzer, config.clone());
    server
        .start()
        .await
        .with_context(|| format!("HTTP server on {} failed", config.bind_addr()))?;

    Ok(())
}
