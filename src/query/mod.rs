//! Query Router
//!
//! Classifies free-text questions with keyword rule tables and composes the
//! analytic engines' outputs into a [`QueryResponse`].

pub mod response;
pub mod rules;

use crate::algo::{CommunityAlgorithm, GraphAlgorithms};
use crate::analytics::{compute_stats, detect_communities, score_risk, GraphStats};
use crate::graph::CoPurchaseGraph;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

pub use response::{QueryResponse, StatsPayload, VisualData};
pub use rules::{
    first_match, CannedAnswer, KeywordRule, SimpleTopic, CLASSIFICATION_RULES, SIMPLE_RULES,
};

const COMPLEX_COMMUNITIES: usize = 5;
const COMPLEX_SUPPLIERS: usize = 5;
const HYBRID_COMMUNITIES: usize = 3;
const HYBRID_SUPPLIERS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    /// Direct statistics or canned answers
    Simple,
    /// Community detection plus risk analysis
    Complex,
    /// Statistics combined with communities and risk
    Hybrid,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKind::Simple => write!(f, "simple"),
            QueryKind::Complex => write!(f, "complex"),
            QueryKind::Hybrid => write!(f, "hybrid"),
        }
    }
}

/// Classify a free-text query.
pub fn classify(text: &str) -> QueryKind {
    first_match(CLASSIFICATION_RULES, text).unwrap_or(QueryKind::Simple)
}

/// Answers queries against one loaded graph
pub struct QueryRouter<'a> {
    graph: &'a CoPurchaseGraph,
    algorithms: &'a dyn GraphAlgorithms,
    risk_seed: u64,
}

impl<'a> QueryRouter<'a> {
    pub fn new(graph: &'a CoPurchaseGraph, algorithms: &'a dyn GraphAlgorithms, risk_seed: u64) -> Self {
        Self {
            graph,
            algorithms,
            risk_seed,
        }
    }

    pub fn dispatch(&self, text: &str) -> QueryResponse {
        let kind = classify(text);
        debug!(%kind, query = text, "Dispatching query");

        match kind {
            QueryKind::Simple => self.simple(text),
            QueryKind::Complex => self.complex(),
            QueryKind::Hybrid => self.hybrid(),
        }
    }

    fn stats(&self) -> GraphStats {
        compute_stats(self.graph, self.algorithms)
    }

    fn simple(&self, text: &str) -> QueryResponse {
        let Some(topic) = first_match(SIMPLE_RULES, text) else {
            return QueryResponse::new(
                QueryKind::Simple,
                format!(
                    "Based on your query '{}', I found relevant supply chain information from our \
                     graph database. Please refer to the details in the results section.",
                    text.to_lowercase()
                ),
            );
        };

        let (text, payload) = match topic {
            SimpleTopic::Canned(answer) => {
                return QueryResponse::new(QueryKind::Simple, answer.text());
            }
            SimpleTopic::Overview => {
                let basic = self.stats().basic_stats;
                let text = format!(
                    "The Amazon product co-purchasing network contains {} products with {} \
                     connections. The network density is {:.6}. The largest connected component \
                     contains {} nodes ({:.2}% of the network). Products have an average of {:.2} \
                     incoming connections and an average of {:.2} outgoing connections.",
                    basic.num_nodes,
                    basic.num_edges,
                    basic.density,
                    basic.largest_cc_size,
                    basic.largest_cc_percentage,
                    basic.avg_in_degree,
                    basic.avg_out_degree,
                );
                (text, StatsPayload::Basic(basic))
            }
            SimpleTopic::DegreeDistribution => (
                "The degree distribution shows how connected products are in the co-purchasing \
                 network. Most products have few connections, but some highly popular products \
                 have many connections. This follows a power-law distribution, which is common in \
                 real-world networks."
                    .to_string(),
                StatsPayload::Degree {
                    degree_distribution: self.stats().degree_distribution,
                },
            ),
            SimpleTopic::Hubs => (
                "I've identified the most important products in the network based on their \
                 connections. These hub products have the most incoming links (most frequently \
                 co-purchased with other products) and outgoing links (recommend the most other \
                 products). The top products by PageRank are also shown, representing the most \
                 influential nodes in the network."
                    .to_string(),
                StatsPayload::Hubs {
                    hubs: self.stats().hubs,
                },
            ),
        };

        QueryResponse::new(QueryKind::Simple, text).with_visual_data(VisualData {
            basic_stats: Some(payload),
            ..Default::default()
        })
    }

    fn complex(&self) -> QueryResponse {
        let clusters = detect_communities(
            self.graph,
            self.algorithms,
            CommunityAlgorithm::Louvain,
            COMPLEX_COMMUNITIES,
        );
        let risk_scores = score_risk(self.graph, self.algorithms, COMPLEX_SUPPLIERS, self.risk_seed);

        let text = "Based on the Louvain community detection algorithm, I've identified several \
                    clusters in the Amazon co-purchasing network. These clusters represent groups of \
                    products that are frequently purchased together, suggesting they form natural \
                    categories or themes. The largest cluster contains products that appear to be \
                    central to the network. I've also performed a risk analysis on key nodes in the \
                    network, which could represent critical products in a supply chain context.";

        QueryResponse::new(QueryKind::Complex, text).with_visual_data(VisualData {
            clusters: Some(clusters),
            risk_scores: Some(risk_scores),
            basic_stats: None,
        })
    }

    fn hybrid(&self) -> QueryResponse {
        let basic = self.stats().basic_stats;
        let clusters = detect_communities(
            self.graph,
            self.algorithms,
            CommunityAlgorithm::Louvain,
            HYBRID_COMMUNITIES,
        );
        let risk_scores = score_risk(self.graph, self.algorithms, HYBRID_SUPPLIERS, self.risk_seed);

        let largest = match clusters.first() {
            Some(top) => format!(
                "The largest community contains {} products, which is {:.2}% of the network. ",
                top.count, top.percentage
            ),
            None => String::new(),
        };
        let text = format!(
            "I've analyzed the Amazon co-purchasing network with {} products and {} connections. \
             The community detection algorithm identified {} major clusters of products that are \
             frequently purchased together. {}Based on centrality measures, I've also identified \
             products that might represent critical points in the supply chain, with risk scores \
             based on their network position.",
            basic.num_nodes,
            basic.num_edges,
            clusters.len(),
            largest,
        );

        QueryResponse::new(QueryKind::Hybrid, text).with_visual_data(VisualData {
            clusters: Some(clusters),
            risk_scores: Some(risk_scores),
            basic_stats: Some(StatsPayload::Basic(basic)),
        })
    }
}
