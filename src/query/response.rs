//! Query response payloads

use super::QueryKind;
use crate::analytics::{BasicStats, Community, DegreeDistribution, Hubs, RiskEntry};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(rename = "type")]
    pub kind: QueryKind,
    pub text: String,
    #[serde(rename = "visualData", default, skip_serializing_if = "Option::is_none")]
    pub visual_data: Option<VisualData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryResponse {
    pub fn new(kind: QueryKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            visual_data: None,
            error: None,
        }
    }

    pub fn with_visual_data(mut self, visual_data: VisualData) -> Self {
        self.visual_data = Some(visual_data);
        self
    }
}

/// Structured data for the front end's charts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clusters: Option<Vec<Community>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_scores: Option<Vec<RiskEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_stats: Option<StatsPayload>,
}

/// The statistics slice a response carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatsPayload {
    Basic(BasicStats),
    Degree { degree_distribution: DegreeDistribution },
    Hubs { hubs: Hubs },
}
