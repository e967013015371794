//! JSON bodies accepted and returned by the HTTP API.
use serde::{Deserialize, Serialize};

use crate::pipeline::GenerationRequest;

/// Body of `POST /generate_chart`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ChartRequest {
    pub user_input: String,
    pub chart_type: String,
}

/// Body of `POST /generate_diagram`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DiagramRequest {
    pub user_input: String,
    pub diagram_type: String,
}

impl From<ChartRequest> for GenerationRequest {
    fn from(r: ChartRequest) -> Self {
        GenerationRequest::new(r.user_input, r.chart_type)
    }
}

impl From<DiagramRequest> for GenerationRequest {
    fn from(r: DiagramRequest) -> Self {
        GenerationRequest::new(r.user_input, r.diagram_type)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ChartResponse {
    pub chart_syntax: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct DiagramResponse {
    pub mermaid_syntax: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct HealthResponse {
    pub message: String,
}

/// Body of 422 and hardened 500 responses.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ErrorDetail {
    pub detail: String,
}
