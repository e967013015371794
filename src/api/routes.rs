//! Shared state and router construction.
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::api::handlers;
use crate::pipeline::Pipeline;
use crate::variant::Variant;

pub struct AppState {
    pub pipeline: Pipeline,
}

/// Health on `/` plus the variant's generate endpoint.
pub fn router(state: Arc<AppState>) -> Router {
    let variant = state.pipeline.variant();
    let generate = match variant {
        Variant::Apex | Variant::ChartJs => post(handlers::generate_chart),
        Variant::Mermaid => post(handlers::generate_diagram),
    };

    Router::new()
        .route("/", get(handlers::health))
        .route(variant.route(), generate)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
