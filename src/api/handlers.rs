//! Axum request handlers for the HTTP API.
//!
//! Every pipeline outcome, including the degraded ones, is returned as 200
//! with the text in the variant's result field. Only a malformed body (422)
//! or a panic while generating (500) changes the status.
use std::any::Any;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tokio::task::JoinError;
use tracing::Instrument;
use uuid::Uuid;

use crate::api::models::{ChartRequest, ChartResponse, DiagramRequest, DiagramResponse, ErrorDetail, HealthResponse};
use crate::api::routes::AppState;
use crate::pipeline::GenerationRequest;
use crate::variant::Variant;

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse { message: state.pipeline.variant().greeting().to_string() })
}

pub async fn generate_chart(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChartRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(p) => p,
        Err(rejection) => return unprocessable(rejection),
    };
    match run_generation(state, request.into()).await {
        Ok(chart_syntax) => Json(ChartResponse { chart_syntax }).into_response(),
        Err(response) => response,
    }
}

pub async fn generate_diagram(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DiagramRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(p) => p,
        Err(rejection) => return unprocessable(rejection),
    };
    match run_generation(state, request.into()).await {
        Ok(mermaid_syntax) => Json(DiagramResponse { mermaid_syntax }).into_response(),
        Err(response) => response,
    }
}

/// Run the pipeline on its own task so a panic inside it turns into a 500
/// instead of a dropped connection.
async fn run_generation(state: Arc<AppState>, request: GenerationRequest) -> Result<String, Response> {
    let variant = state.pipeline.variant();
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("generate", %request_id, %variant);
    span.in_scope(|| {
        tracing::info!("Received request: {}, {}", request.user_input, request.output_type);
    });

    let task = tokio::spawn(
        async move { state.pipeline.generate(&request).await.into_text() }.instrument(span),
    );
    task.await.map_err(|e| {
        let detail = join_error_detail(e);
        tracing::error!(%request_id, "Error in {}: {}", variant.route(), detail);
        internal_error(variant, detail)
    })
}

fn unprocessable(rejection: JsonRejection) -> Response {
    let detail = rejection.body_text();
    tracing::warn!("Rejected request body: {}", detail);
    (StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorDetail { detail })).into_response()
}

/// 500 response; the hardened variant exposes the failure description.
pub fn internal_error(variant: Variant, detail: String) -> Response {
    if variant.is_hardened() {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorDetail { detail })).into_response()
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

fn join_error_detail(err: JoinError) -> String {
    if err.is_panic() {
        panic_message(err.into_panic())
    } else {
        err.to_string()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}
