//! API routes
//!
//! Request bodies are optional: a missing, malformed or non-string `prompt`
//! is graded as the empty prompt rather than rejected.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use grader_core::{Evaluation, GradeResponse, PromptRequest, SuggestionsResponse};
use serde::Serialize;
use tracing::info;

use crate::server::AppState;

type AppStateArc = Arc<AppState>;

pub const HEALTH_MESSAGE: &str = "Prompt Grader API is running!";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
}

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/", get(health))
}

pub fn prompt_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/api/prompts/grade", post(grade))
        .route("/api/prompts/suggestions", post(suggestions))
        .route("/api/prompts/analyze", post(analyze))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: HEALTH_MESSAGE,
    })
}

fn prompt_text(payload: &Option<Json<PromptRequest>>) -> &str {
    payload.as_ref().map_or("", |Json(req)| req.text())
}

async fn grade(
    State(state): State<AppStateArc>,
    payload: Option<Json<PromptRequest>>,
) -> Json<GradeResponse> {
    let prompt = prompt_text(&payload);
    let score = state.grader.grade(prompt);
    info!(score, chars = prompt.chars().count(), "graded prompt");

    Json(GradeResponse { score })
}

async fn suggestions(
    State(state): State<AppStateArc>,
    payload: Option<Json<PromptRequest>>,
) -> Json<SuggestionsResponse> {
    let prompt = prompt_text(&payload);
    let suggestions = state.grader.suggest(prompt);
    info!(count = suggestions.len(), "generated suggestions");

    Json(SuggestionsResponse { suggestions })
}

async fn analyze(
    State(state): State<AppStateArc>,
    payload: Option<Json<PromptRequest>>,
) -> Json<Evaluation> {
    let evaluation = state.grader.evaluate(prompt_text(&payload));
    info!(
        score = evaluation.score,
        label = %evaluation.label,
        "analyzed prompt"
    );

    Json(evaluation)
}
