//! HTTP server

use std::any::Any;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use grader_core::{ErrorResponse, PromptGrader};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::routes;

/// Application state shared across handlers
pub struct AppState {
    pub grader: PromptGrader,
}

impl AppState {
    pub fn new(grader: PromptGrader) -> Self {
        Self { grader }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::prompt_routes())
        .with_state(Arc::new(state))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Turn a handler panic into a JSON 500
pub(crate) fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    error!(detail, "request handler panicked");

    let body = ErrorResponse {
        error: "Internal server error".to_string(),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// Run the HTTP server
pub async fn run(config: ServerConfig) -> Result<()> {
    let grader = PromptGrader::new(config.grading.clone()).context("invalid grading configuration")?;
    let app = router(AppState::new(grader));

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
