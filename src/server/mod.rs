//! HTTP surface for rule evaluation.
//!
//! - `POST /rules/evaluate` evaluates a request in the configured layout and
//!   answers `200 OK`, `400` with the JSON error list, or `422` with the reason
//!   the request was rejected.
//! - `GET /rules/functions` lists the extension functions rules may call.

use crate::Result;
use crate::eval::{EvaluationFailure, RuleEvaluator};
use crate::functions::FunctionDef;
use crate::request::ContextSchema;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use ohno::IntoAppError;
use std::sync::Arc;
use tokio::net::TcpListener;

const LOG_TARGET: &str = "    server";

/// State shared by all requests.
#[derive(Debug)]
pub struct AppState {
    evaluator: RuleEvaluator,
    schema: ContextSchema,
}

impl AppState {
    #[must_use]
    pub const fn new(evaluator: RuleEvaluator, schema: ContextSchema) -> Self {
        Self { evaluator, schema }
    }
}

/// Build the application router.
pub fn build_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/rules/evaluate", post(evaluate))
        .route("/rules/functions", get(functions))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

/// Serve the router until Ctrl-C is received.
///
/// # Errors
///
/// Returns an error if the server fails while accepting connections.
pub async fn serve(listener: TcpListener, router: Router) -> Result<()> {
    if let Ok(addr) = listener.local_addr() {
        log::info!(target: LOG_TARGET, "Listening on http://{addr}");
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            log::info!(target: LOG_TARGET, "Shutting down");
        })
        .await
        .into_app_err("serving HTTP requests")
}

async fn evaluate(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let result = state
        .schema
        .parse(&body)
        .and_then(|input| state.evaluator.evaluate(&input.rules, &input.context, input.time));

    match result {
        Ok(()) => {
            log::debug!(target: LOG_TARGET, "Evaluation passed");
            (StatusCode::OK, "OK").into_response()
        }
        Err(EvaluationFailure::RulesFailed(report)) => {
            log::debug!(target: LOG_TARGET, "Evaluation failed: {report}");
            (StatusCode::BAD_REQUEST, Json(report)).into_response()
        }
        Err(EvaluationFailure::InvalidInput { reason }) => {
            log::warn!(target: LOG_TARGET, "Rejected request: {reason}");
            (StatusCode::UNPROCESSABLE_ENTITY, reason).into_response()
        }
    }
}

async fn functions(State(state): State<Arc<AppState>>) -> Json<Vec<&'static FunctionDef>> {
    Json(state.evaluator.functions().iter().collect())
}
