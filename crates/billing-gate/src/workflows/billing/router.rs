use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use tracing::error;

use super::domain::InvocationOutcome;
use super::ingest::{RetryMessage, UploadEvent};
use super::service::{BillingPipelineService, PipelineError};
use super::storage::{FailureNotifier, ObjectStore};

/// Router builder exposing the two pipeline entry points.
pub fn billing_router<S, N>(service: Arc<BillingPipelineService<S, N>>) -> Router
where
    S: ObjectStore + 'static,
    N: FailureNotifier + 'static,
{
    Router::new()
        .route("/api/v1/billing/uploads", post(upload_handler::<S, N>))
        .route("/api/v1/billing/retries", post(retry_handler::<S, N>))
        .with_state(service)
}

pub(crate) async fn upload_handler<S, N>(
    State(service): State<Arc<BillingPipelineService<S, N>>>,
    Json(event): Json<UploadEvent>,
) -> Response
where
    S: ObjectStore + 'static,
    N: FailureNotifier + 'static,
{
    invocation_response(service.process(&event))
}

pub(crate) async fn retry_handler<S, N>(
    State(service): State<Arc<BillingPipelineService<S, N>>>,
    Json(message): Json<RetryMessage>,
) -> Response
where
    S: ObjectStore + 'static,
    N: FailureNotifier + 'static,
{
    invocation_response(service.process(&message))
}

fn invocation_response(result: Result<InvocationOutcome, PipelineError>) -> Response {
    match result {
        Ok(outcome) => {
            let status = match outcome {
                InvocationOutcome::Processed { .. } => StatusCode::OK,
                InvocationOutcome::EmptyFile | InvocationOutcome::InvalidMessage => {
                    StatusCode::BAD_REQUEST
                }
                InvocationOutcome::FetchFailed => StatusCode::INTERNAL_SERVER_ERROR,
            };

            (status, Json(json!({ "body": outcome.body() }))).into_response()
        }
        Err(err) => {
            error!(error = %err, "pipeline invocation aborted");
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
