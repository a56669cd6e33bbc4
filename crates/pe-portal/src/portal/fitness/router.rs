use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::comment::CommentGateway;
use super::domain::{FitnessSubmission, RecordId};
use super::repository::{FitnessRepository, RecordView, RepositoryError};
use super::service::{FitnessService, FitnessServiceError};

/// Router builder exposing HTTP endpoints for submission, lookup, and the
/// AI coach comment.
pub fn fitness_router<R, G>(service: Arc<FitnessService<R, G>>) -> Router
where
    R: FitnessRepository + 'static,
    G: CommentGateway + 'static,
{
    Router::new()
        .route("/api/v1/fitness/evaluations", post(submit_handler::<R, G>))
        .route(
            "/api/v1/fitness/evaluations/:record_id",
            get(record_handler::<R, G>),
        )
        .route(
            "/api/v1/fitness/evaluations/:record_id/comment",
            post(comment_handler::<R, G>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R, G>(
    State(service): State<Arc<FitnessService<R, G>>>,
    axum::Json(submission): axum::Json<FitnessSubmission>,
) -> Response
where
    R: FitnessRepository + 'static,
    G: CommentGateway + 'static,
{
    match service.submit(submission) {
        Ok(record) => {
            let view = RecordView::from_record(&record);
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(FitnessServiceError::Measurement(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(FitnessServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({ "error": "record already exists" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn record_handler<R, G>(
    State(service): State<Arc<FitnessService<R, G>>>,
    Path(record_id): Path<String>,
) -> Response
where
    R: FitnessRepository + 'static,
    G: CommentGateway + 'static,
{
    let id = RecordId(record_id);
    match service.get(&id) {
        Ok(record) => {
            let view = RecordView::from_record(&record);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(FitnessServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({ "error": "record not found", "record_id": id.0 });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

/// The comment gateway may block on an outbound HTTP call, so the service
/// call runs on the blocking pool rather than a runtime worker.
pub(crate) async fn comment_handler<R, G>(
    State(service): State<Arc<FitnessService<R, G>>>,
    Path(record_id): Path<String>,
) -> Response
where
    R: FitnessRepository + 'static,
    G: CommentGateway + 'static,
{
    let id = RecordId(record_id);
    let task_id = id.clone();
    let outcome =
        tokio::task::spawn_blocking(move || service.coach_comment(&task_id)).await;

    match outcome {
        Ok(Ok(comment)) => {
            let payload = json!({ "record_id": id.0, "comment": comment });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Ok(Err(FitnessServiceError::Repository(RepositoryError::NotFound))) => {
            let payload = json!({ "error": "record not found", "record_id": id.0 });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Ok(Err(FitnessServiceError::Comment(error))) => {
            let payload = json!({ "error": error.to_string(), "retryable": true });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
        Ok(Err(other)) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
        Err(join_error) => {
            let payload = json!({ "error": join_error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
