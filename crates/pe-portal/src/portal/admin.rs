//! Teacher console: login, news and star publishing, inventory reset, CSV
//! export.
//!
//! The original site leaned on Firebase auth and shipped its API secrets to
//! the browser. Here credentials and the bearer token live in server-side
//! configuration; every guarded route checks the token before touching a
//! collaborator.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::AdminConfig;

use super::equipment::{standard_inventory, EquipmentLedger, EquipmentStore};
use super::fitness::{
    export_filename, records_to_csv, CommentGateway, FitnessRepository, FitnessService,
    CSV_CONTENT_TYPE,
};
use super::news::{NewsDraft, NewsRepository, NewsService};
use super::stars::{StarProfile, StarsRepository, StarsService};

#[derive(Debug, thiserror::Error)]
pub enum AdminAuthError {
    #[error("missing or malformed Authorization header")]
    MissingToken,
    #[error("invalid admin token")]
    InvalidToken,
    #[error("invalid email or password")]
    BadCredentials,
}

/// Check the bearer token carried by a guarded request.
pub fn require_admin(headers: &HeaderMap, config: &AdminConfig) -> Result<(), AdminAuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AdminAuthError::MissingToken)?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or(AdminAuthError::MissingToken)?;

    if token == config.token {
        Ok(())
    } else {
        Err(AdminAuthError::InvalidToken)
    }
}

/// Verify console credentials, yielding the bearer token on success.
pub fn login(
    email: &str,
    password: &str,
    config: &AdminConfig,
) -> Result<String, AdminAuthError> {
    if email.eq_ignore_ascii_case(&config.email) && password == config.password {
        Ok(config.token.clone())
    } else {
        Err(AdminAuthError::BadCredentials)
    }
}

/// Shared state for the admin router; collaborators are all `Arc`s so the
/// struct stays cheap to clone per request.
pub struct AdminState<R, G, N, S, E> {
    pub config: Arc<AdminConfig>,
    pub fitness: Arc<FitnessService<R, G>>,
    pub news: Arc<NewsService<N>>,
    pub stars: Arc<StarsService<S>>,
    pub equipment: Arc<EquipmentLedger<E>>,
}

impl<R, G, N, S, E> Clone for AdminState<R, G, N, S, E> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            fitness: Arc::clone(&self.fitness),
            news: Arc::clone(&self.news),
            stars: Arc::clone(&self.stars),
            equipment: Arc::clone(&self.equipment),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) email: String,
    pub(crate) password: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginResponse {
    pub(crate) token: String,
}

pub fn admin_router<R, G, N, S, E>(state: AdminState<R, G, N, S, E>) -> Router
where
    R: FitnessRepository + 'static,
    G: CommentGateway + 'static,
    N: NewsRepository + 'static,
    S: StarsRepository + 'static,
    E: EquipmentStore + 'static,
{
    Router::new()
        .route("/api/v1/admin/login", post(login_handler::<R, G, N, S, E>))
        .route("/api/v1/admin/news", post(publish_news_handler::<R, G, N, S, E>))
        .route("/api/v1/admin/stars", post(publish_star_handler::<R, G, N, S, E>))
        .route(
            "/api/v1/admin/equipment/seed",
            post(seed_inventory_handler::<R, G, N, S, E>),
        )
        .route(
            "/api/v1/admin/fitness/export",
            get(export_handler::<R, G, N, S, E>),
        )
        .with_state(state)
}

pub(crate) async fn login_handler<R, G, N, S, E>(
    State(state): State<AdminState<R, G, N, S, E>>,
    axum::Json(request): axum::Json<LoginRequest>,
) -> Response
where
    R: FitnessRepository + 'static,
    G: CommentGateway + 'static,
    N: NewsRepository + 'static,
    S: StarsRepository + 'static,
    E: EquipmentStore + 'static,
{
    match login(&request.email, &request.password, &state.config) {
        Ok(token) => (StatusCode::OK, axum::Json(LoginResponse { token })).into_response(),
        Err(error) => unauthorized(error),
    }
}

pub(crate) async fn publish_news_handler<R, G, N, S, E>(
    State(state): State<AdminState<R, G, N, S, E>>,
    headers: HeaderMap,
    axum::Json(draft): axum::Json<NewsDraft>,
) -> Response
where
    R: FitnessRepository + 'static,
    G: CommentGateway + 'static,
    N: NewsRepository + 'static,
    S: StarsRepository + 'static,
    E: EquipmentStore + 'static,
{
    if let Err(error) = require_admin(&headers, &state.config) {
        return unauthorized(error);
    }

    let today = Local::now().date_naive();
    match state.news.publish(draft, today) {
        Ok(post) => (StatusCode::CREATED, axum::Json(post)).into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn publish_star_handler<R, G, N, S, E>(
    State(state): State<AdminState<R, G, N, S, E>>,
    headers: HeaderMap,
    axum::Json(star): axum::Json<StarProfile>,
) -> Response
where
    R: FitnessRepository + 'static,
    G: CommentGateway + 'static,
    N: NewsRepository + 'static,
    S: StarsRepository + 'static,
    E: EquipmentStore + 'static,
{
    if let Err(error) = require_admin(&headers, &state.config) {
        return unauthorized(error);
    }

    if star.name.trim().is_empty() || star.school_year.trim().is_empty() {
        let payload = json!({ "error": "star profile needs a name and a school year" });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    }

    let mut star = star;
    if star.id.trim().is_empty() {
        let slug: String = star
            .name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '-'
                }
            })
            .collect();
        star.id = format!("star-{}-{slug}", star.school_year);
    }

    match state.stars.add(star) {
        Ok(stored) => (StatusCode::CREATED, axum::Json(stored)).into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn seed_inventory_handler<R, G, N, S, E>(
    State(state): State<AdminState<R, G, N, S, E>>,
    headers: HeaderMap,
) -> Response
where
    R: FitnessRepository + 'static,
    G: CommentGateway + 'static,
    N: NewsRepository + 'static,
    S: StarsRepository + 'static,
    E: EquipmentStore + 'static,
{
    if let Err(error) = require_admin(&headers, &state.config) {
        return unauthorized(error);
    }

    match state.equipment.seed(standard_inventory()) {
        Ok(count) => (StatusCode::OK, axum::Json(json!({ "seeded": count }))).into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn export_handler<R, G, N, S, E>(
    State(state): State<AdminState<R, G, N, S, E>>,
    headers: HeaderMap,
) -> Response
where
    R: FitnessRepository + 'static,
    G: CommentGateway + 'static,
    N: NewsRepository + 'static,
    S: StarsRepository + 'static,
    E: EquipmentStore + 'static,
{
    if let Err(error) = require_admin(&headers, &state.config) {
        return unauthorized(error);
    }

    let records = match state.fitness.list() {
        Ok(records) => records,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response();
        }
    };

    match records_to_csv(&records) {
        Ok(csv_bytes) => {
            let filename = export_filename(Local::now().date_naive());
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{filename}\""),
                    ),
                ],
                csv_bytes,
            )
                .into_response()
        }
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

fn unauthorized(error: AdminAuthError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response()
}
