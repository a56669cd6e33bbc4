//! Student-athlete showcase, filterable by school year.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarProfile {
    /// Stable identifier; generated server-side when a draft omits it.
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub team: String,
    pub award: String,
    /// School-year label, e.g. "2025-2026".
    pub school_year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

pub trait StarsRepository: Send + Sync {
    fn insert(&self, star: StarProfile) -> Result<StarProfile, StarsError>;
    fn list(&self) -> Result<Vec<StarProfile>, StarsError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StarsError {
    #[error("stars store unavailable: {0}")]
    Unavailable(String),
}

pub struct StarsService<R> {
    repository: Arc<R>,
}

impl<R> StarsService<R>
where
    R: StarsRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn add(&self, star: StarProfile) -> Result<StarProfile, StarsError> {
        self.repository.insert(star)
    }

    /// Showcase for one school year; the filter is client-visible state in
    /// the original, so the default year lives with the caller.
    pub fn for_year(&self, school_year: &str) -> Result<Vec<StarProfile>, StarsError> {
        let stars = self.repository.list()?;
        Ok(stars
            .into_iter()
            .filter(|star| star.school_year == school_year)
            .collect())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StarsQuery {
    #[serde(default = "default_school_year")]
    year: String,
}

fn default_school_year() -> String {
    "2025-2026".to_string()
}

pub fn stars_router<R>(service: Arc<StarsService<R>>) -> Router
where
    R: StarsRepository + 'static,
{
    Router::new()
        .route("/api/v1/stars", get(list_handler::<R>))
        .with_state(service)
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<StarsService<R>>>,
    Query(query): Query<StarsQuery>,
) -> impl IntoResponse
where
    R: StarsRepository + 'static,
{
    match service.for_year(&query.year) {
        Ok(stars) => (
            StatusCode::OK,
            axum::Json(json!({ "year": query.year, "stars": stars })),
        ),
        Err(error) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(json!({ "error": error.to_string() })),
        ),
    }
}
