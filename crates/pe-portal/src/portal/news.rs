//! Department news feed: the public landing-page list.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// One announcement on the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsPost {
    pub id: String,
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
}

/// Draft submitted from the teacher console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsDraft {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

pub trait NewsRepository: Send + Sync {
    fn insert(&self, post: NewsPost) -> Result<NewsPost, NewsError>;
    /// All posts, newest date first.
    fn list(&self) -> Result<Vec<NewsPost>, NewsError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NewsError {
    #[error("news draft is missing a title or content")]
    EmptyDraft,
    #[error("news store unavailable: {0}")]
    Unavailable(String),
}

pub struct NewsService<R> {
    repository: Arc<R>,
}

impl<R> NewsService<R>
where
    R: NewsRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn list(&self) -> Result<Vec<NewsPost>, NewsError> {
        self.repository.list()
    }

    pub fn publish(&self, draft: NewsDraft, today: NaiveDate) -> Result<NewsPost, NewsError> {
        if draft.title.trim().is_empty() || draft.content.trim().is_empty() {
            return Err(NewsError::EmptyDraft);
        }

        let date = draft.date.unwrap_or(today);
        let post = NewsPost {
            id: format!("news-{}-{}", date.format("%Y%m%d"), slug(&draft.title)),
            title: draft.title,
            content: draft.content,
            date,
        };
        self.repository.insert(post)
    }
}

fn slug(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .take(32)
        .collect()
}

/// Public read-only feed; publishing goes through the admin router.
pub fn news_router<R>(service: Arc<NewsService<R>>) -> Router
where
    R: NewsRepository + 'static,
{
    Router::new()
        .route("/api/v1/news", get(list_handler::<R>))
        .with_state(service)
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<NewsService<R>>>,
) -> impl IntoResponse
where
    R: NewsRepository + 'static,
{
    match service.list() {
        Ok(posts) => (StatusCode::OK, axum::Json(json!({ "news": posts }))),
        Err(error) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(json!({ "error": error.to_string() })),
        ),
    }
}
