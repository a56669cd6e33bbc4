use serde::Serialize;

use super::domain::{FitnessRecord, RecordId};
use super::evaluation::BadgeView;

/// Storage abstraction so the service module can be exercised in isolation.
///
/// Records are append-only: `insert` never replaces, and the only update is
/// attaching a generated coach comment to an existing record.
pub trait FitnessRepository: Send + Sync {
    fn insert(&self, record: FitnessRecord) -> Result<FitnessRecord, RepositoryError>;
    fn attach_comment(&self, id: &RecordId, comment: &str) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &RecordId) -> Result<Option<FitnessRecord>, RepositoryError>;
    /// All records, newest first.
    fn list(&self) -> Result<Vec<FitnessRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized representation of a stored evaluation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct RecordView {
    pub record_id: RecordId,
    pub student_name: String,
    pub class: String,
    pub bmi: f64,
    pub total_score: u16,
    pub badges: Vec<BadgeView>,
    pub best_item: &'static str,
    pub worst_item: &'static str,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coach_comment: Option<String>,
}

impl RecordView {
    pub fn from_record(record: &FitnessRecord) -> Self {
        Self {
            record_id: record.record_id.clone(),
            student_name: record.student.name.clone(),
            class: record.student.class.clone(),
            bmi: record.result.bmi,
            total_score: record.result.total_score,
            badges: record.result.items.iter().map(BadgeView::for_item).collect(),
            best_item: record.result.best_item.subject,
            worst_item: record.result.worst_item.subject,
            recommendations: record.result.recommendations.clone(),
            coach_comment: record.coach_comment.clone(),
        }
    }
}
