use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::portal::fitness::comment::{CommentError, CommentGateway};
use crate::portal::fitness::domain::{
    FitnessRecord, FitnessSubmission, Gender, RecordId, StudentIdentity,
};
use crate::portal::fitness::evaluation::ScoringConfig;
use crate::portal::fitness::repository::{FitnessRepository, RepositoryError};
use crate::portal::fitness::service::FitnessService;

/// The worked example from the scoring contract: four strong items, BMI 17.8.
pub(super) fn submission() -> FitnessSubmission {
    FitnessSubmission {
        student: StudentIdentity {
            name: "Chan Tai-man".to_string(),
            class: "6A".to_string(),
            class_no: 12,
        },
        gender: Gender::Male,
        sit_ups: 30,
        flexibility_cm: 20.0,
        hand_grip_kg: 25.0,
        run_9min_m: 1400.0,
        height_cm: 150.0,
        weight_kg: 40.0,
    }
}

pub(super) fn scoring_config() -> ScoringConfig {
    ScoringConfig::default()
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<HashMap<RecordId, FitnessRecord>>,
}

impl FitnessRepository for MemoryRepository {
    fn insert(&self, record: FitnessRecord) -> Result<FitnessRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.record_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.record_id.clone(), record.clone());
        Ok(record)
    }

    fn attach_comment(&self, id: &RecordId, comment: &str) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        record.coach_comment = Some(comment.to_string());
        Ok(())
    }

    fn fetch(&self, id: &RecordId) -> Result<Option<FitnessRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<FitnessRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<FitnessRecord> = guard.values().cloned().collect();
        records.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(records)
    }
}

/// Repository that always reports an outage.
pub(super) struct UnavailableRepository;

impl FitnessRepository for UnavailableRepository {
    fn insert(&self, _record: FitnessRecord) -> Result<FitnessRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".to_string()))
    }

    fn attach_comment(&self, _id: &RecordId, _comment: &str) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".to_string()))
    }

    fn fetch(&self, _id: &RecordId) -> Result<Option<FitnessRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".to_string()))
    }

    fn list(&self) -> Result<Vec<FitnessRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".to_string()))
    }
}

/// Gateway recording every prompt and answering with a canned comment.
#[derive(Default)]
pub(super) struct MemoryComments {
    pub(super) prompts: Mutex<Vec<String>>,
}

impl CommentGateway for MemoryComments {
    fn generate(&self, prompt: &str) -> Result<String, CommentError> {
        let mut guard = self.prompts.lock().expect("comments mutex poisoned");
        guard.push(prompt.to_string());
        Ok("Great effort! Keep stretching daily and try out for the soccer team.".to_string())
    }
}

/// Gateway simulating a network outage.
pub(super) struct OfflineComments;

impl CommentGateway for OfflineComments {
    fn generate(&self, _prompt: &str) -> Result<String, CommentError> {
        Err(CommentError::Transport("connection refused".to_string()))
    }
}

pub(super) fn build_service() -> (
    Arc<FitnessService<MemoryRepository, MemoryComments>>,
    Arc<MemoryRepository>,
    Arc<MemoryComments>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let comments = Arc::new(MemoryComments::default());
    let service = Arc::new(FitnessService::new(
        Arc::clone(&repository),
        Arc::clone(&comments),
        scoring_config(),
    ));
    (service, repository, comments)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is json")
}
