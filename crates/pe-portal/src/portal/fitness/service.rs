use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::comment::{build_coach_prompt, CommentError, CommentGateway};
use super::domain::{FitnessRecord, FitnessSubmission, RecordId};
use super::evaluation::{ScoringConfig, ScoringEngine};
use super::repository::{FitnessRepository, RepositoryError};
use super::validation::{MeasurementError, MeasurementGuard};

/// Service composing the validation guard, scoring engine, repository, and
/// comment gateway.
pub struct FitnessService<R, G> {
    guard: MeasurementGuard,
    engine: Arc<ScoringEngine>,
    repository: Arc<R>,
    comments: Arc<G>,
}

static RECORD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_record_id() -> RecordId {
    let id = RECORD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    RecordId(format!("fit-{id:06}"))
}

impl<R, G> FitnessService<R, G>
where
    R: FitnessRepository + 'static,
    G: CommentGateway + 'static,
{
    pub fn new(repository: Arc<R>, comments: Arc<G>, config: ScoringConfig) -> Self {
        Self {
            guard: MeasurementGuard,
            engine: Arc::new(ScoringEngine::new(config)),
            repository,
            comments,
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Validate, evaluate, and persist one submission.
    pub fn submit(
        &self,
        submission: FitnessSubmission,
    ) -> Result<FitnessRecord, FitnessServiceError> {
        let (student, measurement) = self.guard.measurement_from_submission(submission)?;
        let result = self.engine.evaluate(&measurement);

        let record = FitnessRecord {
            record_id: next_record_id(),
            student,
            measurement,
            result,
            recorded_at: Utc::now(),
            coach_comment: None,
        };

        let stored = self.repository.insert(record)?;
        info!(
            record_id = %stored.record_id.0,
            total_score = stored.result.total_score,
            "fitness record stored"
        );
        Ok(stored)
    }

    /// Fetch a stored record for API responses.
    pub fn get(&self, id: &RecordId) -> Result<FitnessRecord, FitnessServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// All stored records, newest first.
    pub fn list(&self) -> Result<Vec<FitnessRecord>, FitnessServiceError> {
        Ok(self.repository.list()?)
    }

    /// Generate the AI coach comment for a stored record and attach it.
    ///
    /// A gateway failure leaves the stored evaluation untouched; callers can
    /// retry without re-submitting the measurement.
    pub fn coach_comment(&self, id: &RecordId) -> Result<String, FitnessServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;

        if let Some(existing) = record.coach_comment {
            return Ok(existing);
        }

        let prompt = build_coach_prompt(&record, self.engine.config());
        let comment = self.comments.generate(&prompt)?;
        self.repository.attach_comment(id, &comment)?;
        Ok(comment)
    }
}

/// Error raised by the fitness service.
#[derive(Debug, thiserror::Error)]
pub enum FitnessServiceError {
    #[error(transparent)]
    Measurement(#[from] MeasurementError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Comment(#[from] CommentError),
}
