//! Fitness-test intake, scoring, persistence, and AI coach commentary.
//!
//! The scoring engine is the one piece of the portal with real design
//! content: a pure mapping from raw measurements to per-item scores, badge
//! tiers, and team recommendations. Everything around it follows the same
//! guard/engine/repository/service split as the rest of the codebase.

pub mod comment;
pub mod domain;
pub mod evaluation;
pub mod export;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use comment::{build_coach_prompt, CommentError, CommentGateway, OpenRouterClient};
pub use domain::{
    EvaluationResult, FitnessRecord, FitnessSubmission, Gender, ItemScore, Measurement, RecordId,
    StudentIdentity, TestItem,
};
pub use evaluation::{badge_tier_for, compute_bmi, score_item, BadgeTier, BadgeView, ScoringConfig,
    ScoringEngine};
pub use export::{export_filename, records_to_csv, ExportError, CSV_CONTENT_TYPE};
pub use repository::{FitnessRepository, RecordView, RepositoryError};
pub use router::fitness_router;
pub use service::{FitnessService, FitnessServiceError};
pub use validation::{MeasurementError, MeasurementGuard};
