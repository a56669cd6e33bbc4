mod config;
mod policy;
mod rules;

pub use config::ScoringConfig;
pub use policy::{badge_tier_for, BadgeTier};
pub use rules::{compute_bmi, score_item};

use super::domain::{EvaluationResult, ItemScore, Measurement};

/// Stateless engine applying the threshold configuration to a measurement.
///
/// Every call is a single-shot, synchronous computation over its own input;
/// the engine performs no I/O and keeps no state between calls, so it is safe
/// to share across arbitrarily many callers.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Compute the five item scores, composite best/worst, and team
    /// recommendations for an already-validated measurement.
    pub fn evaluate(&self, measurement: &Measurement) -> EvaluationResult {
        let (items, bmi, total_score) = rules::score_measurement(measurement, &self.config);

        // Reduce-left with strict comparison: the first maximal (minimal)
        // entry in the fixed item order wins ties.
        let best_item = items
            .iter()
            .skip(1)
            .fold(&items[0], |best, entry| {
                if entry.score > best.score {
                    entry
                } else {
                    best
                }
            })
            .clone();
        let worst_item = items
            .iter()
            .skip(1)
            .fold(&items[0], |worst, entry| {
                if entry.score < worst.score {
                    entry
                } else {
                    worst
                }
            })
            .clone();

        let recommendations = policy::team_recommendations(&items, &self.config);

        EvaluationResult {
            bmi,
            items,
            total_score,
            best_item,
            worst_item,
            recommendations,
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

/// Convenience view pairing an item score with its badge tier for rendering.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BadgeView {
    pub subject: &'static str,
    pub score: u8,
    pub tier: BadgeTier,
    pub color: &'static str,
}

impl BadgeView {
    pub fn for_item(entry: &ItemScore) -> Self {
        let tier = badge_tier_for(entry.score);
        Self {
            subject: entry.subject,
            score: entry.score,
            tier,
            color: tier.color(),
        }
    }
}
