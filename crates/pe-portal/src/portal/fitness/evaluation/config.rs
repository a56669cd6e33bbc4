use serde::{Deserialize, Serialize};

/// Threshold configuration backing the scoring rules.
///
/// The defaults reproduce the school's historical curve: every 5 units of a
/// raw measurement are worth one point, capped at 5 and floored at 1, and BMI
/// is a binary healthy/unhealthy check with strict bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub step_width: f64,
    pub max_score: u8,
    pub healthy_bmi_lower: f64,
    pub healthy_bmi_upper: f64,
    pub strong_threshold: u8,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            step_width: 5.0,
            max_score: 5,
            healthy_bmi_lower: 18.5,
            healthy_bmi_upper: 23.0,
            strong_threshold: 4,
        }
    }
}
