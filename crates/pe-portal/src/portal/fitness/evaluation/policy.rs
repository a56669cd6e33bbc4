use super::super::domain::{ItemScore, TestItem};
use super::config::ScoringConfig;
use serde::{Deserialize, Serialize};

/// Four-level badge classification derived from an item's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTier {
    Gold,
    Silver,
    Bronze,
    Base,
}

impl BadgeTier {
    pub const fn label(self) -> &'static str {
        match self {
            BadgeTier::Gold => "gold",
            BadgeTier::Silver => "silver",
            BadgeTier::Bronze => "bronze",
            BadgeTier::Base => "base",
        }
    }

    /// Hex tokens carried over from the site's medal palette.
    pub const fn color(self) -> &'static str {
        match self {
            BadgeTier::Gold => "#fbbf24",
            BadgeTier::Silver => "#94a3b8",
            BadgeTier::Bronze => "#b45309",
            BadgeTier::Base => "#475569",
        }
    }
}

/// Step function from score to tier. No interpolation.
pub fn badge_tier_for(score: u8) -> BadgeTier {
    if score >= 5 {
        BadgeTier::Gold
    } else if score >= 4 {
        BadgeTier::Silver
    } else if score >= 3 {
        BadgeTier::Bronze
    } else {
        BadgeTier::Base
    }
}

/// Team suggestions for every item at or above the strong threshold.
///
/// BMI is never a recommendation source. Duplicates are removed while
/// preserving first-encountered order across the fixed item sequence.
pub(crate) fn team_recommendations(items: &[ItemScore], config: &ScoringConfig) -> Vec<String> {
    let mut recommendations: Vec<String> = Vec::new();

    for entry in items {
        if entry.score < config.strong_threshold {
            continue;
        }

        let suggestion = match entry.item {
            TestItem::SitUps => Some("Soccer team (core strength)"),
            TestItem::Flexibility => Some("Squash team (flexibility)"),
            TestItem::HandGrip => Some("Table tennis team (explosive power)"),
            TestItem::EnduranceRun => Some("Swimming / track team (endurance)"),
            TestItem::Bmi => None,
        };

        if let Some(team) = suggestion {
            if !recommendations.iter().any(|existing| existing == team) {
                recommendations.push(team.to_string());
            }
        }
    }

    recommendations
}
