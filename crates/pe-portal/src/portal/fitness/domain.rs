use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for persisted fitness records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

/// Who produced the measurement. Class names follow the school's 1A..6B scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentIdentity {
    pub name: String,
    pub class: String,
    pub class_no: u16,
}

/// Raw per-student input to one fitness evaluation, already validated.
///
/// Flexibility may be negative per the sit-and-reach convention; everything
/// else is non-negative and height/weight strictly positive, enforced by
/// [`super::validation::MeasurementGuard`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub gender: Gender,
    pub sit_ups: u32,
    pub flexibility_cm: f64,
    pub hand_grip_kg: f64,
    pub run_9min_m: f64,
    pub height_cm: f64,
    pub weight_kg: f64,
}

/// Inbound submission before the validation boundary has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessSubmission {
    pub student: StudentIdentity,
    pub gender: Gender,
    pub sit_ups: u32,
    pub flexibility_cm: f64,
    pub hand_grip_kg: f64,
    pub run_9min_m: f64,
    pub height_cm: f64,
    pub weight_kg: f64,
}

/// The five scored test items, in the fixed evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestItem {
    SitUps,
    Flexibility,
    HandGrip,
    EnduranceRun,
    Bmi,
}

impl TestItem {
    /// Evaluation order is part of the contract: tie-breaks for best/worst
    /// resolve to the earlier item in this sequence.
    pub const fn ordered() -> [TestItem; 5] {
        [
            TestItem::SitUps,
            TestItem::Flexibility,
            TestItem::HandGrip,
            TestItem::EnduranceRun,
            TestItem::Bmi,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            TestItem::SitUps => "Sit-ups",
            TestItem::Flexibility => "Sit-and-reach",
            TestItem::HandGrip => "Hand grip",
            TestItem::EnduranceRun => "9-minute run",
            TestItem::Bmi => "BMI",
        }
    }

    pub const fn unit(self) -> &'static str {
        match self {
            TestItem::SitUps => "reps",
            TestItem::Flexibility => "cm",
            TestItem::HandGrip => "kg",
            TestItem::EnduranceRun => "m",
            TestItem::Bmi => "",
        }
    }
}

/// Score and supporting data for a single test item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemScore {
    pub item: TestItem,
    pub subject: &'static str,
    pub score: u8,
    pub raw_value: f64,
    pub unit: &'static str,
}

/// Full composite output of one evaluation. Value object, recomputed fresh
/// on every request, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub bmi: f64,
    pub items: Vec<ItemScore>,
    pub total_score: u16,
    pub best_item: ItemScore,
    pub worst_item: ItemScore,
    pub recommendations: Vec<String>,
}

/// Append-only record handed to the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitnessRecord {
    pub record_id: RecordId,
    pub student: StudentIdentity,
    pub measurement: Measurement,
    pub result: EvaluationResult,
    pub recorded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coach_comment: Option<String>,
}
