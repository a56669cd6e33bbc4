use super::super::domain::{Gender, ItemScore, Measurement, TestItem};
use super::config::ScoringConfig;

/// BMI from height/weight, rounded to one decimal place.
///
/// Callers must have validated `height_cm > 0`; the guard rejects anything
/// else before evaluation starts.
pub fn compute_bmi(height_cm: f64, weight_kg: f64) -> f64 {
    let meters = height_cm / 100.0;
    let bmi = weight_kg / (meters * meters);
    (bmi * 10.0).round() / 10.0
}

/// Score a single test item on the 1..=5 scale.
///
/// `gender` is accepted but does not change the curve: the school applies the
/// same thresholds to every student. BMI is binary, scoring 4 inside the
/// healthy range (strict bounds on both ends) and 2 outside it; it never
/// yields 1, 3, or 5.
pub fn score_item(_gender: Gender, item: TestItem, raw_value: f64, config: &ScoringConfig) -> u8 {
    if item == TestItem::Bmi {
        return if raw_value > config.healthy_bmi_lower && raw_value < config.healthy_bmi_upper {
            4
        } else {
            2
        };
    }

    let stepped = (raw_value / config.step_width).floor() as i64;
    stepped.clamp(1, i64::from(config.max_score)) as u8
}

/// Score all five items in the fixed evaluation order.
pub(crate) fn score_measurement(
    measurement: &Measurement,
    config: &ScoringConfig,
) -> (Vec<ItemScore>, f64, u16) {
    let bmi = compute_bmi(measurement.height_cm, measurement.weight_kg);

    let items: Vec<ItemScore> = TestItem::ordered()
        .into_iter()
        .map(|item| {
            let raw_value = match item {
                TestItem::SitUps => f64::from(measurement.sit_ups),
                TestItem::Flexibility => measurement.flexibility_cm,
                TestItem::HandGrip => measurement.hand_grip_kg,
                TestItem::EnduranceRun => measurement.run_9min_m,
                TestItem::Bmi => bmi,
            };

            ItemScore {
                item,
                subject: item.label(),
                score: score_item(measurement.gender, item, raw_value, config),
                raw_value,
                unit: item.unit(),
            }
        })
        .collect();

    let total_score = items.iter().map(|entry| u16::from(entry.score)).sum();

    (items, bmi, total_score)
}
