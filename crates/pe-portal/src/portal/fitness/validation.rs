use super::domain::{FitnessSubmission, Measurement, StudentIdentity};

/// Validation errors raised before any score is computed.
///
/// The engine assumes finite, in-range numbers; this guard is the explicit
/// boundary that replaces the original site's silent `Infinity`/`NaN`
/// propagation into badge rendering.
#[derive(Debug, thiserror::Error)]
pub enum MeasurementError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("height must be greater than zero (got {found})")]
    NonPositiveHeight { found: f64 },
    #[error("weight must be greater than zero (got {found})")]
    NonPositiveWeight { found: f64 },
    #[error("{field} must not be negative (got {found})")]
    Negative { field: &'static str, found: f64 },
    #[error("student name must not be empty")]
    MissingName,
    #[error("class number must be greater than zero")]
    MissingClassNo,
}

/// Guard responsible for producing validated [`Measurement`] values.
#[derive(Debug, Clone, Default)]
pub struct MeasurementGuard;

impl MeasurementGuard {
    /// Convert an inbound submission into identity plus a validated measurement.
    pub fn measurement_from_submission(
        &self,
        submission: FitnessSubmission,
    ) -> Result<(StudentIdentity, Measurement), MeasurementError> {
        let FitnessSubmission {
            student,
            gender,
            sit_ups,
            flexibility_cm,
            hand_grip_kg,
            run_9min_m,
            height_cm,
            weight_kg,
        } = submission;

        if student.name.trim().is_empty() {
            return Err(MeasurementError::MissingName);
        }
        if student.class_no == 0 {
            return Err(MeasurementError::MissingClassNo);
        }

        require_finite("flexibility_cm", flexibility_cm)?;
        require_finite("hand_grip_kg", hand_grip_kg)?;
        require_finite("run_9min_m", run_9min_m)?;
        require_finite("height_cm", height_cm)?;
        require_finite("weight_kg", weight_kg)?;

        if height_cm <= 0.0 {
            return Err(MeasurementError::NonPositiveHeight { found: height_cm });
        }
        if weight_kg <= 0.0 {
            return Err(MeasurementError::NonPositiveWeight { found: weight_kg });
        }
        if hand_grip_kg < 0.0 {
            return Err(MeasurementError::Negative {
                field: "hand_grip_kg",
                found: hand_grip_kg,
            });
        }
        if run_9min_m < 0.0 {
            return Err(MeasurementError::Negative {
                field: "run_9min_m",
                found: run_9min_m,
            });
        }

        let measurement = Measurement {
            gender,
            sit_ups,
            flexibility_cm,
            hand_grip_kg,
            run_9min_m,
            height_cm,
            weight_kg,
        };

        Ok((student, measurement))
    }
}

fn require_finite(field: &'static str, value: f64) -> Result<(), MeasurementError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MeasurementError::NonFinite { field })
    }
}
