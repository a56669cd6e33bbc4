use super::domain::FitnessRecord;

/// Content type served alongside the exported report.
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

// Excel needs the BOM to pick up UTF-8; the original export carried it too.
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

const HEADER: [&str; 11] = [
    "Date",
    "Class",
    "Class No",
    "Name",
    "Gender",
    "Sit-ups",
    "Sit-and-reach (cm)",
    "Hand grip (kg)",
    "9-minute run (m)",
    "BMI",
    "Total score",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write csv row: {0}")]
    Write(#[from] csv::Error),
    #[error("failed to finish csv buffer: {0}")]
    Finish(String),
}

/// Render all fitness records as a CSV report, newest first as given.
pub fn records_to_csv(records: &[FitnessRecord]) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::with_capacity(UTF8_BOM.len() + records.len() * 64);
    buffer.extend_from_slice(&UTF8_BOM);

    let mut writer = csv::Writer::from_writer(buffer);
    writer.write_record(HEADER)?;

    for record in records {
        writer.write_record([
            record.recorded_at.format("%Y-%m-%d").to_string(),
            record.student.class.clone(),
            record.student.class_no.to_string(),
            record.student.name.clone(),
            record.measurement.gender.label().to_string(),
            record.measurement.sit_ups.to_string(),
            record.measurement.flexibility_cm.to_string(),
            record.measurement.hand_grip_kg.to_string(),
            record.measurement.run_9min_m.to_string(),
            record.result.bmi.to_string(),
            record.result.total_score.to_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|err| ExportError::Finish(err.to_string()))
}

/// Suggested download filename, dated like the original export.
pub fn export_filename(date: chrono::NaiveDate) -> String {
    format!("fitness_report_{}.csv", date.format("%Y-%m-%d"))
}
