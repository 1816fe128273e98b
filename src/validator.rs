use chrono::Utc;
use thiserror::Error;

use crate::run::Run;

/// Rejection raised when the add-run form holds unusable input. Always
/// recoverable: the user corrects the fields and resubmits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("enter a positive distance in km and a whole number of seconds")]
    InvalidInput,
}

/// Builds a new run record from the raw form fields.
///
/// Distance must parse as a finite number of kilometers, time as a whole
/// number of seconds, and both must be positive. Zero and negative values
/// are rejected up front; the sorter and formatters stay tolerant of
/// out-of-range records that arrive from old data files.
pub fn validate(distance_input: &str, time_input: &str) -> Result<Run, ValidationError> {
    let distance = distance_input
        .trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidInput)?;
    let time = time_input
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidInput)?;

    if !distance.is_finite() || distance <= 0.0 || time <= 0 {
        return Err(ValidationError::InvalidInput);
    }

    Ok(Run::new(next_run_id(), distance, time as f64))
}

/// Creation-time identifier with millisecond resolution. Collisions are
/// not a practical concern for a single-device log.
pub fn next_run_id() -> String {
    Utc::now().timestamp_millis().to_string()
}
