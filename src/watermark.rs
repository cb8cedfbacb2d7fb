//! Watermark date persistence.
//!
//! The watermark file holds a single `YYYY-MM-DD` date: the day of the last
//! completed batch run. Only files modified strictly after this day qualify
//! for the next run. A missing or empty file reads as the epoch date, which
//! predates any real asset, so a first run considers every file.

use crate::error::PrepError;
use chrono::NaiveDate;
use std::io::ErrorKind;
use std::path::Path;

/// Date format used in the watermark file.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Watermark used when no previous run is recorded.
/// `NaiveDate::default()` is 1970-01-01.
pub fn epoch() -> NaiveDate {
    NaiveDate::default()
}

/// Read the watermark date from `path`.
///
/// A missing file, an empty file, or an unparseable date all fall back to
/// the epoch (the unparseable case with a warning). Any other I/O failure
/// is an error.
pub fn read(path: &Path) -> Result<NaiveDate, PrepError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(epoch()),
        Err(e) => {
            return Err(PrepError::WatermarkRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        }
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(epoch());
    }

    match NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        Ok(date) => Ok(date),
        Err(e) => {
            tracing::warn!(
                "Ignoring unparseable watermark {:?} in {}: {}",
                trimmed,
                path.display(),
                e
            );
            Ok(epoch())
        }
    }
}

/// Write `date` to the watermark file at `path`, replacing any previous
/// content.
pub fn write(path: &Path, date: NaiveDate) -> Result<(), PrepError> {
    std::fs::write(path, date.format(DATE_FORMAT).to_string())
        .map_err(|e| PrepError::WatermarkWrite(format!("{}: {}", path.display(), e)))
}
