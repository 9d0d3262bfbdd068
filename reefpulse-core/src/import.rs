//! Tabular (CSV) import of test entries: a header row naming a date column and one column
//! per parameter, then one row per test.

use crate::error::ReefError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::{debug, warn};
use reefpulse_schemas::{
    reading::{Readings, TestEntry},
    tank::TankProfile,
};
use std::{fs, io, path::Path};

/// Columns that may hold the test date, in order of preference.
pub const DATE_COLUMNS: [&str; 3] = ["date", "test_date", "timestamp"];

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Parses a test date. Dates without an offset are taken as UTC.
pub fn parse_test_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    if let Some(naive) = DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(naive.and_utc());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Reads test entries from CSV data. `source` names the data in errors and logs.
///
/// Headers are matched case-insensitively; unknown columns and blank cells are ignored.
/// Rows whose date is missing or unparsable are dated `now`. Every entry takes the
/// given tank profile.
pub fn read_entries<R: io::Read>(
    source: &str,
    reader: R,
    profile: &TankProfile,
    now: DateTime<Utc>,
) -> Result<Vec<TestEntry>, ReefError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ReefError::CsvError(source.to_string(), e))?
        .iter()
        .map(str::to_lowercase)
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(ReefError::NoDataRows(source.to_string()));
    }

    let mut entries = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|e| ReefError::CsvError(source.to_string(), e))?;
        let readings = Readings::from_raw(
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.as_str(), record.get(i).unwrap_or(""))),
        );

        let raw_date = DATE_COLUMNS
            .iter()
            .filter_map(|column| headers.iter().position(|h| h == column))
            .filter_map(|i| record.get(i))
            .find(|value| !value.is_empty())
            .unwrap_or("");
        let date = match parse_test_date(raw_date) {
            Some(date) => date,
            None if raw_date.is_empty() => {
                debug!("{source}: row {} has no date, using the import time", row + 1);
                now
            }
            None => {
                warn!(
                    "{source}: row {} has unparsable date '{raw_date}', using the import time",
                    row + 1
                );
                now
            }
        };

        let mut entry = TestEntry::new(date, readings, profile);
        entry.id = now.timestamp_millis() + row as i64;
        entries.push(entry);
    }

    if entries.is_empty() {
        return Err(ReefError::NoDataRows(source.to_string()));
    }
    debug!("{source}: imported {} test entries", entries.len());
    Ok(entries)
}

/// Reads test entries from a CSV file.
pub fn read_entries_from_path(
    path: &Path,
    profile: &TankProfile,
    now: DateTime<Utc>,
) -> Result<Vec<TestEntry>, ReefError> {
    let label = path.display().to_string();
    let file = fs::File::open(path).map_err(|e| ReefError::FileIO(label.clone(), e))?;
    read_entries(&label, file, profile, now)
}
