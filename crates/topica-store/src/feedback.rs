//! Append-only CSV log of prediction outcomes.
//!
//! One file, fixed four-column schema, header written exactly once when the
//! file is created. Rows are appended in insertion order and never rewritten,
//! so everything before the appended tail stays byte-for-byte unchanged.

use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::StoreError;

/// Column schema of the feedback log, stable across appends.
pub const COLUMNS: [&str; 4] = ["timestamp", "text", "predicted_label", "actual_label"];

/// One logged outcome of a user-confirmed or user-corrected prediction.
///
/// `actual_label` equals `predicted_label` when the user confirmed the
/// prediction, and holds the user's chosen label when they corrected it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// Capture time, assigned when the record is written.
    pub timestamp: DateTime<Utc>,
    pub text: String,
    pub predicted_label: String,
    pub actual_label: String,
}

/// The feedback log.
///
/// Records are immutable once written — the store only ever appends.
/// Single-writer access is assumed; there is no locking discipline on the
/// file.
pub struct FeedbackLog {
    path: PathBuf,
}

impl FeedbackLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, assigning the timestamp at write time.
    ///
    /// A log that does not exist yet (or is empty) gets the header row first;
    /// otherwise the row lands under the existing header. Returns the record
    /// as written. I/O failures surface to the caller — there is no retry.
    pub fn append(
        &self,
        text: &str,
        predicted_label: &str,
        actual_label: &str,
    ) -> Result<FeedbackRecord, StoreError> {
        let record = FeedbackRecord {
            timestamp: Utc::now(),
            text: text.to_string(),
            predicted_label: predicted_label.to_string(),
            actual_label: actual_label.to_string(),
        };

        let write_header = match std::fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer.serialize(&record)?;
        writer.flush().map_err(StoreError::Io)?;

        info!(path = %self.path.display(), "appended feedback record");
        Ok(record)
    }

    /// All records in insertion order.
    ///
    /// A missing file reads as an empty log; any other failure is an error.
    pub fn read_all(&self) -> Result<Vec<FeedbackRecord>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::Reader::from_reader(file);
        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        Ok(records)
    }

    /// Number of records in the log (excluding the header).
    pub fn count(&self) -> Result<usize, StoreError> {
        Ok(self.read_all()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_log() -> (tempfile::TempDir, FeedbackLog) {
        let tmp = tempfile::TempDir::new().unwrap();
        let log = FeedbackLog::new(tmp.path().join("user_feedback.csv"));
        (tmp, log)
    }

    #[test]
    fn missing_file_reads_as_empty_log() {
        let (_tmp, log) = temp_log();
        assert!(!log.path().exists());
        assert!(log.read_all().unwrap().is_empty());
        assert_eq!(log.count().unwrap(), 0);
    }

    #[test]
    fn first_append_creates_header_and_one_row() {
        let (_tmp, log) = temp_log();
        log.append("city budget assembly", "Budgeting & Financial Planning", "Budgeting & Financial Planning")
            .unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2, "header plus one record");
        assert_eq!(lines[0], COLUMNS.join(","));
        assert_eq!(log.count().unwrap(), 1);
    }

    #[test]
    fn appends_accumulate_in_order() {
        let (_tmp, log) = temp_log();
        for i in 0..5 {
            log.append(&format!("event {i}"), "Environmental Policies", "Environmental Policies")
                .unwrap();
        }

        let records = log.read_all().unwrap();
        assert_eq!(records.len(), 5);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.text, format!("event {i}"));
        }

        // Exactly one header regardless of append count.
        let content = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(content.lines().count(), 6);
        assert_eq!(content.matches("predicted_label").count(), 1);
    }

    #[test]
    fn append_leaves_prior_bytes_unchanged() {
        let (_tmp, log) = temp_log();
        log.append("first", "Housing & Infrastructure", "Housing & Infrastructure")
            .unwrap();
        log.append("second", "Environmental Policies", "Healthcare & Public Services")
            .unwrap();
        let before = std::fs::read_to_string(log.path()).unwrap();

        log.append("third", "Arts, Culture & Media", "Arts, Culture & Media")
            .unwrap();
        let after = std::fs::read_to_string(log.path()).unwrap();

        assert!(after.starts_with(&before));
        assert_eq!(log.count().unwrap(), 3);
    }

    #[test]
    fn confirmation_stores_predicted_as_actual() {
        let (_tmp, log) = temp_log();
        let predicted = "Healthcare & Public Services";
        let record = log.append("free clinic consultation", predicted, predicted).unwrap();
        assert_eq!(record.predicted_label, record.actual_label);

        let reread = log.read_all().unwrap();
        assert_eq!(reread[0].predicted_label, predicted);
        assert_eq!(reread[0].actual_label, predicted);
    }

    #[test]
    fn correction_stores_user_label_independently() {
        let (_tmp, log) = temp_log();
        let record = log
            .append("school strike for climate", "Education & Student Engagement", "Environmental Policies")
            .unwrap();
        assert_eq!(record.predicted_label, "Education & Student Engagement");
        assert_eq!(record.actual_label, "Environmental Policies");
    }

    #[test]
    fn text_with_delimiters_round_trips() {
        let (_tmp, log) = temp_log();
        let text = "a \"quoted\" phrase, two commas, and\na newline";
        log.append(text, "Social & Community Issues", "Social & Community Issues")
            .unwrap();

        let records = log.read_all().unwrap();
        assert_eq!(records[0].text, text);
    }

    #[test]
    fn timestamp_is_assigned_at_write_time() {
        let (_tmp, log) = temp_log();
        let before = Utc::now();
        let record = log.append("event", "Environmental Policies", "Environmental Policies").unwrap();
        let after = Utc::now();
        assert!(record.timestamp >= before && record.timestamp <= after);

        // And it survives the round trip through the file.
        let reread = log.read_all().unwrap();
        assert_eq!(reread[0].timestamp, record.timestamp);
    }

    #[test]
    fn propagates_io_failure() {
        let tmp = tempfile::TempDir::new().unwrap();
        // The log path is a directory: opening it as a file must fail loudly.
        let log = FeedbackLog::new(tmp.path());
        assert!(matches!(
            log.append("x", "Unknown", "Unknown"),
            Err(StoreError::Io(_))
        ));
    }
}
