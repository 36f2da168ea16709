//! Import history entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ActionCounts;

/// Overall status of one import attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStatus {
    Success,
    Partial,
    Failed,
}

impl ImportStatus {
    /// Derive the status of a run where every chunk was submitted
    ///
    /// - any failed record makes the run `Partial`
    /// - otherwise at least one created or skipped record makes it `Success`
    ///   (re-importing a file whose tags all exist is a success)
    /// - a run that neither created nor skipped anything is `Failed`
    pub fn from_counts(counts: &ActionCounts) -> Self {
        if counts.failed > 0 {
            ImportStatus::Partial
        } else if counts.created > 0 || counts.skipped > 0 {
            ImportStatus::Success
        } else {
            ImportStatus::Failed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImportStatus::Success => "success",
            ImportStatus::Partial => "partial",
            ImportStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ImportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "success" => Ok(ImportStatus::Success),
            "partial" => Ok(ImportStatus::Partial),
            "failed" => Ok(ImportStatus::Failed),
            other => Err(format!(
                "Unknown import status '{}' (expected success, partial or failed)",
                other
            )),
        }
    }
}

/// Persisted summary of one import attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportHistoryEntry {
    /// Correlates the entry with the run's log lines
    pub run_id: Uuid,
    pub file_name: String,
    pub file_size: u64,
    pub records_processed: Option<u32>,
    pub records_created: Option<u32>,
    pub records_skipped: Option<u32>,
    pub records_failed: Option<u32>,
    pub status: ImportStatus,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ImportHistoryEntry {
    /// Entry for a run where every chunk was submitted
    pub fn completed(
        run_id: Uuid,
        file_name: impl Into<String>,
        file_size: u64,
        processed: usize,
        counts: &ActionCounts,
    ) -> Self {
        Self {
            run_id,
            file_name: file_name.into(),
            file_size,
            records_processed: Some(processed as u32),
            records_created: Some(counts.created as u32),
            records_skipped: Some(counts.skipped as u32),
            records_failed: Some(counts.failed as u32),
            status: ImportStatus::from_counts(counts),
            error_message: None,
            created_at: Utc::now(),
        }
    }

    /// Entry for a run that aborted; counts are unknown
    pub fn aborted(
        run_id: Uuid,
        file_name: impl Into<String>,
        file_size: u64,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            run_id,
            file_name: file_name.into(),
            file_size,
            records_processed: None,
            records_created: None,
            records_skipped: None,
            records_failed: None,
            status: ImportStatus::Failed,
            error_message: Some(error_message.into()),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(created: usize, skipped: usize, failed: usize) -> ActionCounts {
        ActionCounts {
            created,
            skipped,
            failed,
        }
    }

    #[test]
    fn test_status_rules() {
        assert_eq!(ImportStatus::from_counts(&counts(3, 0, 0)), ImportStatus::Success);
        assert_eq!(ImportStatus::from_counts(&counts(3, 1, 1)), ImportStatus::Partial);
        assert_eq!(ImportStatus::from_counts(&counts(0, 0, 2)), ImportStatus::Partial);
        assert_eq!(ImportStatus::from_counts(&counts(0, 0, 0)), ImportStatus::Failed);
    }

    #[test]
    fn test_all_skipped_is_success() {
        assert_eq!(ImportStatus::from_counts(&counts(0, 5, 0)), ImportStatus::Success);
    }

    #[test]
    fn test_completed_entry_counts_add_up() {
        let entry = ImportHistoryEntry::completed(Uuid::new_v4(), "assets.xlsx", 2048, 4, &counts(2, 1, 1));
        assert_eq!(entry.status, ImportStatus::Partial);
        let sum = entry.records_created.unwrap()
            + entry.records_skipped.unwrap()
            + entry.records_failed.unwrap();
        assert_eq!(Some(sum), entry.records_processed);
        assert!(entry.error_message.is_none());
    }

    #[test]
    fn test_aborted_entry_has_no_counts() {
        let entry = ImportHistoryEntry::aborted(Uuid::new_v4(), "assets.csv", 10, "boom");
        assert_eq!(entry.status, ImportStatus::Failed);
        assert_eq!(entry.records_processed, None);
        assert_eq!(entry.records_created, None);
        assert_eq!(entry.error_message.as_deref(), Some("boom"));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("Partial".parse::<ImportStatus>(), Ok(ImportStatus::Partial));
        assert!("done".parse::<ImportStatus>().is_err());
    }
}
