//! Per-record outcomes reported by the asset store

use serde::{Deserialize, Serialize};

/// What the asset store did with one submitted record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordAction {
    /// New asset created
    Created,
    /// Tag already exists in the store (cross-run duplicate)
    Skipped,
    /// Store-side validation rejected the record
    Failed,
}

impl std::fmt::Display for RecordAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordAction::Created => write!(f, "created"),
            RecordAction::Skipped => write!(f, "skipped"),
            RecordAction::Failed => write!(f, "failed"),
        }
    }
}

/// Outcome for a single submitted record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportBatchResult {
    pub asset_tag_id: String,
    pub action: RecordAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ImportBatchResult {
    pub fn created(asset_tag_id: impl Into<String>) -> Self {
        Self {
            asset_tag_id: asset_tag_id.into(),
            action: RecordAction::Created,
            reason: None,
        }
    }

    pub fn skipped(asset_tag_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            asset_tag_id: asset_tag_id.into(),
            action: RecordAction::Skipped,
            reason: Some(reason.into()),
        }
    }

    pub fn failed(asset_tag_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            asset_tag_id: asset_tag_id.into(),
            action: RecordAction::Failed,
            reason: Some(reason.into()),
        }
    }
}

/// Created/skipped/failed tallies over a result list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionCounts {
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl ActionCounts {
    pub fn tally(results: &[ImportBatchResult]) -> Self {
        results.iter().fold(Self::default(), |mut acc, r| {
            match r.action {
                RecordAction::Created => acc.created += 1,
                RecordAction::Skipped => acc.skipped += 1,
                RecordAction::Failed => acc.failed += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.created + self.skipped + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let parsed: ImportBatchResult = serde_json::from_str(
            r#"{"assetTagId":"A-1","action":"skipped","reason":"already exists"}"#,
        )
        .unwrap();
        assert_eq!(parsed, ImportBatchResult::skipped("A-1", "already exists"));

        let parsed: ImportBatchResult =
            serde_json::from_str(r#"{"assetTagId":"A-2","action":"created"}"#).unwrap();
        assert_eq!(parsed.reason, None);
    }

    #[test]
    fn test_tally() {
        let results = vec![
            ImportBatchResult::created("A"),
            ImportBatchResult::created("B"),
            ImportBatchResult::skipped("C", "exists"),
            ImportBatchResult::failed("D", "bad category"),
        ];
        let counts = ActionCounts::tally(&results);
        assert_eq!(counts.created, 2);
        assert_eq!(counts.skipped, 1);
        assert_eq!(counts.failed, 1);
        assert_eq!(counts.total(), 4);
    }
}
