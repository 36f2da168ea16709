//! Collaborator interfaces the pipeline calls into
//!
//! The asset store owns asset persistence and cross-run duplicate detection;
//! the history store keeps one summary row per import attempt.

use async_trait::async_trait;

use super::{CanonicalAssetRecord, ImportBatchResult, ImportHistoryEntry};

/// Message used when the store gives no structured error
pub const GENERIC_NETWORK_ERROR: &str =
    "Network error: could not reach the asset service. Check your connection and try again.";

/// Systemic failure of an asset store call
///
/// Per-record problems are never reported this way; they come back inside
/// the result list as `skipped` or `failed` outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Request never produced a response
    Transport(String),
    /// Response had a non-success status
    Status { code: u16, message: Option<String> },
    /// Response could not be understood
    InvalidResponse(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Transport(detail) => {
                write!(f, "{} ({})", GENERIC_NETWORK_ERROR, detail)
            }
            StoreError::Status {
                message: Some(message),
                ..
            } => write!(f, "{}", message),
            StoreError::Status { code, message: None } => {
                write!(f, "{} (HTTP {})", GENERIC_NETWORK_ERROR, code)
            }
            StoreError::InvalidResponse(detail) => {
                write!(f, "Unexpected response from the asset service: {}", detail)
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Asset persistence backend
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Create a batch of assets, one result per record in input order
    ///
    /// Returns `Err` only for systemic failures.
    async fn bulk_create(
        &self,
        records: &[CanonicalAssetRecord],
    ) -> Result<Vec<ImportBatchResult>, StoreError>;

    /// Check whether an asset tag is already taken
    async fn exists(&self, asset_tag_id: &str) -> Result<bool, StoreError>;
}

/// Import history backend
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn record(&self, entry: &ImportHistoryEntry) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_prefers_store_message() {
        let err = StoreError::Status {
            code: 400,
            message: Some("Category 'Vehicles' does not exist".into()),
        };
        assert_eq!(err.to_string(), "Category 'Vehicles' does not exist");
    }

    #[test]
    fn test_status_error_without_message_is_generic() {
        let err = StoreError::Status {
            code: 502,
            message: None,
        };
        assert!(err.to_string().starts_with(GENERIC_NETWORK_ERROR));
        assert!(err.to_string().ends_with("(HTTP 502)"));
    }
}
