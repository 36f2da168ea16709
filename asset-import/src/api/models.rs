//! Wire types for the asset service endpoints

use serde::{Deserialize, Serialize};

use crate::import::{CanonicalAssetRecord, ImportBatchResult};

/// Body of `POST /assets/import`
#[derive(Debug, Serialize)]
pub struct BulkImportRequest<'a> {
    pub assets: &'a [CanonicalAssetRecord],
}

/// Reply to `POST /assets/import`, one result per submitted asset
#[derive(Debug, Deserialize)]
pub struct BulkImportResponse {
    pub results: Vec<ImportBatchResult>,
}

/// Reply to `GET /assets/check-tag`
#[derive(Debug, Deserialize)]
pub struct TagCheckResponse {
    pub exists: bool,
}

/// Error body; the service uses either key
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ApiErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.error
            .into_iter()
            .chain(self.message)
            .map(|m| m.trim().to_string())
            .find(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::RecordAction;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let assets = vec![CanonicalAssetRecord {
            asset_tag_id: "A-1".into(),
            description: "Laptop".into(),
            cost: Some(1200.0),
            ..Default::default()
        }];
        let body = serde_json::to_value(BulkImportRequest { assets: &assets }).unwrap();

        assert_eq!(body["assets"][0]["assetTagId"], json!("A-1"));
        assert_eq!(body["assets"][0]["cost"], json!(1200.0));
    }

    #[test]
    fn test_response_parses_mixed_outcomes() {
        let response: BulkImportResponse = serde_json::from_value(json!({
            "results": [
                { "assetTagId": "A-1", "action": "created" },
                { "assetTagId": "A-2", "action": "skipped", "reason": "Asset Tag ID already exists" },
                { "assetTagId": "A-3", "action": "failed", "reason": "Invalid site" }
            ]
        }))
        .unwrap();

        let actions: Vec<_> = response.results.iter().map(|r| r.action).collect();
        assert_eq!(
            actions,
            vec![RecordAction::Created, RecordAction::Skipped, RecordAction::Failed]
        );
        assert_eq!(response.results[2].reason.as_deref(), Some("Invalid site"));
    }

    #[test]
    fn test_error_body_prefers_error_key() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"error":"Unauthorized","message":"token expired"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Unauthorized"));

        let body: ApiErrorBody = serde_json::from_str(r#"{"error":" ","message":"Bad file"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Bad file"));
    }
}
