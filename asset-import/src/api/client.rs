//! Asset service client implementing [`AssetStore`]

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};

use crate::config::Config;
use crate::import::{AssetStore, CanonicalAssetRecord, ImportBatchResult, StoreError};

use super::models::{ApiErrorBody, BulkImportRequest, BulkImportResponse, TagCheckResponse};

const USER_AGENT: &str = concat!("asset-import/", env!("CARGO_PKG_VERSION"));

pub struct AssetApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl AssetApiClient {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.require_base_url()?,
            config.api.token.clone(),
            Duration::from_secs(config.api.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body);
        log::debug!("Asset service returned {}: {}", status, body);

        Err(StoreError::Status {
            code: status.as_u16(),
            message,
        })
    }
}

/// Pull a user-facing message out of an error response body
pub fn extract_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(ApiErrorBody::into_message)
}

#[async_trait]
impl AssetStore for AssetApiClient {
    async fn bulk_create(
        &self,
        records: &[CanonicalAssetRecord],
    ) -> Result<Vec<ImportBatchResult>, StoreError> {
        let request = self
            .http
            .post(self.url("assets/import"))
            .json(&BulkImportRequest { assets: records });

        let response: BulkImportResponse = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;

        Ok(response.results)
    }

    async fn exists(&self, asset_tag_id: &str) -> Result<bool, StoreError> {
        let request = self
            .http
            .get(self.url("assets/check-tag"))
            .query(&[("assetTagId", asset_tag_id)]);

        let response: TagCheckResponse = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;

        Ok(response.exists)
    }
}
