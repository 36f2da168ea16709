//! HTTP client for the asset service

pub mod client;
pub mod models;

pub use client::{AssetApiClient, extract_error_message};
pub use models::{BulkImportRequest, BulkImportResponse, TagCheckResponse};
