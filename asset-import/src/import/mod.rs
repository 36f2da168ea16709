//! Spreadsheet bulk import of assets
//!
//! A run flows through these stages, each of which may end it:
//!
//! 1. read the first sheet ([`excel`])
//! 2. check the header row and map rows to records ([`mapping`])
//! 3. reject rows without an asset tag ([`validate`])
//! 4. drop repeated tags within the file ([`dedup`])
//! 5. submit records in sequential chunks ([`submit`])
//! 6. record one history entry per attempt ([`recorder`])
//!
//! [`ImportPipeline`] ties the stages together.

pub mod columns;
pub mod dedup;
pub mod error;
pub mod excel;
pub mod mapping;
pub mod pipeline;
pub mod recorder;
pub mod store;
pub mod submit;
pub mod types;
pub mod validate;

pub use columns::{COLUMNS, Field};
pub use error::ImportError;
pub use pipeline::{ImportPipeline, ImportPlan, ImportSummary, ImportUpload, plan_import};
pub use store::{AssetStore, HistoryStore, StoreError};
pub use types::*;
