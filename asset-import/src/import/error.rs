//! Fatal import errors
//!
//! Each variant ends the run and is written to the import history as the
//! failed entry's `errorMessage`.

use super::store::StoreError;
use super::types::{RowDiagnostic, format_row_list};

/// Extensions accepted for upload, as shown to the user
pub const ACCEPTED_EXTENSIONS: &str = ".xlsx, .xls, .csv";

#[derive(Debug, Clone)]
pub enum ImportError {
    /// File type is not a supported spreadsheet; raised before the pipeline starts
    UnsupportedFileType { file_name: String },
    /// Workbook could not be opened or parsed
    Unreadable { message: String },
    /// Sheet has no header row or no data rows
    EmptySheet,
    /// Header row carries neither identity header
    MissingIdentityColumn { found: Vec<String> },
    /// At least one row has a missing or blank asset tag
    InvalidRows { diagnostics: Vec<RowDiagnostic> },
    /// A chunk submission failed at the transport or status level
    Submission { source: StoreError, processed: usize, total: usize },
    /// The run was cancelled between chunks
    Cancelled { processed: usize, total: usize },
}

impl ImportError {
    /// Whether the error happened before any record was submitted
    pub fn is_preflight(&self) -> bool {
        !matches!(
            self,
            ImportError::Submission { .. } | ImportError::Cancelled { .. }
        )
    }
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::UnsupportedFileType { file_name } => write!(
                f,
                "Unsupported file type for '{}'. Accepted file types: {}",
                file_name, ACCEPTED_EXTENSIONS
            ),
            ImportError::Unreadable { message } => {
                write!(f, "Could not read spreadsheet: {}", message)
            }
            ImportError::EmptySheet => {
                write!(f, "The spreadsheet contains no data rows below the header")
            }
            ImportError::MissingIdentityColumn { found } => {
                let found = if found.is_empty() {
                    "(none)".to_string()
                } else {
                    found.join(", ")
                };
                write!(
                    f,
                    "Missing required column \"Asset Tag ID\" (or \"assetTagId\"). Columns found: {}",
                    found
                )
            }
            ImportError::InvalidRows { diagnostics } => write!(
                f,
                "{} row(s) are missing an Asset Tag ID: row {}",
                diagnostics.len(),
                format_row_list(diagnostics)
            ),
            ImportError::Submission { source, .. } => write!(f, "{}", source),
            ImportError::Cancelled { .. } => {
                write!(f, "Import cancelled before all records were submitted")
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Submission { source, .. } => Some(source),
            _ => None,
        }
    }
}
