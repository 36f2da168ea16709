//! Per-row diagnostics from validation and deduplication

use serde::{Deserialize, Serialize};

/// Reason recorded for rows dropped as intra-file duplicates
pub const DUPLICATE_WITHIN_FILE: &str = "duplicate within file";

/// Reason recorded for rows with a missing or blank asset tag
pub const MISSING_ASSET_TAG: &str = "missing Asset Tag ID";

/// Maximum row numbers listed in a user-facing message
pub const MAX_LISTED_ROWS: usize = 10;

/// A problem tied to one spreadsheet row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowDiagnostic {
    /// 1-based sheet row number (the header is row 1)
    pub row_number: usize,
    pub reason: String,
}

impl RowDiagnostic {
    pub fn new(row_number: usize, reason: impl Into<String>) -> Self {
        Self {
            row_number,
            reason: reason.into(),
        }
    }
}

/// Render the row numbers of `diagnostics` as "4, 7, 9", capped at
/// `MAX_LISTED_ROWS` with a "(+N more)" suffix
pub fn format_row_list(diagnostics: &[RowDiagnostic]) -> String {
    let listed: Vec<String> = diagnostics
        .iter()
        .take(MAX_LISTED_ROWS)
        .map(|d| d.row_number.to_string())
        .collect();

    let mut out = listed.join(", ");
    if diagnostics.len() > MAX_LISTED_ROWS {
        out.push_str(&format!(" (+{} more)", diagnostics.len() - MAX_LISTED_ROWS));
    }
    out
}
