//! Row validation
//!
//! A pure filter: records are kept or reported, never repaired.

use super::{MISSING_ASSET_TAG, MappedRow, RowDiagnostic};

/// Rows split into usable records and per-row problems
#[derive(Debug, Default)]
pub struct ValidationOutcome {
    pub valid: Vec<MappedRow>,
    pub diagnostics: Vec<RowDiagnostic>,
}

impl ValidationOutcome {
    /// True when no row was rejected
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Keep rows whose asset tag is non-blank; report every other row
pub fn validate_rows(rows: Vec<MappedRow>) -> ValidationOutcome {
    rows.into_iter()
        .fold(ValidationOutcome::default(), |mut outcome, row| {
            if row.record.has_identity() {
                outcome.valid.push(row);
            } else {
                outcome
                    .diagnostics
                    .push(RowDiagnostic::new(row.row_number, MISSING_ASSET_TAG));
            }
            outcome
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::CanonicalAssetRecord;

    fn rows(tags: &[&str]) -> Vec<MappedRow> {
        tags.iter()
            .enumerate()
            .map(|(i, tag)| MappedRow {
                row_number: i + 2,
                record: CanonicalAssetRecord::with_tag(*tag),
            })
            .collect()
    }

    #[test]
    fn test_all_valid() {
        let outcome = validate_rows(rows(&["A", "B"]));
        assert!(outcome.is_clean());
        assert_eq!(outcome.valid.len(), 2);
    }

    #[test]
    fn test_blank_tags_are_reported_with_row_numbers() {
        let outcome = validate_rows(rows(&["A", "", "B", "   "]));
        assert!(!outcome.is_clean());
        assert_eq!(outcome.valid.len(), 2);
        assert_eq!(
            outcome.diagnostics,
            vec![
                RowDiagnostic::new(3, MISSING_ASSET_TAG),
                RowDiagnostic::new(5, MISSING_ASSET_TAG),
            ]
        );
    }

    #[test]
    fn test_records_are_not_modified() {
        let input = rows(&[" A-1 "]);
        let outcome = validate_rows(input.clone());
        assert_eq!(outcome.valid, input);
    }
}
