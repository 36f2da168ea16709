//! Intra-file deduplication by asset tag

use std::collections::HashSet;

use super::{DUPLICATE_WITHIN_FILE, MappedRow, RowDiagnostic};

/// Deduplicated rows plus the rows that were dropped
#[derive(Debug, Default)]
pub struct DedupOutcome {
    pub kept: Vec<MappedRow>,
    pub duplicates: Vec<RowDiagnostic>,
}

/// Keep the first row for each asset tag, in original order
///
/// Later rows with an already-seen tag are dropped and reported as
/// `"duplicate within file"`.
pub fn dedupe_rows(rows: Vec<MappedRow>) -> DedupOutcome {
    let mut seen: HashSet<String> = HashSet::new();
    let mut outcome = DedupOutcome::default();

    for row in rows {
        if seen.insert(row.record.asset_tag_id.clone()) {
            outcome.kept.push(row);
        } else {
            outcome
                .duplicates
                .push(RowDiagnostic::new(row.row_number, DUPLICATE_WITHIN_FILE));
        }
    }

    outcome
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
    fn test_keeps_first_occurrence_in_order() {
        let outcome = dedupe_rows(rows(&["A", "B", "A", "C", "B"]));

        let kept: Vec<_> = outcome
            .kept
            .iter()
            .map(|r| r.record.asset_tag_id.as_str())
            .collect();
        assert_eq!(kept, vec!["A", "B", "C"]);

        let dup_rows: Vec<_> = outcome.duplicates.iter().map(|d| d.row_number).collect();
        assert_eq!(dup_rows, vec![4, 6]);
        assert!(outcome.duplicates.iter().all(|d| d.reason == "duplicate within file"));
    }

    #[test]
    fn test_no_duplicates() {
        let outcome = dedupe_rows(rows(&["A", "B", "C"]));
        assert_eq!(outcome.kept.len(), 3);
        assert!(outcome.duplicates.is_empty());
    }

    #[test]
    fn test_kept_rows_keep_their_row_numbers() {
        let outcome = dedupe_rows(rows(&["A", "A", "B"]));
        assert_eq!(outcome.kept[1].row_number, 4);
    }
}
