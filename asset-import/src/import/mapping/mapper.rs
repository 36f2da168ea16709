//! Map raw spreadsheet rows onto canonical asset records

use crate::import::columns::{COLUMNS, Column, ColumnKind, Field, has_identity_header};
use crate::import::{CanonicalAssetRecord, CellValue, ImportError, MappedRow, RawRow};

use super::values::{parse_bool, parse_count, parse_date, parse_number, parse_text};

/// Check that the sheet's header row carries the identity column
///
/// Runs once, before any row is mapped.
pub fn check_headers(headers: &[String]) -> Result<(), ImportError> {
    if has_identity_header(headers.iter().map(|h| h.as_str())) {
        Ok(())
    } else {
        Err(ImportError::MissingIdentityColumn {
            found: headers.to_vec(),
        })
    }
}

/// Map every row, keeping the sheet row number alongside each record
pub fn map_rows(rows: &[RawRow]) -> Vec<MappedRow> {
    rows.iter()
        .map(|row| MappedRow {
            row_number: row.row_number,
            record: map_row(row),
        })
        .collect()
}

/// Map a single row. Never fails: unknown or unparseable cells become `None`.
pub fn map_row(row: &RawRow) -> CanonicalAssetRecord {
    let mut record = CanonicalAssetRecord::default();

    for column in COLUMNS {
        if let Some(cell) = lookup(row, column) {
            assign(&mut record, column, cell);
        }
    }

    record
}

/// First alias whose cell is present and non-blank
fn lookup<'a>(row: &'a RawRow, column: &Column) -> Option<&'a CellValue> {
    column
        .aliases
        .iter()
        .filter_map(|alias| row.get(alias))
        .find(|cell| !cell.is_empty())
}

fn assign(record: &mut CanonicalAssetRecord, column: &Column, cell: &CellValue) {
    match column.kind {
        ColumnKind::Text => assign_text(record, column.field, parse_text(cell)),
        ColumnKind::Number => assign_number(record, column.field, cell),
        ColumnKind::Date => {
            let value = parse_date(cell);
            match column.field {
                Field::PurchaseDate => record.purchase_date = value,
                Field::DeliveryDate => record.delivery_date = value,
                Field::DateAcquired => record.date_acquired = value,
                Field::LastAuditDate => record.last_audit_date = value,
                other => log::debug!("Column {} is not a date field", other),
            }
        }
        ColumnKind::Bool => {
            let value = parse_bool(cell);
            match column.field {
                Field::UnaccountedInventory => record.unaccounted_inventory = value,
                Field::DepreciableAsset => record.depreciable_asset = value,
                other => log::debug!("Column {} is not a flag field", other),
            }
        }
    }
}

fn assign_number(record: &mut CanonicalAssetRecord, field: Field, cell: &CellValue) {
    match field {
        Field::Cost => record.cost = parse_number(cell),
        Field::DepreciableCost => record.depreciable_cost = parse_number(cell),
        Field::SalvageValue => record.salvage_value = parse_number(cell),
        Field::AssetLifeMonths => record.asset_life_months = parse_number(cell),
        Field::AuditCount => record.audit_count = parse_count(cell),
        other => log::debug!("Column {} is not a numeric field", other),
    }
}

fn assign_text(record: &mut CanonicalAssetRecord, field: Field, value: Option<String>) {
    let slot = match field {
        Field::AssetTagId => {
            record.asset_tag_id = value.unwrap_or_default();
            return;
        }
        Field::Description => {
            record.description = value.unwrap_or_default();
            return;
        }
        Field::Brand => &mut record.brand,
        Field::Model => &mut record.model,
        Field::SerialNo => &mut record.serial_no,
        Field::AssetType => &mut record.asset_type,
        Field::Status => &mut record.status,
        Field::Category => &mut record.category,
        Field::SubCategory => &mut record.sub_category,
        Field::Department => &mut record.department,
        Field::Site => &mut record.site,
        Field::Location => &mut record.location,
        Field::LastAuditType => &mut record.last_audit_type,
        Field::LastAuditor => &mut record.last_auditor,
        Field::Remarks => &mut record.remarks,
        Field::AdditionalInformation => &mut record.additional_information,
        Field::OldAssetTag => &mut record.old_asset_tag,
        Field::PbiNumber => &mut record.pbi_number,
        Field::PoNumber => &mut record.po_number,
        Field::PaymentVoucherNumber => &mut record.payment_voucher_number,
        Field::XeroAssetNo => &mut record.xero_asset_no,
        Field::Owner => &mut record.owner,
        Field::IssuedTo => &mut record.issued_to,
        Field::PurchasedFrom => &mut record.purchased_from,
        Field::DepreciationMethod => &mut record.depreciation_method,
        Field::Qr => &mut record.qr,
        other => {
            log::debug!("Column {} is not a text field", other);
            return;
        }
    };
    *slot = value;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        RawRow::from_pairs(
            2,
            pairs
                .iter()
                .map(|(h, v)| (h.to_string(), CellValue::text(*v))),
        )
    }

    #[test]
    fn test_check_headers() {
        assert!(check_headers(&["Asset Tag ID".into(), "Description".into()]).is_ok());
        assert!(check_headers(&["assetTagId".into()]).is_ok());

        let err = check_headers(&["Tag".into(), "Description".into()]).unwrap_err();
        match err {
            ImportError::MissingIdentityColumn { found } => {
                assert_eq!(found, vec!["Tag".to_string(), "Description".to_string()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_first_alias_wins() {
        let record = map_row(&row(&[("assetTagId", "B-2"), ("Asset Tag ID", "A-1")]));
        assert_eq!(record.asset_tag_id, "A-1");
    }

    #[test]
    fn test_blank_alias_falls_through() {
        let record = map_row(&row(&[("Asset Tag ID", "  "), ("assetTagId", "B-2")]));
        assert_eq!(record.asset_tag_id, "B-2");
    }

    #[test]
    fn test_maps_typed_groups() {
        let record = map_row(&row(&[
            ("Asset Tag ID", "A-1"),
            ("Description", "Laptop"),
            ("Serial Number", "SN-1"),
            ("Cost", "1,299.99"),
            ("salvageValue", "n/a"),
            ("Purchase Date", "2024-03-05"),
            ("Depreciable Asset", "Yes"),
            ("Audit Count", "2"),
            ("Site", "HQ"),
        ]));

        assert_eq!(record.asset_tag_id, "A-1");
        assert_eq!(record.description, "Laptop");
        assert_eq!(record.serial_no.as_deref(), Some("SN-1"));
        assert_eq!(record.cost, Some(1299.99));
        assert_eq!(record.salvage_value, None);
        assert_eq!(record.purchase_date, NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(record.depreciable_asset, Some(true));
        assert_eq!(record.audit_count, Some(2));
        assert_eq!(record.site.as_deref(), Some("HQ"));
        assert!(record.has_audit_seed());
    }

    #[test]
    fn test_absent_fields_are_null() {
        let record = map_row(&row(&[("Asset Tag ID", "A-1"), ("Colour", "Red")]));
        assert_eq!(record.description, "");
        assert_eq!(record.brand, None);
        assert_eq!(record.cost, None);
        assert_eq!(record.purchase_date, None);
        assert_eq!(record.unaccounted_inventory, None);
    }

    #[test]
    fn test_numeric_tag_renders_without_fraction() {
        let raw = RawRow::from_pairs(5, vec![("Asset Tag ID", CellValue::Number(1001.0))]);
        let mapped = map_rows(&[raw]);
        assert_eq!(mapped[0].row_number, 5);
        assert_eq!(mapped[0].record.asset_tag_id, "1001");
    }
}
