//! Canonical column table
//!
//! One entry per canonical asset field: its camelCase key, the display header
//! written into templates, and the ordered list of spreadsheet headers accepted
//! on import. The mapper reads rows through this table and the template
//! generator writes headers from it, so the two cannot drift apart.

/// How a column's cells are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Number,
    Date,
    Bool,
}

/// Canonical asset fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    AssetTagId,
    Description,
    Brand,
    Model,
    SerialNo,
    AssetType,
    Cost,
    DepreciableCost,
    SalvageValue,
    AssetLifeMonths,
    Status,
    Category,
    SubCategory,
    Department,
    Site,
    Location,
    PurchaseDate,
    DeliveryDate,
    DateAcquired,
    LastAuditDate,
    LastAuditType,
    LastAuditor,
    AuditCount,
    Remarks,
    AdditionalInformation,
    OldAssetTag,
    PbiNumber,
    PoNumber,
    PaymentVoucherNumber,
    XeroAssetNo,
    Owner,
    IssuedTo,
    PurchasedFrom,
    UnaccountedInventory,
    DepreciableAsset,
    DepreciationMethod,
    Qr,
}

/// One row of the column table
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub field: Field,
    /// camelCase key used by the asset API
    pub key: &'static str,
    /// Header written into templates; always the first alias
    pub header: &'static str,
    /// Accepted headers, in lookup priority order
    pub aliases: &'static [&'static str],
    pub kind: ColumnKind,
}

macro_rules! column {
    ($field:ident, $key:literal, $header:literal, $kind:ident) => {
        Column {
            field: Field::$field,
            key: $key,
            header: $header,
            aliases: &[$header, $key],
            kind: ColumnKind::$kind,
        }
    };
    ($field:ident, $key:literal, $header:literal, $kind:ident, [$($extra:literal),+]) => {
        Column {
            field: Field::$field,
            key: $key,
            header: $header,
            aliases: &[$header, $key, $($extra),+],
            kind: ColumnKind::$kind,
        }
    };
}

/// The identity column; its header must be present for an import to start
pub const IDENTITY: Column = column!(AssetTagId, "assetTagId", "Asset Tag ID", Text);

pub static COLUMNS: &[Column] = &[
    IDENTITY,
    column!(Description, "description", "Description", Text),
    column!(Brand, "brand", "Brand", Text),
    column!(Model, "model", "Model", Text),
    column!(SerialNo, "serialNo", "Serial No", Text, ["Serial Number"]),
    column!(AssetType, "assetType", "Asset Type", Text),
    column!(Cost, "cost", "Cost", Number),
    column!(DepreciableCost, "depreciableCost", "Depreciable Cost", Number),
    column!(SalvageValue, "salvageValue", "Salvage Value", Number),
    column!(AssetLifeMonths, "assetLifeMonths", "Asset Life (months)", Number, ["Asset Life Months"]),
    column!(Status, "status", "Status", Text),
    column!(Category, "category", "Category", Text),
    column!(SubCategory, "subCategory", "Sub Category", Text, ["SubCategory"]),
    column!(Department, "department", "Department", Text),
    column!(Site, "site", "Site", Text),
    column!(Location, "location", "Location", Text),
    column!(PurchaseDate, "purchaseDate", "Purchase Date", Date),
    column!(DeliveryDate, "deliveryDate", "Delivery Date", Date),
    column!(DateAcquired, "dateAcquired", "Date Acquired", Date),
    column!(LastAuditDate, "lastAuditDate", "Last Audit Date", Date),
    column!(LastAuditType, "lastAuditType", "Last Audit Type", Text),
    column!(LastAuditor, "lastAuditor", "Last Auditor", Text),
    column!(AuditCount, "auditCount", "Audit Count", Number),
    column!(Remarks, "remarks", "Remarks", Text),
    column!(AdditionalInformation, "additionalInformation", "Additional Information", Text),
    column!(OldAssetTag, "oldAssetTag", "Old Asset Tag", Text),
    column!(PbiNumber, "pbiNumber", "PBI Number", Text),
    column!(PoNumber, "poNumber", "PO Number", Text),
    column!(PaymentVoucherNumber, "paymentVoucherNumber", "Payment Voucher Number", Text),
    column!(XeroAssetNo, "xeroAssetNo", "Xero Asset No", Text),
    column!(Owner, "owner", "Owner", Text),
    column!(IssuedTo, "issuedTo", "Issued To", Text),
    column!(PurchasedFrom, "purchasedFrom", "Purchased From", Text),
    column!(UnaccountedInventory, "unaccountedInventory", "Unaccounted Inventory", Bool),
    column!(DepreciableAsset, "depreciableAsset", "Depreciable Asset", Bool),
    column!(DepreciationMethod, "depreciationMethod", "Depreciation Method", Text),
    column!(Qr, "qr", "QR", Text),
];

impl Field {
    /// The table entry for this field
    pub fn column(&self) -> &'static Column {
        COLUMNS
            .iter()
            .find(|c| c.field == *self)
            .unwrap_or(&IDENTITY)
    }

    pub fn key(&self) -> &'static str {
        self.column().key
    }

    pub fn header(&self) -> &'static str {
        self.column().header
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    /// Accepts a camelCase key or any accepted header, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        COLUMNS
            .iter()
            .find(|c| {
                c.key.to_lowercase() == wanted
                    || c.aliases.iter().any(|a| a.to_lowercase() == wanted)
            })
            .map(|c| c.field)
            .ok_or_else(|| format!("Unknown asset column '{}'", s.trim()))
    }
}

/// Check whether a header set contains the identity column under any alias
pub fn has_identity_header<'a>(headers: impl IntoIterator<Item = &'a str>) -> bool {
    headers
        .into_iter()
        .any(|h| IDENTITY.aliases.contains(&h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_identity_is_first() {
        assert_eq!(COLUMNS[0].field, Field::AssetTagId);
        assert_eq!(Field::AssetTagId.header(), "Asset Tag ID");
        assert_eq!(Field::AssetTagId.column().aliases, &["Asset Tag ID", "assetTagId"]);
    }

    #[test]
    fn test_table_is_consistent() {
        let mut fields = HashSet::new();
        let mut keys = HashSet::new();
        for column in COLUMNS {
            assert!(fields.insert(column.field), "duplicate field {:?}", column.field);
            assert!(keys.insert(column.key), "duplicate key {}", column.key);
            assert_eq!(column.aliases[0], column.header);
            assert_eq!(column.aliases[1], column.key);
            assert_eq!(column.field.column().key, column.key);
        }
        assert_eq!(COLUMNS.len(), 37);
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("description".parse::<Field>(), Ok(Field::Description));
        assert_eq!("Serial Number".parse::<Field>(), Ok(Field::SerialNo));
        assert_eq!("  PO NUMBER ".parse::<Field>(), Ok(Field::PoNumber));
        assert!("colour".parse::<Field>().is_err());
    }

    #[test]
    fn test_has_identity_header() {
        assert!(has_identity_header(["Description", "Asset Tag ID"]));
        assert!(has_identity_header(["assetTagId"]));
        assert!(!has_identity_header(["Asset Tag", "Description"]));
    }
}
