//! Canonical asset record produced by the column mapper

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Normalized, header-independent representation of one asset row
///
/// Serializes with the camelCase keys the asset API expects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalAssetRecord {
    // Identity
    pub asset_tag_id: String,

    // Descriptive
    pub description: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_no: Option<String>,
    pub asset_type: Option<String>,

    // Numeric
    pub cost: Option<f64>,
    pub depreciable_cost: Option<f64>,
    pub salvage_value: Option<f64>,
    pub asset_life_months: Option<f64>,

    // Categorical
    pub status: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub department: Option<String>,
    pub site: Option<String>,
    pub location: Option<String>,

    // Dates
    pub purchase_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub date_acquired: Option<NaiveDate>,

    // Audit seed; the asset API creates an audit-history entry when present
    pub last_audit_date: Option<NaiveDate>,
    pub last_audit_type: Option<String>,
    pub last_auditor: Option<String>,
    pub audit_count: Option<u32>,

    // Free text
    pub remarks: Option<String>,
    pub additional_information: Option<String>,
    pub old_asset_tag: Option<String>,
    pub pbi_number: Option<String>,
    pub po_number: Option<String>,
    pub payment_voucher_number: Option<String>,
    pub xero_asset_no: Option<String>,
    pub owner: Option<String>,
    pub issued_to: Option<String>,
    pub purchased_from: Option<String>,
    pub unaccounted_inventory: Option<bool>,
    pub depreciable_asset: Option<bool>,
    pub depreciation_method: Option<String>,
    pub qr: Option<String>,
}

impl CanonicalAssetRecord {
    /// Create a record with only the identity set
    pub fn with_tag(asset_tag_id: impl Into<String>) -> Self {
        Self {
            asset_tag_id: asset_tag_id.into(),
            ..Self::default()
        }
    }

    /// Check whether the identity is usable (non-blank after trimming)
    pub fn has_identity(&self) -> bool {
        !self.asset_tag_id.trim().is_empty()
    }

    /// Check whether the record seeds an audit-history entry
    pub fn has_audit_seed(&self) -> bool {
        self.last_audit_date.is_some()
            || self.last_audit_type.is_some()
            || self.last_auditor.is_some()
            || self.audit_count.is_some()
    }
}

/// A mapped record together with the sheet row it came from
#[derive(Debug, Clone, PartialEq)]
pub struct MappedRow {
    /// 1-based sheet row number (the header is row 1)
    pub row_number: usize,
    pub record: CanonicalAssetRecord,
}
