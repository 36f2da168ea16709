//! Accepted upload formats

use std::path::Path;

use crate::import::ImportError;

pub const XLSX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const XLS_MEDIA_TYPE: &str = "application/vnd.ms-excel";
pub const CSV_MEDIA_TYPE: &str = "text/csv";

/// Spreadsheet format of an uploaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Xlsx,
    Xls,
    Csv,
}

impl FileKind {
    /// Work out the format from the file name, falling back to the media type
    pub fn detect(file_name: &str, media_type: Option<&str>) -> Result<Self, ImportError> {
        Self::from_extension(file_name)
            .or_else(|| media_type.and_then(Self::from_media_type))
            .ok_or_else(|| ImportError::UnsupportedFileType {
                file_name: file_name.to_string(),
            })
    }

    fn from_extension(file_name: &str) -> Option<Self> {
        let ext = Path::new(file_name).extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "xlsx" => Some(FileKind::Xlsx),
            "xls" => Some(FileKind::Xls),
            "csv" => Some(FileKind::Csv),
            _ => None,
        }
    }

    fn from_media_type(media_type: &str) -> Option<Self> {
        // Strip parameters such as "; charset=utf-8"
        let essence = media_type.split(';').next().unwrap_or("").trim();
        match essence.to_lowercase().as_str() {
            XLSX_MEDIA_TYPE => Some(FileKind::Xlsx),
            XLS_MEDIA_TYPE => Some(FileKind::Xls),
            CSV_MEDIA_TYPE => Some(FileKind::Csv),
            _ => None,
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileKind::Xlsx => write!(f, "xlsx"),
            FileKind::Xls => write!(f, "xls"),
            FileKind::Csv => write!(f, "csv"),
        }
    }
}
