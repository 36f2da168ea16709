//! Spreadsheet input and template output

mod file_kind;
mod reader;
mod template;

pub use file_kind::{CSV_MEDIA_TYPE, FileKind, XLS_MEDIA_TYPE, XLSX_MEDIA_TYPE};
pub use reader::{ParsedSheet, read_sheet};
pub use template::{template_bytes, template_fields, template_file_name, template_headers, write_template};
