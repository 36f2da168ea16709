//! Column mapping from spreadsheet headers to canonical records

mod mapper;
mod values;

pub use mapper::{check_headers, map_row, map_rows};
pub use values::excel_serial_to_date;
