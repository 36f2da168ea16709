//! Blank import template with the selected canonical headers

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_xlsxwriter::{Color, Format, Workbook};

use crate::import::columns::{COLUMNS, Field};

const SHEET_NAME: &str = "Assets";

/// Fields to include, identity first, then column-table order without repeats
pub fn template_fields(selected: &[Field]) -> Vec<Field> {
    let mut fields = vec![Field::AssetTagId];
    fields.extend(
        COLUMNS
            .iter()
            .map(|c| c.field)
            .filter(|f| *f != Field::AssetTagId && selected.contains(f)),
    );
    fields
}

/// Display headers for the template's single header row
pub fn template_headers(selected: &[Field]) -> Vec<&'static str> {
    template_fields(selected)
        .iter()
        .map(|f| f.header())
        .collect()
}

/// Download name for a template generated on `date`
pub fn template_file_name(date: NaiveDate) -> String {
    format!("asset-import-template-{}.xlsx", date.format("%Y-%m-%d"))
}

fn build_workbook(selected: &[Field]) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White);

    for (col, header) in template_headers(selected).iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *header, &header_format)?;
        sheet.set_column_width(col, (header.len() + 4).max(14) as f64)?;
    }

    Ok(workbook)
}

/// Template workbook as in-memory `.xlsx` bytes
pub fn template_bytes(selected: &[Field]) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(selected)?;
    workbook
        .save_to_buffer()
        .context("Failed to serialize template workbook")
}

/// Write the template into `dir`, returning the path of the new file
pub fn write_template(selected: &[Field], dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let path = dir.join(template_file_name(date));
    let mut workbook = build_workbook(selected)?;
    workbook
        .save(&path)
        .with_context(|| format!("Failed to save template: {}", path.display()))?;

    log::info!(
        "Wrote import template with {} columns to {}",
        template_fields(selected).len(),
        path.display()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Data, Reader, Xlsx};
    use std::io::Cursor;

    fn read_back(bytes: Vec<u8>) -> Vec<Vec<String>> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
        assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);
        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        range
            .rows()
            .map(|row| {
                row.iter()
                    .map(|c| match c {
                        Data::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_identity_forced_first_and_table_order() {
        let fields = template_fields(&[Field::Cost, Field::Description, Field::Cost]);
        assert_eq!(fields, vec![Field::AssetTagId, Field::Description, Field::Cost]);
    }

    #[test]
    fn test_empty_selection_gives_identity_only() {
        assert_eq!(template_headers(&[]), vec!["Asset Tag ID"]);
    }

    #[test]
    fn test_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(template_file_name(date), "asset-import-template-2024-03-05.xlsx");
    }

    #[test]
    fn test_bytes_have_header_row_only() {
        let bytes = template_bytes(&[Field::Brand, Field::AssetTagId, Field::Description]).unwrap();
        let rows = read_back(bytes);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], vec!["Asset Tag ID", "Description", "Brand"]);
    }

    #[test]
    fn test_template_headers_map_back_to_fields() {
        let selected: Vec<Field> = COLUMNS.iter().map(|c| c.field).collect();
        for header in template_headers(&selected) {
            let field: Field = header.parse().unwrap();
            assert_eq!(field.header(), header);
        }
    }
}
