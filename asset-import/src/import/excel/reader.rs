//! Read the first sheet of an uploaded workbook or CSV file into raw rows

use std::fmt::Display;
use std::io::Cursor;

use calamine::{Data, Range, Reader, Xls, Xlsx};

use crate::import::mapping::excel_serial_to_date;
use crate::import::{CellValue, ImportError, RawRow};

use super::FileKind;

/// Header row plus every non-blank data row of a sheet
#[derive(Debug, Clone, Default)]
pub struct ParsedSheet {
    pub sheet_name: Option<String>,
    /// Trimmed header cells, in column order
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Parse file contents according to their detected kind
///
/// Fails with `EmptySheet` when there is no header row or no data row under it.
pub fn read_sheet(bytes: &[u8], kind: FileKind) -> Result<ParsedSheet, ImportError> {
    let sheet = match kind {
        FileKind::Xlsx => {
            let workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).map_err(unreadable)?;
            read_first_worksheet(workbook)?
        }
        FileKind::Xls => {
            let workbook: Xls<_> = Xls::new(Cursor::new(bytes)).map_err(unreadable)?;
            read_first_worksheet(workbook)?
        }
        FileKind::Csv => read_csv(bytes)?,
    };

    if sheet.headers.iter().all(|h| h.is_empty()) || sheet.rows.is_empty() {
        return Err(ImportError::EmptySheet);
    }

    log::debug!(
        "Read {} data rows and {} columns from {} sheet {:?}",
        sheet.rows.len(),
        sheet.headers.len(),
        kind,
        sheet.sheet_name
    );

    Ok(sheet)
}

fn unreadable(err: impl Display) -> ImportError {
    ImportError::Unreadable {
        message: err.to_string(),
    }
}

fn read_first_worksheet<'a, R>(mut workbook: R) -> Result<ParsedSheet, ImportError>
where
    R: Reader<Cursor<&'a [u8]>>,
    R::Error: Display,
{
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(ImportError::EmptySheet)?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| unreadable(format!("sheet '{}': {}", sheet_name, e)))?;

    let mut sheet = sheet_from_range(&range);
    sheet.sheet_name = Some(sheet_name);
    Ok(sheet)
}

fn sheet_from_range(range: &Range<Data>) -> ParsedSheet {
    // Ranges start at the first used cell, not at A1
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(header_text).collect(),
        None => return ParsedSheet::default(),
    };

    let rows = rows
        .enumerate()
        .map(|(idx, cells)| {
            // +1 for 1-based numbering, +1 for the header row
            let mut raw = RawRow::new(first_row + idx + 2);
            for (header, cell) in headers.iter().zip(cells) {
                raw.push(header.as_str(), cell_value(cell));
            }
            raw
        })
        .filter(|row| !row.is_blank())
        .collect();

    ParsedSheet {
        sheet_name: None,
        headers,
        rows,
    }
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::text(s.as_str()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            excel_serial_to_date(serial)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(CellValue::Date)
                .unwrap_or(CellValue::Number(serial))
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::text(s.as_str()),
    }
}

fn read_csv(bytes: &[u8]) -> Result<ParsedSheet, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .byte_headers()
        .map_err(unreadable)?
        .iter()
        .map(|h| decode_field(h).trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (idx, record) in reader.byte_records().enumerate() {
        let record = record.map_err(unreadable)?;
        let mut raw = RawRow::new(idx + 2);
        for (header, value) in headers.iter().zip(record.iter()) {
            raw.push(header.as_str(), CellValue::text(decode_field(value)));
        }
        if !raw.is_blank() {
            rows.push(raw);
        }
    }

    Ok(ParsedSheet {
        sheet_name: None,
        headers,
        rows,
    })
}

/// Windows-1252 characters for bytes 0x80..=0x9F; undefined slots stay as-is
const CP1252_HIGH: [char; 32] = [
    '\u{20AC}', '\u{81}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{8D}', '\u{017D}', '\u{8F}',
    '\u{90}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{9D}', '\u{017E}', '\u{0178}',
];

/// Decode a CSV field as UTF-8, falling back to Windows-1252
///
/// Excel's "CSV (Comma delimited)" export writes the ANSI code page.
fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes
            .iter()
            .map(|&b| match b {
                0x80..=0x9F => CP1252_HIGH[(b - 0x80) as usize],
                _ => char::from(b),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn xlsx_bytes(rows: &[&[&str]]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    sheet.write_string(r as u32, c as u16, *value).unwrap();
                }
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_reads_xlsx_rows_with_row_numbers() {
        let bytes = xlsx_bytes(&[
            &["Asset Tag ID", "Description"],
            &["A-1", "Laptop"],
            &["", ""],
            &["A-2", "Monitor"],
        ]);

        let sheet = read_sheet(&bytes, FileKind::Xlsx).unwrap();
        assert_eq!(sheet.headers, vec!["Asset Tag ID", "Description"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0].row_number, 2);
        assert_eq!(sheet.rows[1].row_number, 4);
        assert_eq!(
            sheet.rows[1].get("Description"),
            Some(&CellValue::Text("Monitor".into()))
        );
    }

    #[test]
    fn test_numbers_and_dates_from_xlsx() {
        let mut workbook = Workbook::new();
        let ws = workbook.add_worksheet();
        ws.write_string(0, 0, "Asset Tag ID").unwrap();
        ws.write_string(0, 1, "Cost").unwrap();
        ws.write_string(1, 0, "A-1").unwrap();
        ws.write_number(1, 1, 1299.5).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let sheet = read_sheet(&bytes, FileKind::Xlsx).unwrap();
        assert_eq!(sheet.rows[0].get("Cost"), Some(&CellValue::Number(1299.5)));
    }

    #[test]
    fn test_header_only_sheet_is_empty() {
        let bytes = xlsx_bytes(&[&["Asset Tag ID", "Description"]]);
        let err = read_sheet(&bytes, FileKind::Xlsx).unwrap_err();
        assert!(matches!(err, ImportError::EmptySheet));
    }

    #[test]
    fn test_garbage_is_unreadable() {
        let err = read_sheet(b"not a zip archive", FileKind::Xlsx).unwrap_err();
        assert!(matches!(err, ImportError::Unreadable { .. }));
    }

    #[test]
    fn test_reads_csv() {
        let csv = "\u{feff}Asset Tag ID, Description ,Cost\nA-1,Laptop,\"1,200\"\n,,\nA-2,Desk\n";
        let sheet = read_sheet(csv.as_bytes(), FileKind::Csv).unwrap();

        assert_eq!(sheet.headers, vec!["Asset Tag ID", "Description", "Cost"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0].get("Cost"), Some(&CellValue::Text("1,200".into())));
        assert_eq!(sheet.rows[1].row_number, 4);
        assert_eq!(sheet.rows[1].get("Cost"), None);
    }

    #[test]
    fn test_reads_windows_1252_csv() {
        let csv = b"Asset Tag ID,Description\nA-1,Caf\xE9 \x93Corner\x94\nA-2,Desk\n";
        let sheet = read_sheet(csv, FileKind::Csv).unwrap();

        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(
            sheet.rows[0].get("Description"),
            Some(&CellValue::Text("Caf\u{e9} \u{201c}Corner\u{201d}".into()))
        );
        assert_eq!(sheet.rows[1].get("Description"), Some(&CellValue::Text("Desk".into())));
    }

    #[test]
    fn test_decode_field_keeps_utf8() {
        assert_eq!(decode_field("Café".as_bytes()), "Café");
        assert_eq!(decode_field(b"\x80 5"), "\u{20ac} 5");
    }

    #[test]
    fn test_empty_csv() {
        let err = read_sheet(b"", FileKind::Csv).unwrap_err();
        assert!(matches!(err, ImportError::EmptySheet));
    }
}
