//! Tolerant cell parsing for the column mapper
//!
//! Every parser returns `None` instead of failing: a value that cannot be
//! understood is treated the same as an absent one.

use chrono::{DateTime, Duration, NaiveDate};

use crate::import::CellValue;

/// Largest Excel serial day number (9999-12-31)
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// Parse a cell as text; blank cells are `None`
pub fn parse_text(cell: &CellValue) -> Option<String> {
    match cell {
        CellValue::Empty => None,
        CellValue::Text(s) => {
            let s = s.trim();
            if s.is_empty() { None } else { Some(s.to_string()) }
        }
        CellValue::Number(n) => Some(format_number(*n)),
        CellValue::Bool(b) => Some(b.to_string()),
        CellValue::Date(dt) => Some(dt.date().format("%Y-%m-%d").to_string()),
    }
}

/// Parse a cell as a decimal number
///
/// Text has surrounding whitespace and thousands-separator commas stripped;
/// anything left that is not a finite decimal yields `None`.
pub fn parse_number(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Number(n) if n.is_finite() => Some(*n),
        CellValue::Text(s) => parse_decimal_str(s),
        _ => None,
    }
}

fn parse_decimal_str(s: &str) -> Option<f64> {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    // f64::from_str accepts "inf" and "NaN"; a spreadsheet value never means those
    if !cleaned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
    {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse a cell as a non-negative whole count
pub fn parse_count(cell: &CellValue) -> Option<u32> {
    parse_number(cell)
        .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= u32::MAX as f64)
        .map(|n| n as u32)
}

/// Parse a cell as a calendar date
///
/// Accepts workbook date cells, Excel serial day numbers, and text in
/// `YYYY-MM-DD`, RFC 3339, `YYYY/MM/DD` or `MM/DD/YYYY` form.
pub fn parse_date(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::Date(dt) => Some(dt.date()),
        CellValue::Number(n) => excel_serial_to_date(*n),
        CellValue::Text(s) => parse_date_str(s.trim()),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    // Leading date part of "2024-03-05 10:00:00" and similar
    let date_part = s.split_whitespace().next().unwrap_or(s);
    ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

/// Convert an Excel serial day number (1900 date system) to a date
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial > MAX_EXCEL_SERIAL {
        return None;
    }
    // Day 0 is 1899-12-30 once the 1900 leap-year bug is accounted for
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.floor() as i64))
}

/// Parse a cell as a yes/no flag
pub fn parse_bool(cell: &CellValue) -> Option<bool> {
    match cell {
        CellValue::Bool(b) => Some(*b),
        CellValue::Number(n) if *n == 1.0 => Some(true),
        CellValue::Number(n) if *n == 0.0 => Some(false),
        CellValue::Text(s) => match s.trim().to_lowercase().as_str() {
            "yes" | "y" | "true" | "1" | "x" => Some(true),
            "no" | "n" | "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Render a number the way a spreadsheet shows it (no trailing ".0")
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(&CellValue::Empty), None);
        assert_eq!(parse_number(&text("")), None);
        assert_eq!(parse_number(&text("   ")), None);
        assert_eq!(parse_number(&text("1,234.50")), Some(1234.5));
        assert_eq!(parse_number(&text("  42 ")), Some(42.0));
        assert_eq!(parse_number(&text("-3.25")), Some(-3.25));
        assert_eq!(parse_number(&text("12abc")), None);
        assert_eq!(parse_number(&text("NaN")), None);
        assert_eq!(parse_number(&text("inf")), None);
        assert_eq!(parse_number(&CellValue::Number(99.9)), Some(99.9));
        assert_eq!(parse_number(&CellValue::Bool(true)), None);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(&text("3")), Some(3));
        assert_eq!(parse_count(&CellValue::Number(2.0)), Some(2));
        assert_eq!(parse_count(&text("2.5")), None);
        assert_eq!(parse_count(&text("-1")), None);
    }

    #[test]
    fn test_parse_text() {
        assert_eq!(parse_text(&text("  Dell ")), Some("Dell".to_string()));
        assert_eq!(parse_text(&text("  ")), None);
        assert_eq!(parse_text(&CellValue::Number(1001.0)), Some("1001".to_string()));
        assert_eq!(parse_text(&CellValue::Number(10.5)), Some("10.5".to_string()));
    }

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5);
        assert_eq!(parse_date(&text("2024-03-05")), expected);
        assert_eq!(parse_date(&text("2024/03/05")), expected);
        assert_eq!(parse_date(&text("03/05/2024")), expected);
        assert_eq!(parse_date(&text("2024-03-05T08:30:00Z")), expected);
        assert_eq!(parse_date(&text("2024-03-05 08:30")), expected);
        assert_eq!(parse_date(&text("next tuesday")), None);
        // 45356 is 2024-03-05 in the 1900 date system
        assert_eq!(parse_date(&CellValue::Number(45356.0)), expected);
        assert_eq!(parse_date(&CellValue::Number(-4.0)), None);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool(&text("Yes")), Some(true));
        assert_eq!(parse_bool(&text("x")), Some(true));
        assert_eq!(parse_bool(&text("FALSE")), Some(false));
        assert_eq!(parse_bool(&CellValue::Number(0.0)), Some(false));
        assert_eq!(parse_bool(&text("maybe")), None);
        assert_eq!(parse_bool(&CellValue::Empty), None);
    }
}
