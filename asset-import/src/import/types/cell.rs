//! Raw spreadsheet rows as read from a workbook or CSV file

use chrono::NaiveDateTime;

/// A single cell value, independent of the source file format
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Blank cell
    #[default]
    Empty,
    /// Text cell
    Text(String),
    /// Numeric cell (integers are widened)
    Number(f64),
    /// Boolean cell
    Bool(bool),
    /// Cell the workbook marked as a date/time
    Date(NaiveDateTime),
}

impl CellValue {
    /// Build a cell from text, treating whitespace-only input as blank
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.trim().is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s)
        }
    }

    /// Check if this cell carries no usable value
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

/// One physical spreadsheet row below the header row
///
/// Cells are kept in header order. Headers are stored trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 1-based sheet row number (the header is row 1)
    pub row_number: usize,
    cells: Vec<(String, CellValue)>,
}

impl RawRow {
    pub fn new(row_number: usize) -> Self {
        Self {
            row_number,
            cells: Vec::new(),
        }
    }

    /// Build a row from header/value pairs
    pub fn from_pairs<H, I>(row_number: usize, pairs: I) -> Self
    where
        H: Into<String>,
        I: IntoIterator<Item = (H, CellValue)>,
    {
        let mut row = Self::new(row_number);
        for (header, value) in pairs {
            row.push(header, value);
        }
        row
    }

    /// Append a cell. A repeated header keeps its first position.
    pub fn push(&mut self, header: impl Into<String>, value: CellValue) {
        let header = header.into().trim().to_string();
        if header.is_empty() || self.cells.iter().any(|(h, _)| *h == header) {
            return;
        }
        self.cells.push((header, value));
    }

    /// Look up a cell by exact header
    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v)
    }

    /// Headers in sheet order
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(h, _)| h.as_str())
    }

    /// True when every cell is blank
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, v)| v.is_empty())
    }
}
