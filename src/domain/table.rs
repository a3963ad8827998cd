//! Abstract tabular model
//!
//! Inventory exports are handled as a [`Workbook`]: an ordered list of named
//! [`Sheet`]s, each holding a [`Table`] of ordered headers and rows of
//! nullable cells. Readers and writers in [`crate::adapters`] translate between
//! this model and files on disk; the anonymization engine only ever sees this
//! model.

use serde::{Deserialize, Serialize};

/// A single nullable cell value
pub type Cell = Option<String>;

/// Returns true when a cell carries no usable value (null or whitespace only)
pub fn is_blank(cell: &Cell) -> bool {
    cell.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// One data row
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Row {
    /// Cell values, positionally aligned with the table headers
    pub cells: Vec<Cell>,

    /// Label of the input the row came from (set by consolidation)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Row {
    /// Creates a row without a source label
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            source: None,
        }
    }

    /// Creates a row from plain string values; empty strings become null cells
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cells = values
            .into_iter()
            .map(|v| {
                let v = v.into();
                if v.is_empty() {
                    None
                } else {
                    Some(v)
                }
            })
            .collect();
        Self::new(cells)
    }

    /// Sets the source label
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the cell at `index`, treating out-of-range as null
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).and_then(|c| c.as_deref())
    }
}

/// Ordered headers plus data rows
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Table {
    /// Column headers (the first row of the sheet)
    pub headers: Vec<String>,

    /// Data rows
    pub rows: Vec<Row>,
}

impl Table {
    /// Creates a table from headers and rows
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    /// Creates an empty table with the given headers
    pub fn with_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(headers.into_iter().map(Into::into).collect(), Vec::new())
    }

    /// Appends a row
    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Position of a header, compared after trimming
    pub fn column_index(&self, header: &str) -> Option<usize> {
        let header = header.trim();
        self.headers.iter().position(|h| h.trim() == header)
    }

    /// Value of a named column in a given row
    pub fn value(&self, row: usize, header: &str) -> Option<&str> {
        let column = self.column_index(header)?;
        self.rows.get(row)?.get(column)
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A named sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet name (e.g. `vInfo`)
    pub name: String,

    /// Sheet contents
    pub table: Table,
}

impl Sheet {
    /// Creates a named sheet
    pub fn new(name: impl Into<String>, table: Table) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }
}

/// An ordered collection of sheets
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Workbook {
    /// Sheets in their original order
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Creates an empty workbook
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sheet
    pub fn push_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    /// Looks up a sheet by exact name
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Names of all sheets, in order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Total number of data rows across all sheets
    pub fn total_rows(&self) -> usize {
        self.sheets.iter().map(|s| s.table.row_count()).sum()
    }
}
