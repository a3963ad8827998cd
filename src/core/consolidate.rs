//! Consolidation of several inventory exports into one workbook
//!
//! Sheets with the same name are concatenated. Columns are aligned by header
//! name: the merged header row is the ordered union of every input's headers,
//! and rows from an input lacking a column get a null cell there. Each row
//! keeps the label of the input it came from.

use crate::domain::{Row, Sheet, Table, Workbook};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Summary of a consolidation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsolidationSummary {
    /// Input labels, in merge order
    pub inputs: Vec<String>,

    /// Total rows per consolidated sheet, in output order
    pub sheet_rows: IndexMap<String, usize>,
}

impl ConsolidationSummary {
    /// Total rows over all sheets
    pub fn total_rows(&self) -> usize {
        self.sheet_rows.values().sum()
    }

    /// Human-readable summary for the console
    pub fn format_console(&self) -> String {
        let mut output = String::new();
        output.push_str("\nConsolidation Summary:\n");
        output.push_str(&format!("  Inputs processed: {}\n", self.inputs.len()));
        output.push_str("  Sheets consolidated:\n");
        for (sheet, rows) in &self.sheet_rows {
            output.push_str(&format!("    - {}: {} total rows\n", sheet, rows));
        }
        output
    }
}

/// Merge labelled workbooks into one
pub fn consolidate(inputs: Vec<(String, Workbook)>) -> (Workbook, ConsolidationSummary) {
    let mut merged: IndexMap<String, Table> = IndexMap::new();
    let mut summary = ConsolidationSummary::default();

    for (label, workbook) in inputs {
        tracing::info!(input = %label, sheets = workbook.sheets.len(), "Consolidating input");
        for sheet in workbook.sheets {
            let target = merged.entry(sheet.name).or_default();
            append_table(target, sheet.table, &label);
        }
        summary.inputs.push(label);
    }

    let sheets: Vec<Sheet> = merged
        .into_iter()
        .map(|(name, table)| Sheet::new(name, table))
        .collect();

    summary.sheet_rows = sheets
        .iter()
        .map(|s| (s.name.clone(), s.table.row_count()))
        .collect();

    tracing::info!(
        inputs = summary.inputs.len(),
        sheets = sheets.len(),
        rows = summary.total_rows(),
        "Consolidation finished"
    );

    (Workbook { sheets }, summary)
}

fn append_table(target: &mut Table, table: Table, label: &str) {
    // Position of each incoming column in the merged header row
    let positions: Vec<usize> = table
        .headers
        .iter()
        .map(|header| match target.column_index(header) {
            Some(idx) => idx,
            None => {
                target.headers.push(header.clone());
                target.headers.len() - 1
            }
        })
        .collect();

    let width = target.headers.len();
    for row in &mut target.rows {
        row.cells.resize(width, None);
    }

    for row in table.rows {
        let mut cells = vec![None; width];
        for (idx, cell) in row.cells.into_iter().enumerate() {
            match positions.get(idx) {
                Some(&pos) => cells[pos] = cell,
                // Cells beyond the header row have nowhere to go.
                None if cell.is_some() => {
                    tracing::warn!(input = label, column = idx, "Dropping cell without header");
                }
                None => {}
            }
        }
        let source = row.source.unwrap_or_else(|| label.to_string());
        target.push_row(Row::new(cells).with_source(source));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workbook(name: &str, headers: &[&str], rows: &[&[&str]]) -> Workbook {
        let mut table = Table::with_headers(headers.iter().copied());
        for row in rows {
            table.push_row(Row::from_values(row.iter().copied()));
        }
        Workbook {
            sheets: vec![Sheet::new(name, table)],
        }
    }

    #[test]
    fn test_rows_are_concatenated_and_tagged() {
        let (merged, summary) = consolidate(vec![
            ("siteA".to_string(), workbook("vInfo", &["VM", "VM ID"], &[&["web01", "vm-1"]])),
            ("siteB".to_string(), workbook("vInfo", &["VM", "VM ID"], &[&["db01", "vm-1"]])),
        ]);

        let table = &merged.sheet("vInfo").unwrap().table;
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0].source.as_deref(), Some("siteA"));
        assert_eq!(table.rows[1].source.as_deref(), Some("siteB"));
        assert_eq!(summary.inputs, vec!["siteA", "siteB"]);
        assert_eq!(summary.sheet_rows.get("vInfo"), Some(&2));
    }

    #[test]
    fn test_headers_are_unioned_and_rows_realigned() {
        let (merged, _) = consolidate(vec![
            ("a".to_string(), workbook("vInfo", &["VM", "Host"], &[&["web01", "esx01"]])),
            ("b".to_string(), workbook("vInfo", &["Host", "VM", "Cluster"], &[&["esx02", "web02", "prod"]])),
        ]);

        let table = &merged.sheet("vInfo").unwrap().table;
        assert_eq!(table.headers, vec!["VM", "Host", "Cluster"]);
        assert_eq!(
            table.rows[0].cells,
            vec![Some("web01".to_string()), Some("esx01".to_string()), None]
        );
        assert_eq!(
            table.rows[1].cells,
            vec![Some("web02".to_string()), Some("esx02".to_string()), Some("prod".to_string())]
        );
    }

    #[test]
    fn test_sheet_order_is_first_seen() {
        let mut first = workbook("vInfo", &["VM"], &[]);
        first.push_sheet(Sheet::new("vHost", Table::with_headers(["Host"])));
        let second = workbook("vCluster", &["Name"], &[]);

        let (merged, summary) = consolidate(vec![("a".to_string(), first), ("b".to_string(), second)]);

        assert_eq!(merged.sheet_names(), vec!["vInfo", "vHost", "vCluster"]);
        assert_eq!(summary.total_rows(), 0);
        assert!(summary.format_console().contains("vCluster: 0 total rows"));
    }
}
