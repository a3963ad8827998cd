//! Run reporting for anonymization
//!
//! Summarizes what one run touched: per-sheet row and cell counts, distinct
//! entities per category, and the size of the mapping produced. Original
//! values never appear in the report.

use crate::anonymization::mapping::{EntityCategory, MappingStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-sheet statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetReport {
    /// Sheet name
    pub name: String,

    /// Data rows processed
    pub rows: usize,

    /// Cells whose value changed
    pub cells_transformed: usize,

    /// Changed cells by strategy name
    pub strategy_counts: BTreeMap<String, usize>,
}

impl SheetReport {
    /// Create an empty report for a sheet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Count one transformed cell
    pub fn record_transformed(&mut self, strategy: &str) {
        self.cells_transformed += 1;
        *self.strategy_counts.entry(strategy.to_string()).or_insert(0) += 1;
    }
}

/// Summary of one anonymization run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnonymizationReport {
    /// Sheets in processing order
    pub sheets: Vec<SheetReport>,

    /// Distinct entities per category, counted on canonical sheets only
    pub entity_counts: BTreeMap<EntityCategory, usize>,

    /// Distinct address values anonymized
    pub addresses_anonymized: usize,

    /// Distinct MAC/UUID values hashed
    pub values_hashed: usize,

    /// Entries in the reverse map
    pub reverse_entries: usize,

    /// Things worth a second look
    pub warnings: Vec<String>,

    /// Wall-clock time of the run
    pub processing_time_ms: u64,
}

impl AnonymizationReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet's statistics
    pub fn add_sheet(&mut self, sheet: SheetReport) {
        self.sheets.push(sheet);
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Copy the run totals out of the mapping store
    pub fn record_store_totals(&mut self, store: &MappingStore) {
        self.entity_counts = store.entity_counts();
        self.addresses_anonymized = store.ip_forward_map().len();
        self.values_hashed = store.hash_forward_map().len();
        self.reverse_entries = store.reverse_len();
    }

    /// Total data rows over all sheets
    pub fn total_rows(&self) -> usize {
        self.sheets.iter().map(|s| s.rows).sum()
    }

    /// Total changed cells over all sheets
    pub fn total_cells_transformed(&self) -> usize {
        self.sheets.iter().map(|s| s.cells_transformed).sum()
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("                    ANONYMIZATION REPORT                       \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output.push_str("📊 SUMMARY\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!("  Sheets Processed:      {}\n", self.sheets.len()));
        output.push_str(&format!("  Rows Processed:        {}\n", self.total_rows()));
        output.push_str(&format!(
            "  Cells Transformed:     {}\n",
            self.total_cells_transformed()
        ));
        output.push_str(&format!(
            "  Addresses Anonymized:  {}\n",
            self.addresses_anonymized
        ));
        output.push_str(&format!("  Values Hashed:         {}\n", self.values_hashed));
        output.push_str(&format!("  Reverse Map Entries:   {}\n", self.reverse_entries));
        output.push_str(&format!(
            "  Processing Time:       {} ms\n",
            self.processing_time_ms
        ));
        output.push('\n');

        output.push_str("🔍 ENTITIES\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        for category in EntityCategory::ALL {
            if category == EntityCategory::Generic {
                continue;
            }
            let count = self.entity_counts.get(&category).copied().unwrap_or(0);
            output.push_str(&format!("  {:30} {:>5}\n", format!("{:?}", category), count));
        }
        output.push('\n');

        let busy: Vec<_> = self
            .sheets
            .iter()
            .filter(|s| s.cells_transformed > 0)
            .collect();
        if !busy.is_empty() {
            output.push_str("📝 SHEETS\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for sheet in busy {
                output.push_str(&format!(
                    "  {:20} rows {:>6}  cells {:>7}\n",
                    sheet.name, sheet.rows, sheet.cells_transformed
                ));
            }
            output.push('\n');
        }

        if !self.warnings.is_empty() {
            output.push_str("⚠️  WARNINGS\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for warning in &self.warnings {
                output.push_str(&format!("  • {}\n", warning));
            }
            output.push('\n');
        }

        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write report to file
    pub fn write_to_file(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = self.format_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}
