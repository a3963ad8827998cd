//! Main anonymization engine
//!
//! This module provides the [`AnonymizationEngine`] that walks a workbook,
//! classifies each column once from its header and sheet, and dispatches every
//! non-blank cell to the matching strategy. All associations end up in the
//! [`MappingStore`] owned by the run.
//!
//! Deanonymization is the blind inverse: every cell whose text is a key of the
//! reverse map is replaced, no classification involved.
//!
//! # Examples
//!
//! ```no_run
//! use rvanon::anonymization::{AnonymizationEngine, AnonymizationConfig};
//! use rvanon::domain::{Row, Sheet, Table, Workbook};
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut table = Table::with_headers(["VM", "VM ID", "IP Address"]);
//! table.push_row(Row::from_values(["webserver01", "vm-1042", "192.168.1.50"]));
//! let mut workbook = Workbook::new();
//! workbook.push_sheet(Sheet::new("vInfo", table));
//!
//! let engine = AnonymizationEngine::new(AnonymizationConfig::default())?;
//! let run = engine.anonymize_workbook(&workbook)?;
//! let restored = engine.deanonymize_workbook(&run.workbook, run.store.reverse_map());
//! assert_eq!(restored, workbook);
//! # Ok(())
//! # }
//! ```

use crate::anonymization::{
    anonymizer::{
        Anonymizer, CellContext, FormatPreservingHasher, IdentifierAnonymizer,
        NetworkAddressAnonymizer, RedactionStrategy,
    },
    audit::AuditLogger,
    classifier::{counts_toward_summary, normalize_sheet_name, FieldClassifier, FieldStrategy},
    config::AnonymizationConfig,
    mapping::MappingStore,
    report::{AnonymizationReport, SheetReport},
    resolver::{HeaderIdentifierResolver, RowIdentifierResolver},
};
use crate::domain::{is_blank, Row, Sheet, Table, Workbook};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::time::Instant;

/// Result of anonymizing one sheet
#[derive(Debug, Clone)]
pub struct SheetOutcome {
    /// The transformed table
    pub table: Table,

    /// Reverse entries added while processing this sheet
    pub mapping_delta: IndexMap<String, String>,

    /// Per-sheet statistics
    pub report: SheetReport,
}

/// Result of anonymizing a whole workbook
#[derive(Debug, Clone)]
pub struct AnonymizationRun {
    /// Anonymized workbook, sheets in their original order
    pub workbook: Workbook,

    /// Every association made during the run
    pub store: MappingStore,

    /// Run summary
    pub report: AnonymizationReport,
}

/// How one column is handled during a sheet pass
struct ColumnPlan {
    header: String,
    strategy: FieldStrategy,
    anonymizer: Option<Box<dyn Anonymizer>>,
}

/// Main anonymization engine
///
/// The engine itself holds configuration only; all run state lives in the
/// [`MappingStore`] passed to [`anonymize_sheet`](Self::anonymize_sheet) or
/// created by [`anonymize_workbook`](Self::anonymize_workbook), so one engine
/// can serve any number of independent runs.
pub struct AnonymizationEngine {
    config: AnonymizationConfig,
    classifier: FieldClassifier,
    resolver: Box<dyn RowIdentifierResolver>,
    audit_logger: AuditLogger,
}

impl AnonymizationEngine {
    /// Create a new anonymization engine
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails or the audit log
    /// directory cannot be created.
    pub fn new(config: AnonymizationConfig) -> Result<Self> {
        config
            .validate()
            .context("Invalid anonymization configuration")?;

        let audit_logger = if config.audit.enabled {
            AuditLogger::new(
                config.audit.log_path.clone(),
                config.audit.json_format,
                true,
            )?
        } else {
            AuditLogger::disabled()
        };

        let resolver = Box::new(HeaderIdentifierResolver::new(
            config.entity_id_header.clone(),
        ));

        Ok(Self {
            config,
            classifier: FieldClassifier::new(),
            resolver,
            audit_logger,
        })
    }

    /// Replace the row entity-identifier resolver
    pub fn with_resolver(mut self, resolver: impl RowIdentifierResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Engine configuration
    pub fn config(&self) -> &AnonymizationConfig {
        &self.config
    }

    /// Order in which sheets are processed (indices into `workbook.sheets`)
    ///
    /// Sheets named in `sheet_priority` come first in that order, the rest
    /// follow in workbook order.
    pub fn processing_order(&self, workbook: &Workbook) -> Vec<usize> {
        let mut order = Vec::with_capacity(workbook.sheets.len());

        for wanted in &self.config.sheet_priority {
            for (idx, sheet) in workbook.sheets.iter().enumerate() {
                if !order.contains(&idx)
                    && normalize_sheet_name(&sheet.name).eq_ignore_ascii_case(wanted.trim())
                {
                    order.push(idx);
                }
            }
        }

        for idx in 0..workbook.sheets.len() {
            if !order.contains(&idx) {
                order.push(idx);
            }
        }

        order
    }

    /// Anonymize every sheet of a workbook with a fresh mapping store
    pub fn anonymize_workbook(&self, workbook: &Workbook) -> Result<AnonymizationRun> {
        let start = Instant::now();
        let mut store = MappingStore::new();
        let mut report = AnonymizationReport::new();
        let mut tables: Vec<Option<Table>> = vec![None; workbook.sheets.len()];

        for idx in self.processing_order(workbook) {
            let sheet = &workbook.sheets[idx];
            if sheet.table.headers.is_empty() {
                report.add_warning(format!(
                    "Sheet '{}' has no header row and was copied unchanged",
                    sheet.name
                ));
            }

            let outcome = self
                .anonymize_sheet(&sheet.name, &sheet.table, &mut store)
                .with_context(|| format!("Failed to anonymize sheet '{}'", sheet.name))?;
            report.add_sheet(outcome.report);
            tables[idx] = Some(outcome.table);
        }

        let sheets = workbook
            .sheets
            .iter()
            .zip(tables)
            .map(|(sheet, table)| {
                Sheet::new(sheet.name.clone(), table.unwrap_or_else(|| sheet.table.clone()))
            })
            .collect();

        report.record_store_totals(&store);
        report.processing_time_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            sheets = report.sheets.len(),
            rows = report.total_rows(),
            cells = report.total_cells_transformed(),
            reverse_entries = report.reverse_entries,
            "Workbook anonymized"
        );

        Ok(AnonymizationRun {
            workbook: Workbook { sheets },
            store,
            report,
        })
    }

    /// Anonymize one sheet against an existing mapping store
    ///
    /// Returns the transformed table together with the reverse entries this
    /// sheet added to `store`.
    pub fn anonymize_sheet(
        &self,
        name: &str,
        table: &Table,
        store: &mut MappingStore,
    ) -> Result<SheetOutcome> {
        let start = Instant::now();
        let mark = store.reverse_len();
        let mut sheet_report = SheetReport::new(name);
        sheet_report.rows = table.row_count();

        crate::log_sheet_start!(name, table.row_count());

        let plan = self.plan_columns(name, &table.headers);
        let id_column = self.resolver.identifier_column(name, &table.headers);

        let rows: Vec<Row> = table
            .rows
            .iter()
            .map(|row| self.anonymize_row(name, row, &plan, id_column, store, &mut sheet_report))
            .collect();

        self.audit_logger
            .log_sheet(&sheet_report, &table.headers)
            .with_context(|| format!("Failed to write audit entry for sheet '{name}'"))?;

        crate::log_sheet_complete!(name, sheet_report.cells_transformed, start.elapsed());

        Ok(SheetOutcome {
            table: Table::new(table.headers.clone(), rows),
            mapping_delta: store.reverse_entries_since(mark),
            report: sheet_report,
        })
    }

    fn plan_columns(&self, sheet: &str, headers: &[String]) -> Vec<ColumnPlan> {
        headers
            .iter()
            .map(|header| {
                let strategy = self.classifier.classify(header, sheet);
                tracing::trace!(sheet, header = %header, strategy = strategy.name(), "Column classified");
                ColumnPlan {
                    header: header.clone(),
                    strategy,
                    anonymizer: self.anonymizer_for(strategy),
                }
            })
            .collect()
    }

    fn anonymizer_for(&self, strategy: FieldStrategy) -> Option<Box<dyn Anonymizer>> {
        match strategy {
            FieldStrategy::Identity(category) => Some(Box::new(IdentifierAnonymizer::new(category))),
            FieldStrategy::Host | FieldStrategy::Cluster | FieldStrategy::Datacenter => strategy
                .entity_category()
                .map(|category| Box::new(IdentifierAnonymizer::new(category)) as Box<dyn Anonymizer>),
            FieldStrategy::PathLike(prefix) => Some(Box::new(IdentifierAnonymizer::generic(prefix))),
            FieldStrategy::NetworkAddress => Some(Box::new(NetworkAddressAnonymizer::new())),
            FieldStrategy::Hash(format) => Some(Box::new(FormatPreservingHasher::for_format(
                format,
                self.config.uuid_min_length,
            ))),
            FieldStrategy::ConstantRedact(marker) => Some(Box::new(RedactionStrategy::new(marker))),
            FieldStrategy::NoChange => None,
        }
    }

    fn anonymize_row(
        &self,
        sheet: &str,
        row: &Row,
        plan: &[ColumnPlan],
        id_column: Option<usize>,
        store: &mut MappingStore,
        report: &mut SheetReport,
    ) -> Row {
        let entity_id = self.resolver.resolve(row, id_column);

        let cells = row
            .cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| {
                let Some(column) = plan.get(idx) else {
                    return cell.clone();
                };
                let (Some(anonymizer), Some(value)) = (&column.anonymizer, cell.as_deref()) else {
                    return cell.clone();
                };
                if is_blank(cell) {
                    return cell.clone();
                }
                if self.classifier.classify_cell(&column.header, sheet, value)
                    == FieldStrategy::NoChange
                {
                    return cell.clone();
                }

                let context = CellContext {
                    entity_id,
                    source: row.source.as_deref(),
                    counts_toward_summary: column
                        .strategy
                        .entity_category()
                        .is_some_and(|category| counts_toward_summary(category, sheet)),
                };

                let output = anonymizer.anonymize(store, value, &context);
                if output == value {
                    return cell.clone();
                }

                if anonymizer.is_reversible() {
                    // Multi-value cells need a whole-cell entry to round trip.
                    store.record_reverse(&output, value);
                }
                report.record_transformed(column.strategy.name());
                Some(output)
            })
            .collect();

        Row {
            cells,
            source: row.source.clone(),
        }
    }

    /// Restore a table using a reverse map
    ///
    /// Every non-blank cell whose text is a key of `reverse_map` is replaced;
    /// everything else is left untouched. The entity-identifier column is
    /// skipped because VM pseudonyms are taken from it.
    pub fn deanonymize_table(
        &self,
        name: &str,
        table: &Table,
        reverse_map: &IndexMap<String, String>,
    ) -> Table {
        let id_column = self.resolver.identifier_column(name, &table.headers);
        let mut restored = 0usize;

        let rows: Vec<Row> = table
            .rows
            .iter()
            .map(|row| {
                let cells = row
                    .cells
                    .iter()
                    .enumerate()
                    .map(|(idx, cell)| {
                        if Some(idx) == id_column || is_blank(cell) {
                            return cell.clone();
                        }
                        match cell.as_deref().and_then(|value| reverse_map.get(value)) {
                            Some(original) => {
                                restored += 1;
                                Some(original.clone())
                            }
                            None => cell.clone(),
                        }
                    })
                    .collect();
                Row {
                    cells,
                    source: row.source.clone(),
                }
            })
            .collect();

        tracing::debug!(sheet = name, cells = restored, "Sheet deanonymized");

        Table::new(table.headers.clone(), rows)
    }

    /// Restore every sheet of a workbook using a reverse map
    pub fn deanonymize_workbook(
        &self,
        workbook: &Workbook,
        reverse_map: &IndexMap<String, String>,
    ) -> Workbook {
        let sheets = workbook
            .sheets
            .iter()
            .map(|sheet| {
                Sheet::new(
                    sheet.name.clone(),
                    self.deanonymize_table(&sheet.name, &sheet.table, reverse_map),
                )
            })
            .collect();

        Workbook { sheets }
    }
}
