//! Consolidate command implementation
//!
//! This module implements the `consolidate` command, which merges several
//! RVTools exports into one workbook without anonymizing it.

use super::{output_dir, read_inputs, resolve_inputs};
use crate::adapters::write_workbook;
use crate::config::RvanonConfig;
use crate::core::consolidate;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the consolidate command
#[derive(Args, Debug)]
pub struct ConsolidateArgs {
    /// Export directories to merge (discovered in the current directory when omitted)
    pub inputs: Vec<PathBuf>,

    /// Output directory (defaults to RVTools_Combined_<timestamp>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ConsolidateArgs {
    /// Execute the consolidate command
    pub fn execute(&self, config: &RvanonConfig) -> anyhow::Result<i32> {
        tracing::info!(inputs = self.inputs.len(), "Starting consolidate command");

        let inputs = resolve_inputs(&self.inputs)?;
        let workbooks = read_inputs(&inputs)?;

        println!("🔗 Consolidating {} exports...", workbooks.len());
        let (workbook, summary) = consolidate(workbooks);
        println!("{}", summary.format_console());

        let output = output_dir(
            self.output.as_deref(),
            config,
            "RVTools_Combined",
            chrono::Utc::now(),
        );

        if config.application.dry_run {
            println!("🔍 DRY RUN MODE - {} was not written", output.display());
            return Ok(0);
        }

        write_workbook(&output, &workbook)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        println!(
            "✅ Consolidated export ({} rows) written to {}",
            summary.total_rows(),
            output.display()
        );

        Ok(0)
    }
}
