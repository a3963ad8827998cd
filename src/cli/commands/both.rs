//! Both command implementation
//!
//! Consolidates every input and anonymizes the merged workbook in one go.

use super::{anonymize_and_write, mapping_path, output_dir, read_inputs, resolve_inputs};
use crate::config::RvanonConfig;
use crate::core::consolidate;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the both command
#[derive(Args, Debug)]
pub struct BothArgs {
    /// Export directories to merge (discovered in the current directory when omitted)
    pub inputs: Vec<PathBuf>,

    /// Output directory (defaults to RVTools_Consolidated_Anonymized_<timestamp>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Mapping file to write (defaults to mapping_<timestamp>.json)
    #[arg(long)]
    pub mapping: Option<PathBuf>,
}

impl BothArgs {
    /// Execute the both command
    pub fn execute(&self, config: &RvanonConfig) -> anyhow::Result<i32> {
        tracing::info!(inputs = self.inputs.len(), "Starting consolidate + anonymize");

        let inputs = resolve_inputs(&self.inputs)?;
        let workbooks = read_inputs(&inputs)?;

        println!("🔗 Consolidating {} exports...", workbooks.len());
        let (workbook, summary) = consolidate(workbooks);
        println!("{}", summary.format_console());

        let now = chrono::Utc::now();
        let output = output_dir(
            self.output.as_deref(),
            config,
            "RVTools_Consolidated_Anonymized",
            now,
        );
        let mapping = mapping_path(self.mapping.as_deref(), config, now);

        anonymize_and_write(
            &workbook,
            config,
            &output,
            &mapping,
            config.application.dry_run,
        )?;
        Ok(0)
    }
}
