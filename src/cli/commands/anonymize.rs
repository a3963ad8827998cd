//! Anonymize command implementation
//!
//! This module implements the `anonymize` command. Only the first input is
//! anonymized; use `both` to merge several exports first.

use super::{anonymize_and_write, mapping_path, output_dir, resolve_inputs};
use crate::adapters::read_workbook;
use crate::config::RvanonConfig;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// Export directory to anonymize (discovered in the current directory when omitted)
    pub inputs: Vec<PathBuf>,

    /// Output directory (defaults to RVTools_Anonymized_<timestamp>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Mapping file to write (defaults to mapping_<timestamp>.json)
    #[arg(long)]
    pub mapping: Option<PathBuf>,

    /// Run the anonymization and print the report without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    pub fn execute(&self, config: &RvanonConfig) -> anyhow::Result<i32> {
        tracing::info!("Starting anonymize command");

        let inputs = resolve_inputs(&self.inputs)?;
        if inputs.len() > 1 {
            tracing::warn!(
                ignored = inputs.len() - 1,
                "Only the first export is anonymized"
            );
            println!(
                "⚠️  {} exports given; only {} will be anonymized (use `both` to merge first)",
                inputs.len(),
                inputs[0].display()
            );
        }

        let input = &inputs[0];
        let workbook = read_workbook(input)
            .with_context(|| format!("Failed to read export {}", input.display()))?;

        let now = chrono::Utc::now();
        let output = output_dir(self.output.as_deref(), config, "RVTools_Anonymized", now);
        let mapping = mapping_path(self.mapping.as_deref(), config, now);
        let dry_run = self.dry_run || config.application.dry_run;

        anonymize_and_write(&workbook, config, &output, &mapping, dry_run)?;
        Ok(0)
    }
}
