//! Deanonymize command implementation
//!
//! Restores original values in an anonymized export using the reverse map of
//! a mapping file.

use super::{output_dir, resolve_inputs};
use crate::adapters::{load_reverse_map, read_workbook, write_workbook};
use crate::anonymization::AnonymizationEngine;
use crate::config::RvanonConfig;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the deanonymize command
#[derive(Args, Debug)]
pub struct DeanonymizeArgs {
    /// Anonymized export directory (discovered in the current directory when omitted)
    pub inputs: Vec<PathBuf>,

    /// Mapping file produced by `anonymize` or `both`
    #[arg(short, long)]
    pub mapping: PathBuf,

    /// Output directory (defaults to RVTools_Deanonymized_<timestamp>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl DeanonymizeArgs {
    /// Execute the deanonymize command
    pub fn execute(&self, config: &RvanonConfig) -> anyhow::Result<i32> {
        tracing::info!(mapping = %self.mapping.display(), "Starting deanonymize command");

        let reverse_map = load_reverse_map(&self.mapping)?;
        println!(
            "🗝️  Loaded {} mapping entries from {}",
            reverse_map.len(),
            self.mapping.display()
        );

        let inputs = resolve_inputs(&self.inputs)?;
        let input = &inputs[0];
        let workbook = read_workbook(input)
            .with_context(|| format!("Failed to read export {}", input.display()))?;

        let engine = AnonymizationEngine::new(config.anonymization.clone())?;
        let restored = engine.deanonymize_workbook(&workbook, &reverse_map);

        let output = output_dir(
            self.output.as_deref(),
            config,
            "RVTools_Deanonymized",
            chrono::Utc::now(),
        );

        if config.application.dry_run {
            println!("🔍 DRY RUN MODE - {} was not written", output.display());
            return Ok(0);
        }

        write_workbook(&output, &restored)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        println!("✅ Deanonymized export written to {}", output.display());

        Ok(0)
    }
}
