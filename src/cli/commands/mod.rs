//! CLI command implementations
//!
//! This module contains all CLI command implementations together with the
//! input/output plumbing they share.

pub mod anonymize;
pub mod both;
pub mod consolidate;
pub mod deanonymize;
pub mod validate;

use crate::adapters::{discover_exports, read_workbook, write_workbook};
use crate::anonymization::{AnonymizationEngine, AnonymizationRun};
use crate::config::RvanonConfig;
use crate::domain::Workbook;
use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Use the given inputs, or discover exports in the working directory
pub(crate) fn resolve_inputs(inputs: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    if !inputs.is_empty() {
        return Ok(inputs.to_vec());
    }

    let found = discover_exports(Path::new(".")).context("Failed to scan for RVTools exports")?;
    if found.is_empty() {
        bail!("No RVTools exports found in the current directory");
    }

    tracing::info!(count = found.len(), "Discovered RVTools exports");
    for path in &found {
        println!("📂 Found export: {}", path.display());
    }
    Ok(found)
}

/// Label used to tag rows read from `path`
pub(crate) fn source_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read every input as a labelled workbook
pub(crate) fn read_inputs(inputs: &[PathBuf]) -> anyhow::Result<Vec<(String, Workbook)>> {
    inputs
        .iter()
        .map(|path| {
            let workbook = read_workbook(path)
                .with_context(|| format!("Failed to read export {}", path.display()))?;
            Ok((source_label(path), workbook))
        })
        .collect()
}

/// Timestamped default name, e.g. `RVTools_Anonymized_20250301_1430`
pub(crate) fn timestamped_name(prefix: &str, now: DateTime<Utc>) -> String {
    format!("{}_{}", prefix, now.format("%Y%m%d_%H%M"))
}

/// Explicit output directory, or a timestamped one under `output.directory`
pub(crate) fn output_dir(
    explicit: Option<&Path>,
    config: &RvanonConfig,
    prefix: &str,
    now: DateTime<Utc>,
) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => config.output.directory.join(timestamped_name(prefix, now)),
    }
}

/// Explicit mapping file, or a timestamped one under `output.mapping_directory`
pub(crate) fn mapping_path(
    explicit: Option<&Path>,
    config: &RvanonConfig,
    now: DateTime<Utc>,
) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => config
            .output
            .mapping_directory
            .join(crate::adapters::default_mapping_filename(now)),
    }
}

/// Anonymize `workbook`, then write the result and its mapping unless dry-run
pub(crate) fn anonymize_and_write(
    workbook: &Workbook,
    config: &RvanonConfig,
    output: &Path,
    mapping: &Path,
    dry_run: bool,
) -> anyhow::Result<AnonymizationRun> {
    let engine = AnonymizationEngine::new(config.anonymization.clone())?;

    println!("🔒 Anonymizing {} sheets...", workbook.sheets.len());
    let run = engine.anonymize_workbook(workbook)?;

    println!("{}", run.report.format_console());

    if dry_run {
        tracing::info!("Dry run mode enabled - no files written");
        println!("🔍 DRY RUN MODE - no output or mapping files were written");
        return Ok(run);
    }

    write_workbook(output, &run.workbook)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("✅ Anonymized export written to {}", output.display());

    let report_path = output.join("anonymization_report.json");
    run.report
        .write_to_file(&report_path)
        .with_context(|| format!("Failed to write {}", report_path.display()))?;

    if let Some(parent) = mapping.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    crate::adapters::save_mapping(mapping, &run.store)
        .with_context(|| format!("Failed to save mapping {}", mapping.display()))?;
    println!("🗝️  Mapping saved to {}", mapping.display());
    println!("   Keep this file private: it restores every original value.");

    Ok(run)
}
