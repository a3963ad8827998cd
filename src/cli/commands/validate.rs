//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the rvanon configuration file.

use crate::config::{load_config_or_default, DEFAULT_CONFIG_PATH};
use clap::Args;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        let shown = config_path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        tracing::info!(config_path = %shown, "Validating configuration");

        println!("🔍 Validating configuration file: {shown}");
        println!();

        // Loading applies overrides and validates
        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!(
            "  Entity ID Column: {}",
            config.anonymization.entity_id_header
        );
        println!(
            "  Sheet Priority: {}",
            config.anonymization.sheet_priority.join(", ")
        );
        println!(
            "  UUID Min Length: {}",
            config.anonymization.uuid_min_length
        );
        println!("  Audit Log: {}", config.anonymization.audit.enabled);
        println!("  Output Directory: {}", config.output.directory.display());
        println!(
            "  Mapping Directory: {}",
            config.output.mapping_directory.display()
        );
        println!("  File Logging: {}", config.logging.local_enabled);
        println!();
        Ok(0)
    }
}
