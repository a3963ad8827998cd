//! Configuration management for rvanon.
//!
//! rvanon reads an optional TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every setting
//! - `RVANON_<SECTION>_<KEY>` environment overrides
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rvanon::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("rvanon.toml")?;
//! println!("Entity ID column: {}", config.anonymization.entity_id_header);
//! println!("Output directory: {}", config.output.directory.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level, dry run
//! - [`AnonymizationConfig`](crate::anonymization::AnonymizationConfig) - entity ID
//!   column, sheet priority, UUID threshold, audit log
//! - [`OutputConfig`] - output and mapping directories
//! - [`LoggingConfig`] - local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [anonymization]
//! entity_id_header = "VM ID"
//! sheet_priority = ["vHost", "vCluster", "vInfo"]
//! uuid_min_length = 20
//!
//! [anonymization.audit]
//! enabled = true
//! log_path = "./audit/anonymization.log"
//!
//! [output]
//! directory = "./out"
//! mapping_directory = "${RVANON_MAPPING_DIR}"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, DEFAULT_CONFIG_PATH};
pub use schema::{ApplicationConfig, LoggingConfig, OutputConfig, RvanonConfig};
