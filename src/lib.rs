// rvanon - RVTools inventory anonymizer
// Copyright (c) 2025 rvanon Contributors
// Licensed under the MIT License

//! # rvanon - RVTools inventory anonymizer
//!
//! rvanon replaces the identifying values of a VMware inventory export
//! (VM, host, cluster and datacenter names, IP and MAC addresses, UUIDs,
//! paths and free-text notes) with consistent pseudonyms, so the export can
//! be shared without exposing the environment. A mapping file produced
//! alongside the anonymized export restores the original values.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Reading** RVTools CSV exports into an abstract workbook
//! - **Consolidating** several exports into one workbook
//! - **Anonymizing** a workbook with per-column strategies
//! - **Deanonymizing** a workbook from a saved reverse map
//!
//! ## Architecture
//!
//! rvanon follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`anonymization`] - Classification, pseudonym generation and the mapping store
//! - [`core`] - Consolidation of several exports
//! - [`adapters`] - CSV workbooks and mapping documents on disk
//! - [`domain`] - Workbook model and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rvanon::adapters::{read_workbook, save_mapping, write_workbook};
//! use rvanon::anonymization::{AnonymizationConfig, AnonymizationEngine};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let workbook = read_workbook(Path::new("export"))?;
//!
//!     let engine = AnonymizationEngine::new(AnonymizationConfig::default())?;
//!     let run = engine.anonymize_workbook(&workbook)?;
//!
//!     write_workbook(Path::new("export_anonymized"), &run.workbook)?;
//!     save_mapping(Path::new("mapping.json"), &run.store)?;
//!
//!     println!("{}", run.report.format_console());
//!     Ok(())
//! }
//! ```
//!
//! ## Consistency
//!
//! One [`anonymization::MappingStore`] serves a whole run: the same original
//! value maps to the same pseudonym on every sheet, and two different
//! originals never share one. Entity pseudonyms are numbered in processing
//! order (`vHost`, `vCluster`, `vInfo` first), so `HOST-001` is always the
//! first host listed on `vHost`.
//!
//! ## Error Handling
//!
//! I/O and configuration code returns [`domain::RvanonError`]; the engine and
//! the CLI use `anyhow` with context:
//!
//! ```rust,no_run
//! use rvanon::domain::RvanonError;
//!
//! fn example() -> Result<(), RvanonError> {
//!     let config = rvanon::config::load_config("rvanon.toml")?;
//!     println!("{}", config.anonymization.entity_id_header);
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! rvanon uses structured logging with the `tracing` crate. Events carry
//! sheet names and counts, never inventory values:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(sheet = "vInfo", rows = 1200, "Processing sheet");
//! warn!(sheet = "vNetwork", "Sheet has no header row");
//! ```

pub mod adapters;
pub mod anonymization;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
