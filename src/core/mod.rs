//! Core workflows for rvanon.
//!
//! # Modules
//!
//! - [`consolidate`] - merge several inventory exports into one workbook
//!
//! # Example
//!
//! ```rust,no_run
//! use rvanon::adapters::csv_workbook::read_workbook;
//! use rvanon::core::consolidate::consolidate;
//! use std::path::Path;
//!
//! # fn example() -> rvanon::domain::Result<()> {
//! let a = read_workbook(Path::new("exports/siteA"))?;
//! let b = read_workbook(Path::new("exports/siteB"))?;
//! let (merged, summary) = consolidate(vec![("siteA".into(), a), ("siteB".into(), b)]);
//! println!("{}", summary.format_console());
//! # Ok(())
//! # }
//! ```

pub mod consolidate;

pub use consolidate::{consolidate, ConsolidationSummary};
