//! External collaborators of the anonymization engine.
//!
//! - [`csv_workbook`] - reads and writes workbooks stored as one CSV per sheet,
//!   and discovers RVTools exports on disk
//! - [`mapping_file`] - persists the mapping document a later
//!   deanonymization run consumes
//!
//! # Example
//!
//! ```rust,no_run
//! use rvanon::adapters::{csv_workbook, mapping_file};
//! use std::path::Path;
//!
//! # fn example() -> rvanon::domain::Result<()> {
//! let workbook = csv_workbook::read_workbook(Path::new("exports/siteA"))?;
//! let reverse = mapping_file::load_reverse_map(Path::new("mapping.json"))?;
//! println!("{} sheets, {} mapping entries", workbook.sheets.len(), reverse.len());
//! # Ok(())
//! # }
//! ```

pub mod csv_workbook;
pub mod mapping_file;

pub use csv_workbook::{discover_exports, read_workbook, write_workbook};
pub use mapping_file::{default_mapping_filename, load_reverse_map, save_mapping, MappingDocument};
