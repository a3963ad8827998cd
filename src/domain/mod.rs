//! Domain models and types for rvanon.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Tabular model** ([`Workbook`], [`Sheet`], [`Table`], [`Row`], [`Cell`])
//! - **Error types** ([`RvanonError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible library operations return [`Result<T, RvanonError>`]:
//!
//! ```rust,no_run
//! use rvanon::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = rvanon::config::load_config("rvanon.toml")?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod result;
pub mod table;

// Re-export commonly used types for convenience
pub use errors::RvanonError;
pub use result::Result;
pub use table::{is_blank, Cell, Row, Sheet, Table, Workbook};
