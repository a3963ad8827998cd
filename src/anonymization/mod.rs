//! Anonymization module for rvanon
//!
//! Removes identifying information from RVTools inventory workbooks while
//! keeping references between sheets intact, and reverses the transformation
//! later from the mapping produced by the run.
//!
//! # Architecture
//!
//! The pipeline consists of:
//! - **Classification**: a static (header, sheet) rule table picks a strategy per column
//! - **Strategies**: sequential pseudonyms, topology-preserving address
//!   substitution, format-preserving hashing, constant redaction
//! - **Mapping store**: every association of one run, forward and reverse
//! - **Audit**: one structured entry per sheet, counts only
//!
//! # Usage
//!
//! ```rust,ignore
//! use rvanon::anonymization::{AnonymizationEngine, AnonymizationConfig};
//!
//! let engine = AnonymizationEngine::new(AnonymizationConfig::default())?;
//! let run = engine.anonymize_workbook(&workbook)?;
//! let restored = engine.deanonymize_workbook(&run.workbook, run.store.reverse_map());
//! ```

pub mod anonymizer;
pub mod audit;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod mapping;
pub mod report;
pub mod resolver;

// Re-export main types
pub use classifier::{FieldClassifier, FieldStrategy};
pub use config::AnonymizationConfig;
pub use engine::{AnonymizationEngine, AnonymizationRun, SheetOutcome};
pub use mapping::{EntityCategory, MappingStore};
pub use report::AnonymizationReport;
pub use resolver::{HeaderIdentifierResolver, RowIdentifierResolver};
