//! Anonymization strategy module
//!
//! Provides the per-category strategies applied to individual cells. All
//! strategies are stateless; every association they create lives in the
//! [`MappingStore`] passed to them.

pub mod hashing;
pub mod identifier;
pub mod network;
pub mod redaction;

use crate::anonymization::mapping::MappingStore;

pub use hashing::{FormatPreservingHasher, HashFormat};
pub use identifier::IdentifierAnonymizer;
pub use network::NetworkAddressAnonymizer;
pub use redaction::RedactionStrategy;

/// Row-scoped information available while transforming one cell
#[derive(Debug, Clone, Copy, Default)]
pub struct CellContext<'a> {
    /// The row's canonical entity identifier (e.g. the VM ID), if the sheet has one
    pub entity_id: Option<&'a str>,
    /// Label of the input the row came from
    pub source: Option<&'a str>,
    /// Whether the value should be counted in the per-category summary
    pub counts_toward_summary: bool,
}

/// Trait for anonymization strategy implementations
pub trait Anonymizer {
    /// Transform a single non-empty cell value
    fn anonymize(&self, store: &mut MappingStore, value: &str, context: &CellContext<'_>)
        -> String;

    /// Whether the strategy's output can be mapped back to the original
    fn is_reversible(&self) -> bool {
        true
    }
}
