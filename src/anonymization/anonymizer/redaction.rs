//! Constant redaction strategy

use super::{Anonymizer, CellContext};
use crate::anonymization::mapping::MappingStore;

/// Redaction strategy - replaces every value with one constant marker
///
/// Redacted values are not recorded in the mapping store: many originals
/// collapse onto one marker, so there is nothing to reverse.
#[derive(Debug, Clone, Copy)]
pub struct RedactionStrategy {
    replacement: &'static str,
}

impl RedactionStrategy {
    /// Create a new redaction strategy
    pub fn new(replacement: &'static str) -> Self {
        Self { replacement }
    }
}

impl Anonymizer for RedactionStrategy {
    fn anonymize(&self, _store: &mut MappingStore, _value: &str, _context: &CellContext<'_>) -> String {
        self.replacement.to_string()
    }

    fn is_reversible(&self) -> bool {
        false
    }
}
