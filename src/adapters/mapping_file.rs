//! Mapping document persistence
//!
//! The mapping document is the only artifact that can undo an anonymization
//! run. It is plain JSON and contains every original value; treat it like the
//! original export.

use crate::anonymization::mapping::{EntityCategory, MappingStore};
use crate::domain::{Result, RvanonError};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Persisted form of a [`MappingStore`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingDocument {
    /// When the run finished
    pub created_at: DateTime<Utc>,

    /// Anonymized -> original; all deanonymization needs
    pub reverse_map: IndexMap<String, String>,

    /// Name pseudonyms (original -> anonymized)
    #[serde(default)]
    pub forward_map: IndexMap<String, String>,

    /// Address substitutions (original -> anonymized)
    #[serde(default)]
    pub ip_map: IndexMap<String, String>,

    /// MAC/UUID digests (original -> anonymized)
    #[serde(default)]
    pub hash_map: IndexMap<String, String>,

    /// Distinct entities per category
    #[serde(default)]
    pub entity_counts: BTreeMap<EntityCategory, usize>,
}

impl MappingDocument {
    /// Snapshot a store
    pub fn from_store(store: &MappingStore) -> Self {
        Self {
            created_at: Utc::now(),
            reverse_map: store.reverse_map().clone(),
            forward_map: store.forward_map().clone(),
            ip_map: store.ip_forward_map().clone(),
            hash_map: store.hash_forward_map().clone(),
            entity_counts: store.entity_counts(),
        }
    }
}

/// Default mapping file name, e.g. `mapping_20250301_1422.json`
pub fn default_mapping_filename(now: DateTime<Utc>) -> String {
    format!("mapping_{}.json", now.format("%Y%m%d_%H%M"))
}

/// Write the store's mapping document as pretty JSON
pub fn save_mapping(path: &Path, store: &MappingStore) -> Result<MappingDocument> {
    let document = MappingDocument::from_store(store);
    let json = serde_json::to_string_pretty(&document)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json).map_err(|e| {
        RvanonError::Mapping(format!("Failed to write mapping file {}: {}", path.display(), e))
    })?;

    tracing::info!(
        path = %path.display(),
        entries = document.reverse_map.len(),
        "Mapping saved"
    );
    Ok(document)
}

/// Load the reverse map from a mapping document
///
/// Accepts the full document or a bare `{"anonymized": "original"}` object.
///
/// # Errors
///
/// A missing or unparsable file is [`RvanonError::Mapping`]; nothing is
/// restored from a half-readable mapping.
pub fn load_reverse_map(path: &Path) -> Result<IndexMap<String, String>> {
    let contents = fs::read_to_string(path).map_err(|e| {
        RvanonError::Mapping(format!("Failed to read mapping file {}: {}", path.display(), e))
    })?;

    let reverse_map = match serde_json::from_str::<MappingDocument>(&contents) {
        Ok(document) => document.reverse_map,
        Err(document_error) => serde_json::from_str::<IndexMap<String, String>>(&contents)
            .map_err(|_| {
                RvanonError::Mapping(format!(
                    "Invalid mapping file {}: {}",
                    path.display(),
                    document_error
                ))
            })?,
    };

    tracing::info!(path = %path.display(), entries = reverse_map.len(), "Mapping loaded");
    Ok(reverse_map)
}
