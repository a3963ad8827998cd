//! Bidirectional mapping store
//!
//! [`MappingStore`] is the single source of truth for one anonymization run:
//! it owns every forward association (original -> pseudonym), the reverse
//! association used later for deanonymization, per-category counters, and the
//! bookkeeping needed to keep synthetic values unique.
//!
//! The store is created fresh per run, mutated during the single pass over the
//! workbook, and handed back to the caller for persistence. It is not shared
//! between threads: every lookup-or-allocate is a read-modify-write and the
//! engine holds the only `&mut` for the duration of the run.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Entity categories that receive sequential pseudonyms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    /// Virtual machines (pseudonym preferably taken from the row's VM ID)
    VirtualMachine,
    /// ESXi hosts
    Host,
    /// Clusters
    Cluster,
    /// Datacenters
    Datacenter,
    /// Everything else (folders, paths, networks, datastores, ...)
    Generic,
}

impl EntityCategory {
    /// All categories, in reporting order
    pub const ALL: [EntityCategory; 5] = [
        Self::VirtualMachine,
        Self::Host,
        Self::Cluster,
        Self::Datacenter,
        Self::Generic,
    ];

    /// Pseudonym prefix for the category
    pub fn label(&self) -> &'static str {
        match self {
            Self::VirtualMachine => "VM",
            Self::Host => "HOST",
            Self::Cluster => "CLUSTER",
            Self::Datacenter => "DC",
            Self::Generic => "ITEM",
        }
    }
}

/// A synthetic /24 inside 10.0.0.0/8: (second octet, third octet)
pub type SyntheticSubnet = (u8, u8);

/// All associations produced during one anonymization run
#[derive(Debug, Clone, Default)]
pub struct MappingStore {
    forward_map: IndexMap<String, String>,
    reverse_map: IndexMap<String, String>,
    ip_forward_map: IndexMap<String, String>,
    hash_forward_map: IndexMap<String, String>,
    counters: BTreeMap<EntityCategory, u32>,
    seen_entities: BTreeMap<EntityCategory, BTreeSet<String>>,
    identifier_hints: HashMap<String, String>,
    subnets: HashMap<String, SyntheticSubnet>,
    claimed_subnets: HashSet<SyntheticSubnet>,
    fallback_addresses: u32,
}

impl MappingStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Original value behind an anonymized value
    pub fn reverse(&self, anonymized: &str) -> Option<&str> {
        self.reverse_map.get(anonymized).map(String::as_str)
    }

    /// Synthetic address previously assigned to an address value
    pub fn address(&self, original: &str) -> Option<&str> {
        self.ip_forward_map.get(original).map(String::as_str)
    }

    /// Digest previously assigned to a MAC/UUID value
    pub fn hashed(&self, original: &str) -> Option<&str> {
        self.hash_forward_map.get(original).map(String::as_str)
    }

    /// Returns true when `anonymized` already stands for some original value
    pub fn is_taken(&self, anonymized: &str) -> bool {
        self.reverse_map.contains_key(anonymized)
    }

    /// Name forward map (original -> pseudonym)
    pub fn forward_map(&self) -> &IndexMap<String, String> {
        &self.forward_map
    }

    /// Complete reverse map (anonymized -> original), in insertion order
    pub fn reverse_map(&self) -> &IndexMap<String, String> {
        &self.reverse_map
    }

    /// Address forward map (original -> synthetic)
    pub fn ip_forward_map(&self) -> &IndexMap<String, String> {
        &self.ip_forward_map
    }

    /// MAC/UUID forward map (original -> digest)
    pub fn hash_forward_map(&self) -> &IndexMap<String, String> {
        &self.hash_forward_map
    }

    /// Next counter value for a category (starts at 1)
    pub fn counter(&self, category: EntityCategory) -> u32 {
        self.counters.get(&category).copied().unwrap_or(1)
    }

    /// Number of distinct entities counted for a category
    pub fn seen_count(&self, category: EntityCategory) -> usize {
        self.seen_entities.get(&category).map_or(0, BTreeSet::len)
    }

    /// Distinct entity counts for every category
    pub fn entity_counts(&self) -> BTreeMap<EntityCategory, usize> {
        EntityCategory::ALL
            .iter()
            .map(|c| (*c, self.seen_count(*c)))
            .collect()
    }

    /// Count an original value towards the category summary
    pub fn mark_seen(&mut self, category: EntityCategory, original: &str) {
        self.seen_entities
            .entry(category)
            .or_default()
            .insert(original.to_string());
    }

    /// Pseudonym already chosen for an entity identifier
    pub fn identifier_hint(&self, identifier: &str) -> Option<&str> {
        self.identifier_hints.get(identifier).map(String::as_str)
    }

    /// Remember the pseudonym chosen for an entity identifier (first one wins)
    pub fn record_hint(&mut self, identifier: &str, pseudonym: &str) {
        self.identifier_hints
            .entry(identifier.to_string())
            .or_insert_with(|| pseudonym.to_string());
    }

    /// Lookup-or-allocate for every name-like category
    ///
    /// Returns the existing pseudonym when `original` was seen before.
    /// Otherwise asks `propose` for candidates, passing the category counter
    /// and an attempt number, until a candidate is found that no other
    /// original value already owns. The winner is registered in both
    /// directions and the category counter is bumped once.
    pub fn resolve_or_allocate<F>(
        &mut self,
        original: &str,
        category: EntityCategory,
        counts_toward_summary: bool,
        mut propose: F,
    ) -> String
    where
        F: FnMut(&MappingStore, u32, u32) -> String,
    {
        if counts_toward_summary {
            self.mark_seen(category, original);
        }

        if let Some(existing) = self.forward_map.get(original) {
            return existing.clone();
        }

        let counter = self.counter(category);
        let mut attempt = 0;
        let pseudonym = loop {
            let candidate = propose(self, counter, attempt);
            if !self.is_taken(&candidate) {
                break candidate;
            }
            attempt += 1;
        };

        self.forward_map
            .insert(original.to_string(), pseudonym.clone());
        self.reverse_map
            .insert(pseudonym.clone(), original.to_string());
        self.counters.insert(category, counter + 1);

        pseudonym
    }

    /// Register an address substitution
    pub fn record_address(&mut self, original: &str, anonymized: &str) {
        self.ip_forward_map
            .insert(original.to_string(), anonymized.to_string());
        self.reverse_map
            .insert(anonymized.to_string(), original.to_string());
    }

    /// Register a MAC/UUID digest substitution
    pub fn record_hash(&mut self, original: &str, anonymized: &str) {
        self.hash_forward_map
            .insert(original.to_string(), anonymized.to_string());
        self.reverse_map
            .insert(anonymized.to_string(), original.to_string());
    }

    /// Register a whole-cell reverse entry (e.g. a multi-value address cell)
    ///
    /// Existing entries are never overwritten. Returns true when inserted.
    pub fn record_reverse(&mut self, anonymized: &str, original: &str) -> bool {
        if self.reverse_map.contains_key(anonymized) {
            return false;
        }
        self.reverse_map
            .insert(anonymized.to_string(), original.to_string());
        true
    }

    /// Synthetic subnet already assigned to an original /24 network
    pub fn subnet(&self, network: &str) -> Option<SyntheticSubnet> {
        self.subnets.get(network).copied()
    }

    /// Assign a synthetic subnet to an original network
    ///
    /// `preferred` is used when free; otherwise the next free subnet is taken,
    /// walking the third octet and then the second octet (which stays in
    /// 1..=254). Distinct original networks never share a synthetic subnet
    /// while the space lasts.
    pub fn claim_subnet(&mut self, network: &str, preferred: SyntheticSubnet) -> SyntheticSubnet {
        if let Some(existing) = self.subnet(network) {
            return existing;
        }

        let mut candidate = preferred;
        let capacity = 254 * 256;
        for _ in 0..capacity {
            if !self.claimed_subnets.contains(&candidate) {
                break;
            }
            candidate = next_subnet(candidate);
        }

        if self.claimed_subnets.contains(&candidate) {
            tracing::warn!(
                networks = self.subnets.len(),
                "Synthetic subnet space exhausted, reusing preferred subnet"
            );
            candidate = preferred;
        }

        self.claimed_subnets.insert(candidate);
        self.subnets.insert(network.to_string(), candidate);
        candidate
    }

    /// Next slot of the fallback address pool (insertion order)
    pub fn next_fallback_slot(&mut self) -> u32 {
        let slot = self.fallback_addresses;
        self.fallback_addresses += 1;
        slot
    }

    /// Number of reverse entries recorded so far
    pub fn reverse_len(&self) -> usize {
        self.reverse_map.len()
    }

    /// Reverse entries recorded after the first `start` entries
    pub fn reverse_entries_since(&self, start: usize) -> IndexMap<String, String> {
        self.reverse_map
            .iter()
            .skip(start)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

fn next_subnet((second, third): SyntheticSubnet) -> SyntheticSubnet {
    if third < u8::MAX {
        (second, third + 1)
    } else if second >= 254 {
        (1, 0)
    } else {
        (second + 1, 0)
    }
}
