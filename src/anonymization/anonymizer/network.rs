//! Topology-preserving IP address anonymization
//!
//! IPv4 addresses are moved into `10.0.0.0/8`: the original /24 network is
//! replaced by a synthetic subnet derived from a SHA-256 digest of the network
//! (second octet in 1..=254, third octet from the digest) and the host octet is
//! kept verbatim. Addresses on one original subnet therefore stay on one
//! synthetic subnet with the same host numbering.
//!
//! IPv6 addresses are replaced by `2001:db8::/32` documentation addresses
//! whose remaining 96 bits come from a digest of the original string.
//!
//! Malformed values that still look like dotted quads are mapped onto a small
//! deterministic pool in `10.0.0.0/16` (never produced by the valid path,
//! whose second octet is never 0). Anything else passes through untouched.

use super::hashing::digest;
use super::{Anonymizer, CellContext};
use crate::anonymization::mapping::MappingStore;
use regex::Regex;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

static IPV4_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+\.\d+$").expect("valid IPv4 shape regex"));

/// Separators accepted in multi-value address cells
const SEPARATORS: [char; 2] = [',', ';'];

/// IPv4/IPv6 anonymizer
#[derive(Debug, Clone, Copy, Default)]
pub struct NetworkAddressAnonymizer;

impl NetworkAddressAnonymizer {
    /// Create a new address anonymizer
    pub fn new() -> Self {
        Self
    }

    /// Anonymize a cell holding one or more addresses
    ///
    /// Multi-value cells (`,` or `;` separated) are transformed part by part.
    /// Each part keeps the separator that followed it and empty parts are
    /// dropped. A cell without any address part is returned unchanged.
    pub fn anonymize_address(&self, store: &mut MappingStore, original: &str) -> String {
        if original.trim().is_empty() {
            return original.to_string();
        }

        if !original.contains(SEPARATORS) {
            return self
                .anonymize_single(store, original.trim())
                .unwrap_or_else(|| original.to_string());
        }

        let mut parts: Vec<(String, Option<char>)> = Vec::new();
        let mut changed = false;
        let mut rest = original;
        loop {
            let (part, separator, tail) = match rest.find(SEPARATORS) {
                Some(pos) => {
                    let separator = rest[pos..].chars().next();
                    (&rest[..pos], separator, Some(&rest[pos + 1..]))
                }
                None => (rest, None, None),
            };

            let trimmed = part.trim();
            if !trimmed.is_empty() {
                match self.anonymize_single(store, trimmed) {
                    Some(anonymized) => {
                        changed = true;
                        parts.push((anonymized, separator));
                    }
                    None => parts.push((part.to_string(), separator)),
                }
            }

            match tail {
                Some(tail) => rest = tail,
                None => break,
            }
        }

        if !changed {
            return original.to_string();
        }

        let last = parts.len().saturating_sub(1);
        let mut joined = String::with_capacity(original.len());
        for (idx, (part, separator)) in parts.iter().enumerate() {
            joined.push_str(part);
            match separator {
                Some(separator) if idx < last => joined.push(*separator),
                _ => {}
            }
        }
        joined
    }

    /// Synthetic form of one address, `None` when `value` is not an address
    fn anonymize_single(&self, store: &mut MappingStore, value: &str) -> Option<String> {
        if let Some(existing) = store.address(value) {
            return Some(existing.to_string());
        }

        let anonymized = if let Ok(addr) = value.parse::<Ipv4Addr>() {
            anonymize_ipv4(store, addr)
        } else if IPV4_SHAPE.is_match(value) {
            fallback_ipv4(store)
        } else if value.parse::<Ipv6Addr>().is_ok() {
            anonymize_ipv6(store, value)
        } else {
            return None;
        };

        store.record_address(value, &anonymized);
        Some(anonymized)
    }
}

impl Anonymizer for NetworkAddressAnonymizer {
    fn anonymize(&self, store: &mut MappingStore, value: &str, _context: &CellContext<'_>) -> String {
        self.anonymize_address(store, value)
    }
}

/// Preferred synthetic subnet for an original /24 network (`a.b.c`)
pub fn network_id(network: &str) -> (u8, u8) {
    let bytes = digest(network);
    let mut head = [0u8; 8];
    head.copy_from_slice(&bytes[..8]);
    let second = (u64::from_be_bytes(head) % 254) as u8 + 1;
    (second, bytes[8])
}

fn anonymize_ipv4(store: &mut MappingStore, addr: Ipv4Addr) -> String {
    let [a, b, c, host] = addr.octets();
    let network = format!("{a}.{b}.{c}");
    let (second, third) = store.claim_subnet(&network, network_id(&network));
    Ipv4Addr::new(10, second, third, host).to_string()
}

fn fallback_ipv4(store: &mut MappingStore) -> String {
    let slot = store.next_fallback_slot();
    let third = (slot / 254) % 256;
    let host = slot % 254 + 1;
    format!("10.0.{third}.{host}")
}

fn anonymize_ipv6(store: &MappingStore, original: &str) -> String {
    let mut salt = 0u32;
    loop {
        let seed = if salt == 0 {
            original.to_string()
        } else {
            format!("{original}#{salt}")
        };
        let bytes = digest(&seed);
        let group = |i: usize| u16::from_be_bytes([bytes[2 * i], bytes[2 * i + 1]]);
        let candidate = Ipv6Addr::new(
            0x2001,
            0x0db8,
            group(0),
            group(1),
            group(2),
            group(3),
            group(4),
            group(5),
        )
        .to_string();
        if !store.is_taken(&candidate) {
            return candidate;
        }
        salt += 1;
    }
}
