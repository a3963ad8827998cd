//! Sequential pseudonyms for named entities

use super::{Anonymizer, CellContext};
use crate::anonymization::mapping::{EntityCategory, MappingStore};

/// Sequential, human-readable pseudonyms (`HOST-0001`, `FOLDER-0007`, ...)
///
/// Virtual machines prefer the row's own entity identifier as pseudonym so
/// that the anonymized export still lines up with the inventory IDs.
#[derive(Debug, Clone, Copy)]
pub struct IdentifierAnonymizer {
    category: EntityCategory,
    prefix: &'static str,
}

impl IdentifierAnonymizer {
    /// Strategy for a category, using the category label as prefix
    pub fn new(category: EntityCategory) -> Self {
        Self {
            category,
            prefix: category.label(),
        }
    }

    /// Generic strategy with a custom prefix (e.g. `FOLDER`, `PATH`)
    pub fn generic(prefix: &'static str) -> Self {
        Self {
            category: EntityCategory::Generic,
            prefix,
        }
    }

    /// Category this strategy allocates in
    pub fn category(&self) -> EntityCategory {
        self.category
    }

    /// Return the pseudonym for `original`, allocating one on first sight
    pub fn anonymize_name(
        &self,
        store: &mut MappingStore,
        original: &str,
        context: &CellContext<'_>,
    ) -> String {
        let value = original.trim();
        if value.is_empty() {
            return original.to_string();
        }

        let entity_id = context
            .entity_id
            .map(str::trim)
            .filter(|id| !id.is_empty());

        match (self.category, entity_id) {
            (EntityCategory::VirtualMachine, Some(id)) => {
                let source = context.source;
                let pseudonym = store.resolve_or_allocate(
                    value,
                    self.category,
                    context.counts_toward_summary,
                    |store, _, attempt| {
                        // An existing hint means another original already owns this ID.
                        let skip = u32::from(store.identifier_hint(id).is_some());
                        entity_id_candidate(id, source, attempt + skip)
                    },
                );
                store.record_hint(id, &pseudonym);
                pseudonym
            }
            _ => {
                let prefix = self.prefix;
                store.resolve_or_allocate(
                    value,
                    self.category,
                    context.counts_toward_summary,
                    |_, counter, attempt| format!("{}-{:04}", prefix, counter + attempt),
                )
            }
        }
    }
}

impl Anonymizer for IdentifierAnonymizer {
    fn anonymize(
        &self,
        store: &mut MappingStore,
        value: &str,
        context: &CellContext<'_>,
    ) -> String {
        self.anonymize_name(store, value, context)
    }
}

/// k-th pseudonym candidate derived from an entity identifier
///
/// 0 is the bare identifier, 1 appends the source label (or `_2` without
/// one), later candidates append an increasing number.
fn entity_id_candidate(id: &str, source: Option<&str>, k: u32) -> String {
    match (k, source) {
        (0, _) => id.to_string(),
        (1, Some(source)) => format!("{id}_{source}"),
        (k, Some(source)) => format!("{id}_{source}_{k}"),
        (k, None) => format!("{id}_{}", k + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vm_context<'a>(id: &'a str, source: Option<&'a str>) -> CellContext<'a> {
        CellContext {
            entity_id: Some(id),
            source,
            counts_toward_summary: true,
        }
    }

    #[test]
    fn test_sequential_pseudonyms_are_zero_padded() {
        let mut store = MappingStore::new();
        let hosts = IdentifierAnonymizer::new(EntityCategory::Host);
        let ctx = CellContext::default();

        assert_eq!(hosts.anonymize_name(&mut store, "esx01", &ctx), "HOST-0001");
        assert_eq!(hosts.anonymize_name(&mut store, "esx02", &ctx), "HOST-0002");
        assert_eq!(hosts.anonymize_name(&mut store, "esx01", &ctx), "HOST-0001");
    }

    #[test]
    fn test_categories_have_independent_counters() {
        let mut store = MappingStore::new();
        let ctx = CellContext::default();

        let host = IdentifierAnonymizer::new(EntityCategory::Host)
            .anonymize_name(&mut store, "esx01", &ctx);
        let cluster = IdentifierAnonymizer::new(EntityCategory::Cluster)
            .anonymize_name(&mut store, "prod", &ctx);
        let dc = IdentifierAnonymizer::new(EntityCategory::Datacenter)
            .anonymize_name(&mut store, "dc-east", &ctx);

        assert_eq!(host, "HOST-0001");
        assert_eq!(cluster, "CLUSTER-0001");
        assert_eq!(dc, "DC-0001");
    }

    #[test]
    fn test_generic_prefix() {
        let mut store = MappingStore::new();
        let folders = IdentifierAnonymizer::generic("FOLDER");
        let pools = IdentifierAnonymizer::generic("POOL");
        let ctx = CellContext::default();

        assert_eq!(folders.anonymize_name(&mut store, "/Prod/Web", &ctx), "FOLDER-0001");
        assert_eq!(pools.anonymize_name(&mut store, "Gold", &ctx), "POOL-0002");
        assert_eq!(folders.category(), EntityCategory::Generic);
    }

    #[test]
    fn test_empty_value_passes_through() {
        let mut store = MappingStore::new();
        let hosts = IdentifierAnonymizer::new(EntityCategory::Host);

        assert_eq!(hosts.anonymize_name(&mut store, "", &CellContext::default()), "");
        assert_eq!(hosts.anonymize_name(&mut store, "  ", &CellContext::default()), "  ");
        assert_eq!(store.counter(EntityCategory::Host), 1);
    }

    #[test]
    fn test_padding_does_not_create_a_new_entity() {
        let mut store = MappingStore::new();
        let hosts = IdentifierAnonymizer::new(EntityCategory::Host);
        let ctx = CellContext {
            counts_toward_summary: true,
            ..CellContext::default()
        };

        assert_eq!(hosts.anonymize_name(&mut store, "esx01", &ctx), "HOST-0001");
        assert_eq!(hosts.anonymize_name(&mut store, "esx01 ", &ctx), "HOST-0001");
        assert_eq!(hosts.anonymize_name(&mut store, " esx01", &ctx), "HOST-0001");
        assert_eq!(store.seen_count(EntityCategory::Host), 1);
        assert_eq!(store.reverse("HOST-0001"), Some("esx01"));
    }

    #[test]
    fn test_vm_uses_entity_identifier() {
        let mut store = MappingStore::new();
        let vms = IdentifierAnonymizer::new(EntityCategory::VirtualMachine);

        let pseudonym = vms.anonymize_name(&mut store, "webserver01", &vm_context("vm-1042", None));

        assert_eq!(pseudonym, "vm-1042");
        assert_eq!(store.reverse("vm-1042"), Some("webserver01"));
        assert_eq!(store.identifier_hint("vm-1042"), Some("vm-1042"));
        assert_eq!(store.seen_count(EntityCategory::VirtualMachine), 1);
    }

    #[test]
    fn test_vm_without_identifier_falls_back_to_sequence() {
        let mut store = MappingStore::new();
        let vms = IdentifierAnonymizer::new(EntityCategory::VirtualMachine);

        let pseudonym = vms.anonymize_name(&mut store, "webserver01", &CellContext::default());
        assert_eq!(pseudonym, "VM-0001");

        let blank_id = vms.anonymize_name(&mut store, "webserver02", &vm_context("  ", None));
        assert_eq!(blank_id, "VM-0002");
    }

    #[test]
    fn test_duplicate_vm_id_gets_source_suffix() {
        let mut store = MappingStore::new();
        let vms = IdentifierAnonymizer::new(EntityCategory::VirtualMachine);

        let first = vms.anonymize_name(&mut store, "web01", &vm_context("vm-7", Some("siteA")));
        let second = vms.anonymize_name(&mut store, "db01", &vm_context("vm-7", Some("siteB")));
        let third = vms.anonymize_name(&mut store, "app01", &vm_context("vm-7", Some("siteB")));

        assert_eq!(first, "vm-7");
        assert_eq!(second, "vm-7_siteB");
        assert_eq!(third, "vm-7_siteB_2");
        assert_eq!(store.reverse("vm-7_siteB"), Some("db01"));
        assert_eq!(store.identifier_hint("vm-7"), Some("vm-7"));
    }

    #[test]
    fn test_duplicate_vm_id_without_source() {
        let mut store = MappingStore::new();
        let vms = IdentifierAnonymizer::new(EntityCategory::VirtualMachine);

        vms.anonymize_name(&mut store, "web01", &vm_context("vm-7", None));
        let second = vms.anonymize_name(&mut store, "db01", &vm_context("vm-7", None));

        assert_eq!(second, "vm-7_2");
    }

    #[test]
    fn test_vm_id_equal_to_host_pseudonym_is_disambiguated() {
        let mut store = MappingStore::new();
        let hosts = IdentifierAnonymizer::new(EntityCategory::Host);
        let vms = IdentifierAnonymizer::new(EntityCategory::VirtualMachine);

        let host = hosts.anonymize_name(&mut store, "esx01", &CellContext::default());
        let vm = vms.anonymize_name(&mut store, "web01", &vm_context("HOST-0001", None));

        assert_eq!(host, "HOST-0001");
        assert_eq!(vm, "HOST-0001_2");
        assert_eq!(store.reverse("HOST-0001"), Some("esx01"));
        assert_eq!(store.reverse("HOST-0001_2"), Some("web01"));
    }

    #[test]
    fn test_same_vm_same_id_is_not_disambiguated() {
        let mut store = MappingStore::new();
        let vms = IdentifierAnonymizer::new(EntityCategory::VirtualMachine);

        let a = vms.anonymize_name(&mut store, "web01", &vm_context("vm-7", Some("siteA")));
        let b = vms.anonymize_name(&mut store, "web01", &vm_context("vm-7", Some("siteB")));

        assert_eq!(a, b);
        assert_eq!(store.counter(EntityCategory::VirtualMachine), 2);
    }
}
