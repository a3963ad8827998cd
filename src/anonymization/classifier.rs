//! Column classification
//!
//! Every column is classified once from its header text and the name of the
//! sheet it sits in; cell contents are never inspected except for the numeric
//! passthrough on capacity/port/VLAN columns. The rule table below is the one
//! place where new sensitive RVTools columns are added.
//!
//! Unknown headers classify as [`FieldStrategy::NoChange`]. Output is always
//! produced even when a future export grows a sensitive column nobody listed
//! here, and free-text columns (e.g. a "Notes" custom attribute) are not
//! scrubbed even if they contain addresses.

use crate::anonymization::anonymizer::HashFormat;
use crate::anonymization::mapping::EntityCategory;

/// Prefix RVTools puts in front of sheet names in per-tab CSV exports
pub const CSV_SHEET_PREFIX: &str = "RVTools_tab";

/// Sheets whose "Disk"/"Filename" columns name disks on datastores or guests
const DISK_SHEETS: &[&str] = &["vDisk", "vPartition", "vMultiPath"];

/// Header words marking capacity, port and VLAN columns
const NUMERIC_HEADER_WORDS: &[&str] = &[
    "capacity", "mib", "mb", "gb", "tb", "size", "port", "ports", "vlan", "#",
];

/// How a column is transformed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldStrategy {
    /// Entity pseudonym biased by the row's entity identifier
    Identity(EntityCategory),
    /// `HOST-nnnn`
    Host,
    /// `CLUSTER-nnnn`
    Cluster,
    /// `DC-nnnn`
    Datacenter,
    /// IPv4/IPv6 substitution
    NetworkAddress,
    /// Format-preserving digest
    Hash(HashFormat),
    /// Replace with a constant marker (not reversible)
    ConstantRedact(&'static str),
    /// `<PREFIX>-nnnn` in the generic category
    PathLike(&'static str),
    /// Leave the value alone
    NoChange,
}

impl FieldStrategy {
    /// Short stable name used in reports and audit entries
    pub fn name(&self) -> &'static str {
        match self {
            Self::Identity(_) => "identity",
            Self::Host => "host",
            Self::Cluster => "cluster",
            Self::Datacenter => "datacenter",
            Self::NetworkAddress => "network_address",
            Self::Hash(HashFormat::Mac) => "hash_mac",
            Self::Hash(HashFormat::Uuid) => "hash_uuid",
            Self::ConstantRedact(_) => "constant_redact",
            Self::PathLike(_) => "path_like",
            Self::NoChange => "no_change",
        }
    }

    /// Entity category a name-like strategy allocates in
    pub fn entity_category(&self) -> Option<EntityCategory> {
        match self {
            Self::Identity(category) => Some(*category),
            Self::Host => Some(EntityCategory::Host),
            Self::Cluster => Some(EntityCategory::Cluster),
            Self::Datacenter => Some(EntityCategory::Datacenter),
            Self::PathLike(_) => Some(EntityCategory::Generic),
            _ => None,
        }
    }
}

/// One row of the classification table
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    /// Header text (compared case-insensitively after trimming)
    pub header: &'static str,
    /// Sheets the rule is restricted to; `None` applies everywhere
    pub sheets: Option<&'static [&'static str]>,
    /// Strategy assigned on match
    pub strategy: FieldStrategy,
}

const fn rule(header: &'static str, strategy: FieldStrategy) -> ClassificationRule {
    ClassificationRule {
        header,
        sheets: None,
        strategy,
    }
}

const fn scoped(
    header: &'static str,
    sheets: &'static [&'static str],
    strategy: FieldStrategy,
) -> ClassificationRule {
    ClassificationRule {
        header,
        sheets: Some(sheets),
        strategy,
    }
}

/// Sheet-scoped rules, consulted before the general ones
static SCOPED_RULES: &[ClassificationRule] = &[
    scoped("Name", &["vCluster"], FieldStrategy::Cluster),
    scoped("Name", &["vDatastore"], FieldStrategy::PathLike("DATASTORE")),
    scoped("Name", &["vRP"], FieldStrategy::PathLike("POOL")),
    scoped("Name", &["vSnapshot"], FieldStrategy::PathLike("SNAPSHOT")),
    scoped("Name", &["dvSwitch"], FieldStrategy::PathLike("SWITCH")),
    scoped("Resource Pool name", &["vRP"], FieldStrategy::PathLike("POOL")),
    scoped("Resource Pool path", &["vRP"], FieldStrategy::PathLike("PATH")),
    scoped("Disk", DISK_SHEETS, FieldStrategy::PathLike("DISK")),
    scoped("Filename", DISK_SHEETS, FieldStrategy::PathLike("FILE")),
    scoped("Address", &["vDatastore"], FieldStrategy::NetworkAddress),
    scoped("URL", &["vDatastore"], FieldStrategy::PathLike("URL")),
    scoped("Description", &["vSnapshot"], FieldStrategy::ConstantRedact("ANON_NOTE")),
];

/// Rules that apply on every sheet
static GENERAL_RULES: &[ClassificationRule] = &[
    // Entities
    rule("VM", FieldStrategy::Identity(EntityCategory::VirtualMachine)),
    rule("Host", FieldStrategy::Host),
    rule("Cluster", FieldStrategy::Cluster),
    rule("Datacenter", FieldStrategy::Datacenter),
    rule("VM ID", FieldStrategy::NoChange),
    // Addresses
    rule("Primary IP Address", FieldStrategy::NetworkAddress),
    rule("IP Address", FieldStrategy::NetworkAddress),
    rule("IPv4 Address", FieldStrategy::NetworkAddress),
    rule("IPv6 Address", FieldStrategy::NetworkAddress),
    rule("IP 6 Address", FieldStrategy::NetworkAddress),
    rule("Gateway", FieldStrategy::NetworkAddress),
    rule("IPv6 Gateway", FieldStrategy::NetworkAddress),
    rule("DNS Servers", FieldStrategy::NetworkAddress),
    rule("NTP Server(s)", FieldStrategy::NetworkAddress),
    // Hardware identifiers
    rule("Mac Address", FieldStrategy::Hash(HashFormat::Mac)),
    rule("VM UUID", FieldStrategy::Hash(HashFormat::Uuid)),
    rule("SMBIOS UUID", FieldStrategy::Hash(HashFormat::Uuid)),
    rule("Instance UUID", FieldStrategy::Hash(HashFormat::Uuid)),
    rule("VI SDK UUID", FieldStrategy::Hash(HashFormat::Uuid)),
    rule("UUID", FieldStrategy::Hash(HashFormat::Uuid)),
    // Names, paths and locations
    rule("DNS Name", FieldStrategy::PathLike("DNS")),
    rule("Domain", FieldStrategy::PathLike("DOMAIN")),
    rule("Folder", FieldStrategy::PathLike("FOLDER")),
    rule("Resource pool", FieldStrategy::PathLike("POOL")),
    rule("vApp", FieldStrategy::PathLike("VAPP")),
    rule("Path", FieldStrategy::PathLike("PATH")),
    rule("Disk Path", FieldStrategy::PathLike("DISKPATH")),
    rule("Log directory", FieldStrategy::PathLike("LOG")),
    rule("Snapshot directory", FieldStrategy::PathLike("SNAP")),
    rule("Suspend directory", FieldStrategy::PathLike("SUSP")),
    rule("Network", FieldStrategy::PathLike("NETWORK")),
    rule("Port Group", FieldStrategy::PathLike("NETWORK")),
    rule("Switch", FieldStrategy::PathLike("SWITCH")),
    rule("VI SDK Server", FieldStrategy::PathLike("VCENTER")),
    // Free text and asset tags
    rule("Annotation", FieldStrategy::ConstantRedact("ANON_NOTE")),
    rule("Serial number", FieldStrategy::ConstantRedact("ANON_SERIAL")),
    rule("Service tag", FieldStrategy::ConstantRedact("ANON_SERIAL")),
];

/// Maps (header, sheet) pairs to strategies
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldClassifier;

impl FieldClassifier {
    /// Create a classifier over the built-in rule table
    pub fn new() -> Self {
        Self
    }

    /// Classify a column from its header and sheet name
    pub fn classify(&self, header: &str, sheet: &str) -> FieldStrategy {
        let header = header.trim();
        let sheet = normalize_sheet_name(sheet);

        let scoped = SCOPED_RULES.iter().find(|r| {
            r.header.eq_ignore_ascii_case(header)
                && r
                    .sheets
                    .is_some_and(|sheets| sheets.iter().any(|s| s.eq_ignore_ascii_case(sheet)))
        });

        scoped
            .or_else(|| {
                GENERAL_RULES
                    .iter()
                    .find(|r| r.header.eq_ignore_ascii_case(header))
            })
            .map_or(FieldStrategy::NoChange, |r| r.strategy)
    }

    /// Classify a single cell
    ///
    /// Purely numeric values under capacity/port/VLAN headers are never
    /// transformed, whatever the header would otherwise classify as.
    pub fn classify_cell(&self, header: &str, sheet: &str, value: &str) -> FieldStrategy {
        if is_numeric_header(header) && is_purely_numeric(value) {
            return FieldStrategy::NoChange;
        }
        self.classify(header, sheet)
    }

    /// The full rule table, scoped rules first
    pub fn rules(&self) -> impl Iterator<Item = &'static ClassificationRule> {
        SCOPED_RULES.iter().chain(GENERAL_RULES.iter())
    }
}

/// Strip the CSV export prefix from a sheet name
pub fn normalize_sheet_name(sheet: &str) -> &str {
    let sheet = sheet.trim();
    sheet.strip_prefix(CSV_SHEET_PREFIX).unwrap_or(sheet)
}

/// Whether values of `category` on `sheet` count towards the entity summary
///
/// Each category is counted on one canonical sheet only, so the same entity
/// repeated across sheets is counted once.
pub fn counts_toward_summary(category: EntityCategory, sheet: &str) -> bool {
    let canonical = match category {
        EntityCategory::VirtualMachine => "vInfo",
        EntityCategory::Host | EntityCategory::Datacenter => "vHost",
        EntityCategory::Cluster => "vCluster",
        EntityCategory::Generic => return false,
    };
    normalize_sheet_name(sheet).eq_ignore_ascii_case(canonical)
}

/// Header describes a capacity, port or VLAN quantity
pub fn is_numeric_header(header: &str) -> bool {
    header
        .to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '#'))
        .any(|word| NUMERIC_HEADER_WORDS.contains(&word))
}

/// Digits with at most one decimal point
pub fn is_purely_numeric(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty()
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().all(|c| c.is_ascii_digit() || c == '.')
        && value.matches('.').count() <= 1
}
