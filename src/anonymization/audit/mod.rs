//! Audit logging module
//!
//! One structured entry per anonymized sheet; counts and fingerprints only.

pub mod logger;

pub use logger::AuditLogger;
