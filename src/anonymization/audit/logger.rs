//! Audit logger for anonymization runs

use crate::anonymization::anonymizer::hashing::digest_hex;
use crate::anonymization::report::SheetReport;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Audit log entry, one per anonymized sheet
#[derive(Debug, Serialize)]
struct AuditLogEntry<'a> {
    timestamp: String,
    sheet: &'a str,
    rows: usize,
    cells_transformed: usize,
    strategy_counts: &'a BTreeMap<String, usize>,
    /// SHA-256 of the header row, so runs over the same export can be matched
    header_fingerprint: String,
}

/// Audit logger for anonymization runs
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    enabled: bool,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(log_path: PathBuf, json_format: bool, enabled: bool) -> Result<Self> {
        if enabled {
            if let Some(parent) = log_path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create audit log directory: {}", parent.display())
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
            enabled,
        })
    }

    /// Logger that writes nothing
    pub fn disabled() -> Self {
        Self {
            log_path: PathBuf::new(),
            json_format: true,
            enabled: false,
        }
    }

    /// Returns true when entries are written
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Log an anonymized sheet
    pub fn log_sheet(&self, sheet: &SheetReport, headers: &[String]) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let entry = AuditLogEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            sheet: &sheet.name,
            rows: sheet.rows,
            cells_transformed: sheet.cells_transformed,
            strategy_counts: &sheet.strategy_counts,
            header_fingerprint: header_fingerprint(headers),
        };

        self.write_entry(&entry)
    }

    /// Write an audit entry to the log file
    fn write_entry(&self, entry: &AuditLogEntry<'_>) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open audit log: {}", self.log_path.display()))?;

        if self.json_format {
            let json_line =
                serde_json::to_string(entry).context("Failed to serialize audit entry")?;
            writeln!(file, "{json_line}").context("Failed to write audit entry")?;
        } else {
            writeln!(
                file,
                "[{}] Sheet: {} | Rows: {} | Cells: {} | Headers: {}",
                entry.timestamp,
                entry.sheet,
                entry.rows,
                entry.cells_transformed,
                entry.header_fingerprint
            )
            .context("Failed to write audit entry")?;
        }

        Ok(())
    }
}

/// SHA-256 over the tab-joined header row
fn header_fingerprint(headers: &[String]) -> String {
    digest_hex(&headers.join("\t"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_sheet() -> SheetReport {
        let mut sheet = SheetReport::new("vInfo");
        sheet.rows = 1;
        sheet.record_transformed("identity");
        sheet
    }

    #[test]
    fn test_audit_logger_creation() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("nested").join("audit.log");

        let logger = AuditLogger::new(log_path.clone(), true, true).unwrap();
        assert!(logger.is_enabled());
        assert!(log_path.parent().unwrap().exists());
    }

    #[test]
    fn test_header_fingerprint() {
        let a = header_fingerprint(&["VM".to_string(), "Host".to_string()]);
        let b = header_fingerprint(&["VM".to_string(), "Host".to_string()]);
        let c = header_fingerprint(&["VM".to_string()]);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_log_sheet_json() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.log");
        let logger = AuditLogger::new(log_path.clone(), true, true).unwrap();

        logger
            .log_sheet(&sample_sheet(), &["VM".to_string(), "VM ID".to_string()])
            .unwrap();
        logger
            .log_sheet(&sample_sheet(), &["VM".to_string(), "VM ID".to_string()])
            .unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let entry: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(entry["sheet"], "vInfo");
        assert_eq!(entry["cells_transformed"], 1);
        assert_eq!(entry["strategy_counts"]["identity"], 1);
    }

    #[test]
    fn test_log_sheet_plain_text() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.log");
        let logger = AuditLogger::new(log_path.clone(), false, true).unwrap();

        logger.log_sheet(&sample_sheet(), &["VM".to_string()]).unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("Sheet: vInfo | Rows: 1 | Cells: 1"));
    }

    #[test]
    fn test_disabled_logger_writes_nothing() {
        let logger = AuditLogger::disabled();
        assert!(logger.log_sheet(&sample_sheet(), &[]).is_ok());
        assert!(!logger.is_enabled());
    }
}
