//! Anonymization configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings that drive one anonymization run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnonymizationConfig {
    /// Header of the column holding each row's canonical entity identifier
    #[serde(default = "default_entity_id_header")]
    pub entity_id_header: String,

    /// Sheets processed first, in this order; the rest follow in workbook order
    #[serde(default = "default_sheet_priority")]
    pub sheet_priority: Vec<String>,

    /// UUID-like values of this many characters or fewer are not hashed
    #[serde(default = "default_uuid_min_length")]
    pub uuid_min_length: usize,

    /// Audit logging configuration
    #[serde(default)]
    pub audit: AuditConfig,
}

fn default_entity_id_header() -> String {
    "VM ID".to_string()
}

fn default_sheet_priority() -> Vec<String> {
    vec!["vHost".to_string(), "vCluster".to_string(), "vInfo".to_string()]
}

fn default_uuid_min_length() -> usize {
    20
}

impl Default for AnonymizationConfig {
    fn default() -> Self {
        Self {
            entity_id_header: default_entity_id_header(),
            sheet_priority: default_sheet_priority(),
            uuid_min_length: default_uuid_min_length(),
            audit: AuditConfig::default(),
        }
    }
}

impl AnonymizationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.entity_id_header.trim().is_empty() {
            anyhow::bail!("anonymization.entity_id_header cannot be empty");
        }

        if self.sheet_priority.iter().any(|s| s.trim().is_empty()) {
            anyhow::bail!("anonymization.sheet_priority cannot contain empty sheet names");
        }

        if self.uuid_min_length >= 32 {
            anyhow::bail!(
                "anonymization.uuid_min_length must be below 32, got {}",
                self.uuid_min_length
            );
        }

        self.audit.validate().context("Invalid audit configuration")?;

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("RVANON_ANONYMIZATION_ENTITY_ID_HEADER") {
            self.entity_id_header = val;
        }

        if let Ok(val) = std::env::var("RVANON_ANONYMIZATION_SHEET_PRIORITY") {
            self.sheet_priority = val
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Ok(val) = std::env::var("RVANON_ANONYMIZATION_UUID_MIN_LENGTH") {
            self.uuid_min_length = val
                .parse()
                .context("Invalid RVANON_ANONYMIZATION_UUID_MIN_LENGTH value")?;
        }

        self.audit.apply_env_overrides()?;

        Ok(())
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON format for audit logs
    #[serde(default = "default_audit_json_format")]
    pub json_format: bool,
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/anonymization.log")
}

fn default_audit_json_format() -> bool {
    true
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: default_audit_json_format(),
        }
    }
}

impl AuditConfig {
    /// Validate audit configuration
    pub fn validate(&self) -> Result<()> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            anyhow::bail!("anonymization.audit.log_path cannot be empty when audit is enabled");
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("RVANON_ANONYMIZATION_AUDIT_ENABLED") {
            self.enabled = val
                .parse()
                .context("Invalid RVANON_ANONYMIZATION_AUDIT_ENABLED value")?;
        }

        if let Ok(val) = std::env::var("RVANON_ANONYMIZATION_AUDIT_LOG_PATH") {
            self.log_path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("RVANON_ANONYMIZATION_AUDIT_JSON_FORMAT") {
            self.json_format = val
                .parse()
                .context("Invalid RVANON_ANONYMIZATION_AUDIT_JSON_FORMAT value")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnonymizationConfig::default();
        assert_eq!(config.entity_id_header, "VM ID");
        assert_eq!(config.sheet_priority, vec!["vHost", "vCluster", "vInfo"]);
        assert_eq!(config.uuid_min_length, 20);
        assert!(!config.audit.enabled);
        assert!(config.audit.json_format);
    }

    #[test]
    fn test_config_validation() {
        assert!(AnonymizationConfig::default().validate().is_ok());

        let config = AnonymizationConfig {
            entity_id_header: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AnonymizationConfig {
            uuid_min_length: 40,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AnonymizationConfig = toml::from_str("uuid_min_length = 8").unwrap();
        assert_eq!(config.uuid_min_length, 8);
        assert_eq!(config.entity_id_header, "VM ID");
        assert_eq!(config.audit, AuditConfig::default());
    }

    #[test]
    fn test_audit_requires_path_when_enabled() {
        let audit = AuditConfig {
            enabled: true,
            log_path: PathBuf::new(),
            json_format: true,
        };
        assert!(audit.validate().is_err());
    }
}
