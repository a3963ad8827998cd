//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for rvanon using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// rvanon - RVTools inventory anonymizer
#[derive(Parser, Debug)]
#[command(name = "rvanon")]
#[command(version, about, long_about = None)]
#[command(author = "rvanon Contributors")]
pub struct Cli {
    /// Path to configuration file (defaults to ./rvanon.toml when present)
    #[arg(short, long, env = "RVANON_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RVANON_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge several RVTools exports into one workbook
    Consolidate(commands::consolidate::ConsolidateArgs),

    /// Anonymize an RVTools export and save the mapping
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Restore an anonymized export from a mapping file
    Deanonymize(commands::deanonymize::DeanonymizeArgs),

    /// Consolidate exports, then anonymize the result
    Both(commands::both::BothArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_cli_parse_anonymize() {
        let cli = Cli::parse_from(["rvanon", "anonymize", "export1"]);
        assert!(cli.config.is_none());
        match cli.command {
            Commands::Anonymize(args) => {
                assert_eq!(args.inputs, vec![PathBuf::from("export1")]);
                assert!(args.output.is_none());
                assert!(!args.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["rvanon", "--config", "custom.toml", "consolidate"]);
        assert_eq!(cli.config.as_deref(), Some(Path::new("custom.toml")));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["rvanon", "--log-level", "debug", "consolidate"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_consolidate_many_inputs() {
        let cli = Cli::parse_from(["rvanon", "consolidate", "a", "b", "-o", "merged"]);
        match cli.command {
            Commands::Consolidate(args) => {
                assert_eq!(args.inputs.len(), 2);
                assert_eq!(args.output.as_deref(), Some(Path::new("merged")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_deanonymize_requires_mapping() {
        assert!(Cli::try_parse_from(["rvanon", "deanonymize", "anon"]).is_err());

        let cli = Cli::parse_from(["rvanon", "deanonymize", "anon", "-m", "mapping.json"]);
        match cli.command {
            Commands::Deanonymize(args) => {
                assert_eq!(args.mapping, PathBuf::from("mapping.json"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_both_with_mapping() {
        let cli = Cli::parse_from(["rvanon", "both", "--mapping", "map.json"]);
        match cli.command {
            Commands::Both(args) => {
                assert!(args.inputs.is_empty());
                assert_eq!(args.mapping.as_deref(), Some(Path::new("map.json")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["rvanon", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }
}
