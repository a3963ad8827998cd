//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::RvanonConfig;
use crate::domain::errors::RvanonError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Configuration file used when none is given
pub const DEFAULT_CONFIG_PATH: &str = "rvanon.toml";

static ENV_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("valid placeholder regex")
});

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into RvanonConfig
/// 4. Applies environment variable overrides (RVANON_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use rvanon::config::loader::load_config;
///
/// let config = load_config("rvanon.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<RvanonConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RvanonError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RvanonError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: RvanonConfig = toml::from_str(&contents)
        .map_err(|e| RvanonError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finish(config)
}

/// Loads the configuration, tolerating a missing file at the default path
///
/// An explicitly given path must exist. Without one, `rvanon.toml` in the
/// working directory is used when present and the built-in defaults
/// otherwise. Environment overrides and validation apply in both cases.
pub fn load_config_or_default(path: Option<&Path>) -> Result<RvanonConfig> {
    match path {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH),
        None => {
            tracing::debug!("No configuration file found, using defaults");
            finish(RvanonConfig::default())
        }
    }
}

fn finish(mut config: RvanonConfig) -> Result<RvanonConfig> {
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        RvanonError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied verbatim.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
pub fn substitute_env_vars(input: &str) -> Result<String> {
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in ENV_PLACEHOLDER.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(RvanonError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using RVANON_* prefix
///
/// Environment variables follow the pattern: RVANON_<SECTION>_<KEY>
/// For example: RVANON_APPLICATION_LOG_LEVEL, RVANON_OUTPUT_DIRECTORY
pub fn apply_env_overrides(config: &mut RvanonConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("RVANON_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("RVANON_APPLICATION_DRY_RUN") {
        config.application.dry_run = parse_bool("RVANON_APPLICATION_DRY_RUN", &val)?;
    }

    // Anonymization overrides
    config
        .anonymization
        .apply_env_overrides()
        .map_err(|e| RvanonError::Configuration(format!("{e:#}")))?;

    // Output overrides
    if let Ok(val) = std::env::var("RVANON_OUTPUT_DIRECTORY") {
        config.output.directory = val.into();
    }
    if let Ok(val) = std::env::var("RVANON_OUTPUT_MAPPING_DIRECTORY") {
        config.output.mapping_directory = val.into();
    }

    // Logging overrides
    if let Ok(val) = std::env::var("RVANON_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_bool("RVANON_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("RVANON_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("RVANON_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    value
        .trim()
        .parse()
        .map_err(|_| RvanonError::Configuration(format!("Invalid {} value: {}", name, value)))
}
