//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::AlvysConfig;
use super::secret::secret_string;
use crate::domain::errors::AlvysError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into AlvysConfig
/// 4. Applies environment variable overrides (ALVYS_* prefix)
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
/// use alvys_etl::config::loader::load_config;
///
/// let config = load_config("alvys.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AlvysConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AlvysError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        AlvysError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration text, then applies substitution, overrides and
/// validation exactly as [`load_config`] does
pub fn parse_config(contents: &str) -> Result<AlvysConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: AlvysConfig = toml::from_str(&contents)
        .map_err(|e| AlvysError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        AlvysError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| AlvysError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(AlvysError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

fn parse_override<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| AlvysError::Configuration(format!("Invalid value for {name}: {e}")))
}

fn env_override(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Applies environment variable overrides using ALVYS_* prefix
///
/// Environment variables follow the pattern: ALVYS_<SECTION>_<KEY>
/// For example: ALVYS_API_PAGE_SIZE, ALVYS_WAREHOUSE_SCHEMA
fn apply_env_overrides(config: &mut AlvysConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env_override("ALVYS_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(val) = env_override("ALVYS_APPLICATION_DATA_DIR") {
        config.application.data_dir = val;
    }

    // API overrides
    if let Some(val) = env_override("ALVYS_API_AUTH_BASE_URL") {
        config.api.auth_base_url = val;
    }
    if let Some(val) = env_override("ALVYS_API_BASE_URL") {
        config.api.base_url = val;
    }
    if let Some(val) = env_override("ALVYS_API_API_VERSION") {
        config.api.api_version = val;
    }
    if let Some(val) = env_override("ALVYS_API_PAGE_SIZE") {
        config.api.page_size = parse_override("ALVYS_API_PAGE_SIZE", &val)?;
    }
    if let Some(val) = env_override("ALVYS_API_TIMEOUT_SECONDS") {
        config.api.timeout_seconds = parse_override("ALVYS_API_TIMEOUT_SECONDS", &val)?;
    }
    if let Some(val) = env_override("ALVYS_API_MAX_ITEMS") {
        config.api.max_items = Some(parse_override("ALVYS_API_MAX_ITEMS", &val)?);
    }

    // Export overrides
    if let Some(val) = env_override("ALVYS_EXPORT_FILTER_VARIANT") {
        config.export.filter_variant = parse_override("ALVYS_EXPORT_FILTER_VARIANT", &val)?;
    }

    // Warehouse overrides (only if the warehouse is configured)
    if let Some(ref mut warehouse) = config.warehouse {
        if let Some(val) = env_override("ALVYS_WAREHOUSE_CONNECTION_STRING") {
            warehouse.connection_string = secret_string(val);
        }
        if let Some(val) = env_override("ALVYS_WAREHOUSE_CONNECT_TIMEOUT_SECONDS") {
            warehouse.connect_timeout_seconds =
                parse_override("ALVYS_WAREHOUSE_CONNECT_TIMEOUT_SECONDS", &val)?;
        }
        if let Some(val) = env_override("ALVYS_WAREHOUSE_CHUNK_SIZE") {
            warehouse.chunk_size = parse_override("ALVYS_WAREHOUSE_CHUNK_SIZE", &val)?;
        }
        if let Some(val) = env_override("ALVYS_WAREHOUSE_SSL_MODE") {
            warehouse.ssl_mode = val;
        }
        if let Some(val) = env_override("ALVYS_WAREHOUSE_SCHEMA") {
            warehouse.schema = Some(val);
        }
        if let Some(val) = env_override("ALVYS_WAREHOUSE_TABLE_PREFIX") {
            warehouse.table_prefix = val;
        }
        if let Some(val) = env_override("ALVYS_WAREHOUSE_SCHEMA_LAYOUT") {
            warehouse.schema_layout = parse_override("ALVYS_WAREHOUSE_SCHEMA_LAYOUT", &val)?;
        }
    }

    // Credential overrides
    if let Some(val) = env_override("ALVYS_CREDENTIALS_SOURCE") {
        config.credentials.source = parse_override("ALVYS_CREDENTIALS_SOURCE", &val)?;
    }
    if let Some(val) = env_override("ALVYS_CREDENTIALS_TABLE") {
        config.credentials.table = val;
    }
    if let Some(val) = env_override("ALVYS_CREDENTIALS_CONNECTION_STRING") {
        config.credentials.connection_string = Some(secret_string(val));
    }

    // Logging overrides
    if let Some(val) = env_override("ALVYS_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("ALVYS_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Some(val) = env_override("ALVYS_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = env_override("ALVYS_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
