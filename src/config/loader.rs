//! Reading `fairwatt.toml`
//!
//! Placeholders of the form `${VAR}` are resolved before parsing; the
//! `FAIRWATT_<SECTION>_<KEY>` variables are applied after it.

use super::schema::FairwattConfig;
use super::secret::secret_string;
use crate::domain::errors::FairwattError;
use crate::domain::result::Result;
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Reads, expands, parses, overrides and validates the file at `path`
///
/// # Errors
///
/// Every failure is reported as [`FairwattError::Configuration`]: a missing
/// or unreadable file, an unset `${VAR}`, bad TOML, an unparsable override,
/// or a value outside its allowed set.
///
/// # Examples
///
/// ```no_run
/// use fairwatt::config::loader::load_config;
///
/// let config = load_config("fairwatt.toml")?;
/// println!("{} staff members", config.roster().len());
/// # Ok::<(), fairwatt::domain::FairwattError>(())
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<FairwattConfig> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(FairwattError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let raw = fs::read_to_string(path).map_err(|e| {
        FairwattError::Configuration(format!("Cannot read {}: {e}", path.display()))
    })?;
    let expanded = expand_placeholders(&raw)?;

    let mut config: FairwattConfig = toml::from_str(&expanded).map_err(|e| {
        FairwattError::Configuration(format!("{} is not valid TOML: {e}", path.display()))
    })?;
    apply_env_overrides(&mut config)?;

    config
        .validate()
        .map_err(|e| FairwattError::Configuration(format!("Invalid configuration: {e}")))?;
    Ok(config)
}

/// Replaces `${VAR}` with the variable's value
///
/// Lines starting with `#` are left untouched so commented-out templates
/// load without the variables they mention. All unset names are reported
/// together.
fn expand_placeholders(input: &str) -> Result<String> {
    let placeholder = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| FairwattError::Other(format!("Invalid placeholder pattern: {e}")))?;
    let mut unset: Vec<String> = Vec::new();

    let expanded: Vec<String> = input
        .lines()
        .map(|line| {
            if line.trim_start().starts_with('#') {
                return line.to_string();
            }
            placeholder
                .replace_all(line, |caps: &Captures| {
                    let name = &caps[1];
                    std::env::var(name).unwrap_or_else(|_| {
                        if !unset.iter().any(|n| n == name) {
                            unset.push(name.to_string());
                        }
                        String::new()
                    })
                })
                .into_owned()
        })
        .collect();

    if unset.is_empty() {
        Ok(expanded.join("\n") + "\n")
    } else {
        Err(FairwattError::Configuration(format!(
            "Missing required environment variables: {}",
            unset.join(", ")
        )))
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Parses `name` when set; a bad value is a configuration error
fn env_parsed<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_value(name)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| {
                FairwattError::Configuration(format!("{name}={raw} is not accepted: {e}"))
            })
        })
        .transpose()
}

/// `FAIRWATT_<SECTION>_<KEY>` overrides, e.g. `FAIRWATT_API_BASE_URL`
fn apply_env_overrides(config: &mut FairwattConfig) -> Result<()> {
    if let Some(mode) = env_parsed("FAIRWATT_MODE")? {
        config.mode = mode;
    }
    if let Some(level) = env_value("FAIRWATT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = level;
    }

    if let Some(url) = env_value("FAIRWATT_API_BASE_URL") {
        config.api.base_url = url;
    }
    if let Some(token) = env_value("FAIRWATT_API_ACCESS_TOKEN") {
        config.api.access_token = Some(secret_string(token));
    }
    if let Some(timeout) = env_parsed("FAIRWATT_API_TIMEOUT_SECONDS")? {
        config.api.timeout_seconds = timeout;
    }
    if let Some(verify) = env_parsed("FAIRWATT_API_TLS_VERIFY")? {
        config.api.tls_verify = verify;
    }

    if let Some(size) = env_parsed("FAIRWATT_LISTING_PAGE_SIZE")? {
        config.listing.page_size = size;
    }

    if let Some(prefix) = env_value("FAIRWATT_EXPORT_FILE_PREFIX") {
        config.export.file_prefix = prefix;
    }
    if let Some(dir) = env_value("FAIRWATT_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = dir;
    }
    if let Some(format) = env_parsed("FAIRWATT_EXPORT_FORMAT")? {
        config.export.format = format;
    }
    if let Some(profile) = env_parsed("FAIRWATT_EXPORT_PROFILE")? {
        config.export.profile = profile;
    }

    if let Some(enabled) = env_parsed("FAIRWATT_LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = enabled;
    }
    if let Some(path) = env_value("FAIRWATT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = path;
    }

    Ok(())
}
