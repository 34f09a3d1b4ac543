//! Configuration schema types
//!
//! This module defines the configuration structure for Fairwatt.

use crate::adapters::PAGE_SIZE_OPTIONS;
use crate::config::SecretString;
use crate::core::export::{ExportFormat, ExportNaming, ExportProfile};
use crate::domain::Employee;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Runtime mode selector
///
/// `debug` serves the built-in fixture and never touches the network;
/// `production` talks to the metering API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    Debug,
    #[default]
    Production,
}

impl FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(RunMode::Debug),
            "production" => Ok(RunMode::Production),
            other => Err(format!(
                "Invalid mode '{other}'. Must be 'debug' or 'production'"
            )),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Debug => f.write_str("debug"),
            RunMode::Production => f.write_str("production"),
        }
    }
}

/// Main Fairwatt configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FairwattConfig {
    /// Runtime mode (debug, production)
    #[serde(default)]
    pub mode: RunMode,

    #[serde(default)]
    pub application: ApplicationConfig,

    /// Metering API connection
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub listing: ListingConfig,

    #[serde(default)]
    pub export: ExportConfig,

    /// Field staff available for visit plans
    #[serde(default)]
    pub staff: Vec<StaffConfig>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FairwattConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.api.validate(self.mode)?;
        self.listing.validate()?;
        self.export.validate()?;

        let mut seen = std::collections::HashSet::new();
        for member in &self.staff {
            member.validate()?;
            if !seen.insert(member.id) {
                return Err(format!("Duplicate staff id {}", member.id));
            }
        }

        self.logging.validate()?;
        Ok(())
    }

    /// Staff roster as domain values
    pub fn roster(&self) -> Vec<Employee> {
        self.staff
            .iter()
            .map(|s| Employee::new(s.id, s.name.clone()))
            .collect()
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Metering API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the metering service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Bearer token sent with every request (optional)
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub access_token: Option<SecretString>,

    /// TLS certificate verification enabled
    ///
    /// **SECURITY WARNING**: only disable against local test servers. Production
    /// mode refuses `false`.
    #[serde(default = "default_true")]
    pub tls_verify: bool,
}

impl ApiConfig {
    fn validate(&self, mode: RunMode) -> Result<(), String> {
        if self.timeout_seconds == 0 {
            return Err("api.timeout_seconds must be > 0".to_string());
        }

        // Debug mode never opens a connection
        if mode == RunMode::Debug {
            return Ok(());
        }

        if self.base_url.is_empty() {
            return Err("api.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("api.base_url must start with http:// or https://".to_string());
        }

        if !self.tls_verify {
            return Err(
                "TLS certificate verification cannot be disabled in production mode. \
                Set 'tls_verify = true' or run with 'mode = \"debug\"'."
                    .to_string(),
            );
        }

        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            access_token: None,
            tls_verify: true,
        }
    }
}

/// Meter list configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Records per page (10, 25, 50 or 100)
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl ListingConfig {
    fn validate(&self) -> Result<(), String> {
        if !PAGE_SIZE_OPTIONS.contains(&self.page_size) {
            return Err(format!(
                "Invalid listing.page_size {}. Must be one of: {:?}",
                self.page_size, PAGE_SIZE_OPTIONS
            ));
        }
        Ok(())
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// File name prefix, followed by `_YYYY-MM-DD`
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Directory export files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Default format (xlsx, csv)
    #[serde(default)]
    pub format: ExportFormat,

    /// Default column set (standard, extended)
    #[serde(default)]
    pub profile: ExportProfile,

    /// Offset used to date export files
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.file_prefix.trim().is_empty() {
            return Err("export.file_prefix cannot be empty".to_string());
        }

        if self
            .file_prefix
            .chars()
            .any(|c| matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        {
            return Err(format!(
                "export.file_prefix '{}' contains characters not allowed in file names",
                self.file_prefix
            ));
        }

        if self.output_dir.is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }

        if !(-12..=14).contains(&self.utc_offset_hours) {
            return Err(format!(
                "export.utc_offset_hours must be between -12 and 14, got {}",
                self.utc_offset_hours
            ));
        }

        Ok(())
    }

    /// Naming rule for export files
    pub fn naming(&self) -> ExportNaming {
        ExportNaming {
            prefix: self.file_prefix.clone(),
            utc_offset_hours: self.utc_offset_hours,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_prefix: default_file_prefix(),
            output_dir: default_output_dir(),
            format: ExportFormat::default(),
            profile: ExportProfile::default(),
            utc_offset_hours: default_utc_offset_hours(),
        }
    }
}

/// One `[[staff]]` entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffConfig {
    pub id: i64,
    /// Full name shown in the staff picker
    pub name: String,
}

impl StaffConfig {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err(format!("staff entry {} has an empty name", self.id));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    pub(crate) fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "http://localhost:1252/".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_page_size() -> u32 {
    PAGE_SIZE_OPTIONS[0]
}

fn default_file_prefix() -> String {
    "meters".to_string()
}

fn default_output_dir() -> String {
    "./exports".to_string()
}

fn default_utc_offset_hours() -> i32 {
    3
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig {
            log_level: "info".to_string(),
        };

        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = FairwattConfig::default();
        assert_eq!(config.mode, RunMode::Production);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_refuses_disabled_tls() {
        let mut config = FairwattConfig::default();
        config.api.tls_verify = false;

        let err = config.validate().unwrap_err();
        assert!(err.contains("cannot be disabled in production"));

        config.mode = RunMode::Debug;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_requires_http_url() {
        let mut config = FairwattConfig::default();
        config.api.base_url = "ftp://meters.example.com".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_page_size_must_be_offered() {
        let mut config = ListingConfig { page_size: 25 };
        assert!(config.validate().is_ok());

        config.page_size = 30;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_prefix_validation() {
        let mut config = ExportConfig::default();
        config.file_prefix = "meters/2025".to_string();
        assert!(config.validate().is_err());

        config.file_prefix = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_offset_range() {
        let mut config = ExportConfig::default();
        config.utc_offset_hours = 15;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_staff_rejected() {
        let mut config = FairwattConfig::default();
        config.staff = vec![
            StaffConfig {
                id: 1,
                name: "Ivanov".to_string(),
            },
            StaffConfig {
                id: 1,
                name: "Petrova".to_string(),
            },
        ];
        assert!(config.validate().unwrap_err().contains("Duplicate staff id"));
    }

    #[test]
    fn test_roster() {
        let mut config = FairwattConfig::default();
        config.staff = vec![StaffConfig {
            id: 7,
            name: "Sidorov".to_string(),
        }];
        let roster = config.roster();
        assert_eq!(roster[0].id.get(), 7);
    }

    #[test]
    fn test_access_token_not_in_debug_output() {
        let config = ApiConfig {
            access_token: Some(secret_string("tok-123".to_string())),
            ..ApiConfig::default()
        };
        assert!(!format!("{config:?}").contains("tok-123"));
    }

    #[test]
    fn test_logging_rotation_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "size".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_full_toml() {
        let config: FairwattConfig = toml::from_str(
            r#"
mode = "debug"

[api]
base_url = "https://meters.example.com"

[listing]
page_size = 50

[export]
format = "csv"
profile = "extended"

[[staff]]
id = 1
name = "Ivanov Aleksey Petrovich"
"#,
        )
        .unwrap();

        assert_eq!(config.mode, RunMode::Debug);
        assert_eq!(config.listing.page_size, 50);
        assert_eq!(config.export.format, ExportFormat::Csv);
        assert_eq!(config.export.profile, ExportProfile::Extended);
        assert_eq!(config.staff.len(), 1);
        assert!(config.validate().is_ok());
    }
}
