//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "fairwatt.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Fairwatt configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set mode = \"debug\" to try the console on fixture data");
                println!("  3. For production, set api.base_url and, if the API needs a token,");
                println!("     uncomment access_token and put FAIRWATT_ACCESS_TOKEN=... in .env");
                println!("  4. Validate configuration: fairwatt validate-config");
                println!("  5. List meters: fairwatt list");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Fairwatt Configuration File

mode = "production"  # debug | production

[application]
log_level = "info"

[api]
base_url = "http://localhost:1252/"
# access_token = "${FAIRWATT_ACCESS_TOKEN}"
timeout_seconds = 30
tls_verify = true

[listing]
page_size = 10

[export]
file_prefix = "meters"
output_dir = "./exports"
format = "xlsx"
profile = "standard"
utc_offset_hours = 3

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Fairwatt Configuration File
# Meter list console: fetch, filter, export and plan field visits
#
# Values of the form ${VAR} are read from the environment (or .env).
# Any key can also be overridden with FAIRWATT_<SECTION>_<KEY>,
# for example FAIRWATT_API_BASE_URL or FAIRWATT_EXPORT_FORMAT.

# ============================================================================
# Runtime Mode
# ============================================================================
# debug      - built-in fixture data, no network, no authentication
# production - talk to the metering API
mode = "production"

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Metering API
# ============================================================================
[api]
# Base URL; endpoints live under api/v1/
base_url = "http://localhost:1252/"

# Bearer token (use an environment variable); omit for open endpoints
# access_token = "${FAIRWATT_ACCESS_TOKEN}"

# Request timeout in seconds
timeout_seconds = 30

# TLS certificate verification (cannot be disabled in production mode)
tls_verify = true

# ============================================================================
# Meter List
# ============================================================================
[listing]
# Records per page: 10, 25, 50 or 100
page_size = 10

# ============================================================================
# Export
# ============================================================================
[export]
# Files are named {file_prefix}_{YYYY-MM-DD}.{xlsx|csv}
file_prefix = "meters"

# Directory export files are written to
output_dir = "./exports"

# Default format: xlsx | csv
format = "xlsx"

# Default column set:
# - standard: client name, phone, email, rating, address, area, dwelling
#             type, residents, rooms
# - extended: id, client name, rating, address, last consumption, tariff,
#             tariff price, region, area, electric heating, electric stove,
#             dwelling type, settlement
profile = "standard"

# The date in the file name is taken at this UTC offset
utc_offset_hours = 3

# ============================================================================
# Field Staff
# ============================================================================
[[staff]]
id = 1
name = "Ivanov Aleksey Petrovich"

[[staff]]
id = 2
name = "Petrova Maria Sergeevna"

# ============================================================================
# Logging
# ============================================================================
[logging]
# Write JSON log files in addition to console output
local_enabled = false

# Log file directory
local_path = "./logs"

# Rotation: daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FairwattConfig;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "fairwatt.toml".to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.output, "fairwatt.toml");
        assert!(!args.with_examples);
        assert!(!args.force);
    }

    #[test]
    fn test_generate_minimal_config() {
        let config = InitArgs::generate_minimal_config();
        assert!(config.contains("[application]"));
        assert!(config.contains("[api]"));
        assert!(config.contains("[export]"));
    }

    #[test]
    fn test_generated_configs_parse() {
        for text in [
            InitArgs::generate_minimal_config(),
            InitArgs::generate_config_with_examples(),
        ] {
            let parsed: FairwattConfig = toml::from_str(&text).unwrap();
            assert!(parsed.validate().is_ok());
        }
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("fairwatt.toml");
        std::fs::write(&path, "mode = \"debug\"\n").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);

        let forced = InitArgs { force: true, ..args };
        assert_eq!(forced.execute().await.unwrap(), 0);
        assert!(std::fs::read_to_string(&path).unwrap().contains("[api]"));
    }
}
