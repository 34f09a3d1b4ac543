//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Fairwatt configuration file.

use crate::config::{load_config, RunMode};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        match config.validate() {
            Ok(_) => {
                println!("✅ Configuration is valid");
                println!();
                println!("Configuration Summary:");
                println!("  Mode: {}", config.mode);
                println!("  Log Level: {}", config.application.log_level);
                if config.mode == RunMode::Production {
                    println!("  Metering API: {}", config.api.base_url);
                    println!("  Timeout: {}s", config.api.timeout_seconds);
                    println!(
                        "  Access Token: {}",
                        if config.api.access_token.is_some() {
                            "set"
                        } else {
                            "not set"
                        }
                    );
                } else {
                    println!("  Data Source: built-in fixture");
                }
                println!("  Page Size: {}", config.listing.page_size);
                println!(
                    "  Export: {} / {} -> {}",
                    config.export.format, config.export.profile, config.export.output_dir
                );
                println!("  Staff Members: {}", config.staff.len());
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(2) // Configuration error exit code
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_validate_missing_file() {
        let code = ValidateArgs {}
            .execute("definitely-missing-fairwatt.toml")
            .await
            .unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_validate_debug_config() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"mode = \"debug\"\n").unwrap();
        file.flush().unwrap();

        let path = file.path().to_string_lossy().to_string();
        let code = ValidateArgs {}.execute(&path).await.unwrap();
        assert_eq!(code, 0);
    }
}
