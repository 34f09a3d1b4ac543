//! Export command implementation
//!
//! Fetches one page, applies the filter/sort flags and writes the visible
//! meters to a CSV or XLSX file named `{prefix}_{YYYY-MM-DD}.{ext}`.

use super::common::{exit_code_for, load_or_report, open_store, FilterArgs, PageArgs};
use crate::core::export::{ExportFormat, ExportProfile};
use chrono::Utc;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    #[command(flatten)]
    pub page: PageArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Output format (xlsx or csv); defaults to export.format
    #[arg(long)]
    pub format: Option<ExportFormat>,

    /// Column set (standard or extended); defaults to export.profile
    #[arg(long)]
    pub profile: Option<ExportProfile>,

    /// Output directory; defaults to export.output_dir
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let config = match load_or_report(config_path) {
            Ok(config) => config,
            Err(code) => return Ok(code),
        };
        let mut store = match open_store(&config, &self.page).await {
            Ok(store) => store,
            Err(code) => return Ok(code),
        };
        self.filters.apply_to(&mut store);

        let format = self.format.unwrap_or(config.export.format);
        let profile = self.profile.unwrap_or(config.export.profile);
        let output = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.export.output_dir));

        let artifact = match store.export(format, profile, &config.export.naming(), Utc::now()) {
            Ok(artifact) => artifact,
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to serialize export");
                println!("❌ {}", e.user_message());
                return Ok(exit_code_for(&e));
            }
        };

        let path = artifact.write_to(&output)?;
        println!(
            "✅ Exported {} meters ({} profile) to {}",
            artifact.rows,
            profile,
            path.display()
        );
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_args_defaults() {
        let args = ExportArgs::default();
        assert!(args.format.is_none());
        assert!(args.profile.is_none());
        assert!(args.output.is_none());
    }
}
