//! Export artifact assembly and delivery

use super::columns::ExportProfile;
use super::delimited::write_csv;
use super::spreadsheet::write_xlsx;
use crate::domain::{FairwattError, MeterRecord, Result};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// XLSX workbook
    #[default]
    Xlsx,
    /// Comma-separated text
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "xlsx" | "excel" | "spreadsheet" => Ok(ExportFormat::Xlsx),
            "csv" | "delimited" => Ok(ExportFormat::Csv),
            other => Err(format!(
                "Invalid export format '{other}'. Must be 'xlsx' or 'csv'"
            )),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// File naming rule: `{prefix}_{YYYY-MM-DD}.{ext}`, date taken at a fixed UTC offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportNaming {
    pub prefix: String,
    pub utc_offset_hours: i32,
}

impl Default for ExportNaming {
    fn default() -> Self {
        Self {
            prefix: "meters".to_string(),
            utc_offset_hours: 3,
        }
    }
}

impl ExportNaming {
    /// File name for an export taken at `now`
    pub fn file_name(&self, format: ExportFormat, now: DateTime<Utc>) -> Result<String> {
        let offset = FixedOffset::east_opt(self.utc_offset_hours * 3600).ok_or_else(|| {
            FairwattError::Configuration(format!(
                "Invalid UTC offset: {} hours",
                self.utc_offset_hours
            ))
        })?;
        let date = now.with_timezone(&offset).format("%Y-%m-%d");
        Ok(format!("{}_{}.{}", self.prefix, date, format.extension()))
    }
}

/// Serialized export ready to be delivered
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub format: ExportFormat,
    /// Number of data rows (header excluded)
    pub rows: usize,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Writes the artifact into `dir`, creating the directory if needed
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        crate::log_export_written!(path.display(), self.rows);
        Ok(path)
    }
}

/// Serializes the visible records in the requested format
pub fn export_records(
    records: &[&MeterRecord],
    format: ExportFormat,
    profile: ExportProfile,
    naming: &ExportNaming,
    now: DateTime<Utc>,
) -> Result<ExportArtifact> {
    let file_name = naming.file_name(format, now)?;
    let bytes = match format {
        ExportFormat::Csv => write_csv(records, profile)?,
        ExportFormat::Xlsx => write_xlsx(records, profile)?,
    };

    tracing::debug!(
        file_name = %file_name,
        rows = records.len(),
        bytes = bytes.len(),
        "Serialized export"
    );

    Ok(ExportArtifact {
        file_name,
        format,
        rows: records.len(),
        bytes,
    })
}
