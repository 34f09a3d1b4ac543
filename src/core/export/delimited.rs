//! Delimited-text (CSV) writer

use super::columns::ExportProfile;
use crate::domain::{FairwattError, MeterRecord, Result};

/// Serializes `records` as CSV: one header row, then one row per record
pub fn write_csv(records: &[&MeterRecord], profile: ExportProfile) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(profile.headers())?;

    for record in records {
        let row: Vec<String> = profile.row(record).iter().map(|c| c.render()).collect();
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|e| FairwattError::Export(format!("Failed to flush CSV output: {e}")))
}
