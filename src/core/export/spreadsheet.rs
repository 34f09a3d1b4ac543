//! Spreadsheet (XLSX) writer

use super::columns::{Cell, ExportProfile};
use crate::domain::{MeterRecord, Result};
use rust_xlsxwriter::Workbook;

/// Worksheet name of every export
pub const SHEET_NAME: &str = "Meters";

/// Serializes `records` as a single-sheet XLSX workbook
pub fn write_xlsx(records: &[&MeterRecord], profile: ExportProfile) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        for (col, header) in profile.headers().into_iter().enumerate() {
            worksheet.write_string(0, col as u16, header)?;
        }

        for (i, record) in records.iter().enumerate() {
            let row = (i + 1) as u32;
            for (col, cell) in profile.row(record).into_iter().enumerate() {
                match cell {
                    Cell::Text(text) => {
                        worksheet.write_string(row, col as u16, text.as_str())?;
                    }
                    Cell::Number(n) => {
                        worksheet.write_number(row, col as u16, n)?;
                    }
                    Cell::Empty => {}
                }
            }
        }
    }

    let buffer = workbook.save_to_buffer()?;
    Ok(buffer)
}
