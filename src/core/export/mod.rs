//! Export adapter
//!
//! Turns the currently visible meter list into a downloadable file:
//! - [`columns`] - fixed column layouts
//! - [`delimited`] - CSV writer
//! - [`spreadsheet`] - XLSX writer
//! - [`artifact`] - file naming and delivery

pub mod artifact;
pub mod columns;
pub mod delimited;
pub mod spreadsheet;

pub use artifact::{export_records, ExportArtifact, ExportFormat, ExportNaming};
pub use columns::{Cell, Column, ExportProfile};
