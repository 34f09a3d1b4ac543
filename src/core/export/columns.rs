//! Export column sets
//!
//! The grid offers two fixed, human-readable column layouts. Values are
//! extracted per record as [`Cell`]s so each writer decides how to render
//! them.

use crate::domain::MeterRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One exported value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    fn text(value: Option<&str>) -> Self {
        value.map_or(Cell::Empty, |v| Cell::Text(v.to_string()))
    }

    fn number<T: Into<f64>>(value: Option<T>) -> Self {
        value.map_or(Cell::Empty, |v| Cell::Number(v.into()))
    }

    fn yes_no(value: bool) -> Self {
        Cell::Text(if value { "Yes" } else { "No" }.to_string())
    }

    /// Rendering for delimited text
    pub fn render(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Empty => String::new(),
        }
    }
}

/// Exported column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    ClientName,
    Phone,
    Email,
    Rating,
    Address,
    LastConsumption,
    Tariff,
    TariffPrice,
    Region,
    Area,
    ElectricHeating,
    ElectricStove,
    DwellingType,
    Residents,
    Rooms,
    Settlement,
}

impl Column {
    pub fn header(self) -> &'static str {
        match self {
            Column::Id => "ID",
            Column::ClientName => "Client name",
            Column::Phone => "Phone",
            Column::Email => "Email",
            Column::Rating => "Rating",
            Column::Address => "Address",
            Column::LastConsumption => "Last consumption",
            Column::Tariff => "Tariff",
            Column::TariffPrice => "Tariff price",
            Column::Region => "Region",
            Column::Area => "Area (m²)",
            Column::ElectricHeating => "Electric heating",
            Column::ElectricStove => "Electric stove",
            Column::DwellingType => "Dwelling type",
            Column::Residents => "Residents",
            Column::Rooms => "Rooms",
            Column::Settlement => "Settlement",
        }
    }

    pub fn value(self, record: &MeterRecord) -> Cell {
        let details = &record.details;
        match self {
            Column::Id => Cell::Number(record.id.get() as f64),
            Column::ClientName => Cell::text(record.name()),
            Column::Phone => Cell::text(record.phone()),
            Column::Email => Cell::text(record.email()),
            Column::Rating => Cell::number(record.rating.map(|r| r.value())),
            Column::Address => Cell::text(record.address.as_deref()),
            Column::LastConsumption => Cell::number(record.last_consumption),
            Column::Tariff => Cell::text(details.tariff_type_name.as_deref()),
            Column::TariffPrice => Cell::number(details.tariff_price),
            Column::Region => Cell::text(record.region.as_deref()),
            Column::Area => Cell::number(details.square),
            Column::ElectricHeating => Cell::yes_no(record.has_electric_heating()),
            Column::ElectricStove => Cell::yes_no(record.has_electric_stove()),
            Column::DwellingType => Cell::text(details.facility_type_name.as_deref()),
            Column::Residents => Cell::number(details.residents_count),
            Column::Rooms => Cell::number(details.rooms_count),
            Column::Settlement => Cell::text(details.settlement_name.as_deref()),
        }
    }
}

/// Column layout of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportProfile {
    /// Contact-oriented layout of the main meter list
    #[default]
    Standard,
    /// Tariff and equipment layout of the analytics list
    Extended,
}

const STANDARD_COLUMNS: &[Column] = &[
    Column::ClientName,
    Column::Phone,
    Column::Email,
    Column::Rating,
    Column::Address,
    Column::Area,
    Column::DwellingType,
    Column::Residents,
    Column::Rooms,
];

const EXTENDED_COLUMNS: &[Column] = &[
    Column::Id,
    Column::ClientName,
    Column::Rating,
    Column::Address,
    Column::LastConsumption,
    Column::Tariff,
    Column::TariffPrice,
    Column::Region,
    Column::Area,
    Column::ElectricHeating,
    Column::ElectricStove,
    Column::DwellingType,
    Column::Settlement,
];

impl ExportProfile {
    pub fn columns(self) -> &'static [Column] {
        match self {
            ExportProfile::Standard => STANDARD_COLUMNS,
            ExportProfile::Extended => EXTENDED_COLUMNS,
        }
    }

    pub fn headers(self) -> Vec<&'static str> {
        self.columns().iter().map(|c| c.header()).collect()
    }

    pub fn row(self, record: &MeterRecord) -> Vec<Cell> {
        self.columns().iter().map(|c| c.value(record)).collect()
    }
}

impl FromStr for ExportProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(ExportProfile::Standard),
            "extended" => Ok(ExportProfile::Extended),
            other => Err(format!(
                "Invalid export profile '{other}'. Must be 'standard' or 'extended'"
            )),
        }
    }
}

impl fmt::Display for ExportProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportProfile::Standard => f.write_str("standard"),
            ExportProfile::Extended => f.write_str("extended"),
        }
    }
}
