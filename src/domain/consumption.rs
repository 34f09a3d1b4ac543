//! Consumption analytics and externally collected data
//!
//! Read-only figures the metering API computes across all facilities, plus
//! the third-party findings gathered for one meter.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Monthly value above which consumption is flagged regardless of season, kWh
pub const CRITICAL_CONSUMPTION_KWH: f64 = 10_000.0;

/// Winter monthly value above which consumption is flagged, kWh
pub const WINTER_ELEVATED_KWH: f64 = 3_000.0;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Averaging window of the facility averages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsumptionPeriod {
    Daily,
    #[default]
    Monthly,
}

impl ConsumptionPeriod {
    /// Value of the API's `is_daily` query parameter
    pub fn is_daily(self) -> bool {
        matches!(self, ConsumptionPeriod::Daily)
    }

    pub fn label(self) -> &'static str {
        match self {
            ConsumptionPeriod::Daily => "day",
            ConsumptionPeriod::Monthly => "month",
        }
    }
}

impl fmt::Display for ConsumptionPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConsumptionPeriod::Daily => "daily",
            ConsumptionPeriod::Monthly => "monthly",
        })
    }
}

impl FromStr for ConsumptionPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" => Ok(ConsumptionPeriod::Daily),
            "monthly" | "month" => Ok(ConsumptionPeriod::Monthly),
            other => Err(format!(
                "Invalid period '{other}'. Must be 'daily' or 'monthly'"
            )),
        }
    }
}

/// How alarming one month's consumption looks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsumptionLevel {
    Normal,
    Elevated,
    Critical,
}

impl ConsumptionLevel {
    pub fn classify(kwh: f64, winter: bool) -> Self {
        if kwh > CRITICAL_CONSUMPTION_KWH {
            ConsumptionLevel::Critical
        } else if winter && kwh > WINTER_ELEVATED_KWH {
            ConsumptionLevel::Elevated
        } else {
            ConsumptionLevel::Normal
        }
    }

    /// Display color used by the console
    pub fn color(self) -> &'static str {
        match self {
            ConsumptionLevel::Normal => "blue",
            ConsumptionLevel::Elevated => "orange",
            ConsumptionLevel::Critical => "red",
        }
    }
}

/// One month of the average consumption series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthPoint {
    /// 1 = January
    pub month: u32,
    pub kwh: f64,
    /// October through April
    pub winter: bool,
    pub level: ConsumptionLevel,
}

impl MonthPoint {
    pub fn new(month: u32, kwh: f64) -> Self {
        let winter = month >= 10 || month <= 4;
        Self {
            month,
            kwh,
            winter,
            level: ConsumptionLevel::classify(kwh, winter),
        }
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES
            .get(self.month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("?")
    }
}

/// Turns the raw series into month points, January first
///
/// Values past the twelfth are ignored.
pub fn month_points(series: &[f64]) -> Vec<MonthPoint> {
    series
        .iter()
        .take(12)
        .zip(1u32..)
        .map(|(kwh, month)| MonthPoint::new(month, *kwh))
        .collect()
}

/// Classified advertisement found for the meter's address
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListingFinding {
    pub url: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub description: String,
}

/// Tax service record for the client
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxFinding {
    pub url: String,
}

/// Map object registered at the meter's address
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MapFinding {
    pub url: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub purpose_name: String,
}

/// Third-party data collected for one meter
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExternalData {
    #[serde(default)]
    pub avito: Vec<ListingFinding>,
    #[serde(default)]
    pub fns: Option<TaxFinding>,
    #[serde(default)]
    pub maps: Vec<MapFinding>,
}

impl ExternalData {
    pub fn is_empty(&self) -> bool {
        self.avito.is_empty() && self.fns.is_none() && self.maps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(12_500.0, false, ConsumptionLevel::Critical)]
    #[test_case(3_500.0, true, ConsumptionLevel::Elevated)]
    #[test_case(3_500.0, false, ConsumptionLevel::Normal)]
    #[test_case(3_000.0, true, ConsumptionLevel::Normal)]
    fn test_classify(kwh: f64, winter: bool, expected: ConsumptionLevel) {
        assert_eq!(ConsumptionLevel::classify(kwh, winter), expected);
    }

    #[test]
    fn test_month_points_seasons() {
        let points = month_points(&[320.0; 14]);
        assert_eq!(points.len(), 12);
        assert_eq!(points[0].name(), "January");
        assert!(points[3].winter);
        assert!(!points[4].winter);
        assert!(!points[8].winter);
        assert!(points[9].winter);
        assert_eq!(points[11].month, 12);
    }

    #[test]
    fn test_period_parsing() {
        assert_eq!("Daily".parse::<ConsumptionPeriod>().unwrap(), ConsumptionPeriod::Daily);
        assert!("weekly".parse::<ConsumptionPeriod>().is_err());
        assert!(!ConsumptionPeriod::default().is_daily());
    }

    #[test]
    fn test_external_data_partial_body() {
        let data: ExternalData =
            serde_json::from_str(r#"{"fns": {"url": "https://fns.example/tax"}}"#).unwrap();
        assert!(data.avito.is_empty());
        assert!(!data.is_empty());
        assert!(ExternalData::default().is_empty());
    }
}
