//! Filter predicates over meter records
//!
//! A record passes a [`FilterCriteria`] only when every active predicate
//! matches. Text predicates are case-insensitive substring matches; an empty
//! query is inactive. Numeric predicates are closed intervals.

use crate::domain::MeterRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed interval `[low, high]`
///
/// An interval with `low > high` contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeFilter<T> {
    pub low: T,
    pub high: T,
}

impl<T: PartialOrd + Copy> RangeFilter<T> {
    pub fn new(low: T, high: T) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: T) -> bool {
        self.low <= value && value <= self.high
    }

    /// True when no value can satisfy the interval
    pub fn is_empty(&self) -> bool {
        self.low > self.high
    }
}

/// Electric equipment predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentFilter {
    /// No restriction
    #[default]
    All,
    /// Only dwellings with electric heating
    Heating,
    /// Only dwellings with an electric stove
    Stove,
    /// Only dwellings with neither
    None,
}

impl EquipmentFilter {
    fn matches(self, record: &MeterRecord) -> bool {
        let heating = record.has_electric_heating();
        let stove = record.has_electric_stove();
        match self {
            EquipmentFilter::All => true,
            EquipmentFilter::Heating => heating,
            EquipmentFilter::Stove => stove,
            EquipmentFilter::None => !heating && !stove,
        }
    }
}

impl FromStr for EquipmentFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(EquipmentFilter::All),
            "heating" => Ok(EquipmentFilter::Heating),
            "stove" => Ok(EquipmentFilter::Stove),
            "none" => Ok(EquipmentFilter::None),
            other => Err(format!(
                "Invalid equipment filter '{other}'. Must be one of: all, heating, stove, none"
            )),
        }
    }
}

impl fmt::Display for EquipmentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EquipmentFilter::All => "all",
            EquipmentFilter::Heating => "heating",
            EquipmentFilter::Stove => "stove",
            EquipmentFilter::None => "none",
        };
        f.write_str(s)
    }
}

/// Minimum and maximum effective rating of a record list
///
/// Drives the default rating interval and the slider range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingBounds {
    pub min: u8,
    pub max: u8,
}

impl RatingBounds {
    /// Bounds of `records`, or the full 0..=100 scale for an empty list
    pub fn of(records: &[MeterRecord]) -> Self {
        let mut ratings = records.iter().map(MeterRecord::effective_rating);
        match ratings.next() {
            Some(first) => {
                let (min, max) = ratings.fold((first, first), |(lo, hi), r| (lo.min(r), hi.max(r)));
                Self { min, max }
            }
            None => Self { min: 0, max: 100 },
        }
    }
}

impl From<RatingBounds> for RangeFilter<u8> {
    fn from(bounds: RatingBounds) -> Self {
        RangeFilter::new(bounds.min, bounds.max)
    }
}

/// User-entered predicates for the meter list
///
/// Transient UI state: never serialized to the remote service.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Substring of the decimal identifier
    pub id: String,
    /// Client name substring
    pub name: String,
    /// Address substring
    pub address: String,
    /// Phone substring
    pub phone: String,
    /// Region substring
    pub region: String,
    /// Rating interval (absent rating counts as 0)
    pub rating: RangeFilter<u8>,
    /// Last consumption interval (absent reading counts as 0)
    pub consumption: Option<RangeFilter<f64>>,
    /// Living area interval; records without an area are not excluded
    pub area: Option<RangeFilter<f64>>,
    pub equipment: EquipmentFilter,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            address: String::new(),
            phone: String::new(),
            region: String::new(),
            rating: RangeFilter::new(0, 100),
            consumption: None,
            area: None,
            equipment: EquipmentFilter::All,
        }
    }
}

impl FilterCriteria {
    /// Full-range criteria derived from a freshly loaded base list
    pub fn for_records(records: &[MeterRecord]) -> Self {
        Self {
            rating: RatingBounds::of(records).into(),
            ..Self::default()
        }
    }

    /// Clears every predicate and recomputes the rating bounds from `records`
    pub fn reset_for(&mut self, records: &[MeterRecord]) {
        *self = Self::for_records(records);
    }

    /// Returns true if `record` satisfies every active predicate
    pub fn matches(&self, record: &MeterRecord) -> bool {
        if !self.id.is_empty() && !record.id.to_string().contains(self.id.as_str()) {
            return false;
        }
        if !text_matches(record.name(), &self.name)
            || !text_matches(record.address.as_deref(), &self.address)
            || !text_matches(record.phone(), &self.phone)
            || !text_matches(record.region.as_deref(), &self.region)
        {
            return false;
        }
        if !self.rating.contains(record.effective_rating()) {
            return false;
        }
        if let Some(range) = &self.consumption {
            if !range.contains(record.last_consumption.unwrap_or(0.0)) {
                return false;
            }
        }
        if let (Some(range), Some(square)) = (&self.area, record.details.square) {
            if !range.contains(square) {
                return false;
            }
        }
        self.equipment.matches(record)
    }
}

/// Case-insensitive substring match; an absent field never matches a non-empty query
pub fn text_matches(field: Option<&str>, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    match field {
        Some(value) => value.to_lowercase().contains(&query.to_lowercase()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MeterDetails;

    fn record(id: i64, name: &str, rating: u8) -> MeterRecord {
        MeterRecord::builder(id).name(name).rating(rating).build().unwrap()
    }

    #[test]
    fn test_text_matches_case_insensitive() {
        assert!(text_matches(Some("Ivanov Ivan"), "IVAN"));
        assert!(text_matches(Some("Иванов"), "иван"));
        assert!(!text_matches(Some("Petrov"), "ivan"));
    }

    #[test]
    fn test_text_matches_absent_field() {
        assert!(text_matches(None, ""));
        assert!(!text_matches(None, "a"));
    }

    #[test]
    fn test_range_filter() {
        let range = RangeFilter::new(10u8, 20u8);
        assert!(range.contains(10));
        assert!(range.contains(20));
        assert!(!range.contains(21));
        assert!(RangeFilter::new(5u8, 1u8).is_empty());
    }

    #[test]
    fn test_rating_bounds() {
        let records = vec![record(1, "a", 40), record(2, "b", 12), record(3, "c", 90)];
        assert_eq!(RatingBounds::of(&records), RatingBounds { min: 12, max: 90 });
        assert_eq!(RatingBounds::of(&[]), RatingBounds { min: 0, max: 100 });
    }

    #[test]
    fn test_rating_bounds_count_missing_as_zero() {
        let records = vec![record(1, "a", 40), MeterRecord::builder(2).build().unwrap()];
        assert_eq!(RatingBounds::of(&records).min, 0);
    }

    #[test]
    fn test_id_predicate() {
        let criteria = FilterCriteria {
            id: "2".to_string(),
            ..FilterCriteria::default()
        };
        assert!(criteria.matches(&record(12, "a", 50)));
        assert!(!criteria.matches(&record(13, "a", 50)));
    }

    #[test]
    fn test_area_predicate_ignores_records_without_area() {
        let criteria = FilterCriteria {
            area: Some(RangeFilter::new(50.0, 80.0)),
            ..FilterCriteria::default()
        };
        let without_area = record(1, "a", 50);
        let small = MeterRecord::builder(2)
            .details(MeterDetails {
                square: Some(20.0),
                ..MeterDetails::default()
            })
            .build()
            .unwrap();
        assert!(criteria.matches(&without_area));
        assert!(!criteria.matches(&small));
    }

    #[test]
    fn test_consumption_predicate_counts_missing_as_zero() {
        let criteria = FilterCriteria {
            consumption: Some(RangeFilter::new(100.0, 500.0)),
            ..FilterCriteria::default()
        };
        assert!(!criteria.matches(&record(1, "a", 50)));
        let with_reading = MeterRecord::builder(2)
            .last_consumption(250.0)
            .build()
            .unwrap();
        assert!(criteria.matches(&with_reading));
    }

    #[test]
    fn test_equipment_predicate() {
        let heated = MeterRecord::builder(1)
            .details(MeterDetails {
                has_electric_heating: Some(true),
                ..MeterDetails::default()
            })
            .build()
            .unwrap();
        let plain = MeterRecord::builder(2).build().unwrap();

        let mut criteria = FilterCriteria {
            equipment: EquipmentFilter::Heating,
            ..FilterCriteria::default()
        };
        assert!(criteria.matches(&heated));
        assert!(!criteria.matches(&plain));

        criteria.equipment = EquipmentFilter::None;
        assert!(!criteria.matches(&heated));
        assert!(criteria.matches(&plain));

        criteria.equipment = EquipmentFilter::Stove;
        assert!(!criteria.matches(&heated));
    }

    #[test]
    fn test_equipment_filter_from_str() {
        assert_eq!("Heating".parse::<EquipmentFilter>().unwrap(), EquipmentFilter::Heating);
        assert!("gas".parse::<EquipmentFilter>().is_err());
    }

    #[test]
    fn test_reset_for_restores_defaults() {
        let records = vec![record(1, "a", 30), record(2, "b", 70)];
        let mut criteria = FilterCriteria {
            name: "x".to_string(),
            equipment: EquipmentFilter::Stove,
            ..FilterCriteria::default()
        };
        criteria.reset_for(&records);
        assert!(criteria.name.is_empty());
        assert_eq!(criteria.equipment, EquipmentFilter::All);
        assert_eq!(criteria.rating, RangeFilter::new(30, 70));
    }
}
