//! Meter record domain model
//!
//! A [`MeterRecord`] is one row of the meter grid: the client behind a
//! metering point, where it is, how trustworthy its data looks and what kind
//! of dwelling it serves. Records are immutable once a page is loaded.

use super::ids::MeterId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Data-quality confidence score in the inclusive range 0..=100
///
/// 0 is the worst, 100 the best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest possible rating
    pub const MIN: Rating = Rating(0);

    /// Highest possible rating
    pub const MAX: Rating = Rating(100);

    /// Creates a rating, rejecting values above 100
    pub fn new(value: u8) -> Result<Self, String> {
        if value > 100 {
            return Err(format!("Rating must be between 0 and 100, got {value}"));
        }
        Ok(Self(value))
    }

    /// Converts a wire value, rounding to the nearest integer
    pub fn from_f64(value: f64) -> Result<Self, String> {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(format!("Rating must be between 0 and 100, got {value}"));
        }
        Ok(Self(value.round() as u8))
    }

    /// Returns the raw score
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Colour band used to highlight the row
    pub fn band(self) -> RatingBand {
        RatingBand::for_value(self.0)
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Colour band of a rating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingBand {
    /// Below 20
    Critical,
    /// 20 to 39
    Low,
    /// 40 to 59
    Medium,
    /// 60 to 79
    Good,
    /// 80 and above
    Excellent,
}

impl RatingBand {
    /// Band for a raw score
    pub fn for_value(value: u8) -> Self {
        match value {
            0..=19 => RatingBand::Critical,
            20..=39 => RatingBand::Low,
            40..=59 => RatingBand::Medium,
            60..=79 => RatingBand::Good,
            _ => RatingBand::Excellent,
        }
    }

    /// Row highlight colour
    pub fn color(self) -> &'static str {
        match self {
            RatingBand::Critical => "#ff7875",
            RatingBand::Low => "#ff9c6e",
            RatingBand::Medium => "#ffc069",
            RatingBand::Good => "#91d5ff",
            RatingBand::Excellent => "#b7eb8f",
        }
    }

    /// Short label for terminal output
    pub fn label(self) -> &'static str {
        match self {
            RatingBand::Critical => "critical",
            RatingBand::Low => "low",
            RatingBand::Medium => "medium",
            RatingBand::Good => "good",
            RatingBand::Excellent => "excellent",
        }
    }
}

/// Client contact data attached to a meter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientInfo {
    /// Full name of the client
    pub name: Option<String>,
    /// Phone number
    pub phone: Option<String>,
    /// E-mail address
    pub email: Option<String>,
}

/// Dwelling and tariff details of a metering point
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeterDetails {
    /// Living area in m²
    pub square: Option<f64>,
    /// Dwelling type label (private house, apartment, other)
    pub facility_type_name: Option<String>,
    /// Number of residents
    pub residents_count: Option<u32>,
    /// Number of rooms
    pub rooms_count: Option<u32>,
    /// Tariff type label
    pub tariff_type_name: Option<String>,
    /// Tariff price
    pub tariff_price: Option<f64>,
    pub has_electric_heating: Option<bool>,
    pub has_electric_stove: Option<bool>,
    /// Settlement (town or village) name
    pub settlement_name: Option<String>,
}

/// Latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// One client/metering-point entry of the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterRecord {
    /// Identifier, unique within a page
    pub id: MeterId,

    /// Facility the meter belongs to
    pub facility_id: Option<i64>,

    /// Client contact data
    #[serde(default)]
    pub client: ClientInfo,

    /// Postal address
    pub address: Option<String>,

    /// Region name
    pub region: Option<String>,

    /// Data-quality score, absent when never rated
    pub rating: Option<Rating>,

    /// Dwelling details
    #[serde(default)]
    pub details: MeterDetails,

    /// Geocoordinates of the metering point
    pub geodata: Option<GeoPoint>,

    /// Last meter reading in kWh
    pub last_consumption: Option<f64>,

    /// Verification status, absent when never checked
    pub verified_status: Option<String>,

    /// Free-text note
    pub note: Option<String>,
}

impl MeterRecord {
    /// Creates a new builder for a record with the given identifier
    pub fn builder(id: impl Into<MeterId>) -> MeterRecordBuilder {
        MeterRecordBuilder::new(id)
    }

    pub fn name(&self) -> Option<&str> {
        self.client.name.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.client.phone.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.client.email.as_deref()
    }

    /// Rating used for filtering, sorting and colouring (absent counts as 0)
    pub fn effective_rating(&self) -> u8 {
        self.rating.map(Rating::value).unwrap_or(0)
    }

    /// Verification status label
    pub fn verification_label(&self) -> &str {
        self.verified_status.as_deref().unwrap_or("Not checked")
    }

    pub fn has_electric_heating(&self) -> bool {
        self.details.has_electric_heating.unwrap_or(false)
    }

    pub fn has_electric_stove(&self) -> bool {
        self.details.has_electric_stove.unwrap_or(false)
    }
}

/// Builder for constructing MeterRecord instances
#[derive(Debug)]
pub struct MeterRecordBuilder {
    record: MeterRecord,
    raw_rating: Option<u8>,
}

impl MeterRecordBuilder {
    /// Creates a builder with every optional field empty
    pub fn new(id: impl Into<MeterId>) -> Self {
        Self {
            record: MeterRecord {
                id: id.into(),
                facility_id: None,
                client: ClientInfo::default(),
                address: None,
                region: None,
                rating: None,
                details: MeterDetails::default(),
                geodata: None,
                last_consumption: None,
                verified_status: None,
                note: None,
            },
            raw_rating: None,
        }
    }

    pub fn facility_id(mut self, facility_id: i64) -> Self {
        self.record.facility_id = Some(facility_id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.record.client.name = Some(name.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.record.client.phone = Some(phone.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.record.client.email = Some(email.into());
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.record.address = Some(address.into());
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.record.region = Some(region.into());
        self
    }

    /// Sets the rating; validated by [`build`](Self::build)
    pub fn rating(mut self, rating: u8) -> Self {
        self.raw_rating = Some(rating);
        self
    }

    pub fn details(mut self, details: MeterDetails) -> Self {
        self.record.details = details;
        self
    }

    pub fn geodata(mut self, latitude: f64, longitude: f64) -> Self {
        self.record.geodata = Some(GeoPoint {
            latitude,
            longitude,
        });
        self
    }

    pub fn last_consumption(mut self, value: f64) -> Self {
        self.record.last_consumption = Some(value);
        self
    }

    pub fn verified_status(mut self, status: impl Into<String>) -> Self {
        self.record.verified_status = Some(status.into());
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.record.note = Some(note.into());
        self
    }

    /// Builds the record
    ///
    /// # Errors
    ///
    /// Returns an error if the rating lies outside 0..=100.
    pub fn build(mut self) -> Result<MeterRecord, String> {
        if let Some(raw) = self.raw_rating {
            self.record.rating = Some(Rating::new(raw)?);
        }
        Ok(self.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_ok());
        assert!(Rating::new(100).is_ok());
        assert!(Rating::new(101).is_err());
    }

    #[test]
    fn test_rating_from_f64() {
        assert_eq!(Rating::from_f64(54.4).unwrap().value(), 54);
        assert!(Rating::from_f64(-1.0).is_err());
        assert!(Rating::from_f64(f64::NAN).is_err());
    }

    #[test]
    fn test_rating_serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<Rating>("150").is_err());
        assert_eq!(serde_json::from_str::<Rating>("80").unwrap().value(), 80);
    }

    #[test]
    fn test_rating_bands() {
        assert_eq!(RatingBand::for_value(0), RatingBand::Critical);
        assert_eq!(RatingBand::for_value(19), RatingBand::Critical);
        assert_eq!(RatingBand::for_value(20), RatingBand::Low);
        assert_eq!(RatingBand::for_value(59), RatingBand::Medium);
        assert_eq!(RatingBand::for_value(79), RatingBand::Good);
        assert_eq!(RatingBand::for_value(80), RatingBand::Excellent);
        assert_eq!(RatingBand::Excellent.color(), "#b7eb8f");
    }

    #[test]
    fn test_missing_rating_counts_as_zero() {
        let record = MeterRecord::builder(1).build().unwrap();
        assert_eq!(record.effective_rating(), 0);
        assert_eq!(record.verification_label(), "Not checked");
    }

    #[test]
    fn test_builder_rejects_invalid_rating() {
        let result = MeterRecord::builder(1).rating(120).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_sets_client_fields() {
        let record = MeterRecord::builder(7)
            .name("Ivanov")
            .phone("+7 900 000-00-00")
            .email("ivanov@example.com")
            .build()
            .unwrap();
        assert_eq!(record.name(), Some("Ivanov"));
        assert_eq!(record.phone(), Some("+7 900 000-00-00"));
        assert_eq!(record.email(), Some("ivanov@example.com"));
    }
}
