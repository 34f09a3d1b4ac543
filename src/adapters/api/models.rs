//! Metering API wire models
//!
//! The service has shipped two record shapes over time: a flat one with
//! top-level `name` and camelCase extras, and a nested one with a `client`
//! object and `meter_details`. Both deserialize into [`MeterDto`] and are
//! normalized into a [`MeterRecord`].

use crate::domain::{ApiError, ClientInfo, GeoPoint, MeterDetails, MeterId, MeterRecord, Rating};
use serde::{Deserialize, Serialize};

/// Client object of the nested record shape
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientDto {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Dwelling details in either naming convention
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeterDetailsDto {
    pub square: Option<f64>,
    #[serde(alias = "facilityName")]
    pub facility_type_name: Option<String>,
    #[serde(alias = "resident_count", alias = "residentsCount")]
    pub residents_count: Option<u32>,
    #[serde(alias = "room_count", alias = "roomsCount")]
    pub rooms_count: Option<u32>,
    pub tariff_type_name: Option<String>,
    pub tariff_price: Option<f64>,
    #[serde(alias = "hasElectricHeating")]
    pub has_electric_heating: Option<bool>,
    #[serde(alias = "hasElectricStove")]
    pub has_electric_stove: Option<bool>,
    #[serde(alias = "settlementName")]
    pub settlement_name: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GeoDto {
    pub latitude: f64,
    pub longitude: f64,
}

/// Meter as returned by the API
///
/// Older payloads name the identifier `meter_id`; some carry both keys.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeterDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub meter_id: Option<i64>,
    pub facility_id: Option<i64>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub client: Option<ClientDto>,
    pub rating: Option<f64>,
    pub address: Option<String>,
    pub region: Option<String>,
    #[serde(alias = "meterDetails")]
    pub meter_details: Option<MeterDetailsDto>,
    pub geodata: Option<GeoDto>,
    #[serde(alias = "lastConsumption")]
    pub last_consumption: Option<f64>,
    #[serde(alias = "tariffName")]
    pub tariff_name: Option<String>,
    #[serde(alias = "tariffPrice")]
    pub tariff_price: Option<f64>,
    pub verified_status: Option<String>,
    pub note: Option<String>,
}

impl MeterDto {
    /// `id`, falling back to `meter_id`
    pub fn identifier(&self) -> Option<i64> {
        self.id.or(self.meter_id)
    }

    /// Normalizes the wire record
    ///
    /// Ratings outside 0..=100 are logged and dropped. A record carrying
    /// neither identifier key is rejected.
    pub fn into_record(self) -> Result<MeterRecord, ApiError> {
        let id = self.identifier().ok_or_else(|| {
            ApiError::InvalidResponse("Meter record without id or meter_id".to_string())
        })?;
        let client = self.client.unwrap_or_default();
        let details = self.meter_details.unwrap_or_default();

        let rating = self.rating.and_then(|raw| match Rating::from_f64(raw) {
            Ok(rating) => Some(rating),
            Err(e) => {
                tracing::warn!(meter_id = id, error = %e, "Ignoring invalid rating");
                None
            }
        });

        Ok(MeterRecord {
            id: MeterId::new(id),
            facility_id: self.facility_id,
            client: ClientInfo {
                name: self.name.or(client.name),
                phone: self.phone.or(client.phone),
                email: self.email.or(client.email),
            },
            address: self.address,
            region: self.region,
            rating,
            details: MeterDetails {
                square: details.square,
                facility_type_name: details.facility_type_name,
                residents_count: details.residents_count,
                rooms_count: details.rooms_count,
                tariff_type_name: details.tariff_type_name.or(self.tariff_name),
                tariff_price: details.tariff_price.or(self.tariff_price),
                has_electric_heating: details.has_electric_heating,
                has_electric_stove: details.has_electric_stove,
                settlement_name: details.settlement_name,
            },
            geodata: self.geodata.map(|g| GeoPoint {
                latitude: g.latitude,
                longitude: g.longitude,
            }),
            last_consumption: self.last_consumption,
            verified_status: self.verified_status,
            note: self.note,
        })
    }
}

/// Page body: either a bare array or an envelope with a total
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PageBody {
    Items(Vec<MeterDto>),
    Envelope {
        items: Vec<MeterDto>,
        total: Option<usize>,
    },
}

/// Request body of the note endpoint
#[derive(Debug, Clone, Serialize)]
pub struct NoteRequest<'a> {
    pub note: &'a str,
}

/// One structured validation error entry
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationEntry {
    pub msg: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Entries(Vec<ValidationEntry>),
    Text(String),
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    detail: Option<ErrorDetail>,
    message: Option<String>,
}

/// Extracts the operator-facing message from an error response body
///
/// Uses the first structured entry when present, then a plain `detail`
/// string, then `message`, then the raw body.
pub fn error_message(body: &str) -> String {
    let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();
    let message = parsed.and_then(|b| match b.detail {
        Some(ErrorDetail::Entries(entries)) => entries.into_iter().next().map(|e| e.msg),
        Some(ErrorDetail::Text(text)) => Some(text),
        None => b.message,
    });

    match message {
        Some(msg) if !msg.trim().is_empty() => msg,
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => "Request rejected by server".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_shape() {
        let dto: MeterDto = serde_json::from_value(json!({
            "meter_id": 1,
            "facility_id": 101,
            "client": {"name": "Fomin", "phone": "+7 900", "email": "f@example.com"},
            "rating": 78,
            "address": "Krasnodar",
            "meter_details": {"square": 74, "facility_type_name": "Private house",
                              "resident_count": 3, "room_count": 4,
                              "tariff_type_name": "Day/Night", "tariff_price": 5.2},
            "geodata": {"latitude": 45.0355, "longitude": 38.9753},
            "verified_status": null
        }))
        .unwrap();

        let record = dto.into_record().unwrap();
        assert_eq!(record.id.get(), 1);
        assert_eq!(record.name(), Some("Fomin"));
        assert_eq!(record.email(), Some("f@example.com"));
        assert_eq!(record.effective_rating(), 78);
        assert_eq!(record.details.residents_count, Some(3));
        assert_eq!(record.details.rooms_count, Some(4));
        assert_eq!(record.details.tariff_price, Some(5.2));
        assert!(record.verified_status.is_none());
    }

    #[test]
    fn test_flat_shape() {
        let dto: MeterDto = serde_json::from_value(json!({
            "id": 2,
            "name": "Petrov",
            "rating": 54,
            "lastConsumption": 312.5,
            "tariffName": "Single",
            "region": "Krasnodar krai",
            "meterDetails": {"hasElectricHeating": true, "facilityName": "Apartment",
                             "settlementName": "Krasnodar"}
        }))
        .unwrap();

        let record = dto.into_record().unwrap();
        assert_eq!(record.name(), Some("Petrov"));
        assert_eq!(record.last_consumption, Some(312.5));
        assert_eq!(record.details.tariff_type_name.as_deref(), Some("Single"));
        assert!(record.has_electric_heating());
        assert_eq!(record.details.settlement_name.as_deref(), Some("Krasnodar"));
    }

    #[test]
    fn test_invalid_rating_dropped() {
        let dto: MeterDto = serde_json::from_value(json!({"id": 3, "rating": 140})).unwrap();
        assert!(dto.into_record().unwrap().rating.is_none());
    }

    #[test]
    fn test_both_identifier_keys() {
        let dto: MeterDto =
            serde_json::from_value(json!({"id": 9, "meter_id": 9, "name": "Fomin"})).unwrap();
        assert_eq!(dto.into_record().unwrap().id.get(), 9);

        let dto: MeterDto = serde_json::from_value(json!({"meter_id": 12})).unwrap();
        assert_eq!(dto.identifier(), Some(12));

        let page: PageBody =
            serde_json::from_str(r#"[{"id": 1, "meter_id": 1}, {"id": 2, "meter_id": 2}]"#)
                .unwrap();
        assert!(matches!(page, PageBody::Items(ref items) if items.len() == 2));
    }

    #[test]
    fn test_record_without_identifier_rejected() {
        let dto: MeterDto = serde_json::from_value(json!({"name": "Nobody"})).unwrap();
        assert!(matches!(
            dto.into_record(),
            Err(ApiError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_page_body_shapes() {
        let bare: PageBody = serde_json::from_str(r#"[{"id": 1}]"#).unwrap();
        assert!(matches!(bare, PageBody::Items(ref items) if items.len() == 1));

        let wrapped: PageBody =
            serde_json::from_str(r#"{"items": [{"id": 1}, {"id": 2}], "total": 40}"#).unwrap();
        assert!(matches!(wrapped, PageBody::Envelope { total: Some(40), .. }));
    }

    #[test]
    fn test_error_message_first_entry() {
        let body = r#"{"detail": [
            {"loc": ["body", "note"], "msg": "Note is too long", "type": "value_error"},
            {"loc": ["body"], "msg": "second", "type": "x"}
        ]}"#;
        assert_eq!(error_message(body), "Note is too long");
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(error_message(r#"{"detail": "Bad note"}"#), "Bad note");
        assert_eq!(error_message(r#"{"message": "Nope"}"#), "Nope");
        assert_eq!(error_message("plain text"), "plain text");
        assert_eq!(error_message(""), "Request rejected by server");
    }
}
