//! In-memory meter source for debug mode
//!
//! Serves a fixed set of metering points and keeps saved notes in memory.
//! No network access and no authentication.

use crate::adapters::source::{MeterPage, MeterSource, PageRequest};
use crate::domain::{
    ClientInfo, ConsumptionPeriod, Employee, ExternalData, FairwattError, GeoPoint, ListingFinding,
    MapFinding, MeterDetails, MeterId, MeterRecord, Rating, Result, TaxFinding,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

struct Seed {
    id: i64,
    name: &'static str,
    rating: u8,
    address: &'static str,
    square: f64,
    facility: &'static str,
    residents: u32,
    rooms: u32,
    lat: f64,
    lon: f64,
}

#[rustfmt::skip]
const SEEDS: [Seed; 8] = [
    Seed { id: 1, name: "Fomin Sergey Aleksandrovich", rating: 78, address: "Krasnodar, Pavlova st. 14", square: 74.0, facility: "Private house", residents: 3, rooms: 4, lat: 45.0355, lon: 38.9753 },
    Seed { id: 2, name: "Petrov Pavel Andreevich", rating: 54, address: "Krasnodar, Sevastopolskaya st. 3, apt. 14", square: 46.0, facility: "Apartment", residents: 2, rooms: 2, lat: 45.0402, lon: 38.9761 },
    Seed { id: 3, name: "Sidorova Anna Vladimirovna", rating: 84, address: "Novotitarovskaya, Lenina st. 25", square: 95.0, facility: "Private house", residents: 5, rooms: 5, lat: 45.2345, lon: 38.9876 },
    Seed { id: 4, name: "Kovalev Dmitry Igorevich", rating: 62, address: "Arkhipo-Osipovka, Tsentralnaya st. 7", square: 68.0, facility: "Private house", residents: 4, rooms: 3, lat: 44.3654, lon: 38.5367 },
    Seed { id: 5, name: "Ivanova Olga Petrovna", rating: 45, address: "Krasnodar, Krasnaya st. 56, apt. 12", square: 52.0, facility: "Apartment", residents: 2, rooms: 1, lat: 45.0347, lon: 38.9748 },
    Seed { id: 6, name: "Smirnov Aleksey Viktorovich", rating: 91, address: "Novotitarovskaya, Sadovaya st. 18", square: 110.0, facility: "Private house", residents: 6, rooms: 6, lat: 45.2367, lon: 38.9865 },
    Seed { id: 7, name: "Kuznetsova Maria Ivanovna", rating: 37, address: "Arkhipo-Osipovka, Morskaya st. 3", square: 48.0, facility: "Apartment", residents: 1, rooms: 1, lat: 44.3662, lon: 38.5378 },
    Seed { id: 8, name: "Popov Vladimir Sergeevich", rating: 73, address: "Krasnodar, Gagarina st. 89, apt. 34", square: 65.0, facility: "Apartment", residents: 3, rooms: 2, lat: 45.0361, lon: 38.9765 },
];

/// The fixed debug-mode meter list
pub fn fixture_meters() -> Vec<MeterRecord> {
    SEEDS
        .iter()
        .map(|s| MeterRecord {
            id: MeterId::new(s.id),
            facility_id: Some(100 + s.id),
            client: ClientInfo {
                name: Some(s.name.to_string()),
                phone: None,
                email: None,
            },
            address: Some(s.address.to_string()),
            region: Some("Krasnodar krai".to_string()),
            rating: Rating::new(s.rating).ok(),
            details: MeterDetails {
                square: Some(s.square),
                facility_type_name: Some(s.facility.to_string()),
                residents_count: Some(s.residents),
                rooms_count: Some(s.rooms),
                ..MeterDetails::default()
            },
            geodata: Some(GeoPoint {
                latitude: s.lat,
                longitude: s.lon,
            }),
            last_consumption: None,
            verified_status: None,
            note: None,
        })
        .collect()
}

const QUESTIONABLE_CLIENTS: u64 = 8;
const FACILITY_AVERAGE_KWH: f64 = 350.5;
const FLAT_AVERAGE_KWH: f64 = 250.3;
const MONTHLY_KWH: [f64; 12] = [
    320.0, 310.0, 290.0, 280.0, 300.0, 350.0, 400.0, 380.0, 360.0, 340.0, 330.0, 320.0,
];

/// Findings returned for every fixture meter
pub fn fixture_external_data() -> ExternalData {
    ExternalData {
        avito: vec![
            ListingFinding {
                url: "https://avito.ru/item1".to_string(),
                link: "Listing 1".to_string(),
                description: "Two-room apartment".to_string(),
            },
            ListingFinding {
                url: "https://avito.ru/item2".to_string(),
                link: "Listing 2".to_string(),
                description: "Garage for rent".to_string(),
            },
        ],
        fns: Some(TaxFinding {
            url: "https://fns.ru/tax-info".to_string(),
        }),
        maps: vec![MapFinding {
            url: "https://maps.yandex.ru/location1".to_string(),
            name: "Point 1".to_string(),
            purpose_name: "Residential premises".to_string(),
        }],
    }
}

/// The fixed debug-mode staff roster
pub fn fixture_staff() -> Vec<Employee> {
    vec![
        Employee::new(1, "Ivanov Aleksey Petrovich"),
        Employee::new(2, "Petrova Maria Sergeevna"),
        Employee::new(3, "Sidorov Dmitry Ivanovich"),
        Employee::new(4, "Kuznetsova Olga Vladimirovna"),
    ]
}

/// Fixture-backed [`MeterSource`]
pub struct FixtureSource {
    meters: Vec<MeterRecord>,
    notes: Mutex<HashMap<MeterId, String>>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::with_meters(fixture_meters())
    }

    /// Serves `meters` instead of the built-in list
    pub fn with_meters(meters: Vec<MeterRecord>) -> Self {
        Self {
            meters,
            notes: Mutex::new(HashMap::new()),
        }
    }

    fn with_note(&self, mut record: MeterRecord) -> MeterRecord {
        if let Ok(notes) = self.notes.lock() {
            if let Some(note) = notes.get(&record.id) {
                record.note = Some(note.clone());
            }
        }
        record
    }
}

impl Default for FixtureSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MeterSource for FixtureSource {
    async fn fetch_page(&self, request: PageRequest) -> Result<MeterPage> {
        let records: Vec<MeterRecord> = self
            .meters
            .iter()
            .skip(request.offset())
            .take(request.per_page as usize)
            .cloned()
            .map(|r| self.with_note(r))
            .collect();

        crate::log_fetch_complete!(request.page, records.len(), Some(self.meters.len()));

        Ok(MeterPage {
            records,
            total: Some(self.meters.len()),
        })
    }

    async fn fetch_meter(&self, id: MeterId) -> Result<MeterRecord> {
        self.meters
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .map(|r| self.with_note(r))
            .ok_or_else(|| FairwattError::NotFound(format!("Meter {id} does not exist")))
    }

    async fn save_note(&self, id: MeterId, note: &str) -> Result<()> {
        if !self.meters.iter().any(|r| r.id == id) {
            return Err(FairwattError::NotFound(format!("Meter {id} does not exist")));
        }
        let mut notes = self
            .notes
            .lock()
            .map_err(|_| FairwattError::Other("Fixture note store is poisoned".to_string()))?;
        notes.insert(id, note.to_string());
        tracing::debug!(meter_id = %id, "Note stored in fixture");
        Ok(())
    }

    async fn questionable_clients(&self) -> Result<u64> {
        Ok(QUESTIONABLE_CLIENTS)
    }

    async fn average_facility_consumption(&self, _period: ConsumptionPeriod) -> Result<f64> {
        Ok(FACILITY_AVERAGE_KWH)
    }

    async fn average_flat_consumption(
        &self,
        facility_id: i64,
        _period: ConsumptionPeriod,
    ) -> Result<f64> {
        if self.meters.iter().any(|r| r.facility_id == Some(facility_id)) {
            Ok(FLAT_AVERAGE_KWH)
        } else {
            Err(FairwattError::NotFound(format!(
                "Facility {facility_id} does not exist"
            )))
        }
    }

    async fn monthly_consumption(&self) -> Result<Vec<f64>> {
        Ok(MONTHLY_KWH.to_vec())
    }

    async fn external_data(&self, id: MeterId) -> Result<ExternalData> {
        if !self.meters.iter().any(|r| r.id == id) {
            return Err(FairwattError::NotFound(format!("Meter {id} does not exist")));
        }
        Ok(fixture_external_data())
    }

    fn describe(&self) -> String {
        format!("debug fixture ({} meters)", self.meters.len())
    }
}
