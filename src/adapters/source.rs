//! Meter source trait definition
//!
//! This module defines the `MeterSource` trait that abstracts where meter
//! records come from: the remote metering API in production, or a fixed
//! in-memory fixture in debug mode.

use crate::domain::{ConsumptionPeriod, ExternalData, MeterId, MeterRecord, Result};
use async_trait::async_trait;

/// Page sizes offered by the meter grid
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [10, 25, 50, 100];

/// Page number (1-based) and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Number of records before this page; page 0 is treated as page 1
    pub fn offset(&self) -> usize {
        (self.page as usize).saturating_sub(1) * self.per_page as usize
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, PAGE_SIZE_OPTIONS[0])
    }
}

/// One page of records as returned by a source
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeterPage {
    pub records: Vec<MeterRecord>,
    /// Total number of records across all pages, when the source reports it
    pub total: Option<usize>,
}

/// Trait for meter record providers
///
/// # Example
///
/// ```no_run
/// use fairwatt::adapters::{FixtureSource, MeterSource, PageRequest};
///
/// # async fn example() -> fairwatt::domain::Result<()> {
/// let source = FixtureSource::new();
/// let page = source.fetch_page(PageRequest::new(1, 10)).await?;
/// println!("Loaded {} meters", page.records.len());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait MeterSource: Send + Sync {
    /// Fetches one page of meter records
    async fn fetch_page(&self, request: PageRequest) -> Result<MeterPage>;

    /// Fetches a single meter by identifier
    async fn fetch_meter(&self, id: MeterId) -> Result<MeterRecord>;

    /// Persists a free-text note for a meter
    async fn save_note(&self, id: MeterId, note: &str) -> Result<()>;

    /// Number of clients the service currently flags as questionable
    async fn questionable_clients(&self) -> Result<u64>;

    /// Average consumption across all facilities over `period`, kWh
    async fn average_facility_consumption(&self, period: ConsumptionPeriod) -> Result<f64>;

    /// Average consumption of the flats of one facility over `period`, kWh
    async fn average_flat_consumption(
        &self,
        facility_id: i64,
        period: ConsumptionPeriod,
    ) -> Result<f64>;

    /// Average consumption per calendar month, January first, kWh
    async fn monthly_consumption(&self) -> Result<Vec<f64>>;

    /// Collects third-party data about a meter's client and address
    async fn external_data(&self, id: MeterId) -> Result<ExternalData>;

    /// Human-readable description of the source, for logs
    fn describe(&self) -> String;
}
