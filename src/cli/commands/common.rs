//! Arguments and helpers shared by the page-based commands

use crate::adapters::{PageRequest, PAGE_SIZE_OPTIONS};
use crate::config::{load_config, FairwattConfig};
use crate::core::filter::{EquipmentFilter, FilterCriteria, RangeFilter, SortSpec};
use crate::core::store::{Environment, FetchOutcome, RecordStore};
use crate::domain::{ApiError, FairwattError};
use clap::Args;

/// Page selection
#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Records per page (10, 25, 50 or 100); defaults to listing.page_size
    #[arg(long)]
    pub per_page: Option<u32>,
}

impl PageArgs {
    /// Page request honouring the configured page size
    pub fn request(&self, config: &FairwattConfig) -> Result<PageRequest, String> {
        let per_page = self.per_page.unwrap_or(config.listing.page_size);
        if !PAGE_SIZE_OPTIONS.contains(&per_page) {
            return Err(format!(
                "Invalid page size {per_page}. Must be one of: {PAGE_SIZE_OPTIONS:?}"
            ));
        }
        if self.page == 0 {
            return Err("Page numbers start at 1".to_string());
        }
        Ok(PageRequest::new(self.page, per_page))
    }
}

/// Filter and sort flags
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Identifier substring
    #[arg(long)]
    pub id: Option<String>,

    /// Client name substring (case-insensitive)
    #[arg(long)]
    pub name: Option<String>,

    /// Address substring (case-insensitive)
    #[arg(long)]
    pub address: Option<String>,

    /// Phone substring
    #[arg(long)]
    pub phone: Option<String>,

    /// Region substring (case-insensitive)
    #[arg(long)]
    pub region: Option<String>,

    /// Lowest rating shown
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub rating_min: Option<u8>,

    /// Highest rating shown
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub rating_max: Option<u8>,

    /// Lowest last consumption, kWh
    #[arg(long)]
    pub consumption_min: Option<f64>,

    /// Highest last consumption, kWh
    #[arg(long)]
    pub consumption_max: Option<f64>,

    /// Smallest living area, m²
    #[arg(long)]
    pub area_min: Option<f64>,

    /// Largest living area, m²
    #[arg(long)]
    pub area_max: Option<f64>,

    /// Electric equipment (all, heating, stove, none)
    #[arg(long, default_value_t = EquipmentFilter::All)]
    pub equipment: EquipmentFilter,

    /// Sort as `key[:asc|desc]`; keys: id, name, address, region, rating, last_consumption, tariff
    #[arg(long, default_value_t = SortSpec::default())]
    pub sort: SortSpec,
}

impl Default for FilterArgs {
    fn default() -> Self {
        Self {
            id: None,
            name: None,
            address: None,
            phone: None,
            region: None,
            rating_min: None,
            rating_max: None,
            consumption_min: None,
            consumption_max: None,
            area_min: None,
            area_max: None,
            equipment: EquipmentFilter::All,
            sort: SortSpec::default(),
        }
    }
}

fn optional_range(low: Option<f64>, high: Option<f64>) -> Option<RangeFilter<f64>> {
    match (low, high) {
        (None, None) => None,
        (low, high) => Some(RangeFilter::new(
            low.unwrap_or(f64::MIN),
            high.unwrap_or(f64::MAX),
        )),
    }
}

impl FilterArgs {
    /// Criteria starting from `base` with every given flag applied
    pub fn criteria(&self, base: &FilterCriteria) -> FilterCriteria {
        let mut criteria = base.clone();
        if let Some(id) = &self.id {
            criteria.id = id.clone();
        }
        if let Some(name) = &self.name {
            criteria.name = name.clone();
        }
        if let Some(address) = &self.address {
            criteria.address = address.clone();
        }
        if let Some(phone) = &self.phone {
            criteria.phone = phone.clone();
        }
        if let Some(region) = &self.region {
            criteria.region = region.clone();
        }
        if let Some(low) = self.rating_min {
            criteria.rating.low = low;
        }
        if let Some(high) = self.rating_max {
            criteria.rating.high = high;
        }
        criteria.consumption = optional_range(self.consumption_min, self.consumption_max);
        criteria.area = optional_range(self.area_min, self.area_max);
        criteria.equipment = self.equipment;
        criteria
    }

    /// Installs the criteria and sort on `store`
    pub fn apply_to(&self, store: &mut RecordStore) {
        let criteria = self.criteria(store.criteria());
        store.set_criteria(criteria);
        store.set_sort(self.sort);
    }
}

/// Exit code for a library error
///
/// 2 for configuration and validation problems (local or server-side),
/// 3 for remote failures, 5 for everything else.
pub fn exit_code_for(error: &FairwattError) -> i32 {
    match error {
        FairwattError::Configuration(_) | FairwattError::Validation(_) => 2,
        FairwattError::Api(ApiError::UnprocessableEntity { .. }) => 2,
        FairwattError::Api(_) | FairwattError::NotFound(_) => 3,
        _ => 5,
    }
}

/// Loads the configuration, printing the failure
pub fn load_or_report(config_path: &str) -> Result<FairwattConfig, i32> {
    load_config(config_path).map_err(|e| {
        println!("❌ Failed to load configuration: {e}");
        2
    })
}

/// Builds the environment and loads one page into a fresh store
pub async fn open_store(config: &FairwattConfig, page: &PageArgs) -> Result<RecordStore, i32> {
    let request = page.request(config).map_err(|e| {
        println!("❌ {e}");
        2
    })?;

    let env = Environment::from_config(config).map_err(|e| {
        println!("❌ {}", e.user_message());
        exit_code_for(&e)
    })?;

    let mut store = RecordStore::new(env);
    match store.load_page(request).await {
        FetchOutcome::Failed { message } => {
            println!("❌ Failed to fetch meters: {message}");
            Err(3)
        }
        _ => Ok(store),
    }
}
