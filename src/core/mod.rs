//! Core business logic for Fairwatt.
//!
//! # Modules
//!
//! - [`filter`] - Filter/sort engine deriving the visible list
//! - [`export`] - CSV/XLSX serialization of the visible list
//! - [`selection`] - Selection tracker and visit plans
//! - [`store`] - Record store owning the current page
//! - [`notes`] - Free-text note editing
//! - [`consumption`] - Consumption analytics report
//!
//! # Workflow
//!
//! 1. **Load**: the record store fetches a page through its environment's source
//! 2. **Narrow**: filter criteria and sort produce the visible list
//! 3. **Act**: export the visible list, or select records and build a visit plan
//!
//! # Example
//!
//! ```rust,no_run
//! use fairwatt::adapters::PageRequest;
//! use fairwatt::core::store::{Environment, RecordStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = RecordStore::new(Environment::debug());
//! store.load_page(PageRequest::new(1, 10)).await;
//!
//! for meter in store.visible() {
//!     println!("{} {}", meter.id, meter.name().unwrap_or("-"));
//! }
//! # Ok(())
//! # }
//! ```

pub mod consumption;
pub mod export;
pub mod filter;
pub mod notes;
pub mod selection;
pub mod store;
