//! External system integrations for Fairwatt.
//!
//! - [`api`] - the remote metering REST service
//! - [`fixture`] - the fixed in-memory data set used in debug mode
//! - [`source`] - the [`MeterSource`] trait both of them implement
//!
//! The record store only ever talks to a `dyn MeterSource`, so tests and
//! debug runs swap the backend without touching the core.

pub mod api;
pub mod fixture;
pub mod source;

pub use api::ApiClient;
pub use fixture::{fixture_external_data, fixture_meters, fixture_staff, FixtureSource};
pub use source::{MeterPage, MeterSource, PageRequest, PAGE_SIZE_OPTIONS};
