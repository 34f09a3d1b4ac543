//! Remote metering API adapter

pub mod client;
pub mod models;

pub use client::ApiClient;
pub use models::{MeterDto, PageBody};
