// Fairwatt - Meter List Console for Field Verification
// Copyright (c) 2025 Fairwatt Contributors
// Licensed under the MIT License

//! # Fairwatt - Meter List Console
//!
//! Fairwatt is an operator console for electricity-metering field work. It
//! pulls paginated meter records from a metering API (or a built-in fixture
//! in debug mode), narrows them down with filters and sorting, exports what
//! is visible to spreadsheets and turns a selection into a field visit plan.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (filter, export, selection, record store, notes)
//! - [`adapters`] - Meter sources (metering API client, debug fixture)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fairwatt::adapters::PageRequest;
//! use fairwatt::config::load_config;
//! use fairwatt::core::export::ExportFormat;
//! use fairwatt::core::store::{Environment, RecordStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("fairwatt.toml")?;
//!     let mut store = RecordStore::new(Environment::from_config(&config)?);
//!
//!     store.load_page(PageRequest::new(1, config.listing.page_size)).await;
//!
//!     let artifact = store.export(
//!         ExportFormat::Xlsx,
//!         config.export.profile,
//!         &config.export.naming(),
//!         chrono::Utc::now(),
//!     )?;
//!     artifact.write_to(&config.export.output_dir)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`], carrying a
//! [`domain::FairwattError`]. Its `user_message()` is the text shown to the
//! operator.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
