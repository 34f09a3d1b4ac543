//! Configuration management for Fairwatt.
//!
//! TOML configuration with `${VAR_NAME}` substitution, `FAIRWATT_*`
//! environment overrides, defaults for every setting and validation on load.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fairwatt::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("fairwatt.toml")?;
//!
//! println!("Mode: {}", config.mode);
//! println!("API: {}", config.api.base_url);
//! println!("Page size: {}", config.listing.page_size);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! mode = "production"
//!
//! [application]
//! log_level = "info"
//!
//! [api]
//! base_url = "https://meters.example.com/"
//! access_token = "${FAIRWATT_ACCESS_TOKEN}"
//! timeout_seconds = 30
//!
//! [listing]
//! page_size = 25
//!
//! [export]
//! file_prefix = "meters"
//! output_dir = "./exports"
//! format = "xlsx"
//! profile = "standard"
//!
//! [[staff]]
//! id = 1
//! name = "Ivanov Aleksey Petrovich"
//!
//! [logging]
//! local_enabled = true
//! local_path = "./logs"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApiConfig, ApplicationConfig, ExportConfig, FairwattConfig, ListingConfig, LoggingConfig,
    RunMode, StaffConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
