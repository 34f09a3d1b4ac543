//! Domain models and types for Fairwatt.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`MeterId`], [`EmployeeId`])
//! - **Domain models** ([`MeterRecord`], [`MeterDetails`], [`Employee`])
//! - **Analytics** ([`MonthPoint`], [`ExternalData`])
//! - **Error types** ([`FairwattError`], [`ApiError`])
//! - **Result type alias** ([`Result`])
//!
//! # Builder Pattern
//!
//! ```rust
//! use fairwatt::domain::MeterRecord;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let record = MeterRecord::builder(1)
//!     .name("Ivanov")
//!     .address("Krasnodar, Pavlova st. 14")
//!     .rating(78)
//!     .build()?;
//! assert_eq!(record.effective_rating(), 78);
//! # Ok(())
//! # }
//! ```

pub mod consumption;
pub mod errors;
pub mod ids;
pub mod meter;
pub mod result;
pub mod staff;

// Re-export commonly used types for convenience
pub use consumption::{
    month_points, ConsumptionLevel, ConsumptionPeriod, ExternalData, ListingFinding, MapFinding,
    MonthPoint, TaxFinding,
};
pub use errors::{ApiError, FairwattError};
pub use ids::{EmployeeId, MeterId};
pub use meter::{
    ClientInfo, GeoPoint, MeterDetails, MeterRecord, MeterRecordBuilder, Rating, RatingBand,
};
pub use result::Result;
pub use staff::{find_employee, Employee};
