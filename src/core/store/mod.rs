//! Record store and runtime environment

pub mod environment;
pub mod record_store;

pub use environment::Environment;
pub use record_store::{FetchOutcome, FetchTicket, LoadStatus, RecordStore};
