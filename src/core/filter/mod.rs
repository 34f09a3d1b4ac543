//! Filter/sort engine for the meter list
//!
//! - [`criteria`] - predicates ([`FilterCriteria`], [`RangeFilter`], [`EquipmentFilter`])
//! - [`sort`] - ordering ([`SortSpec`], [`SortKey`], [`SortDirection`])
//! - [`engine`] - derives the visible list ([`apply`])

pub mod criteria;
pub mod engine;
pub mod sort;

pub use criteria::{text_matches, EquipmentFilter, FilterCriteria, RangeFilter, RatingBounds};
pub use engine::{apply, filter_records, sort_records};
pub use sort::{collate, SortDirection, SortKey, SortSpec};
