//! Selection tracking and visit planning

pub mod plan;
pub mod tracker;

pub use plan::{VisitPlan, VisitStop, NO_SELECTION_MESSAGE, NO_STAFF_MESSAGE};
pub use tracker::SelectionSet;
