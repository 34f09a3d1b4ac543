//! Visit plans
//!
//! A visit plan pairs a staff member with the selected metering points. Each
//! stop carries the parameters the mapping service needs to draw a route.

use super::tracker::SelectionSet;
use crate::domain::{Employee, FairwattError, MeterId, MeterRecord, Result};
use serde::{Deserialize, Serialize};

/// Warning shown when no point is selected
pub const NO_SELECTION_MESSAGE: &str = "Select at least one point for the route";

/// Warning shown when no staff member is assigned
pub const NO_STAFF_MESSAGE: &str = "Select a staff member for the visit";

/// One point of a field visit route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitStop {
    pub account_id: MeterId,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub building_type: String,
    pub rooms_count: u32,
    pub residents_count: u32,
    pub total_area: f64,
}

impl From<&MeterRecord> for VisitStop {
    fn from(record: &MeterRecord) -> Self {
        let details = &record.details;
        Self {
            account_id: record.id,
            latitude: record.geodata.map_or(0.0, |g| g.latitude),
            longitude: record.geodata.map_or(0.0, |g| g.longitude),
            address: record
                .address
                .clone()
                .unwrap_or_else(|| "Address not specified".to_string()),
            building_type: details
                .facility_type_name
                .clone()
                .unwrap_or_else(|| "Not specified".to_string()),
            rooms_count: details.rooms_count.unwrap_or(0),
            residents_count: details.residents_count.unwrap_or(0),
            total_area: details.square.unwrap_or(0.0),
        }
    }
}

/// Staff assignment plus an ordered set of metering points to visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitPlan {
    pub employee: Employee,
    pub stops: Vec<VisitStop>,
}

impl VisitPlan {
    /// Builds a plan from the selected records of `base`, in base-list order
    ///
    /// # Errors
    ///
    /// Returns a validation error when nothing is selected or no staff
    /// member is assigned. The selection is never modified here.
    pub fn build(
        base: &[MeterRecord],
        selection: &SelectionSet,
        employee: Option<&Employee>,
    ) -> Result<Self> {
        let stops: Vec<VisitStop> = base
            .iter()
            .filter(|r| selection.contains(r.id))
            .map(VisitStop::from)
            .collect();

        if stops.is_empty() {
            return Err(FairwattError::Validation(NO_SELECTION_MESSAGE.to_string()));
        }

        let employee = employee
            .ok_or_else(|| FairwattError::Validation(NO_STAFF_MESSAGE.to_string()))?;

        Ok(Self {
            employee: employee.clone(),
            stops,
        })
    }
}
