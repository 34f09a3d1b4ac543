//! Consumption report
//!
//! Gathers the service-wide analytics, and optionally a facility's flat
//! average and one meter's client header, into a single report. The
//! requests run concurrently; any failure among the required figures fails
//! the whole report. A missing client header only costs the header.

use crate::adapters::MeterSource;
use crate::domain::{
    month_points, ConsumptionLevel, ConsumptionPeriod, MeterId, MonthPoint, Result,
};
use serde::Serialize;

/// What the report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConsumptionQuery {
    pub period: ConsumptionPeriod,
    /// Adds the flat average of this facility
    pub facility_id: Option<i64>,
    /// Adds the client header of this meter
    pub meter_id: Option<MeterId>,
}

/// Client shown above a single meter's chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientSummary {
    pub meter_id: MeterId,
    pub name: Option<String>,
    pub address: Option<String>,
    pub rating: u8,
}

/// Everything the consumption view displays
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumptionReport {
    pub period: ConsumptionPeriod,
    pub questionable_clients: u64,
    pub facility_average: f64,
    pub flat_average: Option<f64>,
    pub months: Vec<MonthPoint>,
    pub client: Option<ClientSummary>,
}

impl ConsumptionReport {
    /// Month with the highest average
    pub fn peak(&self) -> Option<&MonthPoint> {
        self.months.iter().max_by(|a, b| a.kwh.total_cmp(&b.kwh))
    }

    /// Months classified above normal
    pub fn flagged(&self) -> Vec<&MonthPoint> {
        self.months
            .iter()
            .filter(|m| m.level != ConsumptionLevel::Normal)
            .collect()
    }

    /// Flat average relative to the facility average
    pub fn flat_ratio(&self) -> Option<f64> {
        match self.flat_average {
            Some(flat) if self.facility_average > 0.0 => Some(flat / self.facility_average),
            _ => None,
        }
    }
}

/// Loads the report described by `query` from `source`
///
/// # Errors
///
/// Returns the first failure among the questionable-client count, the
/// facility average, the flat average (when asked for) and the monthly
/// series.
pub async fn load_report(
    source: &dyn MeterSource,
    query: ConsumptionQuery,
) -> Result<ConsumptionReport> {
    let flat = async {
        match query.facility_id {
            Some(facility_id) => source
                .average_flat_consumption(facility_id, query.period)
                .await
                .map(Some),
            None => Ok(None),
        }
    };
    let client = async {
        let id = query.meter_id?;
        match source.fetch_meter(id).await {
            Ok(meter) => Some(ClientSummary {
                meter_id: meter.id,
                name: meter.name().map(str::to_string),
                address: meter.address.clone(),
                rating: meter.effective_rating(),
            }),
            Err(e) => {
                tracing::warn!(meter_id = %id, error = %e, "Client header unavailable");
                None
            }
        }
    };

    let (figures, client) = tokio::join!(
        async {
            tokio::try_join!(
                source.questionable_clients(),
                source.average_facility_consumption(query.period),
                flat,
                source.monthly_consumption(),
            )
        },
        client
    );
    let (questionable_clients, facility_average, flat_average, series) = figures?;

    let months = month_points(&series);
    tracing::info!(
        period = %query.period,
        months = months.len(),
        facility = ?query.facility_id,
        meter_id = ?query.meter_id,
        "Consumption report loaded"
    );

    Ok(ConsumptionReport {
        period: query.period,
        questionable_clients,
        facility_average,
        flat_average,
        months,
        client,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FixtureSource;

    #[tokio::test]
    async fn test_service_wide_report() {
        let source = FixtureSource::new();
        let report = load_report(&source, ConsumptionQuery::default()).await.unwrap();

        assert_eq!(report.questionable_clients, 8);
        assert_eq!(report.months.len(), 12);
        assert!(report.flat_average.is_none());
        assert!(report.client.is_none());
        assert_eq!(report.peak().map(|m| m.month), Some(7));
        assert!(report.flagged().is_empty());
    }

    #[tokio::test]
    async fn test_report_for_meter_and_facility() {
        let source = FixtureSource::new();
        let query = ConsumptionQuery {
            period: ConsumptionPeriod::Daily,
            facility_id: Some(107),
            meter_id: Some(MeterId::new(7)),
        };
        let report = load_report(&source, query).await.unwrap();

        assert_eq!(report.flat_average, Some(250.3));
        let client = report.client.as_ref().unwrap();
        assert_eq!(client.rating, 37);
        assert!(report.flat_ratio().unwrap() < 1.0);
    }

    #[tokio::test]
    async fn test_unknown_meter_only_drops_header() {
        let source = FixtureSource::new();
        let query = ConsumptionQuery {
            meter_id: Some(MeterId::new(404)),
            ..ConsumptionQuery::default()
        };
        let report = load_report(&source, query).await.unwrap();
        assert!(report.client.is_none());
    }

    #[tokio::test]
    async fn test_unknown_facility_fails_report() {
        let source = FixtureSource::new();
        let query = ConsumptionQuery {
            facility_id: Some(999),
            ..ConsumptionQuery::default()
        };
        assert!(load_report(&source, query).await.is_err());
    }
}
