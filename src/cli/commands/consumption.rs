//! Consumption command implementation

use super::common::{exit_code_for, load_or_report};
use crate::core::consumption::{load_report, ConsumptionQuery, ConsumptionReport};
use crate::core::store::Environment;
use crate::domain::{ConsumptionPeriod, MeterId, RatingBand};
use clap::Args;

/// Arguments for the consumption command
#[derive(Args, Debug)]
pub struct ConsumptionArgs {
    /// Averaging window of the facility averages (daily, monthly)
    #[arg(long, default_value = "monthly")]
    pub period: ConsumptionPeriod,

    /// Also compare the flats of this facility
    #[arg(long)]
    pub facility: Option<i64>,

    /// Show the client header of this meter
    #[arg(long)]
    pub meter: Option<MeterId>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl ConsumptionArgs {
    /// Execute the consumption command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_or_report(config_path) {
            Ok(config) => config,
            Err(code) => return Ok(code),
        };
        let env = match Environment::from_config(&config) {
            Ok(env) => env,
            Err(e) => {
                println!("❌ {}", e.user_message());
                return Ok(exit_code_for(&e));
            }
        };

        let query = ConsumptionQuery {
            period: self.period,
            facility_id: self.facility,
            meter_id: self.meter,
        };
        let report = match load_report(env.source.as_ref(), query).await {
            Ok(report) => report,
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to load consumption report");
                println!("❌ {}", e.user_message());
                return Ok(exit_code_for(&e));
            }
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report(&report);
        }
        Ok(0)
    }
}

fn print_report(report: &ConsumptionReport) {
    match &report.client {
        Some(client) => println!(
            "Consumption for meter {}: {} ({}), rating {} ({})",
            client.meter_id,
            client.name.as_deref().unwrap_or("-"),
            client.address.as_deref().unwrap_or("-"),
            client.rating,
            RatingBand::for_value(client.rating).label()
        ),
        None => {
            println!("Consumption (all facilities)");
            println!("  Questionable clients: {}", report.questionable_clients);
        }
    }

    println!(
        "  Average per facility ({}): {:.1} kWh",
        report.period.label(),
        report.facility_average
    );
    if let Some(flat) = report.flat_average {
        println!(
            "  Average per flat ({}):     {:.1} kWh ({:.0}% of facility average)",
            report.period.label(),
            flat,
            report.flat_ratio().unwrap_or(0.0) * 100.0
        );
    }

    println!();
    println!("  {:<10} {:>10}  {}", "Month", "kWh", "Level");
    for month in &report.months {
        println!(
            "  {:<10} {:>10.1}  {}{}",
            month.name(),
            month.kwh,
            month.level.color(),
            if month.winter { " (winter)" } else { "" }
        );
    }

    if let Some(peak) = report.peak() {
        println!();
        println!("  Peak: {} at {:.1} kWh", peak.name(), peak.kwh);
    }
    let flagged = report.flagged();
    if !flagged.is_empty() {
        let names: Vec<&str> = flagged.iter().map(|m| m.name()).collect();
        println!("  ⚠️  Above normal: {}", names.join(", "));
    }
}
