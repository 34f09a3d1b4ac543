//! List command implementation
//!
//! Fetches one page, applies the filter/sort flags and prints the visible
//! meters.

use super::common::{load_or_report, open_store, FilterArgs, PageArgs};
use crate::domain::{MeterRecord, RatingBand};
use clap::Args;

/// Arguments for the list command
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    #[command(flatten)]
    pub page: PageArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Print the visible records as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    /// Execute the list command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_or_report(config_path) {
            Ok(config) => config,
            Err(code) => return Ok(code),
        };
        let mut store = match open_store(&config, &self.page).await {
            Ok(store) => store,
            Err(code) => return Ok(code),
        };

        self.filters.apply_to(&mut store);
        let visible = store.visible();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&visible)?);
            return Ok(0);
        }

        println!(
            "{:>6}  {:<32} {:>6}  {:<10} {:<44} {}",
            "ID", "Client", "Rating", "Band", "Address", "Verified"
        );
        for meter in &visible {
            println!("{}", format_row(meter));
        }
        println!();

        let bounds = store.rating_bounds();
        println!(
            "Showing {} of {} on page {} (total {}), rating range {}..{}, sorted by {}",
            visible.len(),
            store.records().len(),
            store.page().page,
            store
                .total()
                .map_or_else(|| "unknown".to_string(), |t| t.to_string()),
            bounds.min,
            bounds.max,
            store.sort()
        );

        Ok(0)
    }
}

fn format_row(meter: &MeterRecord) -> String {
    let band = RatingBand::for_value(meter.effective_rating());
    format!(
        "{:>6}  {:<32} {:>6}  {:<10} {:<44} {}",
        meter.id.get(),
        truncate(meter.name().unwrap_or("-"), 32),
        meter
            .rating
            .map_or_else(|| "-".to_string(), |r| r.value().to_string()),
        band.label(),
        truncate(meter.address.as_deref().unwrap_or("-"), 44),
        meter.verification_label()
    )
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("Krasnodar", 20), "Krasnodar");
        assert_eq!(truncate("Краснодар, ул. Красная", 5), "Крас…");
    }

    #[test]
    fn test_format_row_without_rating() {
        let meter = MeterRecord::builder(4).name("Kovalev").build().unwrap();
        let row = format_row(&meter);
        assert!(row.contains("Kovalev"));
        assert!(row.contains("Not checked"));
    }
}
