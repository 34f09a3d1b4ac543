//! Show command implementation

use super::common::{exit_code_for, load_or_report};
use crate::core::store::Environment;
use crate::domain::{ExternalData, MeterId, MeterRecord};
use clap::Args;

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Meter identifier
    pub id: MeterId,

    /// Also collect third-party data (listings, tax record, map objects)
    #[arg(long)]
    pub collect: bool,

    /// Print the record as JSON
    #[arg(long)]
    pub json: bool,
}

impl ShowArgs {
    /// Execute the show command
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

        let meter = match env.source.fetch_meter(self.id).await {
            Ok(meter) => meter,
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to fetch meter");
                println!("❌ {}", e.user_message());
                return Ok(exit_code_for(&e));
            }
        };

        let external = if self.collect {
            match env.source.external_data(self.id).await {
                Ok(data) => Some(data),
                Err(e) => {
                    crate::log_error_with_context!(&e, "Failed to collect external data");
                    println!("❌ Data collection failed: {}", e.user_message());
                    return Ok(exit_code_for(&e));
                }
            }
        } else {
            None
        };

        if self.json {
            let body = match &external {
                Some(data) => serde_json::json!({ "meter": meter, "external": data }),
                None => serde_json::to_value(&meter)?,
            };
            println!("{}", serde_json::to_string_pretty(&body)?);
        } else {
            print_meter(&meter);
            if let Some(data) = &external {
                print_external(data);
            }
        }
        Ok(0)
    }
}

fn field(value: Option<impl ToString>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn flag(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "Yes",
        Some(false) => "No",
        None => "-",
    }
}

fn print_meter(meter: &MeterRecord) {
    let details = &meter.details;
    println!("Meter {}", meter.id);
    println!("  Client:           {}", field(meter.name()));
    println!("  Phone:            {}", field(meter.phone()));
    println!("  Email:            {}", field(meter.email()));
    println!("  Address:          {}", field(meter.address.as_deref()));
    println!("  Region:           {}", field(meter.region.as_deref()));
    match meter.rating {
        Some(rating) => println!(
            "  Rating:           {} ({}, {})",
            rating.value(),
            rating.band().label(),
            rating.band().color()
        ),
        None => println!("  Rating:           -"),
    }
    println!("  Verification:     {}", meter.verification_label());
    println!("  Area (m²):        {}", field(details.square));
    println!("  Dwelling type:    {}", field(details.facility_type_name.as_deref()));
    println!("  Residents:        {}", field(details.residents_count));
    println!("  Rooms:            {}", field(details.rooms_count));
    println!("  Tariff:           {}", field(details.tariff_type_name.as_deref()));
    println!("  Tariff price:     {}", field(details.tariff_price));
    println!("  Electric heating: {}", flag(details.has_electric_heating));
    println!("  Electric stove:   {}", flag(details.has_electric_stove));
    println!("  Last consumption: {}", field(meter.last_consumption));
    if let Some(geo) = meter.geodata {
        println!("  Location:         {:.4}, {:.4}", geo.latitude, geo.longitude);
    }
    if let Some(note) = &meter.note {
        println!("  Note:             {note}");
    }
}

fn print_external(data: &ExternalData) {
    println!();
    println!("Collected data");
    if data.avito.is_empty() {
        println!("  Listings:         none found");
    }
    for listing in &data.avito {
        println!("  Listing:          {} - {} <{}>", listing.link, listing.description, listing.url);
    }
    match &data.fns {
        Some(tax) => println!("  Tax record:       {}", tax.url),
        None => println!("  Tax record:       none found"),
    }
    if data.maps.is_empty() {
        println!("  Map objects:      none found");
    }
    for place in &data.maps {
        println!("  Map object:       {} ({}) <{}>", place.name, place.purpose_name, place.url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_and_flag() {
        assert_eq!(field(None::<u32>), "-");
        assert_eq!(field(Some(3)), "3");
        assert_eq!(flag(Some(true)), "Yes");
        assert_eq!(flag(None), "-");
    }
}
