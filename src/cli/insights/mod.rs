//! Insights command - market insights computed locally, without the service

use chrono::{Datelike, Local};
use clap::Args;

use crate::client::format::lakhs;
use crate::domain::insights::{average_yearly_km, expected_value, market_insights};

/// Arguments for the insights command
#[derive(Args, Clone, Debug)]
pub struct InsightsArgs {
    /// Manufacturing year
    #[arg(long, default_value_t = 2020)]
    pub year: i32,

    /// Kilometres driven
    #[arg(long, default_value_t = 27000)]
    pub kms_driven: u64,

    /// Fuel type label; unrecognised labels are treated as Petrol
    #[arg(long, default_value = "Petrol")]
    pub fuel_type: String,

    /// Present price in lakhs, enables the depreciation estimate
    #[arg(long)]
    pub present_price: Option<f64>,
}

pub async fn run(args: InsightsArgs) -> anyhow::Result<()> {
    super::load_client_config()?;

    println!("{}", render(&args, Local::now().year()));
    Ok(())
}

fn render(args: &InsightsArgs, current_year: i32) -> String {
    let mut lines = vec!["💡 Market Insights".to_string()];

    for insight in market_insights(args.year, args.kms_driven, &args.fuel_type, current_year) {
        lines.push(format!(
            "  {} {}: {}",
            insight.level.icon(),
            insight.title,
            insight.description
        ));
    }

    lines.push(format!(
        "  Average usage: {:.0} km/year",
        average_yearly_km(args.year, args.kms_driven, current_year)
    ));

    if let Some(price) = args.present_price {
        lines.push(format!(
            "  Expected value: {}",
            lakhs(expected_value(args.year, price, current_year))
        ));
    }

    lines.join("\n")
}
