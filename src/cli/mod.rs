//! CLI module for the car valuation service
//!
//! Provides subcommands for:
//! - `serve`: run the prediction service
//! - `predict`: request a single valuation
//! - `insights`: show local market insights without calling the service
//! - `dashboard`: interactive session with history, statistics and exports

pub mod dashboard;
pub mod insights;
pub mod predict;
pub mod serve;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::config::{AppConfig, ClientConfig};
use crate::domain::{FuelType, SellerType, Transmission, VehicleFeatures};
use crate::infrastructure::logging;

/// Car Valuation - resale price estimation for used cars
#[derive(Parser)]
#[command(name = "car-valuation")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the prediction service
    Serve,

    /// Request a single valuation from the service
    Predict(predict::PredictArgs),

    /// Show market insights computed locally
    Insights(insights::InsightsArgs),

    /// Start an interactive valuation session
    Dashboard(dashboard::DashboardArgs),
}

/// Connection flags shared by the client commands
#[derive(Args, Clone, Debug, Default)]
pub struct ConnectionArgs {
    /// Prediction service base URL (overrides config)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Prediction timeout in seconds (overrides config)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Directory valuation reports are written to (overrides config)
    #[arg(long)]
    pub export_dir: Option<String>,
}

impl ConnectionArgs {
    pub fn apply(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(url) = &self.api_url {
            config.api_url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(dir) = &self.export_dir {
            config.export_dir = dir.clone();
        }
        config
    }
}

/// Vehicle attributes accepted on the command line
#[derive(Args, Clone, Debug)]
pub struct VehicleArgs {
    /// Vehicle model name
    #[arg(long)]
    pub name: String,

    /// Manufacturing year
    #[arg(long, default_value_t = 2020)]
    pub year: i32,

    /// Current ex-showroom price in lakhs
    #[arg(long, default_value_t = 10.5)]
    pub present_price: f64,

    /// Kilometres driven
    #[arg(long, default_value_t = 27000)]
    pub kms_driven: u64,

    /// Fuel type (Petrol, Diesel, CNG)
    #[arg(long, default_value = "Petrol")]
    pub fuel_type: FuelType,

    /// Seller type (Dealer, Individual)
    #[arg(long, default_value = "Dealer")]
    pub seller_type: SellerType,

    /// Transmission (Manual, Automatic)
    #[arg(long, default_value = "Manual")]
    pub transmission: Transmission,

    /// Number of previous owners (0-3)
    #[arg(long, default_value_t = 0)]
    pub owner: u8,
}

impl From<VehicleArgs> for VehicleFeatures {
    fn from(args: VehicleArgs) -> Self {
        Self {
            name: args.name,
            year: args.year,
            present_price: args.present_price,
            kms_driven: args.kms_driven,
            fuel_type: args.fuel_type,
            seller_type: args.seller_type,
            transmission: args.transmission,
            owner: args.owner,
        }
    }
}

/// Load configuration and initialise stderr logging for client commands
pub(crate) fn load_client_config() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init_logging(&logging::LoggingConfig {
        level: config.logging.level.clone(),
        format: config.logging.format.clone(),
    });

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_flags_parse_into_features() {
        let cli = Cli::try_parse_from([
            "car-valuation",
            "predict",
            "--name",
            "Defender",
            "--year",
            "2019",
            "--fuel-type",
            "CNG",
            "--transmission",
            "Automatic",
            "--owner",
            "2",
        ])
        .unwrap();

        let Command::Predict(args) = cli.command else {
            panic!("expected predict command");
        };
        let features = VehicleFeatures::from(args.vehicle);

        assert_eq!(features.year, 2019);
        assert_eq!(features.fuel_type, FuelType::Cng);
        assert_eq!(features.transmission, Transmission::Automatic);
        assert_eq!(features.seller_type, SellerType::Dealer);
        assert_eq!(features.kms_driven, 27000);
        assert_eq!(features.owner, 2);
    }

    #[test]
    fn test_unknown_fuel_type_rejected_by_parser() {
        let result = Cli::try_parse_from([
            "car-valuation",
            "predict",
            "--name",
            "Defender",
            "--fuel-type",
            "Hybrid",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn test_connection_args_override_config() {
        let args = ConnectionArgs {
            api_url: Some("http://10.0.0.5:9000".to_string()),
            timeout: Some(30),
            export_dir: None,
        };

        let config = args.apply(ClientConfig::default());

        assert_eq!(config.api_url, "http://10.0.0.5:9000");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.export_dir, ".");
    }
}
