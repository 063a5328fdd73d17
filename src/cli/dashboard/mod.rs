//! Dashboard command - interactive valuation session on the terminal

use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing::debug;

use super::ConnectionArgs;
use crate::client::format::{kilometres, lakhs};
use crate::client::{
    PredictionClient, PredictionSession, SubmitOutcome, ValuationAnalysis, ValuationReport,
    HISTORY_LIMIT,
};
use crate::domain::insights::{market_insights, variance};
use crate::domain::{FuelType, SellerType, Transmission, VehicleFeatures};

/// Arguments for the dashboard command
#[derive(Args, Clone, Debug)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,
}

pub async fn run(args: DashboardArgs) -> anyhow::Result<()> {
    let config = super::load_client_config()?;
    let client_config = args.connection.apply(config.client);

    let client = PredictionClient::from_config(&client_config)
        .context("Failed to create prediction client")?;
    let session = PredictionSession::new(Arc::new(client));

    let mut dashboard = Dashboard::new(
        session,
        PathBuf::from(&client_config.export_dir),
        BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
    );

    dashboard.run().await
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DashboardCommand {
    Predict,
    History,
    Stats,
    Export,
    Clear,
    Help,
    Quit,
    Unknown(String),
}

impl DashboardCommand {
    fn parse(line: &str) -> Option<Self> {
        let command = match line.trim().to_lowercase().as_str() {
            "" => return None,
            "predict" | "p" => Self::Predict,
            "history" | "h" => Self::History,
            "stats" | "s" => Self::Stats,
            "export" | "e" => Self::Export,
            "clear" => Self::Clear,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        };
        Some(command)
    }
}

const HELP: &str = "Commands:
  predict  enter vehicle details and request a valuation
  history  show the last 10 predictions
  stats    show session statistics
  export   write the last valuation report as JSON
  clear    clear the session history
  quit     leave the dashboard";

/// Interactive loop over a line-based input and a text output
pub struct Dashboard<R, W> {
    session: PredictionSession,
    export_dir: PathBuf,
    input: Lines<R>,
    out: W,
}

impl<R, W> Dashboard<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(session: PredictionSession, export_dir: PathBuf, input: R, out: W) -> Self {
        Self {
            session,
            export_dir,
            input: input.lines(),
            out,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        writeln!(self.out, "🚗 Car Valuation Dashboard")?;
        writeln!(self.out, "{}", HELP)?;

        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;

            let Some(line) = self.input.next_line().await? else {
                break;
            };

            let Some(command) = DashboardCommand::parse(&line) else {
                continue;
            };
            debug!(?command, "Dashboard command");

            match command {
                DashboardCommand::Predict => self.predict().await?,
                DashboardCommand::History => self.history()?,
                DashboardCommand::Stats => self.stats()?,
                DashboardCommand::Export => self.export()?,
                DashboardCommand::Clear => {
                    self.session.clear();
                    writeln!(self.out, "🗑️ History cleared")?;
                }
                DashboardCommand::Help => writeln!(self.out, "{}", HELP)?,
                DashboardCommand::Quit => break,
                DashboardCommand::Unknown(other) => {
                    writeln!(self.out, "Unknown command '{}', type 'help'", other)?
                }
            }
        }

        writeln!(self.out, "Goodbye")?;
        Ok(())
    }

    async fn predict(&mut self) -> anyhow::Result<()> {
        let Some(features) = self.read_vehicle().await? else {
            return Ok(());
        };

        let current_year = self.session.current_year();
        writeln!(self.out, "💡 Market Insights")?;
        for insight in market_insights(
            features.year,
            features.kms_driven,
            features.fuel_type.as_str(),
            current_year,
        ) {
            writeln!(
                self.out,
                "  {} {}: {}",
                insight.level.icon(),
                insight.title,
                insight.description
            )?;
        }

        writeln!(self.out, "🔍 Analyzing vehicle data...")?;
        match self.session.submit(features).await {
            SubmitOutcome::Success(record) => {
                let analysis = ValuationAnalysis::from_record(&record, current_year);
                writeln!(self.out, "{}", analysis.render())?;
                writeln!(self.out, "Type 'export' to save this valuation report")?;
            }
            SubmitOutcome::Failed(e) => writeln!(self.out, "❌ {}", e)?,
        }

        Ok(())
    }

    /// Prompt for every vehicle field; `None` when input ends or a value does not parse
    async fn read_vehicle(&mut self) -> anyhow::Result<Option<VehicleFeatures>> {
        macro_rules! field {
            ($label:expr, $default:expr) => {
                match self.prompt_parsed($label, $default).await? {
                    Some(value) => value,
                    None => return Ok(None),
                }
            };
        }

        let Some(name) = self.prompt("Vehicle model name", None).await? else {
            return Ok(None);
        };
        let year: i32 = field!("Manufacturing year", "2020");
        let present_price: f64 = field!("Present price (lakhs)", "10.5");
        let kms_driven: u64 = field!("Kilometers driven", "27000");
        let fuel_type: FuelType = field!("Fuel type (Petrol/Diesel/CNG)", "Petrol");
        let seller_type: SellerType = field!("Seller type (Dealer/Individual)", "Dealer");
        let transmission: Transmission = field!("Transmission (Manual/Automatic)", "Manual");
        let owner: u8 = field!("Previous owners (0-3)", "0");

        Ok(Some(VehicleFeatures {
            name,
            year,
            present_price,
            kms_driven,
            fuel_type,
            seller_type,
            transmission,
            owner,
        }))
    }

    async fn prompt(&mut self, label: &str, default: Option<&str>) -> anyhow::Result<Option<String>> {
        match default {
            Some(d) => write!(self.out, "{} [{}]: ", label, d)?,
            None => write!(self.out, "{}: ", label)?,
        }
        self.out.flush()?;

        let Some(line) = self.input.next_line().await? else {
            return Ok(None);
        };

        let value = line.trim();
        Ok(Some(match (value.is_empty(), default) {
            (true, Some(d)) => d.to_string(),
            _ => value.to_string(),
        }))
    }

    async fn prompt_parsed<T>(&mut self, label: &str, default: &str) -> anyhow::Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let Some(raw) = self.prompt(label, Some(default)).await? else {
            return Ok(None);
        };

        match raw.parse::<T>() {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                writeln!(self.out, "⚠️ Invalid value for {}: {}", label, e)?;
                Ok(None)
            }
        }
    }

    fn history(&mut self) -> anyhow::Result<()> {
        if self.session.history().is_empty() {
            writeln!(self.out, "📝 No prediction history available yet.")?;
            return Ok(());
        }

        writeln!(self.out, "📜 Prediction History")?;
        for record in self.session.recent(HISTORY_LIMIT) {
            let f = &record.features;
            writeln!(self.out, "🚗 {} ({}) - {}", f.name, f.year, record.timestamp())?;
            writeln!(
                self.out,
                "  Predicted {} | Market {} | Variance {:+.1}%",
                lakhs(record.predicted_price),
                lakhs(f.present_price),
                variance(record.predicted_price, f.present_price).diff_percent
            )?;
            writeln!(
                self.out,
                "  {}, {}, {}",
                kilometres(f.kms_driven),
                f.fuel_type,
                f.transmission
            )?;
        }

        Ok(())
    }

    fn stats(&mut self) -> anyhow::Result<()> {
        let Some(stats) = self.session.stats() else {
            writeln!(self.out, "📊 No data yet - make some predictions first")?;
            return Ok(());
        };

        writeln!(self.out, "📈 Session Analytics")?;
        writeln!(self.out, "  Total Predictions : {}", stats.count)?;
        writeln!(self.out, "  Avg Predicted     : {}", lakhs(stats.average))?;
        writeln!(self.out, "  Max Value         : {}", lakhs(stats.max))?;
        writeln!(self.out, "  Min Value         : {}", lakhs(stats.min))?;
        for (fuel, count) in stats.fuel_counts.iter().filter(|(_, c)| *c > 0) {
            writeln!(self.out, "  {:<17} : {}", fuel.as_str(), count)?;
        }

        Ok(())
    }

    fn export(&mut self) -> anyhow::Result<()> {
        let Some(record) = self.session.last_prediction() else {
            writeln!(self.out, "Nothing to export yet")?;
            return Ok(());
        };

        match ValuationReport::from_record(record).write_to(&self.export_dir) {
            Ok(path) => writeln!(self.out, "📄 Report written to {}", path.display())?,
            Err(e) => writeln!(self.out, "❌ {}", e)?,
        }

        Ok(())
    }
}
