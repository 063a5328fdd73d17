//! Predict command - one valuation request, rendered as text

use std::sync::Arc;

use anyhow::Context;
use clap::Args;

use super::{ConnectionArgs, VehicleArgs};
use crate::client::{
    PredictionApi, PredictionClient, PredictionSession, SubmitOutcome, ValuationAnalysis,
    ValuationReport,
};

/// Arguments for the predict command
#[derive(Args, Clone, Debug)]
pub struct PredictArgs {
    #[command(flatten)]
    pub vehicle: VehicleArgs,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Write a JSON valuation report after a successful prediction
    #[arg(long)]
    pub export: bool,
}

pub async fn run(args: PredictArgs) -> anyhow::Result<()> {
    let config = super::load_client_config()?;
    let client_config = args.connection.apply(config.client);

    let client = PredictionClient::from_config(&client_config)
        .context("Failed to create prediction client")?;

    let report = predict_once(Arc::new(client), args).await?;

    if let Some(report) = report {
        let path = report
            .write_to(&client_config.export_dir)
            .context("Failed to export valuation report")?;
        println!("📄 Report written to {}", path.display());
    }

    Ok(())
}

/// Submit one prediction and print the analysis; returns the report when export was requested
async fn predict_once(
    api: Arc<dyn PredictionApi>,
    args: PredictArgs,
) -> anyhow::Result<Option<ValuationReport>> {
    let mut session = PredictionSession::new(api);
    let current_year = session.current_year();

    match session.submit(args.vehicle.into()).await {
        SubmitOutcome::Success(record) => {
            println!("{}", ValuationAnalysis::from_record(&record, current_year).render());
            Ok(args.export.then(|| ValuationReport::from_record(&record)))
        }
        SubmitOutcome::Failed(e) => Err(anyhow::Error::new(e)),
    }
}
