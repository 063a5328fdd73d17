use car_valuation::cli::{self, Cli, Command};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Predict(args) => cli::predict::run(args).await,
        Command::Insights(args) => cli::insights::run(args).await,
        Command::Dashboard(args) => cli::dashboard::run(args).await,
    }
}
