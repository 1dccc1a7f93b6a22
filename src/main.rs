use anyhow::Result;
use clap::Parser;
use fleetledger::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run().await
}
