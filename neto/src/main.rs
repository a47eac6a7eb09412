//! Neto Social - terminal client for the Neto social network.

use anyhow::Result;
use clap::Parser;

use neto::cli::{execute, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    execute(cli).await
}
