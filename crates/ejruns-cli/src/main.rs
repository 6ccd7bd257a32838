use anyhow::Result;
use clap::Parser;

use ejruns_cli::cli_args::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    ejruns_cli::run(cli).await?;
    Ok(())
}
