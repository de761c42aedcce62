mod cli;
mod commands;
mod error;
mod mcp;
mod page_range;
mod pdf;
mod session;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing::Level;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr: stdout carries --json output and the MCP transport
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Mcp => {
            mcp::run_server().await?;
        }
        Commands::Info { path } => {
            commands::info::run(&path)?;
        }
        Commands::Crop {
            path,
            pages,
            output_dir,
        } => {
            commands::crop::run(&path, &pages, &output_dir)?;
        }
        Commands::Batch {
            inputs,
            pages,
            output_dir,
            json,
        } => {
            commands::batch::run(&inputs, &pages, &output_dir, json)?;
        }
    }

    Ok(())
}
