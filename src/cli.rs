use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cropdf")]
#[command(about = "Crop PDFs down to selected page ranges, with MCP server support")]
#[command(version)]
pub struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server (primary mode)
    Mcp,

    /// Display PDF metadata and page count
    Info {
        /// PDF file to inspect
        path: PathBuf,
    },

    /// Crop a single PDF to the selected pages
    Crop {
        /// PDF file to crop
        path: PathBuf,

        /// Pages to keep (e.g. "1-3,5,7-8" or "all")
        #[arg(short, long, default_value = "all")]
        pages: String,

        /// Directory for the cropped copy
        #[arg(short, long)]
        output_dir: PathBuf,
    },

    /// Crop several PDFs in one run, continuing past per-file failures
    Batch {
        /// PDF files, or directories to scan for PDFs
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Pages to keep, per input in order; one value applies to every file
        #[arg(short, long)]
        pages: Vec<String>,

        /// Directory for the cropped copies
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Print the batch summary as JSON
        #[arg(long)]
        json: bool,
    },
}
