//! cinecurate CLI - curate IMDb dumps into a compact movie table.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "cinecurate")]
#[command(author, version, about = "cinecurate - IMDb movie curation for CAG and RAG", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default cinecurate.toml and data directories
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Curate the raw IMDb files into movie_curated.csv
    Curate(commands::curate::CurateArgs),

    /// Load the curated table as documents and preview them
    Documents {
        /// Read the CAG table instead of the RAG table
        #[arg(short, long)]
        cag: bool,

        /// Number of documents to print
        #[arg(short, long, default_value = "3")]
        limit: usize,
    },

    /// Similarity search over the RAG table
    Search {
        /// Search query
        query: String,

        /// Number of documents to retrieve
        #[arg(short, long)]
        k: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Curate(args) => commands::curate::run(args),
        Commands::Documents { cag, limit } => commands::documents::run(cag, limit),
        Commands::Search { query, k } => commands::search::run(&query, k),
    }
}
