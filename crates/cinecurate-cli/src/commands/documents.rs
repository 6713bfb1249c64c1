//! Preview the curated table as documents.

use anyhow::{Context, Result};
use cinecurate_core::OutputMode;
use cinecurate_retrieval::{join_contents, load_dir};
use colored::Colorize;

use crate::config::Config;

pub fn run(cag: bool, limit: usize) -> Result<()> {
    let config = Config::load()?;
    let mode = OutputMode::from_cag_flag(cag);
    let dir = config.paths.curated_dir.join(mode.dir_name());

    let documents = load_dir(&dir).with_context(|| {
        format!("Failed to load documents. Run {} first", "cinecurate curate".cyan())
    })?;
    let context = join_contents(&documents);

    println!(
        "{} Loaded {} documents from {}",
        "→".blue(),
        documents.len().to_string().cyan(),
        dir.display()
    );
    println!(
        "  {} context size: {} characters",
        "•".blue(),
        context.chars().count().to_string().cyan()
    );
    println!();

    for document in documents.iter().take(limit) {
        println!(
            "{}",
            format!("{} row {}", document.source, document.row).dimmed()
        );
        println!("{}", document.content);
        println!();
    }

    if documents.len() > limit {
        println!(
            "{} {} more documents not shown",
            "•".yellow(),
            documents.len() - limit
        );
    }

    Ok(())
}
