//! Similarity search over the RAG table.

use anyhow::{bail, Context, Result};
use cinecurate_core::OutputMode;
use cinecurate_retrieval::{load_dir, Embedder, InMemoryStore, SimpleEmbedder, VectorIndex};
use colored::Colorize;
use std::sync::Arc;

use crate::config::Config;

pub fn run(query: &str, k: Option<usize>) -> Result<()> {
    if query.trim().is_empty() {
        bail!("Search query is empty");
    }

    let config = Config::load()?;
    let retrieval = &config.retrieval;
    let k = k.unwrap_or(retrieval.k);
    let dir = config.paths.curated_dir.join(OutputMode::Rag.dir_name());

    let documents = load_dir(&dir).with_context(|| {
        format!("Failed to load documents. Run {} first", "cinecurate curate".cyan())
    })?;

    let embedder = Arc::new(SimpleEmbedder::new(retrieval.embedding_dimension));
    let store = Arc::new(InMemoryStore::new(embedder.dimension()));
    let index = VectorIndex::new(embedder, store);

    let rt = tokio::runtime::Runtime::new()?;
    let retrieval = rt.block_on(async {
        index.index(&documents).await?;
        index
            .retrieve(query, k, retrieval.relevance_threshold)
            .await
    })?;

    for warning in &retrieval.warnings {
        println!("{} {}", "!".yellow().bold(), warning.yellow());
    }

    if retrieval.contexts.is_empty() {
        println!("{} No results found for: {}", "•".yellow(), query.cyan());
        return Ok(());
    }

    println!("{} Results for {}:", "→".blue(), query.cyan().bold());
    println!();

    for (i, context) in retrieval.contexts.iter().enumerate() {
        let rank = format!("{}.", i + 1);
        let score = context
            .score
            .map(|s| format!("{:.3}", s))
            .unwrap_or_default();

        println!("  {} {}", rank.blue(), format!("(similarity {})", score).dimmed());
        for line in context.content.lines() {
            println!("      {}", line);
        }
        println!();
    }

    println!(
        "{} {} results",
        "✓".green(),
        retrieval.contexts.len().to_string().cyan()
    );

    Ok(())
}
