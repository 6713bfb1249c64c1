//! Initialize a new cinecurate project.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{Config, CONFIG_FILE};

pub fn run(path: Option<String>) -> Result<()> {
    let base_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };

    println!("{} Initializing cinecurate project...", "→".blue());

    let config_path = base_path.join(CONFIG_FILE);
    let config = if config_path.exists() {
        println!("  {} {} already exists", "•".yellow(), config_path.display());
        Config::load_from(&config_path)?
    } else {
        std::fs::create_dir_all(&base_path)
            .with_context(|| format!("Failed to create {}", base_path.display()))?;
        let config = Config::default();
        config.save(&config_path)?;
        println!("  {} Created {}", "✓".green(), config_path.display());
        config
    };

    for dir in [&config.paths.raw_dir, &config.paths.curated_dir] {
        let dir = base_path.join(dir);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        println!("  {} Created {}", "✓".green(), dir.display());
    }

    println!();
    println!("{} cinecurate project initialized!", "✓".green().bold());
    println!();
    println!("Next steps:");
    println!(
        "  {} download title.basics, title.ratings, title.principals and name.basics into {}",
        "1.".blue(),
        config.paths.raw_dir.display()
    );
    println!("  {} cinecurate curate", "2.".blue());
    println!("  {} cinecurate search \"crime movies directed by Michael Mann\"", "3.".blue());

    Ok(())
}
