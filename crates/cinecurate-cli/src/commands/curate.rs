//! Curate the raw IMDb files.

use anyhow::{Context, Result};
use clap::Args;
use cinecurate_core::prelude::*;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct CurateArgs {
    /// Minimum average rating (exclusive)
    #[arg(short = 'r', long)]
    pub rating: Option<f64>,

    /// Minimum number of votes (exclusive)
    #[arg(short = 'v', long)]
    pub votes: Option<u64>,

    /// Write the CAG table instead of the RAG table
    #[arg(short, long)]
    pub cag: bool,

    /// Actors and actresses kept per movie
    #[arg(long)]
    pub actors: Option<usize>,

    /// Group credits by "title" or "identifier"
    #[arg(long)]
    pub join_key: Option<JoinKey>,

    /// Also write the curated people table
    #[arg(long)]
    pub names: bool,

    /// Directory holding the raw .tsv files
    #[arg(long)]
    pub raw_dir: Option<PathBuf>,

    /// Directory for curated output
    #[arg(long)]
    pub curated_dir: Option<PathBuf>,
}

impl CurateArgs {
    /// Command-line flags take precedence over the config file.
    fn apply(self, config: &mut Config) {
        let curation = &mut config.curation;
        if let Some(rating) = self.rating {
            curation.min_rating = rating;
        }
        if let Some(votes) = self.votes {
            curation.min_votes = votes;
        }
        if self.cag {
            curation.mode = OutputMode::Cag;
        }
        if let Some(actors) = self.actors {
            curation.max_actors = actors;
        }
        if let Some(join_key) = self.join_key {
            curation.join_key = join_key;
        }
        if self.names {
            curation.curate_people = true;
        }
        if let Some(raw_dir) = self.raw_dir {
            config.paths.raw_dir = raw_dir;
        }
        if let Some(curated_dir) = self.curated_dir {
            config.paths.curated_dir = curated_dir;
        }
    }
}

pub fn run(args: CurateArgs) -> Result<()> {
    let mut config = Config::load()?;
    args.apply(&mut config);

    let curation = &config.curation;
    println!(
        "{} Curating movies with rating > {} and votes > {} ({} table, {} key)",
        "→".blue(),
        curation.min_rating.to_string().cyan(),
        curation.min_votes.to_string().cyan(),
        curation.mode.to_string().cyan(),
        curation.join_key.to_string().cyan(),
    );

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed}]")?);
    pb.enable_steady_tick(Duration::from_millis(120));

    let curator = Curator::new(config.curation.clone(), config.paths.clone());
    let report = curator
        .run_with(|stage| pb.set_message(stage.label()))
        .with_context(|| {
            format!(
                "Curation failed for raw files in {}",
                config.paths.raw_dir.display()
            )
        });
    pb.finish_and_clear();
    let report = report?;

    let counts = &report.counts;
    println!("  {} {} movies out of {} titles", "✓".green(), counts.movies, counts.titles);
    println!(
        "  {} {} movies above the thresholds",
        "✓".green(),
        counts.qualifying
    );
    println!(
        "  {} {} credits kept from {} principal rows",
        "✓".green(),
        counts.credits,
        counts.principals
    );
    if counts.curated_rows == 0 {
        println!("  {} No movies matched; wrote header only", "•".yellow());
    }

    println!();
    println!(
        "{} Wrote {} rows to {}",
        "✓".green().bold(),
        counts.curated_rows.to_string().cyan(),
        report.movie_output.display()
    );
    if let Some(people_output) = &report.people_output {
        println!(
            "{} Wrote {} people to {}",
            "✓".green().bold(),
            counts.people.to_string().cyan(),
            people_output.display()
        );
    }

    Ok(())
}
