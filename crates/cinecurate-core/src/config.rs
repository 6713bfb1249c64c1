//! Curation configuration.

use crate::error::{CurateError, Result};
use crate::types::RoleGroup;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Key used to group credits and re-merge movie attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinKey {
    /// Original title text. Movies sharing a title are merged.
    #[default]
    Title,
    /// Title identifier. One row per qualifying movie.
    Identifier,
}

impl FromStr for JoinKey {
    type Err = CurateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "title" => Ok(JoinKey::Title),
            "identifier" | "id" => Ok(JoinKey::Identifier),
            other => Err(CurateError::Config(format!(
                "unknown join key '{other}' (expected 'title' or 'identifier')"
            ))),
        }
    }
}

impl fmt::Display for JoinKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinKey::Title => write!(f, "title"),
            JoinKey::Identifier => write!(f, "identifier"),
        }
    }
}

/// Downstream consumer the curated table is written for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Full-context prompting.
    Cag,
    /// Retrieval.
    #[default]
    Rag,
}

impl OutputMode {
    pub fn from_cag_flag(cag: bool) -> Self {
        if cag {
            OutputMode::Cag
        } else {
            OutputMode::Rag
        }
    }

    /// Sub-directory of the curated directory for this mode.
    pub fn dir_name(&self) -> &'static str {
        match self {
            OutputMode::Cag => "cag",
            OutputMode::Rag => "rag",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Thresholds and caps for one curation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurationConfig {
    /// A movie needs strictly more votes than this.
    #[serde(default = "default_min_votes")]
    pub min_votes: u64,
    /// A movie needs a strictly higher average rating than this.
    #[serde(default = "default_min_rating")]
    pub min_rating: f64,
    /// Actors and actresses kept per movie, combined.
    #[serde(default = "default_max_actors")]
    pub max_actors: usize,
    #[serde(default = "default_max_directors")]
    pub max_directors: usize,
    #[serde(default = "default_max_writers")]
    pub max_writers: usize,
    #[serde(default)]
    pub join_key: JoinKey,
    /// Also write the curated people table.
    #[serde(default)]
    pub curate_people: bool,
    #[serde(default)]
    pub mode: OutputMode,
}

fn default_min_votes() -> u64 { 1000 }
fn default_min_rating() -> f64 { 7.0 }
fn default_max_actors() -> usize { 2 }
fn default_max_directors() -> usize { 1 }
fn default_max_writers() -> usize { 1 }

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            min_votes: default_min_votes(),
            min_rating: default_min_rating(),
            max_actors: default_max_actors(),
            max_directors: default_max_directors(),
            max_writers: default_max_writers(),
            join_key: JoinKey::default(),
            curate_people: false,
            mode: OutputMode::default(),
        }
    }
}

impl CurationConfig {
    /// Set the vote-count threshold.
    pub fn with_min_votes(mut self, min_votes: u64) -> Self {
        self.min_votes = min_votes;
        self
    }

    /// Set the average-rating threshold.
    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = min_rating;
        self
    }

    /// Set the combined actor and actress cap.
    pub fn with_max_actors(mut self, max_actors: usize) -> Self {
        self.max_actors = max_actors;
        self
    }

    /// Set the grouping key.
    pub fn with_join_key(mut self, join_key: JoinKey) -> Self {
        self.join_key = join_key;
        self
    }

    /// Set the output mode.
    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable or disable the people table.
    pub fn with_people(mut self, curate_people: bool) -> Self {
        self.curate_people = curate_people;
        self
    }

    /// Per-movie cap for a credit group.
    pub fn cap(&self, group: RoleGroup) -> usize {
        match group {
            RoleGroup::Actors => self.max_actors,
            RoleGroup::Director => self.max_directors,
            RoleGroup::Writer => self.max_writers,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min_rating.is_finite() {
            return Err(CurateError::Config(format!(
                "min_rating must be a finite number, got {}",
                self.min_rating
            )));
        }
        Ok(())
    }
}

/// Input and output locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurationPaths {
    #[serde(default = "default_raw_dir")]
    pub raw_dir: PathBuf,
    #[serde(default = "default_curated_dir")]
    pub curated_dir: PathBuf,
}

fn default_raw_dir() -> PathBuf { PathBuf::from("data/raw") }
fn default_curated_dir() -> PathBuf { PathBuf::from("data/curated") }

impl Default for CurationPaths {
    fn default() -> Self {
        Self {
            raw_dir: default_raw_dir(),
            curated_dir: default_curated_dir(),
        }
    }
}

impl CurationPaths {
    pub fn new(raw_dir: impl AsRef<Path>, curated_dir: impl AsRef<Path>) -> Self {
        Self {
            raw_dir: raw_dir.as_ref().to_path_buf(),
            curated_dir: curated_dir.as_ref().to_path_buf(),
        }
    }

    pub fn title_basics(&self) -> PathBuf {
        self.raw_dir.join("title.basics.tsv")
    }

    pub fn title_ratings(&self) -> PathBuf {
        self.raw_dir.join("title.ratings.tsv")
    }

    pub fn title_principals(&self) -> PathBuf {
        self.raw_dir.join("title.principals.tsv")
    }

    pub fn name_basics(&self) -> PathBuf {
        self.raw_dir.join("name.basics.tsv")
    }

    /// `<curated>/<mode>/movie_curated.csv`
    pub fn movie_output(&self, mode: OutputMode) -> PathBuf {
        self.curated_dir.join(mode.dir_name()).join("movie_curated.csv")
    }

    /// `<curated>/name.basics.csv`
    pub fn people_output(&self) -> PathBuf {
        self.curated_dir.join("name.basics.csv")
    }
}
