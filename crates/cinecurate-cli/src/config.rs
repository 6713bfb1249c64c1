//! Configuration management for the cinecurate CLI.

use anyhow::{Context, Result};
use cinecurate_core::{CurationConfig, CurationPaths};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "cinecurate.toml";

/// cinecurate project configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub curation: CurationConfig,
    #[serde(default)]
    pub paths: CurationPaths,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalConfig {
    #[serde(default = "default_k")]
    pub k: usize,
    #[serde(default = "default_relevance_threshold")]
    pub relevance_threshold: f32,
    #[serde(default = "default_embedding_dimension")]
    pub embedding_dimension: usize,
}

fn default_k() -> usize { 3 }
fn default_relevance_threshold() -> f32 { 0.7 }
fn default_embedding_dimension() -> usize { 256 }

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            k: default_k(),
            relevance_threshold: default_relevance_threshold(),
            embedding_dimension: default_embedding_dimension(),
        }
    }
}

impl Config {
    /// Load config from cinecurate.toml in the current or parent directories.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

/// Find cinecurate.toml in current or parent directories.
fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinecurate_core::{JoinKey, OutputMode};

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [curation]
            min_votes = 25000
            join_key = "identifier"

            [retrieval]
            k = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.curation.min_votes, 25000);
        assert_eq!(config.curation.min_rating, 7.0);
        assert_eq!(config.curation.join_key, JoinKey::Identifier);
        assert_eq!(config.curation.mode, OutputMode::Rag);
        assert_eq!(config.paths, CurationPaths::default());
        assert_eq!(config.retrieval.k, 5);
        assert_eq!(config.retrieval.relevance_threshold, 0.7);
    }

    #[test]
    fn test_saved_file_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let mut config = Config::default();
        config.curation.max_actors = 4;
        config.paths.raw_dir = PathBuf::from("/srv/imdb");
        config.save(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_bad_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[curation]\nmin_votes = \"lots\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
