//! `thesaurus.toml` handling

use crate::error::{CliError, CliResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thesaurus_core::TaxonomyConfig;
use thesaurus_matrix::MatrixOptions;

const CONFIG_FILE: &str = "thesaurus.toml";

/// Artifact locations
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub snapshot: Option<PathBuf>,
    pub similarity_cache: Option<PathBuf>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThesaurusConfig {
    pub taxonomy: TaxonomyConfig,
    pub matrix: MatrixOptions,
    pub paths: PathsConfig,
}

impl ThesaurusConfig {
    pub fn parse(raw: &str) -> CliResult<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Load from `--config`, else `./thesaurus.toml` if present, else defaults.
    ///
    /// An explicit `--config` path must exist.
    pub fn load(config_override: Option<&Path>) -> CliResult<Self> {
        let path = match config_override {
            Some(p) if !p.is_file() => {
                return Err(CliError::Config(format!(
                    "config file not found: {}",
                    p.display()
                )));
            }
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(CONFIG_FILE);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let raw = fs::read_to_string(&path)?;
        let config = Self::parse(&raw)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// `--snapshot` if given, else `[paths] snapshot`
    pub fn snapshot_path(&self, flag: Option<&Path>) -> Option<PathBuf> {
        flag.map(Path::to_path_buf)
            .or_else(|| self.paths.snapshot.clone())
    }

    /// `--cache` if given, else `[paths] similarity_cache`
    pub fn cache_path(&self, flag: Option<&Path>) -> Option<PathBuf> {
        flag.map(Path::to_path_buf)
            .or_else(|| self.paths.similarity_cache.clone())
    }
}
