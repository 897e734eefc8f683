pub mod concepts;
pub mod labels;
pub mod lcs;
pub mod load;
pub mod matrix;
pub mod outdated;
pub mod similarity;

use crate::config::ThesaurusConfig;
use crate::error::{CliError, CliResult};
use std::path::{Path, PathBuf};
use thesaurus_core::{ConceptId, Taxonomy};

/// Resolve the snapshot path and require the file to exist.
pub(crate) fn require_snapshot(config: &ThesaurusConfig, flag: Option<&Path>) -> CliResult<PathBuf> {
    let path = config
        .snapshot_path(flag)
        .ok_or(CliError::NoSnapshot(None))?;
    if !path.is_file() {
        return Err(CliError::NoSnapshot(Some(path.display().to_string())));
    }
    Ok(path)
}

/// Load the frozen taxonomy from the configured snapshot.
pub(crate) fn open_snapshot(config: &ThesaurusConfig, flag: Option<&Path>) -> CliResult<Taxonomy> {
    let path = require_snapshot(config, flag)?;
    Ok(thesaurus_core::load_snapshot(&path, config.taxonomy.clone())?)
}

pub(crate) fn resolve(t: &Taxonomy, iri: &str) -> CliResult<ConceptId> {
    t.id(iri)
        .filter(|&id| t.is_concept(id))
        .ok_or_else(|| CliError::NotFound(format!("concept '{iri}' not found")))
}
