//! External collaborators
//!
//! The taxonomy document, the per-concept occurrence counts and the remote
//! change history come from outside this crate. Each is a narrow trait; the
//! file-backed implementations here cover local exports.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Occurrence count of one concept in a corpus
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConceptFrequency {
    /// Concept IRI
    pub concept: String,
    /// Number of occurrences
    pub frequency: f64,
    /// Display label reported by the frequency service
    #[serde(rename = "mainLabel", default)]
    pub main_label: String,
}

impl ConceptFrequency {
    pub fn new(concept: impl Into<String>, frequency: f64) -> Self {
        Self {
            concept: concept.into(),
            frequency,
            main_label: String::new(),
        }
    }
}

/// One change recorded by the remote taxonomy service
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

/// Supplies the serialized taxonomy document.
pub trait TaxonomySource {
    fn fetch_document(&self) -> Result<String>;
}

/// Supplies per-concept occurrence counts.
pub trait FrequencySource {
    fn fetch_frequencies(&self) -> Result<Vec<ConceptFrequency>>;
}

/// Reports remote taxonomy changes.
pub trait HistorySource {
    /// Changes made after `since`
    fn changes_since(&self, since: DateTime<Utc>) -> Result<Vec<HistoryEvent>>;
}

/// Taxonomy document read from a local JSON-LD file
#[derive(Clone, Debug)]
pub struct FileTaxonomySource {
    path: PathBuf,
}

impl FileTaxonomySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TaxonomySource for FileTaxonomySource {
    fn fetch_document(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|e| {
            Error::source(format!("cannot read taxonomy {}: {e}", self.path.display()))
        })
    }
}

/// Occurrence counts read from a local JSON array of
/// `{"concept", "frequency", "mainLabel"}` records
#[derive(Clone, Debug)]
pub struct FileFrequencySource {
    path: PathBuf,
}

impl FileFrequencySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FrequencySource for FileFrequencySource {
    fn fetch_frequencies(&self) -> Result<Vec<ConceptFrequency>> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            Error::source(format!(
                "cannot read frequencies {}: {e}",
                self.path.display()
            ))
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Change history read from a local JSON array of
/// `{"timestamp", "description"}` records
#[derive(Clone, Debug)]
pub struct FileHistorySource {
    path: PathBuf,
}

impl FileHistorySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HistorySource for FileHistorySource {
    fn changes_since(&self, since: DateTime<Utc>) -> Result<Vec<HistoryEvent>> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            Error::source(format!("cannot read history {}: {e}", self.path.display()))
        })?;
        let events: Vec<HistoryEvent> = serde_json::from_str(&raw)?;
        Ok(events.into_iter().filter(|e| e.timestamp > since).collect())
    }
}

/// Ask `history` whether the taxonomy changed after the local copy at
/// `snapshot_path` was written.
///
/// Returns the change events, or `None` when there are none.
pub fn check_outdated(
    snapshot_path: &Path,
    history: &dyn HistorySource,
) -> Result<Option<Vec<HistoryEvent>>> {
    let modified = fs::metadata(snapshot_path)?.modified()?;
    let since: DateTime<Utc> = modified.into();
    let events = history.changes_since(since)?;
    tracing::debug!(since = %since, changes = events.len(), "checked taxonomy history");
    Ok(if events.is_empty() { None } else { Some(events) })
}
