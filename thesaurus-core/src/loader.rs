//! Load a taxonomy from a local snapshot or from its sources

use crate::config::TaxonomyConfig;
use crate::error::Result;
use crate::snapshot;
use crate::source::{FrequencySource, TaxonomySource};
use crate::taxonomy::{Taxonomy, TaxonomyBuilder};
use std::path::Path;

/// How [`load_taxonomy`] should treat the local snapshot
#[derive(Clone, Debug, Default)]
pub struct LoadOptions<'a> {
    /// Snapshot to reuse and to (re)write after fetching
    pub snapshot: Option<&'a Path>,
    /// Ignore an existing snapshot and fetch again
    pub refresh: bool,
    pub config: TaxonomyConfig,
}

/// Fetch the taxonomy document and parse it into a builder.
pub fn query_taxonomy(
    source: &dyn TaxonomySource,
    config: TaxonomyConfig,
) -> Result<TaxonomyBuilder> {
    let doc = source.fetch_document()?;
    snapshot::read_document(&doc, config)
}

/// Produce a frozen taxonomy with cumulative frequencies filled in.
///
/// - An existing snapshot is reused unless `refresh` is set.
/// - Otherwise the document is fetched. With a frequency source, occurrence
///   counts are propagated additively; without one, structural descendant
///   counts stand in for frequencies.
/// - A freshly fetched taxonomy is written to the snapshot path when one is
///   given.
pub fn load_taxonomy(
    opts: &LoadOptions<'_>,
    taxonomy_source: &dyn TaxonomySource,
    frequency_source: Option<&dyn FrequencySource>,
) -> Result<Taxonomy> {
    if let Some(path) = opts.snapshot {
        if path.exists() && !opts.refresh {
            tracing::info!(path = %path.display(), "taxonomy snapshot exists, loading");
            return snapshot::load_snapshot(path, opts.config.clone());
        }
    }

    let mut taxonomy = query_taxonomy(taxonomy_source, opts.config.clone())?.build();
    match frequency_source {
        Some(frequencies) => {
            tracing::info!("querying taxonomy and frequencies");
            let records = frequencies.fetch_frequencies()?;
            taxonomy.ingest_frequencies(&records);
        }
        None => {
            tracing::info!("querying taxonomy, precomputing children");
            taxonomy.precompute_children();
        }
    }

    if let Some(path) = opts.snapshot {
        snapshot::save_snapshot(&taxonomy, path)?;
    }
    Ok(taxonomy)
}
