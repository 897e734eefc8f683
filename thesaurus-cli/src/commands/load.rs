use crate::config::ThesaurusConfig;
use crate::error::{CliError, CliResult};
use colored::Colorize;
use std::path::Path;
use thesaurus_core::{load_taxonomy, FileFrequencySource, FileTaxonomySource, FrequencySource, LoadOptions};

pub fn run(
    taxonomy: &Path,
    frequencies: Option<&Path>,
    refresh: bool,
    snapshot_flag: Option<&Path>,
    config: &ThesaurusConfig,
) -> CliResult<()> {
    let snapshot = config.snapshot_path(snapshot_flag);
    if refresh && snapshot.is_none() {
        return Err(CliError::Usage(
            "--refresh needs a snapshot to replace (pass --snapshot <path> or set [paths] snapshot)"
                .to_string(),
        ));
    }
    let opts = LoadOptions {
        snapshot: snapshot.as_deref(),
        refresh,
        config: config.taxonomy.clone(),
    };

    let taxonomy_source = FileTaxonomySource::new(taxonomy);
    let frequency_source = frequencies.map(FileFrequencySource::new);
    let t = load_taxonomy(
        &opts,
        &taxonomy_source,
        frequency_source.as_ref().map(|s| s as &dyn FrequencySource),
    )?;

    let concepts = t.all_concepts().len();
    println!(
        "Loaded {} concepts ({} leaves, {} top concepts)",
        concepts.to_string().bold(),
        t.leaves().len(),
        t.top_concepts().len()
    );
    println!("Root frequency: {}", t.cumulative_frequency(t.root()));
    if let Some(path) = &snapshot {
        println!("Snapshot: {}", path.display());
    }
    Ok(())
}
