use crate::commands::{open_snapshot, resolve};
use crate::config::ThesaurusConfig;
use crate::error::CliResult;
use std::path::Path;

pub fn run(
    iri: &str,
    lang: Option<&str>,
    snapshot: Option<&Path>,
    config: &ThesaurusConfig,
) -> CliResult<()> {
    let t = open_snapshot(config, snapshot)?;
    let id = resolve(&t, iri)?;
    let lang = lang.unwrap_or(&config.taxonomy.language);
    let labels = t.labels(id, lang);
    println!("{}", serde_json::to_string_pretty(&labels)?);
    Ok(())
}
