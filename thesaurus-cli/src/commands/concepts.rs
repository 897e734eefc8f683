use crate::commands::open_snapshot;
use crate::config::ThesaurusConfig;
use crate::error::CliResult;
use std::path::Path;
use thesaurus_vocab::internal;

pub fn run(leaves: bool, snapshot: Option<&Path>, config: &ThesaurusConfig) -> CliResult<()> {
    let t = open_snapshot(config, snapshot)?;
    let ids = if leaves { t.leaves() } else { t.all_concepts() };

    let mut iris: Vec<&str> = ids
        .into_iter()
        .map(|id| t.iri(id))
        .filter(|iri| !internal::is_sentinel(iri))
        .collect();
    iris.sort_unstable();

    if iris.is_empty() {
        println!("(no concepts)");
    }
    for iri in iris {
        println!("{iri}");
    }
    Ok(())
}
