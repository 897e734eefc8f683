use crate::commands::open_snapshot;
use crate::config::ThesaurusConfig;
use crate::error::CliResult;
use colored::Colorize;
use std::path::Path;
use thesaurus_matrix::{load_or_build, MatrixOptions};

pub fn run(
    cache: Option<&Path>,
    refresh: bool,
    parallel: bool,
    snapshot: Option<&Path>,
    config: &ThesaurusConfig,
) -> CliResult<()> {
    let t = open_snapshot(config, snapshot)?;
    let cache_path = config.cache_path(cache);
    let options = MatrixOptions {
        parallel: parallel || config.matrix.parallel,
        ..config.matrix
    };

    let sims = load_or_build(cache_path.as_deref(), &t, refresh, options)?;
    println!(
        "{} concepts, {} non-zero entries",
        sims.len().to_string().bold(),
        sims.matrix.nnz()
    );
    if let Some(path) = &cache_path {
        println!("Cache: {}", path.display());
    }
    Ok(())
}
