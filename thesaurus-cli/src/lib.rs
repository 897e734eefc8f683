//! Thesaurus CLI library.
//!
//! Types and command handlers behind the `thesaurus` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

use cli::{Cli, Commands};
use config::ThesaurusConfig;

/// Dispatch a parsed [`Cli`] to the appropriate command handler.
pub fn run(cli: Cli) -> error::CliResult<()> {
    let config = ThesaurusConfig::load(cli.config.as_deref())?;
    let snapshot = cli.snapshot.as_deref();

    match cli.command {
        Commands::Load {
            taxonomy,
            frequencies,
            refresh,
        } => commands::load::run(&taxonomy, frequencies.as_deref(), refresh, snapshot, &config),

        Commands::Concepts { leaves } => commands::concepts::run(leaves, snapshot, &config),

        Commands::Labels { iri, lang } => {
            commands::labels::run(&iri, lang.as_deref(), snapshot, &config)
        }

        Commands::Lcs { a, b } => commands::lcs::run(&a, &b, snapshot, &config),

        Commands::Similarity { a, b } => commands::similarity::run(&a, &b, snapshot, &config),

        Commands::Matrix {
            cache,
            refresh,
            parallel,
        } => commands::matrix::run(cache.as_deref(), refresh, parallel, snapshot, &config),

        Commands::Outdated { history } => commands::outdated::run(&history, snapshot, &config),
    }
}
