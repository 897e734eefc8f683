use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "thesaurus", about = "Taxonomy similarity CLI", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to config file (defaults to ./thesaurus.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Taxonomy snapshot to read or write (overrides [paths] snapshot)
    #[arg(long, global = true)]
    pub snapshot: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read a taxonomy document, aggregate frequencies and write the snapshot
    Load {
        /// JSON-LD taxonomy document
        #[arg(long)]
        taxonomy: PathBuf,

        /// JSON array of {"concept", "frequency", "mainLabel"} records;
        /// without it descendant counts are used
        #[arg(long)]
        frequencies: Option<PathBuf>,

        /// Rebuild even if the snapshot already exists
        #[arg(long)]
        refresh: bool,
    },

    /// List concepts in the snapshot
    Concepts {
        /// Only list leaves
        #[arg(long)]
        leaves: bool,
    },

    /// Show the labels of a concept
    Labels {
        /// Concept IRI
        iri: String,

        /// Label language (defaults to [taxonomy] language)
        #[arg(long)]
        lang: Option<String>,
    },

    /// Show the least common subsumer of two concepts
    Lcs {
        a: String,
        b: String,
    },

    /// Lin similarity of two concepts
    Similarity {
        a: String,
        b: String,
    },

    /// Build or load the pairwise similarity matrix
    Matrix {
        /// Cache file (overrides [paths] similarity_cache)
        #[arg(long)]
        cache: Option<PathBuf>,

        /// Rebuild even if the cache already exists
        #[arg(long)]
        refresh: bool,

        /// Sweep rows in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// Check a change history for edits made after the snapshot was written
    Outdated {
        /// JSON array of {"timestamp", "description"} records
        #[arg(long)]
        history: PathBuf,
    },
}
