use colored::Colorize;
use std::fmt;
use std::process;

/// Exit codes for the CLI.
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_USAGE: i32 = 2;

/// Unified error type for CLI operations.
pub enum CliError {
    /// Taxonomy, frequency or similarity failure
    Core(thesaurus_core::Error),
    /// Matrix build or cache failure
    Matrix(thesaurus_matrix::MatrixError),
    /// Configuration file issues.
    Config(String),
    /// Bad file path, unreadable input, parse failure.
    Input(String),
    /// Concept not present in the taxonomy.
    NotFound(String),
    /// No snapshot configured or the snapshot file is missing.
    NoSnapshot(Option<String>),
    /// Argument / usage errors.
    Usage(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Core(e) => write!(f, "{} {e}", "error:".red().bold()),
            CliError::Matrix(e) => write!(f, "{} {e}", "error:".red().bold()),
            CliError::Config(msg) => write!(f, "{} {msg}", "error:".red().bold()),
            CliError::Input(msg) => write!(f, "{} {msg}", "error:".red().bold()),
            CliError::NotFound(msg) => write!(f, "{} {msg}", "error:".red().bold()),
            CliError::NoSnapshot(None) => write!(
                f,
                "{} no taxonomy snapshot configured\n  {} pass --snapshot <path> or set [paths] snapshot in thesaurus.toml",
                "error:".red().bold(),
                "help:".cyan().bold(),
            ),
            CliError::NoSnapshot(Some(path)) => write!(
                f,
                "{} taxonomy snapshot not found: {path}\n  {} run 'thesaurus load --taxonomy <file>' to create it",
                "error:".red().bold(),
                "help:".cyan().bold(),
            ),
            CliError::Usage(msg) => write!(f, "{} {msg}", "error:".red().bold()),
        }
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<thesaurus_core::Error> for CliError {
    fn from(e: thesaurus_core::Error) -> Self {
        match e {
            thesaurus_core::Error::UnknownConcept(iri) => {
                CliError::NotFound(format!("concept '{iri}' not found"))
            }
            other => CliError::Core(other),
        }
    }
}

impl From<thesaurus_matrix::MatrixError> for CliError {
    fn from(e: thesaurus_matrix::MatrixError) -> Self {
        match e {
            thesaurus_matrix::MatrixError::Core(inner) => inner.into(),
            other => CliError::Matrix(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Input(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Input(format!("JSON error: {e}"))
    }
}

impl From<toml::de::Error> for CliError {
    fn from(e: toml::de::Error) -> Self {
        CliError::Config(format!("invalid config: {e}"))
    }
}

/// Print error and exit with the appropriate code.
pub fn exit_with_error(err: CliError) -> ! {
    eprintln!("{err}");
    let code = match &err {
        CliError::Usage(_) => EXIT_USAGE,
        _ => EXIT_ERROR,
    };
    process::exit(code)
}

pub type CliResult<T> = std::result::Result<T, CliError>;
