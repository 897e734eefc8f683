use crate::commands::require_snapshot;
use crate::config::ThesaurusConfig;
use crate::error::CliResult;
use colored::Colorize;
use std::path::Path;
use thesaurus_core::{check_outdated, FileHistorySource};

pub fn run(history: &Path, snapshot: Option<&Path>, config: &ThesaurusConfig) -> CliResult<()> {
    let path = require_snapshot(config, snapshot)?;
    match check_outdated(&path, &FileHistorySource::new(history))? {
        None => println!("Snapshot is up to date"),
        Some(events) => {
            println!(
                "{} {} change(s) since the snapshot was written",
                "outdated:".yellow().bold(),
                events.len()
            );
            for event in events {
                println!("  {}  {}", event.timestamp.to_rfc3339(), event.description);
            }
            println!(
                "Run 'thesaurus load --taxonomy <file> --refresh' to rebuild {}",
                path.display()
            );
        }
    }
    Ok(())
}
