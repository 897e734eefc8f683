use crate::commands::{open_snapshot, resolve};
use crate::config::ThesaurusConfig;
use crate::error::CliResult;
use std::path::Path;

pub fn run(a: &str, b: &str, snapshot: Option<&Path>, config: &ThesaurusConfig) -> CliResult<()> {
    let t = open_snapshot(config, snapshot)?;
    let score = t.lin_similarity(resolve(&t, a)?, resolve(&t, b)?)?;
    // -0.0 prints as "-0"
    println!("{}", score + 0.0);
    Ok(())
}
