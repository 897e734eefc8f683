use crate::commands::{open_snapshot, resolve};
use crate::config::ThesaurusConfig;
use crate::error::CliResult;
use std::path::Path;

pub fn run(a: &str, b: &str, snapshot: Option<&Path>, config: &ThesaurusConfig) -> CliResult<()> {
    let t = open_snapshot(config, snapshot)?;
    let lcs = t.lcs(resolve(&t, a)?, resolve(&t, b)?);
    println!("{}\t{}", t.iri(lcs.concept), lcs.frequency);
    Ok(())
}
