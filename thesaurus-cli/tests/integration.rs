use assert_cmd::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const TAXONOMY: &str = r#"{
  "@context": {"skos": "http://www.w3.org/2004/02/skos/core#"},
  "@graph": [
    {"@id": "ex:s", "@type": "skos:ConceptScheme"},
    {
      "@id": "ex:A",
      "@type": "skos:Concept",
      "skos:topConceptOf": {"@id": "ex:s"},
      "skos:prefLabel": [
        {"@value": "Alpha", "@language": "en"},
        {"@value": "Alpha-de", "@language": "de"}
      ],
      "skos:altLabel": {"@value": "First", "@language": "en"}
    },
    {
      "@id": "ex:A1",
      "@type": "skos:Concept",
      "skos:broader": {"@id": "ex:A"},
      "skos:prefLabel": {"@value": "Alpha One", "@language": "en"}
    },
    {"@id": "ex:B", "@type": "skos:Concept", "skos:topConceptOf": {"@id": "ex:s"}}
  ]
}"#;

const FREQUENCIES: &str = r#"[
  {"concept": "ex:A1", "frequency": 4, "mainLabel": "Alpha One"},
  {"concept": "ex:B", "frequency": 6, "mainLabel": "B"}
]"#;

/// `thesaurus` command running in an isolated temp directory.
fn thesaurus_cmd(work_dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("thesaurus");
    cmd.current_dir(work_dir.path());
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Temp dir holding a loaded `the.jsonld` snapshot
fn loaded() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("taxonomy.jsonld"), TAXONOMY).unwrap();
    fs::write(tmp.path().join("freqs.json"), FREQUENCIES).unwrap();
    thesaurus_cmd(&tmp)
        .args([
            "load",
            "--taxonomy",
            "taxonomy.jsonld",
            "--frequencies",
            "freqs.json",
            "--snapshot",
            "the.jsonld",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Root frequency: 10"))
        .stdout(predicate::str::contains("Snapshot: the.jsonld"));
    assert!(tmp.path().join("the.jsonld").exists());
    tmp
}

// ============================================================================
// Happy path tests
// ============================================================================

#[test]
fn help_flag() {
    cargo_bin_cmd!("thesaurus")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Taxonomy similarity CLI"))
        .stdout(predicate::str::contains("load"))
        .stdout(predicate::str::contains("similarity"))
        .stdout(predicate::str::contains("matrix"));
}

#[test]
fn verbose_quiet_conflict() {
    cargo_bin_cmd!("thesaurus")
        .args(["--verbose", "--quiet", "concepts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn similarity_of_scenario_pairs() {
    let tmp = loaded();
    thesaurus_cmd(&tmp)
        .args(["--snapshot", "the.jsonld", "similarity", "ex:A1", "ex:B"])
        .assert()
        .success()
        .stdout("0\n");
    thesaurus_cmd(&tmp)
        .args(["--snapshot", "the.jsonld", "similarity", "ex:A1", "ex:A"])
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn lcs_of_disjoint_branches_is_root() {
    let tmp = loaded();
    thesaurus_cmd(&tmp)
        .args(["--snapshot", "the.jsonld", "lcs", "ex:A1", "ex:B"])
        .assert()
        .success()
        .stdout(":T\t10\n");
}

#[test]
fn labels_filtered_by_language() {
    let tmp = loaded();
    thesaurus_cmd(&tmp)
        .args(["--snapshot", "the.jsonld", "labels", "ex:A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Alpha\""))
        .stdout(predicate::str::contains("\"First\""))
        .stdout(predicate::str::contains("Alpha-de").not());
    thesaurus_cmd(&tmp)
        .args(["--snapshot", "the.jsonld", "labels", "ex:A", "--lang", "de"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alpha-de"))
        .stdout(predicate::str::contains("First").not());
}

#[test]
fn concepts_and_leaves() {
    let tmp = loaded();
    thesaurus_cmd(&tmp)
        .args(["--snapshot", "the.jsonld", "concepts"])
        .assert()
        .success()
        .stdout("ex:A\nex:A1\nex:B\n");
    thesaurus_cmd(&tmp)
        .args(["--snapshot", "the.jsonld", "concepts", "--leaves"])
        .assert()
        .success()
        .stdout("ex:A1\nex:B\n");
}

#[test]
fn matrix_writes_and_reuses_cache() {
    let tmp = loaded();
    for _ in 0..2 {
        thesaurus_cmd(&tmp)
            .args(["--snapshot", "the.jsonld", "matrix", "--cache", "sims.bin"])
            .assert()
            .success()
            .stdout(predicate::str::contains("4 concepts, 6 non-zero entries"));
    }
    assert!(tmp.path().join("sims.bin").exists());

    thesaurus_cmd(&tmp)
        .args([
            "--snapshot",
            "the.jsonld",
            "matrix",
            "--cache",
            "sims.bin",
            "--refresh",
            "--parallel",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 concepts, 6 non-zero entries"));
}

#[test]
fn load_reuses_existing_snapshot() {
    let tmp = loaded();
    fs::remove_file(tmp.path().join("taxonomy.jsonld")).unwrap();

    // The source document is gone but the snapshot is reused
    thesaurus_cmd(&tmp)
        .args(["load", "--taxonomy", "taxonomy.jsonld", "--snapshot", "the.jsonld"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Root frequency: 10"));

    // Refreshing has to read the source again
    thesaurus_cmd(&tmp)
        .args([
            "load",
            "--taxonomy",
            "taxonomy.jsonld",
            "--snapshot",
            "the.jsonld",
            "--refresh",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot read taxonomy"));
}

#[test]
fn config_file_supplies_paths() {
    let tmp = loaded();
    fs::write(
        tmp.path().join("thesaurus.toml"),
        "[paths]\nsnapshot = \"the.jsonld\"\nsimilarity_cache = \"cache/sims.bin\"\n",
    )
    .unwrap();

    thesaurus_cmd(&tmp)
        .args(["concepts", "--leaves"])
        .assert()
        .success()
        .stdout("ex:A1\nex:B\n");
    thesaurus_cmd(&tmp).arg("matrix").assert().success();
    assert!(tmp.path().join("cache/sims.bin").exists());
}

#[test]
fn outdated_reports_later_changes() {
    let tmp = loaded();
    fs::write(
        tmp.path().join("future.json"),
        r#"[{"timestamp": "2999-01-01T00:00:00Z", "description": "renamed ex:B"}]"#,
    )
    .unwrap();
    fs::write(
        tmp.path().join("past.json"),
        r#"[{"timestamp": "2000-01-01T00:00:00Z", "description": "initial import"}]"#,
    )
    .unwrap();

    thesaurus_cmd(&tmp)
        .args(["--snapshot", "the.jsonld", "outdated", "--history", "future.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("outdated:"))
        .stdout(predicate::str::contains("renamed ex:B"))
        .stdout(predicate::str::contains(
            "thesaurus load --taxonomy <file> --refresh",
        ));
    thesaurus_cmd(&tmp)
        .args(["--snapshot", "the.jsonld", "outdated", "--history", "past.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("up to date"));
}

// ============================================================================
// Error tests
// ============================================================================

#[test]
fn unknown_concept_is_reported() {
    let tmp = loaded();
    thesaurus_cmd(&tmp)
        .args(["--snapshot", "the.jsonld", "similarity", "ex:A1", "ex:nope"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("concept 'ex:nope' not found"));
}

#[test]
fn missing_snapshot_gives_help() {
    let tmp = TempDir::new().unwrap();
    thesaurus_cmd(&tmp)
        .arg("concepts")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no taxonomy snapshot configured"))
        .stderr(predicate::str::contains("help:"));
    thesaurus_cmd(&tmp)
        .args(["--snapshot", "missing.jsonld", "concepts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("snapshot not found: missing.jsonld"));
}

#[test]
fn refresh_without_snapshot_is_usage_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("taxonomy.jsonld"), TAXONOMY).unwrap();
    thesaurus_cmd(&tmp)
        .args(["load", "--taxonomy", "taxonomy.jsonld", "--refresh"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--refresh needs a snapshot"));

    // Without --refresh the taxonomy is loaded in memory only
    thesaurus_cmd(&tmp)
        .args(["load", "--taxonomy", "taxonomy.jsonld"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Snapshot:").not());
}

#[test]
fn missing_config_override_fails() {
    let tmp = TempDir::new().unwrap();
    thesaurus_cmd(&tmp)
        .args(["--config", "nope.toml", "concepts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn corrupt_cache_is_an_error_until_refreshed() {
    let tmp = loaded();
    fs::write(tmp.path().join("sims.bin"), b"garbage").unwrap();
    thesaurus_cmd(&tmp)
        .args(["--snapshot", "the.jsonld", "matrix", "--cache", "sims.bin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid similarity cache format"));
    thesaurus_cmd(&tmp)
        .args(["--snapshot", "the.jsonld", "matrix", "--cache", "sims.bin", "--refresh"])
        .assert()
        .success();
}
