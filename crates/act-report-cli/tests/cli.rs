use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn act_report() -> Command {
    let mut cmd = Command::cargo_bin("act-report").unwrap();
    cmd.env_remove("ACT_REPORT_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn write_catalog(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("testcases.json");
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn help_lists_commands() {
    act_report()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("rules"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn rules_lists_ids_in_discovery_order_with_counts() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(
        dir.path(),
        r#"{"testcases":[
            {"ruleId":"a","url":"u1"},
            {"ruleId":"b","url":"u2"},
            {"ruleId":"a","url":"u3"}
        ]}"#,
    );

    act_report()
        .arg("rules")
        .arg("--catalog-path")
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("a\t2\nb\t1\n"));
}

#[test]
fn config_prints_resolved_configuration() {
    act_report()
        .arg("config")
        .env("ACT_REPORT_OUTPUT__PREFIX", "engine")
        .assert()
        .success()
        .stdout(predicate::str::contains("wcag-act-rules/testcases.json"))
        .stdout(predicate::str::contains("\"prefix\": \"engine\""));
}

#[test]
fn malformed_catalog_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path(), r#"{"rules":[]}"#);

    act_report()
        .arg("run")
        .arg("--catalog-path")
        .arg(&catalog)
        .arg("--output-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed test-case catalog"));
}

#[test]
fn unreachable_engine_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path(), r#"{"testcases":[]}"#);

    act_report()
        .arg("run")
        .arg("--catalog-path")
        .arg(&catalog)
        .arg("--output-dir")
        .arg(dir.path())
        .env("ACT_REPORT_ENGINE__ENDPOINT", "http://127.0.0.1:9")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Run aborted"));

    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1, "only the catalog file should be present");
}

#[test]
fn verbose_flag_takes_precedence_over_rust_log() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path(), r#"{"testcases":[]}"#);

    act_report()
        .arg("--verbose")
        .arg("run")
        .arg("--catalog-path")
        .arg(&catalog)
        .arg("--output-dir")
        .arg(dir.path())
        .env("RUST_LOG", "error")
        .env("ACT_REPORT_ENGINE__ENDPOINT", "http://127.0.0.1:9")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Test cases loaded"))
        .stdout(predicate::str::contains("Run state"));
}

#[test]
fn launch_options_must_be_a_json_object() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path(), r#"{"testcases":[]}"#);

    act_report()
        .arg("run")
        .arg("--catalog-path")
        .arg(&catalog)
        .env("ACT_REPORT_ENGINE__LAUNCH_OPTIONS", "[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("launch_options"));
}
