use predicates::prelude::*;
use serde_json::Value;

use super::fixture::Workspace;

fn json_failure(ws: &Workspace, args: &[&str]) -> Value {
    let output = ws.cmd().args(["-O", "json"]).args(args).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_cyclic_catalog_reports_cycle() {
    let ws = Workspace::new();
    let catalog = ws.write(
        "cyclic.yaml",
        r"
- {id: a, name: A, category: technical, level: foundational, prerequisites: [b]}
- {id: b, name: B, category: technical, level: foundational, prerequisites: [a]}
",
    );

    let json = json_failure(&ws, &["validate", "--catalog", catalog.to_str().unwrap()]);
    let error = &json["status"]["error"];
    assert_eq!(error["code"], "PREREQUISITE_CYCLE");
    assert_eq!(error["numeric_code"], 102);
    assert_eq!(error["recoverable"], false);
    assert_eq!(error["category"], "catalog");
}

#[test]
fn test_dangling_reference_human_error() {
    let ws = Workspace::new();
    let catalog = ws.write(
        "dangling.json",
        r#"[{"id":"a","name":"A","category":"technical","level":"bridge","prerequisites":["ghost"]}]"#,
    );

    ws.cmd()
        .args(["validate", "--catalog", catalog.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown prerequisite 'ghost'"));
}

#[test]
fn test_unknown_skill_suggests_close_ids() {
    let ws = Workspace::new();
    let json = json_failure(&ws, &["show", "coachng", "--catalog", ws.catalog_arg()]);

    let error = &json["status"]["error"];
    assert_eq!(error["code"], "SKILL_NOT_FOUND");
    assert_eq!(error["context"]["skill_id"], "coachng");
    assert_eq!(error["context"]["similar"][0], "coaching");
    assert!(error["suggestion"].as_str().unwrap().contains("coaching"));
}

#[test]
fn test_pathway_unknown_goal() {
    let ws = Workspace::new();
    let json = json_failure(
        &ws,
        &[
            "pathway",
            "juggling",
            "--catalog",
            ws.catalog_arg(),
            "--learner",
            ws.learner_arg(),
        ],
    );
    assert_eq!(json["status"]["error"]["code"], "SKILL_NOT_FOUND");
}

#[test]
fn test_malformed_learner_snapshot() {
    let ws = Workspace::new();
    let learner = ws.write("broken.json", "{\"learner_id\": ");

    let json = json_failure(
        &ws,
        &[
            "recommend",
            "--catalog",
            ws.catalog_arg(),
            "--learner",
            learner.to_str().unwrap(),
        ],
    );
    assert_eq!(json["status"]["error"]["code"], "LEARNER_INVALID");
}

#[test]
fn test_unsupported_catalog_extension() {
    let ws = Workspace::new();
    let catalog = ws.write("skills.csv", "id,name\n");

    let json = json_failure(&ws, &["validate", "--catalog", catalog.to_str().unwrap()]);
    assert_eq!(json["status"]["error"]["code"], "UNSUPPORTED_FORMAT");
}

#[test]
fn test_missing_explicit_config() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["--config", "nowhere.toml", "validate", "--catalog", ws.catalog_arg()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nowhere.toml"));
}

#[test]
fn test_invalid_project_config() {
    let ws = Workspace::new();
    ws.write("skillpath.toml", "[progression]\nlevel_thresholds = [0, 100, 50]\n");

    let json = json_failure(&ws, &["validate", "--catalog", ws.catalog_arg()]);
    assert_eq!(json["status"]["error"]["code"], "CONFIG_INVALID");
}
