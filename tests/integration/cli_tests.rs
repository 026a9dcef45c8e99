use predicates::prelude::*;

use super::fixture::Workspace;

#[test]
fn test_help_lists_commands() {
    let ws = Workspace::new();
    ws.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("recommend"))
        .stdout(predicate::str::contains("pathway"))
        .stdout(predicate::str::contains("new-learner"));
}

#[test]
fn test_version() {
    let ws = Workspace::new();
    ws.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_validate_json_summary() {
    let ws = Workspace::new();
    let json = ws.json(&["validate", "--catalog", ws.catalog_arg()]);

    assert_eq!(json["status"], "ok");
    assert_eq!(json["data"]["valid"], true);
    assert_eq!(json["data"]["skills"], 4);
    assert_eq!(json["data"]["renamed_references"], 1);
    assert_eq!(json["data"]["by_level"]["foundational"], 2);
    assert_eq!(json["data"]["malformed_hints"][0]["skill_id"], "planning");
    assert_eq!(json["warnings"].as_array().unwrap().len(), 1);
}

#[test]
fn test_validate_human_output() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["-O", "plain", "validate", "--catalog", ws.catalog_arg()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Catalog OK"))
        .stdout(predicate::str::contains("whenever"));
}

#[test]
fn test_catalog_from_env() {
    let ws = Workspace::new();
    ws.cmd()
        .env("SKILLPATH_CATALOG", &ws.catalog)
        .args(["-O", "json", "show", "feedback"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"listening\""));
}

#[test]
fn test_quiet_ignores_rust_log() {
    let ws = Workspace::new();
    let output = ws
        .cmd()
        .env("RUST_LOG", "trace")
        .args(["-q", "validate", "--catalog", ws.catalog_arg()])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(output.stderr.is_empty(), "{}", String::from_utf8_lossy(&output.stderr));

    // Without --quiet the same filter produces log lines.
    ws.cmd()
        .env("RUST_LOG", "trace")
        .args(["validate", "--catalog", ws.catalog_arg()])
        .assert()
        .success()
        .stderr(predicate::str::is_empty().not());
}

#[test]
fn test_show_lists_neighbours() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["-O", "plain", "show", "feedback", "--catalog", ws.catalog_arg()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Giving Feedback"))
        .stdout(predicate::str::contains("listening"))
        .stdout(predicate::str::contains("coaching"));
}

#[test]
fn test_recommend_prefers_goal_chain() {
    let ws = Workspace::new();
    let json = ws.json(&[
        "recommend",
        "--catalog",
        ws.catalog_arg(),
        "--learner",
        ws.learner_arg(),
        "-n",
        "2",
    ]);

    let recs = json["data"]["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0]["skill_id"], "listening");
    assert_eq!(recs[0]["reasons"][0], "required for your goal: Coaching");
    assert_eq!(recs[1]["skill_id"], "planning");
}

#[test]
fn test_pathway_orders_prerequisites_first() {
    let ws = Workspace::new();
    let json = ws.json(&[
        "pathway",
        "coaching",
        "--catalog",
        ws.catalog_arg(),
        "--learner",
        ws.learner_arg(),
    ]);

    let steps: Vec<&str> = json["data"]["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["skill_id"].as_str().unwrap())
        .collect();
    assert_eq!(steps, vec!["listening", "feedback", "coaching"]);
    assert_eq!(json["data"]["total_time"], "5h 45m");
}

#[test]
fn test_new_learner_prints_snapshot() {
    let ws = Workspace::new();
    let output = ws
        .cmd()
        .args(["new-learner", "bo", "--goal", "feedback"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(snapshot["learner_id"], "bo");
    assert_eq!(snapshot["goals"][0], "feedback");
    assert_eq!(snapshot["level"], 1);
}

#[test]
fn test_new_learner_refuses_overwrite_without_force() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["new-learner", "ana", "--out", ws.learner_arg()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    ws.cmd()
        .args(["-O", "json", "new-learner", "ana", "--out", ws.learner_arg(), "--force"])
        .assert()
        .success();
    let raw = std::fs::read_to_string(&ws.learner).unwrap();
    assert!(!raw.contains("coaching"));
}
