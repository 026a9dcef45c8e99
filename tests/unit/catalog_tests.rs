use std::fs;

use tempfile::TempDir;

use skillpath::config::Config;
use skillpath::error::{ErrorCode, SkillpathError};
use skillpath::{Catalog, GraphIndex, Skill, SkillLevel};

const CATALOG_YAML: &str = r"
skills:
  - id: listening
    name: Active Listening
    category: communication
    level: foundational
    estimated_time: 45 min
  - id: feedback
    name: Giving Feedback
    category: communication
    level: bridge
    requires: [Active Listening]
    time: 1-2 hours
  - id: coaching
    name: Coaching
    category: leadership
    level: advanced
    prerequisites: [feedback, listening]
    estimated_time: sometime soon
";

#[test]
fn yaml_catalog_normalizes_names_and_reports_hints() {
    let (index, report) = Catalog::from_yaml(CATALOG_YAML).unwrap().into_index().unwrap();

    assert_eq!(index.len(), 3);
    assert_eq!(report.renamed_references, 1);
    assert_eq!(report.malformed_hints.len(), 1);
    assert_eq!(report.malformed_hints[0].skill_id, "coaching");

    let prereqs: Vec<&str> = index
        .prerequisites("feedback")
        .unwrap()
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(prereqs, vec!["listening"]);

    let closure = index.prerequisite_closure("coaching").unwrap();
    assert_eq!(closure.into_iter().collect::<Vec<_>>(), vec!["feedback", "listening"]);

    assert_eq!(index.roots().len(), 1);
    assert_eq!(index.by_level(SkillLevel::Advanced).len(), 1);
    assert!(index.parsed_time("coaching").is_none());
}

#[test]
fn cycle_is_rejected_with_members() {
    let err = GraphIndex::build(vec![
        Skill::new("a", "A").with_prerequisites(["c"]),
        Skill::new("b", "B").with_prerequisites(["a"]),
        Skill::new("c", "C").with_prerequisites(["b"]),
    ])
    .unwrap_err();

    match &err {
        SkillpathError::CyclicPrerequisite { cycle, .. } => {
            for id in ["a", "b", "c"] {
                assert!(cycle.iter().any(|member| member == id), "{id} missing from {cycle:?}");
            }
        }
        other => panic!("expected cycle, got {other:?}"),
    }
    assert_eq!(err.code(), ErrorCode::PrerequisiteCycle);
}

#[test]
fn self_prerequisite_is_a_cycle() {
    let err = GraphIndex::build(vec![Skill::new("a", "A").with_prerequisites(["a"])]).unwrap_err();
    assert!(matches!(err, SkillpathError::CyclicPrerequisite { .. }));
}

#[test]
fn dangling_reference_names_both_ends() {
    let err = GraphIndex::build(vec![Skill::new("a", "A").with_prerequisites(["ghost"])]).unwrap_err();
    match err {
        SkillpathError::DanglingPrerequisite {
            skill_id,
            prerequisite,
        } => {
            assert_eq!(skill_id, "a");
            assert_eq!(prerequisite, "ghost");
        }
        other => panic!("expected dangling reference, got {other:?}"),
    }
}

#[test]
fn empty_catalog_is_valid() {
    let (index, report) = Catalog::default().into_index().unwrap();
    assert!(index.is_empty());
    assert_eq!(report.skill_count, 0);
}

#[test]
fn project_config_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    fs::write(
        &path,
        r#"
[progression]
scenario_xp = 80
level_thresholds = [0, 50, 500]

[recommend]
default_count = 7
"#,
    )
    .unwrap();

    let config = Config::load(Some(&path), dir.path()).unwrap();
    assert_eq!(config.progression.scenario_xp, 80);
    assert_eq!(config.recommend.default_count, 7);
    // untouched fields keep their defaults
    assert_eq!(config.progression.badge_bonus_xp, 25);

    let rules = config.rules().unwrap();
    assert_eq!(rules.scenario_xp, 80);
    assert_eq!(rules.levels.level_for(60), 2);
}

#[test]
fn explicit_config_must_exist() {
    let dir = TempDir::new().unwrap();
    let err = Config::load(Some(&dir.path().join("nope.toml")), dir.path()).unwrap_err();
    assert!(matches!(err, SkillpathError::MissingConfig(_)));
}

#[test]
fn invalid_level_thresholds_fail_validation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[progression]\nlevel_thresholds = [10, 5]\n").unwrap();

    let err = Config::load(Some(&path), dir.path()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::ConfigInvalid);
}

#[test]
fn env_overrides_apply_through_lookup() {
    let mut config = Config::default();
    config
        .apply_env_overrides_from(|key| match key {
            "SKILLPATH_RECOMMEND_COUNT" => Some("9".to_string()),
            "SKILLPATH_BADGE_BONUS_XP" => Some("0".to_string()),
            _ => None,
        })
        .unwrap();
    assert_eq!(config.recommend.default_count, 9);
    assert_eq!(config.progression.badge_bonus_xp, 0);

    let err = config
        .apply_env_overrides_from(|key| (key == "SKILLPATH_SCENARIO_XP").then(|| "lots".to_string()))
        .unwrap_err();
    assert!(matches!(err, SkillpathError::Config(_)));
}
