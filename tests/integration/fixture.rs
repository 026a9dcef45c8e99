use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

pub const CATALOG_YAML: &str = r"
skills:
  - id: listening
    name: Active Listening
    category: communication
    level: foundational
    estimated_time: 45 min
    scenarios: [standup-check-in]
  - id: feedback
    name: Giving Feedback
    category: communication
    level: bridge
    prerequisites: [Active Listening]
    estimated_time: 1-2 hours
  - id: coaching
    name: Coaching
    category: leadership
    level: advanced
    prerequisites: [feedback]
    estimated_time: 3 hours
  - id: planning
    name: Weekly Planning
    category: self_management
    level: foundational
    estimated_time: whenever
";

/// Isolated working directory holding a catalog and a learner snapshot.
///
/// Every command runs with `HOME` and `XDG_CONFIG_HOME` inside the temp dir,
/// so no user config leaks in.
pub struct Workspace {
    pub dir: TempDir,
    pub catalog: PathBuf,
    pub learner: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let catalog = dir.path().join("skills.yaml");
        std::fs::write(&catalog, CATALOG_YAML).unwrap();

        let learner = dir.path().join("ana.json");
        std::fs::write(
            &learner,
            r#"{"learner_id":"ana","goals":["coaching"]}"#,
        )
        .unwrap();

        Self {
            dir,
            catalog,
            learner,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("skillpath").unwrap();
        cmd.current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join(".config"))
            .env_remove("SKILLPATH_CONFIG")
            .env_remove("SKILLPATH_CATALOG")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Run with `-O json` and parse stdout, asserting success.
    pub fn json(&self, args: &[&str]) -> Value {
        let output = self.cmd().args(["-O", "json"]).args(args).output().unwrap();
        assert!(
            output.status.success(),
            "command {args:?} failed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).unwrap()
    }

    pub fn catalog_arg(&self) -> &str {
        self.catalog.to_str().unwrap()
    }

    pub fn learner_arg(&self) -> &str {
        self.learner.to_str().unwrap()
    }
}
