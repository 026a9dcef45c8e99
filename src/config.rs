use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::progression::{BadgeMilestone, ProgressionRules};
use crate::error::{Result, SkillpathError};
use crate::learner::level::{LevelTable, DEFAULT_LEVEL_THRESHOLDS};

/// Project-level config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "skillpath.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub progression: ProgressionConfig,
    #[serde(default)]
    pub recommend: RecommendConfig,
}

impl Config {
    /// Layered load: defaults, then the global file, then the project file,
    /// then environment overrides. An explicit path (argument or
    /// `SKILLPATH_CONFIG`) replaces the two file layers and must exist.
    pub fn load(explicit_path: Option<&Path>, project_root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("SKILLPATH_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            let patch = Self::load_patch(&path)?.ok_or_else(|| {
                SkillpathError::MissingConfig(format!("config file {} not found", path.display()))
            })?;
            config.merge_patch(patch);
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_patch(&project_root.join(PROJECT_CONFIG_FILE))? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides_from(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Path of the per-user config file, if the platform has a config dir.
    #[must_use]
    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("skillpath").join("config.toml"))
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        match Self::global_path() {
            Some(path) => Self::load_patch(&path),
            None => Ok(None),
        }
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| SkillpathError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| SkillpathError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.progression {
            self.progression.merge(patch);
        }
        if let Some(patch) = patch.recommend {
            self.recommend.merge(patch);
        }
    }

    /// Apply `SKILLPATH_*` overrides read through `lookup`.
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = env_u64(&lookup, "SKILLPATH_SCENARIO_XP")? {
            self.progression.scenario_xp = value;
        }
        if let Some(value) = env_u64(&lookup, "SKILLPATH_BADGE_BONUS_XP")? {
            self.progression.badge_bonus_xp = value;
        }
        if let Some(value) = env_u64(&lookup, "SKILLPATH_GROWTH_MULTIPLIER")? {
            self.progression.growth_multiplier = value;
        }
        if let Some(value) = env_usize(&lookup, "SKILLPATH_RECOMMEND_COUNT")? {
            self.recommend.default_count = value;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.progression.level_table()?;
        for (name, milestones) in [
            ("scenario_badges", &self.progression.scenario_badges),
            ("streak_badges", &self.progression.streak_badges),
        ] {
            if let Some(bad) = milestones.iter().find(|m| m.badge_id.trim().is_empty()) {
                return Err(SkillpathError::Config(format!(
                    "progression.{name}: threshold {} has an empty badge id",
                    bad.threshold
                )));
            }
        }
        Ok(())
    }

    /// Progression rules built from the `[progression]` section.
    pub fn rules(&self) -> Result<ProgressionRules> {
        ProgressionRules::try_from(&self.progression)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionConfig {
    #[serde(default)]
    pub scenario_xp: u64,
    #[serde(default)]
    pub badge_bonus_xp: u64,
    #[serde(default)]
    pub growth_multiplier: u64,
    #[serde(default)]
    pub level_thresholds: Vec<u64>,
    #[serde(default)]
    pub scenario_badges: Vec<BadgeMilestone>,
    #[serde(default)]
    pub streak_badges: Vec<BadgeMilestone>,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        let rules = ProgressionRules::default();
        Self {
            scenario_xp: rules.scenario_xp,
            badge_bonus_xp: rules.badge_bonus_xp,
            growth_multiplier: rules.growth_multiplier,
            level_thresholds: DEFAULT_LEVEL_THRESHOLDS.to_vec(),
            scenario_badges: rules.scenario_badges,
            streak_badges: rules.streak_badges,
        }
    }
}

impl ProgressionConfig {
    fn merge(&mut self, patch: ProgressionPatch) {
        if let Some(value) = patch.scenario_xp {
            self.scenario_xp = value;
        }
        if let Some(value) = patch.badge_bonus_xp {
            self.badge_bonus_xp = value;
        }
        if let Some(value) = patch.growth_multiplier {
            self.growth_multiplier = value;
        }
        if let Some(value) = patch.level_thresholds {
            self.level_thresholds = value;
        }
        if let Some(value) = patch.scenario_badges {
            self.scenario_badges = value;
        }
        if let Some(value) = patch.streak_badges {
            self.streak_badges = value;
        }
    }

    fn level_table(&self) -> Result<LevelTable> {
        LevelTable::new(self.level_thresholds.clone()).ok_or_else(|| {
            SkillpathError::Config(format!(
                "progression.level_thresholds must start at 0 and be strictly ascending, got {:?}",
                self.level_thresholds
            ))
        })
    }
}

impl TryFrom<&ProgressionConfig> for ProgressionRules {
    type Error = SkillpathError;

    fn try_from(config: &ProgressionConfig) -> Result<Self> {
        let sorted = |milestones: &[BadgeMilestone]| {
            let mut milestones = milestones.to_vec();
            milestones.sort_by(|a, b| a.threshold.cmp(&b.threshold).then_with(|| a.badge_id.cmp(&b.badge_id)));
            milestones
        };
        Ok(Self {
            scenario_xp: config.scenario_xp,
            badge_bonus_xp: config.badge_bonus_xp,
            growth_multiplier: config.growth_multiplier,
            levels: config.level_table()?,
            scenario_badges: sorted(&config.scenario_badges),
            streak_badges: sorted(&config.streak_badges),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendConfig {
    #[serde(default)]
    pub default_count: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self { default_count: 3 }
    }
}

impl RecommendConfig {
    fn merge(&mut self, patch: RecommendPatch) {
        if let Some(value) = patch.default_count {
            self.default_count = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub progression: Option<ProgressionPatch>,
    pub recommend: Option<RecommendPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ProgressionPatch {
    pub scenario_xp: Option<u64>,
    pub badge_bonus_xp: Option<u64>,
    pub growth_multiplier: Option<u64>,
    pub level_thresholds: Option<Vec<u64>>,
    pub scenario_badges: Option<Vec<BadgeMilestone>>,
    pub streak_badges: Option<Vec<BadgeMilestone>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RecommendPatch {
    pub default_count: Option<usize>,
}

fn env_u64<F>(lookup: &F, key: &str) -> Result<Option<u64>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|err| SkillpathError::Config(format!("invalid {key} value {value}: {err}"))),
        None => Ok(None),
    }
}

fn env_usize<F>(lookup: &F, key: &str) -> Result<Option<usize>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|err| SkillpathError::Config(format!("invalid {key} value {value}: {err}"))),
        None => Ok(None),
    }
}
