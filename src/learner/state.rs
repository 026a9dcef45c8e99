//! Learner State
//!
//! A long-lived per-learner record. Fields are readable through accessors and
//! writable only by the progression state machine, which returns a new state
//! per transition.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::skill::SkillLevel;
use crate::error::{Result, SkillpathError};
use crate::learner::mastery::{MasteryLevel, MasteryRecord};

/// Consecutive-day activity streak.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Streak {
    pub current: u32,
    pub longest: u32,
    /// Calendar date of the last counted activity
    pub last_activity: Option<NaiveDate>,
}

/// A badge the learner holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EarnedBadge {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub awarded_at: DateTime<Utc>,
}

/// Self-assessed growth area score.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GrowthArea {
    /// Score, 0..=100
    pub score: u8,
    pub level: SkillLevel,
    /// Signed change from the previous score; `None` until the first update
    #[serde(default)]
    pub last_delta: Option<i16>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable per-user progression record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LearnerState {
    pub(crate) learner_id: String,
    /// Bumped once per effective transition
    #[serde(default)]
    pub(crate) version: u64,
    #[serde(default)]
    pub(crate) mastery: BTreeMap<String, MasteryRecord>,
    #[serde(default)]
    pub(crate) goals: BTreeSet<String>,
    #[serde(default)]
    pub(crate) completed_scenarios: BTreeSet<String>,
    #[serde(default)]
    pub(crate) growth_areas: BTreeMap<String, GrowthArea>,
    #[serde(default)]
    pub(crate) experience: u64,
    #[serde(default = "default_level")]
    pub(crate) level: u32,
    #[serde(default)]
    pub(crate) streak: Streak,
    /// Insertion-ordered, ids unique
    #[serde(default)]
    pub(crate) badges: Vec<EarnedBadge>,
}

const fn default_level() -> u32 {
    1
}

impl LearnerState {
    /// Fresh state for a learner who just established a profile.
    pub fn new(learner_id: impl Into<String>) -> Self {
        Self {
            learner_id: learner_id.into(),
            version: 0,
            mastery: BTreeMap::new(),
            goals: BTreeSet::new(),
            completed_scenarios: BTreeSet::new(),
            growth_areas: BTreeMap::new(),
            experience: 0,
            level: default_level(),
            streak: Streak::default(),
            badges: Vec::new(),
        }
    }

    /// Seed goal skills at profile creation.
    #[must_use]
    pub fn with_goals<I, S>(mut self, goals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.goals = goals.into_iter().map(Into::into).collect();
        self
    }

    /// Parse a JSON snapshot supplied by the profile store.
    pub fn from_json(raw: &str) -> Result<Self> {
        let state: Self = serde_json::from_str(raw)?;
        state.validate()?;
        Ok(state)
    }

    /// Check invariants a hand-edited or foreign snapshot might break.
    pub fn validate(&self) -> Result<()> {
        if self.learner_id.trim().is_empty() {
            return Err(SkillpathError::InvalidLearner("learner_id is empty".to_string()));
        }
        let mut seen = HashSet::with_capacity(self.badges.len());
        for badge in &self.badges {
            if !seen.insert(badge.id.as_str()) {
                return Err(SkillpathError::InvalidLearner(format!(
                    "badge '{}' is held twice",
                    badge.id
                )));
            }
        }
        if self.streak.longest < self.streak.current {
            return Err(SkillpathError::InvalidLearner(format!(
                "longest streak {} is below current streak {}",
                self.streak.longest, self.streak.current
            )));
        }
        if let Some((id, _)) = self.mastery.iter().find(|(_, r)| r.confidence > 100) {
            return Err(SkillpathError::InvalidLearner(format!(
                "confidence for '{id}' exceeds 100"
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn learner_id(&self) -> &str {
        &self.learner_id
    }

    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn mastery(&self, skill_id: &str) -> Option<&MasteryRecord> {
        self.mastery.get(skill_id)
    }

    /// Mastery level of a skill; absent records read as `Unseen`.
    #[must_use]
    pub fn mastery_level(&self, skill_id: &str) -> MasteryLevel {
        self.mastery
            .get(skill_id)
            .map_or(MasteryLevel::Unseen, |r| r.level)
    }

    #[must_use]
    pub const fn mastery_records(&self) -> &BTreeMap<String, MasteryRecord> {
        &self.mastery
    }

    #[must_use]
    pub const fn goals(&self) -> &BTreeSet<String> {
        &self.goals
    }

    #[must_use]
    pub const fn completed_scenarios(&self) -> &BTreeSet<String> {
        &self.completed_scenarios
    }

    #[must_use]
    pub fn has_completed(&self, scenario_id: &str) -> bool {
        self.completed_scenarios.contains(scenario_id)
    }

    #[must_use]
    pub const fn growth_areas(&self) -> &BTreeMap<String, GrowthArea> {
        &self.growth_areas
    }

    #[must_use]
    pub const fn experience(&self) -> u64 {
        self.experience
    }

    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub const fn streak(&self) -> &Streak {
        &self.streak
    }

    #[must_use]
    pub fn badges(&self) -> &[EarnedBadge] {
        &self.badges
    }

    #[must_use]
    pub fn has_badge(&self, badge_id: &str) -> bool {
        self.badges.iter().any(|b| b.id == badge_id)
    }
}
