//! Skill data structures

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed set of competency categories a skill belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Communication,
    Collaboration,
    Leadership,
    Strategy,
    Technical,
    SelfManagement,
}

impl SkillCategory {
    pub const fn all() -> &'static [Self] {
        &[
            Self::Communication,
            Self::Collaboration,
            Self::Leadership,
            Self::Strategy,
            Self::Technical,
            Self::SelfManagement,
        ]
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Communication => "communication",
            Self::Collaboration => "collaboration",
            Self::Leadership => "leadership",
            Self::Strategy => "strategy",
            Self::Technical => "technical",
            Self::SelfManagement => "self_management",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordinal rung of a skill. Declaration order is the learning order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Foundational,
    Bridge,
    Advanced,
}

impl SkillLevel {
    pub const fn all() -> &'static [Self] {
        &[Self::Foundational, Self::Bridge, Self::Advanced]
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Foundational => "foundational",
            Self::Bridge => "bridge",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog skill with prerequisites normalized to skill ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// Stable, unique skill ID
    pub id: String,
    /// Human-readable name
    pub name: String,
    pub category: SkillCategory,
    pub level: SkillLevel,
    /// Prerequisite skill ids, in declaration order
    #[serde(default)]
    pub prerequisites: Vec<String>,
    /// Opaque duration hint such as "2 hours" or "1-2 weeks"
    #[serde(default)]
    pub estimated_time: String,
    /// Practice scenario ids associated with this skill
    #[serde(default)]
    pub scenarios: Vec<String>,
}

impl Skill {
    /// Create a foundational communication skill with no prerequisites.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: SkillCategory::Communication,
            level: SkillLevel::Foundational,
            prerequisites: Vec::new(),
            estimated_time: String::new(),
            scenarios: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_category(mut self, category: SkillCategory) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub const fn with_level(mut self, level: SkillLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_prerequisites<I, S>(mut self, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites = prerequisites.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_estimated_time(mut self, hint: impl Into<String>) -> Self {
        self.estimated_time = hint.into();
        self
    }

    #[must_use]
    pub fn with_scenarios<I, S>(mut self, scenarios: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scenarios = scenarios.into_iter().map(Into::into).collect();
        self
    }
}

/// Raw catalog entry as authored.
///
/// Prerequisites may name other skills either by id or by display name; the
/// catalog loader normalizes them into a [`Skill`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDefinition {
    pub id: String,
    pub name: String,
    pub category: SkillCategory,
    pub level: SkillLevel,
    /// Prerequisite references (skill id or display name)
    #[serde(default, alias = "requires")]
    pub prerequisites: Vec<String>,
    #[serde(default, alias = "time", alias = "estimated")]
    pub estimated_time: String,
    #[serde(default, alias = "scenario_ids")]
    pub scenarios: Vec<String>,
}

impl From<Skill> for SkillDefinition {
    fn from(skill: Skill) -> Self {
        Self {
            id: skill.id,
            name: skill.name,
            category: skill.category,
            level: skill.level,
            prerequisites: skill.prerequisites,
            estimated_time: skill.estimated_time,
            scenarios: skill.scenarios,
        }
    }
}
