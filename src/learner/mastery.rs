//! Per-skill mastery tracking

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How well a learner knows a skill. Declaration order is progression order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasteryLevel {
    #[default]
    Unseen,
    InProgress,
    Practiced,
    Mastered,
}

impl MasteryLevel {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unseen => "unseen",
            Self::InProgress => "in_progress",
            Self::Practiced => "practiced",
            Self::Mastered => "mastered",
        }
    }
}

impl fmt::Display for MasteryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded assessment of a skill.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MasteryUpdate {
    pub level: MasteryLevel,
    pub confidence: u8,
    pub at: DateTime<Utc>,
}

/// A learner's state for one skill.
///
/// Updated in place; every update, including regressions, is appended to
/// `history`, so nothing is ever erased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MasteryRecord {
    pub level: MasteryLevel,
    /// Confidence score, 0..=100
    pub confidence: u8,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub history: Vec<MasteryUpdate>,
}

/// Upper bound of the confidence scale.
pub const MAX_CONFIDENCE: u8 = 100;

impl MasteryRecord {
    #[must_use]
    pub fn new(level: MasteryLevel, confidence: u8, at: DateTime<Utc>) -> Self {
        let confidence = confidence.min(MAX_CONFIDENCE);
        Self {
            level,
            confidence,
            updated_at: at,
            history: vec![MasteryUpdate {
                level,
                confidence,
                at,
            }],
        }
    }

    /// Record a new assessment. Returns false when it changes nothing.
    pub fn update(&mut self, level: MasteryLevel, confidence: u8, at: DateTime<Utc>) -> bool {
        let confidence = confidence.min(MAX_CONFIDENCE);
        if self.level == level && self.confidence == confidence {
            return false;
        }
        self.level = level;
        self.confidence = confidence;
        self.updated_at = at;
        self.history.push(MasteryUpdate {
            level,
            confidence,
            at,
        });
        true
    }

    #[must_use]
    pub fn is_at_least(&self, level: MasteryLevel) -> bool {
        self.level >= level
    }
}
