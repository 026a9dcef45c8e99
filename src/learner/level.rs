//! Experience → level table

use serde::{Deserialize, Serialize};

/// Reference thresholds: level `n` starts at `DEFAULT_LEVEL_THRESHOLDS[n - 1]` XP.
pub const DEFAULT_LEVEL_THRESHOLDS: &[u64] = &[0, 100, 250, 500, 1000, 2000, 3500, 5000, 7500, 10000];

/// Ascending experience thresholds; the first entry must be 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelTable(Vec<u64>);

impl Default for LevelTable {
    fn default() -> Self {
        Self(DEFAULT_LEVEL_THRESHOLDS.to_vec())
    }
}

impl LevelTable {
    /// Build a table, returning `None` unless thresholds are strictly
    /// ascending and start at 0.
    #[must_use]
    pub fn new(thresholds: Vec<u64>) -> Option<Self> {
        if thresholds.first() != Some(&0) {
            return None;
        }
        if thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return None;
        }
        Some(Self(thresholds))
    }

    /// Level reached with `experience` points (1-based).
    #[must_use]
    pub fn level_for(&self, experience: u64) -> u32 {
        let reached = self.0.partition_point(|&threshold| threshold <= experience);
        u32::try_from(reached.max(1)).unwrap_or(u32::MAX)
    }

    /// Points still needed for the next level, or `None` at the top.
    #[must_use]
    pub fn experience_to_next(&self, experience: u64) -> Option<u64> {
        self.0
            .iter()
            .find(|&&threshold| threshold > experience)
            .map(|threshold| threshold - experience)
    }

    #[must_use]
    pub fn max_level(&self) -> u32 {
        u32::try_from(self.0.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn thresholds(&self) -> &[u64] {
        &self.0
    }
}
