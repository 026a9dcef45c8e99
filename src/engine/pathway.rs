//! Pathway Synthesizer
//!
//! Orders the unfinished part of a goal's prerequisite closure so that no
//! skill comes before one of its unmet prerequisites.

use std::collections::BTreeSet;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::core::graph::GraphIndex;
use crate::core::skill::SkillLevel;
use crate::learner::mastery::MasteryLevel;
use crate::learner::state::LearnerState;

/// One skill on a pathway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathwayStep {
    pub skill_id: String,
    pub name: String,
    pub level: SkillLevel,
    /// Raw catalog hint
    pub estimated_time: String,
}

/// Ordered skills from the next actionable one to the goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LearningPathway {
    pub goal: String,
    pub steps: Vec<PathwayStep>,
    /// Sum of the parsed hints of every step
    #[serde(with = "humantime_serde")]
    pub total_time: Duration,
    /// Steps whose hint could not be parsed and counted as zero
    pub unparsed_hints: Vec<String>,
}

impl LearningPathway {
    #[must_use]
    pub fn skill_ids(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.skill_id.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Build the pathway toward `goal`, or `None` when the goal is unknown.
#[must_use]
pub fn synthesize(index: &GraphIndex, state: &LearnerState, goal: &str) -> Option<LearningPathway> {
    let goal_idx = index.index_of(goal)?;

    let remaining: BTreeSet<usize> = index
        .closure_indices(goal_idx)
        .iter()
        .copied()
        .chain(std::iter::once(goal_idx))
        .filter(|&idx| state.mastery_level(&index.skill_at(idx).id) < MasteryLevel::Practiced)
        .collect();

    if remaining.is_empty() {
        debug!(goal = %goal, "goal already within reach; pathway is the goal alone");
        return Some(LearningPathway {
            goal: goal.to_string(),
            steps: vec![step(index, goal_idx)],
            total_time: Duration::ZERO,
            unparsed_hints: Vec::new(),
        });
    }

    let order = topological_order(index, &remaining);

    let mut total_time = Duration::ZERO;
    let mut unparsed_hints = Vec::new();
    for &idx in &order {
        match index.parsed_time_at(idx) {
            Some(time) => total_time = total_time.saturating_add(time),
            None => unparsed_hints.push(index.skill_at(idx).id.clone()),
        }
    }

    let pathway = LearningPathway {
        goal: goal.to_string(),
        steps: order.iter().map(|&idx| step(index, idx)).collect(),
        total_time,
        unparsed_hints,
    };
    debug!(
        goal = %goal,
        steps = pathway.len(),
        total_secs = pathway.total_time.as_secs(),
        "synthesized pathway"
    );
    Some(pathway)
}

/// Kahn's algorithm restricted to `remaining`; ready skills leave in
/// (level, id) order.
fn topological_order(index: &GraphIndex, remaining: &BTreeSet<usize>) -> Vec<usize> {
    let mut in_degree: Vec<usize> = vec![0; index.len()];
    for &idx in remaining {
        in_degree[idx] = index
            .prerequisite_indices(idx)
            .iter()
            .filter(|&p| remaining.contains(p))
            .count();
    }

    let mut ready: BTreeSet<(SkillLevel, usize)> = remaining
        .iter()
        .filter(|&&idx| in_degree[idx] == 0)
        .map(|&idx| (index.skill_at(idx).level, idx))
        .collect();

    let mut order = Vec::with_capacity(remaining.len());
    while let Some((_, idx)) = ready.pop_first() {
        order.push(idx);
        for &dependent in index.dependent_indices(idx) {
            if !remaining.contains(&dependent) {
                continue;
            }
            in_degree[dependent] -= 1;
            if in_degree[dependent] == 0 {
                ready.insert((index.skill_at(dependent).level, dependent));
            }
        }
    }

    order
}

fn step(index: &GraphIndex, idx: usize) -> PathwayStep {
    let skill = index.skill_at(idx);
    PathwayStep {
        skill_id: skill.id.clone(),
        name: skill.name.clone(),
        level: skill.level,
        estimated_time: skill.estimated_time.clone(),
    }
}
