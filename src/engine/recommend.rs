//! Recommendation Scorer
//!
//! Ranks the skills a learner is ready for. Ranking is a total order so the
//! same inputs always produce the same list.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::core::graph::GraphIndex;
use crate::core::skill::SkillLevel;
use crate::learner::mastery::MasteryLevel;
use crate::learner::state::LearnerState;

/// A ranked next-skill suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub skill_id: String,
    pub name: String,
    pub level: SkillLevel,
    /// Why this skill was suggested; never empty
    pub reasons: Vec<String>,
    /// Copied verbatim from the catalog
    pub estimated_time: String,
}

/// A skill is a candidate when it is not yet mastered and every direct
/// prerequisite is at least practiced.
fn is_eligible(index: &GraphIndex, state: &LearnerState, idx: usize) -> bool {
    let skill = index.skill_at(idx);
    if state.mastery_level(&skill.id) >= MasteryLevel::Mastered {
        return false;
    }
    index
        .prerequisite_indices(idx)
        .iter()
        .all(|&p| state.mastery_level(&index.skill_at(p).id) >= MasteryLevel::Practiced)
}

/// For each skill position, the goals (in id order) whose closure contains it.
fn goal_relevance(index: &GraphIndex, state: &LearnerState) -> BTreeMap<usize, Vec<usize>> {
    let mut relevance: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for goal_id in state.goals() {
        let Some(goal) = index.index_of(goal_id) else {
            continue;
        };
        relevance.entry(goal).or_default().push(goal);
        for &member in index.closure_indices(goal) {
            relevance.entry(member).or_default().push(goal);
        }
    }
    relevance
}

/// Up to `count` ranked recommendations. Never fails; an empty catalog or a
/// fully mastered learner yields an empty list.
#[must_use]
pub fn recommend(index: &GraphIndex, state: &LearnerState, count: usize) -> Vec<Recommendation> {
    if count == 0 || index.is_empty() {
        return Vec::new();
    }

    let relevance = goal_relevance(index, state);

    let mut candidates: Vec<usize> = (0..index.len())
        .filter(|&idx| is_eligible(index, state, idx))
        .collect();

    // Position order is id order, so the final key is the id tie-break.
    candidates.sort_by_key(|&idx| {
        (
            Reverse(relevance.contains_key(&idx)),
            index.skill_at(idx).level,
            Reverse(index.dependent_indices(idx).len()),
            idx,
        )
    });
    candidates.truncate(count);

    let recommendations: Vec<Recommendation> = candidates
        .into_iter()
        .map(|idx| {
            let skill = index.skill_at(idx);
            Recommendation {
                skill_id: skill.id.clone(),
                name: skill.name.clone(),
                level: skill.level,
                reasons: reasons_for(index, state, idx, relevance.get(&idx)),
                estimated_time: skill.estimated_time.clone(),
            }
        })
        .collect();

    debug!(
        learner = %state.learner_id(),
        requested = count,
        returned = recommendations.len(),
        "ranked recommendations"
    );
    recommendations
}

fn reasons_for(
    index: &GraphIndex,
    state: &LearnerState,
    idx: usize,
    goals: Option<&Vec<usize>>,
) -> Vec<String> {
    let mut reasons = Vec::new();

    for &goal in goals.into_iter().flatten() {
        if goal == idx {
            reasons.push(format!("this is your goal: {}", index.skill_at(goal).name));
        } else {
            reasons.push(format!("required for your goal: {}", index.skill_at(goal).name));
        }
    }

    match index.dependent_indices(idx).len() {
        0 => {}
        1 => reasons.push("unlocks 1 further skill".to_string()),
        n => reasons.push(format!("unlocks {n} further skills")),
    }

    if state.mastery_level(&index.skill_at(idx).id) > MasteryLevel::Unseen {
        reasons.push("continue where you left off".to_string());
    }

    if reasons.is_empty() {
        let reason = if index.prerequisite_indices(idx).is_empty() {
            format!("{} starting point", index.skill_at(idx).level)
        } else {
            "all prerequisites practiced".to_string()
        };
        reasons.push(reason);
    }

    reasons
}
