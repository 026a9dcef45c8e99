//! Progression State Machine
//!
//! Activity events are the only way a [`LearnerState`] changes. Each event is
//! a total function: it never fails, and an event that changes nothing yields
//! an empty effect list and an identical state, version included.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::graph::GraphIndex;
use crate::core::skill::SkillLevel;
use crate::learner::level::LevelTable;
use crate::learner::mastery::{MasteryLevel, MasteryRecord};
use crate::learner::state::{EarnedBadge, GrowthArea, LearnerState};

const MAX_GROWTH_SCORE: u8 = 100;

/// Learner activity fed to the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressionEvent {
    /// A practice scenario was finished; repeat submissions are no-ops
    ScenarioCompleted { scenario_id: String },
    /// Self-assessed score for a growth area, 0..=100
    GrowthAreaScored { area_id: String, score: u8 },
    BadgeAwarded {
        badge_id: String,
        #[serde(default)]
        name: Option<String>,
    },
    ExperienceAdded { amount: u64 },
    /// Daily activity check-in, by calendar date
    StreakTick { today: NaiveDate },
    MasteryAssessed {
        skill_id: String,
        level: MasteryLevel,
        #[serde(default)]
        confidence: u8,
    },
    GoalAdded { skill_id: String },
    GoalRemoved { skill_id: String },
}

impl ProgressionEvent {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ScenarioCompleted { .. } => "scenario_completed",
            Self::GrowthAreaScored { .. } => "growth_area_scored",
            Self::BadgeAwarded { .. } => "badge_awarded",
            Self::ExperienceAdded { .. } => "experience_added",
            Self::StreakTick { .. } => "streak_tick",
            Self::MasteryAssessed { .. } => "mastery_assessed",
            Self::GoalAdded { .. } => "goal_added",
            Self::GoalRemoved { .. } => "goal_removed",
        }
    }
}

/// Observable consequence of a transition, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum ProgressionEffect {
    ScenarioRecorded { scenario_id: String, total_completed: usize },
    ExperienceGained { amount: u64, total: u64 },
    LevelChanged { from: u32, to: u32 },
    BadgeAwarded { badge_id: String },
    StreakStarted,
    StreakExtended { current: u32 },
    StreakReset { previous: u32 },
    MasteryChanged {
        skill_id: String,
        from: MasteryLevel,
        to: MasteryLevel,
    },
    GoalAdded { skill_id: String },
    GoalRemoved { skill_id: String },
    GrowthAreaUpdated { area_id: String, score: u8, delta: Option<i16> },
}

/// Result of applying one or more events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub state: LearnerState,
    pub effects: Vec<ProgressionEffect>,
}

impl Transition {
    /// True when the event changed nothing
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.effects.is_empty()
    }

    #[must_use]
    pub fn badges_awarded(&self) -> Vec<&str> {
        self.effects
            .iter()
            .filter_map(|e| match e {
                ProgressionEffect::BadgeAwarded { badge_id } => Some(badge_id.as_str()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn experience_gained(&self) -> u64 {
        self.effects
            .iter()
            .map(|e| match e {
                ProgressionEffect::ExperienceGained { amount, .. } => *amount,
                _ => 0,
            })
            .sum()
    }
}

/// Badge granted when a counter reaches `threshold`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeMilestone {
    pub threshold: u32,
    pub badge_id: String,
}

impl BadgeMilestone {
    #[must_use]
    pub fn new(threshold: u32, badge_id: impl Into<String>) -> Self {
        Self {
            threshold,
            badge_id: badge_id.into(),
        }
    }
}

/// Award amounts and thresholds the state machine runs with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionRules {
    pub scenario_xp: u64,
    pub badge_bonus_xp: u64,
    pub growth_multiplier: u64,
    pub levels: LevelTable,
    /// Sorted by threshold
    pub scenario_badges: Vec<BadgeMilestone>,
    /// Sorted by threshold
    pub streak_badges: Vec<BadgeMilestone>,
}

impl Default for ProgressionRules {
    fn default() -> Self {
        Self {
            scenario_xp: 50,
            badge_bonus_xp: 25,
            growth_multiplier: 5,
            levels: LevelTable::default(),
            scenario_badges: vec![
                BadgeMilestone::new(1, "first-scenario"),
                BadgeMilestone::new(5, "scenario-explorer"),
            ],
            streak_badges: vec![
                BadgeMilestone::new(3, "streak-3"),
                BadgeMilestone::new(7, "streak-7"),
                BadgeMilestone::new(30, "streak-30"),
            ],
        }
    }
}

/// Apply one event to a snapshot.
///
/// `index` is consulted only to reject events naming unknown skills; `at` is
/// the wall-clock stamp recorded on badges and mastery updates.
#[must_use]
pub fn apply(
    index: &GraphIndex,
    rules: &ProgressionRules,
    state: &LearnerState,
    event: &ProgressionEvent,
    at: DateTime<Utc>,
) -> Transition {
    let mut step = Step {
        rules,
        state: state.clone(),
        effects: Vec::new(),
        at,
    };

    match event {
        ProgressionEvent::ScenarioCompleted { scenario_id } => step.complete_scenario(scenario_id),
        ProgressionEvent::GrowthAreaScored { area_id, score } => step.score_growth_area(area_id, *score),
        ProgressionEvent::BadgeAwarded { badge_id, name } => step.award_badge(badge_id, name.clone()),
        ProgressionEvent::ExperienceAdded { amount } => step.grant_experience(*amount),
        ProgressionEvent::StreakTick { today } => step.tick_streak(*today),
        ProgressionEvent::MasteryAssessed {
            skill_id,
            level,
            confidence,
        } => {
            if index.contains(skill_id) {
                step.assess_mastery(skill_id, *level, *confidence);
            } else {
                warn!(skill_id = %skill_id, "ignoring mastery assessment for unknown skill");
            }
        }
        ProgressionEvent::GoalAdded { skill_id } => {
            if index.contains(skill_id) {
                step.add_goal(skill_id);
            } else {
                warn!(skill_id = %skill_id, "ignoring unknown goal skill");
            }
        }
        ProgressionEvent::GoalRemoved { skill_id } => step.remove_goal(skill_id),
    }

    step.finish(state, event)
}

/// Working copy for a single transition.
struct Step<'a> {
    rules: &'a ProgressionRules,
    state: LearnerState,
    effects: Vec<ProgressionEffect>,
    at: DateTime<Utc>,
}

impl Step<'_> {
    fn finish(mut self, original: &LearnerState, event: &ProgressionEvent) -> Transition {
        if self.effects.is_empty() {
            return Transition {
                state: original.clone(),
                effects: Vec::new(),
            };
        }
        self.state.version = self.state.version.saturating_add(1);
        debug!(
            learner = %self.state.learner_id,
            event = event.kind(),
            effects = self.effects.len(),
            version = self.state.version,
            "applied progression event"
        );
        Transition {
            state: self.state,
            effects: self.effects,
        }
    }

    fn grant_experience(&mut self, amount: u64) {
        if amount == 0 {
            return;
        }
        let before = self.state.level;
        self.state.experience = self.state.experience.saturating_add(amount);
        self.effects.push(ProgressionEffect::ExperienceGained {
            amount,
            total: self.state.experience,
        });

        let after = self.rules.levels.level_for(self.state.experience);
        if after != before {
            self.state.level = after;
            self.effects
                .push(ProgressionEffect::LevelChanged { from: before, to: after });
        }
    }

    fn award_badge(&mut self, badge_id: &str, name: Option<String>) {
        if self.state.has_badge(badge_id) {
            return;
        }
        self.state.badges.push(EarnedBadge {
            id: badge_id.to_string(),
            name,
            awarded_at: self.at,
        });
        self.effects.push(ProgressionEffect::BadgeAwarded {
            badge_id: badge_id.to_string(),
        });
        self.grant_experience(self.rules.badge_bonus_xp);
    }

    /// Award every milestone badge whose threshold `count` has reached.
    fn award_milestones(&mut self, milestones: &[BadgeMilestone], count: u32) {
        for milestone in milestones.iter().filter(|m| m.threshold <= count) {
            self.award_badge(&milestone.badge_id, None);
        }
    }

    fn complete_scenario(&mut self, scenario_id: &str) {
        if !self.state.completed_scenarios.insert(scenario_id.to_string()) {
            return;
        }
        let total = self.state.completed_scenarios.len();
        self.effects.push(ProgressionEffect::ScenarioRecorded {
            scenario_id: scenario_id.to_string(),
            total_completed: total,
        });
        self.grant_experience(self.rules.scenario_xp);

        let count = u32::try_from(total).unwrap_or(u32::MAX);
        let rules = self.rules;
        self.award_milestones(&rules.scenario_badges, count);
    }

    fn score_growth_area(&mut self, area_id: &str, score: u8) {
        let score = score.min(MAX_GROWTH_SCORE);
        let multiplier = self.rules.growth_multiplier;

        let (delta, gained) = match self.state.growth_areas.get_mut(area_id) {
            Some(area) => {
                if area.score == score {
                    return;
                }
                let delta = i16::from(score) - i16::from(area.score);
                area.score = score;
                area.last_delta = Some(delta);
                area.updated_at = self.at;
                let gained = u64::try_from(delta.max(0)).unwrap_or(0).saturating_mul(multiplier);
                (Some(delta), gained)
            }
            None => {
                self.state.growth_areas.insert(
                    area_id.to_string(),
                    GrowthArea {
                        score,
                        level: SkillLevel::Foundational,
                        last_delta: None,
                        updated_at: self.at,
                    },
                );
                (None, u64::from(score).saturating_mul(multiplier))
            }
        };

        self.effects.push(ProgressionEffect::GrowthAreaUpdated {
            area_id: area_id.to_string(),
            score,
            delta,
        });
        self.grant_experience(gained);
    }

    fn tick_streak(&mut self, today: NaiveDate) {
        let streak = &mut self.state.streak;
        let effect = match streak.last_activity {
            Some(last) if last == today => return,
            Some(last) if today.signed_duration_since(last).num_days() == 1 => {
                streak.current = streak.current.saturating_add(1);
                ProgressionEffect::StreakExtended {
                    current: streak.current,
                }
            }
            Some(_) => {
                let previous = streak.current;
                streak.current = 1;
                ProgressionEffect::StreakReset { previous }
            }
            None => {
                streak.current = 1;
                ProgressionEffect::StreakStarted
            }
        };
        streak.last_activity = Some(today);
        streak.longest = streak.longest.max(streak.current);
        let current = streak.current;
        self.effects.push(effect);

        let rules = self.rules;
        self.award_milestones(&rules.streak_badges, current);
    }

    fn assess_mastery(&mut self, skill_id: &str, level: MasteryLevel, confidence: u8) {
        let from = self.state.mastery_level(skill_id);
        let at = self.at;
        let changed = match self.state.mastery.get_mut(skill_id) {
            Some(record) => record.update(level, confidence, at),
            None => {
                self.state
                    .mastery
                    .insert(skill_id.to_string(), MasteryRecord::new(level, confidence, at));
                true
            }
        };
        if changed {
            self.effects.push(ProgressionEffect::MasteryChanged {
                skill_id: skill_id.to_string(),
                from,
                to: level,
            });
        }
    }

    fn add_goal(&mut self, skill_id: &str) {
        if self.state.goals.insert(skill_id.to_string()) {
            self.effects.push(ProgressionEffect::GoalAdded {
                skill_id: skill_id.to_string(),
            });
        }
    }

    fn remove_goal(&mut self, skill_id: &str) {
        if self.state.goals.remove(skill_id) {
            self.effects.push(ProgressionEffect::GoalRemoved {
                skill_id: skill_id.to_string(),
            });
        }
    }
}
