//! Learner progression and recommendation engine
//!
//! Every operation reads a shared, immutable [`GraphIndex`] plus a
//! caller-supplied [`LearnerState`] and returns a value; nothing here holds a
//! learner or mutates the index.

pub mod cache;
pub mod pathway;
pub mod progression;
pub mod recommend;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::core::graph::GraphIndex;
use crate::learner::state::LearnerState;

pub use cache::{CacheStats, Request, ResultCache};
pub use pathway::{synthesize, LearningPathway, PathwayStep};
pub use progression::{
    BadgeMilestone, ProgressionEffect, ProgressionEvent, ProgressionRules, Transition,
};
pub use recommend::{recommend, Recommendation};

/// An index bound to the progression rules it runs with.
///
/// Cheap to clone; clones share the index.
#[derive(Debug, Clone)]
pub struct Engine {
    index: Arc<GraphIndex>,
    rules: ProgressionRules,
}

impl Engine {
    #[must_use]
    pub fn new(index: GraphIndex, rules: ProgressionRules) -> Self {
        Self::from_shared(Arc::new(index), rules)
    }

    #[must_use]
    pub const fn from_shared(index: Arc<GraphIndex>, rules: ProgressionRules) -> Self {
        Self { index, rules }
    }

    #[must_use]
    pub fn index(&self) -> &GraphIndex {
        &self.index
    }

    #[must_use]
    pub fn shared_index(&self) -> Arc<GraphIndex> {
        Arc::clone(&self.index)
    }

    #[must_use]
    pub const fn rules(&self) -> &ProgressionRules {
        &self.rules
    }

    #[must_use]
    pub fn recommend(&self, state: &LearnerState, count: usize) -> Vec<Recommendation> {
        recommend::recommend(&self.index, state, count)
    }

    #[must_use]
    pub fn synthesize(&self, state: &LearnerState, goal: &str) -> Option<LearningPathway> {
        pathway::synthesize(&self.index, state, goal)
    }

    /// [`Self::recommend`] through a result cache.
    #[must_use]
    pub fn recommend_cached(
        &self,
        cache: &ResultCache,
        state: &LearnerState,
        count: usize,
    ) -> Vec<Recommendation> {
        cache.recommendations(state, count, || self.recommend(state, count))
    }

    /// [`Self::synthesize`] through a result cache.
    #[must_use]
    pub fn synthesize_cached(
        &self,
        cache: &ResultCache,
        state: &LearnerState,
        goal: &str,
    ) -> Option<LearningPathway> {
        cache.pathway(state, goal, || self.synthesize(state, goal))
    }

    /// Apply one event.
    #[must_use]
    pub fn apply(&self, state: &LearnerState, event: &ProgressionEvent, at: DateTime<Utc>) -> Transition {
        progression::apply(&self.index, &self.rules, state, event, at)
    }

    /// Apply events in order; effects are concatenated.
    #[must_use]
    pub fn apply_all<'e, I>(&self, state: &LearnerState, events: I, at: DateTime<Utc>) -> Transition
    where
        I: IntoIterator<Item = &'e ProgressionEvent>,
    {
        events.into_iter().fold(
            Transition {
                state: state.clone(),
                effects: Vec::new(),
            },
            |mut acc, event| {
                let step = self.apply(&acc.state, event, at);
                acc.state = step.state;
                acc.effects.extend(step.effects);
                acc
            },
        )
    }
}
