//! Caller-side result cache
//!
//! Recommendations and pathways are pure functions of the index and a learner
//! snapshot, so a result can be reused for as long as the snapshot is
//! unchanged. Entries are keyed by the whole snapshot plus the request.
//! The version alone is not enough: two snapshots derived from the same base
//! by different events share a version. Nothing is invalidated by
//! observation, a changed snapshot simply misses.
//!
//! A cache only pays off when it outlives a single lookup, so it is meant for
//! embedders that hold an [`crate::engine::Engine`] across many requests.

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

use crate::engine::pathway::LearningPathway;
use crate::engine::recommend::Recommendation;
use crate::learner::state::LearnerState;

/// Default number of cached results
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// The request half of a cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Request {
    Recommend { count: usize },
    Pathway { goal: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    state: LearnerState,
    request: Request,
}

impl CacheKey {
    fn new(state: &LearnerState, request: Request) -> Self {
        Self {
            state: state.clone(),
            request,
        }
    }
}

#[derive(Debug, Clone)]
enum CachedResult {
    Recommendations(Vec<Recommendation>),
    Pathway(Option<LearningPathway>),
}

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Thread-safe LRU over engine results.
pub struct ResultCache {
    entries: Mutex<LruCache<CacheKey, CachedResult>>,
    stats: Mutex<CacheStats>,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl ResultCache {
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            stats: Mutex::new(CacheStats::default()),
        }
    }

    /// Cached recommendations for this snapshot, computing on a miss.
    pub fn recommendations<F>(&self, state: &LearnerState, count: usize, compute: F) -> Vec<Recommendation>
    where
        F: FnOnce() -> Vec<Recommendation>,
    {
        let key = CacheKey::new(state, Request::Recommend { count });
        if let Some(CachedResult::Recommendations(hit)) = self.lookup(&key) {
            return hit;
        }
        let fresh = compute();
        self.entries
            .lock()
            .put(key, CachedResult::Recommendations(fresh.clone()));
        fresh
    }

    /// Cached pathway for this snapshot and goal, computing on a miss.
    /// Unknown goals are cached too.
    pub fn pathway<F>(&self, state: &LearnerState, goal: &str, compute: F) -> Option<LearningPathway>
    where
        F: FnOnce() -> Option<LearningPathway>,
    {
        let key = CacheKey::new(
            state,
            Request::Pathway {
                goal: goal.to_string(),
            },
        );
        if let Some(CachedResult::Pathway(hit)) = self.lookup(&key) {
            return hit;
        }
        let fresh = compute();
        self.entries
            .lock()
            .put(key, CachedResult::Pathway(fresh.clone()));
        fresh
    }

    fn lookup(&self, key: &CacheKey) -> Option<CachedResult> {
        let hit = self.entries.lock().get(key).cloned();
        let mut stats = self.stats.lock();
        if hit.is_some() {
            stats.hits += 1;
        } else {
            stats.misses += 1;
        }
        hit
    }

    /// Drop every entry for a learner, whatever its snapshot.
    pub fn forget_learner(&self, learner_id: &str) -> usize {
        let mut entries = self.entries.lock();
        let stale: Vec<CacheKey> = entries
            .iter()
            .filter(|(key, _)| key.state.learner_id() == learner_id)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &stale {
            entries.pop(key);
        }
        stale.len()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        *self.stats.lock()
    }
}
