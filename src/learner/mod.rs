//! Learner mastery and progression state

pub mod level;
pub mod mastery;
pub mod state;

pub use level::LevelTable;
pub use mastery::{MasteryLevel, MasteryRecord, MasteryUpdate};
pub use state::{EarnedBadge, GrowthArea, LearnerState, Streak};
