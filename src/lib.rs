//! skillpath - learner progression and skill recommendation engine
//!
//! A catalog of skills linked by prerequisite edges is validated into an
//! immutable [`GraphIndex`]. Against it, the [`Engine`] ranks what a learner
//! should study next, synthesizes ordered pathways toward goal skills, and
//! applies activity events to a [`LearnerState`] snapshot.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod learner;

pub use crate::core::catalog::{Catalog, CatalogReport};
pub use crate::core::graph::GraphIndex;
pub use crate::core::skill::{Skill, SkillCategory, SkillLevel};
pub use engine::{
    Engine, LearningPathway, ProgressionEffect, ProgressionEvent, ProgressionRules, Recommendation,
    Transition,
};
pub use error::{Result, SkillpathError};
pub use learner::{LearnerState, MasteryLevel};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
