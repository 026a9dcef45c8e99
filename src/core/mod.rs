//! Core skill types, catalog loading and the graph index

pub mod catalog;
pub mod duration;
pub mod graph;
pub mod skill;

pub use catalog::{Catalog, CatalogReport, MalformedHint};
pub use graph::GraphIndex;
pub use skill::{Skill, SkillCategory, SkillDefinition, SkillLevel};
