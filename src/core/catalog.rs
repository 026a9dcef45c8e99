//! Catalog loading and prerequisite normalization
//!
//! Authored catalogs reference prerequisites inconsistently: some by skill
//! id, some by display name. Everything is normalized to ids here, before the
//! graph index is built. A reference that matches nothing, or a display name
//! that matches several skills, is an integrity error.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::duration::parse_time_hint;
use crate::core::graph::GraphIndex;
use crate::core::skill::{Skill, SkillDefinition};
use crate::error::{Result, SkillpathError};

/// On-disk catalog document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub skills: Vec<SkillDefinition>,
}

/// A skill whose estimated-time hint could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedHint {
    pub skill_id: String,
    pub hint: String,
}

/// Data-quality findings from normalizing a catalog.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogReport {
    /// Number of skills loaded
    pub skill_count: usize,
    /// Prerequisite references rewritten from display name to id
    pub renamed_references: usize,
    /// Hints that will contribute zero to pathway totals
    pub malformed_hints: Vec<MalformedHint>,
}

impl Catalog {
    #[must_use]
    pub const fn new(skills: Vec<SkillDefinition>) -> Self {
        Self { skills }
    }

    /// Read a catalog file; the format follows the extension
    /// (`.yaml`/`.yml`, `.json`, `.toml`).
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let catalog = match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml(&raw)?,
            "json" => Self::from_json(&raw)?,
            "toml" => toml::from_str(&raw).map_err(|err| {
                SkillpathError::Parse(format!("catalog {}: {err}", path.display()))
            })?,
            other => {
                return Err(SkillpathError::UnsupportedFormat(format!(
                    "{} (extension '{other}')",
                    path.display()
                )));
            }
        };

        info!(path = %path.display(), skills = catalog.skills.len(), "loaded catalog");
        Ok(catalog)
    }

    /// Parse a YAML document: either `skills: [...]` or a bare list.
    pub fn from_yaml(raw: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(raw)?;
        if value.is_sequence() {
            Ok(Self::new(serde_yaml::from_value(value)?))
        } else {
            Ok(serde_yaml::from_value(value)?)
        }
    }

    /// Parse a JSON document: either `{"skills": [...]}` or a bare list.
    pub fn from_json(raw: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        if value.is_array() {
            Ok(Self::new(serde_json::from_value(value)?))
        } else {
            Ok(serde_json::from_value(value)?)
        }
    }

    /// Resolve every prerequisite reference to a skill id.
    ///
    /// An exact id match wins; otherwise the reference is compared to display
    /// names case-insensitively after trimming.
    pub fn normalize(&self) -> Result<(Vec<Skill>, CatalogReport)> {
        let mut ids = HashSet::with_capacity(self.skills.len());
        for def in &self.skills {
            if !ids.insert(def.id.as_str()) {
                return Err(SkillpathError::DuplicateSkill(def.id.clone()));
            }
        }

        let mut by_name: HashMap<String, Vec<&str>> = HashMap::new();
        for def in &self.skills {
            by_name
                .entry(name_key(&def.name))
                .or_default()
                .push(def.id.as_str());
        }

        let mut report = CatalogReport {
            skill_count: self.skills.len(),
            ..CatalogReport::default()
        };
        let mut skills = Vec::with_capacity(self.skills.len());

        for def in &self.skills {
            let mut prerequisites = Vec::with_capacity(def.prerequisites.len());
            for reference in &def.prerequisites {
                if ids.contains(reference.as_str()) {
                    prerequisites.push(reference.clone());
                    continue;
                }

                match by_name.get(&name_key(reference)).map(Vec::as_slice) {
                    Some([id]) => {
                        report.renamed_references += 1;
                        prerequisites.push((*id).to_string());
                    }
                    Some(candidates) if candidates.len() > 1 => {
                        let candidates: Vec<String> = candidates
                            .iter()
                            .sorted()
                            .map(|id| (*id).to_string())
                            .collect();
                        return Err(SkillpathError::AmbiguousPrerequisite {
                            skill_id: def.id.clone(),
                            reference: reference.clone(),
                            candidates,
                        });
                    }
                    _ => {
                        return Err(SkillpathError::DanglingPrerequisite {
                            skill_id: def.id.clone(),
                            prerequisite: reference.clone(),
                        });
                    }
                }
            }

            if !def.estimated_time.trim().is_empty() && parse_time_hint(&def.estimated_time).is_none() {
                warn!(
                    skill_id = %def.id,
                    hint = %def.estimated_time,
                    "malformed estimated-time hint; it will count as zero"
                );
                report.malformed_hints.push(MalformedHint {
                    skill_id: def.id.clone(),
                    hint: def.estimated_time.clone(),
                });
            }

            skills.push(Skill {
                id: def.id.clone(),
                name: def.name.clone(),
                category: def.category,
                level: def.level,
                prerequisites,
                estimated_time: def.estimated_time.clone(),
                scenarios: def.scenarios.clone(),
            });
        }

        Ok((skills, report))
    }

    /// Normalize and build the graph index in one step.
    pub fn into_index(self) -> Result<(GraphIndex, CatalogReport)> {
        let (skills, report) = self.normalize()?;
        let index = GraphIndex::build(skills)?;
        Ok((index, report))
    }
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}
