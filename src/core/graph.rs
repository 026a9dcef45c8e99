//! Skill Graph and Graph Index
//!
//! Skills declare prerequisites by id. The index is built once from the
//! catalog, rejects dangling references and prerequisite cycles, and then
//! serves every lookup the engine needs. It has no mutating methods; the only
//! interior state is the per-skill closure memo, which is write-once.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::sync::OnceLock;
use std::time::Duration;

use tracing::debug;

use crate::core::duration::parse_time_hint;
use crate::core::skill::{Skill, SkillCategory, SkillLevel};
use crate::error::{Result, SkillpathError};

/// DFS visit state for cycle detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Not visited yet
    White,
    /// On the current recursion stack
    Gray,
    /// Fully explored
    Black,
}

/// Immutable, validated view over the skill catalog.
///
/// Internally every skill is addressed by its position in id order, so
/// iteration and tie-breaks on position are lexicographic on id.
#[derive(Debug, Clone)]
pub struct GraphIndex {
    /// Skills sorted by id
    skills: Vec<Skill>,
    /// Index: skill id -> position
    by_id: HashMap<String, usize>,
    /// Direct prerequisites per skill, in declaration order
    prerequisites: Vec<Vec<usize>>,
    /// Direct dependents per skill (reverse edges), in id order
    dependents: Vec<Vec<usize>>,
    /// Index: category -> skills
    by_category: BTreeMap<SkillCategory, Vec<usize>>,
    /// Index: level -> skills
    by_level: BTreeMap<SkillLevel, Vec<usize>>,
    /// Parsed estimated-time hints (None when malformed or empty)
    parsed_times: Vec<Option<Duration>>,
    /// Memoized transitive prerequisite closure per skill
    closures: Vec<OnceLock<Vec<usize>>>,
}

impl GraphIndex {
    /// Build the index, failing on any integrity violation.
    ///
    /// Errors:
    /// - [`SkillpathError::DuplicateSkill`] when two skills share an id
    /// - [`SkillpathError::DanglingPrerequisite`] when a prerequisite id is unknown
    /// - [`SkillpathError::CyclicPrerequisite`] when the prerequisite relation has a cycle
    pub fn build(mut skills: Vec<Skill>) -> Result<Self> {
        skills.sort_by(|a, b| a.id.cmp(&b.id));

        let mut by_id = HashMap::with_capacity(skills.len());
        for (idx, skill) in skills.iter().enumerate() {
            if by_id.insert(skill.id.clone(), idx).is_some() {
                return Err(SkillpathError::DuplicateSkill(skill.id.clone()));
            }
        }

        let mut prerequisites = Vec::with_capacity(skills.len());
        for skill in &skills {
            let mut resolved: Vec<usize> = Vec::with_capacity(skill.prerequisites.len());
            for prereq in &skill.prerequisites {
                let Some(&target) = by_id.get(prereq) else {
                    return Err(SkillpathError::DanglingPrerequisite {
                        skill_id: skill.id.clone(),
                        prerequisite: prereq.clone(),
                    });
                };
                if !resolved.contains(&target) {
                    resolved.push(target);
                }
            }
            prerequisites.push(resolved);
        }

        detect_cycle(&skills, &prerequisites)?;

        let mut dependents = vec![Vec::new(); skills.len()];
        for (idx, prereqs) in prerequisites.iter().enumerate() {
            for &prereq in prereqs {
                dependents[prereq].push(idx);
            }
        }
        // Pushed in ascending idx order, so each list is already id-sorted.

        let mut by_category: BTreeMap<SkillCategory, Vec<usize>> = BTreeMap::new();
        let mut by_level: BTreeMap<SkillLevel, Vec<usize>> = BTreeMap::new();
        for (idx, skill) in skills.iter().enumerate() {
            by_category.entry(skill.category).or_default().push(idx);
            by_level.entry(skill.level).or_default().push(idx);
        }

        let parsed_times = skills
            .iter()
            .map(|s| parse_time_hint(&s.estimated_time))
            .collect();
        let closures = skills.iter().map(|_| OnceLock::new()).collect();

        let edge_count: usize = prerequisites.iter().map(Vec::len).sum();
        debug!(
            skills = skills.len(),
            edges = edge_count,
            categories = by_category.len(),
            "built skill graph index"
        );

        Ok(Self {
            skills,
            by_id,
            prerequisites,
            dependents,
            by_category,
            by_level,
            parsed_times,
            closures,
        })
    }

    /// Number of skills in the catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// All skills in id order
    pub fn skills(&self) -> impl Iterator<Item = &Skill> {
        self.skills.iter()
    }

    /// Look up a skill by id
    #[must_use]
    pub fn get(&self, skill_id: &str) -> Option<&Skill> {
        self.by_id.get(skill_id).map(|&idx| &self.skills[idx])
    }

    #[must_use]
    pub fn contains(&self, skill_id: &str) -> bool {
        self.by_id.contains_key(skill_id)
    }

    /// Skills in a category, in id order
    #[must_use]
    pub fn by_category(&self, category: SkillCategory) -> Vec<&Skill> {
        self.resolve_all(self.by_category.get(&category))
    }

    /// Skills at a level, in id order
    #[must_use]
    pub fn by_level(&self, level: SkillLevel) -> Vec<&Skill> {
        self.resolve_all(self.by_level.get(&level))
    }

    /// Skills with no prerequisites, in id order
    #[must_use]
    pub fn roots(&self) -> Vec<&Skill> {
        self.prerequisites
            .iter()
            .enumerate()
            .filter(|(_, prereqs)| prereqs.is_empty())
            .map(|(idx, _)| &self.skills[idx])
            .collect()
    }

    /// Direct prerequisites of a skill, in declaration order
    #[must_use]
    pub fn prerequisites(&self, skill_id: &str) -> Option<Vec<&Skill>> {
        let idx = self.index_of(skill_id)?;
        Some(self.resolve_all(Some(&self.prerequisites[idx])))
    }

    /// Skills that list this skill as a direct prerequisite, in id order
    #[must_use]
    pub fn dependents(&self, skill_id: &str) -> Option<Vec<&Skill>> {
        let idx = self.index_of(skill_id)?;
        Some(self.resolve_all(Some(&self.dependents[idx])))
    }

    /// Transitive prerequisite closure of a skill, excluding the skill itself.
    ///
    /// Computed on first request and memoized for the lifetime of the index.
    #[must_use]
    pub fn prerequisite_closure(&self, skill_id: &str) -> Option<BTreeSet<&str>> {
        let idx = self.index_of(skill_id)?;
        Some(
            self.closure_indices(idx)
                .iter()
                .map(|&i| self.skills[i].id.as_str())
                .collect(),
        )
    }

    /// Parsed estimated time of a skill; `None` if unknown or the hint is malformed
    #[must_use]
    pub fn parsed_time(&self, skill_id: &str) -> Option<Duration> {
        self.index_of(skill_id)
            .and_then(|idx| self.parsed_times[idx])
    }

    pub(crate) fn index_of(&self, skill_id: &str) -> Option<usize> {
        self.by_id.get(skill_id).copied()
    }

    pub(crate) fn skill_at(&self, idx: usize) -> &Skill {
        &self.skills[idx]
    }

    pub(crate) fn prerequisite_indices(&self, idx: usize) -> &[usize] {
        &self.prerequisites[idx]
    }

    pub(crate) fn dependent_indices(&self, idx: usize) -> &[usize] {
        &self.dependents[idx]
    }

    pub(crate) fn parsed_time_at(&self, idx: usize) -> Option<Duration> {
        self.parsed_times[idx]
    }

    /// Memoized closure as sorted positions.
    pub(crate) fn closure_indices(&self, idx: usize) -> &[usize] {
        self.closures[idx].get_or_init(|| {
            let mut seen = vec![false; self.skills.len()];
            let mut queue: VecDeque<usize> = self.prerequisites[idx].iter().copied().collect();
            let mut closure = Vec::new();

            while let Some(current) = queue.pop_front() {
                if seen[current] {
                    continue;
                }
                seen[current] = true;
                closure.push(current);
                queue.extend(self.prerequisites[current].iter().copied());
            }

            closure.sort_unstable();
            closure
        })
    }

    fn resolve_all(&self, positions: Option<&Vec<usize>>) -> Vec<&Skill> {
        positions
            .map(|list| list.iter().map(|&idx| &self.skills[idx]).collect())
            .unwrap_or_default()
    }
}

/// Three-color DFS over prerequisite edges; a gray target is a back-edge.
fn detect_cycle(skills: &[Skill], prerequisites: &[Vec<usize>]) -> Result<()> {
    let mut colors = vec![Color::White; skills.len()];
    let mut path = Vec::new();

    for start in 0..skills.len() {
        if colors[start] == Color::White {
            if let Some(cycle) = dfs_visit(start, prerequisites, &mut colors, &mut path) {
                let cycle: Vec<String> = cycle.iter().map(|&i| skills[i].id.clone()).collect();
                return Err(SkillpathError::CyclicPrerequisite {
                    skill_id: cycle[0].clone(),
                    cycle,
                });
            }
        }
    }

    Ok(())
}

fn dfs_visit(
    node: usize,
    prerequisites: &[Vec<usize>],
    colors: &mut [Color],
    path: &mut Vec<usize>,
) -> Option<Vec<usize>> {
    colors[node] = Color::Gray;
    path.push(node);

    for &prereq in &prerequisites[node] {
        match colors[prereq] {
            Color::White => {
                if let Some(cycle) = dfs_visit(prereq, prerequisites, colors, path) {
                    return Some(cycle);
                }
            }
            Color::Gray => {
                let start = path.iter().position(|&p| p == prereq).unwrap_or(0);
                let mut cycle = path[start..].to_vec();
                cycle.push(prereq);
                return Some(cycle);
            }
            Color::Black => {}
        }
    }

    path.pop();
    colors[node] = Color::Black;
    None
}
