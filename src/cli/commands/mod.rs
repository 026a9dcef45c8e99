//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - `run()` function to execute the command

use colored::{ColoredString, Colorize};

use crate::app::AppContext;
use crate::cli::Commands;
use crate::core::catalog::CatalogReport;
use crate::core::graph::GraphIndex;
use crate::core::skill::SkillLevel;
use crate::error::{suggest_similar_ids, Result, SkillpathError};

pub mod apply;
pub mod new_learner;
pub mod pathway;
pub mod recommend;
pub mod show;
pub mod validate;

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Validate(args) => validate::run(ctx, args),
        Commands::Show(args) => show::run(ctx, args),
        Commands::Recommend(args) => recommend::run(ctx, args),
        Commands::Pathway(args) => pathway::run(ctx, args),
        Commands::Apply(args) => apply::run(ctx, args),
        Commands::NewLearner(args) => new_learner::run(ctx, args),
    }
}

/// `SkillNotFound` with close catalog matches attached.
pub(crate) fn skill_not_found(index: &GraphIndex, skill_id: &str) -> SkillpathError {
    let available: Vec<&str> = index.skills().map(|s| s.id.as_str()).collect();
    SkillpathError::SkillNotFound {
        skill_id: skill_id.to_string(),
        similar: suggest_similar_ids(skill_id, &available, 3),
    }
}

/// Data-quality findings rendered as warning lines.
pub(crate) fn report_warnings(report: &CatalogReport) -> Vec<String> {
    report
        .malformed_hints
        .iter()
        .map(|hint| {
            format!(
                "skill '{}' has an unparsable time hint '{}'; counted as zero",
                hint.skill_id, hint.hint
            )
        })
        .collect()
}

pub(crate) fn level_label(level: SkillLevel, colors: bool) -> ColoredString {
    let label = level.as_str();
    if !colors {
        return label.normal();
    }
    match level {
        SkillLevel::Foundational => label.green(),
        SkillLevel::Bridge => label.yellow(),
        SkillLevel::Advanced => label.magenta(),
    }
}
