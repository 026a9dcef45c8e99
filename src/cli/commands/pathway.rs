//! skillpath pathway - ordered route to a goal skill

use std::path::PathBuf;

use clap::Args;

use crate::app::AppContext;
use crate::cli::commands::{level_label, report_warnings, skill_not_found};
use crate::cli::output::{emit_human, emit_json, response_ok, HumanLayout};
use crate::core::duration::format_duration;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct PathwayArgs {
    /// Goal skill id
    pub goal: String,

    /// Catalog file (.yaml, .yml, .json or .toml)
    #[arg(long, env = "SKILLPATH_CATALOG")]
    pub catalog: PathBuf,

    /// Learner snapshot (JSON)
    #[arg(long)]
    pub learner: PathBuf,
}

pub fn run(ctx: &AppContext, args: &PathwayArgs) -> Result<()> {
    let (engine, report) = ctx.load_engine(&args.catalog)?;
    let state = ctx.load_learner(&args.learner)?;

    let pathway = engine
        .synthesize(&state, &args.goal)
        .ok_or_else(|| skill_not_found(engine.index(), &args.goal))?;

    let mut warnings = report_warnings(&report);
    warnings.extend(pathway.unparsed_hints.iter().map(|id| {
        format!("time for '{id}' is unknown and not included in the total")
    }));

    if ctx.is_json() {
        return emit_json(&response_ok(&pathway).with_warnings(warnings));
    }

    let colors = ctx.output_format.use_colors();
    let goal_name = engine
        .index()
        .get(&pathway.goal)
        .map_or(pathway.goal.as_str(), |s| s.name.as_str());

    let mut layout = HumanLayout::for_format(ctx.output_format);
    layout
        .title(&format!("Pathway to {goal_name}"))
        .kv("Steps", &pathway.len().to_string())
        .kv("Total time", &format_duration(pathway.total_time))
        .blank();

    for (position, step) in pathway.steps.iter().enumerate() {
        let time = if step.estimated_time.is_empty() {
            String::new()
        } else {
            format!(" - {}", step.estimated_time)
        };
        layout.push_line(format!(
            "{:>3}. {} ({}) [{}]{time}",
            position + 1,
            step.name,
            step.skill_id,
            level_label(step.level, colors)
        ));
    }

    if !warnings.is_empty() {
        layout.blank().section("Warnings");
        for warning in &warnings {
            layout.bullet(warning);
        }
    }
    emit_human(layout);
    Ok(())
}
