//! skillpath show - one skill and its neighbourhood

use std::path::PathBuf;

use clap::Args;

use crate::app::AppContext;
use crate::cli::commands::{level_label, skill_not_found};
use crate::cli::output::{emit_human, emit_json, response_ok, HumanLayout};
use crate::core::duration::format_duration;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Skill id
    pub skill: String,

    /// Catalog file (.yaml, .yml, .json or .toml)
    #[arg(long, env = "SKILLPATH_CATALOG")]
    pub catalog: PathBuf,
}

pub fn run(ctx: &AppContext, args: &ShowArgs) -> Result<()> {
    let (engine, _) = ctx.load_engine(&args.catalog)?;
    let index = engine.index();
    let skill = index
        .get(&args.skill)
        .ok_or_else(|| skill_not_found(index, &args.skill))?;

    let prerequisites: Vec<&str> = index
        .prerequisites(&skill.id)
        .unwrap_or_default()
        .into_iter()
        .map(|s| s.id.as_str())
        .collect();
    let dependents: Vec<&str> = index
        .dependents(&skill.id)
        .unwrap_or_default()
        .into_iter()
        .map(|s| s.id.as_str())
        .collect();
    let closure = index.prerequisite_closure(&skill.id).unwrap_or_default();
    let parsed = index.parsed_time(&skill.id);

    if ctx.is_json() {
        let payload = serde_json::json!({
            "skill": skill,
            "prerequisites": prerequisites,
            "dependents": dependents,
            "prerequisite_closure": closure,
            "estimated_seconds": parsed.map(|d| d.as_secs()),
        });
        return emit_json(&response_ok(payload));
    }

    let colors = ctx.output_format.use_colors();
    let mut layout = HumanLayout::for_format(ctx.output_format);
    layout
        .title(&format!("{} ({})", skill.name, skill.id))
        .kv("Category", skill.category.as_str())
        .kv("Level", &level_label(skill.level, colors).to_string())
        .kv(
            "Estimated time",
            &match parsed {
                Some(time) => format!("{} ({})", skill.estimated_time, format_duration(time)),
                None if skill.estimated_time.is_empty() => "unknown".to_string(),
                None => format!("{} (unparsed)", skill.estimated_time),
            },
        )
        .kv("All prerequisites", &closure.len().to_string());

    if !prerequisites.is_empty() {
        layout.blank().section("Requires");
        for id in &prerequisites {
            layout.bullet(id);
        }
    }
    if !dependents.is_empty() {
        layout.blank().section("Unlocks");
        for id in &dependents {
            layout.bullet(id);
        }
    }
    if !skill.scenarios.is_empty() {
        layout.blank().section("Practice scenarios");
        for scenario in &skill.scenarios {
            layout.bullet(scenario);
        }
    }
    emit_human(layout);
    Ok(())
}
