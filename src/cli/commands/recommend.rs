//! skillpath recommend - what to learn next

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::commands::{level_label, report_warnings};
use crate::cli::output::{emit_human, emit_json, response_ok, HumanLayout};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// Catalog file (.yaml, .yml, .json or .toml)
    #[arg(long, env = "SKILLPATH_CATALOG")]
    pub catalog: PathBuf,

    /// Learner snapshot (JSON)
    #[arg(long)]
    pub learner: PathBuf,

    /// Number of recommendations (default: recommend.default_count)
    #[arg(long, short = 'n')]
    pub count: Option<usize>,
}

pub fn run(ctx: &AppContext, args: &RecommendArgs) -> Result<()> {
    let (engine, report) = ctx.load_engine(&args.catalog)?;
    let state = ctx.load_learner(&args.learner)?;
    let count = args.count.unwrap_or(ctx.config.recommend.default_count);

    let recommendations = engine.recommend(&state, count);

    if ctx.is_json() {
        let payload = serde_json::json!({
            "learner_id": state.learner_id(),
            "state_version": state.version(),
            "count": count,
            "recommendations": recommendations,
        });
        return emit_json(&response_ok(payload).with_warnings(report_warnings(&report)));
    }

    let colors = ctx.output_format.use_colors();
    let mut layout = HumanLayout::for_format(ctx.output_format);
    layout.title(&format!("Next skills for {}", state.learner_id()));

    if recommendations.is_empty() {
        layout.push_line("Nothing to recommend: every reachable skill is mastered or blocked.");
    }
    for (rank, rec) in recommendations.iter().enumerate() {
        let heading = format!("{}. {} ({})", rank + 1, rec.name, rec.skill_id);
        let heading = if colors {
            heading.bold().to_string()
        } else {
            heading
        };
        layout.push_line(format!("{heading}  [{}]", level_label(rec.level, colors)));
        if !rec.estimated_time.is_empty() {
            layout.kv("  Estimated time", &rec.estimated_time);
        }
        for reason in &rec.reasons {
            layout.bullet(reason);
        }
        layout.blank();
    }

    emit_human(layout);
    Ok(())
}
