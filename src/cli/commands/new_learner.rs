//! skillpath new-learner - create a learner snapshot

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::app::AppContext;
use crate::cli::commands::skill_not_found;
use crate::cli::output::{emit_human, emit_json, response_ok, HumanLayout};
use crate::error::{Result, SkillpathError};
use crate::learner::state::LearnerState;

#[derive(Args, Debug)]
pub struct NewLearnerArgs {
    /// Learner id
    pub id: String,

    /// Goal skill id (repeatable)
    #[arg(long = "goal")]
    pub goals: Vec<String>,

    /// Catalog used to check goal ids
    #[arg(long, env = "SKILLPATH_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Write the snapshot here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Overwrite an existing --out file
    #[arg(long)]
    pub force: bool,
}

pub fn run(ctx: &AppContext, args: &NewLearnerArgs) -> Result<()> {
    if args.id.trim().is_empty() {
        return Err(SkillpathError::InvalidLearner("learner id is empty".to_string()));
    }

    if let Some(catalog) = &args.catalog {
        let (engine, _) = ctx.load_engine(catalog)?;
        if let Some(unknown) = args.goals.iter().find(|g| !engine.index().contains(g)) {
            return Err(skill_not_found(engine.index(), unknown));
        }
    }

    let state = LearnerState::new(args.id.trim()).with_goals(args.goals.iter().cloned());

    let Some(out) = &args.out else {
        // Snapshot itself is the output
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    };

    if out.exists() && !args.force {
        return Err(SkillpathError::InvalidLearner(format!(
            "{} already exists (use --force to overwrite)",
            out.display()
        )));
    }
    std::fs::write(out, serde_json::to_string_pretty(&state)? + "\n")?;
    info!(path = %out.display(), learner = %state.learner_id(), "created learner snapshot");

    if ctx.is_json() {
        let payload = serde_json::json!({
            "path": out.display().to_string(),
            "state": state,
        });
        return emit_json(&response_ok(payload));
    }

    let mut layout = HumanLayout::for_format(ctx.output_format);
    layout
        .title(&format!("Created learner {}", state.learner_id()))
        .kv("Snapshot", &out.display().to_string())
        .kv("Goals", &state.goals().len().to_string());
    for goal in state.goals() {
        layout.bullet(goal);
    }
    emit_human(layout);
    Ok(())
}
