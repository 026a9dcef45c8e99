//! skillpath apply - feed progression events to a learner snapshot

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::Args;
use tracing::info;

use crate::app::AppContext;
use crate::cli::output::{emit_human, emit_json, response_ok, HumanLayout};
use crate::engine::{ProgressionEffect, ProgressionEvent};
use crate::error::{Result, SkillpathError};

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Catalog file (.yaml, .yml, .json or .toml)
    #[arg(long, env = "SKILLPATH_CATALOG")]
    pub catalog: PathBuf,

    /// Learner snapshot (JSON)
    #[arg(long)]
    pub learner: PathBuf,

    /// Events file: JSON array, JSON lines (.jsonl) or YAML list
    #[arg(long)]
    pub events: PathBuf,

    /// Timestamp recorded on awards and assessments (RFC 3339, default: now)
    #[arg(long)]
    pub at: Option<DateTime<Utc>>,

    /// Write the updated snapshot back to the learner file
    #[arg(long)]
    pub write: bool,
}

pub fn run(ctx: &AppContext, args: &ApplyArgs) -> Result<()> {
    let (engine, _) = ctx.load_engine(&args.catalog)?;
    let state = ctx.load_learner(&args.learner)?;
    let events = load_events(&args.events)?;
    let at = args.at.unwrap_or_else(Utc::now);

    let transition = engine.apply_all(&state, &events, at);

    if args.write && !transition.is_noop() {
        let raw = serde_json::to_string_pretty(&transition.state)?;
        std::fs::write(&args.learner, raw + "\n")?;
        info!(
            path = %args.learner.display(),
            version = transition.state.version(),
            "wrote learner snapshot"
        );
    }

    if ctx.is_json() {
        let payload = serde_json::json!({
            "events": events.len(),
            "effects": transition.effects,
            "written": args.write && !transition.is_noop(),
            "state": transition.state,
        });
        return emit_json(&response_ok(payload));
    }

    let updated = &transition.state;
    let mut layout = HumanLayout::for_format(ctx.output_format);
    layout
        .title(&format!("Applied {} event(s) to {}", events.len(), updated.learner_id()))
        .kv("Experience", &updated.experience().to_string())
        .kv("Level", &updated.level().to_string())
        .kv(
            "Streak",
            &format!("{} (longest {})", updated.streak().current, updated.streak().longest),
        )
        .kv("Badges", &updated.badges().len().to_string())
        .kv("Version", &updated.version().to_string());

    layout.blank().section("Effects");
    if transition.is_noop() {
        layout.push_line("No changes.");
    }
    for effect in &transition.effects {
        layout.bullet(&describe(effect));
    }
    if args.write && !transition.is_noop() {
        layout
            .blank()
            .push_line(format!("Saved to {}", args.learner.display()));
    }
    emit_human(layout);
    Ok(())
}

/// Read events from a file; the format follows the extension.
pub fn load_events(path: &Path) -> Result<Vec<ProgressionEvent>> {
    let raw = std::fs::read_to_string(path)?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "json" => Ok(serde_json::from_str(&raw)?),
        "jsonl" | "ndjson" => raw
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(SkillpathError::from))
            .collect(),
        "yaml" | "yml" => Ok(serde_yaml::from_str(&raw)?),
        other => Err(SkillpathError::UnsupportedFormat(format!(
            "{} (extension '{other}')",
            path.display()
        ))),
    }
}

fn describe(effect: &ProgressionEffect) -> String {
    match effect {
        ProgressionEffect::ScenarioRecorded {
            scenario_id,
            total_completed,
        } => format!("completed scenario {scenario_id} ({total_completed} total)"),
        ProgressionEffect::ExperienceGained { amount, total } => format!("+{amount} XP ({total} total)"),
        ProgressionEffect::LevelChanged { from, to } => format!("level {from} -> {to}"),
        ProgressionEffect::BadgeAwarded { badge_id } => format!("badge earned: {badge_id}"),
        ProgressionEffect::StreakStarted => "streak started".to_string(),
        ProgressionEffect::StreakExtended { current } => format!("streak extended to {current} days"),
        ProgressionEffect::StreakReset { previous } => format!("streak of {previous} reset"),
        ProgressionEffect::MasteryChanged { skill_id, from, to } => {
            format!("{skill_id}: {from} -> {to}")
        }
        ProgressionEffect::GoalAdded { skill_id } => format!("goal added: {skill_id}"),
        ProgressionEffect::GoalRemoved { skill_id } => format!("goal removed: {skill_id}"),
        ProgressionEffect::GrowthAreaUpdated {
            area_id,
            score,
            delta,
        } => match delta {
            Some(delta) => format!("growth area {area_id}: {score} ({delta:+})"),
            None => format!("growth area {area_id}: {score} (new)"),
        },
    }
}
