//! skillpath validate - catalog integrity check

use std::path::PathBuf;

use clap::Args;

use crate::app::AppContext;
use crate::cli::commands::report_warnings;
use crate::cli::output::{emit_human, emit_json, response_ok, HumanLayout};
use crate::core::skill::SkillLevel;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Catalog file (.yaml, .yml, .json or .toml)
    #[arg(long, env = "SKILLPATH_CATALOG")]
    pub catalog: PathBuf,
}

pub fn run(ctx: &AppContext, args: &ValidateArgs) -> Result<()> {
    let (engine, report) = ctx.load_engine(&args.catalog)?;
    let index = engine.index();
    let warnings = report_warnings(&report);

    let roots: Vec<&str> = index.roots().iter().map(|s| s.id.as_str()).collect();
    let by_level: Vec<(SkillLevel, usize)> = SkillLevel::all()
        .iter()
        .map(|&level| (level, index.by_level(level).len()))
        .collect();

    if ctx.is_json() {
        let payload = serde_json::json!({
            "valid": true,
            "catalog": args.catalog.display().to_string(),
            "skills": index.len(),
            "roots": roots,
            "by_level": by_level
                .iter()
                .map(|(level, count)| (level.as_str().to_string(), serde_json::json!(count)))
                .collect::<serde_json::Map<_, _>>(),
            "renamed_references": report.renamed_references,
            "malformed_hints": report.malformed_hints,
        });
        return emit_json(&response_ok(payload).with_warnings(warnings));
    }

    let mut layout = HumanLayout::for_format(ctx.output_format);
    layout
        .title("Catalog OK")
        .kv("Catalog", &args.catalog.display().to_string())
        .kv("Skills", &index.len().to_string())
        .kv("Entry points", &roots.len().to_string());
    for (level, count) in &by_level {
        layout.kv(level.as_str(), &count.to_string());
    }
    if report.renamed_references > 0 {
        layout.kv(
            "Name references",
            &format!("{} resolved to ids", report.renamed_references),
        );
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
