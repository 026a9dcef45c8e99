//! Context-aware error suggestions.
//!
//! Complements the static suggestions in the `codes` module with hints built
//! from the error's JSON context.

use std::collections::HashSet;

use serde_json::Value;

use super::codes::ErrorCode;

/// Generate a context-aware suggestion for an error.
///
/// Falls back to the code's static suggestion when the context does not
/// carry the fields a richer hint needs.
pub fn suggest_for_error(code: ErrorCode, context: Option<&Value>) -> String {
    match code {
        ErrorCode::PrerequisiteMissing => suggest_prerequisite_missing(context),
        ErrorCode::PrerequisiteCycle => suggest_prerequisite_cycle(context),
        ErrorCode::PrerequisiteAmbiguous => suggest_prerequisite_ambiguous(context),
        ErrorCode::SkillNotFound => suggest_skill_not_found(context),
        ErrorCode::ConfigMissingRequired => suggest_config_missing_required(context),
        _ => code.suggestion().to_string(),
    }
}

fn context_str<'a>(context: Option<&'a Value>, key: &str) -> Option<&'a str> {
    context.and_then(|c| c.get(key)).and_then(Value::as_str)
}

fn suggest_prerequisite_missing(context: Option<&Value>) -> String {
    match (
        context_str(context, "skill_id"),
        context_str(context, "prerequisite"),
    ) {
        (Some(skill), Some(prereq)) => format!(
            "Skill '{skill}' requires '{prereq}', which is neither a skill id nor a display name in the catalog.\nEither:\n  - Add a skill with id '{prereq}'\n  - Correct or remove the reference in '{skill}'"
        ),
        _ => ErrorCode::PrerequisiteMissing.suggestion().to_string(),
    }
}

fn suggest_prerequisite_cycle(context: Option<&Value>) -> String {
    let cycle = context
        .and_then(|c| c.get("cycle"))
        .and_then(Value::as_array);

    match cycle {
        Some(chain) if !chain.is_empty() => {
            let chain_str: Vec<_> = chain.iter().filter_map(Value::as_str).collect();
            format!(
                "Prerequisite cycle: {}\nRemove one of these prerequisite edges so the catalog becomes acyclic",
                chain_str.join(" -> ")
            )
        }
        _ => ErrorCode::PrerequisiteCycle.suggestion().to_string(),
    }
}

fn suggest_prerequisite_ambiguous(context: Option<&Value>) -> String {
    let candidates = context
        .and_then(|c| c.get("candidates"))
        .and_then(Value::as_array);

    match (context_str(context, "reference"), candidates) {
        (Some(reference), Some(ids)) => {
            let ids: Vec<_> = ids.iter().filter_map(Value::as_str).collect();
            format!(
                "'{reference}' names more than one skill. Replace it with one of: {}",
                ids.join(", ")
            )
        }
        _ => ErrorCode::PrerequisiteAmbiguous.suggestion().to_string(),
    }
}

fn suggest_skill_not_found(context: Option<&Value>) -> String {
    let Some(skill_id) = context_str(context, "skill_id") else {
        return ErrorCode::SkillNotFound.suggestion().to_string();
    };

    let similar: Vec<_> = context
        .and_then(|c| c.get("similar"))
        .and_then(Value::as_array)
        .map(|list| list.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    if similar.is_empty() {
        format!(
            "Skill '{skill_id}' is not in the catalog. Run `skillpath validate --catalog <file>` to list available skills"
        )
    } else {
        format!(
            "Skill '{skill_id}' is not in the catalog. Did you mean: {}?",
            similar.join(", ")
        )
    }
}

fn suggest_config_missing_required(context: Option<&Value>) -> String {
    match context_str(context, "config_key") {
        Some(key) => format!("Required config '{key}' is missing. Set it in skillpath.toml"),
        None => ErrorCode::ConfigMissingRequired.suggestion().to_string(),
    }
}

/// Suggest catalog ids similar to a mistyped one.
///
/// Used for unknown goal or skill ids supplied by users.
pub fn suggest_similar_ids(query: &str, available: &[&str], max_suggestions: usize) -> Vec<String> {
    let query_lower = query.to_lowercase();
    let mut scored: Vec<_> = available
        .iter()
        .map(|s| (s, similarity_score(&query_lower, &s.to_lowercase())))
        .filter(|(_, score)| *score > 0.3)
        .collect();

    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    scored
        .into_iter()
        .take(max_suggestions)
        .map(|(s, _)| (*s).to_string())
        .collect()
}

/// Jaccard similarity over character trigrams.
#[allow(clippy::cast_precision_loss)]
fn similarity_score(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a_trigrams: HashSet<_> = trigrams(a).collect();
    let b_trigrams: HashSet<_> = trigrams(b).collect();

    if a_trigrams.is_empty() || b_trigrams.is_empty() {
        if a.starts_with(b) || b.starts_with(a) {
            return 0.8;
        }
        if a.contains(b) || b.contains(a) {
            return 0.5;
        }
        return 0.0;
    }

    let intersection = a_trigrams.intersection(&b_trigrams).count();
    let union = a_trigrams.union(&b_trigrams).count();

    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

fn trigrams(s: &str) -> impl Iterator<Item = &str> {
    (0..s.len().saturating_sub(2)).filter_map(move |i| s.get(i..i + 3))
}
