//! Error handling for skillpath.
//!
//! This module provides:
//! - [`SkillpathError`]: The main error enum for all operations
//! - [`ErrorCode`]: Standardized error codes for machine parsing
//! - [`StructuredError`]: Rich error type with suggestions and context
//! - Suggestion helpers for context-aware recovery hints

mod codes;
mod suggestions;

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use codes::ErrorCode;
pub use suggestions::{suggest_for_error, suggest_similar_ids};

/// Main error type for skillpath operations.
#[derive(Error, Debug)]
pub enum SkillpathError {
    #[error("Skill '{skill_id}' lists unknown prerequisite '{prerequisite}'")]
    DanglingPrerequisite {
        skill_id: String,
        prerequisite: String,
    },

    #[error("Prerequisite cycle detected at skill '{skill_id}': {}", .cycle.join(" -> "))]
    CyclicPrerequisite { skill_id: String, cycle: Vec<String> },

    #[error("Duplicate skill id: {0}")]
    DuplicateSkill(String),

    #[error("Skill '{skill_id}' prerequisite '{reference}' is ambiguous: matches {}", .candidates.join(", "))]
    AmbiguousPrerequisite {
        skill_id: String,
        reference: String,
        candidates: Vec<String>,
    },

    #[error("Skill not found: {skill_id}")]
    SkillNotFound {
        skill_id: String,
        /// Close matches from the catalog, best first
        similar: Vec<String>,
    },

    #[error("Invalid learner state: {0}")]
    InvalidLearner(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Missing required config: {0}")]
    MissingConfig(String),
}

impl SkillpathError {
    /// Get the error code for this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::DanglingPrerequisite { .. } => ErrorCode::PrerequisiteMissing,
            Self::CyclicPrerequisite { .. } => ErrorCode::PrerequisiteCycle,
            Self::DuplicateSkill(_) => ErrorCode::SkillDuplicate,
            Self::AmbiguousPrerequisite { .. } => ErrorCode::PrerequisiteAmbiguous,
            Self::SkillNotFound { .. } => ErrorCode::SkillNotFound,
            Self::InvalidLearner(_) => ErrorCode::LearnerInvalid,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) | Self::Yaml(_) | Self::Parse(_) => ErrorCode::SerializationError,
            Self::UnsupportedFormat(_) => ErrorCode::UnsupportedFormat,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::MissingConfig(_) => ErrorCode::ConfigMissingRequired,
        }
    }

    /// True for malformed-catalog errors that must abort startup.
    #[must_use]
    pub const fn is_integrity(&self) -> bool {
        matches!(
            self,
            Self::DanglingPrerequisite { .. }
                | Self::CyclicPrerequisite { .. }
                | Self::DuplicateSkill(_)
                | Self::AmbiguousPrerequisite { .. }
        )
    }

    /// Get context information for this error as JSON.
    #[must_use]
    pub fn context(&self) -> Option<Value> {
        match self {
            Self::DanglingPrerequisite {
                skill_id,
                prerequisite,
            } => Some(serde_json::json!({ "skill_id": skill_id, "prerequisite": prerequisite })),
            Self::CyclicPrerequisite { skill_id, cycle } => {
                Some(serde_json::json!({ "skill_id": skill_id, "cycle": cycle }))
            }
            Self::DuplicateSkill(id) => Some(serde_json::json!({ "skill_id": id })),
            Self::SkillNotFound { skill_id, similar } => {
                Some(serde_json::json!({ "skill_id": skill_id, "similar": similar }))
            }
            Self::AmbiguousPrerequisite {
                skill_id,
                reference,
                candidates,
            } => Some(serde_json::json!({
                "skill_id": skill_id,
                "reference": reference,
                "candidates": candidates,
            })),
            Self::MissingConfig(key) => Some(serde_json::json!({ "config_key": key })),
            _ => None,
        }
    }

    /// Convert this error to a structured error.
    #[must_use]
    pub fn to_structured(&self) -> StructuredError {
        StructuredError::from_error(self)
    }
}

/// A structured error with machine-readable code, suggestion, and context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// The error code (e.g., "PREREQUISITE_CYCLE")
    pub code: ErrorCode,

    /// The numeric error code (e.g., 102)
    pub numeric_code: u16,

    /// Human-readable error message
    pub message: String,

    /// Actionable suggestion for recovery
    pub suggestion: String,

    /// Additional context for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,

    /// Whether this error is potentially recoverable by the user
    pub recoverable: bool,

    /// Error category (e.g., "catalog", "config")
    pub category: String,
}

impl StructuredError {
    /// Create a new structured error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            numeric_code: code.numeric(),
            suggestion: code.suggestion().to_string(),
            context: None,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
            code,
            message: message.into(),
        }
    }

    /// Create a structured error from a [`SkillpathError`].
    #[must_use]
    pub fn from_error(err: &SkillpathError) -> Self {
        let code = err.code();
        let context = err.context();
        let suggestion = suggest_for_error(code, context.as_ref());

        Self {
            code,
            numeric_code: code.numeric(),
            message: err.to_string(),
            suggestion,
            context,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
        }
    }

    /// Add context to this error, regenerating the suggestion.
    #[must_use]
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self.suggestion = suggest_for_error(self.code, self.context.as_ref());
        self
    }

    /// Set a custom suggestion.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = suggestion.into();
        self
    }
}

impl std::fmt::Display for StructuredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl From<&SkillpathError> for StructuredError {
    fn from(err: &SkillpathError) -> Self {
        Self::from_error(err)
    }
}

/// Result type alias using [`SkillpathError`].
pub type Result<T> = std::result::Result<T, SkillpathError>;
