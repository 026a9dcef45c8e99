//! Standardized error codes for machine-parseable output.
//!
//! Error codes follow a numeric taxonomy:
//! - 1xx: Catalog integrity errors
//! - 2xx: Learner state errors
//! - 3xx: Config errors
//! - 6xx: Storage and serialization errors
//! - 9xx: Internal errors

use serde::{Deserialize, Serialize};

/// Standardized error codes for JSON output.
///
/// Each variant maps to a numeric code (e.g., `PrerequisiteMissing` -> E101).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================
    // Catalog integrity errors (1xx)
    // ========================================
    /// E101: A prerequisite reference does not resolve to any skill
    PrerequisiteMissing,
    /// E102: The prerequisite relation contains a cycle
    PrerequisiteCycle,
    /// E103: Two catalog entries share the same skill id
    SkillDuplicate,
    /// E104: A name-based prerequisite reference matches several skills
    PrerequisiteAmbiguous,
    /// E105: Requested skill id is not in the catalog
    SkillNotFound,

    // ========================================
    // Learner state errors (2xx)
    // ========================================
    /// E201: Learner snapshot could not be interpreted
    LearnerInvalid,

    // ========================================
    // Config errors (3xx)
    // ========================================
    /// E301: Config file has invalid syntax or values
    ConfigInvalid,
    /// E302: Required config value is missing
    ConfigMissingRequired,

    // ========================================
    // Storage errors (6xx)
    // ========================================
    /// E601: Failed to read or write a file
    IoError,
    /// E602: Input could not be (de)serialized
    SerializationError,
    /// E603: File extension does not map to a known format
    UnsupportedFormat,

    // ========================================
    // Internal errors (9xx)
    // ========================================
    /// E901: Unexpected internal failure
    InternalError,
}

impl ErrorCode {
    /// Get the numeric error code.
    #[must_use]
    pub const fn numeric(&self) -> u16 {
        match self {
            Self::PrerequisiteMissing => 101,
            Self::PrerequisiteCycle => 102,
            Self::SkillDuplicate => 103,
            Self::PrerequisiteAmbiguous => 104,
            Self::SkillNotFound => 105,

            Self::LearnerInvalid => 201,

            Self::ConfigInvalid => 301,
            Self::ConfigMissingRequired => 302,

            Self::IoError => 601,
            Self::SerializationError => 602,
            Self::UnsupportedFormat => 603,

            Self::InternalError => 901,
        }
    }

    /// Get the error code as a formatted string (e.g., "E101").
    #[must_use]
    pub fn code_string(&self) -> String {
        format!("E{}", self.numeric())
    }

    /// Get the default suggestion for this error code.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::PrerequisiteMissing => "Fix the prerequisite reference so it names an existing skill id, or add the missing skill to the catalog",
            Self::PrerequisiteCycle => "Remove one prerequisite edge along the reported chain so the catalog becomes acyclic",
            Self::SkillDuplicate => "Give every catalog entry a unique id",
            Self::PrerequisiteAmbiguous => "Reference the prerequisite by its id instead of its display name",
            Self::SkillNotFound => "Run `skillpath validate --catalog <file>` to list the skills in the catalog",

            Self::LearnerInvalid => "Recreate the snapshot with `skillpath new-learner <id>` and check its JSON structure",

            Self::ConfigInvalid => "Check TOML syntax and value ranges in the config file",
            Self::ConfigMissingRequired => "Set the required config value in skillpath.toml or via SKILLPATH_* variables",

            Self::IoError => "File operation failed. Check the path exists and permissions are correct",
            Self::SerializationError => "The input data is malformed. Check it against the expected schema",
            Self::UnsupportedFormat => "Use a .yaml, .yml, .json or .toml file",

            Self::InternalError => "An unexpected error occurred. Please report this issue with full error output",
        }
    }

    /// Check if this error is potentially recoverable by the user.
    ///
    /// Integrity errors are not: a broken catalog must abort startup.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::SkillNotFound
            | Self::LearnerInvalid
            | Self::ConfigInvalid
            | Self::ConfigMissingRequired
            | Self::IoError
            | Self::SerializationError
            | Self::UnsupportedFormat => true,

            Self::PrerequisiteMissing
            | Self::PrerequisiteCycle
            | Self::SkillDuplicate
            | Self::PrerequisiteAmbiguous
            | Self::InternalError => false,
        }
    }

    /// Get the error category name.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self.numeric() / 100 {
            1 => "catalog",
            2 => "learner",
            3 => "config",
            6 => "storage",
            9 => "internal",
            _ => "unknown",
        }
    }

    /// Iterate over all error codes.
    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::PrerequisiteMissing,
            Self::PrerequisiteCycle,
            Self::SkillDuplicate,
            Self::PrerequisiteAmbiguous,
            Self::SkillNotFound,
            Self::LearnerInvalid,
            Self::ConfigInvalid,
            Self::ConfigMissingRequired,
            Self::IoError,
            Self::SerializationError,
            Self::UnsupportedFormat,
            Self::InternalError,
        ]
        .into_iter()
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code_string())
    }
}
