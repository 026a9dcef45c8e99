//! CLI module - Command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use output::OutputFormat;

pub mod commands;
pub mod output;

/// skillpath - skill graph recommendations, learning pathways and progression
#[derive(Parser, Debug)]
#[command(name = "skillpath")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (human, json, plain)
    #[arg(long, short = 'O', global = true, value_enum, default_value = "human")]
    pub output_format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable logging entirely (RUST_LOG is ignored)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (default: ~/.config/skillpath/config.toml, then ./skillpath.toml)
    #[arg(long, global = true, env = "SKILLPATH_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a catalog for integrity errors and data-quality warnings
    Validate(commands::validate::ValidateArgs),

    /// Show one skill with its prerequisites and dependents
    Show(commands::show::ShowArgs),

    /// Rank the skills a learner is ready for
    Recommend(commands::recommend::RecommendArgs),

    /// Ordered pathway from current mastery to a goal skill
    Pathway(commands::pathway::PathwayArgs),

    /// Apply progression events to a learner snapshot
    Apply(commands::apply::ApplyArgs),

    /// Create a fresh learner snapshot
    NewLearner(commands::new_learner::NewLearnerArgs),
}
