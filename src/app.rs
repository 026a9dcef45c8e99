//! Per-invocation context shared by every command

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::core::catalog::{Catalog, CatalogReport};
use crate::engine::Engine;
use crate::error::{Result, SkillpathError};
use crate::learner::state::LearnerState;

pub struct AppContext {
    pub config: Config,
    pub output_format: OutputFormat,
    pub project_root: PathBuf,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let project_root = std::env::current_dir()?;
        let config = Config::load(cli.config.as_deref(), &project_root)?;
        Ok(Self::new(config, cli.output_format, project_root))
    }

    #[must_use]
    pub const fn new(config: Config, output_format: OutputFormat, project_root: PathBuf) -> Self {
        Self {
            config,
            output_format,
            project_root,
        }
    }

    #[must_use]
    pub const fn is_json(&self) -> bool {
        self.output_format.is_machine_readable()
    }

    /// Load, normalize and index a catalog, binding it to the configured rules.
    pub fn load_engine(&self, catalog_path: &Path) -> Result<(Engine, CatalogReport)> {
        let (index, report) = Catalog::from_path(catalog_path)?.into_index()?;
        let engine = Engine::new(index, self.config.rules()?);
        debug!(skills = engine.index().len(), "engine ready");
        Ok((engine, report))
    }

    /// Read a learner snapshot (JSON).
    pub fn load_learner(&self, path: &Path) -> Result<LearnerState> {
        let raw = std::fs::read_to_string(path)?;
        LearnerState::from_json(&raw).map_err(|err| match err {
            SkillpathError::Json(inner) => {
                SkillpathError::InvalidLearner(format!("{}: {inner}", path.display()))
            }
            other => other,
        })
    }
}
