//! # swl-config
//!
//! Layered configuration loading for swl using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SWL_*` prefix, `__` as separator)
//! 2. Project-level `<project>/.swl/config.toml`
//! 3. User-level `~/.config/swl/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SWL_GIT__PROGRAM` -> `git.program`, `SWL_PROJECT__VERSION` ->
//! `project.version`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use swl_config::SwlConfig;
//!
//! let config = SwlConfig::load(Path::new("/work/project")).expect("config");
//! println!("registering templates with {}", config.git.program);
//! ```

mod error;
mod git;
mod project;

pub use error::ConfigError;
pub use git::GitConfig;
pub use project::ProjectConfig;

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Directory holding the project-local config file.
pub const PROJECT_CONFIG_DIR: &str = ".swl";
pub const CONFIG_FILE: &str = "config.toml";
pub const ENV_PREFIX: &str = "SWL_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SwlConfig {
    #[serde(default)]
    pub git: GitConfig,
    #[serde(default)]
    pub project: ProjectConfig,
}

impl SwlConfig {
    /// Load configuration for the project rooted at `project_root`.
    pub fn load(project_root: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(project_root).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = Self::project_config_path(project_root);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    #[must_use]
    pub fn project_config_path(project_root: &Path) -> PathBuf {
        project_root.join(PROJECT_CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("swl").join(CONFIG_FILE))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.git.program.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "git.program".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self
            .project
            .version
            .as_deref()
            .is_some_and(|version| version.trim().is_empty())
        {
            return Err(ConfigError::InvalidValue {
                field: "project.version".to_string(),
                reason: "must not be empty when set".to_string(),
            });
        }
        Ok(())
    }
}
