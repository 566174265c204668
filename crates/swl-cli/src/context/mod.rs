mod manifest;
mod project_root;

pub use manifest::detect_version;
pub use project_root::find_project_root;

use std::path::PathBuf;

use anyhow::Context;
use swl_config::SwlConfig;
use swl_hooks::ProjectContext;

use crate::cli::GlobalFlags;

/// Everything a command needs: the project, its version and the config.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub project: ProjectContext,
    pub config: SwlConfig,
}

impl CommandContext {
    /// Resolve the project root and version for this invocation.
    ///
    /// Version precedence: `--project-version`, then `project.version` from
    /// config, then the project manifest.
    pub fn resolve(flags: &GlobalFlags, version_arg: Option<&str>) -> anyhow::Result<Self> {
        let root = resolve_project_root(flags.project.as_deref())?;
        let config = SwlConfig::load(&root).context("failed to load swl configuration")?;

        let version = match version_arg.or(config.project.version.as_deref()) {
            Some(version) => version.to_string(),
            None => detect_version(&root)?.with_context(|| {
                format!(
                    "no project version found in '{}'; pass --project-version or set project.version",
                    root.display()
                )
            })?,
        };

        tracing::debug!(root = %root.display(), %version, "resolved project");
        Ok(Self {
            project: ProjectContext::new(root, version),
            config,
        })
    }
}

fn resolve_project_root(project_override: Option<&str>) -> anyhow::Result<PathBuf> {
    if let Some(path) = project_override {
        let explicit = PathBuf::from(path);
        if !explicit.is_dir() {
            anyhow::bail!(
                "invalid --project '{}': directory does not exist",
                explicit.display()
            );
        }
        return explicit
            .canonicalize()
            .with_context(|| format!("failed to resolve '{}'", explicit.display()));
    }

    let start = std::env::current_dir().context("failed to read current directory")?;
    Ok(find_project_root(&start).unwrap_or(start))
}
