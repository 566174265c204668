use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::assets::HOOK_NAMES;
use crate::error::HookError;
use crate::installer::{ProjectContext, SkipReason};
use crate::marker::VersionMarker;
use crate::repo::{RepoConfig, RepoLayout};

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ArtifactStatus {
    pub path: PathBuf,
    pub exists: bool,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct HookStatus {
    pub name: String,
    pub path: PathBuf,
    pub exists: bool,
    pub executable: bool,
}

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub project_root: PathBuf,
    pub git_dir_present: bool,
    pub recorded_version: Option<String>,
    pub expected_version: String,
    /// True when the next install run would write nothing.
    pub up_to_date: bool,
    pub template: ArtifactStatus,
    pub hooks: Vec<HookStatus>,
    pub commit_template_config: Option<String>,
    pub core_hooks_path: Option<String>,
    pub warnings: Vec<String>,
}

/// Inspect the generated artifacts without touching the repository.
pub fn status(context: &ProjectContext) -> Result<StatusReport, HookError> {
    let layout = RepoLayout::new(&context.base_path);
    let git_dir_present = layout.has_git_dir();

    let recorded_version = if git_dir_present {
        VersionMarker::at(&layout.git_dir).read()
    } else {
        None
    };

    let template = ArtifactStatus {
        exists: layout.template_path.is_file(),
        path: layout.template_path.clone(),
    };

    let mut hooks = Vec::with_capacity(HOOK_NAMES.len());
    for hook in HOOK_NAMES {
        let path = layout.hook_path(hook.as_str());
        hooks.push(HookStatus {
            name: hook.to_string(),
            exists: path.is_file(),
            executable: is_executable(&path)?,
            path,
        });
    }

    let config = if git_dir_present {
        RepoConfig::read(&layout)
    } else {
        RepoConfig::default()
    };

    let mut warnings = Vec::new();
    if let Some(reason) = SkipReason::for_layout(&layout) {
        warnings.push(reason.message().to_string());
    }
    if let Some(warning) = config.hooks_path_warning(&layout) {
        warnings.push(warning);
    }
    for hook in hooks.iter().filter(|hook| hook.exists && !hook.executable) {
        warnings.push(format!("hook '{}' is not executable", hook.name));
    }

    let up_to_date = git_dir_present
        && recorded_version.as_deref() == Some(context.version.as_str())
        && template.exists
        && hooks.iter().all(|hook| hook.exists);

    Ok(StatusReport {
        project_root: layout.root,
        git_dir_present,
        recorded_version,
        expected_version: context.version.clone(),
        up_to_date,
        template,
        hooks,
        commit_template_config: config.commit_template,
        core_hooks_path: config.core_hooks_path,
        warnings,
    })
}

fn is_executable(path: &Path) -> Result<bool, HookError> {
    if !path.is_file() {
        return Ok(false);
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(path)
            .map_err(|source| HookError::Metadata {
                path: path.to_path_buf(),
                source,
            })?
            .permissions()
            .mode();
        Ok(mode & 0o100 != 0)
    }
    #[cfg(not(unix))]
    {
        Ok(true)
    }
}
