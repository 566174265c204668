use std::path::Path;
use std::process::{Command, Stdio};

use serde::Serialize;

use crate::error::HookError;
use crate::repo::GIT_DIR_NAME;

pub const COMMIT_TEMPLATE_CONFIG_KEY: &str = "commit.template";

/// Result of pointing `commit.template` at the generated template.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RegistrarOutcome {
    /// The config command ran and exited successfully.
    Configured,
    /// The config command was started and not waited for.
    Spawned,
    /// The config command ran and exited unsuccessfully.
    Failed { code: Option<i32>, stderr: String },
}

/// Registers a commit template with the repository's git config.
pub trait TemplateRegistrar {
    /// `template` is relative to `repo_root`, which is also the working
    /// directory of any process started. Only `<repo_root>/.git` may be
    /// changed, never a repository enclosing `repo_root`.
    ///
    /// Only a failure to start the registration is an error; an unsuccessful
    /// registration is reported through [`RegistrarOutcome::Failed`].
    fn register(&self, repo_root: &Path, template: &Path) -> Result<RegistrarOutcome, HookError>;
}

/// Runs `git config --file <root>/.git/config commit.template <path>`
/// through the git CLI.
#[derive(Clone, Debug)]
pub struct GitCli {
    program: String,
    wait: bool,
}

impl GitCli {
    #[must_use]
    pub fn new(program: impl Into<String>, wait: bool) -> Self {
        Self {
            program: program.into(),
            wait,
        }
    }

    fn command(&self, repo_root: &Path, template: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(["config", "--file"])
            .arg(repo_root.join(GIT_DIR_NAME).join("config"))
            .arg(COMMIT_TEMPLATE_CONFIG_KEY)
            .arg(template)
            .current_dir(repo_root)
            .stdin(Stdio::null())
            .stdout(Stdio::null());
        command
    }

    fn launch_error(&self, source: std::io::Error) -> HookError {
        HookError::GitLaunch {
            program: self.program.clone(),
            source,
        }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git", true)
    }
}

impl TemplateRegistrar for GitCli {
    #[allow(clippy::zombie_processes)]
    fn register(&self, repo_root: &Path, template: &Path) -> Result<RegistrarOutcome, HookError> {
        let mut command = self.command(repo_root, template);

        if !self.wait {
            command
                .stderr(Stdio::null())
                .spawn()
                .map_err(|error| self.launch_error(error))?;
            return Ok(RegistrarOutcome::Spawned);
        }

        let output = command
            .stderr(Stdio::piped())
            .output()
            .map_err(|error| self.launch_error(error))?;

        if output.status.success() {
            Ok(RegistrarOutcome::Configured)
        } else {
            Ok(RegistrarOutcome::Failed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}
