use std::path::{Path, PathBuf};

/// Name of the git metadata directory under the project root.
pub const GIT_DIR_NAME: &str = ".git";
/// File name of the generated commit template inside the metadata directory.
pub const TEMPLATE_FILE: &str = ".template.txt";
pub const HOOKS_DIR_NAME: &str = "hooks";

#[derive(Debug, Clone)]
pub struct RepoLayout {
    pub root: PathBuf,
    pub git_dir: PathBuf,
    pub hooks_dir: PathBuf,
    pub template_path: PathBuf,
}

impl RepoLayout {
    #[must_use]
    pub fn new(project_root: &Path) -> Self {
        let git_dir = project_root.join(GIT_DIR_NAME);
        Self {
            root: project_root.to_path_buf(),
            hooks_dir: git_dir.join(HOOKS_DIR_NAME),
            template_path: git_dir.join(TEMPLATE_FILE),
            git_dir,
        }
    }

    #[must_use]
    pub fn has_git_dir(&self) -> bool {
        self.git_dir.is_dir()
    }

    /// `.git` is a gitlink file, as in linked worktrees and submodules.
    #[must_use]
    pub fn has_gitlink_file(&self) -> bool {
        self.git_dir.is_file()
    }

    #[must_use]
    pub fn hook_path(&self, hook: &str) -> PathBuf {
        self.hooks_dir.join(hook)
    }

    /// Template path as written into `commit.template`, relative to the root.
    #[must_use]
    pub fn template_config_value(&self) -> PathBuf {
        self.template_path
            .strip_prefix(&self.root)
            .map_or_else(|_| self.template_path.clone(), Path::to_path_buf)
    }
}

/// Git settings that decide whether the generated artifacts are picked up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoConfig {
    pub commit_template: Option<String>,
    pub core_hooks_path: Option<String>,
}

impl RepoConfig {
    /// Read from the repository at `layout`.
    ///
    /// A metadata directory gix cannot open (for instance an empty `.git`)
    /// yields the empty config.
    #[must_use]
    pub fn read(layout: &RepoLayout) -> Self {
        let repo = match gix::open(&layout.git_dir) {
            Ok(repo) => repo,
            Err(error) => {
                tracing::debug!(path = %layout.git_dir.display(), %error, "cannot open repository config");
                return Self::default();
            }
        };
        let config = repo.config_snapshot();

        Self {
            commit_template: config.string("commit.template").map(|v| v.to_string()),
            core_hooks_path: config.string("core.hooksPath").map(|v| v.to_string()),
        }
    }

    /// Warning when `core.hooksPath` sends git somewhere other than `.git/hooks`.
    #[must_use]
    pub fn hooks_path_warning(&self, layout: &RepoLayout) -> Option<String> {
        let configured = self.core_hooks_path.as_deref()?.trim();
        if configured.is_empty() {
            return None;
        }

        let resolved = if Path::new(configured).is_absolute() {
            PathBuf::from(configured)
        } else {
            layout.root.join(configured)
        };
        if resolved == layout.hooks_dir {
            return None;
        }

        Some(format!(
            "core.hooksPath is set to '{configured}'; hooks in '{}' will not run",
            layout.hooks_dir.display()
        ))
    }
}
