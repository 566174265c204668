//! # swl-hooks
//!
//! Commit message template and git hook installation.
//!
//! On every run the installer compares the project version with the marker
//! stored in `.git/.version`. A first run or a version bump rewrites
//! `.git/.template.txt`, registers it as `commit.template`, and rewrites the
//! `pre-commit` and `commit-msg` hooks. Otherwise only missing files are
//! regenerated.
//!
//! ```no_run
//! use swl_hooks::{ProjectContext, RepoHookInstaller};
//!
//! let context = ProjectContext::new("/work/project", "1.4.0");
//! let report = RepoHookInstaller::new().run(&context).expect("install");
//! for artifact in &report.generated {
//!     println!("wrote {}", artifact.path.display());
//! }
//! ```

mod assets;
mod error;
mod git;
mod installer;
mod marker;
mod platform;
mod repo;
mod status;

pub use assets::{AssetSource, BundledAssets, COMMIT_TEMPLATE_KEY, HOOK_NAMES, HookName};
pub use error::HookError;
pub use git::{COMMIT_TEMPLATE_CONFIG_KEY, GitCli, RegistrarOutcome, TemplateRegistrar};
pub use installer::{
    ArtifactKind, GeneratedArtifact, InstallOutcome, InstallReport, ProjectContext,
    RepoHookInstaller, SkipReason,
};
pub use marker::{VERSION_MARKER_FILE, VersionCheck, VersionMarker};
pub use platform::Platform;
pub use repo::{GIT_DIR_NAME, HOOKS_DIR_NAME, RepoConfig, RepoLayout, TEMPLATE_FILE};
pub use status::{ArtifactStatus, HookStatus, StatusReport, status};
