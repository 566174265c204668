use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::assets::{AssetSource, BundledAssets, COMMIT_TEMPLATE_KEY, HOOK_NAMES, HookName};
use crate::error::HookError;
use crate::git::{GitCli, RegistrarOutcome, TemplateRegistrar};
use crate::marker::VersionMarker;
use crate::platform::Platform;
use crate::repo::{RepoConfig, RepoLayout};

/// What the host build supplies for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    pub base_path: PathBuf,
    pub version: String,
}

impl ProjectContext {
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>, version: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            version: version.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    VersionMarker,
    CommitTemplate,
    Hook,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    pub name: String,
    pub path: PathBuf,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoGitDir,
    /// `.git` is a file pointing at metadata stored elsewhere.
    GitLinkFile,
}

impl SkipReason {
    /// Why nothing can be generated under `layout`, if anything.
    #[must_use]
    pub fn for_layout(layout: &RepoLayout) -> Option<Self> {
        if layout.has_git_dir() {
            None
        } else if layout.has_gitlink_file() {
            Some(Self::GitLinkFile)
        } else {
            Some(Self::NoGitDir)
        }
    }

    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NoGitDir => "git is not initialized, run `git init` first",
            Self::GitLinkFile => {
                "`.git` is a file (linked worktree or submodule), hooks are only installed into a `.git` directory"
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum InstallOutcome {
    Installed,
    Skipped(SkipReason),
}

#[derive(Debug, Serialize)]
pub struct InstallReport {
    pub project_root: PathBuf,
    pub version: String,
    pub outcome: InstallOutcome,
    pub version_changed: bool,
    pub previous_version: Option<String>,
    /// Every file written during the run, in write order.
    pub generated: Vec<GeneratedArtifact>,
    /// Asset keys that were needed but are not bundled in this build.
    pub unavailable: Vec<String>,
    pub template_registration: Option<RegistrarOutcome>,
    pub warnings: Vec<String>,
}

impl InstallReport {
    fn new(context: &ProjectContext) -> Self {
        Self {
            project_root: context.base_path.clone(),
            version: context.version.clone(),
            outcome: InstallOutcome::Installed,
            version_changed: false,
            previous_version: None,
            generated: Vec::new(),
            unavailable: Vec::new(),
            template_registration: None,
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, InstallOutcome::Skipped(_))
    }

    #[must_use]
    pub fn wrote(&self, kind: ArtifactKind, name: &str) -> bool {
        self.generated
            .iter()
            .any(|artifact| artifact.kind == kind && artifact.name == name)
    }

    fn record(&mut self, kind: ArtifactKind, name: &str, path: &Path) {
        self.generated.push(GeneratedArtifact {
            kind,
            name: name.to_string(),
            path: path.to_path_buf(),
        });
    }
}

/// Keeps the commit template and hooks of a repository in step with the
/// project version.
pub struct RepoHookInstaller {
    assets: Box<dyn AssetSource>,
    registrar: Box<dyn TemplateRegistrar>,
    platform: Platform,
}

impl Default for RepoHookInstaller {
    fn default() -> Self {
        Self::new()
    }
}

impl RepoHookInstaller {
    /// Bundled assets, the `git` CLI and the host platform.
    #[must_use]
    pub fn new() -> Self {
        Self {
            assets: Box::new(BundledAssets),
            registrar: Box::new(GitCli::default()),
            platform: Platform::detect(),
        }
    }

    #[must_use]
    pub fn with_assets(mut self, assets: impl AssetSource + 'static) -> Self {
        self.assets = Box::new(assets);
        self
    }

    #[must_use]
    pub fn with_registrar(mut self, registrar: impl TemplateRegistrar + 'static) -> Self {
        self.registrar = Box::new(registrar);
        self
    }

    #[must_use]
    pub const fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Generate whatever is missing or stale under `<base>/.git`.
    ///
    /// A project without a `.git` directory is skipped with a warning. A
    /// changed (or missing) version marker regenerates every artifact;
    /// otherwise only missing files are written.
    pub fn run(&self, context: &ProjectContext) -> Result<InstallReport, HookError> {
        let layout = RepoLayout::new(&context.base_path);
        let mut report = InstallReport::new(context);

        if let Some(reason) = SkipReason::for_layout(&layout) {
            tracing::warn!(
                project = %context.base_path.display(),
                "{}",
                reason.message()
            );
            report.outcome = InstallOutcome::Skipped(reason);
            report.warnings.push(reason.message().to_string());
            return Ok(report);
        }

        let marker = VersionMarker::at(&layout.git_dir);
        let check = marker.check(&context.version);
        report.version_changed = check.changed;
        report.previous_version = check.previous;
        if check.recorded {
            report.record(ArtifactKind::VersionMarker, ".version", marker.path());
        }

        if let Some(warning) = RepoConfig::read(&layout).hooks_path_warning(&layout) {
            tracing::warn!("{warning}");
            report.warnings.push(warning);
        }

        if check.changed || !layout.template_path.exists() {
            self.generate_template(&layout, &mut report)?;
        } else {
            tracing::debug!(path = %layout.template_path.display(), "commit template up to date");
        }

        for hook in HOOK_NAMES {
            let path = layout.hook_path(hook.as_str());
            if check.changed || !path.exists() {
                self.generate_hook(&layout, hook, &mut report)?;
            } else {
                tracing::debug!(%hook, "hook up to date");
            }
        }

        Ok(report)
    }

    fn generate_template(
        &self,
        layout: &RepoLayout,
        report: &mut InstallReport,
    ) -> Result<(), HookError> {
        let Some(content) = self.assets.lookup(COMMIT_TEMPLATE_KEY) else {
            tracing::debug!(key = COMMIT_TEMPLATE_KEY, "asset not bundled, skipping");
            report.unavailable.push(COMMIT_TEMPLATE_KEY.to_string());
            return Ok(());
        };

        write_file(&layout.template_path, &content)?;
        report.record(
            ArtifactKind::CommitTemplate,
            COMMIT_TEMPLATE_KEY,
            &layout.template_path,
        );

        let outcome = self
            .registrar
            .register(&layout.root, &layout.template_config_value())?;
        if let RegistrarOutcome::Failed { code, stderr } = &outcome {
            tracing::warn!(?code, %stderr, "git config commit.template failed");
            report
                .warnings
                .push(format!("git config commit.template exited with {code:?}: {stderr}"));
        }
        report.template_registration = Some(outcome);

        tracing::info!(path = %layout.template_path.display(), "generated commit message template");
        Ok(())
    }

    fn generate_hook(
        &self,
        layout: &RepoLayout,
        hook: HookName,
        report: &mut InstallReport,
    ) -> Result<(), HookError> {
        let key = self.platform.hook_asset_key(hook);
        let Some(content) = self.assets.lookup(&key) else {
            tracing::debug!(%key, "asset not bundled, skipping");
            report.unavailable.push(key);
            return Ok(());
        };

        fs::create_dir_all(&layout.hooks_dir).map_err(|source| HookError::CreateDir {
            path: layout.hooks_dir.clone(),
            source,
        })?;

        let path = layout.hook_path(hook.as_str());
        write_file(&path, &content)?;
        make_executable(&path)?;
        report.record(ArtifactKind::Hook, hook.as_str(), &path);

        tracing::info!(%hook, path = %path.display(), "generated git hook");
        Ok(())
    }
}

fn write_file(path: &Path, content: &[u8]) -> Result<(), HookError> {
    fs::write(path, content).map_err(|source| HookError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), HookError> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = |path: &Path| {
        fs::metadata(path).map_err(|source| HookError::Metadata {
            path: path.to_path_buf(),
            source,
        })
    };

    let mut perms = metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).map_err(|source| HookError::Permissions {
        path: path.to_path_buf(),
        source,
    })?;

    ensure_owner_executable(path, metadata(path)?.permissions().mode())
}

/// The mode observed after `set_permissions` must carry the owner-exec bit.
#[cfg(unix)]
fn ensure_owner_executable(path: &Path, mode: u32) -> Result<(), HookError> {
    if mode & 0o100 == 0 {
        return Err(HookError::NotExecutable(path.to_path_buf()));
    }
    Ok(())
}

// Windows has no executable bit; git for Windows runs any file in hooks/.
#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<(), HookError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    /// Registrar that records calls instead of running git.
    #[derive(Clone, Default)]
    struct RecordingRegistrar {
        calls: Rc<RefCell<Vec<(PathBuf, PathBuf)>>>,
    }

    impl TemplateRegistrar for RecordingRegistrar {
        fn register(
            &self,
            repo_root: &Path,
            template: &Path,
        ) -> Result<RegistrarOutcome, HookError> {
            self.calls
                .borrow_mut()
                .push((repo_root.to_path_buf(), template.to_path_buf()));
            Ok(RegistrarOutcome::Configured)
        }
    }

    /// Bundled assets that remember which keys were requested.
    #[derive(Clone, Default)]
    struct RecordingAssets {
        requested: Rc<RefCell<Vec<String>>>,
    }

    impl AssetSource for RecordingAssets {
        fn lookup(&self, key: &str) -> Option<Cow<'static, [u8]>> {
            self.requested.borrow_mut().push(key.to_string());
            BundledAssets.lookup(key)
        }
    }

    struct NoAssets;

    impl AssetSource for NoAssets {
        fn lookup(&self, _key: &str) -> Option<Cow<'static, [u8]>> {
            None
        }
    }

    fn project_with_git() -> tempfile::TempDir {
        let dir = tempfile::TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        dir
    }

    #[rstest]
    #[case(Platform::Windows, vec!["commit-template", "pre-commit.cmd", "commit-msg.cmd"])]
    #[case(Platform::Unix, vec!["commit-template", "pre-commit", "commit-msg"])]
    fn hook_lookup_uses_platform_variant(#[case] platform: Platform, #[case] expected: Vec<&str>) {
        let dir = project_with_git();
        let assets = RecordingAssets::default();
        let installer = RepoHookInstaller::new()
            .with_assets(assets.clone())
            .with_registrar(RecordingRegistrar::default())
            .with_platform(platform);

        installer
            .run(&ProjectContext::new(dir.path(), "1.0.0"))
            .unwrap();

        assert_eq!(*assets.requested.borrow(), expected);
        // Installed file names never carry the variant suffix.
        assert!(dir.path().join(".git/hooks/pre-commit").is_file());
        assert!(!dir.path().join(".git/hooks/pre-commit.cmd").exists());
    }

    #[test]
    fn template_is_registered_relative_to_repo_root() {
        let dir = project_with_git();
        let registrar = RecordingRegistrar::default();
        let installer = RepoHookInstaller::new()
            .with_registrar(registrar.clone())
            .with_platform(Platform::Unix);

        let report = installer
            .run(&ProjectContext::new(dir.path(), "1.0.0"))
            .unwrap();

        assert_eq!(
            *registrar.calls.borrow(),
            vec![(
                dir.path().to_path_buf(),
                PathBuf::from(".git/.template.txt")
            )]
        );
        assert_eq!(
            report.template_registration,
            Some(RegistrarOutcome::Configured)
        );
    }

    #[test]
    fn missing_assets_are_skipped_silently() {
        let dir = project_with_git();
        let registrar = RecordingRegistrar::default();
        let installer = RepoHookInstaller::new()
            .with_assets(NoAssets)
            .with_registrar(registrar.clone())
            .with_platform(Platform::Unix);

        let report = installer
            .run(&ProjectContext::new(dir.path(), "1.0.0"))
            .unwrap();

        assert_eq!(
            report.unavailable,
            vec!["commit-template", "pre-commit", "commit-msg"]
        );
        assert!(!dir.path().join(".git/.template.txt").exists());
        assert!(!dir.path().join(".git/hooks").exists());
        assert!(registrar.calls.borrow().is_empty());
        // Only the marker was written.
        assert_eq!(report.generated.len(), 1);
        assert_eq!(report.generated[0].kind, ArtifactKind::VersionMarker);
    }

    #[test]
    fn failed_registration_is_a_warning() {
        struct FailingRegistrar;
        impl TemplateRegistrar for FailingRegistrar {
            fn register(&self, _: &Path, _: &Path) -> Result<RegistrarOutcome, HookError> {
                Ok(RegistrarOutcome::Failed {
                    code: Some(128),
                    stderr: "fatal: not in a git directory".to_string(),
                })
            }
        }

        let dir = project_with_git();
        let report = RepoHookInstaller::new()
            .with_registrar(FailingRegistrar)
            .with_platform(Platform::Unix)
            .run(&ProjectContext::new(dir.path(), "1.0.0"))
            .unwrap();

        assert_eq!(report.outcome, InstallOutcome::Installed);
        assert!(report.wrote(ArtifactKind::CommitTemplate, COMMIT_TEMPLATE_KEY));
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("128"));
    }

    #[test]
    fn launch_failure_aborts_after_template_write() {
        let dir = project_with_git();
        let result = RepoHookInstaller::new()
            .with_registrar(GitCli::new("swl-test-no-such-git-binary", true))
            .with_platform(Platform::Unix)
            .run(&ProjectContext::new(dir.path(), "1.0.0"));

        assert!(matches!(result, Err(HookError::GitLaunch { .. })));
        // No rollback: the template stays, hooks were never reached.
        assert!(dir.path().join(".git/.template.txt").is_file());
        assert!(!dir.path().join(".git/hooks/pre-commit").exists());
    }

    #[test]
    fn unwritable_hook_path_is_fatal() {
        let dir = project_with_git();
        // A directory where the hook file should go makes the write fail.
        fs::create_dir_all(dir.path().join(".git/hooks/pre-commit")).unwrap();

        let result = RepoHookInstaller::new()
            .with_registrar(RecordingRegistrar::default())
            .with_platform(Platform::Unix)
            .run(&ProjectContext::new(dir.path(), "1.0.0"));

        assert!(matches!(result, Err(HookError::Write { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn mode_without_owner_exec_bit_is_fatal() {
        let path = Path::new("/work/demo/.git/hooks/pre-commit");

        for mode in [0o644, 0o600, 0o055] {
            let result = ensure_owner_executable(path, mode);
            assert!(
                matches!(&result, Err(HookError::NotExecutable(p)) if p == path),
                "mode {mode:o} should be rejected"
            );
        }
        assert!(ensure_owner_executable(path, 0o755).is_ok());
        assert!(ensure_owner_executable(path, 0o100).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn vanished_hook_cannot_be_made_executable() {
        let dir = tempfile::TempDir::new().unwrap();

        let result = make_executable(&dir.path().join("gone"));

        assert!(matches!(result, Err(HookError::Metadata { .. })));
    }

    #[test]
    fn existing_files_survive_when_version_is_unchanged() {
        let dir = project_with_git();
        let git_dir = dir.path().join(".git");
        fs::create_dir(git_dir.join("hooks")).unwrap();
        fs::write(git_dir.join(".version"), "1.0.0").unwrap();
        fs::write(git_dir.join(".template.txt"), "custom template").unwrap();
        fs::write(git_dir.join("hooks/pre-commit"), "#!/bin/sh\nexit 0\n").unwrap();

        let report = RepoHookInstaller::new()
            .with_registrar(RecordingRegistrar::default())
            .with_platform(Platform::Unix)
            .run(&ProjectContext::new(dir.path(), "1.0.0"))
            .unwrap();

        assert!(!report.version_changed);
        assert_eq!(
            fs::read_to_string(git_dir.join(".template.txt")).unwrap(),
            "custom template"
        );
        assert_eq!(report.generated.len(), 1);
        assert!(report.wrote(ArtifactKind::Hook, "commit-msg"));
    }
}
