//! Commit template and hook scripts embedded into the binary at build time.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// Asset key of the commit message template.
pub const COMMIT_TEMPLATE_KEY: &str = "commit-template";

/// Hooks managed by the installer, in the order they are written.
pub const HOOK_NAMES: [HookName; 2] = [HookName::PreCommit, HookName::CommitMsg];

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum HookName {
    PreCommit,
    CommitMsg,
}

impl HookName {
    /// File name inside the git hooks directory, also the plain asset key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PreCommit => "pre-commit",
            Self::CommitMsg => "commit-msg",
        }
    }
}

impl fmt::Display for HookName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only table of bundled assets keyed by logical name.
///
/// `None` means the asset is not shipped with this build; callers treat that
/// as a feature being unavailable rather than a failure.
pub trait AssetSource {
    fn lookup(&self, key: &str) -> Option<Cow<'static, [u8]>>;
}

/// Assets compiled in from `crates/swl-hooks/assets/`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BundledAssets;

const BUNDLED: [(&str, &[u8]); 5] = [
    (
        COMMIT_TEMPLATE_KEY,
        include_bytes!("../assets/commit-template.txt"),
    ),
    ("pre-commit", include_bytes!("../assets/pre-commit")),
    ("pre-commit.cmd", include_bytes!("../assets/pre-commit.cmd")),
    ("commit-msg", include_bytes!("../assets/commit-msg")),
    ("commit-msg.cmd", include_bytes!("../assets/commit-msg.cmd")),
];

impl AssetSource for BundledAssets {
    fn lookup(&self, key: &str) -> Option<Cow<'static, [u8]>> {
        BUNDLED
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, bytes)| Cow::Borrowed(*bytes))
    }
}
