use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name of the version marker inside the git metadata directory.
pub const VERSION_MARKER_FILE: &str = ".version";

/// Last project version for which the template and hooks were generated.
#[derive(Debug, Clone)]
pub struct VersionMarker {
    path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCheck {
    pub changed: bool,
    pub previous: Option<String>,
    /// The marker was rewritten with the new version during this check.
    pub recorded: bool,
}

impl VersionMarker {
    #[must_use]
    pub fn at(git_dir: &Path) -> Self {
        Self {
            path: git_dir.join(VERSION_MARKER_FILE),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored version, or `None` when the marker is absent or unreadable.
    #[must_use]
    pub fn read(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Some(content),
            Err(error) if error.kind() == io::ErrorKind::NotFound => None,
            Err(error) => {
                tracing::debug!(path = %self.path.display(), %error, "version marker unreadable");
                None
            }
        }
    }

    pub fn write(&self, version: &str) -> io::Result<()> {
        fs::write(&self.path, version)
    }

    /// Compare the stored version with `version`, rewriting the marker when
    /// they differ.
    ///
    /// A failed rewrite is logged and otherwise ignored: the next run sees the
    /// stale marker and reports a change again.
    pub fn check(&self, version: &str) -> VersionCheck {
        let previous = self.read();
        let changed = previous.as_deref() != Some(version);
        let mut recorded = false;

        if changed {
            match self.write(version) {
                Ok(()) => recorded = true,
                Err(error) => tracing::warn!(
                    path = %self.path.display(),
                    %error,
                    "failed to record project version"
                ),
            }
        }

        VersionCheck {
            changed,
            previous,
            recorded,
        }
    }
}
