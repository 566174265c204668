use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures of an install or status run.
///
/// Missing `.git`, missing bundled assets and version marker I/O are not
/// errors; they never reach this type.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read metadata of '{path}': {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to set permissions on '{path}': {source}")]
    Permissions {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("hook '{0}' is not executable after setting permissions")]
    NotExecutable(PathBuf),
    #[error("failed to launch '{program}': {source}")]
    GitLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
