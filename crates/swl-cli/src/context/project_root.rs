use std::path::{Path, PathBuf};

/// Walk upwards from `start` until a directory containing `.git` is found.
#[must_use]
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(swl_hooks::GIT_DIR_NAME).is_dir() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}
