use serde::Serialize;

use crate::assets::HookName;

/// Operating system family, as far as hook asset selection cares.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Windows,
    Unix,
}

impl Platform {
    #[must_use]
    pub const fn detect() -> Self {
        if cfg!(windows) { Self::Windows } else { Self::Unix }
    }

    /// Asset key of the hook variant for this platform.
    ///
    /// The installed file keeps the plain hook name either way.
    #[must_use]
    pub fn hook_asset_key(self, hook: HookName) -> String {
        match self {
            Self::Windows => format!("{hook}.cmd"),
            Self::Unix => hook.as_str().to_string(),
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::detect()
    }
}
