//! Settings for the `git config commit.template` invocation.

use serde::{Deserialize, Serialize};

fn default_program() -> String {
    "git".to_string()
}

const fn default_wait() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitConfig {
    /// Program used to register the commit template.
    #[serde(default = "default_program")]
    pub program: String,

    /// Wait for `git config` and report its exit status. When false the
    /// process is started and left to finish on its own.
    #[serde(default = "default_wait")]
    pub wait: bool,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            wait: default_wait(),
        }
    }
}
