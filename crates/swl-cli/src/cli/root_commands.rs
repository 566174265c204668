use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Install or refresh the commit template and git hooks.
    Init(InitArgs),
    /// Report which generated files are present and current.
    Status(StatusArgs),
}

/// Arguments for `swl init`.
#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Project version to record (defaults to config, then the project manifest)
    #[arg(long = "project-version")]
    pub version: Option<String>,
}

/// Arguments for `swl status`.
#[derive(Clone, Debug, Args)]
pub struct StatusArgs {
    /// Project version to compare against (defaults to config, then the project manifest)
    #[arg(long = "project-version")]
    pub version: Option<String>,
}
