use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `swl` binary.
#[derive(Debug, Parser)]
#[command(
    name = "swl",
    version,
    about = "Install a commit message template and git hooks for a project"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, text, raw
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Quiet mode (only errors are logged)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root path (defaults to the enclosing git repository)
    #[arg(short, long, global = true)]
    pub project: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            project: self.project.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["swl", "--format", "json", "--verbose", "status"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Status(_)));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["swl", "init", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn init_accepts_project_version() {
        let cli = Cli::try_parse_from(["swl", "init", "--project-version", "1.0.1"])
            .expect("cli should parse");

        let Commands::Init(args) = cli.command else {
            panic!("expected init");
        };
        assert_eq!(args.version.as_deref(), Some("1.0.1"));
    }

    #[test]
    fn default_format_is_text() {
        let cli = Cli::try_parse_from(["swl", "init"]).expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["swl", "--format", "xml", "init"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["swl", "--project", "/tmp/demo", "status"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.project.as_deref(), Some("/tmp/demo"));
        assert!(!flags.quiet);
        assert!(!flags.verbose);

        let cli = Cli::try_parse_from(["swl", "--quiet", "--verbose", "init"])
            .expect("cli should parse");
        let flags = cli.global_flags();
        assert!(flags.quiet);
        assert!(flags.verbose);
    }
}
