use std::fmt::Write as _;

use serde::Serialize;
use swl_hooks::{InstallOutcome, InstallReport, StatusReport};

use crate::cli::OutputFormat;

/// Human-oriented rendering used by `--format text`.
pub trait TextReport {
    fn to_text(&self) -> String;
}

/// Render a report to a string in the requested format.
pub fn render<T: Serialize + TextReport>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Text => Ok(value.to_text()),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a report in the requested format.
pub fn output<T: Serialize + TextReport>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

impl TextReport for InstallReport {
    fn to_text(&self) -> String {
        let mut text = String::new();
        match self.outcome {
            InstallOutcome::Skipped(_) => {
                let _ = writeln!(text, "skipped {}", self.project_root.display());
            }
            InstallOutcome::Installed if self.generated.is_empty() => {
                let _ = writeln!(text, "up to date ({})", self.version);
            }
            InstallOutcome::Installed => {
                let _ = writeln!(
                    text,
                    "generated {} file(s) for {}",
                    self.generated.len(),
                    self.version
                );
                for artifact in &self.generated {
                    let _ = writeln!(text, "  {}", artifact.path.display());
                }
            }
        }
        for key in &self.unavailable {
            let _ = writeln!(text, "unavailable: {key}");
        }
        for warning in &self.warnings {
            let _ = writeln!(text, "warning: {warning}");
        }
        text.trim_end().to_string()
    }
}

impl TextReport for StatusReport {
    fn to_text(&self) -> String {
        let mut text = String::new();
        let _ = writeln!(
            text,
            "{} (recorded {}, expected {})",
            if self.up_to_date { "up to date" } else { "stale" },
            self.recorded_version.as_deref().unwrap_or("none"),
            self.expected_version
        );
        let _ = writeln!(
            text,
            "  template     {}",
            presence(self.template.exists)
        );
        for hook in &self.hooks {
            let state = match (hook.exists, hook.executable) {
                (false, _) => "missing",
                (true, false) => "not executable",
                (true, true) => "ok",
            };
            let _ = writeln!(text, "  {:<12} {state}", hook.name);
        }
        if let Some(template) = &self.commit_template_config {
            let _ = writeln!(text, "  commit.template = {template}");
        }
        for warning in &self.warnings {
            let _ = writeln!(text, "warning: {warning}");
        }
        text.trim_end().to_string()
    }
}

const fn presence(exists: bool) -> &'static str {
    if exists { "ok" } else { "missing" }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use swl_hooks::{ArtifactKind, GeneratedArtifact, SkipReason};

    use super::*;

    fn report(outcome: InstallOutcome) -> InstallReport {
        InstallReport {
            project_root: PathBuf::from("/work/demo"),
            version: "1.0.0".to_string(),
            outcome,
            version_changed: true,
            previous_version: None,
            generated: Vec::new(),
            unavailable: Vec::new(),
            template_registration: None,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn text_lists_generated_files() {
        let mut report = report(InstallOutcome::Installed);
        report.generated.push(GeneratedArtifact {
            kind: ArtifactKind::Hook,
            name: "pre-commit".to_string(),
            path: PathBuf::from("/work/demo/.git/hooks/pre-commit"),
        });

        let text = render(&report, OutputFormat::Text).unwrap();
        assert!(text.starts_with("generated 1 file(s) for 1.0.0"));
        assert!(text.contains(".git/hooks/pre-commit"));
    }

    #[test]
    fn text_reports_skip_and_warnings() {
        let mut report = report(InstallOutcome::Skipped(SkipReason::NoGitDir));
        report.warnings.push("git is not initialized".to_string());

        let text = render(&report, OutputFormat::Text).unwrap();
        assert!(text.starts_with("skipped /work/demo"));
        assert!(text.contains("warning: git is not initialized"));
    }

    #[test]
    fn json_output_tags_outcome() {
        let report = report(InstallOutcome::Skipped(SkipReason::NoGitDir));

        let json = render(&report, OutputFormat::Raw).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["outcome"]["status"], "skipped");
        assert_eq!(value["outcome"]["reason"], "no_git_dir");
    }
}
