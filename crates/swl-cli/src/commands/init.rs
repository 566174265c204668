use anyhow::Context;
use swl_hooks::{GitCli, RepoHookInstaller};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InitArgs;
use crate::context::CommandContext;
use crate::output::output;

/// Handle `swl init`.
pub fn handle(args: &InitArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let ctx = CommandContext::resolve(flags, args.version.as_deref())?;
    let git = GitCli::new(ctx.config.git.program.clone(), ctx.config.git.wait);

    let report = RepoHookInstaller::new()
        .with_registrar(git)
        .run(&ctx.project)
        .with_context(|| {
            format!(
                "failed to install git hooks in '{}'",
                ctx.project.base_path.display()
            )
        })?;

    output(&report, flags.format)
}
