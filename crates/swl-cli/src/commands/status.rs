use crate::cli::GlobalFlags;
use crate::cli::root_commands::StatusArgs;
use crate::context::CommandContext;
use crate::output::output;

/// Handle `swl status`.
pub fn handle(args: &StatusArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let ctx = CommandContext::resolve(flags, args.version.as_deref())?;
    let report = swl_hooks::status(&ctx.project)?;
    output(&report, flags.format)
}
