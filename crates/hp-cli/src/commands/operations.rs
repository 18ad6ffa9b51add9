use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::OperationsArgs;
use crate::output::output;

/// Handle `hpn operations`.
pub fn handle(args: &OperationsArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let operations = hp_capture::list_operations(&args.capture)
        .with_context(|| format!("failed to list operations in {}", args.capture.display()))?;
    tracing::debug!(count = operations.len(), "listed GraphQL operations");
    output(&operations, flags.format)
}
