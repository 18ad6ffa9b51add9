use anyhow::bail;
use hp_schema::SchemaRegistry;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Handle `hpn schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();
    let Some(schema) = registry.get(&args.name) else {
        bail!(
            "unknown schema '{}' (available: {})",
            args.name,
            registry.list().join(", ")
        );
    };
    output(schema, flags.format)
}
