use hp_config::HarpoonConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(
    command: Commands,
    config: &HarpoonConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Extract(args) => commands::extract::handle(&args, flags),
        Commands::Operations(args) => commands::operations::handle(&args, flags),
        Commands::Generate(args) => commands::generate::handle(&args, config, flags),
        Commands::Inspect(args) => commands::inspect::handle(&args, config, flags),
        Commands::Integrate(args) => commands::integrate::handle(&args, config, flags),
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
