use std::path::Path;

use anyhow::Context;
use hp_config::HarpoonConfig;

use crate::cli::Commands;

/// Load configuration for `command`.
///
/// `integrate` reads `.env` and `.harpoon/config.toml` from the target
/// project when present; every other command uses the current directory.
pub fn load_config(command: &Commands) -> anyhow::Result<HarpoonConfig> {
    let root = match command {
        Commands::Integrate(args) if args.project.is_dir() => args.project.as_path(),
        _ => Path::new("."),
    };

    let env_path = root.join(".env");
    if env_path.is_file() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    } else {
        dotenvy::dotenv().ok();
    }

    HarpoonConfig::load_in(root)
        .with_context(|| format!("failed to load configuration for {}", root.display()))
}
