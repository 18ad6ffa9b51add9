//! # hp-config
//!
//! Layered configuration loading for Harpoon using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`HARPOON_*` prefix, `__` as separator)
//! 2. Project-level `.harpoon/config.toml`
//! 3. User-level `~/.config/harpoon/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `HARPOON_RENDER__VUS` -> `render.vus`,
//! `HARPOON_SCAFFOLD__DATA_ENV` -> `scaffold.data_env`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use hp_config::HarpoonConfig;
//!
//! let config = HarpoonConfig::load_with_dotenv().expect("config");
//! println!("default endpoint: {}", config.general.default_endpoint);
//! ```

mod error;
mod general;
mod render;
mod scaffold;
mod schema;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use render::RenderConfig;
pub use scaffold::ScaffoldConfig;
pub use schema::SchemaConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HarpoonConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub schema: SchemaConfig,
    #[serde(default)]
    pub scaffold: ScaffoldConfig,
}

impl HarpoonConfig {
    /// Load configuration from all sources, using the current directory as
    /// the project root.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_in(Path::new("."))
    }

    /// Load configuration with `<project_root>/.harpoon/config.toml` as the
    /// project-local layer.
    pub fn load_in(project_root: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_in(project_root).extract()?;
        config.render.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load()
    }

    /// Build the figment provider chain rooted at the current directory.
    pub fn figment() -> Figment {
        Self::figment_in(Path::new("."))
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment_in(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = project_root.join(".harpoon").join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("HARPOON_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("harpoon").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hp_core::enums::NumericStringPolicy;

    #[test]
    fn default_config_loads() {
        let config = HarpoonConfig::default();
        assert_eq!(config.render.vus, 1);
        assert_eq!(config.schema.numeric_strings, NumericStringPolicy::Literal);
        assert_eq!(config.scaffold.entry_file, "main.ts");
    }

    #[test]
    fn figment_builds_without_files() {
        let temp = tempfile::TempDir::new().expect("tempdir should create");
        let config: HarpoonConfig = HarpoonConfig::figment_in(temp.path())
            .extract()
            .expect("should extract defaults");
        assert_eq!(config.general.endpoint_env, "GRAPHQL_URL");
        assert_eq!(config.render.iterations, 1);
    }
}
