//! Scaffold project integration settings.

use serde::{Deserialize, Serialize};

fn default_entry_file() -> String {
    "main.ts".to_string()
}

fn default_data_env() -> String {
    "dev".to_string()
}

fn default_executor() -> String {
    "per-vu-iterations".to_string()
}

const fn default_vus() -> u32 {
    1
}

const fn default_iterations() -> u32 {
    1
}

fn default_max_duration() -> String {
    "5m".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScaffoldConfig {
    /// Orchestration entry file, relative to the project root.
    #[serde(default = "default_entry_file")]
    pub entry_file: String,

    /// Environment whose `testdata/testdata.<env>.ts` receives new scenarios.
    #[serde(default = "default_data_env")]
    pub data_env: String,

    /// k6 executor for new run-configuration scenarios.
    #[serde(default = "default_executor")]
    pub executor: String,

    #[serde(default = "default_vus")]
    pub vus: u32,

    #[serde(default = "default_iterations")]
    pub iterations: u32,

    /// Duration ceiling for new scenarios (k6 duration string).
    #[serde(default = "default_max_duration")]
    pub max_duration: String,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            entry_file: default_entry_file(),
            data_env: default_data_env(),
            executor: default_executor(),
            vus: default_vus(),
            iterations: default_iterations(),
            max_duration: default_max_duration(),
        }
    }
}
