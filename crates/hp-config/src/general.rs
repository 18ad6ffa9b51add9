//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_endpoint() -> String {
    "http://localhost:4000/graphql".to_string()
}

fn default_endpoint_env() -> String {
    "GRAPHQL_URL".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Endpoint used when a capture artifact carries no URL.
    #[serde(default = "default_endpoint")]
    pub default_endpoint: String,

    /// Environment variable generated scripts read the endpoint from at run time.
    #[serde(default = "default_endpoint_env")]
    pub endpoint_env: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_endpoint: default_endpoint(),
            endpoint_env: default_endpoint_env(),
        }
    }
}
