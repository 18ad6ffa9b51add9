//! Standalone script rendering options.

use serde::{Deserialize, Serialize};

const fn default_vus() -> u32 {
    1
}

const fn default_iterations() -> u32 {
    1
}

const fn default_check_rate() -> f64 {
    0.95
}

const fn default_p95_ms() -> u32 {
    800
}

const fn default_sleep_secs() -> f64 {
    0.2
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RenderConfig {
    /// Virtual users in the generated `options` block.
    #[serde(default = "default_vus")]
    pub vus: u32,

    /// Iterations in the generated `options` block.
    #[serde(default = "default_iterations")]
    pub iterations: u32,

    /// Minimum passing check rate threshold.
    #[serde(default = "default_check_rate")]
    pub check_rate: f64,

    /// 95th percentile request duration threshold, in milliseconds.
    #[serde(default = "default_p95_ms")]
    pub p95_ms: u32,

    /// Pause at the end of each iteration, in seconds.
    #[serde(default = "default_sleep_secs")]
    pub sleep_secs: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            vus: default_vus(),
            iterations: default_iterations(),
            check_rate: default_check_rate(),
            p95_ms: default_p95_ms(),
            sleep_secs: default_sleep_secs(),
        }
    }
}

impl RenderConfig {
    /// Reject values a load-testing runtime would refuse.
    pub(crate) fn validate(&self) -> Result<(), crate::ConfigError> {
        if self.vus == 0 {
            return Err(crate::ConfigError::InvalidValue {
                field: "render.vus".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.iterations == 0 {
            return Err(crate::ConfigError::InvalidValue {
                field: "render.iterations".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.check_rate) {
            return Err(crate::ConfigError::InvalidValue {
                field: "render.check_rate".to_string(),
                reason: format!("{} is outside 0.0..=1.0", self.check_rate),
            });
        }
        Ok(())
    }
}
