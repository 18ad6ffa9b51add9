//! Schema inference options.

use hp_core::enums::NumericStringPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SchemaConfig {
    /// Classification of strings such as `"1002"`.
    #[serde(default)]
    pub numeric_strings: NumericStringPolicy,
}
