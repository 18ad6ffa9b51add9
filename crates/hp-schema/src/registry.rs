//! Registry of JSON Schemas for the documents Harpoon reads and writes.
//!
//! Schemas are built from hp-core types at construction time using
//! [`schemars::schema_for!`] and validated with `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;

use crate::error::SchemaError;

/// Central store of JSON Schemas, looked up by name.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// Insert a schema into the map, converting the `schemars` output to a
/// `serde_json::Value`. Panics if `serde_json::to_value` fails (should be
/// infallible for valid `schemars` output).
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, serde_json::to_value(schema_for!($ty)).unwrap());
    };
}

impl SchemaRegistry {
    /// Build a registry with the artifact and CLI response schemas.
    ///
    /// # Panics
    ///
    /// Panics if `serde_json::to_value` fails on a `schemars`-generated
    /// schema, which `schemars` output never triggers.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Input documents ---
        register!(
            schemas,
            "capture_artifact",
            hp_core::exchange::CaptureArtifact
        );

        // --- CLI response types ---
        register!(
            schemas,
            "extract_response",
            hp_core::responses::ExtractResponse
        );
        register!(
            schemas,
            "operation_summary",
            hp_core::responses::OperationSummary
        );
        register!(
            schemas,
            "integration_report",
            hp_core::responses::IntegrationReport
        );

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn registry_list_is_sorted_and_complete() {
        let names = SchemaRegistry::new().list();
        assert_eq!(
            names,
            vec![
                "capture_artifact",
                "extract_response",
                "integration_report",
                "operation_summary",
            ]
        );
    }

    #[test]
    fn valid_artifact_passes() {
        let artifact = json!({
            "request": {
                "url": "http://localhost:4000/graphql",
                "operationName": "GetThing",
                "variables": {"id": "42"},
                "query": "query GetThing($id: ID!) { getThing(id: $id) { id } }"
            },
            "response": {"data": {"getThing": {"id": "42"}}}
        });
        assert!(SchemaRegistry::new().validate("capture_artifact", &artifact).is_ok());
    }

    #[test]
    fn artifact_without_query_fails() {
        let artifact = json!({"request": {"url": "u", "operationName": "GetThing"}});
        let result = SchemaRegistry::new().validate("capture_artifact", &artifact);
        if let Err(SchemaError::ValidationFailed { errors }) = result {
            assert!(!errors.is_empty());
        } else {
            panic!("Expected ValidationFailed");
        }
    }

    #[test]
    fn artifact_with_numeric_operation_name_fails() {
        let artifact = json!({"request": {"operationName": 7, "query": "{ a }"}});
        assert!(
            SchemaRegistry::new()
                .validate("capture_artifact", &artifact)
                .is_err()
        );
    }

    #[test]
    fn validate_nonexistent_schema_returns_not_found() {
        let result = SchemaRegistry::new().validate("bogus", &json!({}));
        assert!(matches!(result, Err(SchemaError::NotFound(_))));
    }
}
