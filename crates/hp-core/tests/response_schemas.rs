//! Serde roundtrip and JsonSchema validation tests for documents `hpn` writes.

use hp_core::enums::FileStatus;
use hp_core::exchange::{ArtifactRequest, CaptureArtifact};
use hp_core::responses::*;
use schemars::schema_for;
use serde_json::json;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

roundtrip_and_validate!(
    capture_artifact_roundtrip,
    CaptureArtifact,
    CaptureArtifact {
        request: ArtifactRequest {
            url: "http://localhost:4000/graphql".into(),
            operation_name: "GetCharacter".into(),
            variables: json!({"id": "1002", "limit": 5})
                .as_object()
                .cloned()
                .unwrap(),
            query: "query GetCharacter($id: ID!) { getCharacter(id: $id) { id } }".into(),
        },
        response: Some(json!({"data": {"getCharacter": {"id": "1002"}}})),
    }
);

roundtrip_and_validate!(
    extract_response_roundtrip,
    ExtractResponse,
    ExtractResponse {
        operation: "GetCharacter".into(),
        url: "http://localhost:4000/graphql".into(),
        output_path: "GetCharacter-capture.json".into(),
        has_response: true,
    }
);

roundtrip_and_validate!(
    operation_summary_roundtrip,
    OperationSummary,
    OperationSummary {
        index: 3,
        operation: "ListCharacters".into(),
        method: "POST".into(),
        url: "http://localhost:4000/graphql".into(),
        has_response: false,
    }
);

roundtrip_and_validate!(
    integration_report_roundtrip,
    IntegrationReport,
    IntegrationReport {
        operation: "GetCharacter".into(),
        scenario: "getCharacterTestScenario".into(),
        files: vec![
            FileOutcome {
                path: "queries/getCharacterQuery.ts".into(),
                status: FileStatus::Created,
                reason: None,
            },
            FileOutcome {
                path: "main.ts".into(),
                status: FileStatus::Skipped,
                reason: Some("scenario getCharacterTestScenario already registered".into()),
            },
        ],
        warnings: vec!["scenario getCharacterTestScenario already registered in main.ts".into()],
    }
);

#[test]
fn artifact_wire_names_match_capture_format() {
    let artifact = CaptureArtifact {
        request: ArtifactRequest {
            url: "u".into(),
            operation_name: "Op".into(),
            variables: serde_json::Map::new(),
            query: "query Op { a }".into(),
        },
        response: None,
    };
    let value = serde_json::to_value(&artifact).unwrap();
    assert_eq!(value["request"]["operationName"], "Op");
    assert!(value["request"].get("operation_name").is_none());
}
