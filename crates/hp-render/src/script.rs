//! Standalone k6 script rendering.

use hp_core::checks::{AccessPath, CheckKind, CheckSpec};
use hp_core::naming::{is_js_identifier, is_valid_operation_name};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::RenderError;
use crate::escape;

/// Binding of the parsed response inside generated check callbacks.
const BINDING: &str = "r";

/// Load profile and thresholds written into the script's `options`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScriptOptions {
    pub vus: u32,
    pub iterations: u32,
    /// Minimum passing rate for the `checks` threshold, in `0..=1`.
    pub check_rate: f64,
    /// Ceiling for `http_req_duration` p(95), in milliseconds.
    pub p95_ms: u64,
    /// Pause at the end of each iteration, in seconds.
    pub sleep_secs: f64,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            vus: 1,
            iterations: 1,
            check_rate: 0.95,
            p95_ms: 800,
            sleep_secs: 0.2,
        }
    }
}

/// The typed slots of a generated script.
#[derive(Debug, Clone)]
pub struct ScriptSlots<'a> {
    pub endpoint: &'a str,
    /// Environment variable consulted before `endpoint` at run time.
    pub endpoint_env: Option<&'a str>,
    pub operation_name: &'a str,
    pub variables: &'a Map<String, Value>,
    pub query: &'a str,
    pub checks: &'a [CheckSpec],
    pub options: ScriptOptions,
}

/// Render a runnable k6 script: one POST of the operation, a status check, an
/// error-absence check, then `slots.checks` in order.
///
/// # Errors
///
/// `InvalidSlot` when the operation name is not a GraphQL name, the endpoint
/// variable is not a JavaScript identifier, or an option is out of range.
pub fn render_script(slots: &ScriptSlots<'_>) -> Result<String, RenderError> {
    validate(slots)?;

    let url = match slots.endpoint_env {
        Some(env) => format!("__ENV.{env} || {}", escape::single_quoted(slots.endpoint)),
        None => escape::single_quoted(slots.endpoint),
    };
    let variables = serde_json::to_string_pretty(slots.variables)?;
    let options = &slots.options;

    let mut out = String::new();
    out.push_str("import http from 'k6/http';\n");
    out.push_str("import { check, sleep } from 'k6';\n\n");

    out.push_str("export const options = {\n");
    out.push_str(&format!("  vus: {},\n", options.vus));
    out.push_str(&format!("  iterations: {},\n", options.iterations));
    out.push_str("  thresholds: {\n");
    out.push_str(&format!("    checks: ['rate>{}'],\n", options.check_rate));
    out.push_str(&format!(
        "    http_req_duration: ['p(95)<{}'],\n",
        options.p95_ms
    ));
    out.push_str("  },\n};\n\n");

    out.push_str(&format!("const url = {url};\n\n"));
    out.push_str(&format!("const variables = {variables};\n\n"));
    out.push_str(&format!(
        "const query = `{}`;\n\n",
        escape::template_literal(slots.query)
    ));

    out.push_str("export default function () {\n");
    out.push_str("  const payload = JSON.stringify({\n");
    out.push_str(&format!(
        "    operationName: {},\n",
        escape::single_quoted(slots.operation_name)
    ));
    out.push_str("    query,\n    variables,\n  });\n");
    out.push_str("  const params = { headers: { 'Content-Type': 'application/json' } };\n");
    out.push_str("  const res = http.post(url, payload, params);\n\n");

    out.push_str("  check(res, {\n");
    out.push_str("    'status is 200': (r) => r.status === 200,\n");
    out.push_str("  });\n\n");

    out.push_str("  const json = res.json();\n\n");
    out.push_str("  check(json, {\n");
    out.push_str("    'no errors': (r) => r.errors === undefined,\n");
    for check in slots.checks {
        out.push_str(&format!(
            "    {}: ({BINDING}) => {},\n",
            escape::single_quoted(&check.description()),
            guarded_condition(check)
        ));
    }
    out.push_str("  });\n\n");

    out.push_str(&format!("  sleep({});\n", options.sleep_secs));
    out.push_str("}\n");
    Ok(out)
}

/// Boolean JavaScript expression asserting `kind` about the value at `path`.
#[must_use]
pub fn condition(path: &AccessPath, kind: &CheckKind, binding: &str) -> String {
    let target = path.expression(binding);
    match kind {
        CheckKind::Exists => format!("{target} !== undefined"),
        CheckKind::TypeOf { primitive } => format!("typeof {target} === '{primitive}'"),
        CheckKind::IsArray => format!("Array.isArray({target})"),
        CheckKind::EqualsLiteral { value } => format!("{target} === {value}"),
    }
}

/// Expression that holds when every guard array is non-empty.
#[must_use]
pub fn guard_expression(guards: &[AccessPath], binding: &str) -> Option<String> {
    if guards.is_empty() {
        return None;
    }
    Some(
        guards
            .iter()
            .map(|guard| format!("{}?.length > 0", guard.expression(binding)))
            .collect::<Vec<_>>()
            .join(" && "),
    )
}

fn guarded_condition(check: &CheckSpec) -> String {
    let condition = condition(&check.path, &check.kind, BINDING);
    match guard_expression(&check.guards, BINDING) {
        Some(guard) => format!("!({guard}) || {condition}"),
        None => condition,
    }
}

fn validate(slots: &ScriptSlots<'_>) -> Result<(), RenderError> {
    if !is_valid_operation_name(slots.operation_name) {
        return Err(RenderError::InvalidSlot {
            slot: "operation name",
            reason: format!("{:?} is not a GraphQL name", slots.operation_name),
        });
    }
    if let Some(env) = slots.endpoint_env
        && !is_js_identifier(env)
    {
        return Err(RenderError::InvalidSlot {
            slot: "endpoint variable",
            reason: format!("{env:?} is not a JavaScript identifier"),
        });
    }
    let options = &slots.options;
    if options.vus == 0 || options.iterations == 0 {
        return Err(RenderError::InvalidSlot {
            slot: "options",
            reason: "vus and iterations must be positive".to_string(),
        });
    }
    if !(0.0..=1.0).contains(&options.check_rate) {
        return Err(RenderError::InvalidSlot {
            slot: "options",
            reason: format!("check rate {} is outside 0..=1", options.check_rate),
        });
    }
    if !options.sleep_secs.is_finite() || options.sleep_secs < 0.0 {
        return Err(RenderError::InvalidSlot {
            slot: "options",
            reason: format!("sleep {} is not a non-negative duration", options.sleep_secs),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use hp_core::enums::PrimitiveKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn items() -> AccessPath {
        AccessPath::root().field("data").field("list").field("items")
    }

    fn slots<'a>(
        variables: &'a Map<String, Value>,
        query: &'a str,
        checks: &'a [CheckSpec],
    ) -> ScriptSlots<'a> {
        ScriptSlots {
            endpoint: "http://localhost:4000/graphql",
            endpoint_env: Some("GRAPHQL_URL"),
            operation_name: "GetThing",
            variables,
            query,
            checks,
            options: ScriptOptions::default(),
        }
    }

    #[test]
    fn conditions_cover_every_kind() {
        let id = items().first_element().field("id");
        assert_eq!(
            condition(&id, &CheckKind::TypeOf { primitive: PrimitiveKind::String }, "r"),
            "typeof r.data?.list?.items?.[0]?.id === 'string'"
        );
        assert_eq!(
            condition(&items(), &CheckKind::IsArray, "r"),
            "Array.isArray(r.data?.list?.items)"
        );
        assert_eq!(
            condition(&items(), &CheckKind::Exists, "r"),
            "r.data?.list?.items !== undefined"
        );
        assert_eq!(
            condition(&id, &CheckKind::EqualsLiteral { value: json!("Item") }, "r"),
            r#"r.data?.list?.items?.[0]?.id === "Item""#
        );
    }

    #[test]
    fn guarded_checks_are_vacuous_for_empty_arrays() {
        let check = CheckSpec::new(
            items().first_element().field("id"),
            CheckKind::TypeOf { primitive: PrimitiveKind::String },
            vec![items()],
        );
        assert_eq!(
            guarded_condition(&check),
            "!(r.data?.list?.items?.length > 0) || typeof r.data?.list?.items?.[0]?.id === 'string'"
        );
    }

    #[test]
    fn script_contains_request_and_fixed_checks() {
        let variables = json!({"id": "42", "limit": 10}).as_object().cloned().unwrap();
        let checks = [CheckSpec::new(
            AccessPath::root().field("data"),
            CheckKind::Exists,
            Vec::new(),
        )];
        let script = render_script(&slots(&variables, "query GetThing { a }", &checks)).unwrap();

        assert!(script.contains("const url = __ENV.GRAPHQL_URL || 'http://localhost:4000/graphql';"));
        assert!(script.contains("operationName: 'GetThing',"));
        assert!(script.contains("http.post(url, payload, params)"));
        assert!(script.contains("'status is 200': (r) => r.status === 200,"));
        assert!(script.contains("'no errors': (r) => r.errors === undefined,"));
        assert!(script.contains("'data exists': (r) => r.data !== undefined,"));
        assert!(script.contains("checks: ['rate>0.95'],"));
        assert!(script.contains("http_req_duration: ['p(95)<800'],"));
        assert!(script.contains("sleep(0.2);"));
    }

    #[test]
    fn variables_keep_order_and_kinds() {
        let variables: Map<String, Value> =
            serde_json::from_str(r#"{"zeta": "1", "alpha": 1, "mid": [true, null]}"#).unwrap();
        let script = render_script(&slots(&variables, "{ a }", &[])).unwrap();
        let expected = "const variables = {\n  \"zeta\": \"1\",\n  \"alpha\": 1,\n  \"mid\": [\n    true,\n    null\n  ]\n};";
        assert!(script.contains(expected), "{script}");
    }

    #[test]
    fn empty_variables_render_as_empty_object() {
        let variables = Map::new();
        let script = render_script(&slots(&variables, "{ a }", &[])).unwrap();
        assert!(script.contains("const variables = {};"));
    }

    #[test]
    fn literal_endpoint_without_env() {
        let variables = Map::new();
        let mut slots = slots(&variables, "{ a }", &[]);
        slots.endpoint_env = None;
        slots.endpoint = "https://api.example.com/it's";
        let script = render_script(&slots).unwrap();
        assert!(script.contains(r"const url = 'https://api.example.com/it\'s';"));
    }

    #[test]
    fn rejects_invalid_slots() {
        let variables = Map::new();
        let mut bad_env = slots(&variables, "{ a }", &[]);
        bad_env.endpoint_env = Some("GRAPHQL-URL");
        assert!(matches!(
            render_script(&bad_env),
            Err(RenderError::InvalidSlot { slot: "endpoint variable", .. })
        ));

        let mut bad_name = slots(&variables, "{ a }", &[]);
        bad_name.operation_name = "get thing";
        assert!(render_script(&bad_name).is_err());

        let mut bad_rate = slots(&variables, "{ a }", &[]);
        bad_rate.options.check_rate = 1.5;
        assert!(render_script(&bad_rate).is_err());

        let mut no_vus = slots(&variables, "{ a }", &[]);
        no_vus.options.vus = 0;
        assert!(render_script(&no_vus).is_err());
    }
}
