//! Step-file generation for scaffold projects.

use hp_core::checks::{AccessPath, CheckKind, CheckSpec};
use hp_core::exchange::CapturedExchange;
use hp_core::naming::{OperationNames, is_js_identifier};
use hp_schema::SchemaInferrer;

use crate::error::RenderError;
use crate::escape;
use crate::project_files::CHAI_MODULE;
use crate::synth::synthesize_exchange;

/// Parsed response binding inside generated steps.
const BINDING: &str = "responseJson";
const BODY_INDENT: usize = 4;

/// Key of the captured variables inside a test-data scenario entry.
pub const SCENARIO_VARIABLES: &str = "variables";

/// Produces the source of `steps/<op>Step.ts` for one captured exchange.
///
/// Implementations share one output contract: an exported `<op>Step(scenario)`
/// function that issues the operation and asserts on its response.
pub trait StepGenerator {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// # Errors
    ///
    /// Implementation specific; the rule-based generator never fails.
    fn generate(&self, exchange: &CapturedExchange) -> Result<String, RenderError>;
}

/// Derives chai assertions from the synthesized check set.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedStepGenerator {
    inferrer: SchemaInferrer,
}

impl RuleBasedStepGenerator {
    #[must_use]
    pub const fn new(inferrer: SchemaInferrer) -> Self {
        Self { inferrer }
    }
}

impl StepGenerator for RuleBasedStepGenerator {
    fn name(&self) -> &'static str {
        "rule-based"
    }

    fn generate(&self, exchange: &CapturedExchange) -> Result<String, RenderError> {
        let names = OperationNames::new(exchange.operation_name());
        let checks = synthesize_exchange(exchange, &self.inferrer);
        let step = names.step();
        let query = names.query();

        let mut out = String::new();
        out.push_str("import { graphQl } from \"../helpers/graphql.js\";\n");
        out.push_str("import { expectValidJson } from \"../helpers/utils.js\";\n");
        out.push_str(&format!("import {{ expect }} from \"{CHAI_MODULE}\";\n"));
        out.push_str(&format!(
            "import {{ {query} }} from \"../queries/{query}.js\";\n\n"
        ));
        out.push_str(&format!("export function {step}(scenario: any) {{\n"));
        out.push_str(&format!(
            "  const variables = {};\n",
            scenario_variables(exchange)
        ));
        out.push_str(&format!(
            "  const response = graphQl.query({query}, variables);\n"
        ));
        out.push_str(&format!("  const {BINDING} = expectValidJson(response);\n\n"));
        out.push_str("  try {\n");
        out.push_str(&format!(
            "    expect({BINDING}.errors, \"errors\").to.be.undefined;\n"
        ));
        out.push_str(&assertion_block(&checks));
        out.push_str("  } catch (error) {\n");
        out.push_str(&format!(
            "    console.error({}, error);\n",
            escape::double_quoted(&format!("Error in {step}:"))
        ));
        out.push_str(&format!("    console.error(\"Response JSON:\", {BINDING});\n"));
        out.push_str("    throw error;\n");
        out.push_str("  }\n");
        out.push_str("}\n");
        Ok(out)
    }
}

/// `{ id: scenario.variables.id, ... }` mapping each captured variable to the
/// value of the same name under the scenario entry's `variables`.
fn scenario_variables(exchange: &CapturedExchange) -> String {
    if exchange.variables().is_empty() {
        return "{}".to_string();
    }
    let pairs: Vec<String> = exchange
        .variables()
        .keys()
        .map(|name| {
            if is_js_identifier(name) {
                format!("{name}: scenario.{SCENARIO_VARIABLES}.{name}")
            } else {
                let key = escape::double_quoted(name);
                format!("{key}: scenario.{SCENARIO_VARIABLES}[{key}]")
            }
        })
        .collect();
    format!("{{ {} }}", pairs.join(", "))
}

/// Assertions for `checks`, with guarded checks nested in `if` blocks that
/// are shared by consecutive checks under the same arrays.
fn assertion_block(checks: &[CheckSpec]) -> String {
    let mut out = String::new();
    let mut open: Vec<&AccessPath> = Vec::new();

    for check in checks {
        let shared = open
            .iter()
            .zip(&check.guards)
            .take_while(|(opened, guard)| **opened == *guard)
            .count();
        while open.len() > shared {
            open.pop();
            push_line(&mut out, open.len(), "}");
        }
        for guard in &check.guards[shared..] {
            push_line(
                &mut out,
                open.len(),
                &format!("if ({}?.length > 0) {{", guard.expression(BINDING)),
            );
            open.push(guard);
        }
        push_line(&mut out, open.len(), &assertion(check));
    }
    while !open.is_empty() {
        open.pop();
        push_line(&mut out, open.len(), "}");
    }
    out
}

fn push_line(out: &mut String, depth: usize, line: &str) {
    out.push_str(&" ".repeat(BODY_INDENT + depth * 2));
    out.push_str(line);
    out.push('\n');
}

fn assertion(check: &CheckSpec) -> String {
    let target = check.path.expression(BINDING);
    let label = escape::double_quoted(&check.label);
    match &check.kind {
        CheckKind::Exists => format!("expect({target}, {label}).to.not.be.undefined;"),
        CheckKind::TypeOf { primitive } => {
            format!("expect({target}, {label}).to.be.a(\"{primitive}\");")
        }
        CheckKind::IsArray => format!("expect({target}, {label}).to.be.an(\"array\");"),
        CheckKind::EqualsLiteral { value } => {
            format!("expect({target}, {label}).to.equal({value});")
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{Map, Value, json};

    use super::*;

    fn exchange(variables: Value, response: Option<Value>) -> CapturedExchange {
        CapturedExchange::new(
            "http://localhost:4000/graphql",
            "GetList",
            variables.as_object().cloned().unwrap_or_default(),
            "query GetList($id: ID!) { list(id: $id) { items { id } } }",
            response,
        )
        .unwrap()
    }

    #[test]
    fn step_imports_query_and_maps_variables() {
        let step = RuleBasedStepGenerator::default()
            .generate(&exchange(json!({"id": "1", "first-n": 2}), None))
            .unwrap();

        assert!(step.contains("import { getListQuery } from \"../queries/getListQuery.js\";"));
        assert!(step.contains("export function getListStep(scenario: any) {"));
        assert!(step.contains(
            "const variables = { id: scenario.variables.id, \"first-n\": scenario.variables[\"first-n\"] };"
        ));
        assert!(step.contains("console.error(\"Error in getListStep:\", error);"));
    }

    #[test]
    fn variables_named_like_scenario_keys_read_from_variables() {
        let step = RuleBasedStepGenerator::default()
            .generate(&exchange(json!({"name": "Diana", "description": "hero"}), None))
            .unwrap();

        assert!(step.contains(
            "const variables = { name: scenario.variables.name, description: scenario.variables.description };"
        ));
        assert!(!step.contains("scenario.name"));
    }

    #[test]
    fn guarded_assertions_share_one_if_block() {
        let response = json!({"data": {"list": {"items": [{"id": "1", "n": 2}], "total": 1}}});
        let step = RuleBasedStepGenerator::default()
            .generate(&exchange(json!({}), Some(response)))
            .unwrap();

        let expected = r#"    expect(responseJson.data?.list?.items, "data.list.items").to.be.an("array");
    if (responseJson.data?.list?.items?.length > 0) {
      expect(responseJson.data?.list?.items?.[0]?.id, "data.list.items[0].id").to.be.a("string");
      expect(responseJson.data?.list?.items?.[0]?.n, "data.list.items[0].n").to.be.a("number");
    }
    expect(responseJson.data?.list?.total, "data.list.total").to.be.a("number");
"#;
        assert!(step.contains(expected), "{step}");
        assert!(step.contains("const variables = {};"));
    }

    #[test]
    fn nested_arrays_nest_blocks() {
        let block = assertion_block(&crate::synth::synthesize(
            "grid",
            &hp_schema::infer(&json!({"rows": [[true]]})),
        ));
        assert_eq!(
            block.lines().filter(|line| line.trim_start().starts_with("if (")).count(),
            2
        );
        assert_eq!(block.lines().filter(|line| line.trim() == "}").count(), 2);
    }

    #[test]
    fn discriminator_asserts_literal() {
        let response = json!({"data": {"node": {"__typename": "Character"}}});
        let step = RuleBasedStepGenerator::default()
            .generate(&exchange(Value::Object(Map::new()), Some(response)))
            .unwrap();
        assert!(step.contains(
            "expect(responseJson.data?.node?.__typename, \"data.node.__typename\").to.equal(\"Character\");"
        ));
    }
}
