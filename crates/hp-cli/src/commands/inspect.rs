use hp_capture::read_artifact;
use hp_config::HarpoonConfig;
use hp_core::checks::CheckSpec;
use hp_core::exchange::CapturedExchange;
use hp_render::synthesize_exchange;
use hp_schema::{SchemaInferrer, SchemaNode};
use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::cli::root_commands::InspectArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct InspectResponse {
    operation: String,
    root_field: Option<String>,
    schema: Option<SchemaNode>,
    checks: Vec<CheckSpec>,
}

/// One check per table row.
#[derive(Debug, Serialize)]
struct CheckRow {
    check: String,
    guards: String,
}

/// Handle `hpn inspect`.
pub fn handle(args: &InspectArgs, config: &HarpoonConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let exchange = read_artifact(&args.artifact)?;
    let response = inspect(&exchange, &SchemaInferrer::new(config.schema.numeric_strings));

    if flags.format == OutputFormat::Table {
        let rows = response.checks.iter().map(check_row).collect::<Vec<_>>();
        return output(&rows, flags.format);
    }
    output(&response, flags.format)
}

fn inspect(exchange: &CapturedExchange, inferrer: &SchemaInferrer) -> InspectResponse {
    let root = exchange.root_field();
    InspectResponse {
        operation: exchange.operation_name().to_string(),
        root_field: root.map(|(name, _)| name.to_string()),
        schema: root.map(|(_, value)| inferrer.infer(value)),
        checks: synthesize_exchange(exchange, inferrer),
    }
}

fn check_row(check: &CheckSpec) -> CheckRow {
    CheckRow {
        check: check.description(),
        guards: check
            .guards
            .iter()
            .map(|guard| guard.label())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn reports_schema_and_checks_for_root_field() {
        let exchange = CapturedExchange::new(
            "",
            "ListHeroes",
            serde_json::Map::new(),
            "query ListHeroes { heroes { name } }",
            Some(json!({"data": {"heroes": [{"name": "Diana"}]}})),
        )
        .unwrap();

        let response = inspect(&exchange, &SchemaInferrer::default());
        assert_eq!(response.root_field.as_deref(), Some("heroes"));
        assert_eq!(response.schema.as_ref().map(SchemaNode::type_name), Some("array"));

        let rows: Vec<CheckRow> = response.checks.iter().map(check_row).collect();
        let nested = rows
            .iter()
            .find(|row| row.check == "data.heroes[0].name is string")
            .unwrap();
        assert_eq!(nested.guards, "data.heroes");
    }

    #[test]
    fn missing_response_has_no_schema() {
        let exchange = CapturedExchange::new(
            "",
            "Ping",
            serde_json::Map::new(),
            "query Ping { ping }",
            None,
        )
        .unwrap();

        let response = inspect(&exchange, &SchemaInferrer::default());
        assert!(response.root_field.is_none());
        assert!(response.schema.is_none());
        assert_eq!(response.checks.len(), 1);
    }
}
