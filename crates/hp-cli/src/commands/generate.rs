use std::fs;

use anyhow::Context;
use hp_capture::read_artifact;
use hp_config::{HarpoonConfig, RenderConfig};
use hp_core::exchange::CapturedExchange;
use hp_render::{ScriptOptions, ScriptSlots, render_script, synthesize_exchange};
use hp_schema::SchemaInferrer;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::GenerateArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct GenerateResponse {
    operation: String,
    endpoint: String,
    output_path: String,
    checks: usize,
}

/// Handle `hpn generate`.
///
/// Without `--out` the script itself is printed, whatever the output format.
pub fn handle(
    args: &GenerateArgs,
    config: &HarpoonConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let exchange = read_artifact(&args.artifact)?;
    let script = render(&exchange, args, config)?;

    let Some(out) = &args.out else {
        print!("{}", script.text);
        return Ok(());
    };

    fs::write(out, &script.text)
        .with_context(|| format!("failed to write script to {}", out.display()))?;
    tracing::info!(path = %out.display(), operation = exchange.operation_name(), "wrote k6 script");

    output(
        &GenerateResponse {
            operation: exchange.operation_name().to_string(),
            endpoint: script.endpoint,
            output_path: out.display().to_string(),
            checks: script.checks,
        },
        flags.format,
    )
}

#[derive(Debug)]
struct RenderedScript {
    text: String,
    endpoint: String,
    checks: usize,
}

fn render(
    exchange: &CapturedExchange,
    args: &GenerateArgs,
    config: &HarpoonConfig,
) -> anyhow::Result<RenderedScript> {
    let inferrer = SchemaInferrer::new(config.schema.numeric_strings);
    let checks = synthesize_exchange(exchange, &inferrer);
    let endpoint = endpoint(args.endpoint.as_deref(), exchange, &config.general.default_endpoint);
    let endpoint_env = Some(config.general.endpoint_env.as_str()).filter(|env| !env.is_empty());

    let slots = ScriptSlots {
        endpoint,
        endpoint_env,
        operation_name: exchange.operation_name(),
        variables: exchange.variables(),
        query: exchange.query_text(),
        checks: &checks,
        options: script_options(&config.render, args),
    };
    let text = render_script(&slots).with_context(|| {
        format!(
            "failed to render script for operation '{}' from {}",
            exchange.operation_name(),
            args.artifact.display()
        )
    })?;

    Ok(RenderedScript {
        text,
        endpoint: endpoint.to_string(),
        checks: checks.len(),
    })
}

/// `--endpoint`, then the captured URL, then the configured default.
fn endpoint<'a>(
    flag: Option<&'a str>,
    exchange: &'a CapturedExchange,
    fallback: &'a str,
) -> &'a str {
    flag.into_iter()
        .chain([exchange.url()])
        .find(|url| !url.trim().is_empty())
        .unwrap_or(fallback)
}

fn script_options(render: &RenderConfig, args: &GenerateArgs) -> ScriptOptions {
    ScriptOptions {
        vus: args.vus.unwrap_or(render.vus),
        iterations: args.iterations.unwrap_or(render.iterations),
        check_rate: render.check_rate,
        p95_ms: u64::from(render.p95_ms),
        sleep_secs: render.sleep_secs,
    }
}
