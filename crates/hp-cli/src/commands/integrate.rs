use anyhow::{Context, bail};
use hp_config::HarpoonConfig;
use hp_core::responses::IntegrationReport;
use hp_render::RuleBasedStepGenerator;
use hp_scaffold::{ProjectSnapshot, Registration, commit, integrate};
use hp_schema::SchemaInferrer;

use crate::cli::root_commands::IntegrateArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

/// Handle `hpn integrate`.
pub fn handle(
    args: &IntegrateArgs,
    config: &HarpoonConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let report = run(args, config)?;

    if flags.format == OutputFormat::Table {
        output(&report.files, flags.format)?;
        for warning in &report.warnings {
            eprintln!("warning: {warning}");
        }
        return Ok(());
    }
    output(&report, flags.format)
}

fn run(args: &IntegrateArgs, config: &HarpoonConfig) -> anyhow::Result<IntegrationReport> {
    if !args.project.is_dir() {
        bail!("project directory {} not found", args.project.display());
    }
    if !args.capture.is_file() {
        bail!("capture file {} not found", args.capture.display());
    }

    let exchange = hp_capture::extract(&args.capture, args.operation.as_deref())?;
    let operation = exchange.operation_name();

    if args.use_ai {
        tracing::warn!(operation, "no AI step generator is available; using rule-based generation");
    }
    let generator = RuleBasedStepGenerator::new(SchemaInferrer::new(config.schema.numeric_strings));
    let registration = Registration::new(&exchange, &generator)
        .with_context(|| format!("failed to render sources for operation '{operation}'"))?;

    let snapshot = ProjectSnapshot::load(&args.project, &config.scaffold)?;
    let plan = integrate(&snapshot, &registration, &config.scaffold).with_context(|| {
        format!(
            "failed to integrate operation '{operation}' into {}",
            args.project.display()
        )
    })?;
    commit(&args.project, &plan).with_context(|| {
        format!(
            "integration of operation '{operation}' into {} is incomplete",
            args.project.display()
        )
    })?;

    tracing::info!(
        operation,
        written = plan.changes.len(),
        "integration finished"
    );
    Ok(plan.report)
}
