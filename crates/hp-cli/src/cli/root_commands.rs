use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Extract one operation from a capture into an artifact document.
    Extract(ExtractArgs),
    /// List the GraphQL operations found in a capture.
    Operations(OperationsArgs),
    /// Generate a standalone k6 script from an artifact document.
    Generate(GenerateArgs),
    /// Show the inferred response schema and the checks derived from it.
    Inspect(InspectArgs),
    /// Register a captured operation in an existing k6 project.
    Integrate(IntegrateArgs),
    /// Dump JSON schema for a registered document type.
    Schema(SchemaArgs),
}

/// Arguments for `hpn extract`.
#[derive(Clone, Debug, Args)]
pub struct ExtractArgs {
    /// HAR capture file.
    pub capture: PathBuf,
    pub operation: String,
    /// Defaults to `<operation>-capture.json` next to the capture.
    pub output: Option<PathBuf>,
}

/// Arguments for `hpn operations`.
#[derive(Clone, Debug, Args)]
pub struct OperationsArgs {
    pub capture: PathBuf,
}

/// Arguments for `hpn generate`.
#[derive(Clone, Debug, Args)]
pub struct GenerateArgs {
    /// Artifact document written by `hpn extract`.
    pub artifact: PathBuf,
    /// Write the script here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
    #[arg(long)]
    pub vus: Option<u32>,
    #[arg(long)]
    pub iterations: Option<u32>,
    /// Endpoint baked into the script, overriding the captured URL.
    #[arg(long)]
    pub endpoint: Option<String>,
}

/// Arguments for `hpn inspect`.
#[derive(Clone, Debug, Args)]
pub struct InspectArgs {
    pub artifact: PathBuf,
}

/// Arguments for `hpn integrate`.
#[derive(Clone, Debug, Args)]
pub struct IntegrateArgs {
    /// Root of the k6 project.
    pub project: PathBuf,
    /// HAR capture file.
    pub capture: PathBuf,
    /// Defaults to the first GraphQL operation in the capture.
    pub operation: Option<String>,
    /// Ask an AI step generator for the step file.
    #[arg(long)]
    pub use_ai: bool,
}

/// Arguments for `hpn schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Registered schema name, e.g. `capture_artifact`.
    pub name: String,
}
