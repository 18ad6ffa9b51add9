use hp_capture::{default_artifact_path, write_artifact};
use hp_core::responses::ExtractResponse;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExtractArgs;
use crate::output::output;

/// Handle `hpn extract`.
pub fn handle(args: &ExtractArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = run(args)?;
    output(&response, flags.format)
}

fn run(args: &ExtractArgs) -> anyhow::Result<ExtractResponse> {
    let exchange = hp_capture::extract(&args.capture, Some(&args.operation))?;
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_artifact_path(&args.capture, &args.operation));
    write_artifact(&output_path, &exchange)?;

    Ok(ExtractResponse {
        operation: exchange.operation_name().to_string(),
        url: exchange.url().to_string(),
        output_path: output_path.display().to_string(),
        has_response: exchange.response_body().is_some(),
    })
}

#[cfg(test)]
mod tests {
    use hp_capture::read_artifact;
    use tempfile::TempDir;

    use super::*;
    use crate::commands::fixtures;

    #[test]
    fn writes_artifact_next_to_capture_by_default() {
        let dir = TempDir::new().unwrap();
        let capture = fixtures::write_capture(dir.path());
        let args = ExtractArgs {
            capture,
            operation: "GetCharacter".to_string(),
            output: None,
        };

        let response = run(&args).unwrap();
        let artifact = dir.path().join("GetCharacter-capture.json");
        assert_eq!(response.output_path, artifact.display().to_string());
        assert!(response.has_response);

        let exchange = read_artifact(&artifact).unwrap();
        assert_eq!(exchange.operation_name(), "GetCharacter");
        assert_eq!(exchange.variables().get("id"), Some(&serde_json::json!("1002")));
    }

    #[test]
    fn unknown_operation_names_file_and_operation() {
        let dir = TempDir::new().unwrap();
        let args = ExtractArgs {
            capture: fixtures::write_capture(dir.path()),
            operation: "ListPlanets".to_string(),
            output: None,
        };

        let message = format!("{:#}", run(&args).unwrap_err());
        assert!(message.contains("ListPlanets"));
        assert!(message.contains("trace.har"));
        assert!(!dir.path().join("ListPlanets-capture.json").exists());
    }
}
