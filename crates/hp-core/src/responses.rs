//! CLI response types returned as JSON by `hpn` commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::FileStatus;

/// Response from `hpn extract`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExtractResponse {
    pub operation: String,
    pub url: String,
    pub output_path: String,
    pub has_response: bool,
}

/// One GraphQL-shaped entry listed by `hpn operations`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OperationSummary {
    pub index: usize,
    pub operation: String,
    pub method: String,
    pub url: String,
    pub has_response: bool,
}

/// What happened to one scaffold file during `hpn integrate`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FileOutcome {
    /// Path relative to the project root, `/`-separated.
    pub path: String,
    pub status: FileStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Response from `hpn integrate`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct IntegrationReport {
    pub operation: String,
    pub scenario: String,
    pub files: Vec<FileOutcome>,
    pub warnings: Vec<String>,
}

impl IntegrationReport {
    /// Paths with the given status, in report order.
    #[must_use]
    pub fn paths_with(&self, status: FileStatus) -> Vec<&str> {
        self.files
            .iter()
            .filter(|file| file.status == status)
            .map(|file| file.path.as_str())
            .collect()
    }

    /// Whether integrating changed nothing on disk.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.files.iter().all(|file| !file.status.is_write())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(path: &str, status: FileStatus) -> FileOutcome {
        FileOutcome {
            path: path.to_string(),
            status,
            reason: None,
        }
    }

    #[test]
    fn report_filters_by_status() {
        let report = IntegrationReport {
            operation: "GetThing".into(),
            scenario: "getThingTestScenario".into(),
            files: vec![
                outcome("queries/getThingQuery.ts", FileStatus::Created),
                outcome("main.ts", FileStatus::Skipped),
                outcome("config/options.smoke.json", FileStatus::Updated),
            ],
            warnings: Vec::new(),
        };

        assert_eq!(
            report.paths_with(FileStatus::Created),
            vec!["queries/getThingQuery.ts"]
        );
        assert_eq!(report.paths_with(FileStatus::Skipped), vec!["main.ts"]);
        assert!(!report.is_noop());
    }

    #[test]
    fn all_skipped_report_is_noop() {
        let report = IntegrationReport {
            operation: "GetThing".into(),
            scenario: "getThingTestScenario".into(),
            files: vec![outcome("main.ts", FileStatus::Skipped)],
            warnings: vec!["already registered".into()],
        };
        assert!(report.is_noop());
    }
}
