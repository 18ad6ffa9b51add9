//! Pure integration planning over a [`ProjectSnapshot`].

use std::path::{Path, PathBuf};

use hp_config::ScaffoldConfig;
use hp_core::enums::FileStatus;
use hp_core::exchange::CapturedExchange;
use hp_core::naming::OperationNames;
use hp_core::responses::{FileOutcome, IntegrationReport};
use hp_render::{RenderError, StepGenerator, project_files};
use serde_json::{Map, Value};

use crate::entry::patch_entry;
use crate::error::ScaffoldError;
use crate::run_config::patch_run_config;
use crate::snapshot::ProjectSnapshot;
use crate::test_data::{patch_test_data, test_data_path};

/// Everything needed to register one operation in a project.
#[derive(Debug, Clone)]
pub struct Registration {
    names: OperationNames,
    variables: Map<String, Value>,
    query_source: String,
    step_source: String,
    test_source: String,
}

impl Registration {
    /// Render the per-operation sources for `exchange`, using `generator`
    /// for the step file.
    ///
    /// # Errors
    ///
    /// Propagates the step generator's error.
    pub fn new(
        exchange: &CapturedExchange,
        generator: &dyn StepGenerator,
    ) -> Result<Self, RenderError> {
        let names = OperationNames::new(exchange.operation_name());
        tracing::debug!(
            operation = names.operation(),
            generator = generator.name(),
            "rendering scaffold sources"
        );
        Ok(Self {
            query_source: project_files::query_file(&names, exchange.query_text()),
            step_source: generator.generate(exchange)?,
            test_source: project_files::test_file(&names),
            variables: exchange.variables().clone(),
            names,
        })
    }

    #[must_use]
    pub const fn names(&self) -> &OperationNames {
        &self.names
    }

    fn sources(&self) -> [(PathBuf, &str); 3] {
        [
            (
                source_path("queries", &self.names.query()),
                self.query_source.as_str(),
            ),
            (
                source_path("steps", &self.names.step()),
                self.step_source.as_str(),
            ),
            (
                source_path("tests", &self.names.test()),
                self.test_source.as_str(),
            ),
        ]
    }
}

fn source_path(dir: &str, stem: &str) -> PathBuf {
    Path::new(dir).join(format!("{stem}.ts"))
}

/// Full new content for one project file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    /// Relative to the project root.
    pub path: PathBuf,
    pub contents: String,
    pub status: FileStatus,
}

/// Result of [`integrate`]: the writes to perform and the report describing
/// every file considered.
#[derive(Debug, Clone)]
pub struct ScaffoldPlan {
    pub changes: Vec<FileChange>,
    pub report: IntegrationReport,
}

impl ScaffoldPlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// The snapshot as it will look after committing this plan.
    #[must_use]
    pub fn apply_to(&self, snapshot: &ProjectSnapshot) -> ProjectSnapshot {
        let mut next = snapshot.clone();
        for change in &self.changes {
            next.insert(change.path.clone(), change.contents.clone());
        }
        next
    }
}

/// Plan the registration of `registration` in `snapshot`.
///
/// Query, step and test files are created only when absent. The entry file,
/// every `config/options.<profile>.json` and the test-data file for
/// `settings.data_env` are patched; targets already carrying the scenario are
/// reported as skipped with a warning.
///
/// # Errors
///
/// `MissingFile` when the entry or test-data file is absent, `MalformedFile`
/// or `Json` when a target cannot be patched. On error no change is planned.
pub fn integrate(
    snapshot: &ProjectSnapshot,
    registration: &Registration,
    settings: &ScaffoldConfig,
) -> Result<ScaffoldPlan, ScaffoldError> {
    let names = &registration.names;
    let mut plan = PlanBuilder::default();

    for (path, contents) in registration.sources() {
        if snapshot.contains(&path) {
            plan.skip(&path, "file already exists");
        } else {
            plan.write(path, contents.to_string(), FileStatus::Created);
        }
    }

    let entry_path = PathBuf::from(&settings.entry_file);
    let entry = snapshot
        .get(&entry_path)
        .ok_or_else(|| ScaffoldError::MissingFile {
            path: entry_path.clone(),
        })?;
    plan.patched(entry_path.clone(), patch_entry(&entry_path, entry, names))?;

    let mut profiles = 0usize;
    for (path, profile, contents) in snapshot.profiles() {
        profiles += 1;
        plan.patched(
            path.to_path_buf(),
            patch_run_config(path, contents, profile, names, settings),
        )?;
    }
    if profiles == 0 {
        plan.warn("no run-configuration files (config/options.<profile>.json) found".to_string());
    }

    let data_path = test_data_path(&settings.data_env);
    let data = snapshot
        .get(&data_path)
        .ok_or_else(|| ScaffoldError::MissingFile {
            path: data_path.clone(),
        })?;
    plan.patched(
        data_path.clone(),
        patch_test_data(&data_path, data, names, &registration.variables),
    )?;

    Ok(plan.finish(names))
}

#[derive(Default)]
struct PlanBuilder {
    changes: Vec<FileChange>,
    files: Vec<FileOutcome>,
    warnings: Vec<String>,
}

impl PlanBuilder {
    fn write(&mut self, path: PathBuf, contents: String, status: FileStatus) {
        self.files.push(FileOutcome {
            path: path.display().to_string(),
            status,
            reason: None,
        });
        self.changes.push(FileChange {
            path,
            contents,
            status,
        });
    }

    fn skip(&mut self, path: &Path, reason: &str) {
        self.files.push(FileOutcome {
            path: path.display().to_string(),
            status: FileStatus::Skipped,
            reason: Some(reason.to_string()),
        });
    }

    fn warn(&mut self, message: String) {
        tracing::warn!("{message}");
        self.warnings.push(message);
    }

    /// Record a patch result; `AlreadyRegistered` becomes a skip.
    fn patched(
        &mut self,
        path: PathBuf,
        result: Result<String, ScaffoldError>,
    ) -> Result<(), ScaffoldError> {
        match result {
            Ok(contents) => {
                self.write(path, contents, FileStatus::Updated);
                Ok(())
            }
            Err(error @ ScaffoldError::AlreadyRegistered { .. }) => {
                self.warn(error.to_string());
                self.skip(&path, "scenario already registered");
                Ok(())
            }
            Err(error) => Err(error),
        }
    }

    fn finish(self, names: &OperationNames) -> ScaffoldPlan {
        ScaffoldPlan {
            changes: self.changes,
            report: IntegrationReport {
                operation: names.operation().to_string(),
                scenario: names.scenario(),
                files: self.files,
                warnings: self.warnings,
            },
        }
    }
}
