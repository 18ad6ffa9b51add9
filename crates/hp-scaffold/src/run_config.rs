//! Run-configuration (`config/options.<profile>.json`) patching.

use std::path::Path;

use hp_config::ScaffoldConfig;
use hp_core::naming::OperationNames;
use serde_json::{Map, Value, json};

use crate::entry::PLACEHOLDER_SCENARIO;
use crate::error::ScaffoldError;

pub(crate) const CONFIG_DIR: &str = "config";
const PROFILE_PREFIX: &str = "options.";
const PROFILE_SUFFIX: &str = ".json";

/// Profile name of a run-configuration file name (`options.smoke.json` is `smoke`).
pub(crate) fn profile_name(file_name: &str) -> Option<&str> {
    file_name
        .strip_prefix(PROFILE_PREFIX)?
        .strip_suffix(PROFILE_SUFFIX)
        .filter(|profile| !profile.is_empty())
}

/// `run_type` tag for a profile: `smoke` is `Smoke`, `load` is `Load`.
fn run_type(profile: &str) -> String {
    let mut chars = profile.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Scenario descriptor inserted under `scenarios.<scenario>`.
pub(crate) fn scenario_descriptor(
    scenario: &str,
    profile: &str,
    settings: &ScaffoldConfig,
) -> Value {
    json!({
        "executor": settings.executor,
        "tags": {
            "run_type": run_type(profile),
            "scenario": scenario,
        },
        "exec": scenario,
        "vus": settings.vus,
        "iterations": settings.iterations,
        "maxDuration": settings.max_duration,
    })
}

/// New content of a run-configuration file with `names`' scenario added.
///
/// The file is rewritten pretty-printed with a trailing newline. Existing keys
/// keep their order and the placeholder scenario is removed.
///
/// # Errors
///
/// `Json` for unparsable files, `MalformedFile` when the document or its
/// `scenarios` member is not an object, `AlreadyRegistered` when the scenario
/// key exists.
pub(crate) fn patch_run_config(
    path: &Path,
    source: &str,
    profile: &str,
    names: &OperationNames,
    settings: &ScaffoldConfig,
) -> Result<String, ScaffoldError> {
    let malformed = |reason: &str| ScaffoldError::MalformedFile {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let mut document: Value = serde_json::from_str(source).map_err(|source| ScaffoldError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let root = document
        .as_object_mut()
        .ok_or_else(|| malformed("expected a JSON object"))?;
    let scenarios = root
        .entry("scenarios")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| malformed("`scenarios` is not an object"))?;

    let scenario = names.scenario();
    if scenarios.contains_key(&scenario) {
        return Err(ScaffoldError::AlreadyRegistered {
            scenario,
            path: path.to_path_buf(),
        });
    }

    if scenarios.shift_remove(PLACEHOLDER_SCENARIO).is_some() {
        tracing::debug!(path = %path.display(), "removing placeholder scenario");
    }
    let descriptor = scenario_descriptor(&scenario, profile, settings);
    scenarios.insert(scenario, descriptor);

    let mut rendered = serde_json::to_string_pretty(&document).map_err(|source| ScaffoldError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    rendered.push('\n');
    Ok(rendered)
}
