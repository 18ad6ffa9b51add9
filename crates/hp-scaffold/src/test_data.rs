//! Test-data (`testdata/testdata.<env>.ts`) patching.

use std::path::{Path, PathBuf};

use hp_core::naming::OperationNames;
use hp_render::step::SCENARIO_VARIABLES;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::ScaffoldError;
use crate::source_scan::{last_code_byte, line_indent, matching_close};

const PLACEHOLDER_DATA: &str = "exampleTestData";
const ENTRY_INDENT: &str = "  ";

/// `testdata/testdata.<env>.ts`
pub(crate) fn test_data_path(env: &str) -> PathBuf {
    Path::new("testdata").join(format!("testdata.{env}.ts"))
}

/// Scenario entry for the test-data array: generated `name` and
/// `description`, then the captured variables under their own key.
pub(crate) fn scenario_entry(names: &OperationNames, variables: &Map<String, Value>) -> Value {
    let mut entry = Map::new();
    entry.insert("name".into(), Value::String(names.test_data()));
    entry.insert(
        "description".into(),
        Value::String(format!("{} test data", names.operation())),
    );
    entry.insert(SCENARIO_VARIABLES.into(), Value::Object(variables.clone()));
    Value::Object(entry)
}

/// New test-data content with `names`' scenario appended to the `scenarios`
/// array. The placeholder entry and the `// TODO:` and `// Example:` comment
/// lines inside the array are removed first.
///
/// # Errors
///
/// `MalformedFile` when no balanced `scenarios: [...]` array is found,
/// `AlreadyRegistered` when an entry with the generated name exists.
pub(crate) fn patch_test_data(
    path: &Path,
    source: &str,
    names: &OperationNames,
    variables: &Map<String, Value>,
) -> Result<String, ScaffoldError> {
    let malformed = |reason: &str| ScaffoldError::MalformedFile {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let content = remove_placeholder(source);
    let (open, close) =
        scenarios_array(&content).ok_or_else(|| malformed("no `scenarios: [...]` array"))?;
    if names_entry(&content[open..=close], &names.test_data()) {
        return Err(ScaffoldError::AlreadyRegistered {
            scenario: names.test_data(),
            path: path.to_path_buf(),
        });
    }

    let base = line_indent(&content, open);
    let entry_indent = format!("{base}{ENTRY_INDENT}");
    let rendered = serde_json::to_string_pretty(&scenario_entry(names, variables)).map_err(|source| {
        ScaffoldError::Json {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let entry = rendered
        .lines()
        .map(|line| format!("{entry_indent}{line}"))
        .collect::<Vec<_>>()
        .join("\n");

    let mut existing = content[open + 1..close].trim_end().to_string();
    if let Some(last) = last_code_byte(&existing)
        && existing.as_bytes()[last] != b','
    {
        existing.insert(last + 1, ',');
    }
    let body = format!("{existing}\n{entry},\n{base}");

    let mut patched = String::with_capacity(content.len() + body.len());
    patched.push_str(&content[..=open]);
    patched.push_str(&body);
    patched.push_str(&content[close..]);
    Ok(patched)
}

/// Byte span of the brackets of the `scenarios` array.
fn scenarios_array(source: &str) -> Option<(usize, usize)> {
    let pattern = Regex::new(r#"["']?\bscenarios["']?\s*:\s*\["#).ok()?;
    let found = pattern.find(source)?;
    let open = found.end() - 1;
    matching_close(source, open).map(|close| (open, close))
}

fn names_entry(array: &str, name: &str) -> bool {
    name_pattern(name).is_some_and(|pattern| pattern.is_match(array))
}

fn name_pattern(name: &str) -> Option<Regex> {
    Regex::new(&format!(
        r#"["']?\bname["']?\s*:\s*["']{}["']"#,
        regex::escape(name)
    ))
    .ok()
}

fn remove_placeholder(source: &str) -> String {
    let Some((open, close)) = scenarios_array(source) else {
        return source.to_string();
    };
    if !source[open..close].contains(PLACEHOLDER_DATA) {
        return source.to_string();
    }

    let mut scenarios = match Regex::new(r"(?m)^[ \t]*// (?:TODO|Example):.*\n") {
        Ok(comments) => comments.replace_all(&source[open + 1..close], "").into_owned(),
        Err(_) => source[open + 1..close].to_string(),
    };

    if let Some(found) = name_pattern(PLACEHOLDER_DATA).and_then(|pattern| pattern.find(&scenarios)) {
        let open = scenarios[..found.start()].rfind('{');
        if let Some(open) = open
            && let Some(close) = matching_close(&scenarios, open)
        {
            let rest = &scenarios[close + 1..];
            let trailing = rest.len() - rest.trim_start_matches([',', ' ', '\t', '\r', '\n']).len();
            let start = scenarios[..open].trim_end_matches([' ', '\t']).len();
            tracing::debug!("removing placeholder test data entry");
            scenarios.replace_range(start..close + 1 + trailing, "");
        }
    }

    let mut content = String::with_capacity(source.len());
    content.push_str(&source[..=open]);
    content.push_str(&scenarios);
    content.push_str(&source[close..]);
    content
}
