//! Entry-file patching: import the test and export its scenario function.

use std::path::Path;

use hp_core::naming::OperationNames;
use hp_render::project_files::{entry_import, entry_scenario};
use regex::Regex;

use crate::error::ScaffoldError;

/// Exported function shipped with fresh scaffold projects.
pub(crate) const PLACEHOLDER_SCENARIO: &str = "exampleTestScenario";

/// New entry-file content registering `names`' scenario.
///
/// The placeholder scenario function is removed, the import is added after
/// the last import statement unless already present, and the scenario
/// function is appended at the end of the file.
///
/// # Errors
///
/// `AlreadyRegistered` when the scenario function is already exported.
pub(crate) fn patch_entry(
    path: &Path,
    source: &str,
    names: &OperationNames,
) -> Result<String, ScaffoldError> {
    let scenario = names.scenario();
    if exports_function(source, &scenario) {
        return Err(ScaffoldError::AlreadyRegistered {
            scenario,
            path: path.to_path_buf(),
        });
    }

    let mut content = remove_placeholder(source);

    if !imports_name(&content, &names.test()) {
        let at = import_insertion_point(&content);
        // An import on the last line may lack its newline.
        let separator = if at > 0 && !content[..at].ends_with('\n') { "\n" } else { "" };
        content.insert_str(at, &format!("{separator}{}\n", entry_import(names)));
    }

    let mut patched = content.trim_end().to_string();
    if !patched.is_empty() {
        patched.push_str("\n\n");
    }
    patched.push_str(&entry_scenario(names));
    Ok(patched)
}

fn exports_function(source: &str, name: &str) -> bool {
    Regex::new(&format!(
        r"(?m)^\s*export\s+(?:async\s+)?function\s+{}\s*\(",
        regex::escape(name)
    ))
    .is_ok_and(|pattern| pattern.is_match(source))
}

fn imports_name(source: &str, name: &str) -> bool {
    Regex::new(&format!(
        r"(?m)^\s*import\s*\{{[^}}]*\b{}\b[^}}]*\}}",
        regex::escape(name)
    ))
    .is_ok_and(|pattern| pattern.is_match(source))
}

fn remove_placeholder(source: &str) -> String {
    let pattern = format!(
        r"(?s)export\s+function\s+{PLACEHOLDER_SCENARIO}\s*\(\s*\)\s*\{{.*?\n\}}[ \t]*\n?"
    );
    match Regex::new(&pattern) {
        Ok(placeholder) if placeholder.is_match(source) => {
            tracing::debug!("removing placeholder scenario from entry file");
            placeholder.replace(source, "").into_owned()
        }
        _ => source.to_string(),
    }
}

/// Byte offset just past the last import statement, or 0 without imports.
fn import_insertion_point(source: &str) -> usize {
    let mut offset = 0;
    let mut insert_at = 0;
    let mut in_import = false;

    for line in source.split_inclusive('\n') {
        let trimmed = line.trim();
        offset += line.len();
        if trimmed.starts_with("import ") || trimmed.starts_with("import{") {
            // Only an unclosed `{` carries the import onto following lines.
            in_import = trimmed.contains('{') && !trimmed.contains('}');
            if !in_import {
                insert_at = offset;
            }
        } else if in_import && (trimmed.ends_with(';') || trimmed.contains(" from ")) {
            in_import = false;
            insert_at = offset;
        }
    }

    insert_at
}
