//! Atomic on-disk application of a [`ScaffoldPlan`].

use std::fs;
use std::io::Write as _;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::ScaffoldError;
use crate::plan::{FileChange, ScaffoldPlan};

/// Write every change in `plan` under `root`.
///
/// Each file is written to a temporary file in its target directory and then
/// renamed over the target, so a failure never leaves a partially written
/// file. Writing stops at the first failure.
///
/// # Errors
///
/// `Write` naming the file that could not be written.
pub fn commit(root: &Path, plan: &ScaffoldPlan) -> Result<(), ScaffoldError> {
    for change in &plan.changes {
        write_atomic(root, change)?;
        tracing::info!(
            path = %change.path.display(),
            status = %change.status,
            "wrote scaffold file"
        );
    }
    Ok(())
}

fn write_atomic(root: &Path, change: &FileChange) -> Result<(), ScaffoldError> {
    let target = root.join(&change.path);
    let write_error = |source| ScaffoldError::Write {
        path: target.clone(),
        source,
    };

    let dir = target.parent().unwrap_or(root);
    fs::create_dir_all(dir).map_err(write_error)?;

    let mut temp = NamedTempFile::new_in(dir).map_err(write_error)?;
    temp.write_all(change.contents.as_bytes())
        .map_err(write_error)?;
    temp.flush().map_err(write_error)?;
    temp.persist(&target)
        .map_err(|error| write_error(error.error))?;
    Ok(())
}
