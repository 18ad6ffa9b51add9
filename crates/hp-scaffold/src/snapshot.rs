//! In-memory view of a scaffold project's files.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use hp_config::ScaffoldConfig;

use crate::error::ScaffoldError;
use crate::run_config::{CONFIG_DIR, profile_name};
use crate::test_data::test_data_path;

/// Directories holding per-operation sources.
pub(crate) const SOURCE_DIRS: [&str; 3] = ["queries", "steps", "tests"];

/// The files of a scaffold project that integration reads or writes, keyed
/// by path relative to the project root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectSnapshot {
    files: BTreeMap<PathBuf, String>,
}

impl ProjectSnapshot {
    /// Build a snapshot from relative paths and contents.
    pub fn from_files<P, S>(files: impl IntoIterator<Item = (P, S)>) -> Self
    where
        P: Into<PathBuf>,
        S: Into<String>,
    {
        Self {
            files: files
                .into_iter()
                .map(|(path, contents)| (path.into(), contents.into()))
                .collect(),
        }
    }

    /// Read the entry file, the run-configuration files, the test-data file
    /// for `settings.data_env` and every per-operation source under `root`.
    ///
    /// Missing entry or test-data files are not errors here; [`integrate`]
    /// reports them so the whole plan fails before anything is written.
    ///
    /// # Errors
    ///
    /// `MissingFile` when `root` is not a directory, `Io` when a present file
    /// or directory cannot be read.
    ///
    /// [`integrate`]: crate::integrate
    pub fn load(root: &Path, settings: &ScaffoldConfig) -> Result<Self, ScaffoldError> {
        if !root.is_dir() {
            return Err(ScaffoldError::MissingFile {
                path: root.to_path_buf(),
            });
        }

        let mut snapshot = Self::default();
        snapshot.read_if_present(root, Path::new(&settings.entry_file))?;
        snapshot.read_if_present(root, &test_data_path(&settings.data_env))?;

        for file_name in list_dir(root, Path::new(CONFIG_DIR))? {
            if profile_name(&file_name).is_some() {
                snapshot.read_if_present(root, &Path::new(CONFIG_DIR).join(file_name))?;
            }
        }
        for dir in SOURCE_DIRS {
            for file_name in list_dir(root, Path::new(dir))? {
                snapshot.read_if_present(root, &Path::new(dir).join(file_name))?;
            }
        }

        tracing::debug!(
            root = %root.display(),
            files = snapshot.files.len(),
            "loaded scaffold project"
        );
        Ok(snapshot)
    }

    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    /// Run-configuration files with their profile names, in path order.
    pub(crate) fn profiles(&self) -> impl Iterator<Item = (&Path, &str, &str)> {
        self.files.iter().filter_map(|(path, contents)| {
            let in_config_dir = path.parent() == Some(Path::new(CONFIG_DIR));
            let profile = path.file_name()?.to_str().and_then(profile_name)?;
            in_config_dir.then_some((path.as_path(), profile, contents.as_str()))
        })
    }

    pub(crate) fn insert(&mut self, path: PathBuf, contents: String) {
        self.files.insert(path, contents);
    }

    fn read_if_present(&mut self, root: &Path, relative: &Path) -> Result<(), ScaffoldError> {
        let full = root.join(relative);
        if !full.is_file() {
            return Ok(());
        }
        let contents = fs::read_to_string(&full).map_err(|source| ScaffoldError::Io {
            path: full.clone(),
            source,
        })?;
        self.files.insert(relative.to_path_buf(), contents);
        Ok(())
    }
}

/// File names directly under `root/relative`; empty when the directory is absent.
fn list_dir(root: &Path, relative: &Path) -> Result<Vec<String>, ScaffoldError> {
    let dir = root.join(relative);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let io_error = |source| ScaffoldError::Io {
        path: dir.clone(),
        source,
    };
    let mut names = Vec::new();
    for entry in fs::read_dir(&dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let file_name = entry.file_name();
        if entry.file_type().map_err(io_error)?.is_file()
            && let Some(name) = file_name.to_str()
        {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_are_config_options_files_only() {
        let snapshot = ProjectSnapshot::from_files([
            ("config/options.smoke.json", "{}"),
            ("config/options.load.json", "{}"),
            ("config/readme.md", ""),
            ("options.stray.json", "{}"),
            ("main.ts", ""),
        ]);
        let profiles: Vec<&str> = snapshot.profiles().map(|(_, profile, _)| profile).collect();
        assert_eq!(profiles, vec!["load", "smoke"]);
    }

    #[test]
    fn lookups_use_relative_paths() {
        let snapshot = ProjectSnapshot::from_files([("main.ts", "export {};")]);
        assert!(snapshot.contains(Path::new("main.ts")));
        assert_eq!(snapshot.get(Path::new("main.ts")), Some("export {};"));
        assert_eq!(snapshot.get(Path::new("other.ts")), None);
    }
}
