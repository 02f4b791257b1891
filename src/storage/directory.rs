//! A filesystem backed store of harnesses
//!
//! Each harness lives in its own `{harness_id}.yaml` file somewhere below the
//! [`Directory`] root. An optional `config.toml` at the root controls how
//! strictly the directory is loaded.

use std::{
    ffi::OsStr,
    fmt,
    path::{Path, PathBuf},
};

use nonempty::NonEmpty;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::instrument;
use walkdir::{DirEntry, WalkDir};

use crate::{
    domain::{Config, Harness},
    storage::document::{HarnessDocument, LoadError, SaveError},
};

/// A filesystem backed store of harnesses.
#[derive(Debug, Clone)]
pub struct Directory {
    /// The root of the directory harnesses are stored in.
    root: PathBuf,
    config: Config,
}

impl Directory {
    /// Opens a directory at the given path, reading its configuration.
    ///
    /// A missing or unreadable `config.toml` falls back to the defaults.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        let config = load_config(&root);
        Self { root, config }
    }

    /// The directory root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The configuration read when the directory was opened.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Identifiers of every harness file below the root, in path order.
    #[must_use]
    pub fn harness_ids(&self) -> Vec<String> {
        collect_yaml_paths(&self.root)
            .iter()
            .filter_map(|path| harness_id(path).map(str::to_string))
            .collect()
    }

    /// Loads a single harness by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NotFound`] if no file holds this harness, or
    /// another [`LoadError`] if the file cannot be read or describes an
    /// inconsistent harness.
    #[instrument(level = "debug", skip(self))]
    pub fn load_harness(&self, id: &str) -> Result<Harness, LoadError> {
        let path = self.harness_path(id).ok_or(LoadError::NotFound)?;
        load_harness_file(&path)
    }

    /// Writes a harness to its file, replacing any previous contents.
    ///
    /// An existing file for the harness is overwritten in place; otherwise a
    /// new `{id}.yaml` is created at the root.
    ///
    /// # Errors
    ///
    /// Returns an error if the harness cannot be serialized or the file
    /// cannot be written.
    #[instrument(level = "debug", skip_all, fields(harness = %harness.id))]
    pub fn save_harness(&self, harness: &Harness) -> Result<PathBuf, SaveError> {
        let path = self
            .harness_path(&harness.id)
            .unwrap_or_else(|| self.root.join(format!("{}.yaml", harness.id)));
        HarnessDocument::from(harness).save(&path)?;
        tracing::info!("Saved harness {} to {}", harness.id, path.display());
        Ok(path)
    }

    /// Load every harness below the root, in path order.
    ///
    /// Files are parsed in parallel.
    ///
    /// # Errors
    ///
    /// If `allow_unrecognised` is `false` (the default), any `*.yaml` file
    /// that fails to load is reported, all together, in a
    /// [`DirectoryLoadError`]. If it is `true`, such files are skipped.
    #[instrument(level = "debug", skip(self), fields(root = %self.root.display()))]
    pub fn load_all(&self) -> Result<Vec<Harness>, DirectoryLoadError> {
        let paths = collect_yaml_paths(&self.root);

        let results: Vec<_> = paths
            .par_iter()
            .map(|path| load_harness_file(path).map_err(|e| (path.clone(), e)))
            .collect();

        let mut harnesses = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(harness) => harnesses.push(harness),
                Err((path, e)) => {
                    tracing::debug!("Failed to load harness from {}: {e}", path.display());
                    failures.push((path, e));
                }
            }
        }

        if !self.config.allow_unrecognised {
            if let Some(failures) = NonEmpty::from_vec(failures) {
                return Err(DirectoryLoadError { failures });
            }
        }

        Ok(harnesses)
    }

    fn harness_path(&self, id: &str) -> Option<PathBuf> {
        collect_yaml_paths(&self.root)
            .into_iter()
            .find(|path| harness_id(path) == Some(id))
    }
}

/// One or more harness files in a directory failed to load.
#[derive(Debug, thiserror::Error)]
pub struct DirectoryLoadError {
    failures: NonEmpty<(PathBuf, LoadError)>,
}

impl DirectoryLoadError {
    /// The files that failed, with the reason for each.
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &LoadError)> {
        self.failures
            .iter()
            .map(|(path, error)| (path.as_path(), error))
    }
}

impl fmt::Display for DirectoryLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MAX_DISPLAY: usize = 5;

        write!(f, "failed to load harness files: ")?;

        let total = self.failures.len();

        let displayed_paths: Vec<String> = self
            .failures
            .iter()
            .take(MAX_DISPLAY)
            .map(|(p, _e)| p.display().to_string())
            .collect();

        let msg = displayed_paths.join(", ");

        if total <= MAX_DISPLAY {
            write!(f, "{msg}")
        } else {
            write!(f, "{msg}... (and {} more)", total - MAX_DISPLAY)
        }
    }
}

fn load_config(root: &Path) -> Config {
    let path = root.join("config.toml");
    Config::load(&path).unwrap_or_else(|e| {
        tracing::debug!("Failed to load config: {e}");
        Config::default()
    })
}

/// Loads the harness in `path`, which must be the one its file name names.
fn load_harness_file(path: &Path) -> Result<Harness, LoadError> {
    let document = HarnessDocument::load(path)?;
    let harness = Harness::try_from(document)?;

    let expected = harness_id(path).unwrap_or_default();
    if harness.id.as_str() != expected {
        return Err(LoadError::IdMismatch {
            expected: expected.to_string(),
            found: harness.id,
        });
    }
    Ok(harness)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|name| name.starts_with('.'))
}

fn collect_yaml_paths(root: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        // The root itself may be hidden (e.g. a temporary directory).
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension() == Some(OsStr::new("yaml")))
        .map(DirEntry::into_path)
        .collect();
    paths.sort();
    paths
}

fn harness_id(path: &Path) -> Option<&str> {
    path.file_stem().and_then(OsStr::to_str)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::domain::harness::fixtures::sample_harness;

    fn setup_temp_directory() -> (TempDir, Directory) {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let dir = Directory::new(tmp.path().to_path_buf());
        (tmp, dir)
    }

    #[test]
    fn saved_harness_can_be_loaded_by_id() {
        let (tmp, dir) = setup_temp_directory();
        let path = dir.save_harness(&sample_harness()).unwrap();

        assert_eq!(path, tmp.path().join("H1.yaml"));
        assert_eq!(dir.harness_ids(), ["H1"]);

        let loaded = dir.load_harness("H1").unwrap();
        assert_eq!(loaded.name, "Test Harness");
        assert_eq!(loaded.wire_count(), 3);
    }

    #[test]
    fn file_holding_another_harness_is_rejected() {
        let (tmp, dir) = setup_temp_directory();
        std::fs::write(
            tmp.path().join("A.yaml"),
            "_version: '1'\nid: B\nname: Imposter\npart_number: X\n",
        )
        .unwrap();

        match dir.load_harness("A") {
            Err(LoadError::IdMismatch { expected, found }) => {
                assert_eq!(expected, "A");
                assert_eq!(found.as_str(), "B");
            }
            other => panic!("expected an id mismatch, got {other:?}"),
        }
        assert!(dir.load_all().is_err());
        assert!(!tmp.path().join("B.yaml").exists());
    }

    #[test]
    fn unknown_harness_is_not_found() {
        let (_tmp, dir) = setup_temp_directory();
        assert!(matches!(dir.load_harness("H404"), Err(LoadError::NotFound)));
    }

    #[test]
    fn saving_again_overwrites_the_existing_file() {
        let (tmp, dir) = setup_temp_directory();
        std::fs::create_dir_all(tmp.path().join("looms")).unwrap();
        let nested = tmp.path().join("looms/H1.yaml");
        std::fs::write(&nested, "_version: '1'\nid: H1\nname: Old\npart_number: X\n").unwrap();

        let path = dir.save_harness(&sample_harness()).unwrap();

        assert_eq!(path, nested);
        assert!(!tmp.path().join("H1.yaml").exists());
        assert_eq!(dir.load_harness("H1").unwrap().name, "Test Harness");
    }

    #[test]
    fn hidden_directories_and_other_files_are_ignored() {
        let (tmp, dir) = setup_temp_directory();
        dir.save_harness(&sample_harness()).unwrap();
        std::fs::create_dir_all(tmp.path().join(".cache")).unwrap();
        std::fs::write(tmp.path().join(".cache/H2.yaml"), "garbage").unwrap();
        std::fs::write(tmp.path().join("notes.md"), "# notes").unwrap();

        assert_eq!(dir.harness_ids(), ["H1"]);
        assert_eq!(dir.load_all().unwrap().len(), 1);
    }

    #[test]
    fn load_all_reports_every_broken_file() {
        let (tmp, dir) = setup_temp_directory();
        dir.save_harness(&sample_harness()).unwrap();
        std::fs::write(tmp.path().join("A.yaml"), "not: [valid").unwrap();
        std::fs::write(tmp.path().join("B.yaml"), "_version: '1'\nid: B\n").unwrap();

        let error = dir.load_all().unwrap_err();
        let failed: Vec<_> = error
            .failures()
            .filter_map(|(path, _)| harness_id(path))
            .collect();
        assert_eq!(failed, ["A", "B"]);
        assert!(error.to_string().contains("A.yaml"));
    }

    #[test]
    fn allow_unrecognised_skips_broken_files() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("config.toml"),
            "_version = \"1\"\nallow_unrecognised = true\n",
        )
        .unwrap();
        std::fs::write(tmp.path().join("A.yaml"), "not: [valid").unwrap();

        let dir = Directory::new(tmp.path().to_path_buf());
        assert!(dir.config().allow_unrecognised);

        dir.save_harness(&sample_harness()).unwrap();
        let loaded = dir.load_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id.as_str(), "H1");
    }

    #[test]
    fn invalid_config_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("config.toml"), "precision = [").unwrap();

        let dir = Directory::new(tmp.path().to_path_buf());
        assert_eq!(dir.config(), &Config::default());
    }
}
