//! Context types for rule execution.

use crate::config::Properties;
use std::path::{Path, PathBuf};

/// Context provided to per-file rules.
///
/// Carries the file's location and the configuration properties that
/// apply to it, so rules can read settings such as `indent_size` when they
/// visit the file root.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path to the file as it was discovered.
    pub path: &'a Path,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
    /// Whether this is a Kotlin script (`.kts`).
    pub is_script: bool,
    /// Properties resolved for this file.
    pub properties: &'a Properties,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, root: &Path, properties: &'a Properties) -> Self {
        let relative_path = relative_to(path, root);
        let is_script = path.extension().is_some_and(|ext| ext == "kts");

        Self {
            path,
            relative_path,
            is_script,
            properties,
        }
    }

    /// Looks up a property value for this file.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&'a str> {
        self.properties.get(key)
    }
}

/// `path` relative to `root`; a root that is the file itself yields the
/// file name.
pub(crate) fn relative_to(path: &Path, root: &Path) -> PathBuf {
    match path.strip_prefix(root) {
        Ok(rest) if rest.as_os_str().is_empty() => path
            .file_name()
            .map_or_else(|| path.to_path_buf(), PathBuf::from),
        Ok(rest) => rest.to_path_buf(),
        Err(_) => path.to_path_buf(),
    }
}
