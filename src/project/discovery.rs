//! Discovery of stored-procedure source files

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ProcMapError;
use crate::util::ends_with_ci;

/// Which files under a root folder count as procedure sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Parent directory name must end with this (case-insensitive). Empty accepts any folder.
    pub folder_suffix: String,
    /// Glob patterns, relative to the root, for files to leave out
    pub excludes: Vec<String>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            folder_suffix: "Procedures".to_string(),
            excludes: Vec::new(),
        }
    }
}

/// Find every `.sql` file under `root` that lives in a procedures folder.
///
/// Results are sorted so catalog order does not depend on directory iteration order.
pub fn discover_procedure_files(
    root: &Path,
    options: &DiscoveryOptions,
) -> Result<Vec<PathBuf>, ProcMapError> {
    let excludes = options
        .excludes
        .iter()
        .map(|pattern| {
            glob::Pattern::new(&pattern.replace('\\', "/")).map_err(|e| {
                ProcMapError::InvalidExcludePattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(root) {
        let entry = entry.map_err(|e| ProcMapError::DirectoryReadError {
            path: e.path().unwrap_or(root).to_path_buf(),
            source: e,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if !is_sql_file(path) || !in_procedures_folder(path, &options.folder_suffix) {
            continue;
        }

        let relative = relative_label(root, path);
        if excludes.iter().any(|pattern| pattern.matches(&relative)) {
            debug!(file = %relative, "excluded by pattern");
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

/// Path of `path` relative to `root`, with forward slashes
pub fn relative_label(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn is_sql_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("sql"))
}

fn in_procedures_folder(path: &Path, suffix: &str) -> bool {
    if suffix.is_empty() {
        return true;
    }
    path.parent()
        .and_then(|dir| dir.file_name())
        .and_then(|name| name.to_str())
        .is_some_and(|name| ends_with_ci(name, suffix))
}
