//! Reading procedure sources from disk

use std::path::Path;

use encoding_rs::WINDOWS_1252;
use tracing::debug;

use super::discovery::{discover_procedure_files, relative_label, DiscoveryOptions};
use crate::error::ProcMapError;
use crate::model::SqlSource;

/// Read a file as a string, trying UTF-8 first, then Windows-1252 as fallback
fn read_file_with_encoding_fallback(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(err) => {
            // SQL files saved by SSMS on Windows are often ANSI encoded
            let bytes = err.into_bytes();
            let (decoded, _, had_errors) = WINDOWS_1252.decode(&bytes);
            if had_errors {
                Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "File contains invalid characters",
                ))
            } else {
                Ok(decoded.into_owned())
            }
        }
    }
}

/// Read one procedure file, labelling it relative to `root`
pub fn read_sql_source(root: &Path, path: &Path) -> Result<SqlSource, ProcMapError> {
    let content =
        read_file_with_encoding_fallback(path).map_err(|e| ProcMapError::SqlFileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

    // Strip UTF-8 BOM if present
    let content = match content.strip_prefix('\u{FEFF}') {
        Some(stripped) => stripped.to_string(),
        None => content,
    };

    Ok(SqlSource::new(relative_label(root, path), content))
}

/// Discover and read every procedure source under `root`
pub fn load_sources(root: &Path, options: &DiscoveryOptions) -> Result<Vec<SqlSource>, ProcMapError> {
    let files = discover_procedure_files(root, options)?;
    debug!(root = %root.display(), files = files.len(), "discovered procedure files");

    files
        .iter()
        .map(|path| read_sql_source(root, path))
        .collect()
}
