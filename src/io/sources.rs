//! Source folder enumeration

use std::path::{Path, PathBuf};

use crate::io::configuration::SOURCE_EXTENSIONS;
use crate::io::error::{MosaicError, Result};

/// List the source photos directly inside `directory`
///
/// Subdirectories are not searched. The result is sorted so the pool's
/// enumeration order, and with it match tie-breaking, doesn't depend on the
/// platform's directory listing order.
///
/// # Errors
///
/// Returns `FileSystem` if the directory or one of its entries cannot be read
pub fn collect_source_paths(directory: &Path) -> Result<Vec<PathBuf>> {
    let read_error = |e: std::io::Error| MosaicError::FileSystem {
        path: directory.to_path_buf(),
        operation: "read directory",
        source: e,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(directory).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_file() && has_source_extension(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Check whether a path carries one of the accepted source extensions
pub fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            SOURCE_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
}
