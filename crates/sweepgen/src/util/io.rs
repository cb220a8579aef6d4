//! I/O utility functions

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Temp file used while writing `path`: same directory, `.tmp` appended
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write content to a file atomically using write-then-rename pattern.
///
/// Readers see either the old file or the complete new one, never a partial
/// write. The temp file lives next to the target so the rename stays on one
/// file system.
///
/// # Example
/// ```ignore
/// atomic_write(Path::new("config.yaml"), &yaml_content)?;
/// ```
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let temp = temp_path(path);
    fs::write(&temp, content)?;
    fs::rename(&temp, path)
}

/// Replace characters that are awkward in file names with `_`
pub fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.is_empty() {
        "run".to_string()
    } else {
        sanitized
    }
}
