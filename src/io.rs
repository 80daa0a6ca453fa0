//! Plain-text input loading and JSON artifact output.
//!
//! File-level failures (missing file, unreadable path) surface here as
//! `String` errors, distinct from the per-line record errors collected by
//! the scene pipeline.

use serde::Serialize;
use std::fs;
use std::path::Path;

/// Reads a whitespace-delimited input file into raw lines.
///
/// Per-line parsing happens downstream so one bad line never aborts the
/// load.
pub fn read_lines(path: &Path) -> Result<Vec<String>, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    Ok(data.lines().map(str::to_string).collect())
}

/// Writes a scene (or any serializable artifact) as pretty JSON, creating
/// missing parent directories along the way.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    create_parent_dirs(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Cannot serialize {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Cannot write {}: {e}", path.display()))
}

fn create_parent_dirs(path: &Path) -> Result<(), String> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .map_err(|e| format!("Cannot create directory {}: {e}", parent.display())),
        _ => Ok(()),
    }
}
