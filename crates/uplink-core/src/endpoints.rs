//! Endpoint list input.
//!
//! One endpoint per line. Lines are trimmed, blank lines and `#` comments
//! are skipped, and order is preserved.

use std::path::Path;

use crate::error::InputError;

/// Split endpoint-list text into trimmed, non-empty entries.
pub fn parse_endpoints(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Read an endpoint file. A missing file or an empty list is an error.
pub fn load_endpoints(path: &Path) -> Result<Vec<String>, InputError> {
    let text = std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let endpoints = parse_endpoints(&text);
    if endpoints.is_empty() {
        return Err(InputError::Empty(path.to_path_buf()));
    }
    Ok(endpoints)
}
