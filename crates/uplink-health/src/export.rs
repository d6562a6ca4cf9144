//! JSON export of a settled run.
//!
//! The export is written to a temporary sibling file and renamed into
//! place, so an interrupted process never leaves a half-written file at
//! the target path.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use uplink_core::{Outcome, RunResult};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read export {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("export serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write every outcome of `result`, in display order, as a JSON array.
pub fn write_json(path: &Path, result: &RunResult) -> Result<(), ExportError> {
    let body = serde_json::to_string_pretty(result.outcomes())?;
    let tmp = temp_path(path);

    let write_err = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };
    std::fs::write(&tmp, body).map_err(write_err)?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(write_err(e));
    }

    debug!(path = %path.display(), records = result.total_count(), "export written");
    Ok(())
}

/// Parse an export file back into outcomes.
pub fn read_json(path: &Path) -> Result<Vec<Outcome>, ExportError> {
    let content = std::fs::read_to_string(path).map_err(|source| ExportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "export".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}
