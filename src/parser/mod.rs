//! Parser module — per-file scanning and cross-file merge.

pub mod merge;
pub mod qsharp;

use crate::model::SourceUnit;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Read and scan one source file.
///
/// I/O errors are returned to the caller; malformed content never is.
pub fn parse_file(path: &Path, heading_level: usize) -> Result<SourceUnit> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let unit = qsharp::scan(&content, heading_level);
    tracing::debug!(
        path = %path.display(),
        namespace = unit.namespace.as_deref().unwrap_or("<none>"),
        functions = unit.functions.len(),
        "scanned source file"
    );
    Ok(unit)
}
