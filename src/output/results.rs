//! Results file writer

use crate::error::{ImportError, ImportResult};
use crate::models::RunStats;
use std::path::Path;

/// Write the run statistics as pretty-printed JSON
pub fn write_results(path: &Path, stats: &RunStats) -> ImportResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(stats)?;
    std::fs::write(path, content)
        .map_err(|e| ImportError::Io(format!("Cannot write {}: {}", path.display(), e)))
}
