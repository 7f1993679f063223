//! File helpers used by the orchestrator and key serialization.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{ConfigError, HybridError};

/// Read a whole file.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>, HybridError> {
    let data = fs::read(path).map_err(|e| HybridError::io(path, e))?;
    debug!(path = %path.display(), bytes = data.len(), "file read");
    Ok(data)
}

/// Write `data` to `path`, creating parent directories as needed.
pub fn write_bytes(data: &[u8], path: &Path) -> Result<(), HybridError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| HybridError::io(parent, e))?;
    }
    fs::write(path, data).map_err(|e| HybridError::io(path, e))?;
    debug!(path = %path.display(), bytes = data.len(), "file written");
    Ok(())
}

/// Read a plain-text integer, ignoring surrounding whitespace.
pub fn read_int_from_text_file(path: &Path) -> Result<u32, HybridError> {
    let content = fs::read_to_string(path).map_err(|e| HybridError::io(path, e))?;
    content.trim().parse::<u32>().map_err(|_| {
        ConfigError::NotAnInteger {
            path: path.to_path_buf(),
        }
        .into()
    })
}
