//! JSON output writer for harvested records.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::Record;

/// Serialize records as a pretty-printed JSON array.
pub fn to_json(records: &[Record]) -> Result<String> {
    let mut content = serde_json::to_string_pretty(records)?;
    content.push('\n');
    Ok(content)
}

/// Save records as a JSON file.
///
/// Uses atomic write pattern: writes to a temp file in the target
/// directory, syncs to disk, then renames. Partial writes never corrupt an
/// existing file.
///
/// # Returns
/// Path to the saved file.
pub fn save_json(records: &[Record], path: &Path) -> Result<PathBuf> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let file_name = path
        .file_name()
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Output path has no file name: {}", path.display()),
            )
        })?
        .to_string_lossy();
    let temp_file = dir.join(format!(".{file_name}.tmp"));

    let content = to_json(records)?;

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;

    Ok(path.to_path_buf())
}
