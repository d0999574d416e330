//! Writes a blueprint's directory and file overlay onto disk

use crate::error::ScaffoldError;
use crate::templates::catalog::FileTemplate;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Create every directory under `root`, parents included.
///
/// Entries that already exist are left alone. Returns the created paths in
/// order.
pub async fn create_directories(
    root: &Path,
    directories: &[&str],
) -> Result<Vec<PathBuf>, ScaffoldError> {
    let mut created = Vec::with_capacity(directories.len());

    for dir in directories {
        let path = root.join(dir);
        fs::create_dir_all(&path)
            .await
            .map_err(|source| ScaffoldError::CreateDir {
                path: path.clone(),
                source,
            })?;
        created.push(path);
    }

    Ok(created)
}

/// Write every template under `root`, replacing existing files.
///
/// Stops at the first failure; files written before it stay on disk.
pub async fn write_files(
    root: &Path,
    files: &[FileTemplate],
) -> Result<Vec<PathBuf>, ScaffoldError> {
    let mut written = Vec::with_capacity(files.len());

    for template in files {
        let target_path = root.join(template.path);
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| ScaffoldError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        fs::write(&target_path, template.render())
            .await
            .map_err(|source| ScaffoldError::WriteFile {
                path: target_path.clone(),
                source,
            })?;

        written.push(target_path);
    }

    Ok(written)
}
