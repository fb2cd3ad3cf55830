//! Writes rendered mapping files below an output root

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::codegen::MappingFile;
use crate::error::{CodegenError, Result};

/// Full target path of a file below `root`
pub fn target_path(root: &Path, file: &MappingFile) -> PathBuf {
    root.join(file.relative_path())
}

/// Write `file` to `root/<package dirs>/<file name>`, creating directories.
///
/// The content is encoded before anything touches the disk and lands in a
/// single write; an existing file is replaced.
pub fn write_mapping_file(root: &Path, file: &MappingFile) -> Result<PathBuf> {
    let path = target_path(root, file);
    let bytes = file.encode()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| CodegenError::WriteError {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(&path, bytes).map_err(|source| CodegenError::WriteError {
        path: path.clone(),
        source,
    })?;

    debug!("Wrote {}", path.display());
    Ok(path)
}
