//! Input discovery for image processing.

use crate::constants::IMAGE_EXTENSIONS;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Collect input images from paths (files and directories).
///
/// Directories are walked recursively and their entries sorted so runs are
/// reproducible. Explicit file arguments are kept even without a known
/// image extension; the decoder decides whether they are usable.
pub fn collect_input_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if !is_image_file(path) {
                warn!(
                    "{} has no known image extension, trying anyway",
                    path.display()
                );
            }
            files.push(path.clone());
        } else if path.is_dir() {
            collect_images_recursive(path, &mut files)?;
        } else {
            warn!("Skipping non-existent path: {}", path.display());
        }
    }

    Ok(files)
}

fn collect_images_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_images_recursive(&path, files)?;
        } else if is_image_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

/// Check if a path has a supported image extension.
pub fn is_image_file(path: &Path) -> bool {
    use std::ffi::OsStr;

    path.extension().is_some_and(|ext| {
        IMAGE_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(OsStr::new(known)))
    })
}
