//! Labels file reading.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read class labels from file.
///
/// # File Format
/// - One label per line, in model output order
/// - Format: underscore-delimited species name (e.g. `White_Pelican`)
/// - Surrounding whitespace is trimmed and blank lines are ignored
pub fn read_labels(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| Error::LabelsRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let reader = BufReader::new(file);
    let mut labels = Vec::new();

    for line in reader.lines() {
        let line = line.map_err(|e| Error::LabelsRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let trimmed = line.trim();
        if !trimmed.is_empty() {
            labels.push(trimmed.to_string());
        }
    }

    Ok(labels)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_labels_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Black_footed_Albatross").unwrap();
        writeln!(file, "  Laysan_Albatross  ").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "Sooty_Albatross").unwrap();

        let labels = read_labels(file.path()).unwrap();
        assert_eq!(
            labels,
            vec!["Black_footed_Albatross", "Laysan_Albatross", "Sooty_Albatross"]
        );
    }

    #[test]
    fn test_read_labels_file_not_found() {
        let result = read_labels(Path::new("nonexistent-labels.txt"));
        assert!(matches!(result, Err(Error::LabelsRead { .. })));
    }
}
