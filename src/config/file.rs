//! Configuration file loading and saving.

use crate::config::Config;
use crate::error::{Error, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.
///
/// A missing file yields the default configuration; any other read failure
/// is an error.
pub fn load_config_file(path: &Path) -> Result<Config> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Config::default()),
        Err(source) => {
            return Err(Error::ConfigRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    toml::from_str(&contents).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Save configuration to a TOML file.
///
/// Written to a sibling `.tmp` file, then renamed into place.
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    let write_err = |source: std::io::Error| Error::ConfigWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let contents =
        toml::to_string_pretty(config).map_err(|source| Error::ConfigSerialize { source })?;

    let staging = staging_path(path);
    std::fs::write(&staging, contents).map_err(write_err)?;
    std::fs::rename(&staging, path).map_err(|e| {
        let _ = std::fs::remove_file(&staging);
        write_err(e)
    })
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(std::ffi::OsStr::to_os_string).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::config::{ModelConfig, OutputFormat};
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_nonexistent_file_returns_default() {
        let path = Path::new("/nonexistent/path/config.toml");
        let config = load_config_file(path).unwrap();
        assert!(config.models.is_empty());
        assert!(config.output.bold);
    }

    #[test]
    fn test_load_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[models.cub200]
path = "/path/to/birds.onnx"
labels = "/path/to/labels.txt"
input_size = 299

[defaults]
model = "cub200"
format = "json"
top_guess_threshold = 0.8
"#
        )
        .unwrap();

        let config = load_config_file(file.path()).unwrap();
        let model = &config.models["cub200"];
        assert_eq!(model.input_size, 299);
        assert!(model.softmax);
        assert_eq!(config.defaults.model.as_deref(), Some("cub200"));
        assert_eq!(config.defaults.format, OutputFormat::Json);
        assert_eq!(config.defaults.top_guess_threshold, 0.8);
        assert_eq!(config.defaults.max_results, 3);
    }

    #[test]
    fn test_load_invalid_toml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "this is not valid toml {{{{").unwrap();

        let config = load_config_file(file.path());
        assert!(matches!(config, Err(Error::ConfigParse { .. })));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.models.insert(
            "cub200".to_string(),
            ModelConfig {
                path: PathBuf::from("/models/birds.onnx"),
                labels: PathBuf::from("/models/labels.txt"),
                ..ModelConfig::default()
            },
        );
        config.defaults.model = Some("cub200".to_string());

        save_config(&config, &path).unwrap();
        let loaded = load_config_file(&path).unwrap();

        assert_eq!(loaded.models["cub200"], config.models["cub200"]);
        assert_eq!(loaded.defaults.model, config.defaults.model);
    }

    #[test]
    fn test_save_replaces_existing_and_leaves_no_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "stale = true\n").unwrap();

        let mut config = Config::default();
        config.defaults.max_results = 5;
        save_config(&config, &path).unwrap();

        assert_eq!(load_config_file(&path).unwrap().defaults.max_results, 5);
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn test_load_directory_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config_file(dir.path());
        assert!(matches!(result, Err(Error::ConfigRead { .. })));
    }
}
