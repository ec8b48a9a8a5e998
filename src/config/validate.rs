//! Configuration validation.

use crate::config::{Config, ModelConfig};
use crate::constants::confidence;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_defaults(config)?;
    for (name, model) in &config.models {
        validate_model_settings(name, model)?;
    }
    Ok(())
}

/// Validate default settings.
fn validate_defaults(config: &Config) -> Result<()> {
    let defaults = &config.defaults;

    validate_threshold(defaults.top_guess_threshold)?;

    if defaults.max_results == 0 {
        return Err(Error::ConfigValidation {
            message: "max_results must be at least 1".to_string(),
        });
    }

    if let Some(ref model_name) = defaults.model
        && !config.models.contains_key(model_name)
    {
        return Err(Error::ModelNotFound {
            name: model_name.clone(),
        });
    }

    Ok(())
}

/// Validate a top-guess threshold.
pub fn validate_threshold(threshold: f32) -> Result<()> {
    if !(confidence::MIN..=confidence::MAX).contains(&threshold) {
        return Err(Error::ConfigValidation {
            message: format!(
                "top_guess_threshold must be between {} and {}, got {}",
                confidence::MIN,
                confidence::MAX,
                threshold
            ),
        });
    }
    Ok(())
}

/// Validate model settings that do not touch the filesystem.
fn validate_model_settings(name: &str, model: &ModelConfig) -> Result<()> {
    if model.input_size == 0 {
        return Err(Error::ConfigValidation {
            message: format!("model '{name}': input_size must be at least 1"),
        });
    }

    if model.std.iter().any(|&s| s == 0.0 || !s.is_finite()) {
        return Err(Error::ConfigValidation {
            message: format!("model '{name}': std values must be finite and non-zero"),
        });
    }

    Ok(())
}

/// Validate a model configuration and check files exist.
pub fn validate_model_config(name: &str, model: &ModelConfig) -> Result<()> {
    validate_model_settings(name, model)?;

    if !model.path.exists() {
        return Err(Error::ModelFileNotFound {
            path: model.path.clone(),
        });
    }

    if !model.labels.exists() {
        return Err(Error::LabelsFileNotFound {
            path: model.labels.clone(),
        });
    }

    Ok(())
}

/// Get a model by name from the config.
pub fn get_model<'a>(config: &'a Config, name: &str) -> Result<&'a ModelConfig> {
    config.models.get(name).ok_or_else(|| Error::ModelNotFound {
        name: name.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn model(path: PathBuf, labels: PathBuf) -> ModelConfig {
        ModelConfig {
            path,
            labels,
            ..ModelConfig::default()
        }
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_invalid_threshold() {
        let mut config = Config::default();
        config.defaults.top_guess_threshold = 1.5;
        assert!(matches!(
            validate_config(&config),
            Err(Error::ConfigValidation { .. })
        ));
    }

    #[test]
    fn test_validate_zero_max_results() {
        let mut config = Config::default();
        config.defaults.max_results = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_missing_default_model() {
        let mut config = Config::default();
        config.defaults.model = Some("nonexistent".to_string());
        assert!(matches!(
            validate_config(&config),
            Err(Error::ModelNotFound { .. })
        ));
    }

    #[test]
    fn test_validate_zero_std() {
        let mut config = Config::default();
        let mut birds = model(PathBuf::from("a.onnx"), PathBuf::from("a.txt"));
        birds.std = [0.2, 0.0, 0.2];
        config.models.insert("birds".to_string(), birds);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_model_config_missing_files() {
        let missing = model(
            PathBuf::from("/nonexistent/model.onnx"),
            PathBuf::from("/nonexistent/labels.txt"),
        );
        assert!(matches!(
            validate_model_config("birds", &missing),
            Err(Error::ModelFileNotFound { .. })
        ));
    }

    #[test]
    fn test_validate_model_config_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.onnx");
        let labels = dir.path().join("labels.txt");
        std::fs::write(&path, b"").unwrap();
        std::fs::write(&labels, b"Rock_Wren\n").unwrap();

        assert!(validate_model_config("birds", &model(path, labels)).is_ok());
    }

    #[test]
    fn test_get_model() {
        let mut config = Config::default();
        config.models.insert(
            "birds".to_string(),
            model(PathBuf::from("a.onnx"), PathBuf::from("a.txt")),
        );
        assert!(get_model(&config, "birds").is_ok());
        assert!(get_model(&config, "fish").is_err());
    }
}
