//! Configuration type definitions.

use crate::constants::description::TOP_GUESS_THRESHOLD;
use crate::constants::model::{DEFAULT_INPUT_SIZE, DEFAULT_MEAN, DEFAULT_STD};
use crate::constants::DEFAULT_MAX_RESULTS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configured models by name.
    pub models: BTreeMap<String, ModelConfig>,

    /// Default settings.
    pub defaults: DefaultsConfig,

    /// Output settings.
    pub output: OutputConfig,
}

/// Configuration for a single image classification model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the ONNX model file.
    pub path: PathBuf,

    /// Path to the labels file.
    pub labels: PathBuf,

    /// Square input edge length expected by the model.
    pub input_size: u32,

    /// Per-channel normalization mean.
    pub mean: [f32; 3],

    /// Per-channel normalization standard deviation.
    pub std: [f32; 3],

    /// Apply softmax to the model output (disable for models that already emit probabilities).
    pub softmax: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            labels: PathBuf::new(),
            input_size: DEFAULT_INPUT_SIZE,
            mean: DEFAULT_MEAN,
            std: DEFAULT_STD,
            softmax: true,
        }
    }
}

/// Default analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Default model name to use.
    pub model: Option<String>,

    /// Output format.
    pub format: OutputFormat,

    /// A top guess above this confidence is shown alone.
    pub top_guess_threshold: f32,

    /// Number of guesses kept per image.
    pub max_results: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            model: None,
            format: OutputFormat::Text,
            top_guess_threshold: TOP_GUESS_THRESHOLD,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Render species names in bold in text output.
    pub bold: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { bold: true }
    }
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable description per image.
    #[default]
    Text,
    /// Single JSON document.
    Json,
    /// One CSV row per guess.
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>().ok(), Some(OutputFormat::Text));
        assert_eq!("TXT".parse::<OutputFormat>().ok(), Some(OutputFormat::Text));
        assert_eq!("json".parse::<OutputFormat>().ok(), Some(OutputFormat::Json));
        assert_eq!("csv".parse::<OutputFormat>().ok(), Some(OutputFormat::Csv));
        assert!("raven".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Text.to_string(), "text");
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
    }

    #[test]
    fn test_defaults_config_default_values() {
        let defaults = DefaultsConfig::default();
        assert_eq!(defaults.top_guess_threshold, 0.70);
        assert_eq!(defaults.max_results, 3);
        assert_eq!(defaults.format, OutputFormat::Text);
    }

    #[test]
    fn test_model_config_defaults() {
        let model = ModelConfig::default();
        assert_eq!(model.input_size, 224);
        assert!(model.softmax);
    }
}
