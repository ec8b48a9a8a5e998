//! Error types for specid.

/// Result type alias for specid operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for specid.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Model not found in configuration.
    #[error("model '{name}' not found in configuration")]
    ModelNotFound {
        /// Name of the missing model.
        name: String,
    },

    /// Model already exists in configuration.
    #[error("model '{name}' already exists in configuration")]
    ModelAlreadyExists {
        /// Name of the existing model.
        name: String,
    },

    /// Model file does not exist.
    #[error("model file does not exist: {path}")]
    ModelFileNotFound {
        /// Path to the missing model file.
        path: std::path::PathBuf,
    },

    /// Labels file does not exist.
    #[error("labels file does not exist: {path}")]
    LabelsFileNotFound {
        /// Path to the missing labels file.
        path: std::path::PathBuf,
    },

    /// Failed to read labels file.
    #[error("failed to read labels file '{path}'")]
    LabelsRead {
        /// Path to the labels file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// No valid image files found.
    #[error("no valid image files found in the provided paths")]
    NoValidImages,

    /// Failed to decode an image file.
    #[error("failed to decode image '{path}'")]
    ImageDecode {
        /// Path to the image file.
        path: std::path::PathBuf,
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },

    /// The image cannot be turned into classifier input.
    #[error("unusable image: {reason}")]
    Image {
        /// Why the image was rejected.
        reason: String,
    },

    /// The image orientation metadata cannot be interpreted.
    #[error("unreadable image orientation: {reason}")]
    Orientation {
        /// Why the orientation was rejected.
        reason: String,
    },

    /// The classifier produced output that cannot be trusted.
    #[error("malformed model output: {reason}")]
    ModelOutput {
        /// Description of the malformed output.
        reason: String,
    },

    /// Failed to build classifier.
    #[error("failed to build classifier: {reason}")]
    ClassifierBuild {
        /// Description of the build failure.
        reason: String,
    },

    /// Inference failed.
    #[error("inference failed: {reason}")]
    Inference {
        /// Description of the inference failure.
        reason: String,
    },

    /// Classification worker went away without delivering a result.
    #[error("classification channel closed unexpectedly")]
    ClassificationChannelClosed,

    /// Failed to write CSV output.
    #[error("failed to write CSV output")]
    CsvWrite {
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Failed to write JSON output.
    #[error("failed to write JSON output")]
    JsonWrite {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Internal error (for unexpected failures).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}
