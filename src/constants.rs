//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "specid";

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Number of guesses kept from a single classification.
pub const DEFAULT_MAX_RESULTS: usize = 3;

/// Formatting policy for classification descriptions.
pub mod description {
    /// A top guess must be strictly above this confidence to be shown alone.
    pub const TOP_GUESS_THRESHOLD: f32 = 0.70;

    /// Descriptions longer than this many characters are rendered tight.
    pub const LONG_TEXT_CHARS: usize = 50;

    /// Line spacing hint for long descriptions.
    pub const TIGHT_LINE_SPACING: u8 = 0;

    /// Line spacing hint for short descriptions and empty batches.
    pub const RELAXED_LINE_SPACING: u8 = 5;

    /// Prefix used when a single guess is confident enough.
    pub const TOP_GUESS_PREFIX: &str = "Top guess: ";

    /// Prefix used when listing every guess.
    pub const GUESSES_PREFIX: &str = "Guesses are:";
}

/// Confidence threshold bounds.
pub mod confidence {
    /// Minimum valid confidence value.
    pub const MIN: f32 = 0.0;
    /// Maximum valid confidence value.
    pub const MAX: f32 = 1.0;
    /// Decimal places for confidence in machine-readable output.
    pub const DECIMAL_PLACES: usize = 4;
}

/// Defaults for the ONNX image classifier.
pub mod model {
    /// Square input edge length in pixels.
    pub const DEFAULT_INPUT_SIZE: u32 = 224;
    /// Per-channel normalization mean (ImageNet).
    pub const DEFAULT_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
    /// Per-channel normalization standard deviation (ImageNet).
    pub const DEFAULT_STD: [f32; 3] = [0.229, 0.224, 0.225];
}

/// Image file extensions accepted as input.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "webp", "tif", "tiff",
];
