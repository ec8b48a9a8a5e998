//! Output type definitions.

use crate::inference::RequestId;
use crate::species::{ClassificationBatch, FormattedDescription};
use std::path::PathBuf;

/// Everything known about one classified image.
#[derive(Debug, Clone)]
pub struct ImageReport {
    /// Path to the source image.
    pub file_path: PathBuf,
    /// Request that produced the guesses.
    pub request_id: RequestId,
    /// Guesses, highest confidence first.
    pub batch: ClassificationBatch,
    /// Display text for the guesses.
    pub description: FormattedDescription,
}
