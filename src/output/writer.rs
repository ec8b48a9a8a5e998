//! Output writer trait definition.

use crate::error::Result;
use crate::output::ImageReport;

/// Trait for writing classification reports.
pub trait OutputWriter {
    /// Write the file header (if applicable).
    fn write_header(&mut self) -> Result<()>;

    /// Write a single image report.
    fn write_report(&mut self, report: &ImageReport) -> Result<()>;

    /// Finalize the output (flush, close, etc.).
    fn finalize(&mut self) -> Result<()>;
}
