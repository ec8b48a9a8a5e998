//! Human-readable text output.

use crate::error::Result;
use crate::output::{ImageReport, OutputWriter};
use crate::species::FormattedDescription;
use std::io::Write;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Writes one `file: description` line per image.
pub struct TextWriter<W: Write> {
    writer: W,
    bold: bool,
}

impl<W: Write> TextWriter<W> {
    /// Create a new text writer. With `bold`, species names get ANSI bold.
    pub fn new(writer: W, bold: bool) -> Self {
        Self { writer, bold }
    }
}

impl<W: Write> OutputWriter for TextWriter<W> {
    fn write_header(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_report(&mut self, report: &ImageReport) -> Result<()> {
        let body = if report.description.text.is_empty() {
            "no species guesses".to_string()
        } else {
            render_description(&report.description, self.bold)
        };
        writeln!(self.writer, "{}: {body}", report.file_path.display())?;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Render a description, wrapping emphasized spans in ANSI bold when `bold` is set.
pub fn render_description(description: &FormattedDescription, bold: bool) -> String {
    if !bold || description.emphasis.is_empty() {
        return description.text.clone();
    }

    let ranges: Vec<_> = description
        .emphasis
        .iter()
        .filter(|range| range.length > 0)
        .collect();

    let mut out = String::with_capacity(description.text.len() + ranges.len() * 8);
    let mut count = 0;
    for (idx, ch) in description.text.chars().enumerate() {
        if ranges.iter().any(|range| range.end() == idx) {
            out.push_str(RESET);
        }
        if ranges.iter().any(|range| range.start == idx) {
            out.push_str(BOLD);
        }
        out.push(ch);
        count = idx + 1;
    }
    if ranges.iter().any(|range| range.end() == count) {
        out.push_str(RESET);
    }
    out
}
