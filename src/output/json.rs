//! JSON output format writer.

use crate::error::{Error, Result};
use crate::output::{ImageReport, OutputWriter};
use crate::species::{ClassificationResult, FormattedDescription};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON result document.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Model used for classification.
    pub model: String,
    /// One entry per image.
    pub results: Vec<JsonImageResult>,
}

/// Classification of a single image in JSON format.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonImageResult {
    /// Source image path.
    pub file: String,
    /// Classification request id.
    pub request_id: u64,
    /// Guesses, highest confidence first.
    pub guesses: Vec<JsonGuess>,
    /// Display description.
    pub description: FormattedDescription,
}

/// A single guess in JSON format.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonGuess {
    /// Raw model label.
    pub label: String,
    /// Label with underscores replaced by spaces.
    pub species: String,
    /// Confidence score.
    pub confidence: f32,
    /// Confidence as a truncated whole percentage.
    pub percent: u32,
}

impl From<&ClassificationResult> for JsonGuess {
    fn from(result: &ClassificationResult) -> Self {
        Self {
            label: result.label.clone(),
            species: result.display_name(),
            confidence: result.confidence,
            percent: result.percent(),
        }
    }
}

/// Collects reports and writes a single JSON document on finalize.
pub struct JsonWriter<W: Write> {
    writer: W,
    model: String,
    results: Vec<JsonImageResult>,
}

impl<W: Write> JsonWriter<W> {
    /// Create a new JSON writer.
    pub fn new(writer: W, model: &str) -> Self {
        Self {
            writer,
            model: model.to_string(),
            results: Vec::new(),
        }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_header(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_report(&mut self, report: &ImageReport) -> Result<()> {
        self.results.push(JsonImageResult {
            file: report.file_path.display().to_string(),
            request_id: report.request_id.get(),
            guesses: report.batch.iter().map(JsonGuess::from).collect(),
            description: report.description.clone(),
        });
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        let document = JsonReport {
            generated_at: Utc::now(),
            model: self.model.clone(),
            results: std::mem::take(&mut self.results),
        };

        serde_json::to_writer_pretty(&mut self.writer, &document)
            .map_err(|e| Error::JsonWrite { source: e })?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
