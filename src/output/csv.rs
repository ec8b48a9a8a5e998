//! CSV output format writer.

use crate::constants::confidence::DECIMAL_PLACES;
use crate::error::{Error, Result};
use crate::output::{ImageReport, OutputWriter};
use std::io::Write;

const HEADER: [&str; 8] = [
    "file",
    "request_id",
    "rank",
    "label",
    "species",
    "confidence",
    "percent",
    "description",
];

/// CSV format output writer: one row per guess.
pub struct CsvWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvWriter<W> {
    /// Create a new CSV writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
        }
    }
}

impl<W: Write> OutputWriter for CsvWriter<W> {
    fn write_header(&mut self) -> Result<()> {
        self.writer
            .write_record(HEADER)
            .map_err(|e| Error::CsvWrite { source: e })
    }

    fn write_report(&mut self, report: &ImageReport) -> Result<()> {
        let file = report.file_path.display().to_string();
        let request_id = report.request_id.get().to_string();

        if report.batch.is_empty() {
            return self
                .writer
                .write_record([file.as_str(), request_id.as_str(), "", "", "", "", "", ""])
                .map_err(|e| Error::CsvWrite { source: e });
        }

        for (rank, guess) in report.batch.iter().enumerate() {
            self.writer
                .write_record([
                    file.as_str(),
                    request_id.as_str(),
                    &(rank + 1).to_string(),
                    &guess.label,
                    &guess.display_name(),
                    &format!("{:.DECIMAL_PLACES$}", guess.confidence),
                    &guess.percent().to_string(),
                    &report.description.text,
                ])
                .map_err(|e| Error::CsvWrite { source: e })?;
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
