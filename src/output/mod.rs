//! Output format writers.

mod csv;
mod json;
pub mod progress;
mod text;
mod types;
mod writer;

pub use csv::CsvWriter;
pub use json::{JsonGuess, JsonImageResult, JsonReport, JsonWriter};
pub use text::{TextWriter, render_description};
pub use types::ImageReport;
pub use writer::OutputWriter;

use crate::config::OutputFormat;
use std::io::Write;

/// Create a writer for the given output format.
pub fn create_writer(
    format: OutputFormat,
    writer: Box<dyn Write>,
    bold: bool,
    model: &str,
) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Text => Box::new(TextWriter::new(writer, bold)),
        OutputFormat::Json => Box::new(JsonWriter::new(writer, model)),
        OutputFormat::Csv => Box::new(CsvWriter::new(writer)),
    }
}

/// Whether text output should carry ANSI bold.
///
/// Escape codes are only written to an interactive stdout; files and pipes
/// get plain text.
pub fn bold_enabled(requested: bool, to_file: bool, stdout_is_terminal: bool) -> bool {
    requested && !to_file && stdout_is_terminal
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_only_on_terminal_stdout() {
        assert!(bold_enabled(true, false, true));
        assert!(!bold_enabled(false, false, true));
    }

    #[test]
    fn test_no_bold_for_file_output() {
        assert!(!bold_enabled(true, true, true));
        assert!(!bold_enabled(true, true, false));
    }

    #[test]
    fn test_no_bold_for_piped_stdout() {
        assert!(!bold_enabled(true, false, false));
    }

    #[test]
    fn test_text_file_output_is_plain() {
        use crate::inference::RequestId;
        use crate::species::{ClassificationBatch, ClassificationResult, format_description};
        use std::path::PathBuf;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let batch = ClassificationBatch::new(vec![ClassificationResult::new("Rock_Wren", 0.40)]);
        let report = ImageReport {
            file_path: PathBuf::from("wren.jpg"),
            request_id: RequestId::new(1),
            description: format_description(&batch),
            batch,
        };

        {
            let file = std::fs::File::create(&path).unwrap();
            let sink: Box<dyn Write> = Box::new(std::io::BufWriter::new(file));
            let bold = bold_enabled(true, true, true);
            let mut writer = create_writer(OutputFormat::Text, sink, bold, "cub200");
            writer.write_report(&report).unwrap();
            writer.finalize().unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains('\x1b'));
        assert_eq!(
            contents,
            "wren.jpg: Guesses are: Rock Wren [confidence: 40%].\n"
        );
    }
}
