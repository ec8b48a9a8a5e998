//! Turns a classification batch into display text with emphasized species names.
//!
//! A single confident guess is shown on its own; otherwise every guess is
//! listed. Offsets in [`EmphasisRange`] count characters, not bytes.

use crate::constants::description::{
    GUESSES_PREFIX, LONG_TEXT_CHARS, RELAXED_LINE_SPACING, TIGHT_LINE_SPACING, TOP_GUESS_PREFIX,
    TOP_GUESS_THRESHOLD,
};
use crate::species::{ClassificationBatch, ClassificationResult};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// A span of the description text to highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmphasisRange {
    /// Character offset of the first highlighted character.
    pub start: usize,
    /// Number of highlighted characters.
    pub length: usize,
}

impl EmphasisRange {
    /// Create a new range.
    pub const fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Character offset just past the range.
    pub const fn end(&self) -> usize {
        self.start + self.length
    }

    /// The highlighted substring of `text`, or `None` if the range falls outside it.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        let start = byte_offset(text, self.start)?;
        let end = byte_offset(text, self.end())?;
        text.get(start..end)
    }
}

/// Horizontal alignment hint for the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Renderer default.
    #[default]
    Natural,
    /// Centered text.
    Centered,
}

/// Display-ready description of a classification batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedDescription {
    /// Full description text.
    pub text: String,
    /// Spans of `text` holding species names.
    pub emphasis: Vec<EmphasisRange>,
    /// Line spacing hint in points.
    pub line_spacing: u8,
    /// Alignment hint.
    pub alignment: Alignment,
}

impl Default for FormattedDescription {
    fn default() -> Self {
        Self {
            text: String::new(),
            emphasis: Vec::new(),
            line_spacing: RELAXED_LINE_SPACING,
            alignment: Alignment::Natural,
        }
    }
}

impl FormattedDescription {
    /// Emphasized substrings in order.
    pub fn emphasized(&self) -> Vec<&str> {
        self.emphasis
            .iter()
            .filter_map(|range| range.slice(&self.text))
            .collect()
    }
}

/// Thresholds applied when formatting a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormatPolicy {
    /// A top guess strictly above this confidence is shown alone.
    pub top_guess_threshold: f32,
    /// Text longer than this many characters gets `tight_line_spacing`.
    pub long_text_chars: usize,
    /// Spacing hint for long text.
    pub tight_line_spacing: u8,
    /// Spacing hint for short text and empty batches.
    pub relaxed_line_spacing: u8,
}

impl Default for FormatPolicy {
    fn default() -> Self {
        Self {
            top_guess_threshold: TOP_GUESS_THRESHOLD,
            long_text_chars: LONG_TEXT_CHARS,
            tight_line_spacing: TIGHT_LINE_SPACING,
            relaxed_line_spacing: RELAXED_LINE_SPACING,
        }
    }
}

impl FormatPolicy {
    /// Policy with a custom top-guess threshold.
    pub fn with_threshold(top_guess_threshold: f32) -> Self {
        Self {
            top_guess_threshold,
            ..Self::default()
        }
    }

    /// Format a batch without any prior state.
    pub fn format(&self, batch: &ClassificationBatch) -> FormattedDescription {
        self.format_after(batch, &FormattedDescription::default())
    }

    /// Format a batch, falling back to `previous` when the batch is empty.
    ///
    /// A non-empty batch always produces a complete description; `previous`
    /// is not consulted.
    pub fn format_after(
        &self,
        batch: &ClassificationBatch,
        previous: &FormattedDescription,
    ) -> FormattedDescription {
        let Some(top) = batch.top() else {
            return FormattedDescription {
                text: previous.text.clone(),
                emphasis: previous.emphasis.clone(),
                line_spacing: self.relaxed_line_spacing,
                alignment: Alignment::Natural,
            };
        };

        let (text, emphasis) = if top.confidence > self.top_guess_threshold {
            top_guess_text(top)
        } else {
            guesses_text(batch)
        };

        // Spacing depends on the finished text.
        let line_spacing = if char_len(&text) > self.long_text_chars {
            self.tight_line_spacing
        } else {
            self.relaxed_line_spacing
        };

        FormattedDescription {
            text,
            emphasis,
            line_spacing,
            alignment: Alignment::Centered,
        }
    }
}

/// Format a batch with the default policy and no prior state.
pub fn format_description(batch: &ClassificationBatch) -> FormattedDescription {
    FormatPolicy::default().format(batch)
}

/// Format a batch with the default policy, reusing `previous` for an empty batch.
pub fn format_description_after(
    batch: &ClassificationBatch,
    previous: &FormattedDescription,
) -> FormattedDescription {
    FormatPolicy::default().format_after(batch, previous)
}

fn top_guess_text(top: &ClassificationResult) -> (String, Vec<EmphasisRange>) {
    let mut text = String::from(TOP_GUESS_PREFIX);
    let name = top.display_name();
    let range = EmphasisRange::new(char_len(&text), char_len(&name));
    text.push_str(&name);
    let _ = write!(text, " [confidence: {}%]", top.percent());
    (text, vec![range])
}

fn guesses_text(batch: &ClassificationBatch) -> (String, Vec<EmphasisRange>) {
    let mut text = String::from(GUESSES_PREFIX);
    let mut emphasis = Vec::with_capacity(batch.len());

    for guess in batch {
        let segment = format!(" {}", guess.display_name());
        emphasis.push(EmphasisRange::new(char_len(&text), char_len(&segment)));
        text.push_str(&segment);
        let _ = write!(text, " [confidence: {}%],", guess.percent());
    }

    if text.ends_with(',') {
        text.pop();
    }
    text.push('.');
    (text, emphasis)
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of the `chars`-th character, allowing one-past-the-end.
fn byte_offset(text: &str, chars: usize) -> Option<usize> {
    text.char_indices()
        .map(|(idx, _)| idx)
        .chain(std::iter::once(text.len()))
        .nth(chars)
}
