//! Classification result types.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A single species guess produced by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Underscore-delimited species label (e.g. `White_Pelican`).
    pub label: String,
    /// Classifier confidence (0.0 - 1.0).
    pub confidence: f32,
}

impl ClassificationResult {
    /// Create a new result.
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }

    /// Species name as shown to users, with every `_` replaced by a space.
    pub fn display_name(&self) -> String {
        self.label.replace('_', " ")
    }

    /// Confidence as a whole percentage, truncated toward zero.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent(&self) -> u32 {
        (self.confidence * 100.0) as u32
    }
}

/// Ordered guesses from one classification request, highest confidence first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassificationBatch {
    results: Vec<ClassificationResult>,
}

impl ClassificationBatch {
    /// Wrap results that are already ordered by descending confidence.
    pub fn new(results: Vec<ClassificationResult>) -> Self {
        Self { results }
    }

    /// Sort results by descending confidence and keep at most `limit` of them.
    ///
    /// Ties keep their original relative order.
    pub fn ranked(mut results: Vec<ClassificationResult>, limit: usize) -> Self {
        results.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });
        results.truncate(limit);
        Self { results }
    }

    /// Highest-confidence guess, if any.
    pub fn top(&self) -> Option<&ClassificationResult> {
        self.results.first()
    }

    /// Number of guesses.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the batch holds no guesses.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Iterate over guesses in rank order.
    pub fn iter(&self) -> std::slice::Iter<'_, ClassificationResult> {
        self.results.iter()
    }

    /// Guesses as a slice.
    pub fn as_slice(&self) -> &[ClassificationResult] {
        &self.results
    }
}

impl<'a> IntoIterator for &'a ClassificationBatch {
    type Item = &'a ClassificationResult;
    type IntoIter = std::slice::Iter<'a, ClassificationResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

impl From<Vec<ClassificationResult>> for ClassificationBatch {
    fn from(results: Vec<ClassificationResult>) -> Self {
        Self::new(results)
    }
}
