//! Species classification results and their human-readable descriptions.

mod batch;
mod description;

pub use batch::{ClassificationBatch, ClassificationResult};
pub use description::{
    Alignment, EmphasisRange, FormatPolicy, FormattedDescription, format_description,
    format_description_after,
};
