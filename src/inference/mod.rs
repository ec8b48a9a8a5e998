//! Inference module for bird species identification.

mod adapter;
pub mod labels;
mod onnx;
mod source;

pub use adapter::{
    ClassificationOutcome, ClassifierAdapter, PendingClassification, RequestId, SpeciesModel,
};
pub use onnx::OnnxSpeciesModel;
pub use source::{PreparedImage, SourceImage};
