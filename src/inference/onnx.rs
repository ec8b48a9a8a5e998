//! ONNX Runtime image classifier.

use crate::config::ModelConfig;
use crate::error::{Error, Result};
use crate::inference::labels::read_labels;
use crate::inference::{PreparedImage, SpeciesModel};
use crate::species::ClassificationResult;
use image::DynamicImage;
use image::imageops::FilterType;
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::Tensor;
use std::sync::Mutex;
use tracing::{debug, info};

/// Image classifier backed by an ONNX model and a labels file.
pub struct OnnxSpeciesModel {
    session: Mutex<Session>,
    labels: Vec<String>,
    preprocess: Preprocess,
    softmax: bool,
}

impl OnnxSpeciesModel {
    /// Load the model and labels described by `config`.
    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        if !config.path.exists() {
            return Err(Error::ModelFileNotFound {
                path: config.path.clone(),
            });
        }
        if !config.labels.exists() {
            return Err(Error::LabelsFileNotFound {
                path: config.labels.clone(),
            });
        }

        let labels = read_labels(&config.labels)?;
        if labels.is_empty() {
            return Err(Error::ConfigValidation {
                message: format!("labels file contains no labels: {}", config.labels.display()),
            });
        }

        let model_bytes = std::fs::read(&config.path)?;
        let session = Session::builder()
            .map_err(build_error)?
            .with_optimization_level(GraphOptimizationLevel::Level1)
            .map_err(build_error)?
            .commit_from_memory(&model_bytes)
            .map_err(build_error)?;

        info!(
            "Loaded model: {} ({} labels, input {}x{})",
            config.path.display(),
            labels.len(),
            config.input_size,
            config.input_size
        );

        Ok(Self {
            session: Mutex::new(session),
            labels,
            preprocess: Preprocess {
                input_size: config.input_size,
                mean: config.mean,
                std: config.std,
            },
            softmax: config.softmax,
        })
    }

    /// Class labels in model output order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl SpeciesModel for OnnxSpeciesModel {
    fn predict(&self, image: &PreparedImage) -> Result<Vec<ClassificationResult>> {
        let size = self.preprocess.input_size as usize;
        let data = self.preprocess.tensor_data(image.pixels());
        let input = Tensor::from_array(([1_usize, 3, size, size], data)).map_err(|e| {
            Error::Inference {
                reason: format!("could not build input tensor: {e}"),
            }
        })?;

        let mut scores = {
            let mut session = self.session.lock().map_err(|_| Error::Internal {
                message: "ONNX session lock poisoned".to_string(),
            })?;
            let outputs = session
                .run(ort::inputs![input])
                .map_err(|e| Error::Inference {
                    reason: e.to_string(),
                })?;
            let Some((_, output)) = outputs.iter().next() else {
                return Err(Error::ModelOutput {
                    reason: "model produced no outputs".to_string(),
                });
            };
            let (_, values) = output
                .try_extract_tensor::<f32>()
                .map_err(|e| Error::ModelOutput {
                    reason: e.to_string(),
                })?;
            values.to_vec()
        };

        if scores.len() != self.labels.len() {
            return Err(Error::ModelOutput {
                reason: format!(
                    "model produced {} scores for {} labels",
                    scores.len(),
                    self.labels.len()
                ),
            });
        }

        if self.softmax {
            softmax_in_place(&mut scores);
        }
        debug!("Model produced {} scores", scores.len());

        Ok(self
            .labels
            .iter()
            .zip(scores)
            .map(|(label, confidence)| ClassificationResult::new(label.clone(), confidence))
            .collect())
    }
}

fn build_error(e: impl std::fmt::Display) -> Error {
    Error::ClassifierBuild {
        reason: e.to_string(),
    }
}

/// Center-crop, resize and normalize settings.
#[derive(Debug, Clone, Copy)]
struct Preprocess {
    input_size: u32,
    mean: [f32; 3],
    std: [f32; 3],
}

impl Preprocess {
    /// NCHW pixel data for a single image.
    fn tensor_data(&self, image: &DynamicImage) -> Vec<f32> {
        let size = self.input_size;
        let rgb = center_crop(image)
            .resize_exact(size, size, FilterType::Triangle)
            .to_rgb8();

        let plane = (size as usize) * (size as usize);
        let mut data = vec![0.0_f32; 3 * plane];
        for (x, y, pixel) in rgb.enumerate_pixels() {
            let offset = (y as usize) * (size as usize) + x as usize;
            for channel in 0..3 {
                data[channel * plane + offset] =
                    normalize_channel(pixel[channel], self.mean[channel], self.std[channel]);
            }
        }
        data
    }
}

/// Largest centered square of the image.
fn center_crop(image: &DynamicImage) -> DynamicImage {
    let side = image.width().min(image.height());
    let x = (image.width() - side) / 2;
    let y = (image.height() - side) / 2;
    image.crop_imm(x, y, side, side)
}

fn normalize_channel(value: u8, mean: f32, std: f32) -> f32 {
    let v = f32::from(value) / 255.0;
    (v - mean) / std
}

fn softmax_in_place(scores: &mut [f32]) {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    for score in scores.iter_mut() {
        *score = (*score - max).exp();
    }
    let sum: f32 = scores.iter().sum();
    if sum > 0.0 {
        for score in scores.iter_mut() {
            *score /= sum;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::path::PathBuf;

    #[test]
    fn test_center_crop_landscape() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(10, 4));
        let cropped = center_crop(&image);
        assert_eq!((cropped.width(), cropped.height()), (4, 4));
    }

    #[test]
    fn test_center_crop_keeps_middle() {
        let mut rgb = RgbImage::new(3, 1);
        rgb.put_pixel(1, 0, Rgb([255, 0, 0]));
        let cropped = center_crop(&DynamicImage::ImageRgb8(rgb));
        assert_eq!(cropped.to_rgb8().get_pixel(0, 0), &Rgb([255, 0, 0]));
    }

    #[test]
    fn test_tensor_data_layout() {
        let preprocess = Preprocess {
            input_size: 2,
            mean: [0.0; 3],
            std: [1.0; 3],
        };
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([255, 0, 51])));

        let data = preprocess.tensor_data(&image);

        assert_eq!(data.len(), 12);
        assert!(data[..4].iter().all(|&v| v == 1.0));
        assert!(data[4..8].iter().all(|&v| v == 0.0));
        assert!(data[8..].iter().all(|&v| (v - 0.2).abs() < 1e-6));
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let mut scores = vec![1.0, 2.0, 3.0];
        softmax_in_place(&mut scores);
        let sum: f32 = scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert!(scores[2] > scores[1] && scores[1] > scores[0]);
    }

    #[test]
    fn test_missing_model_file() {
        let config = ModelConfig {
            path: PathBuf::from("/nonexistent/model.onnx"),
            labels: PathBuf::from("/nonexistent/labels.txt"),
            ..ModelConfig::default()
        };
        let result = OnnxSpeciesModel::from_config(&config);
        assert!(matches!(result, Err(Error::ModelFileNotFound { .. })));
    }

    #[test]
    fn test_empty_labels_file() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("model.onnx");
        let labels = dir.path().join("labels.txt");
        std::fs::write(&model, b"").unwrap();
        std::fs::write(&labels, b"\n\n").unwrap();

        let config = ModelConfig {
            path: model,
            labels,
            ..ModelConfig::default()
        };
        let result = OnnxSpeciesModel::from_config(&config);
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
    }
}
