//! Source images and their preparation for the classifier.

use crate::error::{Error, Result};
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader};
use std::path::Path;

/// An image as supplied by the caller, before orientation is applied.
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Decoded pixels as stored in the file.
    pub pixels: DynamicImage,
    /// Raw EXIF orientation value (1-8). `None` means upright.
    pub orientation: Option<u8>,
}

impl SourceImage {
    /// Wrap decoded pixels.
    pub fn new(pixels: DynamicImage, orientation: Option<u8>) -> Self {
        Self {
            pixels,
            orientation,
        }
    }

    /// Decode an image file together with its EXIF orientation.
    pub fn open(path: &Path) -> Result<Self> {
        let decode_err = |source: image::ImageError| Error::ImageDecode {
            path: path.to_path_buf(),
            source,
        };

        let mut decoder = ImageReader::open(path)?
            .with_guessed_format()?
            .into_decoder()
            .map_err(decode_err)?;

        let orientation = decoder.orientation().map_err(|e| Error::Orientation {
            reason: format!("{}: {e}", path.display()),
        })?;

        let pixels = DynamicImage::from_decoder(decoder).map_err(decode_err)?;

        Ok(Self {
            pixels,
            orientation: Some(orientation.to_exif()),
        })
    }

    /// Validate the image and apply its orientation.
    pub fn prepare(self) -> Result<PreparedImage> {
        let orientation = match self.orientation {
            None => Orientation::NoTransforms,
            Some(value) => Orientation::from_exif(value).ok_or_else(|| Error::Orientation {
                reason: format!("unsupported EXIF orientation value {value}"),
            })?,
        };

        if self.pixels.width() == 0 || self.pixels.height() == 0 {
            return Err(Error::Image {
                reason: format!(
                    "image has no pixel data ({}x{})",
                    self.pixels.width(),
                    self.pixels.height()
                ),
            });
        }

        let mut pixels = self.pixels;
        pixels.apply_orientation(orientation);
        Ok(PreparedImage { pixels })
    }
}

/// Upright, non-empty image ready for a model.
#[derive(Debug, Clone)]
pub struct PreparedImage {
    pixels: DynamicImage,
}

impl PreparedImage {
    /// Upright pixels.
    pub fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::new(width, height))
    }

    #[test]
    fn test_prepare_without_orientation() {
        let prepared = SourceImage::new(image(4, 2), None).prepare().unwrap();
        assert_eq!((prepared.width(), prepared.height()), (4, 2));
    }

    #[test]
    fn test_prepare_applies_rotation() {
        // 6 = rotate 90 degrees clockwise
        let prepared = SourceImage::new(image(4, 2), Some(6)).prepare().unwrap();
        assert_eq!((prepared.width(), prepared.height()), (2, 4));
    }

    #[test]
    fn test_prepare_rejects_unknown_orientation() {
        let result = SourceImage::new(image(4, 2), Some(9)).prepare();
        assert!(matches!(result, Err(Error::Orientation { .. })));

        let result = SourceImage::new(image(4, 2), Some(0)).prepare();
        assert!(matches!(result, Err(Error::Orientation { .. })));
    }

    #[test]
    fn test_prepare_rejects_empty_image() {
        let result = SourceImage::new(image(0, 0), Some(1)).prepare();
        assert!(matches!(result, Err(Error::Image { .. })));
    }

    #[test]
    fn test_open_png_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bird.png");
        image(3, 5).save(&path).unwrap();

        let source = SourceImage::open(&path).unwrap();
        assert_eq!(source.orientation, Some(1));
        assert_eq!((source.pixels.width(), source.pixels.height()), (3, 5));
    }

    #[test]
    fn test_open_garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bird.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let result = SourceImage::open(&path);
        assert!(matches!(result, Err(Error::ImageDecode { .. })));
    }
}
