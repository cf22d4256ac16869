//! Pixel buffer and decoding error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for panorama decoding and buffer validation.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The image has no pixels.
    #[error("Empty image: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    /// The pixel buffer does not match the declared dimensions.
    #[error("Pixel buffer size mismatch: expected {expected} bytes (width * height * 3), got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    /// Flip horizontal + rotate 270 CW.
    Transpose = 5,
    Rotate90CW = 6,
    /// Flip horizontal + rotate 90 CW.
    Transverse = 7,
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// An RGB image held in memory.
///
/// Used both for the equirectangular panorama handed to the projector and
/// for the perspective viewport it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer from dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a buffer from an `image::RgbImage`.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Check that the buffer is non-empty and matches its dimensions.
    pub fn check(&self) -> Result<(), DecodeError> {
        if self.width == 0 || self.height == 0 {
            return Err(DecodeError::EmptyImage {
                width: self.width,
                height: self.height,
            });
        }
        let expected = (self.width as usize) * (self.height as usize) * 3;
        if self.pixels.len() != expected {
            return Err(DecodeError::BufferSizeMismatch {
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }

    /// RGB value at an in-bounds pixel, as floats.
    #[inline]
    pub(crate) fn rgb_f64(&self, x: usize, y: usize) -> [f64; 3] {
        let idx = (y * self.width as usize + x) * 3;
        [
            self.pixels[idx] as f64,
            self.pixels[idx + 1] as f64,
            self.pixels[idx + 2] as f64,
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(99), Orientation::Normal);
    }

    #[test]
    fn test_pixel_buffer_check_ok() {
        let buf = PixelBuffer::new(4, 2, vec![0u8; 4 * 2 * 3]);
        assert!(buf.check().is_ok());
        assert!(!buf.is_empty());
    }

    #[test]
    fn test_pixel_buffer_check_empty() {
        let buf = PixelBuffer {
            width: 0,
            height: 10,
            pixels: vec![],
        };
        assert!(matches!(
            buf.check(),
            Err(DecodeError::EmptyImage { width: 0, height: 10 })
        ));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_pixel_buffer_check_mismatch() {
        let buf = PixelBuffer {
            width: 4,
            height: 4,
            pixels: vec![0u8; 10],
        };
        assert!(matches!(
            buf.check(),
            Err(DecodeError::BufferSizeMismatch {
                expected: 48,
                actual: 10
            })
        ));
    }

    #[test]
    fn test_from_rgb_image() {
        let img = image::RgbImage::from_raw(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let buf = PixelBuffer::from_rgb_image(img);
        assert_eq!((buf.width, buf.height), (2, 1));
        assert_eq!(buf.pixels, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_rgb_f64() {
        let buf = PixelBuffer::new(2, 1, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(buf.rgb_f64(1, 0), [4.0, 5.0, 6.0]);
    }
}
