//! JPEG encoding of rendered viewports.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

use crate::decode::PixelBuffer;

/// Quality used for crops unless configured otherwise.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Errors that can occur while encoding a viewport.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode raw RGB pixels to JPEG bytes.
///
/// `quality` is clamped to 1-100.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    let bytes = buffer.into_inner();
    log::debug!("encoded {}x{} viewport to {} JPEG bytes", width, height, bytes.len());
    Ok(bytes)
}

/// Encode a rendered viewport to JPEG bytes.
pub fn encode_viewport_jpeg(viewport: &PixelBuffer, quality: u8) -> Result<Vec<u8>, EncodeError> {
    encode_jpeg(&viewport.pixels, viewport.width, viewport.height, quality)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: any correctly sized viewport encodes to a complete JPEG.
        #[test]
        fn prop_valid_viewport_encodes(
            (width, height) in (1u32..=40, 1u32..=40),
            quality in 0u8..=255,
            shade in any::<u8>(),
        ) {
            let viewport = PixelBuffer::new(width, height, vec![shade; (width * height * 3) as usize]);
            let bytes = encode_viewport_jpeg(&viewport, quality).unwrap();
            prop_assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
            prop_assert_eq!(&bytes[bytes.len() - 2..], &[0xFF, 0xD9]);
        }

        /// Property: encoding is deterministic.
        #[test]
        fn prop_deterministic(
            (width, height) in (1u32..=16, 1u32..=16),
            quality in 1u8..=100,
        ) {
            let pixels: Vec<u8> = (0..width * height * 3).map(|i| (i * 37 % 256) as u8).collect();
            prop_assert_eq!(
                encode_jpeg(&pixels, width, height, quality).unwrap(),
                encode_jpeg(&pixels, width, height, quality).unwrap()
            );
        }
    }
}
