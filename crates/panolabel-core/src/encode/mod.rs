//! Viewport encoding for returning crops to a client.
//!
//! Rendered viewports are plain RGB [`PixelBuffer`](crate::decode::PixelBuffer)s;
//! this module turns them into JPEG bytes at a configurable quality.
//!
//! # Examples
//!
//! ```ignore
//! use panolabel_core::encode::encode_viewport_jpeg;
//!
//! let viewport = render(&panorama, &view, InterpolationFilter::Bilinear)?;
//! let jpeg_bytes = encode_viewport_jpeg(&viewport, 90)?;
//! ```

mod jpeg;

pub use jpeg::{encode_jpeg, encode_viewport_jpeg, EncodeError, DEFAULT_JPEG_QUALITY};
