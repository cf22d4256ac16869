//! Panorama decoding.
//!
//! The projection core never touches the filesystem. Whatever stores the
//! panoramas hands over encoded bytes, and this module turns them into an
//! RGB [`PixelBuffer`]:
//! - JPEG and PNG, with EXIF orientation applied
//! - Header-only dimension probing for ingestion
//!
//! # Examples
//!
//! ```ignore
//! use panolabel_core::decode::decode_panorama;
//!
//! let bytes = std::fs::read("pano.jpg").unwrap();
//! let panorama = decode_panorama(&bytes).unwrap();
//! println!("Decoded {}x{} panorama", panorama.width, panorama.height);
//! ```

mod panorama;
mod types;

pub use panorama::{decode_panorama, read_dimensions, read_orientation};
pub use types::{DecodeError, Orientation, PixelBuffer};
