//! Panorama decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_panorama, panorama_dimensions } from '@panolabel/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const [width, height] = panorama_dimensions(bytes);
//! const panorama = decode_panorama(bytes);
//! ```

use crate::types::JsPixelBuffer;
use panolabel_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a JPEG or PNG panorama from bytes, applying EXIF orientation.
///
/// # Errors
///
/// Returns an error if the bytes are not a supported image or are truncated.
#[wasm_bindgen]
pub fn decode_panorama(bytes: &[u8]) -> Result<JsPixelBuffer, JsValue> {
    decode::decode_panorama(bytes)
        .map(JsPixelBuffer::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Read `[width, height]` from the image header without decoding pixels.
///
/// Used once per image at ingestion, so annotation requests can pass the
/// stored dimensions instead of decoding the panorama again.
#[wasm_bindgen]
pub fn panorama_dimensions(bytes: &[u8]) -> Result<Vec<u32>, JsValue> {
    decode::read_dimensions(bytes)
        .map(|(width, height)| vec![width, height])
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
