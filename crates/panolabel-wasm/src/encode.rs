//! Crop encoding WASM bindings.
//!
//! ```typescript
//! const crop = render_view(panorama, view, config);
//! const jpeg = encode_viewport_jpeg(crop, 90);
//! ```

use crate::types::JsPixelBuffer;
use panolabel_core::encode;
use wasm_bindgen::prelude::*;

/// Encode a rendered crop to JPEG bytes.
///
/// `quality` is clamped to 1-100; 90 is the service default.
#[wasm_bindgen]
pub fn encode_viewport_jpeg(image: &JsPixelBuffer, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_viewport_jpeg(image.as_buffer(), quality).map_err(|e| JsValue::from_str(&e.to_string()))
}
