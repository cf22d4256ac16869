//! Crop rendering WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_panorama, view_from_click, render_view } from '@panolabel/wasm';
//!
//! const panorama = decode_panorama(bytes);
//! const view = view_from_click(clickX, clickY, panorama.width, panorama.height, config);
//! const crop = render_view(panorama, view, config);
//! ```

use crate::config::ProjectorConfig;
use crate::types::{JsPixelBuffer, JsViewSpec};
use panolabel_core::{pipeline, ViewSpec};
use wasm_bindgen::prelude::*;

/// Render the perspective crop of `panorama` seen through `view`.
#[wasm_bindgen]
pub fn render_view(
    panorama: &JsPixelBuffer,
    view: &JsViewSpec,
    config: &ProjectorConfig,
) -> Result<JsPixelBuffer, JsValue> {
    pipeline::render_view(panorama.as_buffer(), view.view(), config.inner())
        .map(JsPixelBuffer::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render the crop and encode it as JPEG at the configured quality.
#[wasm_bindgen]
pub fn render_view_jpeg(
    panorama: &JsPixelBuffer,
    view: &JsViewSpec,
    config: &ProjectorConfig,
) -> Result<Vec<u8>, JsValue> {
    pipeline::render_view_jpeg(panorama.as_buffer(), view.view(), config.inner())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Build a view centered on a clicked panorama pixel, using the configured
/// FOV and output size.
#[wasm_bindgen]
pub fn view_from_click(
    u: f64,
    v: f64,
    panorama_width: u32,
    panorama_height: u32,
    config: &ProjectorConfig,
) -> Result<JsViewSpec, JsValue> {
    click_view(u, v, panorama_width, panorama_height, config.inner())
        .map(JsViewSpec::from_view)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn click_view(
    u: f64,
    v: f64,
    panorama_width: u32,
    panorama_height: u32,
    config: &panolabel_core::ProjectorConfig,
) -> Result<ViewSpec, panolabel_core::ProjectionError> {
    ViewSpec::centered_on_pixel(
        u,
        v,
        panorama_width,
        panorama_height,
        config.default_fov,
        config.out_width,
        config.out_height,
    )
}
