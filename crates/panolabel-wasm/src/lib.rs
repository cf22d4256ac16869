//! Panolabel WASM - WebAssembly bindings for Panolabel
//!
//! Exposes the panolabel-core crop rendering and annotation operations to
//! JavaScript/TypeScript, in the browser or in a JS server.
//!
//! # Module Structure
//!
//! - `types` - wrapper types for pixel buffers and views
//! - `config` - projector settings
//! - `decode` - panorama decoding (JPEG/PNG)
//! - `render` - perspective crops
//! - `annotate` - box to RBFoV conversion and boundary tracing
//! - `encode` - JPEG encoding of crops
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_panorama, JsViewSpec, ProjectorConfig, render_view, annotate_box } from '@panolabel/wasm';
//!
//! await init();
//!
//! const panorama = decode_panorama(new Uint8Array(await file.arrayBuffer()));
//! const config = new ProjectorConfig();
//! const view = new JsViewSpec(0, 0, 90, 512, 512);
//! const crop = render_view(panorama, view, config);
//! const record = annotate_box(panorama.width, panorama.height, box, view, 512, 512, config);
//! ```

use wasm_bindgen::prelude::*;

mod annotate;
mod config;
mod decode;
mod encode;
mod render;
mod types;

pub use annotate::{annotate_box, box_from_top_left, sample_boundary};
pub use config::ProjectorConfig;
pub use decode::{decode_panorama, panorama_dimensions};
pub use encode::encode_viewport_jpeg;
pub use render::{render_view, render_view_jpeg, view_from_click};
pub use types::{JsPixelBuffer, JsViewSpec};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    log::debug!("panolabel-wasm {} loaded", env!("CARGO_PKG_VERSION"));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
