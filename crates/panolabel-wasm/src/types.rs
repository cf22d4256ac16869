//! WASM-compatible wrapper types for panoramas, crops and views.
//!
//! These wrap the core types and handle the conversion between Rust and
//! JavaScript data representations.

use panolabel_core::{InterpolationFilter, PixelBuffer, ViewSpec};
use wasm_bindgen::prelude::*;

/// An RGB image for JavaScript: a decoded panorama or a rendered crop.
///
/// # Memory Management
///
/// The pixel data lives in WASM memory. `pixels()` copies it into a
/// `Uint8Array`; keep panoramas in WASM memory and render from them
/// repeatedly rather than round-tripping pixels through JavaScript.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    inner: PixelBuffer,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create an image from dimensions and RGB pixel data (3 bytes per pixel, row-major).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsPixelBuffer {
        JsPixelBuffer {
            inner: PixelBuffer {
                width,
                height,
                pixels,
            },
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3).
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.len()
    }

    /// Returns RGB pixel data as a Uint8Array copy.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Explicitly free WASM memory. Optional; the finalizer also does this.
    pub fn free(self) {}
}

impl JsPixelBuffer {
    pub(crate) fn from_buffer(inner: PixelBuffer) -> Self {
        Self { inner }
    }

    /// Borrow the core buffer without copying pixels.
    pub(crate) fn as_buffer(&self) -> &PixelBuffer {
        &self.inner
    }
}

/// A virtual camera for JavaScript.
///
/// Construction validates the parameters, so a `JsViewSpec` held by the
/// caller is always renderable.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct JsViewSpec {
    inner: ViewSpec,
}

#[wasm_bindgen]
impl JsViewSpec {
    /// Create a view from its center (radians), horizontal FOV (degrees) and output size.
    #[wasm_bindgen(constructor)]
    pub fn new(
        theta: f64,
        phi: f64,
        fov: f64,
        out_width: u32,
        out_height: u32,
    ) -> Result<JsViewSpec, JsValue> {
        ViewSpec::new(theta, phi, fov, out_width, out_height)
            .map(Self::from_view)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn theta(&self) -> f64 {
        self.inner.theta
    }

    #[wasm_bindgen(getter)]
    pub fn phi(&self) -> f64 {
        self.inner.phi
    }

    #[wasm_bindgen(getter)]
    pub fn fov(&self) -> f64 {
        self.inner.fov
    }

    #[wasm_bindgen(getter)]
    pub fn out_width(&self) -> u32 {
        self.inner.out_width
    }

    #[wasm_bindgen(getter)]
    pub fn out_height(&self) -> u32 {
        self.inner.out_height
    }
}

impl JsViewSpec {
    pub(crate) fn from_view(inner: ViewSpec) -> Self {
        Self { inner }
    }

    pub(crate) fn view(&self) -> &ViewSpec {
        &self.inner
    }
}

/// Convert a u8 filter value to the core filter.
///
/// Values:
/// - 0 = Bilinear (fast, for interactive crops)
/// - 1 = Lanczos3 (sharper, for export)
///
/// Any other value defaults to Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> InterpolationFilter {
    match value {
        1 => InterpolationFilter::Lanczos3,
        _ => InterpolationFilter::Bilinear,
    }
}
