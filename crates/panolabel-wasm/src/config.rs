//! Projector settings for JavaScript.

use panolabel_core::{InterpolationFilter, SamplingDensity};
use wasm_bindgen::prelude::*;

use crate::types::filter_from_u8;

/// Projector configuration wrapper for JavaScript.
#[wasm_bindgen]
pub struct ProjectorConfig {
    inner: panolabel_core::ProjectorConfig,
}

#[wasm_bindgen]
impl ProjectorConfig {
    /// Create a configuration with default values.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: panolabel_core::ProjectorConfig::new(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn default_fov(&self) -> f64 {
        self.inner.default_fov
    }

    #[wasm_bindgen(setter)]
    pub fn set_default_fov(&mut self, value: f64) {
        self.inner.default_fov = value;
    }

    #[wasm_bindgen(getter)]
    pub fn out_width(&self) -> u32 {
        self.inner.out_width
    }

    #[wasm_bindgen(setter)]
    pub fn set_out_width(&mut self, value: u32) {
        self.inner.out_width = value;
    }

    #[wasm_bindgen(getter)]
    pub fn out_height(&self) -> u32 {
        self.inner.out_height
    }

    #[wasm_bindgen(setter)]
    pub fn set_out_height(&mut self, value: u32) {
        self.inner.out_height = value;
    }

    /// Interpolation filter: 0 = Bilinear, 1 = Lanczos3.
    #[wasm_bindgen(getter)]
    pub fn filter(&self) -> u8 {
        match self.inner.filter {
            InterpolationFilter::Bilinear => 0,
            InterpolationFilter::Lanczos3 => 1,
        }
    }

    #[wasm_bindgen(setter)]
    pub fn set_filter(&mut self, value: u8) {
        self.inner.filter = filter_from_u8(value);
    }

    #[wasm_bindgen(getter)]
    pub fn jpeg_quality(&self) -> u8 {
        self.inner.jpeg_quality
    }

    #[wasm_bindgen(setter)]
    pub fn set_jpeg_quality(&mut self, value: u8) {
        self.inner.jpeg_quality = value;
    }

    /// Samples per boundary edge, or 0 for adaptive sampling.
    #[wasm_bindgen(getter)]
    pub fn boundary_samples(&self) -> u32 {
        match self.inner.boundary_density {
            SamplingDensity::Fixed(n) => n,
            SamplingDensity::Adaptive => 0,
        }
    }

    #[wasm_bindgen(setter)]
    pub fn set_boundary_samples(&mut self, value: u32) {
        self.inner.boundary_density = if value == 0 {
            SamplingDensity::Adaptive
        } else {
            SamplingDensity::Fixed(value)
        };
    }

    pub fn is_default(&self) -> bool {
        self.inner.is_default()
    }

    /// Serialize to a plain object for storage
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from a plain object; missing fields take their defaults
    pub fn from_json(value: JsValue) -> Result<ProjectorConfig, JsValue> {
        let inner: panolabel_core::ProjectorConfig =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectorConfig {
    pub(crate) fn inner(&self) -> &panolabel_core::ProjectorConfig {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProjectorConfig::new();
        assert!(config.is_default());
        assert_eq!(config.default_fov(), 90.0);
        assert_eq!(config.jpeg_quality(), 90);
    }

    #[test]
    fn test_setters() {
        let mut config = ProjectorConfig::new();

        config.set_default_fov(60.0);
        assert_eq!(config.default_fov(), 60.0);

        config.set_out_width(800);
        config.set_out_height(600);
        assert_eq!((config.out_width(), config.out_height()), (800, 600));

        config.set_filter(1);
        assert_eq!(config.inner().filter, InterpolationFilter::Lanczos3);
        assert_eq!(config.filter(), 1);

        config.set_jpeg_quality(75);
        assert_eq!(config.jpeg_quality(), 75);

        assert!(!config.is_default());
    }

    #[test]
    fn test_boundary_samples() {
        let mut config = ProjectorConfig::new();
        config.set_boundary_samples(32);
        assert_eq!(config.inner().boundary_density, SamplingDensity::Fixed(32));
        assert_eq!(config.boundary_samples(), 32);
        config.set_boundary_samples(0);
        assert_eq!(config.inner().boundary_density, SamplingDensity::Adaptive);
    }
}
