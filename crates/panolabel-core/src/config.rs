//! Projector settings shared by the render and annotate operations.

use serde::{Deserialize, Serialize};

use crate::boundary::SamplingDensity;
use crate::encode::DEFAULT_JPEG_QUALITY;
use crate::projector::InterpolationFilter;

/// Tunable settings for rendering crops and tracing boundaries.
///
/// Missing fields take their defaults, so a client may send a partial object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorConfig {
    /// Field of view in degrees used when a request does not specify one.
    pub default_fov: f64,
    /// Output width in pixels used when a request does not specify one.
    pub out_width: u32,
    /// Output height in pixels used when a request does not specify one.
    pub out_height: u32,
    pub filter: InterpolationFilter,
    /// JPEG quality (1-100) for encoded crops.
    pub jpeg_quality: u8,
    pub boundary_density: SamplingDensity,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            default_fov: 90.0,
            out_width: 512,
            out_height: 512,
            filter: InterpolationFilter::Bilinear,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            boundary_density: SamplingDensity::Adaptive,
        }
    }
}

impl ProjectorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if every setting is at its default.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
