//! Virtual camera parameters for perspective viewports.

use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;
use crate::sphere::{wrap_longitude, Rotation, Spherical};

/// A requested virtual pinhole camera looking into the panorama.
///
/// Only the horizontal field of view is specified; the vertical extent
/// follows from `out_height` and the focal length (square pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewSpec {
    /// Center longitude in radians
    pub theta: f64,
    /// Center latitude in radians (positive = up)
    pub phi: f64,
    /// Horizontal field of view in degrees, exclusive range (0, 180)
    pub fov: f64,
    /// Output width in pixels
    pub out_width: u32,
    /// Output height in pixels
    pub out_height: u32,
}

impl ViewSpec {
    /// Create a validated view. `theta` is wrapped into `[-π, π)`.
    pub fn new(
        theta: f64,
        phi: f64,
        fov: f64,
        out_width: u32,
        out_height: u32,
    ) -> Result<Self, ProjectionError> {
        let view = Self {
            theta: wrap_longitude(theta),
            phi,
            fov,
            out_width,
            out_height,
        };
        view.validate()?;
        Ok(view)
    }

    /// Create a view centered on a clicked panorama pixel.
    ///
    /// Panorama dimensions must be known; zero dimensions are reported as an
    /// unavailable source rather than guessed.
    pub fn centered_on_pixel(
        u: f64,
        v: f64,
        panorama_width: u32,
        panorama_height: u32,
        fov: f64,
        out_width: u32,
        out_height: u32,
    ) -> Result<Self, ProjectionError> {
        if panorama_width == 0 || panorama_height == 0 {
            return Err(ProjectionError::SourceUnavailable(format!(
                "panorama dimensions unknown ({}x{})",
                panorama_width, panorama_height
            )));
        }
        if !u.is_finite() || !v.is_finite() {
            return Err(ProjectionError::InvalidViewSpec(format!(
                "clicked position ({}, {}) is not finite",
                u, v
            )));
        }
        let u = u.rem_euclid(panorama_width as f64);
        let v = v.clamp(0.0, panorama_height as f64);
        let center = Spherical::from_equirect(u, v, panorama_width, panorama_height);
        Self::new(center.theta, center.phi, fov, out_width, out_height)
    }

    /// Check ranges. Called by every operation that consumes a view.
    pub fn validate(&self) -> Result<(), ProjectionError> {
        if !self.fov.is_finite() || self.fov <= 0.0 || self.fov >= 180.0 {
            return Err(ProjectionError::InvalidViewSpec(format!(
                "fov ({}) must be within (0, 180) degrees",
                self.fov
            )));
        }
        if self.out_width == 0 || self.out_height == 0 {
            return Err(ProjectionError::InvalidViewSpec(format!(
                "output size ({}x{}) must be non-zero",
                self.out_width, self.out_height
            )));
        }
        if !self.theta.is_finite() || !self.phi.is_finite() {
            return Err(ProjectionError::InvalidViewSpec(format!(
                "view center ({}, {}) is not finite",
                self.theta, self.phi
            )));
        }
        if !(-PI..=PI).contains(&self.theta) {
            return Err(ProjectionError::InvalidViewSpec(format!(
                "longitude ({}) must be within [-π, π]",
                self.theta
            )));
        }
        if self.phi.abs() > FRAC_PI_2 {
            return Err(ProjectionError::InvalidViewSpec(format!(
                "latitude ({}) must be within [-π/2, π/2]",
                self.phi
            )));
        }
        Ok(())
    }

    /// Pinhole focal length in pixels for a canvas of the given width.
    ///
    /// ```text
    /// f = 0.5 * width / tan(0.5 * fov)
    /// ```
    #[inline]
    pub fn focal_length(&self, canvas_width: f64) -> f64 {
        0.5 * canvas_width / (0.5 * self.fov.to_radians()).tan()
    }

    /// Camera-to-world rotation for this view.
    #[inline]
    pub fn rotation(&self) -> Rotation {
        Rotation::look_at(self.theta, self.phi)
    }

    /// The canvas matching this view's rendered output.
    pub fn output_canvas(&self) -> Canvas {
        Canvas::new(self.out_width, self.out_height)
    }
}

/// Pixel size of the canvas a 2D box was drawn on.
///
/// This is usually the rendered viewport size but is passed explicitly,
/// since a client may display the viewport scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub(crate) fn validate(&self) -> Result<(), ProjectionError> {
        if self.width == 0 || self.height == 0 {
            return Err(ProjectionError::InvalidViewSpec(format!(
                "canvas size ({}x{}) must be non-zero",
                self.width, self.height
            )));
        }
        Ok(())
    }
}
