//! Conversion of 2D rotated boxes into sphere-native RBFoV annotations.
//!
//! A box drawn on a rendered viewport is only meaningful together with the
//! view it was drawn under. [`to_spherical`] folds the two into an [`RBFoV`],
//! which no longer depends on any particular render.
//!
//! # Algorithm
//!
//! ```text
//! f      = 0.5 * canvas_w / tan(0.5 * fov)
//! ray    = (x - canvas_w/2, -(y - canvas_h/2), f)
//! center = spherical(yaw(θc) · pitch(φc) · ray)
//! fov_w  = 2 * atan((w/2) / f)
//! fov_h  = 2 * atan((h/2) / f)
//! gamma  = angle
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;
use crate::sphere::camera_ray;
use crate::view::{Canvas, ViewSpec};

/// A rotated rectangle drawn on a perspective viewport, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotatedBox2D {
    /// Center X
    pub x: f64,
    /// Center Y
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees, positive = clockwise on screen
    #[serde(default)]
    pub angle: f64,
}

impl RotatedBox2D {
    pub fn new(x: f64, y: f64, width: f64, height: f64, angle: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            angle,
        }
    }

    /// Build a box from its top-left corner, as annotation tools report it.
    pub fn from_top_left(left: f64, top: f64, width: f64, height: f64, angle: f64) -> Self {
        Self::new(left + width / 2.0, top + height / 2.0, width, height, angle)
    }

    pub fn validate(&self) -> Result<(), ProjectionError> {
        let finite = [self.x, self.y, self.width, self.height, self.angle]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.width <= 0.0 || self.height <= 0.0 {
            return Err(ProjectionError::InvalidBox {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Rotated Bounding Field of View: an annotation expressed on the sphere.
///
/// Angles of the center and the in-plane rotation are radians; the angular
/// extents are degrees, matching what annotation tools display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RBFoV {
    pub center_theta: f64,
    pub center_phi: f64,
    /// Horizontal angular extent in degrees
    pub fov_w: f64,
    /// Vertical angular extent in degrees
    pub fov_h: f64,
    /// In-plane rotation about the center direction, radians
    pub gamma: f64,
}

impl RBFoV {
    pub fn validate(&self) -> Result<(), ProjectionError> {
        let fov_ok = |fov: f64| fov.is_finite() && fov > 0.0 && fov < 360.0;
        let finite = self.center_theta.is_finite()
            && self.center_phi.is_finite()
            && self.gamma.is_finite();
        if !fov_ok(self.fov_w) || !fov_ok(self.fov_h) || !finite {
            return Err(ProjectionError::InvalidRBFoV {
                fov_w: self.fov_w,
                fov_h: self.fov_h,
            });
        }
        Ok(())
    }
}

/// Convert a box drawn on `canvas` under `view` into an [`RBFoV`].
///
/// `canvas` is the size of the image the box coordinates refer to and may
/// differ from the view's render size.
///
/// # Errors
///
/// - `InvalidBox` if the box has a non-positive or non-finite extent
/// - `InvalidViewSpec` if the view or canvas is out of range
pub fn to_spherical(
    rbox: &RotatedBox2D,
    view: &ViewSpec,
    canvas: Canvas,
) -> Result<RBFoV, ProjectionError> {
    view.validate()?;
    canvas.validate()?;
    rbox.validate()?;

    let (canvas_w, canvas_h) = (canvas.width as f64, canvas.height as f64);
    let focal = view.focal_length(canvas_w);

    let ray = camera_ray(rbox.x, rbox.y, canvas_w, canvas_h, focal);
    let center = (view.rotation() * ray).to_spherical();

    Ok(RBFoV {
        center_theta: center.theta,
        center_phi: center.phi,
        fov_w: angular_extent(rbox.width, focal),
        fov_h: angular_extent(rbox.height, focal),
        gamma: rbox.angle.to_radians(),
    })
}

/// Angle in degrees subtended by a centered segment of `length` pixels.
#[inline]
fn angular_extent(length: f64, focal: f64) -> f64 {
    (2.0 * (length / 2.0 / focal).atan()).to_degrees()
}
