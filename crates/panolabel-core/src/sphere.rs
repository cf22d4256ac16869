//! Shared spherical geometry: rotations, camera rays and equirectangular mapping.
//!
//! Both the projector and the RBFoV converter go through the primitives in this
//! module, so the two can never disagree about conventions.
//!
//! # Coordinate System
//!
//! - Camera space: +X right, +Y up, +Z forward (the viewing direction)
//! - Longitude `theta` in `[-π, π)`, increasing to the right on the panorama
//! - Latitude `phi` in `[-π/2, π/2]`, `+π/2` at the top row of the panorama
//!
//! A view direction `(θc, φc)` is reached by pitching the forward axis up by
//! `φc` and then turning it right by `θc`:
//!
//! ```text
//! R = yaw(θc) · pitch(φc)
//! ```
//!
//! Rotations do not commute, so the order is part of the contract.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::ops::Mul;

use serde::{Deserialize, Serialize};

/// Directions closer than this (relative to their length) to the polar axis
/// have no defined longitude.
pub const POLE_EPSILON: f64 = 1e-12;

/// Wrap a longitude into `[-π, π)`. Values already in range are returned unchanged.
pub fn wrap_longitude(theta: f64) -> f64 {
    if (-PI..PI).contains(&theta) {
        return theta;
    }
    let wrapped = (theta + PI).rem_euclid(TAU) - PI;
    // rem_euclid can round up to exactly TAU
    if wrapped >= PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// A 3D direction vector. Not required to be normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Direction {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Direction {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length.
    #[inline]
    pub fn norm(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Convert to longitude/latitude.
    ///
    /// The latitude argument is clamped into the `asin` domain. A zero-length
    /// vector maps to `(0, 0)` instead of producing NaN.
    #[inline]
    pub fn to_spherical(self) -> Spherical {
        let norm = self.norm();
        if norm <= f64::MIN_POSITIVE {
            return Spherical::new(0.0, 0.0);
        }
        let phi = (self.y / norm).clamp(-1.0, 1.0).asin();
        let theta = self.x.atan2(self.z);
        Spherical::new(theta, phi)
    }

    /// Whether the direction is far enough from the poles to have a longitude.
    #[inline]
    pub fn has_longitude(self) -> bool {
        let norm = self.norm();
        norm > f64::MIN_POSITIVE && self.x.hypot(self.z) > POLE_EPSILON * norm
    }
}

/// Build the camera-space ray through a point on a canvas.
///
/// The canvas center maps to the optical axis; image Y is flipped so that
/// +Y points up in camera space.
#[inline]
pub fn camera_ray(x: f64, y: f64, canvas_width: f64, canvas_height: f64, focal: f64) -> Direction {
    Direction::new(x - canvas_width / 2.0, -(y - canvas_height / 2.0), focal)
}

/// A point on the unit sphere, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Spherical {
    /// Longitude in radians, `[-π, π]`
    pub theta: f64,
    /// Latitude in radians, `[-π/2, π/2]`
    pub phi: f64,
}

impl Spherical {
    pub fn new(theta: f64, phi: f64) -> Self {
        Self { theta, phi }
    }

    /// Recover longitude/latitude from an equirectangular pixel position.
    pub fn from_equirect(u: f64, v: f64, width: u32, height: u32) -> Self {
        let half_h = height as f64 / 2.0;
        let theta = (u / width as f64) * TAU - PI;
        let phi = (half_h - v) / half_h * FRAC_PI_2;
        Self::new(theta, phi)
    }

    /// Map to equirectangular pixel coordinates.
    ///
    /// Horizontal position wraps into `[0, width)`. Vertical position is
    /// returned as-is; callers that index pixels clamp it.
    #[inline]
    pub fn to_equirect(self, width: u32, height: u32) -> (f64, f64) {
        let (w, h) = (width as f64, height as f64);
        let mut u = ((self.theta + PI) / TAU * w).rem_euclid(w);
        // rem_euclid can round a tiny negative up to exactly `w`
        if u >= w {
            u -= w;
        }
        let v = (FRAC_PI_2 - self.phi) / PI * h;
        (u, v)
    }
}

/// A 3x3 rotation matrix, row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    m: [[f64; 3]; 3],
}

impl Rotation {
    /// Rotation about the X axis that tilts +Z toward +Y by `phi`.
    pub fn pitch(phi: f64) -> Self {
        let (s, c) = phi.sin_cos();
        Self {
            m: [[1.0, 0.0, 0.0], [0.0, c, s], [0.0, -s, c]],
        }
    }

    /// Rotation about the Y axis that turns +Z toward +X by `theta`.
    pub fn yaw(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self {
            m: [[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]],
        }
    }

    /// Rotation about the Z axis, clockwise on screen by `gamma`.
    pub fn roll(gamma: f64) -> Self {
        let (s, c) = gamma.sin_cos();
        Self {
            m: [[c, s, 0.0], [-s, c, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Camera-to-world rotation for a camera looking at `(theta, phi)`.
    ///
    /// Pitch is applied first, then yaw.
    pub fn look_at(theta: f64, phi: f64) -> Self {
        Self::yaw(theta) * Self::pitch(phi)
    }
}

impl Mul for Rotation {
    type Output = Rotation;

    fn mul(self, rhs: Rotation) -> Rotation {
        let mut m = [[0.0; 3]; 3];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.m[i][k] * rhs.m[k][j]).sum();
            }
        }
        Rotation { m }
    }
}

impl Mul<Direction> for Rotation {
    type Output = Direction;

    #[inline]
    fn mul(self, d: Direction) -> Direction {
        let m = &self.m;
        Direction::new(
            m[0][0] * d.x + m[0][1] * d.y + m[0][2] * d.z,
            m[1][0] * d.x + m[1][1] * d.y + m[1][2] * d.z,
            m[2][0] * d.x + m[2][1] * d.y + m[2][2] * d.z,
        )
    }
}
