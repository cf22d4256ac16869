//! Outline of an RBFoV region traced onto the equirectangular panorama.
//!
//! The region is a rectangle on the tangent plane at the annotation center,
//! with half-extents `tan(fov_w/2)` and `tan(fov_h/2)` at unit distance,
//! rolled in-plane by `gamma`. Straight edges on that plane become curves on
//! the panorama, so each edge is sampled densely (evenly in angle, not in
//! tangent-plane distance) and every sample is mapped through the same
//! rotation the projector uses.
//!
//! # Traversal Order
//!
//! Points run clockwise on screen starting at the top-left corner: top edge
//! left to right, right edge top to bottom, bottom edge right to left, left
//! edge bottom to top. Each edge includes its starting corner and excludes
//! its ending corner, so the polygon closes implicitly.
//!
//! # Seam
//!
//! Points are reported in true panorama columns. A region straddling the
//! `θ = ±π` seam yields points near both `0` and `W`; splitting the polygon
//! for drawing is left to the renderer (see [`BoundaryPolygon::crosses_seam`]).

use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;
use crate::rbfov::RBFoV;
use crate::sphere::{Direction, Rotation};

const MIN_ADAPTIVE_SAMPLES: usize = 8;
const MAX_EDGE_SAMPLES: usize = 2048;

/// How many points to sample along each edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingDensity {
    /// The same count on every edge (rounded up to an even number).
    Fixed(u32),
    /// Roughly one sample per panorama pixel of angular span.
    #[default]
    Adaptive,
}

impl SamplingDensity {
    /// Sample count for an edge spanning `extent_deg` degrees.
    ///
    /// Always even, so the midpoint of every edge is sampled exactly.
    pub fn samples_per_edge(self, extent_deg: f64, pixels_per_degree: f64) -> usize {
        let n = match self {
            SamplingDensity::Fixed(n) => (n as usize).clamp(2, MAX_EDGE_SAMPLES),
            SamplingDensity::Adaptive => {
                let wanted = (extent_deg * pixels_per_degree).ceil();
                if wanted.is_finite() {
                    (wanted as usize).clamp(MIN_ADAPTIVE_SAMPLES, MAX_EDGE_SAMPLES)
                } else {
                    MIN_ADAPTIVE_SAMPLES
                }
            }
        };
        n + n % 2
    }
}

/// A point on the panorama, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryPoint {
    pub x: f64,
    pub y: f64,
}

/// Ordered outline of an annotation on the panorama.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoundaryPolygon {
    pub points: Vec<BoundaryPoint>,
}

impl BoundaryPolygon {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BoundaryPoint> {
        self.points.iter()
    }

    /// Whether consecutive points (including the closing pair) jump across
    /// the horizontal seam of a panorama `width` pixels wide.
    pub fn crosses_seam(&self, width: u32) -> bool {
        let half = width as f64 / 2.0;
        let n = self.points.len();
        (0..n).any(|i| {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            (a.x - b.x).abs() > half
        })
    }
}

/// Trace the outline of `rbfov` with the default adaptive density.
pub fn sample_boundary(
    rbfov: &RBFoV,
    panorama_width: u32,
    panorama_height: u32,
) -> Result<BoundaryPolygon, ProjectionError> {
    sample_boundary_with(rbfov, panorama_width, panorama_height, SamplingDensity::default())
}

/// Trace the outline of `rbfov` on a `panorama_width x panorama_height` panorama.
///
/// Samples whose longitude is undefined (exactly at a pole) are dropped; the
/// remaining points are still returned.
///
/// # Errors
///
/// - `InvalidRBFoV` if either extent is outside (0, 360) degrees
/// - `SourceUnavailable` if the panorama dimensions are unknown (zero)
pub fn sample_boundary_with(
    rbfov: &RBFoV,
    panorama_width: u32,
    panorama_height: u32,
    density: SamplingDensity,
) -> Result<BoundaryPolygon, ProjectionError> {
    rbfov.validate()?;
    if panorama_width == 0 || panorama_height == 0 {
        return Err(ProjectionError::SourceUnavailable(format!(
            "panorama dimensions unknown ({}x{})",
            panorama_width, panorama_height
        )));
    }

    let pixels_per_degree = (panorama_width as f64 / 360.0).max(panorama_height as f64 / 180.0);
    let n_w = density.samples_per_edge(rbfov.fov_w, pixels_per_degree);
    let n_h = density.samples_per_edge(rbfov.fov_h, pixels_per_degree);

    let shape = RegionShape::new(rbfov.fov_w, rbfov.fov_h);
    let orientation = Rotation::look_at(rbfov.center_theta, rbfov.center_phi) * Rotation::roll(rbfov.gamma);

    let sampled = 2 * (n_w + n_h);
    let mut points = Vec::with_capacity(sampled);
    for (s, t) in perimeter(n_w, n_h) {
        let world = orientation * shape.local_direction(s, t);
        let (x, y) = to_panorama_pixel(world, panorama_width, panorama_height);
        if x.is_finite() && y.is_finite() {
            points.push(BoundaryPoint { x, y });
        }
    }

    let dropped = sampled - points.len();
    if points.is_empty() {
        log::warn!("boundary of {:?} has no finite samples", rbfov);
    } else if dropped > 0 {
        log::trace!("dropped {} of {} boundary samples at the poles", dropped, sampled);
    }

    Ok(BoundaryPolygon { points })
}

/// How a normalized perimeter position maps to a camera-space direction.
///
/// Both shapes space samples evenly in angle, so a wide edge is not left
/// sparse in its middle.
#[derive(Debug, Clone, Copy)]
enum RegionShape {
    /// Rectangle on the tangent plane at `z = 1` with half-angles `(a, b)`
    /// in radians; position `s` lands at `x = tan(s * a)`.
    Tangent { a: f64, b: f64 },
    /// Horizontal/vertical angular offsets in radians, half-extents `(a, b)`.
    ///
    /// A tangent-plane rectangle is unbounded once either extent reaches
    /// 180°, so wider regions are traced by angle instead.
    Angular { a: f64, b: f64 },
}

impl RegionShape {
    fn new(fov_w: f64, fov_h: f64) -> Self {
        let a = fov_w.to_radians() / 2.0;
        let b = fov_h.to_radians() / 2.0;
        if fov_w < 180.0 && fov_h < 180.0 {
            RegionShape::Tangent { a, b }
        } else {
            RegionShape::Angular { a, b }
        }
    }

    /// Direction for perimeter position `(s, t)`, both in `[-1, 1]`, `t` up.
    #[inline]
    fn local_direction(self, s: f64, t: f64) -> Direction {
        match self {
            RegionShape::Tangent { a, b } => Direction::new((s * a).tan(), (t * b).tan(), 1.0),
            RegionShape::Angular { a, b } => {
                Rotation::look_at(s * a, t * b) * Direction::new(0.0, 0.0, 1.0)
            }
        }
    }
}

/// Normalized perimeter positions, clockwise on screen from the top-left.
fn perimeter(n_w: usize, n_h: usize) -> impl Iterator<Item = (f64, f64)> {
    let step = |k: usize, n: usize| 2.0 * k as f64 / n as f64;
    let top = (0..n_w).map(move |k| (-1.0 + step(k, n_w), 1.0));
    let right = (0..n_h).map(move |k| (1.0, 1.0 - step(k, n_h)));
    let bottom = (0..n_w).map(move |k| (1.0 - step(k, n_w), -1.0));
    let left = (0..n_h).map(move |k| (-1.0, -1.0 + step(k, n_h)));
    top.chain(right).chain(bottom).chain(left)
}

/// Panorama pixel for a world direction; the column is NaN at the poles.
#[inline]
fn to_panorama_pixel(world: Direction, width: u32, height: u32) -> (f64, f64) {
    let (u, v) = world.to_spherical().to_equirect(width, height);
    if world.has_longitude() {
        (u, v)
    } else {
        (f64::NAN, v)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn rbfov_strategy() -> impl Strategy<Value = RBFoV> {
        (
            -std::f64::consts::PI..std::f64::consts::PI,
            -std::f64::consts::FRAC_PI_2..std::f64::consts::FRAC_PI_2,
            0.1f64..359.9,
            0.1f64..359.9,
            -6.3f64..6.3,
        )
            .prop_map(|(center_theta, center_phi, fov_w, fov_h, gamma)| RBFoV {
                center_theta,
                center_phi,
                fov_w,
                fov_h,
                gamma,
            })
    }

    proptest! {
        /// Property: no NaN or infinite point ever reaches the caller.
        #[test]
        fn prop_points_are_finite(
            rbfov in rbfov_strategy(),
            (w, h) in (2u32..8192, 1u32..4096),
        ) {
            let poly = sample_boundary_with(&rbfov, w, h, SamplingDensity::Fixed(24)).unwrap();
            for p in poly.iter() {
                prop_assert!(p.x.is_finite() && p.y.is_finite());
                prop_assert!(p.x >= 0.0 && p.x < w as f64);
                prop_assert!(p.y >= 0.0 && p.y <= h as f64);
            }
        }

        /// Property: the point count never exceeds the sample count.
        #[test]
        fn prop_point_count_bounded(rbfov in rbfov_strategy(), n in 1u32..64) {
            let poly = sample_boundary_with(&rbfov, 2048, 1024, SamplingDensity::Fixed(n)).unwrap();
            let per_edge = SamplingDensity::Fixed(n).samples_per_edge(0.0, 0.0);
            prop_assert!(poly.len() <= 4 * per_edge);
        }
    }
}
