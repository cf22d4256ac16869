//! Equirectangular to perspective viewport rendering.
//!
//! # Algorithm
//!
//! Rendering uses inverse mapping: for each output pixel `(x, y)` we build the
//! camera ray, rotate it into world space and look up where that direction
//! lands on the panorama.
//!
//! ```text
//! f      = 0.5 * out_w / tan(0.5 * fov)
//! ray    = (x - out_w/2, -(y - out_h/2), f)
//! world  = yaw(θc) · pitch(φc) · ray
//! φ      = asin(clamp(world.y / |world|, -1, 1))
//! θ      = atan2(world.x, world.z)
//! u      = ((θ + π) / 2π · W) mod W
//! v      = clamp((π/2 - φ) / π · H, 0, H - 1)
//! ```
//!
//! The panorama is then resampled at `(u, v)` with the chosen filter,
//! interpolating across the horizontal seam.

mod sample;

pub use sample::InterpolationFilter;

use crate::decode::PixelBuffer;
use crate::error::ProjectionError;
use crate::sphere::{camera_ray, Rotation};
use crate::view::ViewSpec;

/// Precomputed mapping from viewport pixels to panorama pixels.
#[derive(Debug, Clone, Copy)]
pub struct ViewMapping {
    rotation: Rotation,
    focal: f64,
    out_width: f64,
    out_height: f64,
    panorama_width: u32,
    panorama_height: u32,
}

impl ViewMapping {
    /// Build the mapping for a view onto a panorama of the given size.
    pub fn new(
        view: &ViewSpec,
        panorama_width: u32,
        panorama_height: u32,
    ) -> Result<Self, ProjectionError> {
        view.validate()?;
        if panorama_width == 0 || panorama_height == 0 {
            return Err(ProjectionError::SourceUnavailable(format!(
                "panorama dimensions unknown ({}x{})",
                panorama_width, panorama_height
            )));
        }
        let out_width = view.out_width as f64;
        Ok(Self {
            rotation: view.rotation(),
            focal: view.focal_length(out_width),
            out_width,
            out_height: view.out_height as f64,
            panorama_width,
            panorama_height,
        })
    }

    /// Panorama pixel position sampled for viewport pixel `(x, y)`.
    ///
    /// The column is in `[0, W)` and the row in `[0, H - 1]`.
    #[inline]
    pub fn source_position(&self, x: f64, y: f64) -> (f64, f64) {
        let ray = camera_ray(x, y, self.out_width, self.out_height, self.focal);
        let direction = (self.rotation * ray).to_spherical();
        let (u, v) = direction.to_equirect(self.panorama_width, self.panorama_height);
        (u, v.clamp(0.0, (self.panorama_height - 1) as f64))
    }

    fn render_row(&self, panorama: &PixelBuffer, filter: InterpolationFilter, y: usize, row: &mut [u8]) {
        for (x, pixel) in row.chunks_exact_mut(3).enumerate() {
            let (u, v) = self.source_position(x as f64, y as f64);
            pixel.copy_from_slice(&filter.sample(panorama, u, v));
        }
    }
}

/// Render a perspective viewport of an equirectangular panorama.
///
/// Pure function of its inputs: the panorama is not modified and the same
/// inputs always produce the same pixels.
///
/// # Errors
///
/// - `InvalidViewSpec` if the view is out of range
/// - `SourceUnavailable` if the panorama is empty or its buffer does not
///   match its dimensions
///
/// # Example
///
/// ```ignore
/// use panolabel_core::projector::{render, InterpolationFilter};
/// use panolabel_core::ViewSpec;
///
/// let view = ViewSpec::new(0.0, 0.0, 90.0, 512, 512)?;
/// let viewport = render(&panorama, &view, InterpolationFilter::Bilinear)?;
/// ```
pub fn render(
    panorama: &PixelBuffer,
    view: &ViewSpec,
    filter: InterpolationFilter,
) -> Result<PixelBuffer, ProjectionError> {
    view.validate()?;
    panorama.check()?;
    let mapping = ViewMapping::new(view, panorama.width, panorama.height)?;

    log::debug!(
        "rendering {}x{} viewport at ({:.4}, {:.4}) fov {} from {}x{} panorama",
        view.out_width,
        view.out_height,
        view.theta,
        view.phi,
        view.fov,
        panorama.width,
        panorama.height
    );

    let row_len = view.out_width as usize * 3;
    let mut output = vec![0u8; row_len * view.out_height as usize];
    render_rows(&mapping, panorama, filter, row_len, &mut output);

    Ok(PixelBuffer::new(view.out_width, view.out_height, output))
}

#[cfg(feature = "auto-threads")]
fn render_rows(
    mapping: &ViewMapping,
    panorama: &PixelBuffer,
    filter: InterpolationFilter,
    row_len: usize,
    output: &mut [u8],
) {
    use rayon::iter::{IndexedParallelIterator as _, ParallelIterator as _};
    use rayon::slice::ParallelSliceMut as _;

    output
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| mapping.render_row(panorama, filter, y, row));
}

#[cfg(not(feature = "auto-threads"))]
fn render_rows(
    mapping: &ViewMapping,
    panorama: &PixelBuffer,
    filter: InterpolationFilter,
    row_len: usize,
    output: &mut [u8],
) {
    for (y, row) in output.chunks_exact_mut(row_len).enumerate() {
        mapping.render_row(panorama, filter, y, row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sphere::Spherical;
    use std::f64::consts::PI;

    /// Panorama whose red channel encodes the column and green the row.
    fn gradient_panorama(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 255 / (width - 1)) as u8);
                pixels.push((y * 255 / (height - 1)) as u8);
                pixels.push(128);
            }
        }
        PixelBuffer::new(width, height, pixels)
    }

    fn view(theta: f64, phi: f64, fov: f64, w: u32, h: u32) -> ViewSpec {
        ViewSpec::new(theta, phi, fov, w, h).unwrap()
    }

    #[test]
    fn test_output_dimensions() {
        let pano = gradient_panorama(64, 32);
        let out = render(&pano, &view(0.0, 0.0, 90.0, 40, 30), InterpolationFilter::Bilinear).unwrap();
        assert_eq!(out.width, 40);
        assert_eq!(out.height, 30);
        assert_eq!(out.pixels.len(), 40 * 30 * 3);
    }

    #[test]
    fn test_center_pixel_round_trip() {
        let mapping = ViewMapping::new(&view(0.0, 0.0, 90.0, 512, 512), 2048, 1024).unwrap();
        let (u, v) = mapping.source_position(256.0, 256.0);
        let back = Spherical::from_equirect(u, v, 2048, 1024);
        assert!(back.theta.abs() < 1e-9);
        assert!(back.phi.abs() < 1e-9);
    }

    #[test]
    fn test_center_pixel_follows_view_direction() {
        let mapping = ViewMapping::new(&view(1.2, -0.4, 70.0, 300, 200), 2048, 1024).unwrap();
        let (u, v) = mapping.source_position(150.0, 100.0);
        let back = Spherical::from_equirect(u, v, 2048, 1024);
        assert!((back.theta - 1.2).abs() < 1e-9);
        assert!((back.phi + 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_wraparound_near_seam() {
        let eps = 0.01;
        let mapping = ViewMapping::new(&view(PI - eps, 0.0, 60.0, 64, 32), 2048, 1024).unwrap();
        let columns: Vec<f64> = (0..64)
            .map(|x| mapping.source_position(x as f64, 16.0).0)
            .collect();

        assert!(columns.iter().all(|&u| (0.0..2048.0).contains(&u)));
        assert!(columns.iter().any(|&u| u > 2000.0), "left half near W");
        assert!(columns.iter().any(|&u| u < 48.0), "right half near 0");

        // Neighbouring columns step by a small amount modulo W
        for pair in columns.windows(2) {
            let step = (pair[1] - pair[0]).rem_euclid(2048.0);
            assert!(step < 20.0, "discontinuity: {} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_rows_are_clamped_at_pole() {
        let mapping = ViewMapping::new(&view(0.0, 1.5, 120.0, 64, 64), 256, 128).unwrap();
        for y in 0..64 {
            for x in 0..64 {
                let (_, v) = mapping.source_position(x as f64, y as f64);
                assert!((0.0..=127.0).contains(&v));
            }
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let pano = gradient_panorama(128, 64);
        let v = view(2.0, 0.3, 75.0, 48, 32);
        let a = render(&pano, &v, InterpolationFilter::Bilinear).unwrap();
        let b = render(&pano, &v, InterpolationFilter::Bilinear).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_render_does_not_modify_panorama() {
        let pano = gradient_panorama(64, 32);
        let before = pano.clone();
        let _ = render(&pano, &view(0.5, 0.5, 90.0, 16, 16), InterpolationFilter::Lanczos3).unwrap();
        assert_eq!(pano, before);
    }

    #[test]
    fn test_uniform_panorama_renders_uniform() {
        let pano = PixelBuffer::new(64, 32, vec![77u8; 64 * 32 * 3]);
        for filter in [InterpolationFilter::Bilinear, InterpolationFilter::Lanczos3] {
            let out = render(&pano, &view(-3.0, -1.2, 100.0, 20, 20), filter).unwrap();
            assert!(out.pixels.iter().all(|&p| p == 77));
        }
    }

    #[test]
    fn test_looking_right_samples_right_of_center() {
        let pano = gradient_panorama(360, 180);
        let out = render(&pano, &view(PI / 2.0, 0.0, 30.0, 9, 9), InterpolationFilter::Bilinear).unwrap();
        // θ = π/2 is three quarters across the panorama
        let red = out.pixels[(4 * 9 + 4) * 3] as f64;
        let expected = 270.0 * 255.0 / 359.0;
        assert!((red - expected).abs() < 4.0, "red {} expected {}", red, expected);
    }

    #[test]
    fn test_invalid_view_rejected() {
        let pano = gradient_panorama(64, 32);
        let bad = ViewSpec {
            theta: 0.0,
            phi: 0.0,
            fov: 180.0,
            out_width: 16,
            out_height: 16,
        };
        assert!(matches!(
            render(&pano, &bad, InterpolationFilter::Bilinear),
            Err(ProjectionError::InvalidViewSpec(_))
        ));
    }

    #[test]
    fn test_missing_panorama_rejected() {
        let empty = PixelBuffer {
            width: 0,
            height: 0,
            pixels: vec![],
        };
        assert!(matches!(
            render(&empty, &view(0.0, 0.0, 90.0, 16, 16), InterpolationFilter::Bilinear),
            Err(ProjectionError::SourceUnavailable(_))
        ));

        let truncated = PixelBuffer {
            width: 8,
            height: 4,
            pixels: vec![0u8; 10],
        };
        assert!(matches!(
            render(&truncated, &view(0.0, 0.0, 90.0, 16, 16), InterpolationFilter::Bilinear),
            Err(ProjectionError::SourceUnavailable(_))
        ));
    }
}
