//! Seam-aware resampling of equirectangular images.
//!
//! Columns wrap around (the panorama is cyclic in longitude) while rows are
//! clamped (the poles are edges, not seams).

use crate::decode::PixelBuffer;

/// Interpolation filter for viewport rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum InterpolationFilter {
    /// Fast bilinear interpolation - the default for on-demand crops.
    #[default]
    Bilinear,
    /// High-quality Lanczos3 interpolation - good for export.
    Lanczos3,
}

impl InterpolationFilter {
    /// Sample the panorama at a fractional source position.
    #[inline]
    pub fn sample(self, image: &PixelBuffer, u: f64, v: f64) -> [u8; 3] {
        match self {
            InterpolationFilter::Bilinear => sample_bilinear(image, u, v),
            InterpolationFilter::Lanczos3 => sample_lanczos3(image, u, v),
        }
    }
}

#[inline]
fn wrap_column(x: i64, width: i64) -> usize {
    x.rem_euclid(width) as usize
}

#[inline]
fn clamp_row(y: i64, height: i64) -> usize {
    y.clamp(0, height - 1) as usize
}

/// Bilinear interpolation over the 4 nearest pixels.
///
/// The right neighbour of the last column is column 0.
pub(crate) fn sample_bilinear(image: &PixelBuffer, u: f64, v: f64) -> [u8; 3] {
    let (w, h) = (image.width as i64, image.height as i64);

    let x_floor = u.floor();
    let y_floor = v.floor();
    let fx = u - x_floor;
    let fy = v - y_floor;

    let x0 = wrap_column(x_floor as i64, w);
    let x1 = wrap_column(x_floor as i64 + 1, w);
    let y0 = clamp_row(y_floor as i64, h);
    let y1 = clamp_row(y_floor as i64 + 1, h);

    let p00 = image.rgb_f64(x0, y0);
    let p10 = image.rgb_f64(x1, y0);
    let p01 = image.rgb_f64(x0, y1);
    let p11 = image.rgb_f64(x1, y1);

    let mut result = [0u8; 3];
    for i in 0..3 {
        let value = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = value.clamp(0.0, 255.0).round() as u8;
    }
    result
}

/// Lanczos3 interpolation over a 6x6 neighbourhood.
fn sample_lanczos3(image: &PixelBuffer, u: f64, v: f64) -> [u8; 3] {
    let (w, h) = (image.width as i64, image.height as i64);
    let x0 = u.floor() as i64;
    let y0 = v.floor() as i64;

    let mut sum = [0.0f64; 3];
    let mut weight_sum = 0.0;

    for ky in -2..=3 {
        let py = y0 + ky;
        let wy = lanczos_weight(v - py as f64, 3.0);
        if wy == 0.0 {
            continue;
        }
        let row = clamp_row(py, h);
        for kx in -2..=3 {
            let px = x0 + kx;
            let weight = lanczos_weight(u - px as f64, 3.0) * wy;
            let pixel = image.rgb_f64(wrap_column(px, w), row);
            sum[0] += pixel[0] * weight;
            sum[1] += pixel[1] * weight;
            sum[2] += pixel[2] * weight;
            weight_sum += weight;
        }
    }

    if weight_sum.abs() < f64::EPSILON {
        return sample_bilinear(image, u, v);
    }

    let mut result = [0u8; 3];
    for i in 0..3 {
        result[i] = (sum[i] / weight_sum).clamp(0.0, 255.0).round() as u8;
    }
    result
}

/// Lanczos kernel: `sinc(x) * sinc(x/a)` for `|x| < a`, zero elsewhere.
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;
    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}
