//! The two operations a surrounding service calls: render a crop, and turn
//! a box drawn on that crop into a stored annotation.

use serde::{Deserialize, Serialize};

use crate::boundary::{sample_boundary_with, BoundaryPolygon, SamplingDensity};
use crate::config::ProjectorConfig;
use crate::decode::PixelBuffer;
use crate::encode::encode_viewport_jpeg;
use crate::error::ProjectionError;
use crate::projector::render;
use crate::rbfov::{to_spherical, RBFoV, RotatedBox2D};
use crate::view::{Canvas, ViewSpec};

/// Result of annotating a box: the sphere-native region and its outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub rbfov: RBFoV,
    pub boundary: BoundaryPolygon,
}

/// What the persistence layer stores for one annotation.
///
/// The originating box and view are kept alongside the derived region so an
/// annotation can be traced back to what the annotator actually drew.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub source_box: RotatedBox2D,
    pub source_view: ViewSpec,
    pub rbfov: RBFoV,
    pub boundary: BoundaryPolygon,
}

impl AnnotationRecord {
    pub fn new(annotation: Annotation, source_box: RotatedBox2D, source_view: ViewSpec) -> Self {
        Self {
            source_box,
            source_view,
            rbfov: annotation.rbfov,
            boundary: annotation.boundary,
        }
    }
}

/// Render the perspective crop for `view` with the configured filter.
pub fn render_view(
    panorama: &PixelBuffer,
    view: &ViewSpec,
    config: &ProjectorConfig,
) -> Result<PixelBuffer, ProjectionError> {
    render(panorama, view, config.filter)
}

/// Render the crop for `view` and encode it as JPEG at the configured quality.
pub fn render_view_jpeg(
    panorama: &PixelBuffer,
    view: &ViewSpec,
    config: &ProjectorConfig,
) -> Result<Vec<u8>, ProjectionError> {
    let viewport = render_view(panorama, view, config)?;
    // The viewport is always well formed here, so a failure is on the codec side.
    // It is reported as SourceUnavailable on purpose: that is the one server-side
    // (5xx) kind, and the caller's input was not at fault.
    encode_viewport_jpeg(&viewport, config.jpeg_quality)
        .map_err(|e| ProjectionError::SourceUnavailable(e.to_string()))
}

/// Convert a box drawn on `canvas` under `view` and trace its outline on a
/// `panorama_width x panorama_height` panorama.
///
/// # Errors
///
/// - `SourceUnavailable` if the panorama dimensions are unknown (zero)
/// - `InvalidBox`, `InvalidViewSpec` from the conversion
/// - `InvalidRBFoV` if the box spans a degenerate angular extent
pub fn annotate_box(
    panorama_width: u32,
    panorama_height: u32,
    rbox: &RotatedBox2D,
    view: &ViewSpec,
    canvas: Canvas,
    density: SamplingDensity,
) -> Result<Annotation, ProjectionError> {
    if panorama_width == 0 || panorama_height == 0 {
        return Err(ProjectionError::SourceUnavailable(format!(
            "panorama dimensions unknown ({}x{})",
            panorama_width, panorama_height
        )));
    }

    let rbfov = to_spherical(rbox, view, canvas)?;
    log::debug!(
        "annotating box ({:.1}, {:.1}) {:.1}x{:.1} -> center ({:.4}, {:.4}) fov {:.3}x{:.3}",
        rbox.x,
        rbox.y,
        rbox.width,
        rbox.height,
        rbfov.center_theta,
        rbfov.center_phi,
        rbfov.fov_w,
        rbfov.fov_h
    );

    let boundary = sample_boundary_with(&rbfov, panorama_width, panorama_height, density)?;
    Ok(Annotation { rbfov, boundary })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_panorama;
    use crate::projector::InterpolationFilter;
    use std::f64::consts::PI;

    /// 2048x1024 panorama whose red channel encodes the column and green the row.
    fn gradient_panorama() -> PixelBuffer {
        let (w, h) = (2048u32, 1024u32);
        let mut pixels = Vec::with_capacity((w * h * 3) as usize);
        for y in 0..h {
            for x in 0..w {
                pixels.extend_from_slice(&[(x / 8) as u8, (y / 4) as u8, 60]);
            }
        }
        PixelBuffer::new(w, h, pixels)
    }

    fn reference_view() -> ViewSpec {
        ViewSpec::new(0.0, 0.0, 90.0, 512, 512).unwrap()
    }

    #[test]
    fn test_reference_annotation() {
        let view = reference_view();
        let rbox = RotatedBox2D::new(256.0, 256.0, 100.0, 80.0, 0.0);
        let annotation = annotate_box(2048, 1024, &rbox, &view, view.output_canvas(), SamplingDensity::Adaptive).unwrap();

        let rbfov = annotation.rbfov;
        assert!(rbfov.center_theta.abs() < 1e-9);
        assert!(rbfov.center_phi.abs() < 1e-9);
        assert!((rbfov.fov_w - 2.0 * (50.0f64 / 256.0).atan().to_degrees()).abs() < 1e-9);
        assert!((rbfov.fov_h - 2.0 * (40.0f64 / 256.0).atan().to_degrees()).abs() < 1e-9);
        assert!((rbfov.fov_w - 22.10).abs() < 0.01);
        assert!((rbfov.fov_h - 17.76).abs() < 0.01);

        // Outline is centered on the panorama center
        let boundary = &annotation.boundary;
        assert!(!boundary.is_empty());
        let xs = boundary.iter().map(|p| p.x);
        let (min_x, max_x) = (xs.clone().fold(f64::MAX, f64::min), xs.fold(f64::MIN, f64::max));
        assert!(((min_x + max_x) / 2.0 - 1024.0).abs() < 1e-6);
        let half_span = (50.0f64 / 256.0).atan() / (2.0 * PI) * 2048.0;
        assert!((max_x - 1024.0 - half_span).abs() < 1e-6);
        assert!(boundary.iter().all(|p| (p.y - 512.0).abs() < 60.0));
    }

    #[test]
    fn test_render_then_annotate_center_of_crop() {
        let panorama = gradient_panorama();
        let view = ViewSpec::new(1.2, -0.4, 75.0, 320, 240).unwrap();
        let config = ProjectorConfig::default();

        let crop = render_view(&panorama, &view, &config).unwrap();
        assert_eq!((crop.width, crop.height), (320, 240));

        let rbox = RotatedBox2D::new(160.0, 120.0, 40.0, 30.0, 0.0);
        let annotation = annotate_box(panorama.width, panorama.height, &rbox, &view, view.output_canvas(), config.boundary_density).unwrap();
        assert!((annotation.rbfov.center_theta - 1.2).abs() < 1e-6);
        assert!((annotation.rbfov.center_phi + 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_render_view_uses_configured_filter() {
        let panorama = gradient_panorama();
        let view = ViewSpec::new(0.3, 0.1, 60.0, 64, 64).unwrap();
        let config = ProjectorConfig {
            filter: InterpolationFilter::Lanczos3,
            ..ProjectorConfig::default()
        };
        assert_eq!(
            render_view(&panorama, &view, &config).unwrap(),
            render(&panorama, &view, InterpolationFilter::Lanczos3).unwrap()
        );
    }

    #[test]
    fn test_render_view_jpeg_decodes() {
        let panorama = gradient_panorama();
        let view = ViewSpec::new(-2.0, 0.5, 90.0, 128, 96).unwrap();
        let bytes = render_view_jpeg(&panorama, &view, &ProjectorConfig::default()).unwrap();
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
        let decoded = decode_panorama(&bytes).unwrap();
        assert_eq!((decoded.width, decoded.height), (128, 96));
    }

    #[test]
    fn test_annotate_is_idempotent() {
        let view = ViewSpec::new(0.7, 0.2, 80.0, 640, 480).unwrap();
        let rbox = RotatedBox2D::new(400.0, 150.0, 120.0, 60.0, 15.0);
        let first = annotate_box(4096, 2048, &rbox, &view, view.output_canvas(), SamplingDensity::Adaptive).unwrap();
        let second = annotate_box(4096, 2048, &rbox, &view, view.output_canvas(), SamplingDensity::Adaptive).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_dimensions() {
        let view = reference_view();
        let rbox = RotatedBox2D::new(256.0, 256.0, 100.0, 80.0, 0.0);
        let result = annotate_box(2048, 0, &rbox, &view, view.output_canvas(), SamplingDensity::Adaptive);
        assert!(matches!(result, Err(ProjectionError::SourceUnavailable(_))));
    }

    #[test]
    fn test_invalid_box_is_reported() {
        let view = reference_view();
        let rbox = RotatedBox2D::new(256.0, 256.0, 0.0, 80.0, 0.0);
        let result = annotate_box(2048, 1024, &rbox, &view, view.output_canvas(), SamplingDensity::Adaptive);
        assert!(matches!(result, Err(ProjectionError::InvalidBox { .. })));
    }

    #[test]
    fn test_render_missing_panorama() {
        let empty = PixelBuffer {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        };
        let result = render_view(&empty, &reference_view(), &ProjectorConfig::default());
        assert!(matches!(result, Err(ProjectionError::SourceUnavailable(_))));
    }

    #[test]
    fn test_record_keeps_source() {
        let view = reference_view();
        let rbox = RotatedBox2D::from_top_left(206.0, 216.0, 100.0, 80.0, 5.0);
        let annotation = annotate_box(2048, 1024, &rbox, &view, view.output_canvas(), SamplingDensity::Fixed(8)).unwrap();
        let record = AnnotationRecord::new(annotation.clone(), rbox, view);
        assert_eq!(record.source_box, rbox);
        assert_eq!(record.source_view, view);
        assert_eq!(record.rbfov, annotation.rbfov);
        assert_eq!(record.boundary.len(), 32);
    }
}
