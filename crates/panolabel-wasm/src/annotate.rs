//! Annotation WASM bindings.
//!
//! Boxes, RBFoVs and records cross the boundary as plain JavaScript objects
//! via `serde-wasm-bindgen`:
//!
//! ```typescript
//! const record = annotate_box(pano.width, pano.height,
//!   { x: 256, y: 256, width: 100, height: 80, angle: 0 },
//!   view, 512, 512, config);
//! // record = { source_box, source_view, rbfov, boundary: [{x, y}, ...] }
//! ```

use crate::config::ProjectorConfig;
use crate::types::JsViewSpec;
use panolabel_core::pipeline::{annotate_box as annotate, AnnotationRecord};
use panolabel_core::{sample_boundary_with, BoundaryPolygon, Canvas, ProjectionError, RBFoV, RotatedBox2D, SamplingDensity, ViewSpec};
use wasm_bindgen::prelude::*;

/// Convert a box drawn on a `canvas_width x canvas_height` canvas under `view`
/// into a stored annotation record.
///
/// `rbox` is `{ x, y, width, height, angle? }` with `(x, y)` the box center
/// in canvas pixels and `angle` in degrees, clockwise.
#[wasm_bindgen]
pub fn annotate_box(
    panorama_width: u32,
    panorama_height: u32,
    rbox: JsValue,
    view: &JsViewSpec,
    canvas_width: u32,
    canvas_height: u32,
    config: &ProjectorConfig,
) -> Result<JsValue, JsValue> {
    let rbox: RotatedBox2D =
        serde_wasm_bindgen::from_value(rbox).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let record = annotation_record(
        panorama_width,
        panorama_height,
        rbox,
        view.view(),
        Canvas::new(canvas_width, canvas_height),
        config.inner().boundary_density,
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&record).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Build a center-based box object from a top-left corner, as drawing tools report it.
#[wasm_bindgen]
pub fn box_from_top_left(
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    angle: f64,
) -> Result<JsValue, JsValue> {
    let rbox = RotatedBox2D::from_top_left(left, top, width, height, angle);
    serde_wasm_bindgen::to_value(&rbox).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Re-trace the outline of a stored RBFoV, e.g. for a panorama of another size.
#[wasm_bindgen]
pub fn sample_boundary(
    rbfov: JsValue,
    panorama_width: u32,
    panorama_height: u32,
    config: &ProjectorConfig,
) -> Result<JsValue, JsValue> {
    let rbfov: RBFoV =
        serde_wasm_bindgen::from_value(rbfov).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let polygon = boundary(&rbfov, panorama_width, panorama_height, config.inner().boundary_density)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&polygon).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn annotation_record(
    panorama_width: u32,
    panorama_height: u32,
    rbox: RotatedBox2D,
    view: &ViewSpec,
    canvas: Canvas,
    density: SamplingDensity,
) -> Result<AnnotationRecord, ProjectionError> {
    let annotation = annotate(panorama_width, panorama_height, &rbox, view, canvas, density)?;
    Ok(AnnotationRecord::new(annotation, rbox, *view))
}

fn boundary(
    rbfov: &RBFoV,
    panorama_width: u32,
    panorama_height: u32,
    density: SamplingDensity,
) -> Result<BoundaryPolygon, ProjectionError> {
    sample_boundary_with(rbfov, panorama_width, panorama_height, density)
}
