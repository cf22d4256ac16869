//! Panolabel Core - equirectangular projection and spherical annotation
//!
//! This crate turns 360° equirectangular panoramas into perspective crops an
//! annotator can draw on, and turns the boxes they draw back into
//! sphere-native regions (RBFoV) with an outline on the panorama.
//!
//! Everything here is pure computation over in-memory buffers: no I/O, no
//! global state, and no caching between calls.

pub mod boundary;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod pipeline;
pub mod projector;
pub mod rbfov;
pub mod sphere;
pub mod view;

pub use boundary::{sample_boundary, sample_boundary_with, BoundaryPoint, BoundaryPolygon, SamplingDensity};
pub use config::ProjectorConfig;
pub use decode::{decode_panorama, PixelBuffer};
pub use error::ProjectionError;
pub use pipeline::{annotate_box, render_view, render_view_jpeg, Annotation, AnnotationRecord};
pub use projector::{render, InterpolationFilter};
pub use rbfov::{to_spherical, RBFoV, RotatedBox2D};
pub use view::{Canvas, ViewSpec};
