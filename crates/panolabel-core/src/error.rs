//! Error type shared by the projection, conversion and sampling operations.

use thiserror::Error;

use crate::decode::DecodeError;

/// Errors reported by the projection core.
///
/// Every variant is returned synchronously to the immediate caller. Nothing
/// here is transient, so callers should not retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// The view direction, field of view or output size is out of range.
    #[error("Invalid view: {0}")]
    InvalidViewSpec(String),

    /// The 2D box has a non-positive or non-finite extent.
    #[error("Invalid box: width ({width}) and height ({height}) must be positive")]
    InvalidBox { width: f64, height: f64 },

    /// The spherical field of view is outside the open interval (0, 360) degrees.
    #[error("Invalid RBFoV: fov_w ({fov_w}) and fov_h ({fov_h}) must be within (0, 360) degrees")]
    InvalidRBFoV { fov_w: f64, fov_h: f64 },

    /// Panorama pixels are missing, corrupt or could not be decoded.
    #[error("Panorama unavailable: {0}")]
    SourceUnavailable(String),
}

impl ProjectionError {
    /// Whether this error was caused by the caller's input rather than the source image.
    ///
    /// A service layer maps client errors to 4xx responses and the rest to 5xx.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ProjectionError::SourceUnavailable(_))
    }
}

impl From<DecodeError> for ProjectionError {
    fn from(err: DecodeError) -> Self {
        ProjectionError::SourceUnavailable(err.to_string())
    }
}
