//! Error types for the splinker core.

use crate::path::SplineKind;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SplineError>;

/// Errors produced by color, path, curve and palette operations.
///
/// Every variant is reported at the point of the violating call; nothing in
/// the crate downgrades one of these to a default color.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplineError {
    /// A color space tag was not recognized.
    #[error("unsupported color space: {0}")]
    UnsupportedSpace(String),

    /// A structural edit would violate a path or palette invariant.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// The control-point count does not fit the path's spline kind.
    #[error("invalid path shape for {kind:?} with {count} control points: {reason}")]
    InvalidPathShape {
        kind: SplineKind,
        count: usize,
        reason: String,
    },

    /// A curve parameter was outside the evaluation domain.
    #[error("curve parameter {0} is outside [0, 1]")]
    OutOfRange(f64),

    /// Sampling was requested on a palette without paths.
    #[error("palette has no paths")]
    EmptyPalette,

    /// No path with the given name exists in the palette.
    #[error("path not found: {0}")]
    PathNotFound(String),

    /// A path with the given name already exists in the palette.
    #[error("duplicate path name: {0}")]
    DuplicatePathName(String),

    /// A color string or coordinate triple could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),
}
