//! Error types for constitutive curves.

use thiserror::Error;

/// Errors that can occur while building a curve.
///
/// Evaluation never fails; these only arise at construction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CurveError {
    /// Insufficient control points to define the curve.
    #[error("insufficient points: need at least {required}, got {actual}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        actual: usize,
    },

    /// Abscissa and ordinate tables differ in length.
    #[error("length mismatch: {x} abscissae, {y} ordinates")]
    LengthMismatch {
        /// Number of x values.
        x: usize,
        /// Number of y values.
        y: usize,
    },

    /// Abscissae must strictly increase.
    #[error("abscissa at index {index} does not increase")]
    NotIncreasing {
        /// First offending index.
        index: usize,
    },

    /// A control point is NaN or infinite.
    #[error("non-finite control point at index {index}")]
    NonFinite {
        /// First offending index.
        index: usize,
    },
}

/// Result type for curve construction.
pub type Result<T> = std::result::Result<T, CurveError>;
