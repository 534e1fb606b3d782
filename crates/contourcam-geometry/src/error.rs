//! Error types for geometric operations.

use thiserror::Error;

/// Errors raised when a geometric precondition does not hold.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A polyline needs at least one bulge.
    #[error("Polyline has no bulges")]
    EmptyPolyline,

    /// The operation is only defined for closed polylines.
    #[error("Operation '{0}' requires a closed polyline")]
    OpenPolyline(&'static str),

    /// A distance parameter is invalid.
    #[error("Invalid {name}: {value}")]
    InvalidDistance { name: &'static str, value: f64 },
}

/// Result type alias for geometric operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
