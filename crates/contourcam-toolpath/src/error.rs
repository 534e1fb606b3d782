//! Error types for toolpath generation and export.

use crate::model::PathId;
use contourcam_core::ConfigError;
use contourcam_geometry::GeometryError;
use thiserror::Error;

/// Errors raised while building, emitting or writing toolpaths.
#[derive(Error, Debug)]
pub enum ToolpathError {
    /// Depth per cut must be a positive finite number.
    #[error("Invalid depth per cut: {0}")]
    InvalidDepthPerCut(f64),

    /// An arc whose turn direction cannot be resolved, under the abort policy.
    #[error("Unresolved arc orientation in path '{path}' (polyline {polyline}, bulge {bulge})")]
    UnresolvedArc {
        path: String,
        polyline: usize,
        bulge: usize,
    },

    /// The depth needs more passes than a contour may be cut in.
    #[error("Depth {depth} needs too many passes at {depth_per_cut} per cut")]
    TooManyPasses { depth: f64, depth_per_cut: f64 },

    /// No path with this id in the task.
    #[error("Unknown path: {0}")]
    UnknownPath(PathId),

    /// Geometric precondition failed.
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// Configuration dump failed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Output sink failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for toolpath operations.
pub type ToolpathResult<T> = Result<T, ToolpathError>;
