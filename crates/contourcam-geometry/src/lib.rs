//! # ContourCAM Geometry
//!
//! Arc/line polyline representation and the geometric operations of the
//! toolpath pipeline.
//!
//! ## Core Components
//!
//! - **Bulge**: a line or circular arc segment encoded by its end points and
//!   the tangent of a quarter of its included angle
//! - **Polyline**: a contiguous chain of bulges, open or closed
//! - **Offset Engine**: cutter compensation through `cavalier_contours`
//! - **Pocketing**: repeated inward offsets of a border with islands
//! - **Cleaner / Assembler**: cleanup of imported or offset contours
//!
//! ## Usage
//!
//! ```rust
//! use contourcam_geometry::{Point, Polyline};
//!
//! let square = Polyline::from_points(
//!     &[
//!         Point::new(0.0, 0.0),
//!         Point::new(10.0, 0.0),
//!         Point::new(10.0, 10.0),
//!         Point::new(0.0, 10.0),
//!     ],
//!     true,
//! )
//! .unwrap();
//!
//! // Offset 1mm to the left of the travel direction (inside a CCW square).
//! let inner = square.offsetted(1.0);
//! assert_eq!(inner.len(), 1);
//! ```

pub mod assembler;
pub mod bulge;
pub mod circle;
pub mod cleaner;
pub mod error;
pub mod offset;
pub mod pocket;
pub mod polyline;

use serde::{Deserialize, Serialize};

pub use assembler::Assembler;
pub use bulge::Bulge;
pub use circle::Circle;
pub use cleaner::Cleaner;
pub use error::{GeometryError, GeometryResult};
pub use offset::{CavalierOffsetter, CurveOffsetter};
pub use pocket::pocket;
pub use polyline::Polyline;

/// 2D point in millimeters.
pub type Point = nalgebra::Point2<f64>;

/// 2D vector in millimeters.
pub type Vector = nalgebra::Vector2<f64>;

/// Affine transform applied to geometry.
pub type Transform = nalgebra::Affine2<f64>;

/// Winding direction of a closed curve or turn direction of an arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Clockwise
    Cw,
    /// Counter-clockwise
    Ccw,
}

impl Orientation {
    /// Returns the opposite orientation.
    pub fn opposite(self) -> Self {
        match self {
            Orientation::Cw => Orientation::Ccw,
            Orientation::Ccw => Orientation::Cw,
        }
    }
}

/// Traversal direction configured for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CuttingDirection {
    /// Follow the polyline as stored.
    #[default]
    Forward,
    /// Follow the polyline reversed.
    Backward,
}
