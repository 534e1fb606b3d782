//! Supporting circle of an arc bulge.

use crate::{Orientation, Point};

/// Circle carrying an arc, with the arc's turn direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
    orientation: Option<Orientation>,
}

impl Circle {
    /// Builds the circle of an arc whose bulge tangent is `tangent`.
    ///
    /// The turn direction is left unresolved when the tangent, center or
    /// radius is not a finite number, or when the radius collapses to zero.
    pub fn new(center: Point, radius: f64, tangent: f64) -> Self {
        let finite = tangent.is_finite()
            && center.x.is_finite()
            && center.y.is_finite()
            && radius.is_finite()
            && radius > 0.0;

        let orientation = if !finite {
            None
        } else if tangent > 0.0 {
            Some(Orientation::Ccw)
        } else if tangent < 0.0 {
            Some(Orientation::Cw)
        } else {
            None
        };

        Self {
            center,
            radius,
            orientation,
        }
    }

    /// Turn direction of the arc, `None` when it cannot be classified.
    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }
}
