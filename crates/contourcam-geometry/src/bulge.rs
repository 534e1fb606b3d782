//! Line or circular arc segment.
//!
//! A bulge is stored as its two end points plus `tangent`, the tangent of a
//! quarter of the included angle of the arc. Zero is a straight line, a
//! positive value turns counter-clockwise and a negative value clockwise.
//! This is the same vertex encoding `cavalier_contours` uses, so bulges
//! convert to and from its polylines without loss.

use crate::circle::Circle;
use crate::{Point, Transform, Vector};
use serde::{Deserialize, Serialize};

/// A single line or arc segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bulge {
    pub start: Point,
    pub end: Point,
    /// Tangent of a quarter of the included angle, signed by turn direction
    pub tangent: f64,
}

impl Bulge {
    /// Creates a new bulge.
    pub fn new(start: Point, end: Point, tangent: f64) -> Self {
        Self {
            start,
            end,
            tangent,
        }
    }

    /// Creates a straight segment.
    pub fn line(start: Point, end: Point) -> Self {
        Self::new(start, end, 0.0)
    }

    /// Creates a degenerate bulge standing for a single point.
    pub fn point(at: Point) -> Self {
        Self::new(at, at, 0.0)
    }

    /// Creates the arc from `start` to `end` sweeping `angle` radians
    /// (positive counter-clockwise).
    pub fn arc(start: Point, end: Point, angle: f64) -> Self {
        Self::new(start, end, (angle / 4.0).tan())
    }

    pub fn is_line(&self) -> bool {
        self.tangent == 0.0
    }

    /// True when start and end coincide.
    pub fn is_point(&self) -> bool {
        self.start == self.end
    }

    /// Vector from start to end.
    pub fn chord(&self) -> Vector {
        self.end - self.start
    }

    /// Signed included angle of the arc in radians, zero for lines.
    pub fn included_angle(&self) -> f64 {
        4.0 * self.tangent.atan()
    }

    /// Arc radius, infinite for lines.
    pub fn radius(&self) -> f64 {
        if self.is_line() {
            return f64::INFINITY;
        }
        let b = self.tangent.abs();
        self.chord().norm() * (1.0 + b * b) / (4.0 * b)
    }

    /// Arc length for curved bulges, Euclidean distance for lines.
    pub fn length(&self) -> f64 {
        if self.is_line() {
            return self.chord().norm();
        }
        self.radius() * self.included_angle().abs()
    }

    /// Supporting circle of an arc, `None` for a line.
    pub fn to_circle(&self) -> Option<Circle> {
        if self.is_line() {
            return None;
        }

        let chord = self.chord();
        let normal = Vector::new(-chord.y, chord.x);
        let b = self.tangent;
        let center = self.start + chord * 0.5 + normal * ((1.0 - b * b) / (4.0 * b));

        Some(Circle::new(center, self.radius(), self.tangent))
    }

    /// Reverses traversal in place: swaps the end points and negates the
    /// tangent, so the geometric curve is unchanged.
    pub fn invert(&mut self) -> &mut Self {
        std::mem::swap(&mut self.start, &mut self.end);
        self.tangent = -self.tangent;
        self
    }

    /// Returns the reversed bulge.
    pub fn inverse(&self) -> Self {
        let mut inverse = *self;
        inverse.invert();
        inverse
    }

    /// Maps both end points through `matrix`.
    ///
    /// Arcs stay exact only under similarity transforms. A mirroring
    /// transform flips the turn direction, so the tangent is negated.
    pub fn transform(&mut self, matrix: &Transform) {
        self.start = matrix * self.start;
        self.end = matrix * self.end;

        let linear = matrix.matrix().fixed_view::<2, 2>(0, 0).determinant();
        if linear < 0.0 {
            self.tangent = -self.tangent;
        }
    }

    /// Contribution of this bulge to the signed area of a closed polyline:
    /// the shoelace term of the chord plus the circular segment between chord
    /// and arc.
    pub fn signed_area(&self) -> f64 {
        let chord_term = 0.5 * (self.start.x * self.end.y - self.end.x * self.start.y);
        if self.is_line() {
            return chord_term;
        }

        let angle = self.included_angle();
        let radius = self.radius();
        let segment = 0.5 * radius * radius * (angle.abs() - angle.abs().sin());
        chord_term + segment.copysign(angle)
    }

    /// Component-wise comparison within `eps`.
    pub fn approx_eq(&self, other: &Bulge, eps: f64) -> bool {
        (self.start - other.start).norm() <= eps
            && (self.end - other.end).norm() <= eps
            && (self.tangent - other.tangent).abs() <= eps
    }
}
