//! Contiguous chain of bulges.
//!
//! A polyline always holds at least one bulge and every bulge ends where the
//! next one starts. It is closed when its last bulge ends exactly where the
//! first one starts, and a point when it is closed with a single bulge.

use crate::bulge::Bulge;
use crate::error::{GeometryError, GeometryResult};
use crate::offset::{CavalierOffsetter, CurveOffsetter};
use crate::{Orientation, Point, Transform};
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Ordered, contiguous sequence of bulges forming one contour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Bulge>", into = "Vec<Bulge>")]
pub struct Polyline {
    bulges: Vec<Bulge>,
}

impl Polyline {
    /// Creates a polyline from contiguous bulges.
    pub fn new(bulges: Vec<Bulge>) -> GeometryResult<Self> {
        if bulges.is_empty() {
            return Err(GeometryError::EmptyPolyline);
        }
        Ok(Self { bulges })
    }

    /// Creates the single-point polyline at `at`.
    pub fn point(at: Point) -> Self {
        Self {
            bulges: vec![Bulge::point(at)],
        }
    }

    /// Creates a polyline of straight segments through `points`.
    ///
    /// With `closed` a last segment joins the final point back to the first.
    /// A single point gives a point polyline.
    pub fn from_points(points: &[Point], closed: bool) -> GeometryResult<Self> {
        match points {
            [] => Err(GeometryError::EmptyPolyline),
            [single] => Ok(Self::point(*single)),
            _ => {
                let mut bulges: Vec<Bulge> = points
                    .windows(2)
                    .map(|pair| Bulge::line(pair[0], pair[1]))
                    .collect();
                if closed {
                    bulges.push(Bulge::line(points[points.len() - 1], points[0]));
                }
                Ok(Self { bulges })
            }
        }
    }

    pub fn bulges(&self) -> &[Bulge] {
        &self.bulges
    }

    pub(crate) fn bulges_mut(&mut self) -> &mut [Bulge] {
        &mut self.bulges
    }

    /// Number of bulges, never zero.
    pub fn bulge_count(&self) -> usize {
        self.bulges.len()
    }

    /// Iterates the bulges in traversal order.
    pub fn iter(&self) -> std::slice::Iter<'_, Bulge> {
        self.bulges.iter()
    }

    pub fn start(&self) -> Point {
        self.bulges[0].start
    }

    pub fn end(&self) -> Point {
        self.bulges[self.bulges.len() - 1].end
    }

    pub fn is_closed(&self) -> bool {
        self.start() == self.end()
    }

    pub fn is_point(&self) -> bool {
        self.is_closed() && self.bulges.len() == 1
    }

    /// Total length of all bulges.
    pub fn length(&self) -> f64 {
        self.bulges.iter().map(Bulge::length).sum()
    }

    /// Signed enclosed area, positive for counter-clockwise winding.
    ///
    /// Only meaningful for closed polylines.
    pub fn signed_area(&self) -> f64 {
        self.bulges.iter().map(Bulge::signed_area).sum()
    }

    /// Winding of a closed polyline; a zero area counts as counter-clockwise.
    pub fn orientation(&self) -> GeometryResult<Orientation> {
        self.orientation_with_tie(Orientation::Ccw)
    }

    /// Winding of a closed polyline, returning `tie` when the area is zero.
    pub fn orientation_with_tie(&self, tie: Orientation) -> GeometryResult<Orientation> {
        if !self.is_closed() {
            return Err(GeometryError::OpenPolyline("orientation"));
        }

        let area = self.signed_area();
        Ok(if area > 0.0 {
            Orientation::Ccw
        } else if area < 0.0 {
            Orientation::Cw
        } else {
            tie
        })
    }

    /// Reverses traversal in place.
    pub fn invert(&mut self) -> &mut Self {
        for bulge in &mut self.bulges {
            bulge.invert();
        }
        self.bulges.reverse();
        self
    }

    /// Returns the reversed polyline.
    pub fn inverse(&self) -> Self {
        let mut inverse = self.clone();
        inverse.invert();
        inverse
    }

    /// Appends the bulges of `other`. Contiguity is the caller's concern.
    pub fn append(&mut self, other: &Polyline) {
        self.bulges.extend_from_slice(&other.bulges);
    }

    /// Parallel curves at signed `margin`, positive to the left of the
    /// travel direction.
    ///
    /// A point has no offset and is returned unchanged. Other polylines may
    /// yield zero, one or several results.
    pub fn offsetted(&self, margin: f64) -> Vec<Polyline> {
        self.offsetted_with(&CavalierOffsetter::default(), margin)
    }

    /// Same as [`Polyline::offsetted`] with an explicit offset algorithm.
    pub fn offsetted_with(&self, offsetter: &dyn CurveOffsetter, margin: f64) -> Vec<Polyline> {
        if self.is_point() {
            return vec![self.clone()];
        }
        offsetter.offset(self, margin)
    }

    /// Maps every bulge through `matrix`.
    pub fn transform(&mut self, matrix: &Transform) {
        for bulge in &mut self.bulges {
            bulge.transform(matrix);
        }
    }

    /// True when every bulge starts within `eps` of the previous end.
    pub fn is_contiguous(&self, eps: f64) -> bool {
        self.bulges
            .windows(2)
            .all(|pair| (pair[0].end - pair[1].start).norm() <= eps)
    }

    /// Bulge-wise comparison within `eps`.
    pub fn approx_eq(&self, other: &Polyline, eps: f64) -> bool {
        self.bulges.len() == other.bulges.len()
            && self
                .bulges
                .iter()
                .zip(&other.bulges)
                .all(|(a, b)| a.approx_eq(b, eps))
    }
}

impl AddAssign<&Polyline> for Polyline {
    fn add_assign(&mut self, other: &Polyline) {
        self.append(other);
    }
}

impl TryFrom<Vec<Bulge>> for Polyline {
    type Error = GeometryError;

    fn try_from(bulges: Vec<Bulge>) -> GeometryResult<Self> {
        Self::new(bulges)
    }
}

impl From<Polyline> for Vec<Bulge> {
    fn from(polyline: Polyline) -> Self {
        polyline.bulges
    }
}

impl<'a> IntoIterator for &'a Polyline {
    type Item = &'a Bulge;
    type IntoIter = std::slice::Iter<'a, Bulge>;

    fn into_iter(self) -> Self::IntoIter {
        self.bulges.iter()
    }
}
