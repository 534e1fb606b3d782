//! Cleanup of imported and offset contours.

use crate::bulge::Bulge;
use crate::polyline::Polyline;
use tracing::trace;

/// Bulges with a chord shorter than this are merged into their neighbour.
const REPEAT_TOLERANCE: f64 = 1e-9;

/// Removes short polylines and flattens tiny arcs.
///
/// Point polylines are always kept: they stand for drill-like positions
/// rather than contours.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cleaner {
    pub minimum_polyline_length: f64,
    pub minimum_arc_length: f64,
}

impl Cleaner {
    pub fn new(minimum_polyline_length: f64, minimum_arc_length: f64) -> Self {
        Self {
            minimum_polyline_length,
            minimum_arc_length,
        }
    }

    /// Cleans every polyline, dropping those that end up too short.
    pub fn clean(&self, polylines: Vec<Polyline>) -> Vec<Polyline> {
        let before = polylines.len();
        let cleaned: Vec<Polyline> = polylines
            .into_iter()
            .filter_map(|polyline| self.clean_polyline(polyline))
            .collect();

        trace!(before, after = cleaned.len(), "Cleaned polylines");
        cleaned
    }

    /// Cleans one polyline, `None` when it is shorter than the minimum length.
    pub fn clean_polyline(&self, mut polyline: Polyline) -> Option<Polyline> {
        if polyline.is_point() {
            return Some(polyline);
        }

        if polyline.length() < self.minimum_polyline_length {
            return None;
        }

        for bulge in polyline.bulges_mut() {
            if !bulge.is_line() && bulge.length() < self.minimum_arc_length {
                bulge.tangent = 0.0;
            }
        }

        Some(remove_repeated_points(polyline))
    }
}

/// Drops zero-length bulges, reconnecting their neighbours.
fn remove_repeated_points(polyline: Polyline) -> Polyline {
    if polyline.bulge_count() < 2 {
        return polyline;
    }

    let mut kept: Vec<Bulge> = Vec::with_capacity(polyline.bulge_count());
    for bulge in polyline.bulges() {
        if bulge.chord().norm() > REPEAT_TOLERANCE {
            let mut bulge = *bulge;
            if let Some(previous) = kept.last() {
                bulge.start = previous.end;
            }
            kept.push(bulge);
        }
    }

    if kept.is_empty() {
        return Polyline::point(polyline.start());
    }

    // Restore the exact closure the dropped bulges may have carried.
    let first_start = kept[0].start;
    if polyline.is_closed() {
        if let Some(last) = kept.last_mut() {
            last.end = first_start;
        }
    }

    Polyline::new(kept).unwrap_or(polyline)
}
