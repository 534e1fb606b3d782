//! Parallel-curve offsetting.
//!
//! The robust offset algorithm itself comes from `cavalier_contours`. This
//! module converts polylines to and from its vertex representation and
//! applies the edge-case policy it does not cover.

use crate::bulge::Bulge;
use crate::polyline::Polyline;
use crate::Point;
use cavalier_contours::polyline::{PlineSource, PlineSourceMut, PlineVertex, Polyline as CavcPolyline};
use std::panic;
use tracing::{debug, warn};

/// Produces parallel curves of a polyline at a signed margin.
///
/// A positive margin offsets to the left of the travel direction. The result
/// may hold any number of polylines: concave shapes can split into several
/// loops or vanish entirely.
pub trait CurveOffsetter {
    fn offset(&self, polyline: &Polyline, margin: f64) -> Vec<Polyline>;
}

/// Offsetter backed by `cavalier_contours`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CavalierOffsetter;

impl CurveOffsetter for CavalierOffsetter {
    fn offset(&self, polyline: &Polyline, margin: f64) -> Vec<Polyline> {
        if polyline.is_point() || margin == 0.0 {
            return vec![polyline.clone()];
        }

        let source = to_cavalier(polyline);
        let results =
            match panic::catch_unwind(panic::AssertUnwindSafe(|| source.parallel_offset(margin))) {
                Ok(results) => results,
                Err(_) => {
                    warn!(
                        margin,
                        bulges = polyline.bulge_count(),
                        "Panic during parallel offset, dropping result"
                    );
                    return Vec::new();
                }
            };

        let offsetted: Vec<Polyline> = results.iter().filter_map(from_cavalier).collect();
        debug!(
            margin,
            input_bulges = polyline.bulge_count(),
            results = offsetted.len(),
            "Offset polyline"
        );
        offsetted
    }
}

/// Converts a polyline to the `cavalier_contours` vertex representation.
///
/// Every bulge contributes its start point carrying its tangent. An open
/// polyline gets an extra terminal vertex since its end has no outgoing
/// segment.
pub fn to_cavalier(polyline: &Polyline) -> CavcPolyline<f64> {
    let mut result = CavcPolyline::new();
    for bulge in polyline {
        result.add_vertex(PlineVertex::new(bulge.start.x, bulge.start.y, bulge.tangent));
    }

    let closed = polyline.is_closed();
    if !closed {
        let end = polyline.end();
        result.add_vertex(PlineVertex::new(end.x, end.y, 0.0));
    }
    result.set_is_closed(closed);
    result
}

/// Converts a `cavalier_contours` polyline back into bulges.
///
/// A closed input with N vertices gives N bulges, the last one wrapping to
/// the first vertex. An open input gives N - 1 bulges. Returns `None` when
/// there are not enough vertices to form a segment.
pub fn from_cavalier(source: &CavcPolyline<f64>) -> Option<Polyline> {
    let vertices = &source.vertex_data;
    let count = vertices.len();
    let segments = if source.is_closed() { count } else { count.saturating_sub(1) };
    if segments == 0 {
        return None;
    }

    let bulges = (0..segments)
        .map(|i| {
            let from = vertices[i];
            let to = vertices[(i + 1) % count];
            Bulge::new(Point::new(from.x, from.y), Point::new(to.x, to.y), from.bulge)
        })
        .collect();

    Polyline::new(bulges).ok()
}
