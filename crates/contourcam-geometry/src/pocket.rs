//! Contour-parallel pocketing.
//!
//! The region between a closed border and closed islands is cleared by
//! offsetting the whole shape inward by the tool radius over and over until
//! nothing is left. Every loop of every level becomes a toolpath contour.

use crate::error::{GeometryError, GeometryResult};
use crate::offset::{from_cavalier, to_cavalier};
use crate::polyline::Polyline;
use crate::Orientation;
use cavalier_contours::shape_algorithms::{Shape, ShapeOffsetOptions};
use std::panic;
use tracing::{debug, warn};

/// Upper bound on offset levels, guards against a shape that never vanishes.
const MAX_LEVELS: usize = 10_000;

/// Computes the pocket loops of `border` minus `islands` for a tool of the
/// given `radius`.
///
/// The border is cut counter-clockwise and islands clockwise. Loops are
/// returned level by level, the level touching the border first and the
/// innermost level last.
pub fn pocket(border: &Polyline, islands: &[Polyline], radius: f64) -> GeometryResult<Vec<Polyline>> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(GeometryError::InvalidDistance {
            name: "radius",
            value: radius,
        });
    }

    let border = oriented(border, Orientation::Ccw)?;
    if border.is_point() {
        return Ok(Vec::new());
    }

    let mut plines = vec![to_cavalier(&border)];
    for island in islands {
        let island = oriented(island, Orientation::Cw)?;
        if !island.is_point() {
            plines.push(to_cavalier(&island));
        }
    }

    let mut shape = Shape::from_plines(plines);
    let mut loops = Vec::new();
    let mut levels = 0;

    while levels < MAX_LEVELS {
        let offset = panic::catch_unwind(panic::AssertUnwindSafe(|| {
            shape.parallel_offset(radius, ShapeOffsetOptions::default())
        }));
        shape = match offset {
            Ok(next) => next,
            Err(_) => {
                warn!(level = levels, radius, "Panic during pocket offset, stopping");
                break;
            }
        };

        let level: Vec<Polyline> = shape
            .ccw_plines
            .iter()
            .chain(shape.cw_plines.iter())
            .filter_map(|indexed| from_cavalier(&indexed.polyline))
            .collect();
        if level.is_empty() {
            break;
        }

        loops.extend(level);
        levels += 1;
    }

    debug!(
        islands = islands.len(),
        radius,
        levels,
        loops = loops.len(),
        "Computed pocket"
    );
    Ok(loops)
}

fn oriented(polyline: &Polyline, target: Orientation) -> GeometryResult<Polyline> {
    if !polyline.is_closed() {
        return Err(GeometryError::OpenPolyline("pocket"));
    }

    if polyline.orientation_with_tie(target)? == target {
        Ok(polyline.clone())
    } else {
        Ok(polyline.inverse())
    }
}
