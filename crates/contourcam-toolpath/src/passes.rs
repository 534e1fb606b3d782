//! Multiple pass depth control.
//!
//! A contour deeper than the tool's depth per cut is cut in several passes,
//! each one `depth_per_cut` deeper than the previous and the last one clamped
//! to the final depth. Contours that are not cut in a loop alternate their
//! traversal direction between passes so the tool continues from where the
//! previous pass ended instead of travelling back to the start.

use crate::error::{ToolpathError, ToolpathResult};
use contourcam_core::Tool;
use contourcam_geometry::{CuttingDirection, Polyline};
use std::cell::OnceCell;

/// Two depths closer than this are the same step.
const DEPTH_EPSILON: f64 = 1e-9;

/// Most passes a single contour may be cut in.
pub const MAX_PASSES: usize = 10_000;

/// Which of the two traversal polylines a pass follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Traversal {
    /// The polyline in the configured cutting direction
    Forward,
    /// The reverse of the forward polyline
    Inverted,
}

/// One depth step of a contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pass {
    /// Cutting depth below the surface, positive
    pub depth: f64,
    pub traversal: Traversal,
}

/// Computes the sequence of passes for a contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassSequencer {
    depth_per_cut: f64,
}

impl PassSequencer {
    /// Creates a sequencer. `depth_per_cut` must be positive and finite.
    pub fn new(depth_per_cut: f64) -> ToolpathResult<Self> {
        if !(depth_per_cut.is_finite() && depth_per_cut > 0.0) {
            return Err(ToolpathError::InvalidDepthPerCut(depth_per_cut));
        }
        Ok(Self { depth_per_cut })
    }

    /// Creates a sequencer with the depth per cut of `tool`.
    pub fn from_tool(tool: &Tool) -> ToolpathResult<Self> {
        Self::new(tool.general.depth_per_cut)
    }

    pub fn depth_per_cut(&self) -> f64 {
        self.depth_per_cut
    }

    /// Depth steps down to `max_depth`.
    ///
    /// Steps are `depth_per_cut`, `2 * depth_per_cut`, ... with the last one
    /// clamped to `max_depth`. A non-positive or non-finite `max_depth` gives
    /// a single surface pass at depth zero. More than [`MAX_PASSES`] steps is
    /// an error.
    pub fn depths(&self, max_depth: f64) -> ToolpathResult<Vec<f64>> {
        if !max_depth.is_finite() || max_depth <= 0.0 {
            return Ok(vec![0.0]);
        }

        let count = ((max_depth - DEPTH_EPSILON) / self.depth_per_cut).ceil().max(1.0);
        if count > MAX_PASSES as f64 {
            return Err(ToolpathError::TooManyPasses {
                depth: max_depth,
                depth_per_cut: self.depth_per_cut,
            });
        }

        let count = count as usize;
        let mut depths: Vec<f64> = (1..count)
            .map(|step| step as f64 * self.depth_per_cut)
            .take_while(|depth| *depth < max_depth - DEPTH_EPSILON)
            .collect();
        depths.push(max_depth);
        Ok(depths)
    }

    /// Ordered passes for a contour.
    ///
    /// Closed contours cut forward are cut forward on every pass. Open
    /// contours, and closed contours cut backward, alternate forward and
    /// inverted traversals starting with forward.
    pub fn plan(
        &self,
        max_depth: f64,
        closed: bool,
        direction: CuttingDirection,
    ) -> ToolpathResult<Vec<Pass>> {
        let alternate = !closed || direction == CuttingDirection::Backward;
        Ok(self
            .depths(max_depth)?
            .into_iter()
            .enumerate()
            .map(|(index, depth)| Pass {
                depth,
                traversal: if alternate && index % 2 == 1 {
                    Traversal::Inverted
                } else {
                    Traversal::Forward
                },
            })
            .collect())
    }
}

/// The forward and inverted polylines of a contour for a cutting direction.
///
/// Forward is the polyline as stored when cutting forward and its inverse
/// when cutting backward. The inverse is computed on first use, so a closed
/// contour cut forward never builds it.
#[derive(Debug, Clone)]
pub struct TraversalPolylines<'a> {
    stored: &'a Polyline,
    direction: CuttingDirection,
    inverse: OnceCell<Polyline>,
}

impl<'a> TraversalPolylines<'a> {
    pub fn new(polyline: &'a Polyline, direction: CuttingDirection) -> Self {
        Self {
            stored: polyline,
            direction,
            inverse: OnceCell::new(),
        }
    }

    /// Polyline followed by a pass with `traversal`.
    pub fn polyline_for(&self, traversal: Traversal) -> &Polyline {
        match (traversal, self.direction) {
            (Traversal::Forward, CuttingDirection::Forward)
            | (Traversal::Inverted, CuttingDirection::Backward) => self.stored,
            _ => self.inverse.get_or_init(|| self.stored.inverse()),
        }
    }
}
