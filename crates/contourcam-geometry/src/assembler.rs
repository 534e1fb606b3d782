//! Chaining of loose open polylines into longer contours.
//!
//! Imported drawings often describe one contour as many separate lines and
//! arcs. The assembler joins pieces whose end points meet within a tolerance,
//! inverting pieces where needed, and closes chains whose two ends meet.

use crate::polyline::Polyline;
use crate::Point;
use tracing::debug;

/// Greedy end-to-end chaining of polylines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assembler {
    tolerance: f64,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new(0.001)
    }
}

impl Assembler {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.abs(),
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn near(&self, a: Point, b: Point) -> bool {
        (a - b).norm() <= self.tolerance
    }

    /// Merges `polylines` into the longest chains found greedily.
    ///
    /// Closed inputs are returned as they are. Joined end points are snapped
    /// so the resulting chains are exactly contiguous.
    pub fn assemble(&self, polylines: Vec<Polyline>) -> Vec<Polyline> {
        let input_count = polylines.len();
        let (mut assembled, mut open): (Vec<Polyline>, Vec<Polyline>) = polylines
            .into_iter()
            .partition(|polyline| polyline.is_closed());

        open.reverse();
        while let Some(mut chain) = open.pop() {
            while let Some(index) = self.extend_chain(&mut chain, &open) {
                open.remove(index);
            }

            if chain.bulge_count() > 1 && self.near(chain.end(), chain.start()) {
                let start = chain.start();
                if let Some(last) = chain.bulges_mut().last_mut() {
                    last.end = start;
                }
            }
            assembled.push(chain);
        }

        debug!(
            input = input_count,
            output = assembled.len(),
            tolerance = self.tolerance,
            "Assembled polylines"
        );
        assembled
    }

    /// Attaches the first matching piece to either end of `chain` and returns
    /// its index in `pieces`. A chain whose ends already meet takes no more
    /// pieces.
    fn extend_chain(&self, chain: &mut Polyline, pieces: &[Polyline]) -> Option<usize> {
        if chain.is_closed() || (chain.bulge_count() > 1 && self.near(chain.end(), chain.start()))
        {
            return None;
        }

        for (index, piece) in pieces.iter().enumerate().rev() {
            let candidate = if self.near(chain.end(), piece.start()) {
                Some((piece.clone(), true))
            } else if self.near(chain.end(), piece.end()) {
                Some((piece.inverse(), true))
            } else if self.near(chain.start(), piece.end()) {
                Some((piece.clone(), false))
            } else if self.near(chain.start(), piece.start()) {
                Some((piece.inverse(), false))
            } else {
                None
            };

            if let Some((mut piece, append)) = candidate {
                if append {
                    let end = chain.end();
                    piece.bulges_mut()[0].start = end;
                    chain.append(&piece);
                } else {
                    let start = chain.start();
                    if let Some(last) = piece.bulges_mut().last_mut() {
                        last.end = start;
                    }
                    piece.append(chain);
                    *chain = piece;
                }
                return Some(index);
            }
        }
        None
    }
}
