//! Motion primitives and the sink they are issued to.

use contourcam_geometry::{Orientation, Point, Vector};
use std::io;

/// A single machine motion or tool action.
#[derive(Debug, Clone, PartialEq)]
pub enum Motion {
    /// Lift the tool to the retract height
    Retract,
    /// Rapid move in the plane at retract height
    Rapid { to: Point },
    /// Start the spindle or laser before cutting
    PreCut { intensity: u32 },
    /// Straight plunge to `z` (negative below the surface)
    Plunge { z: f64, feed_rate: f64 },
    /// Straight cut in the plane
    Linear { to: Point, feed_rate: f64 },
    /// Circular cut in the plane, `center` relative to the start of the arc
    Arc {
        direction: Orientation,
        to: Point,
        center: Vector,
        feed_rate: f64,
    },
    /// Stop the spindle or laser after cutting
    PostCut,
}

/// Downstream consumer of motions, typically a code generator.
pub trait MotionSink {
    /// Consumes one motion, in order.
    fn emit(&mut self, motion: &Motion) -> io::Result<()>;

    /// Consumes several motions, in order.
    fn emit_all(&mut self, motions: &[Motion]) -> io::Result<()> {
        for motion in motions {
            self.emit(motion)?;
        }
        Ok(())
    }
}

/// Collects motions in memory.
impl MotionSink for Vec<Motion> {
    fn emit(&mut self, motion: &Motion) -> io::Result<()> {
        self.push(motion.clone());
        Ok(())
    }

    fn emit_all(&mut self, motions: &[Motion]) -> io::Result<()> {
        self.extend_from_slice(motions);
        Ok(())
    }
}
