//! Per-path cutting settings.

use serde::{Deserialize, Serialize};

/// Cutting settings attached to every path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Feed rate for moves in the XY plane (mm/min)
    pub plane_feed_rate: f64,
    /// Feed rate for plunges along Z (mm/min)
    pub depth_feed_rate: f64,
    /// Spindle speed or laser power passed to the pre-cut command
    pub intensity: u32,
    /// Final cutting depth below the stock surface (mm, positive)
    pub depth: f64,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            plane_feed_rate: 600.0,
            depth_feed_rate: 100.0,
            intensity: 1000,
            depth: 0.0,
        }
    }
}

impl PathSettings {
    /// Creates path settings.
    pub fn new(plane_feed_rate: f64, depth_feed_rate: f64, intensity: u32, depth: f64) -> Self {
        Self {
            plane_feed_rate,
            depth_feed_rate,
            intensity,
            depth,
        }
    }

    /// Checks feed rates are positive and depth is a non-negative number.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.plane_feed_rate.is_finite() && self.plane_feed_rate > 0.0) {
            return Err(format!(
                "plane_feed_rate must be > 0, got {}",
                self.plane_feed_rate
            ));
        }
        if !(self.depth_feed_rate.is_finite() && self.depth_feed_rate > 0.0) {
            return Err(format!(
                "depth_feed_rate must be > 0, got {}",
                self.depth_feed_rate
            ));
        }
        if !(self.depth.is_finite() && self.depth >= 0.0) {
            return Err(format!("depth must be >= 0, got {}", self.depth));
        }
        Ok(())
    }
}
