//! # ContourCAM Toolpath
//!
//! Turns the contours of a task into a machine program.
//!
//! ## Pipeline
//!
//! 1. **Model**: paths grouped in layers, cut in stack order, with optional
//!    cutter compensation or pocketing cached per path
//! 2. **Pass sequencing**: depth steps and traversal direction per pass
//! 3. **Emission**: motions (rapid, plunge, line, arc, retract, cut actions)
//!    issued to a [`MotionSink`]
//! 4. **G-code**: the fixed profile writer and the [`Exporter`] framing the
//!    program with the profile header, footer and an optional settings dump

pub mod emitter;
pub mod error;
pub mod exporter;
pub mod gcode;
pub mod model;
pub mod motion;
pub mod passes;

pub use emitter::{
    EmitReport, EmitterConfig, IssueResolution, SegmentIssue, ToolpathEmitter,
    UnresolvedArcPolicy,
};
pub use error::{ToolpathError, ToolpathResult};
pub use exporter::{ExportOptions, ExportReport, Exporter};
pub use gcode::GcodeWriter;
pub use model::{
    Layer, MoveDirection, OffsetPath, Path, PathId, Task, TaskListener, TaskListenerHandle,
};
pub use motion::{Motion, MotionSink};
pub use passes::{Pass, PassSequencer, Traversal, TraversalPolylines, MAX_PASSES};
