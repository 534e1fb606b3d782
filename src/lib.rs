//! # ContourCAM
//!
//! Contour-parallel toolpath generation for 2D CNC cutting.
//!
//! ## Architecture
//!
//! ContourCAM is organized as a workspace with multiple crates:
//!
//! 1. **contourcam-core** - Configuration tree, path settings, configuration dump
//! 2. **contourcam-geometry** - Bulge polylines, offsetting, pocketing, cleanup
//! 3. **contourcam-toolpath** - Task model, pass sequencing, G-code emission
//! 4. **contourcam** - This facade, re-exporting the crates above
//!
//! ## Example
//!
//! ```rust
//! use contourcam::{
//!     Config, ExportOptions, Exporter, Layer, Path, Point, Polyline, Task,
//! };
//!
//! let config = Config::default();
//! let (_, tool) = config.first_tool().unwrap();
//! let (_, profile) = config.first_profile().unwrap();
//!
//! let line = Polyline::from_points(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)], false)
//!     .unwrap();
//! let path = Path::new(line, "line", profile.default_path);
//! let task = Task::new(vec![Layer::new("0", vec![path])]);
//!
//! let program = Exporter::new(tool, &profile.gcode, ExportOptions::default())
//!     .export_to_string(&task)
//!     .unwrap();
//! assert!(program.contains("G1 X10.000 Y0.000"));
//! ```

pub use contourcam_core::{
    config_dump, Config, ConfigError, ConfigResult, DxfImportSettings, GcodeProfile,
    ImportSettings, PathSettings, Profile, Tool, ToolGeneral,
};

pub use contourcam_geometry::{
    pocket, Assembler, Bulge, CavalierOffsetter, Circle, Cleaner, CurveOffsetter,
    CuttingDirection, GeometryError, GeometryResult, Orientation, Point, Polyline, Transform,
    Vector,
};

pub use contourcam_toolpath::{
    EmitReport, EmitterConfig, ExportOptions, ExportReport, Exporter, GcodeWriter,
    IssueResolution, Layer, Motion, MotionSink, MoveDirection, OffsetPath, Pass, PassSequencer,
    Path, PathId, SegmentIssue, Task, TaskListener, TaskListenerHandle, ToolpathEmitter,
    ToolpathError, ToolpathResult, Traversal, UnresolvedArcPolicy,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr, keeping stdout free for programs
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
