//! Toolpath emission.
//!
//! Walks the paths of a task in stack order and turns their final polylines
//! into motions. The tool goes through the same cycle for every polyline:
//!
//! ```text
//! Idle -> Positioned (rapid to start, pre-cut)
//!      -> Cutting(depth) for each pass (plunge, traverse)
//!      -> Retracted (retract, post-cut) -> Idle
//! ```
//!
//! The task is framed by one retract at the start and a rapid move back to
//! the origin at the end. Every path is built in a private buffer and only
//! handed to the sink once complete, so a path that fails leaves no partial
//! output and does not affect its siblings.

use crate::error::{ToolpathError, ToolpathResult};
use crate::model::{Path, PathId, Task};
use crate::motion::{Motion, MotionSink};
use crate::passes::{PassSequencer, Traversal, TraversalPolylines};
use contourcam_core::Tool;
use contourcam_geometry::{Bulge, Point};
use tracing::{debug, trace, warn};

/// What to do with an arc whose turn direction cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnresolvedArcPolicy {
    /// Cut a straight line to the arc's end point
    #[default]
    LinearFallback,
    /// Drop the whole path
    AbortPath,
}

/// How an unresolved arc was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueResolution {
    /// Cut as a straight line
    LinearFallback,
    /// The path was not emitted
    PathAborted,
}

/// A segment that could not be emitted as described.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentIssue {
    pub path: PathId,
    pub path_name: String,
    /// Index of the final polyline within the path
    pub polyline: usize,
    /// Index of the bulge within the stored polyline
    pub bulge: usize,
    pub start: Point,
    pub end: Point,
    pub resolution: IssueResolution,
}

impl From<&SegmentIssue> for ToolpathError {
    fn from(issue: &SegmentIssue) -> Self {
        ToolpathError::UnresolvedArc {
            path: issue.path_name.clone(),
            polyline: issue.polyline,
            bulge: issue.bulge,
        }
    }
}

/// Summary of an emission run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmitReport {
    /// Paths that produced motions
    pub paths_emitted: usize,
    /// Paths skipped because they or their layer are hidden
    pub paths_hidden: usize,
    /// Paths dropped under [`UnresolvedArcPolicy::AbortPath`] or for needing
    /// too many passes
    pub paths_aborted: Vec<PathId>,
    pub polylines: usize,
    pub passes: usize,
    pub motions: usize,
    pub issues: Vec<SegmentIssue>,
}

impl EmitReport {
    /// True when every segment was emitted as described.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Emitter settings, taken from the selected tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmitterConfig {
    pub depth_per_cut: f64,
    pub unresolved_arc_policy: UnresolvedArcPolicy,
}

impl EmitterConfig {
    pub fn from_tool(tool: &Tool) -> Self {
        Self {
            depth_per_cut: tool.general.depth_per_cut,
            unresolved_arc_policy: UnresolvedArcPolicy::default(),
        }
    }

    pub fn with_unresolved_arc_policy(mut self, policy: UnresolvedArcPolicy) -> Self {
        self.unresolved_arc_policy = policy;
        self
    }
}

/// Why a path was left out.
enum PathAbort {
    /// Unresolved arc under [`UnresolvedArcPolicy::AbortPath`]
    Arc(SegmentIssue),
    /// The path cannot be sequenced, e.g. too many passes
    Error(ToolpathError),
}

impl From<PathAbort> for ToolpathError {
    fn from(abort: PathAbort) -> Self {
        match abort {
            PathAbort::Arc(issue) => ToolpathError::from(&issue),
            PathAbort::Error(err) => err,
        }
    }
}

/// Motions of one path, ready to be sent.
struct PathToolpath {
    motions: Vec<Motion>,
    polylines: usize,
    passes: usize,
    issues: Vec<SegmentIssue>,
}

/// Turns paths into motion sequences.
#[derive(Debug, Clone)]
pub struct ToolpathEmitter {
    sequencer: PassSequencer,
    policy: UnresolvedArcPolicy,
}

impl ToolpathEmitter {
    pub fn new(config: EmitterConfig) -> ToolpathResult<Self> {
        Ok(Self {
            sequencer: PassSequencer::new(config.depth_per_cut)?,
            policy: config.unresolved_arc_policy,
        })
    }

    pub fn sequencer(&self) -> &PassSequencer {
        &self.sequencer
    }

    /// Emits every globally visible path of `task` in stack order.
    ///
    /// Paths aborted by the unresolved arc policy or needing too many passes
    /// are recorded in the report and skipped. Only sink failures stop the emission.
    pub fn emit_task(&self, task: &Task, sink: &mut dyn MotionSink) -> ToolpathResult<EmitReport> {
        let mut report = EmitReport::default();

        Self::send(sink, &[Motion::Retract], &mut report)?;

        for path in task.paths_in_stack() {
            if !task.is_globally_visible(path.id()) {
                trace!(path = %path.name(), "Skipping hidden path");
                report.paths_hidden += 1;
                continue;
            }

            match self.build_path(path) {
                Ok(toolpath) => Self::record(sink, toolpath, &mut report)?,
                Err(PathAbort::Arc(issue)) => {
                    warn!(
                        path = %issue.path_name,
                        polyline = issue.polyline,
                        bulge = issue.bulge,
                        "Unresolved arc orientation, path aborted"
                    );
                    report.paths_aborted.push(issue.path);
                    report.issues.push(issue);
                }
                Err(PathAbort::Error(err)) => {
                    warn!(path = %path.name(), error = %err, "Path aborted");
                    report.paths_aborted.push(path.id());
                }
            }
        }

        Self::send(
            sink,
            &[Motion::Rapid {
                to: Point::origin(),
            }],
            &mut report,
        )?;

        debug!(
            paths = report.paths_emitted,
            hidden = report.paths_hidden,
            aborted = report.paths_aborted.len(),
            motions = report.motions,
            "Emitted task"
        );
        Ok(report)
    }

    /// Emits a single path without the task framing.
    ///
    /// Under [`UnresolvedArcPolicy::AbortPath`] an unresolved arc is returned
    /// as [`ToolpathError::UnresolvedArc`] and nothing is sent. So is a depth
    /// needing more than [`MAX_PASSES`](crate::passes::MAX_PASSES) passes.
    pub fn emit_path(&self, path: &Path, sink: &mut dyn MotionSink) -> ToolpathResult<EmitReport> {
        let mut report = EmitReport::default();
        let toolpath = self.build_path(path).map_err(ToolpathError::from)?;
        Self::record(sink, toolpath, &mut report)?;
        Ok(report)
    }

    fn record(
        sink: &mut dyn MotionSink,
        toolpath: PathToolpath,
        report: &mut EmitReport,
    ) -> ToolpathResult<()> {
        for issue in &toolpath.issues {
            warn!(
                path = %issue.path_name,
                polyline = issue.polyline,
                bulge = issue.bulge,
                "Unresolved arc orientation, cutting a straight line"
            );
        }

        if !toolpath.motions.is_empty() {
            report.paths_emitted += 1;
        }
        report.polylines += toolpath.polylines;
        report.passes += toolpath.passes;
        report.issues.extend(toolpath.issues);
        Self::send(sink, &toolpath.motions, report)
    }

    fn send(
        sink: &mut dyn MotionSink,
        motions: &[Motion],
        report: &mut EmitReport,
    ) -> ToolpathResult<()> {
        for motion in motions {
            trace!(?motion, "Emit");
        }
        sink.emit_all(motions)?;
        report.motions += motions.len();
        Ok(())
    }

    /// Builds the motions of every final polyline of `path`.
    fn build_path(&self, path: &Path) -> Result<PathToolpath, PathAbort> {
        let settings = path.settings();
        let direction = path.cutting_direction();
        let mut toolpath = PathToolpath {
            motions: Vec::new(),
            polylines: 0,
            passes: 0,
            issues: Vec::new(),
        };

        for (index, polyline) in path.final_polylines().iter().enumerate() {
            for (bulge_index, bulge) in polyline.iter().enumerate() {
                if !is_unresolved(bulge) {
                    continue;
                }

                let mut issue = SegmentIssue {
                    path: path.id(),
                    path_name: path.name().to_string(),
                    polyline: index,
                    bulge: bulge_index,
                    start: bulge.start,
                    end: bulge.end,
                    resolution: IssueResolution::LinearFallback,
                };
                if self.policy == UnresolvedArcPolicy::AbortPath {
                    issue.resolution = IssueResolution::PathAborted;
                    return Err(PathAbort::Arc(issue));
                }
                toolpath.issues.push(issue);
            }

            let traversals = TraversalPolylines::new(polyline, direction);
            let plan = self
                .sequencer
                .plan(settings.depth, polyline.is_closed(), direction)
                .map_err(PathAbort::Error)?;
            let first = plan
                .first()
                .map_or(Traversal::Forward, |pass| pass.traversal);

            let motions = &mut toolpath.motions;
            motions.push(Motion::Rapid {
                to: traversals.polyline_for(first).start(),
            });
            motions.push(Motion::PreCut {
                intensity: settings.intensity,
            });

            for pass in &plan {
                motions.push(Motion::Plunge {
                    z: -pass.depth,
                    feed_rate: settings.depth_feed_rate,
                });
                motions.extend(
                    traversals
                        .polyline_for(pass.traversal)
                        .iter()
                        .map(|bulge| bulge_motion(bulge, settings.plane_feed_rate)),
                );
            }

            motions.push(Motion::Retract);
            motions.push(Motion::PostCut);

            toolpath.polylines += 1;
            toolpath.passes += plan.len();
        }

        debug!(
            path = %path.name(),
            polylines = toolpath.polylines,
            passes = toolpath.passes,
            motions = toolpath.motions.len(),
            "Built path toolpath"
        );
        Ok(toolpath)
    }
}

/// An arc whose circle has no turn direction.
fn is_unresolved(bulge: &Bulge) -> bool {
    !bulge.is_line()
        && bulge
            .to_circle()
            .and_then(|circle| circle.orientation())
            .is_none()
}

fn bulge_motion(bulge: &Bulge, feed_rate: f64) -> Motion {
    let arc = bulge
        .to_circle()
        .and_then(|circle| circle.orientation().map(|direction| (circle, direction)));

    match arc {
        Some((circle, direction)) => Motion::Arc {
            direction,
            to: bulge.end,
            center: circle.center - bulge.start,
            feed_rate,
        },
        None => Motion::Linear {
            to: bulge.end,
            feed_rate,
        },
    }
}
