use contourcam_core::PathSettings;
use contourcam_geometry::{Bulge, Cleaner, CuttingDirection, Orientation, Point, Polyline, Vector};
use contourcam_toolpath::{
    EmitterConfig, IssueResolution, Layer, Motion, MotionSink, Path, Task, ToolpathEmitter,
    ToolpathError, UnresolvedArcPolicy,
};
use std::io;

fn settings(depth: f64) -> PathSettings {
    PathSettings::new(600.0, 100.0, 1000, depth)
}

fn emitter(depth_per_cut: f64) -> ToolpathEmitter {
    ToolpathEmitter::new(EmitterConfig {
        depth_per_cut,
        unresolved_arc_policy: UnresolvedArcPolicy::LinearFallback,
    })
    .unwrap()
}

fn line_path(depth: f64) -> Path {
    let line = Polyline::from_points(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)], false)
        .unwrap();
    Path::new(line, "line", settings(depth))
}

fn square_path(depth: f64) -> Path {
    let square = Polyline::from_points(
        &[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ],
        true,
    )
    .unwrap();
    Path::new(square, "square", settings(depth))
}

/// Open path whose middle bulge is an arc with a zero chord.
fn degenerate_arc_path() -> Path {
    let polyline = Polyline::new(vec![
        Bulge::line(Point::new(0.0, 0.0), Point::new(5.0, 0.0)),
        Bulge::new(Point::new(5.0, 0.0), Point::new(5.0, 0.0), 0.5),
        Bulge::line(Point::new(5.0, 0.0), Point::new(5.0, 5.0)),
    ])
    .unwrap();
    Path::new(polyline, "broken", settings(1.0))
}

fn task(paths: Vec<Path>) -> Task {
    Task::new(vec![Layer::new("0", paths)])
}

fn linear_targets(motions: &[Motion]) -> Vec<Point> {
    motions
        .iter()
        .filter_map(|motion| match motion {
            Motion::Linear { to, .. } => Some(*to),
            _ => None,
        })
        .collect()
}

#[test]
fn test_single_line_sequence() {
    let mut motions = Vec::new();
    let report = emitter(2.0)
        .emit_task(&task(vec![line_path(2.0)]), &mut motions)
        .unwrap();

    assert_eq!(
        motions,
        vec![
            Motion::Retract,
            Motion::Rapid {
                to: Point::new(0.0, 0.0)
            },
            Motion::PreCut { intensity: 1000 },
            Motion::Plunge {
                z: -2.0,
                feed_rate: 100.0
            },
            Motion::Linear {
                to: Point::new(10.0, 0.0),
                feed_rate: 600.0
            },
            Motion::Retract,
            Motion::PostCut,
            Motion::Rapid {
                to: Point::origin()
            },
        ]
    );
    assert_eq!(report.paths_emitted, 1);
    assert_eq!(report.passes, 1);
    assert_eq!(report.motions, motions.len());
    assert!(report.is_clean());
}

#[test]
fn test_open_contour_alternates_passes() {
    let mut motions = Vec::new();
    emitter(1.0)
        .emit_task(&task(vec![line_path(3.0)]), &mut motions)
        .unwrap();

    let plunges: Vec<f64> = motions
        .iter()
        .filter_map(|motion| match motion {
            Motion::Plunge { z, .. } => Some(*z),
            _ => None,
        })
        .collect();
    assert_eq!(plunges, vec![-1.0, -2.0, -3.0]);
    assert_eq!(
        linear_targets(&motions),
        vec![
            Point::new(10.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0)
        ]
    );
}

#[test]
fn test_closed_forward_repeats_direction() {
    let mut motions = Vec::new();
    emitter(1.0)
        .emit_task(&task(vec![square_path(2.0)]), &mut motions)
        .unwrap();

    let targets = linear_targets(&motions);
    assert_eq!(targets.len(), 8);
    assert_eq!(targets[..4], targets[4..]);
    assert_eq!(targets[0], Point::new(10.0, 0.0));
}

#[test]
fn test_closed_backward_alternates() {
    let mut path = square_path(2.0);
    path.set_cutting_direction(CuttingDirection::Backward);

    let mut motions = Vec::new();
    emitter(1.0)
        .emit_task(&task(vec![path]), &mut motions)
        .unwrap();

    let targets = linear_targets(&motions);
    // First pass follows the inverse, second pass the stored polyline.
    assert_eq!(targets[0], Point::new(0.0, 10.0));
    assert_eq!(targets[4], Point::new(10.0, 0.0));
}

#[test]
fn test_open_backward_starts_at_end() {
    let mut path = line_path(1.0);
    path.set_cutting_direction(CuttingDirection::Backward);

    let mut motions = Vec::new();
    emitter(1.0)
        .emit_task(&task(vec![path]), &mut motions)
        .unwrap();

    assert_eq!(
        motions[1],
        Motion::Rapid {
            to: Point::new(10.0, 0.0)
        }
    );
    assert_eq!(linear_targets(&motions), vec![Point::new(0.0, 0.0)]);
}

#[test]
fn test_arcs_carry_relative_center() {
    let disc = Polyline::new(vec![
        Bulge::new(Point::new(10.0, 0.0), Point::new(-10.0, 0.0), 1.0),
        Bulge::new(Point::new(-10.0, 0.0), Point::new(10.0, 0.0), 1.0),
    ])
    .unwrap();
    let path = Path::new(disc, "disc", settings(1.0));

    let mut motions = Vec::new();
    emitter(1.0).emit_path(&path, &mut motions).unwrap();

    let arcs: Vec<(Orientation, Vector)> = motions
        .iter()
        .filter_map(|motion| match motion {
            Motion::Arc {
                direction, center, ..
            } => Some((*direction, *center)),
            _ => None,
        })
        .collect();
    assert_eq!(arcs.len(), 2);
    assert_eq!(arcs[0].0, Orientation::Ccw);
    assert!((arcs[0].1 - Vector::new(-10.0, 0.0)).norm() < 1e-9);
    assert!((arcs[1].1 - Vector::new(10.0, 0.0)).norm() < 1e-9);
}

#[test]
fn test_path_without_final_polylines_emits_nothing() {
    let mut path = square_path(1.0);
    assert_eq!(path.offset(50.0, &Cleaner::default()), 0);

    let mut motions = Vec::new();
    let report = emitter(1.0).emit_path(&path, &mut motions).unwrap();
    assert!(motions.is_empty());
    assert_eq!(report.paths_emitted, 0);

    let mut motions = Vec::new();
    emitter(1.0)
        .emit_task(&task(vec![path]), &mut motions)
        .unwrap();
    assert_eq!(
        motions,
        vec![
            Motion::Retract,
            Motion::Rapid {
                to: Point::origin()
            }
        ]
    );
}

#[test]
fn test_hidden_paths_are_skipped() {
    let visible = line_path(1.0);
    let mut hidden = square_path(1.0);
    hidden.set_visible(false);
    let other_layer = Layer::new("hidden layer", vec![square_path(1.0)]);

    let mut task = Task::new(vec![Layer::new("0", vec![visible, hidden]), other_layer]);
    assert!(task.set_layer_visible(1, false));

    let mut motions = Vec::new();
    let report = emitter(1.0).emit_task(&task, &mut motions).unwrap();
    assert_eq!(report.paths_emitted, 1);
    assert_eq!(report.paths_hidden, 2);
    assert_eq!(linear_targets(&motions), vec![Point::new(10.0, 0.0)]);
}

#[test]
fn test_unresolved_arc_linear_fallback() {
    let path = degenerate_arc_path();
    let id = path.id();

    let mut motions = Vec::new();
    let report = emitter(1.0)
        .emit_task(&task(vec![path]), &mut motions)
        .unwrap();

    assert_eq!(
        linear_targets(&motions),
        vec![
            Point::new(5.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(5.0, 5.0)
        ]
    );
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].path, id);
    assert_eq!(report.issues[0].bulge, 1);
    assert_eq!(report.issues[0].resolution, IssueResolution::LinearFallback);
    assert!(report.paths_aborted.is_empty());
}

#[test]
fn test_unresolved_arc_aborts_only_its_path() {
    let broken = degenerate_arc_path();
    let broken_id = broken.id();
    let task = task(vec![broken, line_path(1.0)]);

    let emitter = ToolpathEmitter::new(
        EmitterConfig {
            depth_per_cut: 1.0,
            unresolved_arc_policy: UnresolvedArcPolicy::LinearFallback,
        }
        .with_unresolved_arc_policy(UnresolvedArcPolicy::AbortPath),
    )
    .unwrap();

    let mut motions = Vec::new();
    let report = emitter.emit_task(&task, &mut motions).unwrap();
    assert_eq!(report.paths_aborted, vec![broken_id]);
    assert_eq!(report.paths_emitted, 1);
    assert_eq!(report.issues[0].resolution, IssueResolution::PathAborted);
    assert_eq!(linear_targets(&motions), vec![Point::new(10.0, 0.0)]);

    let mut motions = Vec::new();
    let err = emitter
        .emit_path(&degenerate_arc_path(), &mut motions)
        .unwrap_err();
    assert!(matches!(
        err,
        ToolpathError::UnresolvedArc {
            polyline: 0,
            bulge: 1,
            ..
        }
    ));
    assert!(motions.is_empty());
}

#[test]
fn test_invalid_depth_per_cut_is_rejected() {
    let result = ToolpathEmitter::new(EmitterConfig {
        depth_per_cut: 0.0,
        unresolved_arc_policy: UnresolvedArcPolicy::default(),
    });
    assert!(matches!(result, Err(ToolpathError::InvalidDepthPerCut(_))));
}

struct FailingSink;

impl MotionSink for FailingSink {
    fn emit(&mut self, _motion: &Motion) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }
}

#[test]
fn test_sink_failure_propagates() {
    let result = emitter(1.0).emit_task(&task(vec![line_path(1.0)]), &mut FailingSink);
    assert!(matches!(result, Err(ToolpathError::Io(_))));
}

#[test]
fn test_excessive_depth_aborts_only_its_path() {
    let mut deep = line_path(1.0);
    deep.settings_mut().depth = 1e17;
    let deep_id = deep.id();
    let task = task(vec![deep, square_path(1.0)]);

    let mut motions = Vec::new();
    let report = emitter(1.0).emit_task(&task, &mut motions).unwrap();
    assert_eq!(report.paths_aborted, vec![deep_id]);
    assert_eq!(report.paths_emitted, 1);
    assert!(report.is_clean());
    assert_eq!(linear_targets(&motions).len(), 4);

    let mut motions = Vec::new();
    let err = emitter(1.0)
        .emit_path(task.path(deep_id).unwrap(), &mut motions)
        .unwrap_err();
    assert!(matches!(err, ToolpathError::TooManyPasses { .. }));
    assert!(motions.is_empty());
}
