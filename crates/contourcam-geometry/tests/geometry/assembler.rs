use contourcam_geometry::{Assembler, Bulge, Cleaner, Point, Polyline};

fn segment(from: (f64, f64), to: (f64, f64), tangent: f64) -> Polyline {
    Polyline::new(vec![Bulge::new(
        Point::new(from.0, from.1),
        Point::new(to.0, to.1),
        tangent,
    )])
    .unwrap()
}

#[test]
fn test_assemble_slot_from_lines_and_arcs() {
    let pieces = vec![
        segment((0.0, 0.0), (10.0, 0.0), 0.0),
        segment((10.0, 4.0), (0.0, 4.0), 0.0),
        segment((10.0, 0.0), (10.0, 4.0), 1.0),
        // Reversed end cap, slightly off.
        segment((0.0, 0.0002), (0.0, 4.0), -1.0),
    ];

    let assembled = Assembler::new(0.001).assemble(pieces);
    assert_eq!(assembled.len(), 1);

    let slot = &assembled[0];
    assert!(slot.is_closed());
    assert!(slot.is_contiguous(0.0));
    assert_eq!(slot.bulge_count(), 4);
    assert!(slot.signed_area() > 0.0);
}

#[test]
fn test_closed_inputs_untouched() {
    let closed = Polyline::from_points(
        &[Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)],
        true,
    )
    .unwrap();
    let open = segment((5.0, 5.0), (6.0, 6.0), 0.0);
    let assembled = Assembler::default().assemble(vec![closed.clone(), open.clone()]);
    assert_eq!(assembled, vec![closed, open]);
}

#[test]
fn test_assemble_then_clean() {
    let pieces = vec![
        segment((0.0, 0.0), (1.0, 0.0), 0.0),
        segment((1.0, 0.0), (2.0, 0.0), 0.0),
        segment((50.0, 0.0), (50.5, 0.0), 0.0),
    ];
    let assembled = Assembler::default().assemble(pieces);
    let cleaned = Cleaner::new(1.5, 0.0).clean(assembled);
    assert_eq!(cleaned.len(), 1);
    assert!((cleaned[0].length() - 2.0).abs() < 1e-12);
}

#[test]
fn test_nearly_closed_chain_stops_at_seam() {
    let pieces = vec![
        segment((0.0, 0.0), (10.0, 0.0), 0.0),
        segment((10.0, 0.0), (5.0, 5.0), 0.0),
        segment((5.0, 5.0), (0.0005, 0.0), 0.0),
        // Touches the seam of the triangle.
        segment((0.0, 0.0), (-10.0, 0.0), 0.0),
    ];

    let assembled = Assembler::new(0.001).assemble(pieces);
    assert_eq!(assembled.len(), 2);

    let triangle = &assembled[0];
    assert!(triangle.is_closed());
    assert_eq!(triangle.bulge_count(), 3);
    assert!(triangle.is_contiguous(0.0));

    let stray = &assembled[1];
    assert!(!stray.is_closed());
    assert_eq!(stray.bulge_count(), 1);
    assert_eq!(stray.end(), Point::new(-10.0, 0.0));
}
