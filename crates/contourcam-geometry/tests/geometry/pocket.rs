use contourcam_geometry::{pocket, GeometryError, Point, Polyline};

fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Polyline {
    Polyline::from_points(
        &[
            Point::new(x, y),
            Point::new(x + width, y),
            Point::new(x + width, y + height),
            Point::new(x, y + height),
        ],
        true,
    )
    .unwrap()
}

#[test]
fn test_pocket_square_levels() {
    let border = rectangle(0.0, 0.0, 10.0, 10.0);
    let loops = pocket(&border, &[], 1.5).unwrap();

    // Offsets at 1.5, 3 and 4.5 leave squares of 7, 4 and 1.
    assert_eq!(loops.len(), 3);
    assert!((loops[0].signed_area() - 49.0).abs() < 1e-6);
    assert!((loops[2].signed_area() - 1.0).abs() < 1e-6);
    assert!(loops.iter().all(Polyline::is_closed));
}

#[test]
fn test_pocket_accepts_cw_border() {
    let border = rectangle(0.0, 0.0, 10.0, 10.0).inverse();
    let loops = pocket(&border, &[], 1.5).unwrap();
    assert_eq!(loops.len(), 3);
    assert!(loops[0].signed_area() > 0.0);
}

#[test]
fn test_pocket_with_island() {
    let border = rectangle(0.0, 0.0, 20.0, 20.0);
    let island = rectangle(8.0, 8.0, 4.0, 4.0);
    let loops = pocket(&border, &[island], 1.0).unwrap();

    // The first level has the shrunk border and the grown island.
    assert!(loops.len() >= 2);
    let first_island = loops
        .iter()
        .find(|polyline| polyline.signed_area() < 0.0)
        .unwrap();
    assert!(first_island.signed_area().abs() > 16.0);
}

#[test]
fn test_pocket_rejects_bad_input() {
    let border = rectangle(0.0, 0.0, 10.0, 10.0);
    assert_eq!(
        pocket(&border, &[], 0.0),
        Err(GeometryError::InvalidDistance {
            name: "radius",
            value: 0.0
        })
    );

    let open = Polyline::from_points(&[Point::new(0.0, 0.0), Point::new(5.0, 0.0)], false)
        .unwrap();
    assert_eq!(
        pocket(&open, &[], 1.0),
        Err(GeometryError::OpenPolyline("pocket"))
    );
    assert_eq!(
        pocket(&border, &[open], 1.0),
        Err(GeometryError::OpenPolyline("pocket"))
    );
}

#[test]
fn test_pocket_too_small_is_empty() {
    let border = rectangle(0.0, 0.0, 1.0, 1.0);
    assert!(pocket(&border, &[], 2.0).unwrap().is_empty());
}
