use contourcam_geometry::{Bulge, Orientation, Point, Polyline};
use proptest::prelude::*;

fn coordinate() -> impl Strategy<Value = f64> {
    -1000.0..1000.0f64
}

fn open_polyline() -> impl Strategy<Value = Polyline> {
    (
        prop::collection::vec((coordinate(), coordinate()), 2..12),
        prop::collection::vec(-2.0..2.0f64, 12),
    )
        .prop_map(|(points, tangents)| {
            let points: Vec<Point> = points.into_iter().map(|(x, y)| Point::new(x, y)).collect();
            let bulges = points
                .windows(2)
                .zip(tangents)
                .map(|(pair, tangent)| Bulge::new(pair[0], pair[1], tangent))
                .collect();
            Polyline::new(bulges).unwrap()
        })
}

/// Star-shaped polygon around the origin, so it never self-intersects.
fn closed_polygon() -> impl Strategy<Value = Polyline> {
    prop::collection::vec(1.0..100.0f64, 3..16).prop_map(|radii| {
        let count = radii.len() as f64;
        let points: Vec<Point> = radii
            .iter()
            .enumerate()
            .map(|(i, radius)| {
                let angle = std::f64::consts::TAU * i as f64 / count;
                Point::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect();
        Polyline::from_points(&points, true).unwrap()
    })
}

proptest! {
    #[test]
    fn prop_invert_twice_is_identity(polyline in open_polyline()) {
        let mut twice = polyline.clone();
        twice.invert().invert();
        prop_assert_eq!(twice, polyline);
    }

    #[test]
    fn prop_inverse_flips_orientation(polygon in closed_polygon()) {
        let orientation = polygon.orientation().unwrap();
        prop_assert_eq!(orientation, Orientation::Ccw);
        prop_assert_eq!(polygon.inverse().orientation().unwrap(), orientation.opposite());
    }

    #[test]
    fn prop_inverse_keeps_length(polyline in open_polyline()) {
        let difference = (polyline.length() - polyline.inverse().length()).abs();
        prop_assert!(difference <= 1e-9 * polyline.length().max(1.0));
    }

    #[test]
    fn prop_point_offset_is_identity(x in coordinate(), y in coordinate(), margin in -50.0..50.0f64) {
        let point = Polyline::point(Point::new(x, y));
        prop_assert_eq!(point.offsetted(margin), vec![point]);
    }
}
