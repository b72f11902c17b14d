use crate::constants::geometry::{EDGE_EPSILON, MIN_VERTICES};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Ray-casting point-in-polygon test
///
/// The polygon is closed implicitly (last vertex connects to the first).
/// `EDGE_EPSILON` is added to every edge's y-span before dividing, which
/// avoids division by zero on horizontal edges at the cost of exactness on
/// boundaries. Observed boundary behavior on an axis-aligned square: points
/// on the left edge count as inside, points on the right edge as outside.
/// Polygons with fewer than three vertices contain nothing.
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    if polygon.len() < MIN_VERTICES {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let vi = polygon[i];
        let vj = polygon[j];
        if (vi.y > point.y) != (vj.y > point.y) {
            let intersect_x = (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y + EDGE_EPSILON) + vi.x;
            if point.x < intersect_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// First candidate whose polygon contains `point`, in iteration order
/// Overlapping polygons are not z-ordered: earlier candidates win.
pub fn first_hit<'a, T, I, F>(candidates: I, point: Point, polygon_of: F) -> Option<&'a T>
where
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> &[Point],
    T: 'a,
{
    candidates
        .into_iter()
        .find(|candidate| point_in_polygon(point, polygon_of(*candidate)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn square() -> Vec<Point> {
        poly(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)])
    }

    #[test]
    fn test_square_inside_and_outside() {
        let sq = square();
        assert!(point_in_polygon(Point::new(5.0, 5.0), &sq));
        assert!(!point_in_polygon(Point::new(15.0, 15.0), &sq));
        assert!(!point_in_polygon(Point::new(-1.0, 5.0), &sq));
        assert!(!point_in_polygon(Point::new(5.0, -0.5), &sq));
    }

    #[test]
    fn test_square_boundary_behavior() {
        let sq = square();
        // Left edge included, right edge excluded
        assert!(point_in_polygon(Point::new(0.0, 5.0), &sq));
        assert!(!point_in_polygon(Point::new(10.0, 5.0), &sq));
    }

    #[test]
    fn test_degenerate_polygons() {
        assert!(!point_in_polygon(Point::new(0.0, 0.0), &[]));
        assert!(!point_in_polygon(Point::new(0.0, 0.0), &poly(&[(0.0, 0.0)])));
        assert!(!point_in_polygon(
            Point::new(0.5, 0.0),
            &poly(&[(0.0, 0.0), (1.0, 0.0)])
        ));
    }

    #[test]
    fn test_explicitly_closed_polygon() {
        // Repeating the first vertex adds a zero-length edge only
        let closed = poly(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)]);
        assert!(point_in_polygon(Point::new(5.0, 5.0), &closed));
        assert!(!point_in_polygon(Point::new(15.0, 5.0), &closed));
    }

    #[test]
    fn test_non_convex_polygon() {
        // U shape opening upward; the notch spans x 4..6, y 4..10
        let u = poly(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (6.0, 10.0),
            (6.0, 4.0),
            (4.0, 4.0),
            (4.0, 10.0),
            (0.0, 10.0),
        ]);
        assert!(point_in_polygon(Point::new(2.0, 8.0), &u));
        assert!(point_in_polygon(Point::new(8.0, 8.0), &u));
        assert!(point_in_polygon(Point::new(5.0, 2.0), &u));
        assert!(!point_in_polygon(Point::new(5.0, 8.0), &u));
    }

    #[test]
    fn test_triangle_and_far_points() {
        let tri = poly(&[(0.0, 0.0), (100.0, 0.0), (50.0, 80.0)]);
        assert!(point_in_polygon(Point::new(50.0, 30.0), &tri));
        assert!(point_in_polygon(Point::new(20.0, 10.0), &tri));
        for far in [(-1e6, 0.0), (1e6, 1e6), (50.0, -1e6), (50.0, 1e6)] {
            assert!(!point_in_polygon(Point::new(far.0, far.1), &tri));
        }
    }

    #[test]
    fn test_first_hit_prefers_earlier_candidate() {
        let candidates = vec![
            ("small", poly(&[(0.0, 0.0), (0.0, 5.0), (5.0, 5.0), (5.0, 0.0)])),
            ("big", poly(&[(0.0, 0.0), (0.0, 20.0), (20.0, 20.0), (20.0, 0.0)])),
        ];

        let hit = first_hit(&candidates, Point::new(2.0, 2.0), |c| c.1.as_slice());
        assert_eq!(hit.map(|c| c.0), Some("small"));

        let hit = first_hit(&candidates, Point::new(15.0, 15.0), |c| c.1.as_slice());
        assert_eq!(hit.map(|c| c.0), Some("big"));

        assert!(first_hit(&candidates, Point::new(30.0, 30.0), |c| c.1.as_slice()).is_none());
    }
}
