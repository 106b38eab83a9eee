use super::contain_2d::turn;
use super::{Isometry2, Point2, EPSILON};
use std::f64::consts::TAU;

/// Signed area of a closed polygon in the plane (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(poly: &[Point2]) -> f64 {
    let n = poly.len();
    let mut a = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        a += poly[i].x * poly[j].y - poly[j].x * poly[i].y;
    }
    a / 2.0
}

/// Tests counter-clockwise orientation via the signed area (zero-area
/// polygons count as counter-clockwise).
#[inline]
#[must_use]
pub fn is_ccw(poly: &[Point2]) -> bool {
    signed_area(poly) >= 0.0
}

/// Counter-clockwise test for a polygon already known to be convex: the
/// first turn whose magnitude exceeds [`EPSILON`] decides. All-collinear
/// input counts as counter-clockwise.
#[must_use]
pub fn is_convex_ccw(poly: &[Point2]) -> bool {
    let n = poly.len();
    if n < 3 {
        return true;
    }
    for i in 0..n {
        let z = turn(poly[i], poly[(i + 1) % n], poly[(i + 2) % n]);
        if z < -EPSILON {
            return true;
        }
        if z > EPSILON {
            return false;
        }
    }
    true
}

/// Reverses vertex order in place if the polygon is not counter-clockwise.
pub fn make_ccw(poly: &mut [Point2]) {
    if !is_ccw(poly) {
        poly.reverse();
    }
}

/// Reverses vertex order in place if the convex polygon is not
/// counter-clockwise, using the cheaper [`is_convex_ccw`] test.
pub fn make_convex_ccw(poly: &mut [Point2]) {
    if !is_convex_ccw(poly) {
        poly.reverse();
    }
}

/// Convexity test for a simple polygon.
///
/// Polygons with three or fewer vertices are convex by convention.
/// Otherwise the turn classification of the first vertex triple (left, or
/// within [`EPSILON`] of collinear) must be matched by every subsequent
/// triple.
#[must_use]
pub fn is_convex(poly: &[Point2]) -> bool {
    let n = poly.len();
    if n <= 3 {
        return true;
    }

    let first = turn(poly[0], poly[1], poly[2]) <= EPSILON;
    for i in 1..n {
        if first != (turn(poly[i], poly[(i + 1) % n], poly[(i + 2) % n]) <= EPSILON) {
            return false;
        }
    }
    true
}

/// Axis-aligned bounding box of a polygon as a min/max corner pair.
/// At least one vertex is required.
#[must_use]
pub fn bounding_box(poly: &[Point2]) -> (Point2, Point2) {
    let mut min = poly[0];
    let mut max = poly[0];

    for p in &poly[1..] {
        if p.x < min.x {
            min.x = p.x;
        } else if p.x > max.x {
            max.x = p.x;
        }
        if p.y < min.y {
            min.y = p.y;
        } else if p.y > max.y {
            max.y = p.y;
        }
    }
    (min, max)
}

/// Vertex average of a polygon. At least one vertex is required.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn centroid(poly: &[Point2]) -> Point2 {
    let mut c = Point2::new(0.0, 0.0);
    for p in poly {
        c.x += p.x;
        c.y += p.y;
    }
    let n = poly.len() as f64;
    Point2::new(c.x / n, c.y / n)
}

/// Fan triangulation of a convex polygon with `n` vertices: triangles
/// `(0, i + 1, i + 2)` for `i` in `0..n - 2`. Returns an empty list for
/// fewer than three vertices.
#[must_use]
pub fn triangulate_convex_fan(n: usize) -> Vec<[usize; 3]> {
    (0..n.saturating_sub(2)).map(|i| [0, i + 1, i + 2]).collect()
}

/// The three triangle corners as a polygon vertex list.
#[inline]
#[must_use]
pub fn triangle_as_polygon(a: Point2, b: Point2, c: Point2) -> [Point2; 3] {
    [a, b, c]
}

/// The four corners of an axis-aligned box as a counter-clockwise polygon.
#[inline]
#[must_use]
pub fn aabox_as_polygon(min: Point2, max: Point2) -> [Point2; 4] {
    [
        Point2::new(min.x, min.y),
        Point2::new(max.x, min.y),
        Point2::new(max.x, max.y),
        Point2::new(min.x, max.y),
    ]
}

/// Four corners as a polygon vertex list.
#[inline]
#[must_use]
pub fn quad_as_polygon(a: Point2, b: Point2, c: Point2, d: Point2) -> [Point2; 4] {
    [a, b, c, d]
}

/// Regular `n`-gon inscribed in the circle around `center`, starting at
/// angle zero and proceeding counter-clockwise.
///
/// Built by incremental rotation: one sine/cosine pair total, not one per
/// vertex.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn circle_as_polygon(center: Point2, r: f64, n: usize) -> Vec<Point2> {
    let theta = TAU / n as f64;
    let (sin_theta, cos_theta) = theta.sin_cos();
    let mut x = 1.0;
    let mut y = 0.0;

    let mut poly = Vec::with_capacity(n);
    for _ in 0..n {
        poly.push(Point2::new(center.x + r * x, center.y + r * y));
        let tmp = x;
        x = cos_theta * tmp - sin_theta * y;
        y = sin_theta * tmp + cos_theta * y;
    }
    poly
}

/// Index of the first vertex within distance `dtol` of `p`, if any.
#[must_use]
pub fn find_vertex(p: Point2, poly: &[Point2], dtol: f64) -> Option<usize> {
    poly.iter().position(|v| {
        let dx = v.x - p.x;
        let dy = v.y - p.y;
        dx * dx + dy * dy <= dtol * dtol
    })
}

/// Index of the edge whose endpoints match `a`-`b` within distance `dtol`,
/// if any. Both traversal directions are accepted; the returned index is
/// always the edge's lower vertex index in polygon order.
#[must_use]
pub fn find_edge(a: Point2, b: Point2, poly: &[Point2], dtol: f64) -> Option<usize> {
    let n = poly.len();
    let close = |v: Point2, p: Point2| {
        let dx = v.x - p.x;
        let dy = v.y - p.y;
        dx * dx + dy * dy <= dtol * dtol
    };

    for i in 0..n {
        if close(poly[i], a) {
            let j = (i + 1) % n;
            if close(poly[j], b) {
                return Some(i);
            }
            let j = (n + i - 1) % n;
            if close(poly[j], b) {
                return Some(j);
            }
        }
    }
    None
}

/// Tests whether the two polygons share an edge within distance `dtol`.
#[must_use]
pub fn have_common_edge(poly1: &[Point2], poly2: &[Point2], dtol: f64) -> bool {
    let n1 = poly1.len();
    for i in 0..n1 {
        let j = (i + 1) % n1;
        if find_edge(poly1[i], poly1[j], poly2, dtol).is_some() {
            return true;
        }
    }
    false
}

/// Applies a rigid transformation to every vertex in place.
pub fn apply_isometry(iso: &Isometry2, poly: &mut [Point2]) {
    for p in poly {
        *p = iso.transform_point(p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-10;

    fn ccw_square() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn signed_area_unit_square() {
        assert_relative_eq!(signed_area(&ccw_square()), 1.0, epsilon = TOL);
    }

    #[test]
    fn signed_area_flips_with_orientation() {
        let mut sq = ccw_square();
        let a = signed_area(&sq);
        sq.reverse();
        assert_relative_eq!(signed_area(&sq), -a, epsilon = TOL);
    }

    #[test]
    fn orientation_duality() {
        let mut sq = ccw_square();
        assert!(is_ccw(&sq));
        sq.reverse();
        assert!(!is_ccw(&sq));
    }

    #[test]
    fn make_ccw_normalizes() {
        let mut sq = ccw_square();
        sq.reverse();
        make_ccw(&mut sq);
        assert!(is_ccw(&sq));
        assert_relative_eq!(signed_area(&sq), 1.0, epsilon = TOL);
    }

    #[test]
    fn convex_ccw_fast_path() {
        let mut sq = ccw_square();
        assert!(is_convex_ccw(&sq));
        sq.reverse();
        assert!(!is_convex_ccw(&sq));
        make_convex_ccw(&mut sq);
        assert!(is_convex_ccw(&sq));
    }

    #[test]
    fn regular_ngons_are_convex() {
        for n in [3_usize, 5, 8, 17] {
            let poly = circle_as_polygon(Point2::new(2.0, -1.0), 1.5, n);
            assert_eq!(poly.len(), n);
            assert!(is_convex(&poly), "n={n}");
            assert!(is_ccw(&poly), "n={n}");
        }
    }

    #[test]
    fn reflex_vertex_breaks_convexity() {
        let mut poly = circle_as_polygon(Point2::new(0.0, 0.0), 1.0, 8);
        // Pull one vertex toward the center past the opposite chord.
        poly[3] = Point2::new(0.1, 0.0);
        assert!(!is_convex(&poly));
    }

    #[test]
    fn degenerate_polygons_are_convex() {
        assert!(is_convex(&[]));
        assert!(is_convex(&[Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]));
    }

    #[test]
    fn bounding_box_square() {
        let (min, max) = bounding_box(&ccw_square());
        assert!(min.x.abs() < TOL && min.y.abs() < TOL);
        assert!((max.x - 1.0).abs() < TOL && (max.y - 1.0).abs() < TOL);
    }

    #[test]
    fn centroid_of_regular_ngon_is_center() {
        let c = Point2::new(3.0, -2.0);
        let poly = circle_as_polygon(c, 2.0, 12);
        let g = centroid(&poly);
        assert_relative_eq!(g.x, c.x, epsilon = 1e-9);
        assert_relative_eq!(g.y, c.y, epsilon = 1e-9);
    }

    #[test]
    fn convex_fan_counts() {
        assert!(triangulate_convex_fan(2).is_empty());
        assert_eq!(triangulate_convex_fan(3), vec![[0, 1, 2]]);
        assert_eq!(triangulate_convex_fan(5).len(), 3);
    }

    #[test]
    fn fan_area_matches_polygon_area() {
        let poly = circle_as_polygon(Point2::new(0.0, 0.0), 1.0, 9);
        let total: f64 = triangulate_convex_fan(poly.len())
            .iter()
            .map(|t| signed_area(&[poly[t[0]], poly[t[1]], poly[t[2]]]).abs())
            .sum();
        assert_relative_eq!(total, signed_area(&poly), epsilon = 1e-9);
    }

    #[test]
    fn aabox_polygon_is_ccw() {
        let poly = aabox_as_polygon(Point2::new(0.0, 0.0), Point2::new(2.0, 1.0));
        assert!(is_ccw(&poly));
        assert_relative_eq!(signed_area(&poly), 2.0, epsilon = TOL);
    }

    #[test]
    fn vertex_and_edge_matching() {
        let sq = ccw_square();
        assert_eq!(find_vertex(Point2::new(1.0, 1.0), &sq, 1e-6), Some(2));
        assert_eq!(find_vertex(Point2::new(0.5, 0.5), &sq, 1e-6), None);

        // Forward and reversed edge direction both match.
        assert_eq!(
            find_edge(Point2::new(1.0, 0.0), Point2::new(1.0, 1.0), &sq, 1e-6),
            Some(1)
        );
        assert_eq!(
            find_edge(Point2::new(1.0, 1.0), Point2::new(1.0, 0.0), &sq, 1e-6),
            Some(1)
        );
        assert_eq!(
            find_edge(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0), &sq, 1e-6),
            None
        );
    }

    #[test]
    fn common_edge_between_adjacent_squares() {
        let a = ccw_square();
        let b: Vec<Point2> = ccw_square()
            .iter()
            .map(|p| Point2::new(p.x + 1.0, p.y))
            .collect();
        assert!(have_common_edge(&a, &b, 1e-6));

        let c: Vec<Point2> = ccw_square()
            .iter()
            .map(|p| Point2::new(p.x + 3.0, p.y))
            .collect();
        assert!(!have_common_edge(&a, &c, 1e-6));
    }

    #[test]
    fn isometry_preserves_shape() {
        let mut poly = ccw_square();
        let iso = Isometry2::new(nalgebra::Vector2::new(2.0, -1.0), std::f64::consts::FRAC_PI_2);
        apply_isometry(&iso, &mut poly);
        assert_relative_eq!(signed_area(&poly), 1.0, epsilon = TOL);
        let (min, max) = bounding_box(&poly);
        assert_relative_eq!(max.x - min.x, 1.0, epsilon = TOL);
        assert_relative_eq!(max.y - min.y, 1.0, epsilon = TOL);
    }
}
