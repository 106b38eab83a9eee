use super::intersect_2d::{intersect_polygons, intersect_segment_polygon};
use super::Point2;

/// Signed turn of the triple `p0`, `p1`, `p2`: negative for a left
/// (counter-clockwise) turn, positive for a right turn, zero for collinear.
#[inline]
#[must_use]
pub fn turn(p0: Point2, p1: Point2, p2: Point2) -> f64 {
    (p2.x - p0.x) * (p1.y - p0.y) - (p1.x - p0.x) * (p2.y - p0.y)
}

/// Tests whether `p` lies on or to the left of the directed line `p0`-`p1`.
#[inline]
#[must_use]
pub fn is_point_left_of_line(p: Point2, p0: Point2, p1: Point2) -> bool {
    turn(p0, p1, p) <= 0.0
}

/// Point-in-triangle test: `p` must be left of all three directed edges of
/// the counter-clockwise triangle `a`, `b`, `c`. Boundary points count as
/// inside.
#[inline]
#[must_use]
pub fn is_point_inside_triangle(p: Point2, a: Point2, b: Point2, c: Point2) -> bool {
    is_point_left_of_line(p, a, b) && is_point_left_of_line(p, b, c) && is_point_left_of_line(p, c, a)
}

/// Tests whether `p` lies inside the closed axis-aligned box `min`-`max`.
#[inline]
#[must_use]
pub fn is_point_inside_aabox(p: Point2, min: Point2, max: Point2) -> bool {
    p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
}

/// Tests whether `p` lies inside the closed disc around `center`.
#[inline]
#[must_use]
pub fn is_point_inside_circle(p: Point2, center: Point2, r: f64) -> bool {
    let dx = center.x - p.x;
    let dy = center.y - p.y;
    dx * dx + dy * dy <= r * r
}

/// Point-in-convex-polygon test: `p` must be left of every directed edge.
///
/// The polygon must be counter-clockwise; [`make_convex_ccw`] normalizes
/// orientation when it is not known.
///
/// [`make_convex_ccw`]: super::polygon_2d::make_convex_ccw
#[must_use]
pub fn is_point_inside_convex_polygon(p: Point2, poly: &[Point2]) -> bool {
    let n = poly.len();
    for i in 0..n.saturating_sub(1) {
        if !is_point_left_of_line(p, poly[i], poly[i + 1]) {
            return false;
        }
    }
    is_point_left_of_line(p, poly[n - 1], poly[0])
}

/// Point-in-polygon test for arbitrary simple polygons.
///
/// Triangles get the direct three-edge test. Larger polygons use a two-sided
/// crossing count: the horizontal ray through `p` is traced toward both +x
/// and -x, and the two parities are combined — disagreement (the point sits
/// on an edge) counts as inside, as does exact coincidence with a vertex.
#[allow(clippy::float_cmp)]
#[must_use]
pub fn is_point_inside_polygon(p: Point2, poly: &[Point2]) -> bool {
    let n = poly.len();
    if n == 3 {
        return is_point_inside_triangle(p, poly[0], poly[1], poly[2]);
    }

    let mut rcross = 0_u32;
    let mut lcross = 0_u32;
    let mut x = 0.0;

    for i in 0..n {
        if poly[i].x == p.x && poly[i].y == p.y {
            return true;
        }

        let i1 = (i + n - 1) % n;

        let testr = (poly[i].y > p.y) != (poly[i1].y > p.y);
        let testl = (poly[i].y < p.y) != (poly[i1].y < p.y);

        if testr || testl {
            x = (poly[i].x * poly[i1].y - poly[i1].x * poly[i].y
                + p.y * (poly[i1].x - poly[i].x))
                / (poly[i1].y - poly[i].y);
        }

        if testr && x > p.x {
            rcross += 1;
        }
        if testl && x < p.x {
            lcross += 1;
        }
    }

    if (rcross & 1) != (lcross & 1) {
        return true;
    }
    (rcross & 1) == 1
}

/// Tests whether the first box lies entirely inside the second.
#[inline]
#[must_use]
pub fn is_aabox_inside_aabox(min: Point2, max: Point2, min2: Point2, max2: Point2) -> bool {
    min.x >= min2.x && max.x <= max2.x && min.y >= min2.y && max.y <= max2.y
}

/// Tests whether every vertex of `poly` lies inside the box `min`-`max`.
#[must_use]
pub fn is_polygon_inside_aabox(poly: &[Point2], min: Point2, max: Point2) -> bool {
    poly.iter().all(|&p| is_point_inside_aabox(p, min, max))
}

/// Tests whether every vertex of `poly1` lies inside the convex polygon
/// `poly2`. Vertex containment is sufficient for a convex container.
#[must_use]
pub fn is_polygon_inside_convex_polygon(poly1: &[Point2], poly2: &[Point2]) -> bool {
    poly1.iter().all(|&p| is_point_inside_convex_polygon(p, poly2))
}

/// Tests whether `poly1` lies inside the simple polygon `poly2`.
///
/// All vertices of `poly1` must be inside `poly2`; with `check_intersection`
/// the boundaries must additionally not cross (a concave container can
/// swallow every vertex while an edge still pokes out). Callers that already
/// know the boundaries are disjoint pass `false` to skip the quadratic
/// recheck.
#[must_use]
pub fn is_polygon_inside_polygon(poly1: &[Point2], poly2: &[Point2], check_intersection: bool) -> bool {
    if !poly1.iter().all(|&p| is_point_inside_polygon(p, poly2)) {
        return false;
    }
    !check_intersection || !intersect_polygons(poly1, poly2)
}

/// Tests whether every vertex of `poly` lies inside the closed disc.
#[must_use]
pub fn is_polygon_inside_circle(poly: &[Point2], center: Point2, r: f64) -> bool {
    poly.iter().all(|&p| is_point_inside_circle(p, center, r))
}

/// Overlap test for two closed axis-aligned boxes.
#[inline]
#[must_use]
pub fn collision_aaboxes(min1: Point2, max1: Point2, min2: Point2, max2: Point2) -> bool {
    !(max2.x < min1.x || max1.x < min2.x || max2.y < min1.y || max1.y < min2.y)
}

/// Tests whether segment `p0`-`p1` touches the convex polygon: an endpoint
/// inside, or an edge crossing.
#[must_use]
pub fn collision_segment_convex_polygon(p0: Point2, p1: Point2, poly: &[Point2]) -> bool {
    is_point_inside_convex_polygon(p0, poly)
        || is_point_inside_convex_polygon(p1, poly)
        || intersect_segment_polygon(p0, p1, poly)
}

/// Tests whether segment `p0`-`p1` touches the simple polygon.
#[must_use]
pub fn collision_segment_polygon(p0: Point2, p1: Point2, poly: &[Point2]) -> bool {
    is_point_inside_polygon(p0, poly)
        || is_point_inside_polygon(p1, poly)
        || intersect_segment_polygon(p0, p1, poly)
}

/// Overlap test for two convex polygons.
///
/// Checks the first vertex of each against the other, then falls back to the
/// edge-intersection sweep. A single vertex suffices: full containment puts
/// every vertex (in particular the first) inside, and partial overlap is
/// caught by the edge test.
#[must_use]
pub fn collision_convex_polygons(poly1: &[Point2], poly2: &[Point2]) -> bool {
    is_point_inside_convex_polygon(poly1[0], poly2)
        || is_point_inside_convex_polygon(poly2[0], poly1)
        || intersect_polygons(poly1, poly2)
}

/// Overlap test for a general polygon `poly1` against a convex polygon
/// `poly2`, composed the same way as [`collision_convex_polygons`].
#[must_use]
pub fn collision_polygon_convex_polygon(poly1: &[Point2], poly2: &[Point2]) -> bool {
    is_point_inside_convex_polygon(poly1[0], poly2)
        || is_point_inside_polygon(poly2[0], poly1)
        || intersect_polygons(poly1, poly2)
}

/// Overlap test for two general simple polygons.
#[must_use]
pub fn collision_polygons(poly1: &[Point2], poly2: &[Point2]) -> bool {
    is_point_inside_polygon(poly1[0], poly2)
        || is_point_inside_polygon(poly2[0], poly1)
        || intersect_polygons(poly1, poly2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(offset_x: f64, offset_y: f64) -> Vec<Point2> {
        vec![
            Point2::new(offset_x, offset_y),
            Point2::new(offset_x + 1.0, offset_y),
            Point2::new(offset_x + 1.0, offset_y + 1.0),
            Point2::new(offset_x, offset_y + 1.0),
        ]
    }

    // Concave "L": the notch removes the top-right quadrant of a 2x2 square.
    fn l_shape() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 2.0),
            Point2::new(0.0, 2.0),
        ]
    }

    #[test]
    fn turn_sign_convention() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        // Left turn is negative, right turn positive, collinear zero.
        assert!(turn(a, b, Point2::new(1.0, 1.0)) < 0.0);
        assert!(turn(a, b, Point2::new(1.0, -1.0)) > 0.0);
        assert!(turn(a, b, Point2::new(2.0, 0.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn triangle_containment() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(2.0, 0.0);
        let c = Point2::new(1.0, 2.0);
        assert!(is_point_inside_triangle(Point2::new(1.0, 0.5), a, b, c));
        assert!(!is_point_inside_triangle(Point2::new(2.0, 2.0), a, b, c));
        // Edge point counts as inside.
        assert!(is_point_inside_triangle(Point2::new(1.0, 0.0), a, b, c));
    }

    #[test]
    fn convex_polygon_containment() {
        let sq = square(0.0, 0.0);
        assert!(is_point_inside_convex_polygon(Point2::new(0.5, 0.5), &sq));
        assert!(is_point_inside_convex_polygon(Point2::new(1.0, 0.5), &sq));
        assert!(!is_point_inside_convex_polygon(Point2::new(1.5, 0.5), &sq));
    }

    #[test]
    fn crossing_number_containment() {
        let l = l_shape();
        assert!(is_point_inside_polygon(Point2::new(0.5, 0.5), &l));
        assert!(is_point_inside_polygon(Point2::new(1.5, 0.5), &l));
        // The notch is outside.
        assert!(!is_point_inside_polygon(Point2::new(1.5, 1.5), &l));
        assert!(!is_point_inside_polygon(Point2::new(3.0, 0.5), &l));
    }

    #[test]
    fn vertex_coincidence_is_inside() {
        let l = l_shape();
        assert!(is_point_inside_polygon(Point2::new(1.0, 1.0), &l));
    }

    #[test]
    fn polygon_in_aabox() {
        let sq = square(0.25, 0.25);
        assert!(is_polygon_inside_aabox(
            &sq,
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 2.0),
        ));
        assert!(!is_polygon_inside_aabox(
            &sq,
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
        ));
    }

    #[test]
    fn polygon_in_convex_polygon() {
        let inner = square(0.25, 0.25);
        let outer = vec![
            Point2::new(-1.0, -1.0),
            Point2::new(3.0, -1.0),
            Point2::new(3.0, 3.0),
            Point2::new(-1.0, 3.0),
        ];
        assert!(is_polygon_inside_convex_polygon(&inner, &outer));
        assert!(!is_polygon_inside_convex_polygon(&outer, &inner));
    }

    #[test]
    fn concave_container_needs_intersection_check() {
        // A bar across the notch: every vertex is inside the L's bounding
        // region of influence, but edges cross the notch boundary.
        let bar = vec![
            Point2::new(0.25, 0.25),
            Point2::new(1.75, 0.25),
            Point2::new(1.75, 0.75),
            Point2::new(0.25, 0.75),
        ];
        let l = l_shape();
        assert!(is_polygon_inside_polygon(&bar, &l, true));

        let poking = vec![
            Point2::new(0.5, 0.5),
            Point2::new(1.5, 0.5),
            Point2::new(1.5, 1.5),
            Point2::new(0.5, 1.5),
        ];
        // Vertex (1.5, 1.5) is in the notch, so containment already fails.
        assert!(!is_polygon_inside_polygon(&poking, &l, true));
    }

    #[test]
    fn circle_containment() {
        let sq = square(-0.5, -0.5);
        assert!(is_polygon_inside_circle(&sq, Point2::new(0.0, 0.0), 1.0));
        assert!(!is_polygon_inside_circle(&sq, Point2::new(0.0, 0.0), 0.5));
    }

    #[test]
    fn aabox_overlap() {
        let (a0, a1) = (Point2::new(0.0, 0.0), Point2::new(1.0, 1.0));
        assert!(collision_aaboxes(a0, a1, Point2::new(0.5, 0.5), Point2::new(2.0, 2.0)));
        // Touching boxes still collide (closed intervals).
        assert!(collision_aaboxes(a0, a1, Point2::new(1.0, 0.0), Point2::new(2.0, 1.0)));
        assert!(!collision_aaboxes(a0, a1, Point2::new(2.0, 0.0), Point2::new(3.0, 1.0)));
    }

    #[test]
    fn segment_collision_variants() {
        let sq = square(0.0, 0.0);
        // Fully inside: caught by the endpoint test, not the edge sweep.
        assert!(collision_segment_convex_polygon(
            Point2::new(0.25, 0.5),
            Point2::new(0.75, 0.5),
            &sq,
        ));
        assert!(collision_segment_polygon(
            Point2::new(0.5, -1.0),
            Point2::new(0.5, 2.0),
            &sq,
        ));
        assert!(!collision_segment_polygon(
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 1.0),
            &sq,
        ));
    }

    #[test]
    fn polygon_collision_variants() {
        let a = square(0.0, 0.0);
        let b = square(0.5, 0.5);
        let c = square(3.0, 3.0);
        assert!(collision_convex_polygons(&a, &b));
        assert!(!collision_convex_polygons(&a, &c));

        let l = l_shape();
        assert!(collision_polygon_convex_polygon(&l, &b));
        assert!(collision_polygons(&l, &a));
        assert!(!collision_polygons(&l, &c));
    }

    #[test]
    fn containment_counts_as_collision() {
        let tiny = square(0.4, 0.4);
        let big = vec![
            Point2::new(-2.0, -2.0),
            Point2::new(4.0, -2.0),
            Point2::new(4.0, 4.0),
            Point2::new(-2.0, 4.0),
        ];
        assert!(collision_convex_polygons(&tiny, &big));
        assert!(collision_convex_polygons(&big, &tiny));
    }
}
