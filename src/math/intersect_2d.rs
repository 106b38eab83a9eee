use super::{Point2, EPSILON};

/// Parametric intersection of the infinite lines through `p1`-`p2` and
/// `p3`-`p4`.
///
/// Returns the intersection point together with the parameters `mua` (along
/// the first line) and `mub` (along the second), or `None` when the
/// determinant magnitude falls below [`EPSILON`]. Coincident lines hit the
/// same branch and are reported as non-intersecting; the segment loops and
/// the self-intersection test rely on collinear touching edges not counting
/// as crossings, so this is deliberate rather than a gap to fix.
#[must_use]
pub fn intersect_lines(
    p1: Point2,
    p2: Point2,
    p3: Point2,
    p4: Point2,
) -> Option<(Point2, f64, f64)> {
    let denom = (p4.y - p3.y) * (p2.x - p1.x) - (p4.x - p3.x) * (p2.y - p1.y);
    if denom.abs() < EPSILON {
        return None;
    }
    let mua = ((p4.x - p3.x) * (p1.y - p3.y) - (p4.y - p3.y) * (p1.x - p3.x)) / denom;
    let mub = ((p2.x - p1.x) * (p1.y - p3.y) - (p2.y - p1.y) * (p1.x - p3.x)) / denom;
    let at = Point2::new(p1.x + mua * (p2.x - p1.x), p1.y + mua * (p2.y - p1.y));
    Some((at, mua, mub))
}

/// Intersection of the line through `p1`-`p2` with the ray from `p3`
/// through `p4`.
#[must_use]
pub fn intersect_line_ray(p1: Point2, p2: Point2, p3: Point2, p4: Point2) -> Option<Point2> {
    intersect_lines(p1, p2, p3, p4)
        .and_then(|(at, _, mub)| (mub >= 0.0).then_some(at))
}

/// Intersection of the line through `p1`-`p2` with the segment `p3`-`p4`.
#[must_use]
pub fn intersect_line_segment(p1: Point2, p2: Point2, p3: Point2, p4: Point2) -> Option<Point2> {
    intersect_lines(p1, p2, p3, p4)
        .and_then(|(at, _, mub)| (mub >= 0.0 && mub <= 1.0).then_some(at))
}

/// Intersection of the ray from `p1` through `p2` with the ray from `p3`
/// through `p4`.
#[must_use]
pub fn intersect_rays(p1: Point2, p2: Point2, p3: Point2, p4: Point2) -> Option<Point2> {
    intersect_lines(p1, p2, p3, p4)
        .and_then(|(at, mua, mub)| (mua >= 0.0 && mub >= 0.0).then_some(at))
}

/// Intersection of the ray from `p1` through `p2` with the segment
/// `p3`-`p4`.
#[must_use]
pub fn intersect_ray_segment(p1: Point2, p2: Point2, p3: Point2, p4: Point2) -> Option<Point2> {
    intersect_lines(p1, p2, p3, p4)
        .and_then(|(at, mua, mub)| (mua >= 0.0 && mub >= 0.0 && mub <= 1.0).then_some(at))
}

/// Intersection point of segments `p1`-`p2` and `p3`-`p4`, requiring both
/// parameters in `[0, 1]`. Endpoint contact counts as intersection.
#[must_use]
pub fn intersect_segments_at(p1: Point2, p2: Point2, p3: Point2, p4: Point2) -> Option<Point2> {
    intersect_lines(p1, p2, p3, p4).and_then(|(at, mua, mub)| {
        (mua >= 0.0 && mua <= 1.0 && mub >= 0.0 && mub <= 1.0).then_some(at)
    })
}

/// Boolean segment-segment intersection test.
///
/// Division-free: interval rejects on both axes, then sign tests on the two
/// parameter numerators against the shared denominator. Collinear segments
/// (zero denominator) report no intersection even when they overlap;
/// endpoint contact with a non-parallel segment reports intersection.
#[must_use]
pub fn intersect_segments(p1: Point2, p2: Point2, p3: Point2, p4: Point2) -> bool {
    let ax = p2.x - p1.x;
    let (x1lo, x1hi) = if ax < 0.0 { (p2.x, p1.x) } else { (p1.x, p2.x) };

    let bx = p3.x - p4.x;
    if bx > 0.0 {
        if x1hi < p4.x || p3.x < x1lo {
            return false;
        }
    } else if x1hi < p3.x || p4.x < x1lo {
        return false;
    }

    let ay = p2.y - p1.y;
    let by = p3.y - p4.y;
    let (y1lo, y1hi) = if ay < 0.0 { (p2.y, p1.y) } else { (p1.y, p2.y) };

    if by > 0.0 {
        if y1hi < p4.y || p3.y < y1lo {
            return false;
        }
    } else if y1hi < p3.y || p4.y < y1lo {
        return false;
    }

    let f = ay * bx - ax * by; // common denominator
    if f == 0.0 {
        return false;
    }

    let cx = p1.x - p3.x;
    let cy = p1.y - p3.y;

    let d = by * cx - bx * cy; // first parameter numerator
    if f > 0.0 {
        if d < 0.0 || d > f {
            return false;
        }
    } else if d > 0.0 || d < f {
        return false;
    }

    let e = ax * cy - ay * cx; // second parameter numerator
    if f > 0.0 {
        if e < 0.0 || e > f {
            return false;
        }
    } else if e > 0.0 || e < f {
        return false;
    }

    true
}

/// Tests whether segment `p0`-`p1` intersects any edge of the closed
/// polygon `poly`. The wraparound edge is tested last. At least one
/// vertex is required.
#[must_use]
pub fn intersect_segment_polygon(p0: Point2, p1: Point2, poly: &[Point2]) -> bool {
    let n = poly.len();
    for i in 0..n.saturating_sub(1) {
        if intersect_segments(p0, p1, poly[i], poly[i + 1]) {
            return true;
        }
    }
    intersect_segments(p0, p1, poly[n - 1], poly[0])
}

/// Tests whether any edge of `poly1` intersects any edge of `poly2`.
#[must_use]
pub fn intersect_polygons(poly1: &[Point2], poly2: &[Point2]) -> bool {
    let n1 = poly1.len();
    for i in 0..n1.saturating_sub(1) {
        if intersect_segment_polygon(poly1[i], poly1[i + 1], poly2) {
            return true;
        }
    }
    intersect_segment_polygon(poly1[n1 - 1], poly1[0], poly2)
}

/// Intersections of the infinite line through `p1`-`p2` with an axis-aligned
/// box, collected edge by edge until two hits are found.
///
/// Returns at most two points. A line grazing a corner can report the same
/// point from both incident edges.
#[must_use]
pub fn intersect_line_aabox(p1: Point2, p2: Point2, min: Point2, max: Point2) -> Vec<Point2> {
    let corners = [
        Point2::new(min.x, min.y),
        Point2::new(max.x, min.y),
        Point2::new(max.x, max.y),
        Point2::new(min.x, max.y),
    ];

    let mut hits = Vec::with_capacity(2);
    for i in 0..4 {
        if hits.len() == 2 {
            break;
        }
        if let Some(at) = intersect_line_segment(p1, p2, corners[i], corners[(i + 1) % 4]) {
            hits.push(at);
        }
    }
    hits
}

/// Tests whether any two non-adjacent edges of the polygon intersect:
/// the O(n^2) simple-polygon validity test.
///
/// Edge `i` runs from vertex `i` to vertex `i + 1` (wrapping). Adjacent
/// pairs share a vertex and are skipped, including the pair formed by edge
/// 0 and the wraparound edge `n - 1`.
#[must_use]
pub fn self_intersect_polygon(poly: &[Point2]) -> bool {
    let n = poly.len();
    for i in 0..n.saturating_sub(2) {
        for j in (i + 2)..n {
            let adjacent_through_wraparound = i == 0 && j == n - 1;
            if !adjacent_through_wraparound
                && intersect_segments(poly[i], poly[i + 1], poly[j], poly[(j + 1) % n])
            {
                return true;
            }
        }
    }
    false
}
