use super::{Point2, EPSILON};

/// Returns the squared distance from point `p` to the infinite line through
/// `s0` and `s1`, together with the closest point on the line.
///
/// The segment endpoints must be distinct; a zero-length segment divides by
/// zero and yields non-finite output.
#[must_use]
pub fn dist_squared_point_line(p: Point2, s0: Point2, s1: Point2) -> (f64, Point2) {
    let vx = s1.x - s0.x;
    let vy = s1.y - s0.y;
    let a = vx * (s0.y - p.y) - vy * (s0.x - p.x);
    let b = a / (vx * vx + vy * vy);

    let pmin = Point2::new(p.x - b * vy, p.y + b * vx);
    (a * b, pmin)
}

/// Returns the squared distance from point `p` to the segment `s0`-`s1`,
/// together with the closest point on the segment.
///
/// The projection parameter is tested against the endpoints before any
/// division takes place, so zero-length segments are handled (the closest
/// point is `s0`).
#[must_use]
pub fn dist_squared_point_segment(p: Point2, s0: Point2, s1: Point2) -> (f64, Point2) {
    let vx = s1.x - s0.x;
    let vy = s1.y - s0.y;
    let a = vx * (p.x - s0.x) + vy * (p.y - s0.y);

    let pmin = if a <= 0.0 {
        s0
    } else {
        let b = vx * vx + vy * vy;
        if b <= a {
            s1
        } else {
            let t = a / b;
            Point2::new(s0.x + t * vx, s0.y + t * vy)
        }
    };

    let dx = p.x - pmin.x;
    let dy = p.y - pmin.y;
    (dx * dx + dy * dy, pmin)
}

/// Returns the squared distance from point `p` to the boundary of the closed
/// polygon `poly`, together with the closest boundary point.
///
/// Scans the wraparound edge (last vertex to first) before the consecutive
/// edges, keeping the first minimum on ties. At least one vertex is required.
#[must_use]
pub fn dist_squared_point_polygon(p: Point2, poly: &[Point2]) -> (f64, Point2) {
    let n = poly.len();
    let (mut dmin, mut pmin) = dist_squared_point_segment(p, poly[n - 1], poly[0]);

    for i in 0..n.saturating_sub(1) {
        let (d, pt) = dist_squared_point_segment(p, poly[i], poly[i + 1]);
        if d < dmin {
            dmin = d;
            pmin = pt;
        }
    }
    (dmin, pmin)
}

/// Returns the squared distance between segments `p1`-`p2` and `p3`-`p4`,
/// together with the closest point on each segment.
///
/// Uses the clamped parametric closest-point method: the unconstrained
/// line-line parameters are computed first, then the first segment's
/// parameter is clamped to `[0, 1]` (recomputing the second against the
/// clamped endpoint), then the second's. The order is not symmetric;
/// swapping the segments can land on a different, equally close point pair
/// in degenerate configurations. A near-zero denominator (near-parallel
/// segments) forces the first parameter to 0 and solves for the second
/// directly.
#[must_use]
pub fn dist_squared_segments(
    p1: Point2,
    p2: Point2,
    p3: Point2,
    p4: Point2,
) -> (f64, Point2, Point2) {
    let u = [p2.x - p1.x, p2.y - p1.y];
    let v = [p4.x - p3.x, p4.y - p3.y];
    let w = [p1.x - p3.x, p1.y - p3.y];
    let a = u[0] * u[0] + u[1] * u[1];
    let b = u[0] * v[0] + u[1] * v[1];
    let c = v[0] * v[0] + v[1] * v[1];
    let d = u[0] * w[0] + u[1] * w[1];
    let e = v[0] * w[0] + v[1] * w[1];
    let big_d = a * c - b * b; // always >= 0

    let mut sn;
    let mut sd = big_d;
    let mut tn;
    let mut td = big_d;

    if big_d < EPSILON {
        // Near-parallel: pin the first parameter to 0.
        sn = 0.0;
        sd = 1.0;
        tn = e;
        td = c;
    } else {
        sn = b * e - c * d;
        tn = a * e - b * d;
        if sn < 0.0 {
            sn = 0.0;
            tn = e;
            td = c;
        } else if sn > sd {
            sn = sd;
            tn = e + b;
            td = c;
        }
    }

    if tn < 0.0 {
        tn = 0.0;
        if -d < 0.0 {
            sn = 0.0;
        } else if -d > a {
            sn = sd;
        } else {
            sn = -d;
            sd = a;
        }
    } else if tn > td {
        tn = td;
        if (-d + b) < 0.0 {
            sn = 0.0;
        } else if (-d + b) > a {
            sn = sd;
        } else {
            sn = -d + b;
            sd = a;
        }
    }

    let sc = if sn.abs() < EPSILON { 0.0 } else { sn / sd };
    let tc = if tn.abs() < EPSILON { 0.0 } else { tn / td };

    let pmin1 = Point2::new(p1.x + sc * u[0], p1.y + sc * u[1]);
    let pmin2 = Point2::new(p3.x + tc * v[0], p3.y + tc * v[1]);

    let dx = pmin2.x - pmin1.x;
    let dy = pmin2.y - pmin1.y;
    (dx * dx + dy * dy, pmin1, pmin2)
}

/// Returns the squared distance between segment `p1`-`p2` and the boundary
/// of polygon `poly`, with the closest point on the segment and on the
/// polygon. At least one vertex is required.
#[must_use]
pub fn dist_squared_segment_polygon(
    p1: Point2,
    p2: Point2,
    poly: &[Point2],
) -> (f64, Point2, Point2) {
    let n = poly.len();
    let (mut dmin, mut pmin1, mut pmin2) = dist_squared_segments(p1, p2, poly[n - 1], poly[0]);

    for i in 0..n.saturating_sub(1) {
        let (d, q1, q2) = dist_squared_segments(p1, p2, poly[i], poly[i + 1]);
        if d < dmin {
            dmin = d;
            pmin1 = q1;
            pmin2 = q2;
        }
    }
    (dmin, pmin1, pmin2)
}

/// Returns the squared distance between the boundaries of two polygons,
/// with the closest point on `poly1` and on `poly2`.
///
/// Zero only when the boundaries touch; a polygon strictly containing the
/// other still reports the boundary-to-boundary distance.
#[must_use]
pub fn dist_squared_polygons(poly1: &[Point2], poly2: &[Point2]) -> (f64, Point2, Point2) {
    let n1 = poly1.len();
    let (mut dmin, mut pmin1, mut pmin2) =
        dist_squared_segment_polygon(poly1[n1 - 1], poly1[0], poly2);

    for i in 0..n1.saturating_sub(1) {
        let (d, q1, q2) = dist_squared_segment_polygon(poly1[i], poly1[i + 1], poly2);
        if d < dmin {
            dmin = d;
            pmin1 = q1;
            pmin2 = q2;
        }
    }
    (dmin, pmin1, pmin2)
}
