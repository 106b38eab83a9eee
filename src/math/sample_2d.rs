use super::contain_2d::{is_point_inside_convex_polygon, is_point_inside_polygon};
use super::polygon_2d::bounding_box;
use super::Point2;
use rand::Rng;
use std::f64::consts::TAU;

/// Uniform point inside the axis-aligned box `min`-`max`: two independent
/// uniform draws. Degenerate boxes (zero extent on an axis) are fine.
#[must_use]
pub fn point_in_aabox<R: Rng>(rng: &mut R, min: Point2, max: Point2) -> Point2 {
    Point2::new(
        min.x + (max.x - min.x) * rng.gen::<f64>(),
        min.y + (max.y - min.y) * rng.gen::<f64>(),
    )
}

/// Uniform point inside the triangle `a`, `b`, `c` via barycentric
/// reflection: two uniform draws, reflected as `1 - x` when their sum
/// exceeds one, which folds the outer half of the parameter square back
/// onto the triangle. No rejection loop.
#[must_use]
pub fn point_in_triangle<R: Rng>(rng: &mut R, a: Point2, b: Point2, c: Point2) -> Point2 {
    let mut a1 = rng.gen::<f64>();
    let mut a2 = rng.gen::<f64>();

    if a1 + a2 > 1.0 {
        a1 = 1.0 - a1;
        a2 = 1.0 - a2;
    }

    Point2::new(
        a.x + a1 * (b.x - a.x) + a2 * (c.x - a.x),
        a.y + a1 * (b.y - a.y) + a2 * (c.y - a.y),
    )
}

/// Uniform point inside a counter-clockwise convex polygon by rejection
/// against its bounding box (or a caller-supplied box).
///
/// Each attempt costs one box draw plus the O(n) convex containment test.
/// There is no iteration cap: a sliver polygon whose area is tiny relative
/// to its box can loop for a long time.
#[must_use]
pub fn point_in_convex_polygon<R: Rng>(
    rng: &mut R,
    poly: &[Point2],
    bbox: Option<(Point2, Point2)>,
) -> Point2 {
    let (min, max) = bbox.unwrap_or_else(|| bounding_box(poly));
    loop {
        let p = point_in_aabox(rng, min, max);
        if is_point_inside_convex_polygon(p, poly) {
            return p;
        }
    }
}

/// Uniform point inside a general simple polygon by rejection against its
/// bounding box (or a caller-supplied box).
///
/// Same retry behavior as [`point_in_convex_polygon`], with the more
/// expensive crossing-number containment test per attempt and its boundary
/// conventions (vertex coincidence counts as inside).
#[must_use]
pub fn point_in_polygon<R: Rng>(
    rng: &mut R,
    poly: &[Point2],
    bbox: Option<(Point2, Point2)>,
) -> Point2 {
    let (min, max) = bbox.unwrap_or_else(|| bounding_box(poly));
    loop {
        let p = point_in_aabox(rng, min, max);
        if is_point_inside_polygon(p, poly) {
            return p;
        }
    }
}

/// Uniform point inside the disc around `center`: radius scaled by the
/// square root of a uniform draw, angle uniform.
#[must_use]
pub fn point_in_circle<R: Rng>(rng: &mut R, center: Point2, r: f64) -> Point2 {
    let s = r * rng.gen::<f64>().sqrt();
    let theta = TAU * rng.gen::<f64>();

    Point2::new(s * theta.cos() + center.x, s * theta.sin() + center.y)
}
