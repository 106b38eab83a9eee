pub mod contain_2d;
pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;
pub mod sample_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 2D rigid transformation (rotation + translation).
pub type Isometry2 = nalgebra::Isometry2<f64>;

/// Absolute tolerance for geometric predicates (2^-36).
///
/// Determinants, turn values, and parametric denominators below this
/// magnitude take the degenerate branch of the predicate they appear in.
pub const EPSILON: f64 = 1.0 / (1u64 << 36) as f64;

/// Tolerance for squared-distance comparisons (2^-72).
pub const EPSILON_SQUARED: f64 = EPSILON * EPSILON;
