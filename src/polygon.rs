//! Polygon entity with lazily derived, cached properties.
//!
//! A [`Polygon`] owns its vertex buffer and memoizes the expensive derived
//! views (bounding box, convexity, triangulation, triangle areas) behind
//! explicit fresh/stale cells. Two events drive invalidation: a *shape*
//! change (vertex positions or count changed) clears everything, a
//! *placement* change (rigid motion) clears only the bounding box. The
//! mutation API pairs each edit with the right event so callers cannot
//! forget to signal; the raw notification methods remain public for code
//! that mutates through [`vertices_mut`](Polygon::vertices_mut).
//!
//! Cached accessors take `&mut self`, which rules out concurrent reads
//! racing an invalidation at compile time. Distance and intersection
//! queries never touch the caches and borrow immutably.

use std::io::{Read, Write};

use rand::Rng;

use crate::grid::Grid;
use crate::math::{contain_2d, distance_2d, intersect_2d, polygon_2d, Isometry2, Point2, Vector2};
use crate::triangulation;
use crate::{io, Result};

/// A lazily computed value, recomputed on first access after invalidation.
#[derive(Clone, Debug)]
enum Cached<T> {
    Stale,
    Fresh(T),
}

impl<T> Default for Cached<T> {
    fn default() -> Self {
        Cached::Stale
    }
}

impl<T> Cached<T> {
    fn invalidate(&mut self) {
        *self = Cached::Stale;
    }

    fn is_stale(&self) -> bool {
        matches!(self, Cached::Stale)
    }
}

/// Per-triangle unsigned areas with the derived aggregates.
#[derive(Clone, Debug)]
struct TriangleAreas {
    per_triangle: Vec<f64>,
    total: f64,
    largest: usize,
}

/// A closed polygon over an ordered vertex sequence (the last vertex
/// connects implicitly to the first).
///
/// Fewer than three vertices is a degenerate polygon: convex by
/// convention, no triangles, zero area, and a zero bounding box at the
/// origin when empty.
#[derive(Clone, Debug, Default)]
pub struct Polygon {
    vertices: Vec<Point2>,
    bbox: Cached<(Point2, Point2)>,
    convex: Cached<bool>,
    triangles: Cached<Vec<[usize; 3]>>,
    areas: Cached<TriangleAreas>,
}

impl Polygon {
    /// Creates an empty polygon.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a polygon from a vertex list.
    #[must_use]
    pub fn from_vertices(vertices: Vec<Point2>) -> Self {
        Self {
            vertices,
            ..Self::default()
        }
    }

    /// Creates an axis-aligned rectangle.
    #[must_use]
    pub fn rectangle(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::from_vertices(
            polygon_2d::aabox_as_polygon(Point2::new(min_x, min_y), Point2::new(max_x, max_y))
                .to_vec(),
        )
    }

    /// The vertex sequence.
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Number of vertices.
    #[must_use]
    pub fn nr_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Direct mutable access to the vertex buffer.
    ///
    /// The caller owns the invalidation contract: after mutating, signal
    /// [`on_shape_change`](Self::on_shape_change) (positions or count
    /// changed) or [`on_placement_change`](Self::on_placement_change)
    /// (rigid motion only). Prefer [`update_shape`](Self::update_shape) /
    /// [`update_placement`](Self::update_placement), which signal for you.
    #[must_use]
    pub fn vertices_mut(&mut self) -> &mut Vec<Point2> {
        &mut self.vertices
    }

    /// Replaces the vertex sequence and invalidates all derived state.
    pub fn set_vertices(&mut self, vertices: Vec<Point2>) {
        self.vertices = vertices;
        self.on_shape_change();
    }

    /// Edits the vertex buffer and signals a shape change.
    pub fn update_shape(&mut self, f: impl FnOnce(&mut Vec<Point2>)) {
        f(&mut self.vertices);
        self.on_shape_change();
    }

    /// Edits the vertex buffer with a rigid motion and signals a placement
    /// change; only the bounding box is recomputed on next access.
    pub fn update_placement(&mut self, f: impl FnOnce(&mut Vec<Point2>)) {
        f(&mut self.vertices);
        self.on_placement_change();
    }

    /// Translates every vertex (placement change).
    pub fn translate(&mut self, v: Vector2) {
        self.update_placement(|verts| {
            for p in verts {
                *p += v;
            }
        });
    }

    /// Applies a rigid transformation to every vertex (placement change).
    pub fn apply_isometry(&mut self, iso: &Isometry2) {
        self.update_placement(|verts| polygon_2d::apply_isometry(iso, verts));
    }

    /// Normalizes the vertex order to counter-clockwise (shape change).
    pub fn make_ccw(&mut self) {
        self.update_shape(|verts| polygon_2d::make_ccw(verts));
    }

    /// Marks every shape-derived cache stale: bounding box, convexity,
    /// triangulation, and triangle areas.
    pub fn on_shape_change(&mut self) {
        self.bbox.invalidate();
        self.convex.invalidate();
        self.triangles.invalidate();
        self.areas.invalidate();
    }

    /// Marks only the bounding box stale. Correct after rigid motion,
    /// where topology, convexity, and triangle areas are unchanged.
    pub fn on_placement_change(&mut self) {
        self.bbox.invalidate();
    }

    /// Axis-aligned bounding box as a min/max corner pair, recomputed by a
    /// linear scan when stale. An empty polygon has a zero box.
    pub fn bounding_box(&mut self) -> (Point2, Point2) {
        if let Cached::Fresh(b) = self.bbox {
            return b;
        }
        let b = if self.vertices.is_empty() {
            (Point2::new(0.0, 0.0), Point2::new(0.0, 0.0))
        } else {
            polygon_2d::bounding_box(&self.vertices)
        };
        self.bbox = Cached::Fresh(b);
        b
    }

    /// Convexity, recomputed when stale.
    pub fn is_convex(&mut self) -> bool {
        if let Cached::Fresh(c) = self.convex {
            return c;
        }
        let c = polygon_2d::is_convex(&self.vertices);
        self.convex = Cached::Fresh(c);
        c
    }

    /// Triangle index triples from the triangulation collaborator,
    /// recomputed when stale.
    ///
    /// A polygon the triangulator rejects is treated as degenerate and
    /// yields no triangles.
    pub fn triangle_indices(&mut self) -> &[[usize; 3]] {
        if self.triangles.is_stale() {
            let tris = triangulation::triangulate(&self.vertices).unwrap_or_default();
            self.triangles = Cached::Fresh(tris);
        }
        match &self.triangles {
            Cached::Fresh(t) => t,
            Cached::Stale => &[],
        }
    }

    /// Number of triangles in the triangulation.
    pub fn nr_triangles(&mut self) -> usize {
        self.triangle_indices().len()
    }

    /// The corner points of triangle `i` of the triangulation.
    ///
    /// # Panics
    ///
    /// Panics when `i` is out of range.
    pub fn triangle_vertices(&mut self, i: usize) -> [Point2; 3] {
        self.triangle_indices();
        let t = match &self.triangles {
            Cached::Fresh(tris) => tris[i],
            Cached::Stale => [0; 3],
        };
        [
            self.vertices[t[0]],
            self.vertices[t[1]],
            self.vertices[t[2]],
        ]
    }

    fn ensure_areas(&mut self) {
        if !self.areas.is_stale() {
            return;
        }
        self.triangle_indices();
        let tris: &[[usize; 3]] = match &self.triangles {
            Cached::Fresh(t) => t,
            Cached::Stale => &[],
        };

        let mut per_triangle = Vec::with_capacity(tris.len());
        let mut total = 0.0;
        let mut largest = 0;
        let mut largest_area = 0.0;

        for (i, t) in tris.iter().enumerate() {
            let tri = [
                self.vertices[t[0]],
                self.vertices[t[1]],
                self.vertices[t[2]],
            ];
            let a = polygon_2d::signed_area(&tri).abs();
            per_triangle.push(a);
            total += a;
            // Strict comparison: ties keep the first-seen triangle.
            if a > largest_area {
                largest_area = a;
                largest = i;
            }
        }

        self.areas = Cached::Fresh(TriangleAreas {
            per_triangle,
            total,
            largest,
        });
    }

    /// Per-triangle unsigned areas, parallel to
    /// [`triangle_indices`](Self::triangle_indices).
    pub fn triangle_areas(&mut self) -> &[f64] {
        self.ensure_areas();
        match &self.areas {
            Cached::Fresh(a) => &a.per_triangle,
            Cached::Stale => &[],
        }
    }

    /// Total polygon area: the sum of the triangle areas. Degenerate
    /// polygons have zero area.
    pub fn area(&mut self) -> f64 {
        self.ensure_areas();
        match &self.areas {
            Cached::Fresh(a) => a.total,
            Cached::Stale => 0.0,
        }
    }

    /// Index of the largest-area triangle (first-seen on ties).
    pub fn largest_triangle(&mut self) -> usize {
        self.ensure_areas();
        match &self.areas {
            Cached::Fresh(a) => a.largest,
            Cached::Stale => 0,
        }
    }

    /// Draws a triangle index with probability proportional to its area.
    ///
    /// Scans the cumulative area sum until it reaches a uniform draw in
    /// `[0, area)`; when floating-point rounding keeps the sum short of
    /// the draw, the last triangle is returned. The polygon must have at
    /// least one triangle.
    pub fn select_triangle_by_area<R: Rng>(&mut self, rng: &mut R) -> usize {
        let r = self.area() * rng.gen::<f64>();
        let n = self.nr_triangles();
        self.ensure_areas();
        let areas = match &self.areas {
            Cached::Fresh(a) => &a.per_triangle,
            Cached::Stale => return 0,
        };

        let mut w = 0.0;
        for (i, a) in areas.iter().enumerate() {
            w += a;
            if w >= r {
                return i;
            }
        }
        n - 1
    }

    /// Uniform point inside the polygon: draws a triangle weighted by area,
    /// then samples the triangle by barycentric reflection. The polygon
    /// must have at least one triangle.
    pub fn sample_point_inside<R: Rng>(&mut self, rng: &mut R) -> Point2 {
        let t = self.select_triangle_by_area(rng);
        let [a, b, c] = self.triangle_vertices(t);
        crate::math::sample_2d::point_in_triangle(rng, a, b, c)
    }

    /// A deterministic interior point: a fixed barycentric combination of
    /// the first triangle. The polygon must have at least one triangle.
    pub fn some_point_inside(&mut self) -> Point2 {
        let [a, b, c] = self.triangle_vertices(0);
        let a1 = 0.35;
        let a2 = 0.45;

        Point2::new(
            a.x + a1 * (b.x - a.x) + a2 * (c.x - a.x),
            a.y + a1 * (b.y - a.y) + a2 * (c.y - a.y),
        )
    }

    /// Squared distance from a point to the polygon boundary, with the
    /// closest boundary point.
    #[must_use]
    pub fn dist_squared_point(&self, p: Point2) -> (f64, Point2) {
        distance_2d::dist_squared_point_polygon(p, &self.vertices)
    }

    /// Squared distance from a segment to the polygon boundary, with the
    /// closest point on the segment and on the boundary.
    #[must_use]
    pub fn dist_squared_segment(&self, p1: Point2, p2: Point2) -> (f64, Point2, Point2) {
        distance_2d::dist_squared_segment_polygon(p1, p2, &self.vertices)
    }

    /// Squared boundary-to-boundary distance to another polygon, with the
    /// closest point on each.
    #[must_use]
    pub fn dist_squared_polygon(&self, other: &Polygon) -> (f64, Point2, Point2) {
        distance_2d::dist_squared_polygons(&self.vertices, &other.vertices)
    }

    /// Tests whether a segment crosses the polygon boundary.
    #[must_use]
    pub fn intersect_segment(&self, p0: Point2, p1: Point2) -> bool {
        intersect_2d::intersect_segment_polygon(p0, p1, &self.vertices)
    }

    /// Tests whether the boundaries of the two polygons cross.
    #[must_use]
    pub fn intersect_polygon(&self, other: &Polygon) -> bool {
        intersect_2d::intersect_polygons(&self.vertices, &other.vertices)
    }

    /// Tests whether the polygon boundary is simple (no crossing between
    /// non-adjacent edges).
    #[must_use]
    pub fn self_intersects(&self) -> bool {
        intersect_2d::self_intersect_polygon(&self.vertices)
    }

    /// Point containment, using the convex-specialized test when the
    /// cached convexity allows it.
    pub fn is_point_inside(&mut self, p: Point2) -> bool {
        if self.is_convex() {
            contain_2d::is_point_inside_convex_polygon(p, &self.vertices)
        } else {
            contain_2d::is_point_inside_polygon(p, &self.vertices)
        }
    }

    /// Tests whether every vertex lies inside an axis-aligned box.
    #[must_use]
    pub fn is_inside_aabox(&self, min: Point2, max: Point2) -> bool {
        contain_2d::is_polygon_inside_aabox(&self.vertices, min, max)
    }

    /// Tests whether this polygon lies inside `other`, dispatching on the
    /// container's convexity.
    pub fn is_inside_polygon(&self, other: &mut Polygon) -> bool {
        if other.is_convex() {
            contain_2d::is_polygon_inside_convex_polygon(&self.vertices, &other.vertices)
        } else {
            contain_2d::is_polygon_inside_polygon(&self.vertices, &other.vertices, true)
        }
    }

    /// Segment overlap test, dispatching on this polygon's convexity.
    pub fn collision_segment(&mut self, p0: Point2, p1: Point2) -> bool {
        if self.is_convex() {
            contain_2d::collision_segment_convex_polygon(p0, p1, &self.vertices)
        } else {
            contain_2d::collision_segment_polygon(p0, p1, &self.vertices)
        }
    }

    /// Polygon overlap test: a bounding-box reject, then the four-way
    /// dispatch on (self convex, other convex).
    pub fn collision_polygon(&mut self, other: &mut Polygon) -> bool {
        let (min1, max1) = self.bounding_box();
        let (min2, max2) = other.bounding_box();
        if !contain_2d::collision_aaboxes(min1, max1, min2, max2) {
            return false;
        }

        match (self.is_convex(), other.is_convex()) {
            (true, true) => {
                contain_2d::collision_convex_polygons(&self.vertices, &other.vertices)
            }
            // The general polygon goes first, the convex one second.
            (true, false) => {
                contain_2d::collision_polygon_convex_polygon(&other.vertices, &self.vertices)
            }
            (false, true) => {
                contain_2d::collision_polygon_convex_polygon(&self.vertices, &other.vertices)
            }
            (false, false) => contain_2d::collision_polygons(&self.vertices, &other.vertices),
        }
    }

    /// Classifies the grid cells touched by the polygon.
    ///
    /// Returns `(cells_inside, cells_intersect)`: ids of cells whose box
    /// lies entirely inside the polygon, and ids of cells whose box crosses
    /// the boundary or swallows the whole polygon. Cells disjoint from the
    /// polygon appear in neither list. Candidate cells come from the
    /// polygon's bounding box; the grid must be two-dimensional.
    pub fn occupied_grid_cells(&mut self, grid: &Grid) -> (Vec<usize>, Vec<usize>) {
        let (bmin, bmax) = self.bounding_box();
        let coord_min = grid.coords_of(&[bmin.x, bmin.y]);
        let coord_max = grid.coords_of(&[bmax.x, bmax.y]);

        let mut cells_inside = Vec::new();
        let mut cells_intersect = Vec::new();

        for x in coord_min[0]..=coord_max[0] {
            for y in coord_min[1]..=coord_max[1] {
                let coords = [x, y];
                let (cmin, cmax) = grid.cell_from_coords(&coords);
                let cell = polygon_2d::aabox_as_polygon(
                    Point2::new(cmin[0], cmin[1]),
                    Point2::new(cmax[0], cmax[1]),
                );
                let id = grid.cell_id_from_coords(&coords);

                if intersect_2d::intersect_polygons(&cell, &self.vertices) {
                    cells_intersect.push(id);
                } else if contain_2d::is_polygon_inside_polygon(&cell, &self.vertices, false) {
                    // Boundaries are already known disjoint, so vertex
                    // containment alone settles it.
                    cells_inside.push(id);
                } else if contain_2d::is_polygon_inside_convex_polygon(&self.vertices, &cell) {
                    cells_intersect.push(id);
                }
            }
        }

        (cells_inside, cells_intersect)
    }

    /// Writes the polygon in the whitespace-delimited text format.
    ///
    /// # Errors
    ///
    /// Returns an error when the writer fails.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        io::write_polygon(out, &self.vertices)
    }

    /// Reads a polygon from the whitespace-delimited text format.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed input or when the reader fails.
    pub fn read_from<R: Read>(input: &mut R) -> Result<Self> {
        Ok(Self::from_vertices(io::read_polygon(input)?))
    }
}
