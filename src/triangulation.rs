//! Triangulation of simple polygons without holes.
//!
//! The kernel treats the triangulator as an opaque collaborator: vertices
//! in, index triples out. Internally a constrained Delaunay triangulation
//! is built with the polygon boundary as a constraint loop, and interior
//! faces are selected by crossing parity.

use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::FixedFaceHandle;
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};

use crate::error::{Result, TriangulationError};
use crate::math::Point2;

/// Triangulates a simple polygon without holes.
///
/// Returns triangle index triples referencing positions in `vertices`.
/// Fewer than three vertices yield an empty triangulation. Vertex order
/// (clockwise or counter-clockwise) does not matter.
///
/// The polygon must be simple; a self-intersecting boundary makes the
/// constraint loop cross itself, which the triangulator rejects by panic.
/// Validate with [`self_intersect_polygon`] first when the input is
/// untrusted.
///
/// # Errors
///
/// Returns [`TriangulationError`] when the triangulator rejects a vertex
/// (non-finite coordinates).
///
/// [`self_intersect_polygon`]: crate::math::intersect_2d::self_intersect_polygon
pub fn triangulate(vertices: &[Point2]) -> Result<Vec<[usize; 3]>> {
    if vertices.len() < 3 {
        return Ok(Vec::new());
    }

    let mut cdt = ConstrainedDelaunayTriangulation::<SpadePoint2<f64>>::new();
    let mut handles = Vec::with_capacity(vertices.len());
    let mut input_index = HashMap::new();

    for (i, v) in vertices.iter().enumerate() {
        let h = cdt
            .insert(SpadePoint2::new(v.x, v.y))
            .map_err(|e: InsertionError| TriangulationError::Rejected(e.to_string()))?;
        // Coincident vertices share a handle; the first occurrence wins.
        input_index.entry(h.index()).or_insert(i);
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from != to {
            cdt.add_constraint(from, to);
        }
    }

    let interior = classify_interior_faces(&cdt);

    let mut triangles = Vec::with_capacity(interior.len());
    for face in cdt.inner_faces() {
        if !interior.contains(&face.fix().index()) {
            continue;
        }
        let vs = face.vertices();
        let indices = [
            input_index.get(&vs[0].fix().index()).copied(),
            input_index.get(&vs[1].fix().index()).copied(),
            input_index.get(&vs[2].fix().index()).copied(),
        ];
        if let [Some(a), Some(b), Some(c)] = indices {
            triangles.push([a, b, c]);
        }
    }

    Ok(triangles)
}

/// Classifies which inner faces of the CDT lie inside the constraint loop.
///
/// Flood-fills from the faces adjacent to the outer face at depth 0; each
/// crossed constraint edge increments the depth. Odd depth = interior.
fn classify_interior_faces(
    cdt: &ConstrainedDelaunayTriangulation<SpadePoint2<f64>>,
) -> HashSet<usize> {
    let mut interior = HashSet::new();
    let mut depth_map: HashMap<usize, u32> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<spade::handles::InnerTag>, u32)> = VecDeque::new();

    let outer_fix = cdt.outer_face().fix();

    for edge in cdt.directed_edges() {
        if edge.face().fix() == outer_fix {
            let rev_face = edge.rev().face();
            if let Some(inner) = rev_face.as_inner() {
                let idx = inner.fix().index();
                if depth_map.contains_key(&idx) {
                    continue;
                }
                let depth = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
                depth_map.insert(idx, depth);
                if depth % 2 == 1 {
                    interior.insert(idx);
                }
                queue.push_back((inner.fix(), depth));
            }
        }
    }

    while let Some((face_fix, depth)) = queue.pop_front() {
        let face = cdt.face(face_fix);
        for edge in face.adjacent_edges() {
            let neighbor = edge.rev().face();
            if let Some(inner_neighbor) = neighbor.as_inner() {
                let n_idx = inner_neighbor.fix().index();
                if depth_map.contains_key(&n_idx) {
                    continue;
                }
                let new_depth = if cdt.is_constraint_edge(edge.as_undirected().fix()) {
                    depth + 1
                } else {
                    depth
                };
                depth_map.insert(n_idx, new_depth);
                if new_depth % 2 == 1 {
                    interior.insert(n_idx);
                }
                queue.push_back((inner_neighbor.fix(), new_depth));
            }
        }
    }

    interior
}
