//! Checks that a graph is a properly triangulated planar graph: every inner face
//! a triangle, the outer face the 4-cycle west, south, east, north, and no
//! separating triangles.

use itertools::Itertools;
use tracing::debug;

use crate::graph::error::{GraphErr, GraphResult};
use crate::graph::indices::VertexI;
use crate::graph::{Graph, EAST, NORTH, OUTER, SOUTH, WEST};

/// Vertices around which two consecutive neighbors are not adjacent.
///
/// Inner vertices additionally need degree three or more. For the outer vertices
/// the pair spanning the outer face is skipped.
pub fn triangulation_defects(g: &Graph) -> Vec<VertexI> {
    g.vertex_indices()
        .filter(|&v| {
            let around: Vec<VertexI> = g.neighbors(v).collect();
            let len = around.len();
            if g.is_outer(v) {
                len < 2 || around.iter().tuple_windows().any(|(&a, &b)| !g.are_adjacent(a, b))
            } else {
                len < 3 || (0..len).any(|i| !g.are_adjacent(around[i], around[(i + 1) % len]))
            }
        })
        .collect()
}

pub fn is_triangulated(g: &Graph) -> bool {
    triangulation_defects(g).is_empty()
}

/// Triangles through an inner vertex whose other two corners are adjacent but not
/// consecutive around it. Each triangle is reported once with sorted corners.
pub fn separating_triangles(g: &Graph) -> Vec<[VertexI; 3]> {
    let mut triangles = Vec::new();
    for v in g.vertex_indices().filter(|&v| !g.is_outer(v)) {
        let around: Vec<VertexI> = g.neighbors(v).collect();
        let len = around.len();
        for i in 0..len {
            for j in (i + 2)..len {
                if i == 0 && j == len - 1 {
                    continue;
                }
                if g.are_adjacent(around[i], around[j]) {
                    let mut t = [v, around[i], around[j]];
                    t.sort();
                    triangles.push(t);
                }
            }
        }
    }
    triangles.sort();
    triangles.dedup();
    triangles
}

pub fn has_separating_triangle(g: &Graph) -> bool {
    !separating_triangles(g).is_empty()
}

/// Structural preconditions: enough vertices, the outer 4-cycle, no diagonal of the
/// outer 4-cycle.
fn check_outer_cycle(g: &Graph) -> GraphResult<()> {
    if g.vertex_count() < 5 {
        return Err(GraphErr::malformed(format!(
            "at least 5 vertices are needed, found {}",
            g.vertex_count()
        )));
    }
    for i in 0..OUTER.len() {
        let (a, b) = (OUTER[i], OUTER[(i + 1) % OUTER.len()]);
        if !g.are_adjacent(a, b) {
            return Err(GraphErr::malformed(format!("outer edge {} - {} is missing", a, b)));
        }
    }
    if g.are_adjacent(WEST, EAST) || g.are_adjacent(SOUTH, NORTH) {
        return Err(GraphErr::malformed("the outer 4-cycle has a chord"));
    }
    Ok(())
}

/// Runs every check and reports the first failure together with the offending vertices.
pub fn validate(g: &Graph) -> GraphResult<()> {
    check_outer_cycle(g)?;

    let defects = triangulation_defects(g);
    if !defects.is_empty() {
        debug!("not triangulated around {:?}", defects);
        return Err(GraphErr::NotTriangulated(defects));
    }

    let triangles = separating_triangles(g);
    if !triangles.is_empty() {
        debug!("separating triangles {:?}", triangles);
        let vertices = triangles.iter().flatten().copied().sorted().dedup().collect();
        return Err(GraphErr::SeparatingTriangle(vertices));
    }
    Ok(())
}
