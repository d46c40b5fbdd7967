//! Graphs shared by the unit tests.

use crate::graph::indices::VertexI;
use crate::graph::{Graph, EAST, NORTH, SOUTH, WEST};

fn outer(g: &mut Graph, west: (f64, f64), south: (f64, f64), east: (f64, f64), north: (f64, f64)) {
    for &(x, y) in [west, south, east, north].iter() {
        g.add_vertex(x, y);
    }
    for &(a, b) in [(WEST, SOUTH), (SOUTH, EAST), (EAST, NORTH), (NORTH, WEST)].iter() {
        g.add_edge(a, b).unwrap();
    }
}

/// Outer 4-cycle and one vertex adjacent to all four outer vertices.
pub fn scenario_a() -> Graph {
    let mut g = Graph::new(1, "scenario a");
    outer(&mut g, (0.0, 100.0), (100.0, 200.0), (200.0, 100.0), (100.0, 0.0));
    let center = g.add_vertex(100.0, 100.0);
    for &o in [WEST, SOUTH, EAST, NORTH].iter() {
        g.add_edge(o, center).unwrap();
    }
    g.embed();
    g
}

/// Grid of 'cols' x 'rows' inner vertices, every square split by one diagonal.
///
/// 'falling(i, j)' selects the diagonal of the square with top left corner (i, j):
/// top left to bottom right if true, bottom left to top right otherwise. The first
/// row is attached to north, the last one to south, the first column to west and
/// the last column to east.
pub fn grid<F: Fn(usize, usize) -> bool>(cols: usize, rows: usize, falling: F) -> Graph {
    let mut g = Graph::new(2, &format!("grid {}x{}", cols, rows));
    let width = 100.0 * (cols as f64 + 1.0);
    let height = 100.0 * (rows as f64 + 1.0);
    outer(
        &mut g,
        (-10_000.0, height / 2.0),
        (width / 2.0, height + 10_000.0),
        (width + 10_000.0, height / 2.0),
        (width / 2.0, -10_000.0),
    );

    let at = |i: usize, j: usize| VertexI(4 + j * cols + i);
    for j in 0..rows {
        for i in 0..cols {
            g.add_vertex(100.0 * (i as f64 + 1.0), 100.0 * (j as f64 + 1.0));
        }
    }

    for j in 0..rows {
        for i in 0..cols {
            if i + 1 < cols {
                g.add_edge(at(i, j), at(i + 1, j)).unwrap();
            }
            if j + 1 < rows {
                g.add_edge(at(i, j), at(i, j + 1)).unwrap();
            }
            if i + 1 < cols && j + 1 < rows {
                if falling(i, j) {
                    g.add_edge(at(i, j), at(i + 1, j + 1)).unwrap();
                } else {
                    g.add_edge(at(i, j + 1), at(i + 1, j)).unwrap();
                }
            }
        }
    }

    for i in 0..cols {
        g.add_edge(NORTH, at(i, 0)).unwrap();
        g.add_edge(at(i, rows - 1), SOUTH).unwrap();
    }
    for j in 0..rows {
        g.add_edge(WEST, at(0, j)).unwrap();
        g.add_edge(at(cols - 1, j), EAST).unwrap();
    }

    g.embed();
    g
}

/// The 34 vertex regression graph: a 6 x 5 grid with alternating diagonals.
pub fn scenario_b() -> Graph {
    grid(6, 5, |i, j| (i + j) % 2 == 0)
}

/// Triangulated, but the triangle 4, 5, 6 encloses vertex 7.
pub fn with_separating_triangle() -> Graph {
    let mut g = Graph::new(3, "separating");
    outer(&mut g, (0.0, 100.0), (100.0, 200.0), (200.0, 100.0), (100.0, 0.0));
    let a = g.add_vertex(100.0, 60.0);
    let b = g.add_vertex(140.0, 130.0);
    let c = g.add_vertex(60.0, 130.0);
    let d = g.add_vertex(100.0, 105.0);
    let edges = [
        (a, b),
        (b, c),
        (c, a),
        (d, a),
        (d, b),
        (d, c),
        (NORTH, a),
        (WEST, a),
        (EAST, a),
        (WEST, c),
        (SOUTH, c),
        (SOUTH, b),
        (EAST, b),
    ];
    for &(x, y) in edges.iter() {
        g.add_edge(x, y).unwrap();
    }
    g.embed();
    g
}
