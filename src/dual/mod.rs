//! Color subgraphs of a regular edge labeling and their duals.
//!
//! The blue edges form a planar st-graph from south to north, the red edges one
//! from west to east. The faces of the blue graph, numbered along a longest path
//! in its dual, give the x coordinates of the rectangular dual; the red faces give
//! the y coordinates.

use std::collections::{HashSet, VecDeque};

use itertools::Itertools;
use tracing::{debug, trace};

use crate::graph::enums::{EdgeColor, Side};
use crate::graph::error::{GraphErr, GraphResult};
use crate::graph::indices::{EdgeI, FaceI, VertexI};
use crate::graph::Graph;

pub mod rectangles;
pub mod tikz;

/// The face left of the leftmost path from source to sink.
pub const S_STAR: FaceI = FaceI(0);
/// The face right of the rightmost path from source to sink.
pub const T_STAR: FaceI = FaceI(1);

#[derive(Clone, Debug)]
struct SubEdge {
    source: VertexI,
    target: VertexI,
    /// `None` for the sink -> source edge closing the outer face.
    original: Option<EdgeI>,
    left_face: Option<FaceI>,
    right_face: Option<FaceI>,
}

/// Edge list of a vertex restricted to one color, incoming edges first.
#[derive(Clone, Debug, Default)]
struct LocalRotation {
    edges: Vec<usize>,
    num_incoming: usize,
}

impl LocalRotation {
    fn incoming(&self) -> &[usize] {
        &self.edges[..self.num_incoming]
    }

    fn outgoing(&self) -> &[usize] {
        &self.edges[self.num_incoming..]
    }
}

/// The edges of one color with the rotation system they inherit.
#[derive(Clone, Debug)]
pub struct ColorSubgraph {
    pub color: EdgeColor,
    pub source: VertexI,
    pub sink: VertexI,
    edges: Vec<SubEdge>,
    rotation: Vec<Option<LocalRotation>>,
    num_faces: usize,
}

impl ColorSubgraph {
    /// Extracts the edges labeled 'color' and closes the outer face with an edge
    /// from the sink to the source.
    /// # Errors
    /// [`GraphErr::NotStDigraph`] if the subgraph lacks a unique source or sink, and
    /// [`GraphErr::NotPartitioned`] if the incoming edges of a vertex are scattered.
    pub fn new(g: &Graph, color: EdgeColor) -> GraphResult<ColorSubgraph> {
        let mut edges = Vec::new();
        let mut local = vec![None; g.edge_count()];
        for edge in g.edges().filter(|e| e.color == Some(color)) {
            local[edge.id.0] = Some(edges.len());
            edges.push(SubEdge {
                source: edge.source,
                target: edge.target,
                original: Some(edge.id),
                left_face: None,
                right_face: None,
            });
        }

        let mut rotation = vec![None; g.vertex_count()];
        for vertex in g.vertices() {
            let list: Vec<usize> = vertex.edges.iter().filter_map(|e| local[e.0]).collect();
            if !list.is_empty() {
                rotation[vertex.id.0] = Some(partition(vertex.id, list, &edges)?);
            }
        }

        let touched = || rotation.iter().enumerate().filter_map(|(v, r)| r.as_ref().map(|r| (VertexI(v), r)));
        let sources: Vec<VertexI> = touched().filter(|(_, r)| r.num_incoming == 0).map(|(v, _)| v).collect();
        let sinks: Vec<VertexI> = touched()
            .filter(|(_, r)| r.num_incoming == r.edges.len())
            .map(|(v, _)| v)
            .collect();
        let source = match sources.as_slice() {
            [s] => *s,
            _ => return Err(GraphErr::NotStDigraph { color, what: "source" }),
        };
        let sink = match sinks.as_slice() {
            [t] => *t,
            _ => return Err(GraphErr::NotStDigraph { color, what: "sink" }),
        };

        let phantom = edges.len();
        edges.push(SubEdge {
            source: sink,
            target: source,
            original: None,
            left_face: None,
            right_face: None,
        });
        if let Some(r) = rotation[source.0].as_mut() {
            r.edges.insert(0, phantom);
            r.num_incoming = 1;
        }
        if let Some(r) = rotation[sink.0].as_mut() {
            r.edges.push(phantom);
        }
        trace!("{} subgraph from {} to {} with {} edges", color, source, sink, phantom);

        Ok(ColorSubgraph {
            color,
            source,
            sink,
            edges,
            rotation,
            num_faces: 0,
        })
    }

    fn rot(&self, v: VertexI) -> GraphResult<&LocalRotation> {
        self.rotation
            .get(v.0)
            .and_then(|r| r.as_ref())
            .ok_or_else(|| GraphErr::DualWalk(format!("{} has no {} edges", v, self.color)))
    }

    pub fn contains(&self, v: VertexI) -> bool {
        matches!(self.rotation.get(v.0), Some(Some(_)))
    }

    /// Number of edges, not counting the edge closing the outer face.
    pub fn edge_count(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn face_count(&self) -> usize {
        self.num_faces
    }

    /// Walks up the boundary of 'face', starting at 'start'. With [`Side::Right`] the
    /// face lies right of the walked edges, i.e. the walk follows its left boundary.
    fn walk(&mut self, start: usize, face: FaceI, side: Side) -> GraphResult<()> {
        let mut e = start;
        loop {
            let edge = &mut self.edges[e];
            match side {
                Side::Right => edge.right_face = Some(face),
                Side::Left => edge.left_face = Some(face),
            }
            let t = edge.target;
            if t == self.sink {
                return Ok(());
            }

            let rot = self.rot(t)?;
            let (turn, next) = match side {
                Side::Right => (rot.incoming().first(), rot.outgoing().last()),
                Side::Left => (rot.incoming().last(), rot.outgoing().first()),
            };
            if turn != Some(&e) {
                return Ok(());
            }
            e = *next.ok_or_else(|| GraphErr::DualWalk(format!("{} of {} ends at {}", face, self.color, t)))?;
        }
    }

    /// Assigns a left and a right face to every edge.
    ///
    /// Every face apart from [`S_STAR`] and [`T_STAR`] has a unique lowest vertex at
    /// which it is enclosed by two consecutive outgoing edges.
    /// # Errors
    /// [`GraphErr::DualWalk`] if an edge ends up without a face on either side.
    pub fn assign_faces(&mut self) -> GraphResult<usize> {
        let (first, last) = {
            let src = self.rot(self.source)?;
            match (src.outgoing().first(), src.outgoing().last()) {
                (Some(&first), Some(&last)) => (first, last),
                _ => return Err(GraphErr::NotStDigraph { color: self.color, what: "source" }),
            }
        };
        self.walk(first, S_STAR, Side::Left)?;
        self.walk(last, T_STAR, Side::Right)?;

        let mut next = 2;
        for v in 0..self.rotation.len() {
            if VertexI(v) == self.sink {
                continue;
            }
            let outgoing = match &self.rotation[v] {
                Some(r) => r.outgoing().to_vec(),
                None => continue,
            };
            for (&a, &b) in outgoing.iter().tuple_windows() {
                let f = FaceI(next);
                next += 1;
                self.walk(a, f, Side::Right)?;
                self.walk(b, f, Side::Left)?;
            }
        }

        if let Some(edge) = self
            .edges
            .iter()
            .find(|e| e.original.is_some() && (e.left_face.is_none() || e.right_face.is_none()))
        {
            return Err(GraphErr::DualWalk(format!(
                "{} edge {} -> {} lacks a face",
                self.color, edge.source, edge.target
            )));
        }
        self.num_faces = next;
        debug!("{} subgraph has {} faces", self.color, next);
        Ok(next)
    }

    /// Face on the given side of 'v': left of its leftmost outgoing edge or, at the
    /// sink, left of its leftmost incoming edge (mirrored for the right side).
    pub fn face_of(&self, v: VertexI, side: Side) -> GraphResult<FaceI> {
        let rot = self.rot(v)?;
        let real = |&&i: &&usize| self.edges[i].original.is_some();
        let edge = match side {
            Side::Left => rot
                .outgoing()
                .iter()
                .find(real)
                .or_else(|| rot.incoming().iter().rev().find(real)),
            Side::Right => rot
                .outgoing()
                .iter()
                .rev()
                .find(real)
                .or_else(|| rot.incoming().iter().find(real)),
        };
        let edge = &self.edges[*edge.ok_or_else(|| GraphErr::DualWalk(format!("{} is isolated", v)))?];
        let face = match side {
            Side::Left => edge.left_face,
            Side::Right => edge.right_face,
        };
        face.ok_or_else(|| GraphErr::DualWalk(format!("faces of {} are not assigned", self.color)))
    }

    /// Left and right face of the original edge 'e', if it belongs to this subgraph.
    pub fn faces_of_edge(&self, e: EdgeI) -> Option<(FaceI, FaceI)> {
        self.edges
            .iter()
            .find(|s| s.original == Some(e))
            .and_then(|s| Some((s.left_face?, s.right_face?)))
    }
}

/// Rotates 'list' so that the incoming edges of 'v' come first.
fn partition(v: VertexI, mut list: Vec<usize>, edges: &[SubEdge]) -> GraphResult<LocalRotation> {
    let len = list.len();
    let incoming: Vec<bool> = list.iter().map(|&i| edges[i].target == v).collect();
    let num_incoming = incoming.iter().filter(|&&b| b).count();
    if num_incoming > 0 && num_incoming < len {
        let starts: Vec<usize> = (0..len)
            .filter(|&i| incoming[i] && !incoming[(i + len - 1) % len])
            .collect();
        if starts.len() != 1 {
            return Err(GraphErr::NotPartitioned(v));
        }
        list.rotate_left(starts[0]);
    }
    Ok(LocalRotation {
        edges: list,
        num_incoming,
    })
}

/// The dual of a color subgraph: one node per face, edges crossing the primal
/// edges from their left to their right face.
#[derive(Clone, Debug)]
pub struct Dual {
    pub color: EdgeColor,
    num_faces: usize,
    edges: Vec<(FaceI, FaceI)>,
}

impl Dual {
    pub fn new(sub: &ColorSubgraph) -> Dual {
        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        let crossings = sub
            .edges
            .iter()
            .filter(|e| e.original.is_some())
            .filter_map(|e| Some((e.left_face?, e.right_face?)))
            .chain(std::iter::once((S_STAR, T_STAR)));
        for pair in crossings {
            if seen.insert(pair) {
                edges.push(pair);
            }
        }
        Dual {
            color: sub.color,
            num_faces: sub.face_count(),
            edges,
        }
    }

    pub fn face_count(&self) -> usize {
        self.num_faces
    }

    pub fn edges(&self) -> &[(FaceI, FaceI)] {
        &self.edges
    }

    /// Longest path numbering: faces without predecessors get 1, every other face
    /// one more than its highest predecessor. Returns the numbers and their maximum.
    /// # Errors
    /// [`GraphErr::DualWalk`] if the dual has a directed cycle.
    pub fn compute_topological_order(&self) -> GraphResult<(Vec<usize>, usize)> {
        let n = self.num_faces;
        let mut indeg = vec![0; n];
        let mut succ = vec![Vec::new(); n];
        for &(a, b) in self.edges.iter() {
            indeg[b.0] += 1;
            succ[a.0].push(b);
        }

        let mut level = vec![1; n];
        let mut queue: VecDeque<usize> = (0..n).filter(|&f| indeg[f] == 0).collect();
        let mut processed = 0;
        while let Some(f) = queue.pop_front() {
            processed += 1;
            for &b in succ[f].iter() {
                level[b.0] = level[b.0].max(level[f] + 1);
                indeg[b.0] -= 1;
                if indeg[b.0] == 0 {
                    queue.push_back(b.0);
                }
            }
        }

        if processed != n {
            return Err(GraphErr::DualWalk(format!(
                "{} dual is cyclic, {} of {} faces ordered",
                self.color, processed, n
            )));
        }
        let max = level.iter().copied().max().unwrap_or(0);
        Ok((level, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::graph::{EAST, NORTH, SOUTH, WEST};
    use crate::rel::compute_rel;

    #[test]
    fn test_scenario_a_subgraphs() {
        let mut g = fixtures::scenario_a();
        compute_rel(&mut g).unwrap();

        let mut blue = ColorSubgraph::new(&g, EdgeColor::Blue).unwrap();
        assert_eq!((blue.source, blue.sink), (SOUTH, NORTH));
        assert_eq!(blue.edge_count(), 2);
        assert_eq!(blue.assign_faces().unwrap(), 2);
        assert_eq!(blue.face_of(VertexI(4), Side::Left).unwrap(), S_STAR);
        assert_eq!(blue.face_of(VertexI(4), Side::Right).unwrap(), T_STAR);

        let red = ColorSubgraph::new(&g, EdgeColor::Red).unwrap();
        assert_eq!((red.source, red.sink), (WEST, EAST));
        assert!(!red.contains(NORTH));
    }

    #[test]
    fn test_dual_order_scenario_a() {
        let mut g = fixtures::scenario_a();
        compute_rel(&mut g).unwrap();
        let mut blue = ColorSubgraph::new(&g, EdgeColor::Blue).unwrap();
        blue.assign_faces().unwrap();
        let dual = Dual::new(&blue);
        assert_eq!(dual.edges(), &[(S_STAR, T_STAR)]);
        let (level, max) = dual.compute_topological_order().unwrap();
        assert_eq!(level, vec![1, 2]);
        assert_eq!(max, 2);
    }

    #[test]
    fn test_face_count_matches_euler() {
        let mut g = fixtures::scenario_b();
        compute_rel(&mut g).unwrap();
        for &color in [EdgeColor::Blue, EdgeColor::Red].iter() {
            let mut sub = ColorSubgraph::new(&g, color).unwrap();
            let faces = sub.assign_faces().unwrap();
            let vertices = g.vertex_indices().filter(|&v| sub.contains(v)).count();
            // the closing edge adds one face to the plane graph, the outer face is s* and t*
            assert_eq!(vertices + faces, sub.edge_count() + 1 + 2);
            for e in g.edges().filter(|e| e.color == Some(color)) {
                let (l, r) = sub.faces_of_edge(e.id).unwrap();
                assert_ne!(l, r);
            }
        }
    }

    #[test]
    fn test_unlabeled_graph_is_no_st_graph() {
        let g = fixtures::scenario_a();
        assert!(matches!(
            ColorSubgraph::new(&g, EdgeColor::Blue),
            Err(GraphErr::NotStDigraph { .. })
        ));
    }

    #[test]
    fn test_cyclic_dual_is_rejected() {
        let dual = Dual {
            color: EdgeColor::Red,
            num_faces: 3,
            edges: vec![(FaceI(0), FaceI(2)), (FaceI(2), FaceI(1)), (FaceI(1), FaceI(2))],
        };
        assert!(matches!(dual.compute_topological_order(), Err(GraphErr::DualWalk(_))));
    }
}
