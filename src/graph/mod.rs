use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::trace;

use crate::graph::data_holders::{Edge, Vertex};
use crate::graph::enums::EdgeEnd;
use crate::graph::error::{GraphErr, GraphResult};
use crate::graph::indices::{EdgeI, VertexI};

pub mod data_holders;
pub mod enums;
pub mod error;
pub mod indices;
pub mod io;
pub mod validation;

pub const WEST: VertexI = VertexI(0);
pub const SOUTH: VertexI = VertexI(1);
pub const EAST: VertexI = VertexI(2);
pub const NORTH: VertexI = VertexI(3);

/// The outer quadrilateral in clockwise order.
pub const OUTER: [VertexI; 4] = [WEST, NORTH, EAST, SOUTH];

/// Plane graph with a fixed outer 4-cycle on the vertices 0 to 3.
///
/// Vertices and edges live in arenas and are addressed by [`VertexI`] and [`EdgeI`].
/// Coordinates follow the screen convention (y grows downwards); they are only used
/// to derive the rotation system in [`Graph::embed`].
#[derive(Clone, Debug)]
pub struct Graph {
    pub id: usize,
    pub name: String,
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    adjacency: HashMap<(VertexI, VertexI), EdgeI>,
    has_rel: bool,
    pub xmax: Option<usize>,
    pub ymax: Option<usize>,
}

fn key(a: VertexI, b: VertexI) -> (VertexI, VertexI) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl Graph {
    pub fn new(id: usize, name: &str) -> Graph {
        Graph {
            id,
            name: name.to_string(),
            vertices: Vec::new(),
            edges: Vec::new(),
            adjacency: HashMap::new(),
            has_rel: false,
            xmax: None,
            ymax: None,
        }
    }

    pub fn add_vertex(&mut self, x: f64, y: f64) -> VertexI {
        let id = VertexI(self.vertices.len());
        self.vertices.push(Vertex::new(id, x, y));
        id
    }

    /// Adds the edge 'source' -> 'target'. The rotation of both endpoints is only
    /// restored by the next call to [`Graph::embed`].
    /// # Errors
    /// Loops, parallel edges and unknown endpoints are rejected.
    pub fn add_edge(&mut self, source: VertexI, target: VertexI) -> GraphResult<EdgeI> {
        self.try_vertex(source)?;
        self.try_vertex(target)?;
        if source == target {
            return Err(GraphErr::malformed(format!("loop at {}", source)));
        }
        if self.adjacency.contains_key(&key(source, target)) {
            return Err(GraphErr::malformed(format!(
                "parallel edge between {} and {}",
                source, target
            )));
        }

        let id = EdgeI(self.edges.len());
        self.edges.push(Edge {
            id,
            source,
            target,
            color: None,
        });
        self.adjacency.insert(key(source, target), id);
        self.vertices[source.0].edges.push(id);
        self.vertices[target.0].edges.push(id);
        Ok(id)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn vertex_indices(&self) -> impl Iterator<Item = VertexI> {
        (0..self.vertices.len()).map(VertexI)
    }

    pub fn edge_indices(&self) -> impl Iterator<Item = EdgeI> {
        (0..self.edges.len()).map(EdgeI)
    }

    pub fn try_vertex(&self, v: VertexI) -> GraphResult<&Vertex> {
        self.vertices.get(v.0).ok_or(GraphErr::NoSuchVertex(v))
    }

    pub fn try_edge(&self, e: EdgeI) -> GraphResult<&Edge> {
        self.edges.get(e.0).ok_or(GraphErr::NoSuchEdge(e))
    }

    /// Panics on indices that were not handed out by this graph.
    pub fn vertex(&self, v: VertexI) -> &Vertex {
        &self.vertices[v.0]
    }

    /// Panics on indices that were not handed out by this graph.
    pub fn edge(&self, e: EdgeI) -> &Edge {
        &self.edges[e.0]
    }

    pub(crate) fn edge_mut(&mut self, e: EdgeI) -> &mut Edge {
        &mut self.edges[e.0]
    }

    pub(crate) fn vertex_mut(&mut self, v: VertexI) -> &mut Vertex {
        &mut self.vertices[v.0]
    }

    pub fn is_outer(&self, v: VertexI) -> bool {
        v.0 < 4
    }

    /// Returns true for the four edges of the outer quadrilateral.
    pub fn is_outer_edge(&self, e: EdgeI) -> bool {
        let edge = self.edge(e);
        self.is_outer(edge.source) && self.is_outer(edge.target)
    }

    pub fn edge_between(&self, a: VertexI, b: VertexI) -> Option<EdgeI> {
        self.adjacency.get(&key(a, b)).copied()
    }

    pub fn are_adjacent(&self, a: VertexI, b: VertexI) -> bool {
        self.adjacency.contains_key(&key(a, b))
    }

    /// Gets the opposite vertex of 'v' at edge 'e'.
    /// # Errors
    /// If 'v' is not an endpoint of 'e'.
    pub fn opposite(&self, e: EdgeI, v: VertexI) -> GraphResult<VertexI> {
        self.try_edge(e)?.get_other(v)
    }

    /// Neighbors of 'v' in rotation order.
    pub fn neighbors(&self, v: VertexI) -> impl Iterator<Item = VertexI> + '_ {
        self.vertex(v).edges.iter().map(move |&e| {
            let edge = self.edge(e);
            if edge.source == v {
                edge.target
            } else {
                edge.source
            }
        })
    }

    pub fn has_rel(&self) -> bool {
        self.has_rel
    }

    pub(crate) fn set_has_rel(&mut self, has_rel: bool) {
        self.has_rel = has_rel;
    }

    /// Drops rectangles and grid size, e.g. after the labeling changed.
    pub fn clear_rectangles(&mut self) {
        for vertex in self.vertices.iter_mut() {
            vertex.rectangle = None;
        }
        self.xmax = None;
        self.ymax = None;
    }

    /// Derives the rotation system from the vertex coordinates.
    ///
    /// Edges around every vertex are sorted clockwise (on screen) by the polar angle
    /// of the opposite vertex. Lists of outer vertices start right after the outer
    /// face, so that e.g. the list of the south vertex starts with the west vertex.
    /// Any previous in/out partition is discarded.
    pub fn embed(&mut self) {
        for v in 0..self.vertices.len() {
            let (vx, vy) = (self.vertices[v].x, self.vertices[v].y);
            let mut keyed: Vec<(f64, EdgeI)> = self.vertices[v]
                .edges
                .iter()
                .map(|&e| {
                    let edge = &self.edges[e.0];
                    let other = if edge.source.0 == v { edge.target } else { edge.source };
                    let o = &self.vertices[other.0];
                    ((o.y - vy).atan2(o.x - vx), e)
                })
                .collect();
            keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

            let mut rotation: Vec<EdgeI> = keyed.into_iter().map(|(_, e)| e).collect();
            if v < 4 {
                let anchor = VertexI((v + 3) % 4);
                if let Some(pos) = rotation.iter().position(|&e| self.edges[e.0].connects(VertexI(v), anchor)) {
                    rotation.rotate_left(pos);
                }
            }

            let vertex = &mut self.vertices[v];
            vertex.edges = rotation;
            vertex.num_incoming_edges = 0;
        }
        trace!("rotation system derived for {} vertices", self.vertices.len());
    }

    /// Rotates the edge list of 'v' so that all incoming edges form a prefix and
    /// records their number.
    ///
    /// Vertices whose edges all point the same way keep their current list start.
    /// # Errors
    /// If the incoming edges do not form exactly one contiguous run.
    pub fn partition_edges(&mut self, v: VertexI) -> GraphResult<()> {
        let incoming: Vec<bool> = self
            .try_vertex(v)?
            .edges
            .iter()
            .map(|&e| self.edges[e.0].end_of(v).map(|end| end == EdgeEnd::Head))
            .collect::<GraphResult<_>>()?;

        let len = incoming.len();
        let num_incoming = incoming.iter().filter(|&&b| b).count();
        if num_incoming > 0 && num_incoming < len {
            let starts: Vec<usize> = (0..len)
                .filter(|&i| incoming[i] && !incoming[(i + len - 1) % len])
                .collect();
            if starts.len() != 1 {
                return Err(GraphErr::NotPartitioned(v));
            }
            self.vertices[v.0].edges.rotate_left(starts[0]);
        }
        self.vertices[v.0].num_incoming_edges = num_incoming;
        Ok(())
    }

    pub fn partition_all(&mut self) -> GraphResult<()> {
        for v in 0..self.vertices.len() {
            self.partition_edges(VertexI(v))?;
        }
        Ok(())
    }
}
