use crate::dual::rectangles::Rectangle;
use crate::graph::enums::{EdgeColor, EdgeEnd, RevertibleEnum};
use crate::graph::error::{GraphErr, GraphResult};
use crate::graph::indices::{EdgeI, VertexI};

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub id: EdgeI,
    pub source: VertexI,
    pub target: VertexI,
    pub color: Option<EdgeColor>,
}

impl Edge {
    /// Gets the opposite vertex of 'v' at this edge.
    /// # Errors
    /// If 'v' is not adjacent to the edge, an error is yielded.
    pub fn get_other(&self, v: VertexI) -> GraphResult<VertexI> {
        Ok(match self.end_of(v)? {
            EdgeEnd::Tail => self.target,
            EdgeEnd::Head => self.source,
        })
    }

    /// Gets the end 'v' sits at.
    /// # Errors
    /// If 'v' is not adjacent to this edge, it will return an error.
    pub fn end_of(&self, v: VertexI) -> GraphResult<EdgeEnd> {
        if v == self.source {
            Ok(EdgeEnd::Tail)
        } else if v == self.target {
            Ok(EdgeEnd::Head)
        } else {
            Err(GraphErr::malformed(format!(
                "the given vertex {} is not adjacent to the edge {}",
                v, self.id
            )))
        }
    }

    /// Returns the specified endvertex of this edge.
    pub fn get_vertex(&self, end: EdgeEnd) -> VertexI {
        match end {
            EdgeEnd::Tail => self.source,
            EdgeEnd::Head => self.target,
        }
    }

    pub fn is_incoming_at(&self, v: VertexI) -> bool {
        self.target == v
    }

    pub fn is_outgoing_at(&self, v: VertexI) -> bool {
        self.source == v
    }

    /// Returns true if the edge connects 'a' and 'b', regardless of direction.
    pub fn connects(&self, a: VertexI, b: VertexI) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }

    pub fn reverse(&mut self) {
        let end = self.get_vertex(EdgeEnd::Head.reversed());
        self.source = self.target;
        self.target = end;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    pub id: VertexI,
    pub x: f64,
    pub y: f64,
    /// Incident edges in clockwise order; once partitioned the incoming ones come first.
    pub edges: Vec<EdgeI>,
    pub num_incoming_edges: usize,
    pub order_index: Option<usize>,
    pub rectangle: Option<Rectangle>,
}

impl Vertex {
    pub fn new(id: VertexI, x: f64, y: f64) -> Vertex {
        Vertex {
            id,
            x,
            y,
            edges: Vec::new(),
            num_incoming_edges: 0,
            order_index: None,
            rectangle: None,
        }
    }

    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    pub fn incoming(&self) -> &[EdgeI] {
        &self.edges[..self.num_incoming_edges]
    }

    pub fn outgoing(&self) -> &[EdgeI] {
        &self.edges[self.num_incoming_edges..]
    }

    /// Position of 'e' in the rotation of this vertex.
    pub fn position_of(&self, e: EdgeI) -> Option<usize> {
        self.edges.iter().position(|&f| f == e)
    }

    pub fn first_incoming(&self) -> Option<EdgeI> {
        self.incoming().first().copied()
    }

    pub fn last_incoming(&self) -> Option<EdgeI> {
        self.incoming().last().copied()
    }

    pub fn first_outgoing(&self) -> Option<EdgeI> {
        self.outgoing().first().copied()
    }

    pub fn last_outgoing(&self) -> Option<EdgeI> {
        self.outgoing().last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_ends() {
        let mut e = Edge {
            id: EdgeI(0),
            source: VertexI(1),
            target: VertexI(2),
            color: None,
        };
        assert_eq!(e.get_other(VertexI(1)).unwrap(), VertexI(2));
        assert_eq!(e.end_of(VertexI(2)).unwrap(), EdgeEnd::Head);
        assert!(e.get_other(VertexI(3)).is_err());

        e.reverse();
        assert_eq!(e.source, VertexI(2));
        assert_eq!(e.target, VertexI(1));
        assert!(e.connects(VertexI(1), VertexI(2)));
        assert!(e.is_incoming_at(VertexI(1)));
    }
}
