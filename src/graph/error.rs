use itertools::Itertools;
use thiserror::Error;

use crate::graph::enums::EdgeColor;
use crate::graph::indices::{EdgeI, VertexI};

pub type GraphResult<T> = Result<T, GraphErr>;

fn list(vertices: &[VertexI]) -> String {
    vertices.iter().map(|v| v.to_string()).join(", ")
}

#[derive(Debug, Error)]
pub enum GraphErr {
    #[error("vertex {0} does not exist")]
    NoSuchVertex(VertexI),
    #[error("edge {0} does not exist")]
    NoSuchEdge(EdgeI),
    #[error("there is no edge between {0} and {1}")]
    NotAdjacent(VertexI, VertexI),
    #[error("malformed graph: {0}")]
    Malformed(String),
    #[error("graph is not triangulated around {}", list(.0))]
    NotTriangulated(Vec<VertexI>),
    #[error("graph contains separating triangles through {}", list(.0))]
    SeparatingTriangle(Vec<VertexI>),
    #[error("canonical order ran out of candidates with {remaining} vertices left unranked")]
    CanonicalOrderExhausted { remaining: usize },
    #[error("edges around {0} do not split into one incoming and one outgoing run")]
    NotPartitioned(VertexI),
    #[error("graph carries no regular edge labeling")]
    NoRel,
    #[error("regular edge labeling is violated at {}", list(.0))]
    InvalidRel(Vec<VertexI>),
    #[error("{color} subgraph has no unique {what}")]
    NotStDigraph { color: EdgeColor, what: &'static str },
    #[error("dual construction failed: {0}")]
    DualWalk(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GraphErr {
    pub fn malformed<S: Into<String>>(msg: S) -> GraphErr {
        GraphErr::Malformed(msg.into())
    }

    /// Vertices this error is about, if it names any.
    pub fn offending_vertices(&self) -> &[VertexI] {
        match self {
            GraphErr::NotTriangulated(vs) | GraphErr::SeparatingTriangle(vs) | GraphErr::InvalidRel(vs) => vs,
            _ => &[],
        }
    }
}
