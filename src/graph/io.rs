use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::enums::EdgeColor;
use crate::graph::error::{GraphErr, GraphResult};
use crate::graph::indices::{EdgeI, VertexI};
use crate::graph::Graph;
use crate::rel::coloring::check_rel;

#[derive(Serialize, Deserialize, Debug)]
struct VertexDoc {
    id: VertexI,
    x: f64,
    y: f64,
}

#[derive(Serialize, Deserialize, Debug)]
struct EdgeDoc {
    id: EdgeI,
    source: VertexI,
    target: VertexI,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<EdgeColor>,
}

#[derive(Serialize, Deserialize, Debug)]
struct GraphDoc {
    id: usize,
    name: String,
    vertices: Vec<VertexDoc>,
    edges: Vec<EdgeDoc>,
    #[serde(rename = "hasREL", default, skip_serializing_if = "Option::is_none")]
    has_rel: Option<bool>,
}

impl Graph {
    /// Parses the JSON form of a graph.
    ///
    /// The rotation system is derived from the coordinates. If the document carries
    /// edge colors, the labeling is taken over as is: edges keep their direction,
    /// edge lists are partitioned and the labeling is checked, but nothing is
    /// recomputed.
    /// # Errors
    /// Syntax errors, ids that differ from their position, invalid edges and, for
    /// labeled documents, labelings that are not regular.
    pub fn from_json_str(json: &str) -> GraphResult<Graph> {
        let doc: GraphDoc = serde_json::from_str(json)?;
        Graph::from_doc(doc)
    }

    pub fn read_json<R: Read>(reader: R) -> GraphResult<Graph> {
        let doc: GraphDoc = serde_json::from_reader(reader)?;
        Graph::from_doc(doc)
    }

    pub fn read_json_file<P: AsRef<Path>>(path: P) -> GraphResult<Graph> {
        let file = File::open(path)?;
        Graph::read_json(BufReader::new(file))
    }

    fn from_doc(doc: GraphDoc) -> GraphResult<Graph> {
        let mut g = Graph::new(doc.id, &doc.name);
        for (i, v) in doc.vertices.iter().enumerate() {
            if v.id.0 != i {
                return Err(GraphErr::malformed(format!("vertex at position {} has id {}", i, v.id.0)));
            }
            g.add_vertex(v.x, v.y);
        }
        for (i, e) in doc.edges.iter().enumerate() {
            if e.id.0 != i {
                return Err(GraphErr::malformed(format!("edge at position {} has id {}", i, e.id.0)));
            }
            let id = g.add_edge(e.source, e.target)?;
            g.edge_mut(id).color = e.color;
        }
        g.embed();

        let labeled = doc.edges.iter().any(|e| e.color.is_some());
        if labeled || doc.has_rel == Some(true) {
            g.partition_all()?;
            check_rel(&g)?;
            g.set_has_rel(true);
        }
        debug!(
            "read '{}' with {} vertices and {} edges, labeled: {}",
            g.name,
            g.vertex_count(),
            g.edge_count(),
            g.has_rel()
        );
        Ok(g)
    }

    fn to_doc(&self) -> GraphDoc {
        GraphDoc {
            id: self.id,
            name: self.name.clone(),
            vertices: self
                .vertices()
                .map(|v| VertexDoc {
                    id: v.id,
                    x: v.x,
                    y: v.y,
                })
                .collect(),
            edges: self
                .edges()
                .map(|e| EdgeDoc {
                    id: e.id,
                    source: e.source,
                    target: e.target,
                    color: e.color,
                })
                .collect(),
            has_rel: if self.has_rel() { Some(true) } else { None },
        }
    }

    pub fn to_json_string(&self) -> GraphResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_doc())?)
    }

    pub fn write_json<W: Write>(&self, writer: W) -> GraphResult<()> {
        serde_json::to_writer_pretty(writer, &self.to_doc())?;
        Ok(())
    }

    pub fn write_json_file<P: AsRef<Path>>(&self, path: P) -> GraphResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_json(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::graph::{EAST, NORTH, SOUTH, WEST};
    use crate::rel::compute_rel;

    const SCENARIO_A: &str = r#"{
        "id": 7,
        "name": "diamond",
        "vertices": [
            {"id": 0, "x": 0, "y": 100},
            {"id": 1, "x": 100, "y": 200},
            {"id": 2, "x": 200, "y": 100},
            {"id": 3, "x": 100, "y": 0},
            {"id": 4, "x": 100, "y": 100}
        ],
        "edges": [
            {"id": 0, "source": 0, "target": 1},
            {"id": 1, "source": 1, "target": 2},
            {"id": 2, "source": 2, "target": 3},
            {"id": 3, "source": 3, "target": 0},
            {"id": 4, "source": 0, "target": 4},
            {"id": 5, "source": 1, "target": 4},
            {"id": 6, "source": 2, "target": 4},
            {"id": 7, "source": 3, "target": 4}
        ]
    }"#;

    #[test]
    fn test_read_plain_graph() {
        let g = Graph::from_json_str(SCENARIO_A).unwrap();
        assert_eq!((g.id, g.name.as_str()), (7, "diamond"));
        assert_eq!(g.vertex_count(), 5);
        assert_eq!(g.edge_count(), 8);
        assert!(!g.has_rel());
        let around: Vec<VertexI> = g.neighbors(VertexI(4)).collect();
        assert_eq!(around, vec![NORTH, EAST, SOUTH, WEST]);
    }

    #[test]
    fn test_round_trip_keeps_labeling() {
        let mut g = fixtures::scenario_b();
        compute_rel(&mut g).unwrap();
        let json = g.to_json_string().unwrap();
        assert!(json.contains("\"hasREL\": true"));

        let h = Graph::from_json_str(&json).unwrap();
        assert!(h.has_rel());
        assert_eq!(h.vertex_count(), g.vertex_count());
        for (a, b) in g.edges().zip(h.edges()) {
            assert_eq!((a.source, a.target, a.color), (b.source, b.target, b.color));
        }
        for (a, b) in g.vertices().zip(h.vertices()) {
            assert_eq!(a.edges, b.edges);
            assert_eq!(a.num_incoming_edges, b.num_incoming_edges);
        }
    }

    #[test]
    fn test_unlabeled_edges_omit_color() {
        let g = Graph::from_json_str(SCENARIO_A).unwrap();
        let mut out = Vec::new();
        g.write_json(&mut out).unwrap();
        let json = String::from_utf8(out).unwrap();
        assert!(!json.contains("color"));
        assert!(!json.contains("hasREL"));
    }

    #[test]
    fn test_ids_must_match_positions() {
        let json = SCENARIO_A.replace("{\"id\": 4, \"x\"", "{\"id\": 9, \"x\"");
        assert!(matches!(Graph::from_json_str(&json), Err(GraphErr::Malformed(_))));
        assert!(matches!(Graph::from_json_str("{\"id\": 1"), Err(GraphErr::Json(_))));
    }

    #[test]
    fn test_irregular_labeling_is_rejected() {
        let mut g = fixtures::scenario_a();
        compute_rel(&mut g).unwrap();
        let json = g.to_json_string().unwrap().replacen("\"blue\"", "\"red\"", 1);
        assert!(matches!(Graph::from_json_str(&json), Err(GraphErr::InvalidRel(_))));
    }
}
