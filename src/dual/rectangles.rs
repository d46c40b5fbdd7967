use serde::{Deserialize, Serialize};
use tracing::info;

use crate::dual::{ColorSubgraph, Dual};
use crate::graph::enums::{EdgeColor, Side};
use crate::graph::error::{GraphErr, GraphResult};
use crate::graph::indices::VertexI;
use crate::graph::{Graph, EAST, NORTH, SOUTH, WEST};

/// Axis parallel rectangle on the integer grid, y growing southwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rectangle {
    pub x1: usize,
    pub x2: usize,
    pub y1: usize,
    pub y2: usize,
}

impl Rectangle {
    pub fn new(x1: usize, x2: usize, y1: usize, y2: usize) -> Rectangle {
        Rectangle { x1, x2, y1, y2 }
    }

    pub fn width(&self) -> usize {
        self.x2.saturating_sub(self.x1)
    }

    pub fn height(&self) -> usize {
        self.y2.saturating_sub(self.y1)
    }

    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    /// True if the interiors intersect; touching sides do not count.
    pub fn overlaps(&self, other: &Rectangle) -> bool {
        self.x1 < other.x2 && other.x1 < self.x2 && self.y1 < other.y2 && other.y1 < self.y2
    }

    /// True if both share a side segment of positive length.
    pub fn touches(&self, other: &Rectangle) -> bool {
        let x_overlap = self.x1.max(other.x1) < self.x2.min(other.x2);
        let y_overlap = self.y1.max(other.y1) < self.y2.min(other.y2);
        (x_overlap && (self.y2 == other.y1 || other.y2 == self.y1))
            || (y_overlap && (self.x2 == other.x1 || other.x2 == self.x1))
    }
}

/// The rectangles of all vertices together with the size of the grid they tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RectangularDual {
    pub xmax: usize,
    pub ymax: usize,
    pub rectangles: Vec<Rectangle>,
}

/// Face numbering of one color: the numbers per face plus their maximum.
fn layering(g: &Graph, color: EdgeColor) -> GraphResult<(ColorSubgraph, Vec<usize>, usize)> {
    let mut sub = ColorSubgraph::new(g, color)?;
    sub.assign_faces()?;
    let (level, max) = Dual::new(&sub).compute_topological_order()?;
    Ok((sub, level, max))
}

impl RectangularDual {
    /// Builds the rectangular dual of a graph carrying a regular edge labeling and
    /// stores the rectangles and grid size in the graph.
    /// # Errors
    /// [`GraphErr::NoRel`] if no labeling is present, otherwise failures of the
    /// color subgraphs or their duals.
    pub fn compute(g: &mut Graph) -> GraphResult<RectangularDual> {
        if !g.has_rel() {
            return Err(GraphErr::NoRel);
        }

        let (blue, x_level, blue_max) = layering(g, EdgeColor::Blue)?;
        let (red, y_level, red_max) = layering(g, EdgeColor::Red)?;
        let xmax = blue_max + 1;
        let ymax = red_max + 1;

        let mut rectangles = Vec::with_capacity(g.vertex_count());
        for v in g.vertex_indices() {
            let rect = match v {
                NORTH => Rectangle::new(0, xmax, 0, 1),
                SOUTH => Rectangle::new(0, xmax, ymax - 1, ymax),
                WEST => Rectangle::new(0, 1, 1, ymax - 1),
                EAST => Rectangle::new(xmax - 1, xmax, 1, ymax - 1),
                _ => Rectangle::new(
                    x_level[blue.face_of(v, Side::Left)?.0],
                    x_level[blue.face_of(v, Side::Right)?.0],
                    y_level[red.face_of(v, Side::Left)?.0],
                    y_level[red.face_of(v, Side::Right)?.0],
                ),
            };
            rectangles.push(rect);
        }

        for (v, rect) in rectangles.iter().enumerate() {
            g.vertex_mut(VertexI(v)).rectangle = Some(*rect);
        }
        g.xmax = Some(xmax);
        g.ymax = Some(ymax);
        info!("rectangular dual of '{}' on a {} x {} grid", g.name, xmax, ymax);

        Ok(RectangularDual {
            xmax,
            ymax,
            rectangles,
        })
    }

    pub fn rectangle(&self, v: VertexI) -> Option<&Rectangle> {
        self.rectangles.get(v.0)
    }

    /// Pairs of vertices whose rectangles overlap.
    pub fn overlapping_pairs(&self) -> Vec<(VertexI, VertexI)> {
        let mut pairs = Vec::new();
        for (i, a) in self.rectangles.iter().enumerate() {
            for (j, b) in self.rectangles.iter().enumerate().skip(i + 1) {
                if a.overlaps(b) {
                    pairs.push((VertexI(i), VertexI(j)));
                }
            }
        }
        pairs
    }

    /// Checks that the rectangles are non degenerate, stay inside the grid, do not
    /// overlap and cover it completely.
    /// # Errors
    /// [`GraphErr::InvalidRel`] naming the vertices with broken rectangles.
    pub fn check_tiling(&self) -> GraphResult<()> {
        let mut broken: Vec<VertexI> = self
            .rectangles
            .iter()
            .enumerate()
            .filter(|(_, r)| r.area() == 0 || r.x2 > self.xmax || r.y2 > self.ymax)
            .map(|(v, _)| VertexI(v))
            .collect();
        for (a, b) in self.overlapping_pairs() {
            broken.push(a);
            broken.push(b);
        }
        broken.sort();
        broken.dedup();
        if !broken.is_empty() {
            return Err(GraphErr::InvalidRel(broken));
        }

        let covered: usize = self.rectangles.iter().map(Rectangle::area).sum();
        if covered != self.xmax * self.ymax {
            return Err(GraphErr::DualWalk(format!(
                "rectangles cover {} of {} cells",
                covered,
                self.xmax * self.ymax
            )));
        }
        Ok(())
    }

    /// Plain table with one line per vertex.
    pub fn to_table(&self) -> String {
        let mut out = format!("grid {} x {}\n", self.xmax, self.ymax);
        for (v, r) in self.rectangles.iter().enumerate() {
            out.push_str(&format!(
                "{:>6}  x {:>3} .. {:<3} y {:>3} .. {:<3}\n",
                VertexI(v).to_string(),
                r.x1,
                r.x2,
                r.y1,
                r.y2
            ));
        }
        out
    }
}
