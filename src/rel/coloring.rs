use itertools::Itertools;
use tracing::{debug, trace};

use crate::graph::enums::EdgeColor;
use crate::graph::error::{GraphErr, GraphResult};
use crate::graph::indices::{EdgeI, VertexI};
use crate::graph::{Graph, EAST, NORTH, SOUTH, WEST};
use crate::rel::canonical::CanonicalOrder;

/// Labels every inner edge by looking at the incoming edges of its head.
///
/// The base edge of a vertex is the incoming edge from its lowest ranked neighbor.
/// Inner edges in front of it are blue, those behind it red. The base edge itself is
/// red when it closes the incoming run and blue otherwise. Edges of the outer
/// 4-cycle stay unlabeled.
pub fn color_edges(g: &mut Graph, order: &CanonicalOrder) -> GraphResult<()> {
    for v in g.vertex_indices().collect::<Vec<_>>() {
        let incoming: Vec<EdgeI> = g.vertex(v).incoming().to_vec();
        let base = match incoming.iter().min_by_key(|&&e| order.rank(g.edge(e).source)) {
            Some(&base) => base,
            None => continue,
        };

        let mut before_base = true;
        for (i, &e) in incoming.iter().enumerate() {
            let color = if e == base {
                before_base = false;
                if i == incoming.len() - 1 && i > 0 {
                    EdgeColor::Red
                } else {
                    EdgeColor::Blue
                }
            } else if before_base {
                EdgeColor::Blue
            } else {
                EdgeColor::Red
            };

            if g.is_outer_edge(e) {
                g.edge_mut(e).color = None;
            } else {
                g.edge_mut(e).color = Some(color);
                trace!("{} at {} is {}", e, v, color);
            }
        }
    }
    Ok(())
}

/// Direction and label of an edge as seen from one of its endpoints.
type Slot = (bool, Option<EdgeColor>);

fn slots(g: &Graph, v: VertexI) -> Vec<Slot> {
    g.vertex(v)
        .edges
        .iter()
        .filter(|&&e| !g.is_outer_edge(e))
        .map(|&e| {
            let edge = g.edge(e);
            (edge.is_incoming_at(v), edge.color)
        })
        .collect()
}

/// Number of maximal runs of equally directed and labeled edges around 'v', counted
/// cyclically. Edges of the outer 4-cycle are ignored.
pub fn count_runs(g: &Graph, v: VertexI) -> usize {
    let slots = slots(g, v);
    let len = slots.len();
    if len == 0 {
        return 0;
    }
    let changes = (0..len).filter(|&i| slots[i] != slots[(i + 1) % len]).count();
    if changes == 0 {
        1
    } else {
        changes
    }
}

fn is_valid_at(g: &Graph, v: VertexI) -> bool {
    let slots = slots(g, v);
    if slots.iter().any(|&(_, color)| color.is_none()) {
        return false;
    }

    let expected: &[Slot] = match v {
        SOUTH => &[(false, Some(EdgeColor::Blue))],
        NORTH => &[(true, Some(EdgeColor::Blue))],
        WEST => &[(false, Some(EdgeColor::Red))],
        EAST => &[(true, Some(EdgeColor::Red))],
        _ => &[
            (true, Some(EdgeColor::Blue)),
            (true, Some(EdgeColor::Red)),
            (false, Some(EdgeColor::Blue)),
            (false, Some(EdgeColor::Red)),
        ],
    };

    // the partitioned edge list has to read exactly the expected runs in order
    let runs: Vec<Slot> = slots.into_iter().dedup().collect();
    runs == expected
}

/// Vertices around which the labeling is not regular.
pub fn rel_defects(g: &Graph) -> Vec<VertexI> {
    g.vertex_indices().filter(|&v| !is_valid_at(g, v)).collect()
}

/// Checks the local rule of a regular edge labeling at every vertex.
/// # Errors
/// [`GraphErr::InvalidRel`] with all vertices violating the rule.
pub fn check_rel(g: &Graph) -> GraphResult<()> {
    let defects = rel_defects(g);
    if defects.is_empty() {
        Ok(())
    } else {
        debug!("labeling is not regular at {:?}", defects);
        Err(GraphErr::InvalidRel(defects))
    }
}
