use tracing::trace;

use crate::graph::error::GraphResult;
use crate::graph::{Graph, SOUTH, WEST};
use crate::rel::canonical::CanonicalOrder;

/// Orients every edge from lower to higher rank and partitions all edge lists.
///
/// The seed edge between west and south is the exception and points from south to
/// west, so that west is a sink of the outer cycle as well.
pub fn orient(g: &mut Graph, order: &CanonicalOrder) -> GraphResult<()> {
    for v in g.vertex_indices().collect::<Vec<_>>() {
        g.vertex_mut(v).order_index = Some(order.rank(v));
    }

    let seed = g.edge_between(WEST, SOUTH);
    for e in g.edge_indices().collect::<Vec<_>>() {
        let (source, target) = {
            let edge = g.edge(e);
            (edge.source, edge.target)
        };
        let upwards = order.rank(source) < order.rank(target);
        let reverse = if Some(e) == seed { source != SOUTH } else { !upwards };
        if reverse {
            g.edge_mut(e).reverse();
            trace!("reversed {}", e);
        }
    }

    g.partition_all()
}
