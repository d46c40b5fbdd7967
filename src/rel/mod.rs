//! Regular edge labelings via a canonical order.

use tracing::info;

use crate::graph::error::GraphResult;
use crate::graph::validation::validate;
use crate::graph::Graph;

pub mod canonical;
pub mod coloring;
pub mod orientation;

pub use canonical::CanonicalOrder;
pub use coloring::{check_rel, count_runs, rel_defects};

/// Validates 'g' and equips it with a regular edge labeling.
///
/// Edges end up oriented along a canonical order, every edge list is partitioned
/// and every inner edge carries a color. Rectangles of an earlier dual are dropped.
/// # Errors
/// Whatever [`validate`] rejects, plus failures of the construction itself.
pub fn compute_rel(g: &mut Graph) -> GraphResult<CanonicalOrder> {
    validate(g)?;
    let order = CanonicalOrder::compute(g)?;
    orientation::orient(g, &order)?;
    coloring::color_edges(g, &order)?;
    g.set_has_rel(true);
    g.clear_rectangles();
    info!(
        "regular edge labeling of '{}' computed ({} vertices, {} edges)",
        g.name,
        g.vertex_count(),
        g.edge_count()
    );
    Ok(order)
}
