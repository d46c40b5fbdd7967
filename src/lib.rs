//! Regular edge labelings, rectangular duals and flip cycles of properly
//! triangulated planar graphs with a quadrilateral outer face.

pub mod dual;
pub mod flip;
pub mod graph;
pub mod rel;
pub mod util;

#[cfg(test)]
pub(crate) mod fixtures;

pub use crate::dual::rectangles::{Rectangle, RectangularDual};
pub use crate::flip::{find_flip_cycles, flip, FlipCycle, FlipCycleType};
pub use crate::graph::error::{GraphErr, GraphResult};
pub use crate::graph::Graph;
pub use crate::rel::compute_rel;
