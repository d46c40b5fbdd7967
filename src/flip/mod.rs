//! Alternating 4-cycles of a regular edge labeling and the flips along them.
//!
//! A flip cycle runs u -> v blue, v -> w red, x -> w blue and u -> x red, so u, v,
//! w and x are its south west, north west, north east and south east corners.
//! Flipping relabels every edge inside the cycle and yields another regular edge
//! labeling whose rectangular dual differs from the old one only inside the
//! rectangle spanned by the four corners.

use std::collections::HashSet;
use std::fmt;

use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, info};

use crate::graph::enums::{ClockDirection, EdgeColor};
use crate::graph::error::{GraphErr, GraphResult};
use crate::graph::indices::{EdgeI, VertexI};
use crate::graph::Graph;
use crate::util::iterators::cyclic::CyclicIterable;

pub mod random_walk;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum FlipCycleType {
    /// The cycle encloses at least one vertex.
    Separating,
    /// Only a chord lies inside the cycle.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlipCycle {
    pub u: VertexI,
    pub v: VertexI,
    pub w: VertexI,
    pub x: VertexI,
    pub ue: EdgeI,
    pub ve: EdgeI,
    pub we: EdgeI,
    pub xe: EdgeI,
    pub orientation: ClockDirection,
    pub kind: FlipCycleType,
}

impl fmt::Display for FlipCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} ({}, {})",
            self.u,
            self.v,
            self.w,
            self.x,
            self.orientation,
            match self.kind {
                FlipCycleType::Separating => "separating",
                FlipCycleType::Empty => "empty",
            }
        )
    }
}

impl FlipCycle {
    /// Corners in clockwise order, starting at the south west corner.
    pub fn corners(&self) -> [VertexI; 4] {
        [self.u, self.v, self.w, self.x]
    }

    pub fn edges(&self) -> [EdgeI; 4] {
        [self.ue, self.ve, self.we, self.xe]
    }

    pub fn is_corner(&self, v: VertexI) -> bool {
        self.corners().contains(&v)
    }

    /// Edges strictly inside the cycle together with the vertices they enclose.
    pub fn interior(&self, g: &Graph) -> GraphResult<(Vec<EdgeI>, Vec<VertexI>)> {
        let corners = self.corners();
        let mut worklist = Vec::new();

        for (i, &c) in corners.iter().enumerate() {
            let next = corners[(i + 1) % 4];
            let prev = corners[(i + 3) % 4];
            let e_next = g.edge_between(c, next).ok_or(GraphErr::NotAdjacent(c, next))?;
            let e_prev = g.edge_between(c, prev).ok_or(GraphErr::NotAdjacent(c, prev))?;

            let edges = &g.vertex(c).edges;
            let p_next = g.vertex(c).position_of(e_next).ok_or(GraphErr::NotAdjacent(c, next))?;
            worklist.extend(
                edges
                    .cycle(p_next, false)
                    .skip(1)
                    .take_while(|&&e| e != e_prev)
                    .copied(),
            );
        }

        let mut edges = HashSet::new();
        let mut vertices = HashSet::new();
        while let Some(e) = worklist.pop() {
            if !edges.insert(e) {
                continue;
            }
            let edge = g.edge(e);
            for &end in [edge.source, edge.target].iter() {
                if !self.is_corner(end) && vertices.insert(end) {
                    worklist.extend(g.vertex(end).edges.iter().copied());
                }
            }
        }

        Ok((
            edges.into_iter().sorted().collect(),
            vertices.into_iter().sorted().collect(),
        ))
    }
}

/// Sense of rotation of the cycle, read off the corner 'v' (and 'w' if the
/// cycle's interior does not reach 'v').
fn orientation(g: &Graph, u: VertexI, v: VertexI, ue: EdgeI, ve: EdgeI, we: EdgeI) -> GraphResult<ClockDirection> {
    let edges = &g.vertex(v).edges;
    let ue_first = edges.first() == Some(&ue);
    let ve_last = edges.last() == Some(&ve);
    match (ue_first, ve_last) {
        (true, false) => Ok(ClockDirection::CCW),
        (false, true) => Ok(ClockDirection::CW),
        (true, true) => {
            let w = g.edge(we).target;
            let around = &g.vertex(w).edges;
            let pos = g.vertex(w).position_of(we).ok_or(GraphErr::NoSuchEdge(we))?;
            let after = around[(pos + 1) % around.len()];
            match g.edge(after).color {
                Some(EdgeColor::Blue) => Ok(ClockDirection::CCW),
                Some(EdgeColor::Red) => Ok(ClockDirection::CW),
                None => Err(GraphErr::InvalidRel(vec![w])),
            }
        }
        (false, false) => {
            debug!("cannot orient cycle through {} and {}", u, v);
            Err(GraphErr::InvalidRel(vec![v]))
        }
    }
}

fn colored(g: &Graph, e: EdgeI, color: EdgeColor) -> bool {
    g.edge(e).color == Some(color)
}

/// Enumerates all flip cycles of the current labeling, ordered by their south west
/// corner.
/// # Errors
/// [`GraphErr::NoRel`] if the graph carries no labeling.
pub fn find_flip_cycles(g: &Graph) -> GraphResult<Vec<FlipCycle>> {
    if !g.has_rel() {
        return Err(GraphErr::NoRel);
    }

    let mut cycles = Vec::new();
    for u in g.vertex_indices() {
        for &ue in g.vertex(u).outgoing().iter().filter(|&&e| colored(g, e, EdgeColor::Blue)) {
            let v = g.edge(ue).target;
            for &ve in g.vertex(v).outgoing().iter().filter(|&&e| colored(g, e, EdgeColor::Red)) {
                let w = g.edge(ve).target;
                for &we in g.vertex(w).incoming().iter().filter(|&&e| colored(g, e, EdgeColor::Blue)) {
                    let x = g.edge(we).source;
                    if x == u || x == v {
                        continue;
                    }
                    let xe = match g.edge_between(u, x) {
                        Some(xe) if g.edge(xe).source == u && colored(g, xe, EdgeColor::Red) => xe,
                        _ => continue,
                    };

                    let mut cycle = FlipCycle {
                        u,
                        v,
                        w,
                        x,
                        ue,
                        ve,
                        we,
                        xe,
                        orientation: orientation(g, u, v, ue, ve, we)?,
                        kind: FlipCycleType::Empty,
                    };
                    if !cycle.interior(g)?.1.is_empty() {
                        cycle.kind = FlipCycleType::Separating;
                    }
                    cycles.push(cycle);
                }
            }
        }
    }
    debug!("{} flip cycles found", cycles.len());
    Ok(cycles)
}

/// Flips 'cycle' and returns the relabeled edges.
///
/// Clockwise cycles turn blue edges into reversed red ones and red edges into blue
/// ones, counterclockwise cycles turn red into reversed blue and blue into red. The
/// edge lists of every touched vertex are partitioned again and the rectangles
/// dropped.
/// # Errors
/// [`GraphErr::NoRel`] without a labeling and [`GraphErr::InvalidRel`] if the cycle
/// no longer alternates in the current labeling.
pub fn flip(g: &mut Graph, cycle: &FlipCycle) -> GraphResult<Vec<EdgeI>> {
    if !g.has_rel() {
        return Err(GraphErr::NoRel);
    }
    let expected = [
        (cycle.ue, cycle.u, EdgeColor::Blue),
        (cycle.ve, cycle.v, EdgeColor::Red),
        (cycle.we, cycle.x, EdgeColor::Blue),
        (cycle.xe, cycle.u, EdgeColor::Red),
    ];
    for &(e, source, color) in expected.iter() {
        let edge = g.try_edge(e)?;
        if edge.source != source || edge.color != Some(color) {
            return Err(GraphErr::InvalidRel(cycle.corners().to_vec()));
        }
    }

    let (edges, vertices) = cycle.interior(g)?;
    for &e in edges.iter() {
        let (color, reverse) = match (cycle.orientation, g.edge(e).color) {
            (ClockDirection::CW, Some(EdgeColor::Blue)) => (EdgeColor::Red, true),
            (ClockDirection::CW, Some(EdgeColor::Red)) => (EdgeColor::Blue, false),
            (ClockDirection::CCW, Some(EdgeColor::Red)) => (EdgeColor::Blue, true),
            (ClockDirection::CCW, Some(EdgeColor::Blue)) => (EdgeColor::Red, false),
            (_, None) => return Err(GraphErr::InvalidRel(vec![g.edge(e).source, g.edge(e).target])),
        };
        let edge = g.edge_mut(e);
        edge.color = Some(color);
        if reverse {
            edge.reverse();
        }
    }

    for &v in cycle.corners().iter().chain(vertices.iter()) {
        g.partition_edges(v)?;
    }
    g.clear_rectangles();
    info!("flipped {} ({} edges)", cycle, edges.len());
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dual::rectangles::RectangularDual;
    use crate::fixtures;
    use crate::graph::enums::RevertibleEnum;
    use crate::rel::{check_rel, compute_rel, count_runs};
    use proptest::prelude::*;

    fn same_corners(a: &FlipCycle, b: &FlipCycle) -> bool {
        let mut x = a.corners();
        let mut y = b.corners();
        x.sort();
        y.sort();
        x == y
    }

    fn labeling(g: &Graph) -> Vec<(VertexI, VertexI, Option<EdgeColor>)> {
        g.edges().map(|e| (e.source, e.target, e.color)).collect()
    }

    #[test]
    fn test_requires_rel() {
        let g = fixtures::scenario_a();
        assert!(matches!(find_flip_cycles(&g), Err(GraphErr::NoRel)));
    }

    #[test]
    fn test_scenario_a_has_no_cycles() {
        let mut g = fixtures::scenario_a();
        compute_rel(&mut g).unwrap();
        assert!(find_flip_cycles(&g).unwrap().is_empty());
    }

    #[test]
    fn test_scenario_b_has_cycles() {
        let mut g = fixtures::scenario_b();
        compute_rel(&mut g).unwrap();
        let cycles = find_flip_cycles(&g).unwrap();
        assert!(!cycles.is_empty());
        for c in cycles.iter() {
            let (edges, vertices) = c.interior(&g).unwrap();
            assert!(!edges.is_empty());
            assert_eq!(c.kind == FlipCycleType::Separating, !vertices.is_empty());
            assert!(vertices.iter().all(|&v| !c.is_corner(v) && !g.is_outer(v)));
        }
    }

    #[test]
    fn test_orientation_matches_interior_edges() {
        for g in [fixtures::scenario_b(), fixtures::grid(3, 3, |i, _| i % 2 == 0)].iter_mut() {
            compute_rel(g).unwrap();
            for c in find_flip_cycles(g).unwrap() {
                let (edges, _) = c.interior(g).unwrap();
                for &e in edges.iter() {
                    let edge = g.edge(e);
                    let color = edge.color.unwrap();
                    if edge.source == c.v || edge.target == c.v {
                        let expected = match c.orientation {
                            ClockDirection::CW => (EdgeColor::Blue, c.v == edge.target),
                            ClockDirection::CCW => (EdgeColor::Red, c.v == edge.source),
                        };
                        assert_eq!(expected, (color, true), "{} at v", c);
                    }
                    if edge.source == c.u || edge.target == c.u {
                        let expected = match c.orientation {
                            ClockDirection::CW => EdgeColor::Red,
                            ClockDirection::CCW => EdgeColor::Blue,
                        };
                        assert_eq!((edge.source, color), (c.u, expected), "{} at u", c);
                    }
                }
            }
        }
    }

    #[test]
    fn test_flip_keeps_rel_and_tiling() {
        let mut g = fixtures::scenario_b();
        compute_rel(&mut g).unwrap();
        let cycles = find_flip_cycles(&g).unwrap();
        for c in cycles.iter() {
            let mut h = g.clone();
            flip(&mut h, c).unwrap();
            check_rel(&h).unwrap();
            let dual = RectangularDual::compute(&mut h).unwrap();
            dual.check_tiling().unwrap();
        }
    }

    #[test]
    fn test_flip_only_touches_interior() {
        let mut g = fixtures::scenario_b();
        compute_rel(&mut g).unwrap();
        let c = find_flip_cycles(&g).unwrap().remove(0);
        let before = labeling(&g);
        let changed = flip(&mut g, &c).unwrap();
        let after = labeling(&g);
        for e in g.edge_indices() {
            assert_eq!(before[e.0] != after[e.0], changed.contains(&e), "{}", e);
        }
        assert!(RectangularDual::compute(&mut g.clone()).is_ok());
    }

    #[test]
    fn test_flip_twice_restores_labeling() {
        let mut g = fixtures::scenario_b();
        compute_rel(&mut g).unwrap();
        let original = labeling(&g);
        for c in find_flip_cycles(&g).unwrap() {
            let mut h = g.clone();
            flip(&mut h, &c).unwrap();
            let back = find_flip_cycles(&h)
                .unwrap()
                .into_iter()
                .find(|d| same_corners(&c, d))
                .unwrap();
            assert_eq!(back.orientation, c.orientation.reversed());
            flip(&mut h, &back).unwrap();
            assert_eq!(labeling(&h), original);
        }
    }

    #[test]
    fn test_stale_cycle_is_rejected() {
        let mut g = fixtures::scenario_b();
        compute_rel(&mut g).unwrap();
        let c = find_flip_cycles(&g).unwrap().remove(0);
        let mut stale = c.clone();
        stale.ue = c.ve;
        assert!(matches!(flip(&mut g, &stale), Err(GraphErr::InvalidRel(_))));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_random_grids(
            cols in 1usize..=4,
            rows in 1usize..=4,
            diagonals in prop::collection::vec(any::<bool>(), 16),
        ) {
            let mut g = fixtures::grid(cols, rows, |i, j| diagonals[j * 4 + i]);
            compute_rel(&mut g).unwrap();
            for v in g.vertex_indices().filter(|&v| !g.is_outer(v)) {
                prop_assert_eq!(count_runs(&g, v), 4);
            }
            RectangularDual::compute(&mut g).unwrap().check_tiling().unwrap();

            let original = labeling(&g);
            for c in find_flip_cycles(&g).unwrap() {
                let mut h = g.clone();
                flip(&mut h, &c).unwrap();
                prop_assert!(check_rel(&h).is_ok());
                let back = find_flip_cycles(&h).unwrap().into_iter().find(|d| same_corners(&c, d));
                prop_assert!(back.is_some());
                flip(&mut h, &back.unwrap()).unwrap();
                prop_assert_eq!(labeling(&h), original.clone());
            }
        }
    }
}
