use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::graph::error::{GraphErr, GraphResult};
use crate::graph::indices::VertexI;
use crate::graph::{Graph, EAST, NORTH, SOUTH, WEST};

/// Canonical order of a PTP graph, west and south ranked 0 and 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalOrder {
    order: Vec<VertexI>,
    rank: Vec<usize>,
}

impl CanonicalOrder {
    /// Builds the order by peeling vertices off the outer boundary, north first.
    ///
    /// A boundary vertex can be peeled once no chord of the current boundary ends at
    /// it and, apart from east, two of its neighbors are already peeled. Candidates
    /// are served first in, first out.
    /// # Errors
    /// [`GraphErr::CanonicalOrderExhausted`] if no candidate is left before every
    /// vertex is ranked. This cannot happen on a validated PTP graph.
    pub fn compute(g: &Graph) -> GraphResult<CanonicalOrder> {
        let n = g.vertex_count();
        if n < 5 {
            return Err(GraphErr::malformed("a canonical order needs at least 5 vertices"));
        }

        let mut state = PeelState::new(n);
        let mut order = vec![WEST; n];
        order[0] = WEST;
        order[1] = SOUTH;

        for &v in [WEST, SOUTH, EAST, NORTH].iter() {
            state.outer[v.0] = true;
        }
        state.marked[WEST.0] = true;
        state.marked[SOUTH.0] = true;
        state.push(NORTH);
        state.push(EAST);

        for k in (2..n).rev() {
            let vk = state
                .pop()
                .ok_or(GraphErr::CanonicalOrderExhausted { remaining: k - 1 })?;
            trace!("v_{} is {}", k, vk);
            order[k] = vk;
            state.marked[vk.0] = true;
            state.outer[vk.0] = false;

            let mut on_boundary = Vec::new();
            for &e in g.vertex(vk).edges.iter() {
                let vi = g.opposite(e, vk)?;
                if state.outer[vi.0] {
                    on_boundary.push(vi);
                    if !state.marked[vi.0] {
                        state.ranked_neighbors[vi.0] += 1;
                        state.push_if_eligible(vi);
                    }
                } else if !state.marked[vi.0] {
                    state.outer[vi.0] = true;
                    state.ranked_neighbors[vi.0] += 1;
                    on_boundary.push(vi);
                    state.record_chords(g, vi, vk)?;
                    state.push_if_eligible(vi);
                }
            }

            // vk was the middle of a chord between its two boundary neighbors
            if on_boundary.len() == 2 && k < n - 1 {
                for &vi in on_boundary.iter() {
                    state.num_chords[vi.0] = state.num_chords[vi.0].saturating_sub(1);
                    state.push_if_eligible(vi);
                }
            }
        }

        let mut rank = vec![0; n];
        for (k, v) in order.iter().enumerate() {
            rank[v.0] = k;
        }
        debug!("canonical order {:?}", order);
        Ok(CanonicalOrder { order, rank })
    }

    pub fn rank(&self, v: VertexI) -> usize {
        self.rank[v.0]
    }

    pub fn vertex_at(&self, k: usize) -> VertexI {
        self.order[k]
    }

    pub fn as_slice(&self) -> &[VertexI] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Scratch labels of the peeling, indexed by vertex.
struct PeelState {
    outer: Vec<bool>,
    marked: Vec<bool>,
    num_chords: Vec<usize>,
    ranked_neighbors: Vec<usize>,
    /// Ticket of the live queue entry of a vertex; stale entries are skipped.
    queued: Vec<Option<usize>>,
    candidates: VecDeque<(VertexI, usize)>,
    next_ticket: usize,
}

impl PeelState {
    fn new(n: usize) -> PeelState {
        PeelState {
            outer: vec![false; n],
            marked: vec![false; n],
            num_chords: vec![0; n],
            ranked_neighbors: vec![0; n],
            queued: vec![None; n],
            candidates: VecDeque::new(),
            next_ticket: 0,
        }
    }

    fn push(&mut self, v: VertexI) {
        self.queued[v.0] = Some(self.next_ticket);
        self.candidates.push_back((v, self.next_ticket));
        self.next_ticket += 1;
    }

    fn dequeue(&mut self, v: VertexI) {
        self.queued[v.0] = None;
    }

    fn push_if_eligible(&mut self, v: VertexI) {
        let enough_neighbors = v == EAST || self.ranked_neighbors[v.0] >= 2;
        if self.outer[v.0]
            && !self.marked[v.0]
            && self.queued[v.0].is_none()
            && self.num_chords[v.0] == 0
            && enough_neighbors
        {
            self.push(v);
        }
    }

    fn pop(&mut self) -> Option<VertexI> {
        while let Some((v, ticket)) = self.candidates.pop_front() {
            if self.queued[v.0] == Some(ticket) {
                self.queued[v.0] = None;
                return Some(v);
            }
        }
        None
    }

    /// 'vi' just joined the boundary through the removal of 'vk'. Every boundary
    /// neighbor of 'vi' that is not next to 'vk' around 'vi' spans a chord.
    fn record_chords(&mut self, g: &Graph, vi: VertexI, vk: VertexI) -> GraphResult<()> {
        let edges = &g.vertex(vi).edges;
        let len = edges.len();
        let pos_k = edges
            .iter()
            .position(|&e| g.edge(e).connects(vi, vk))
            .ok_or(GraphErr::NotAdjacent(vi, vk))?;

        for (pos_j, &e) in edges.iter().enumerate() {
            let vj = g.opposite(e, vi)?;
            if !self.outer[vj.0] {
                continue;
            }
            let diff = if pos_j > pos_k { pos_j - pos_k } else { pos_k - pos_j };
            if diff != 1 && diff != len - 1 {
                self.num_chords[vi.0] += 1;
                self.num_chords[vj.0] += 1;
                self.dequeue(vj);
                trace!("chord {} - {}", vi, vj);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::graph::validation::validate;

    fn lower_and_higher(g: &Graph, order: &CanonicalOrder, v: VertexI) -> (usize, usize) {
        let k = order.rank(v);
        let lower = g.neighbors(v).filter(|&w| order.rank(w) < k).count();
        (lower, g.vertex(v).degree() - lower)
    }

    #[test]
    fn test_scenario_a() {
        let g = fixtures::scenario_a();
        let order = CanonicalOrder::compute(&g).unwrap();
        assert_eq!(order.as_slice(), &[WEST, SOUTH, VertexI(4), EAST, NORTH]);
        assert_eq!(order.rank(VertexI(4)), 2);
    }

    #[test]
    fn test_two_by_one_grid() {
        let g = fixtures::grid(2, 1, |_, _| true);
        let order = CanonicalOrder::compute(&g).unwrap();
        assert_eq!(order.as_slice(), &[WEST, SOUTH, VertexI(4), VertexI(5), EAST, NORTH]);
    }

    #[test]
    fn test_order_is_permutation() {
        let g = fixtures::scenario_b();
        validate(&g).unwrap();
        let order = CanonicalOrder::compute(&g).unwrap();

        let mut seen = order.as_slice().to_vec();
        seen.sort();
        assert_eq!(seen, g.vertex_indices().collect::<Vec<_>>());
        assert_eq!(order.vertex_at(0), WEST);
        assert_eq!(order.vertex_at(1), SOUTH);
        assert_eq!(order.vertex_at(g.vertex_count() - 1), NORTH);
    }

    #[test]
    fn test_neighbors_on_both_sides() {
        let g = fixtures::scenario_b();
        let order = CanonicalOrder::compute(&g).unwrap();
        for k in 2..order.len() {
            let v = order.vertex_at(k);
            let (lower, higher) = lower_and_higher(&g, &order, v);
            assert!(lower >= 2, "{} has {} lower neighbors", v, lower);
            if !g.is_outer(v) {
                assert!(higher >= 2, "{} has {} higher neighbors", v, higher);
            }
        }
    }

    #[test]
    fn test_exhausted_queue_is_an_error() {
        // no inner vertex is reachable from north, so the queue runs dry
        let mut g = fixtures::scenario_a();
        let lonely = g.add_vertex(5000.0, 5000.0);
        g.add_edge(lonely, SOUTH).unwrap();
        g.embed();
        let err = CanonicalOrder::compute(&g).unwrap_err();
        assert!(matches!(err, GraphErr::CanonicalOrderExhausted { .. }));
    }
}
