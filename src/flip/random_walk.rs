use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::dual::rectangles::RectangularDual;
use crate::flip::{find_flip_cycles, flip, FlipCycle};
use crate::graph::error::GraphResult;
use crate::graph::Graph;

pub struct WalkOptions {
    pub steps: usize,
    /// Fixed seed for reproducible walks; a fresh thread rng otherwise.
    pub seed: Option<u64>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        WalkOptions { steps: 10, seed: None }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct WalkStep {
    pub step: usize,
    /// Number of flip cycles the cycle was picked from.
    pub available: usize,
    pub cycle: FlipCycle,
    pub xmax: usize,
    pub ymax: usize,
}

/// Flips a uniformly chosen flip cycle 'steps' times in a row.
///
/// The walk stops early if the labeling has no flip cycle at all. Each step records
/// the grid size of the rectangular dual after the flip.
/// # Errors
/// If the graph carries no labeling or a flip breaks it.
pub fn random_walk<R: Rng>(g: &mut Graph, steps: usize, rng: &mut R) -> GraphResult<Vec<WalkStep>> {
    let mut trace = Vec::with_capacity(steps);
    for step in 0..steps {
        let cycles = find_flip_cycles(g)?;
        if cycles.is_empty() {
            debug!("no flip cycle left after {} steps", step);
            break;
        }
        let pick = rng.gen_range(0, cycles.len());
        flip(g, &cycles[pick])?;
        let dual = RectangularDual::compute(g)?;
        trace.push(WalkStep {
            step,
            available: cycles.len(),
            cycle: cycles[pick].clone(),
            xmax: dual.xmax,
            ymax: dual.ymax,
        });
    }
    info!("random walk on '{}' made {} flips", g.name, trace.len());
    Ok(trace)
}

/// Runs [`random_walk`] with the rng described by 'options'.
pub fn walk_with(g: &mut Graph, options: &WalkOptions) -> GraphResult<Vec<WalkStep>> {
    match options.seed {
        Some(seed) => random_walk(g, options.steps, &mut StdRng::seed_from_u64(seed)),
        None => random_walk(g, options.steps, &mut thread_rng()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::rel::{check_rel, compute_rel};

    #[test]
    fn test_walk_keeps_rel() {
        let mut g = fixtures::scenario_b();
        compute_rel(&mut g).unwrap();
        let steps = random_walk(&mut g, 25, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(steps.len(), 25);
        assert!(steps.iter().all(|s| s.available > 0));
        check_rel(&g).unwrap();
        let dual = RectangularDual::compute(&mut g).unwrap();
        dual.check_tiling().unwrap();
        assert_eq!(g.xmax, Some(steps[24].xmax));
    }

    #[test]
    fn test_seeded_walks_repeat() {
        let mut g = fixtures::scenario_b();
        compute_rel(&mut g).unwrap();
        let mut h = g.clone();
        let options = WalkOptions {
            steps: 12,
            seed: Some(3),
        };
        let a = walk_with(&mut g, &options).unwrap();
        let b = walk_with(&mut h, &options).unwrap();
        let cycles = |s: &[WalkStep]| s.iter().map(|s| s.cycle.clone()).collect::<Vec<_>>();
        assert_eq!(cycles(&a), cycles(&b));
    }

    #[test]
    fn test_walk_stops_without_cycles() {
        let mut g = fixtures::scenario_a();
        compute_rel(&mut g).unwrap();
        assert!(walk_with(&mut g, &WalkOptions::default()).unwrap().is_empty());
    }
}
