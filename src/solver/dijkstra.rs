use crate::cell::Cost;
use crate::pathing_grid::PathingGrid;
use crate::search::SearchState;
use crate::solver::{expand_relaxing, StepSolver};

/// Uniform-cost search. Cells leave the frontier in order of their distance from the start.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraSolver;

impl StepSolver for DijkstraSolver {
    fn rank(&self, grid: &PathingGrid, ix: usize) -> Cost {
        grid.cell(ix).path_cost()
    }

    fn expand(&self, grid: &mut PathingGrid, state: &mut SearchState, ix: usize, goal: usize) {
        expand_relaxing(grid, state, ix, goal)
    }
}
