use crate::cell::Cost;
use crate::pathing_grid::PathingGrid;
use crate::search::SearchState;
use crate::solver::{expand_relaxing, StepSolver};

/// A* search. The Euclidean distance never overestimates the number of remaining moves on a
/// 4-connected grid, so the first path to reach the end is a shortest one.
#[derive(Clone, Copy, Debug, Default)]
pub struct AstarSolver;

impl StepSolver for AstarSolver {
    fn rank(&self, grid: &PathingGrid, ix: usize) -> Cost {
        let cell = grid.cell(ix);
        cell.heuristic_value() + cell.path_cost()
    }

    fn expand(&self, grid: &mut PathingGrid, state: &mut SearchState, ix: usize, goal: usize) {
        expand_relaxing(grid, state, ix, goal)
    }
}
