use crate::cell::Cost;
use crate::pathing_grid::PathingGrid;
use crate::search::SearchState;
use crate::solver::{expand_greedy, StepSolver};

/// Greedy best-first search. Always heads for the frontier cell closest to the end in a straight
/// line and never revises a parent, so the path it finds can be longer than necessary.
#[derive(Clone, Copy, Debug, Default)]
pub struct BestFirstSolver;

impl StepSolver for BestFirstSolver {
    fn rank(&self, grid: &PathingGrid, ix: usize) -> Cost {
        grid.cell(ix).heuristic_value()
    }

    fn expand(&self, grid: &mut PathingGrid, state: &mut SearchState, ix: usize, goal: usize) {
        expand_greedy(grid, state, ix, goal)
    }
}
