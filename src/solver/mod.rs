//! Ranking and expansion policies for the step-driven search. Each solver decides which frontier
//! cell is expanded next through [StepSolver::rank] and how the neighbours of that cell are
//! updated through [StepSolver::expand]; the step loop itself lives in [Search](crate::Search).
use crate::cell::Cost;
use crate::error::UsageError;
use crate::pathing_grid::PathingGrid;
use crate::search::SearchState;
use core::fmt;
use std::str::FromStr;

pub mod astar;
pub mod best_first;
pub mod dijkstra;

use astar::AstarSolver;
use best_first::BestFirstSolver;
use dijkstra::DijkstraSolver;

pub trait StepSolver {
    /// Priority of a frontier cell, lower is expanded first.
    fn rank(&self, grid: &PathingGrid, ix: usize) -> Cost;

    /// Updates the neighbours of `ix` and moves it from the frontier to the explored set.
    fn expand(&self, grid: &mut PathingGrid, state: &mut SearchState, ix: usize, goal: usize);

    /// The frontier cell of lowest rank. Among equal ranks the cell that joined the frontier
    /// first wins.
    fn select_next(&self, grid: &PathingGrid, state: &SearchState) -> Option<usize> {
        state
            .frontier()
            .map(|ix| (ix, self.rank(grid, ix)))
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(ix, _)| ix)
    }
}

/// Expansion without relaxation: a neighbour keeps the first parent it is discovered from.
pub(crate) fn expand_greedy(
    grid: &mut PathingGrid,
    state: &mut SearchState,
    ix: usize,
    goal: usize,
) {
    for n in grid.neighbour_ixs(ix) {
        let neighbour = grid.cell(n);
        if !neighbour.explored() && !neighbour.on_frontier() {
            grid.set_parent(n, ix);
            state.push_frontier(grid, n, goal);
        }
    }
    state.close(grid, ix);
}

/// Expansion with relaxation: a frontier neighbour is re-parented whenever `ix` offers a
/// strictly cheaper route to it.
pub(crate) fn expand_relaxing(
    grid: &mut PathingGrid,
    state: &mut SearchState,
    ix: usize,
    goal: usize,
) {
    for n in grid.neighbour_ixs(ix) {
        let neighbour = grid.cell(n);
        if neighbour.explored() {
            continue;
        }
        let on_frontier = neighbour.on_frontier();
        if !on_frontier || grid.is_better_parent(ix, n) {
            grid.set_parent(n, ix);
            if !on_frontier {
                state.push_frontier(grid, n, goal);
            }
        }
    }
    state.close(grid, ix);
}

/// The available search algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Uniform-cost search, ranks by path cost.
    Dijkstra,
    /// Greedy best-first search, ranks by the heuristic alone.
    BestFirst,
    /// A*, ranks by path cost plus heuristic.
    Astar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Astar, Algorithm::BestFirst, Algorithm::Dijkstra];

    /// Menu label of the algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::BestFirst => "Best First",
            Algorithm::Astar => "A*",
        }
    }
    /// Whether the returned path is guaranteed to be a shortest one.
    pub fn is_optimal(&self) -> bool {
        !matches!(self, Algorithm::BestFirst)
    }
    pub fn solver(&self) -> &'static dyn StepSolver {
        match self {
            Algorithm::Dijkstra => &DijkstraSolver,
            Algorithm::BestFirst => &BestFirstSolver,
            Algorithm::Astar => &AstarSolver,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Algorithm, UsageError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a*" | "astar" | "a-star" => Ok(Algorithm::Astar),
            "best first" | "best_first" | "bestfirst" | "greedy" => Ok(Algorithm::BestFirst),
            "dijkstra" | "uniform" | "uniform cost" => Ok(Algorithm::Dijkstra),
            _ => Err(UsageError::UnknownAlgorithm(s.to_owned())),
        }
    }
}
