use crate::error::UsageError;
use crate::pathing_grid::{FxIndexSet, PathingGrid};
use crate::solver::Algorithm;
use grid_util::point::Point;
use log::{debug, info, warn};

/// Where a search run stands after its latest step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchStatus {
    Running,
    /// The end cell has been expanded and a best path is available.
    Done,
    /// The frontier ran empty before the end cell was reached.
    Impossible,
}

impl SearchStatus {
    pub fn is_terminal(&self) -> bool {
        *self != SearchStatus::Running
    }
}

/// Frontier and explored collections of one search run. Both are insertion ordered, which the
/// solvers rely on for tie-breaking. Membership is mirrored in the `on_frontier` and `explored`
/// flags of each [Cell](crate::Cell); all changes go through [push_frontier](Self::push_frontier)
/// and [close](Self::close) so the two never disagree.
#[derive(Clone, Debug, Default)]
pub struct SearchState {
    frontier: FxIndexSet<usize>,
    explored: FxIndexSet<usize>,
    done: bool,
    impossible: bool,
}

impl SearchState {
    /// Row-major indices of the frontier cells, oldest first.
    pub fn frontier(&self) -> impl Iterator<Item = usize> + '_ {
        self.frontier.iter().copied()
    }
    /// Row-major indices of the explored cells in expansion order.
    pub fn explored(&self) -> impl Iterator<Item = usize> + '_ {
        self.explored.iter().copied()
    }
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }
    pub fn explored_len(&self) -> usize {
        self.explored.len()
    }
    pub fn is_done(&self) -> bool {
        self.done
    }
    pub fn is_impossible(&self) -> bool {
        self.impossible
    }

    /// Adds `ix` to the frontier and records its distance to `goal`. No-op for cells already on
    /// the frontier.
    pub(crate) fn push_frontier(&mut self, grid: &mut PathingGrid, ix: usize, goal: usize) {
        debug_assert!(!grid.cell(ix).explored(), "explored cells never return");
        if self.frontier.insert(ix) {
            let h = grid.heuristic_ix(ix, goal);
            let cell = grid.cell_mut(ix);
            cell.heuristic_value = h;
            cell.on_frontier = true;
        }
    }
    /// Moves `ix` from the frontier to the explored set.
    pub(crate) fn close(&mut self, grid: &mut PathingGrid, ix: usize) {
        self.frontier.shift_remove(&ix);
        self.explored.insert(ix);
        let cell = grid.cell_mut(ix);
        cell.on_frontier = false;
        cell.explored = true;
    }
}

/// One run of an [Algorithm] from the start to the end cell of a [PathingGrid]. The run does not
/// own the grid; every step borrows it mutably, so the caller is free to render or inspect the
/// grid between steps.
#[derive(Clone, Debug)]
pub struct Search {
    algorithm: Algorithm,
    start: usize,
    goal: usize,
    state: SearchState,
    steps: usize,
}

impl Search {
    /// Clears the bookkeeping left by earlier runs and seeds a new run with the start cell.
    /// Fails if the start or end cell is unset.
    pub fn new(grid: &mut PathingGrid, algorithm: Algorithm) -> Result<Search, UsageError> {
        grid.reset_cell_state();
        let (Some(start), Some(goal)) = (grid.start_ix(), grid.end_ix()) else {
            warn!("Cannot run {}: start or end is not set", algorithm);
            return Err(UsageError::MissingEndpoints);
        };
        info!(
            "Running {} from {:?} to {:?}",
            algorithm,
            grid.point(start),
            grid.point(goal)
        );
        let mut state = SearchState::default();
        state.push_frontier(grid, start, goal);
        Ok(Search {
            algorithm,
            start,
            goal,
            state,
            steps: 0,
        })
    }
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
    pub fn state(&self) -> &SearchState {
        &self.state
    }
    /// Number of expansions performed so far.
    pub fn steps(&self) -> usize {
        self.steps
    }
    pub fn start(&self, grid: &PathingGrid) -> Point {
        grid.point(self.start)
    }
    pub fn goal(&self, grid: &PathingGrid) -> Point {
        grid.point(self.goal)
    }
    pub fn status(&self) -> SearchStatus {
        if self.state.done {
            SearchStatus::Done
        } else if self.state.impossible {
            SearchStatus::Impossible
        } else {
            SearchStatus::Running
        }
    }

    /// Performs exactly one expansion. Once the run is done or impossible this does nothing.
    pub fn advance(&mut self, grid: &mut PathingGrid) -> SearchStatus {
        if self.status().is_terminal() {
            return self.status();
        }
        let solver = self.algorithm.solver();
        match solver.select_next(grid, &self.state) {
            Some(ix) => {
                debug!("{} expands {:?}", self.algorithm, grid.point(ix));
                solver.expand(grid, &mut self.state, ix, self.goal);
                self.steps += 1;
                if ix == self.goal || grid.cell(self.goal).explored() {
                    info!("{} reached the end after {} steps", self.algorithm, self.steps);
                    self.state.done = true;
                } else if self.state.frontier.is_empty() {
                    info!("{} ran out of cells after {} steps", self.algorithm, self.steps);
                    self.state.impossible = true;
                }
            }
            None => {
                info!("{} has no cells left after {} steps", self.algorithm, self.steps);
                self.state.impossible = true;
            }
        }
        self.status()
    }

    /// Advances until the run is done or impossible and returns the number of steps this took.
    /// Every cell is expanded at most once, so this ends within side² steps.
    pub fn run_to_end(&mut self, grid: &mut PathingGrid) -> usize {
        let before = self.steps;
        while !self.advance(grid).is_terminal() {}
        self.steps - before
    }

    /// The path found by the run, from the end cell back to the start cell. Only available once
    /// the run is done.
    pub fn best_path(&self, grid: &PathingGrid) -> Result<Vec<Point>, UsageError> {
        if !self.state.done {
            warn!("Best path of {} requested before it finished", self.algorithm);
            return Err(UsageError::PathNotReady);
        }
        Ok(self.best_path_ixs(grid).map(|ix| grid.point(ix)).collect())
    }
    pub(crate) fn best_path_ixs<'a>(
        &self,
        grid: &'a PathingGrid,
    ) -> impl Iterator<Item = usize> + 'a {
        let goal = if self.state.done {
            Some(self.goal)
        } else {
            None
        };
        std::iter::successors(goal, move |&ix| grid.cell(ix).parent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    fn open_grid(side: usize, start: Point, end: Point) -> PathingGrid {
        let mut grid = PathingGrid::new(side);
        grid.set_role(start, Role::Start);
        grid.set_role(end, Role::End);
        grid
    }

    #[test]
    fn missing_endpoints_are_rejected() {
        let mut grid = PathingGrid::new(4);
        for algorithm in Algorithm::ALL {
            assert_eq!(
                Search::new(&mut grid, algorithm).err(),
                Some(UsageError::MissingEndpoints)
            );
        }
        grid.set_role(Point::new(0, 0), Role::Start);
        assert!(Search::new(&mut grid, Algorithm::Astar).is_err());
        grid.set_role(Point::new(3, 3), Role::End);
        assert!(Search::new(&mut grid, Algorithm::Astar).is_ok());
    }

    #[test]
    fn new_run_is_seeded_with_start() {
        let mut grid = open_grid(4, Point::new(1, 2), Point::new(3, 3));
        let search = Search::new(&mut grid, Algorithm::Dijkstra).unwrap();
        let start = grid.get_ix_point(&Point::new(1, 2));
        assert_eq!(search.state().frontier().collect::<Vec<_>>(), vec![start]);
        assert_eq!(search.state().explored_len(), 0);
        assert!(grid.cell(start).on_frontier());
        assert_eq!(search.status(), SearchStatus::Running);
    }

    #[test]
    fn new_run_clears_previous_bookkeeping() {
        let mut grid = open_grid(4, Point::new(0, 0), Point::new(3, 3));
        let mut search = Search::new(&mut grid, Algorithm::Astar).unwrap();
        search.run_to_end(&mut grid);
        let search = Search::new(&mut grid, Algorithm::BestFirst).unwrap();
        let start = grid.get_ix_point(&Point::new(0, 0));
        assert_eq!(search.steps(), 0);
        assert!(grid
            .cells()
            .enumerate()
            .all(|(ix, cell)| ix == start || cell.is_pristine()));
    }

    #[test]
    fn flags_mirror_collections() {
        let mut grid = open_grid(6, Point::new(0, 5), Point::new(5, 0));
        grid.set_role(Point::new(2, 2), Role::Block);
        grid.set_role(Point::new(3, 2), Role::Block);
        for algorithm in Algorithm::ALL {
            let mut search = Search::new(&mut grid, algorithm).unwrap();
            loop {
                for (ix, cell) in grid.cells().enumerate() {
                    assert!(!(cell.explored() && cell.on_frontier()));
                    assert_eq!(cell.on_frontier(), search.state().frontier.contains(&ix));
                    assert_eq!(cell.explored(), search.state().explored.contains(&ix));
                }
                if search.advance(&mut grid).is_terminal() {
                    break;
                }
            }
        }
    }

    #[test]
    fn terminates_within_cell_count() {
        let side = 7;
        let mut grid = open_grid(side, Point::new(0, 0), Point::new(6, 6));
        for algorithm in Algorithm::ALL {
            let mut search = Search::new(&mut grid, algorithm).unwrap();
            let steps = search.run_to_end(&mut grid);
            assert!(steps <= side * side);
            assert_eq!(search.status(), SearchStatus::Done);
        }
    }

    #[test]
    fn terminal_states_are_sticky() {
        let mut grid = open_grid(3, Point::new(0, 0), Point::new(2, 0));
        let mut search = Search::new(&mut grid, Algorithm::Dijkstra).unwrap();
        search.run_to_end(&mut grid);
        let steps = search.steps();
        let explored = search.state().explored_len();
        assert_eq!(search.advance(&mut grid), SearchStatus::Done);
        assert_eq!(search.steps(), steps);
        assert_eq!(search.state().explored_len(), explored);
        assert_eq!(search.run_to_end(&mut grid), 0);
    }

    #[test]
    fn enclosed_start_is_impossible() {
        //  _____
        // |.#...|
        // |#S#..|
        // |.#...|
        // |....E|
        let mut grid = open_grid(5, Point::new(1, 1), Point::new(4, 3));
        for p in [(1, 0), (0, 1), (2, 1), (1, 2)] {
            grid.set_role(Point::new(p.0, p.1), Role::Block);
        }
        for algorithm in Algorithm::ALL {
            let mut search = Search::new(&mut grid, algorithm).unwrap();
            assert_eq!(search.advance(&mut grid), SearchStatus::Impossible);
            assert!(search.state().is_impossible());
            assert!(!search.state().is_done());
            assert_eq!(search.best_path(&grid), Err(UsageError::PathNotReady));
        }
    }

    #[test]
    fn empty_frontier_is_impossible() {
        let mut grid = open_grid(3, Point::new(0, 0), Point::new(2, 2));
        let mut search = Search::new(&mut grid, Algorithm::Dijkstra).unwrap();
        let start = grid.get_ix_point(&Point::new(0, 0));
        search.state.frontier.clear();
        grid.cell_mut(start).on_frontier = false;
        assert_eq!(search.advance(&mut grid), SearchStatus::Impossible);
        assert_eq!(search.steps(), 0);
        assert_eq!(search.advance(&mut grid), SearchStatus::Impossible);
    }

    #[test]
    fn best_path_waits_for_done() {
        let mut grid = open_grid(5, Point::new(0, 0), Point::new(4, 4));
        let mut search = Search::new(&mut grid, Algorithm::Astar).unwrap();
        assert_eq!(search.best_path(&grid), Err(UsageError::PathNotReady));
        search.advance(&mut grid);
        assert_eq!(search.best_path(&grid), Err(UsageError::PathNotReady));
        search.run_to_end(&mut grid);
        let path = search.best_path(&grid).unwrap();
        assert_eq!(path.first(), Some(&Point::new(4, 4)));
        assert_eq!(path.last(), Some(&Point::new(0, 0)));
    }
}
