//! # grid_pathfinding_sandbox
//!
//! An interactive grid pathfinding sandbox. Cells of a square grid are marked as blocked, start
//! or end, an algorithm is selected and the search is then advanced one expansion at a time so
//! that a caller such as a render loop can show the frontier and explored cells as they grow.
//!
//! Three algorithms are available: uniform-cost search
//! ([Dijkstra](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)), greedy
//! [best-first search](https://en.wikipedia.org/wiki/Best-first_search) and
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm). Moves are axis-aligned and all cost
//! one; the heuristic is the
//! [Euclidean distance](https://en.wikipedia.org/wiki/Euclidean_distance) to the end cell.
//!
//! ```
//! use grid_pathfinding_sandbox::{Algorithm, Pathfinder, Role, SearchStatus};
//! use grid_util::point::Point;
//!
//! let mut pathfinder = Pathfinder::new(5);
//! pathfinder.set_role(Point::new(0, 0), Role::Start);
//! pathfinder.set_role(Point::new(4, 4), Role::End);
//! pathfinder.select_algorithm(Algorithm::Astar).unwrap();
//! while pathfinder.advance() == Some(SearchStatus::Running) {}
//! assert_eq!(pathfinder.best_path().unwrap().len(), 9);
//! ```
mod cell;
mod error;
pub mod pathing_grid;
pub mod search;
pub mod solver;

pub use cell::{Cell, Cost};
pub use error::UsageError;
pub use pathing_grid::{PathingGrid, Role};
pub use search::{Search, SearchState, SearchStatus};
pub use solver::{Algorithm, StepSolver};

use core::fmt;
use grid_util::point::Point;
use log::{info, warn};
use rand::Rng;

/// Side length of the sandbox grid when none is given.
pub const DEFAULT_SIDE_LENGTH: usize = 100;
/// Fraction of the cells that random generation tries to block.
pub const BLOCK_DENSITY: f64 = 0.4;

/// [Pathfinder] owns the sandbox grid and at most one search run on it. It is the surface used
/// by an editing and rendering front end: edits and algorithm selection come in, read-only
/// views of the grid and the search state go out, and [advance](Self::advance) moves the search
/// forward by one expansion.
#[derive(Clone, Debug)]
pub struct Pathfinder {
    grid: PathingGrid,
    search: Option<Search>,
}

impl Default for Pathfinder {
    fn default() -> Pathfinder {
        Pathfinder::new(DEFAULT_SIDE_LENGTH)
    }
}

impl Pathfinder {
    pub fn new(side_length: usize) -> Pathfinder {
        Pathfinder {
            grid: PathingGrid::new(side_length),
            search: None,
        }
    }
    pub fn grid(&self) -> &PathingGrid {
        &self.grid
    }
    pub fn search(&self) -> Option<&Search> {
        self.search.as_ref()
    }

    /// Edits a cell. Any active run is discarded first, since it was started on the grid as it
    /// was before the edit.
    pub fn set_role(&mut self, point: Point, role: Role) {
        self.clear_search();
        self.grid.set_role(point, role)
    }
    /// Like [set_role](Self::set_role) but takes the role as a label. An unknown label leaves
    /// both the grid and the active run untouched.
    pub fn set_role_str(&mut self, point: Point, role: &str) -> Result<(), UsageError> {
        let role = role.parse::<Role>().map_err(|e| {
            warn!("Ignoring edit of {:?}: {}", point, e);
            e
        })?;
        self.set_role(point, role);
        Ok(())
    }

    /// Discards the current run and starts `algorithm` from the start cell. Cell bookkeeping is
    /// cleared either way; without both endpoints no new run is created.
    pub fn select_algorithm(&mut self, algorithm: Algorithm) -> Result<(), UsageError> {
        self.search = None;
        self.search = Some(Search::new(&mut self.grid, algorithm)?);
        Ok(())
    }
    /// Like [select_algorithm](Self::select_algorithm) but takes the menu label of the algorithm.
    pub fn select_algorithm_str(&mut self, name: &str) -> Result<(), UsageError> {
        match name.parse::<Algorithm>() {
            Ok(algorithm) => self.select_algorithm(algorithm),
            Err(e) => {
                warn!("Ignoring algorithm selection: {}", e);
                Err(e)
            }
        }
    }
    /// Drops the current run, for instance after an impossible search has been reported, and
    /// clears the bookkeeping it left on the cells.
    pub fn clear_search(&mut self) {
        if let Some(search) = self.search.take() {
            info!("Discarding {} run after {} steps", search.algorithm(), search.steps());
            self.grid.reset_cell_state();
        }
    }

    /// Advances the current run by one step. Returns [None] when no run is active.
    pub fn advance(&mut self) -> Option<SearchStatus> {
        let grid = &mut self.grid;
        self.search.as_mut().map(|search| search.advance(grid))
    }
    /// Advances the current run until it ends and returns the number of steps taken.
    pub fn run_to_end(&mut self) -> usize {
        let grid = &mut self.grid;
        self.search
            .as_mut()
            .map_or(0, |search| search.run_to_end(grid))
    }
    pub fn status(&self) -> Option<SearchStatus> {
        self.search.as_ref().map(Search::status)
    }
    pub fn is_done(&self) -> bool {
        self.status() == Some(SearchStatus::Done)
    }
    pub fn is_impossible(&self) -> bool {
        self.status() == Some(SearchStatus::Impossible)
    }

    pub fn blocked(&self) -> impl Iterator<Item = Point> + '_ {
        self.grid.blocked()
    }
    pub fn start(&self) -> Option<Point> {
        self.grid.start()
    }
    pub fn end(&self) -> Option<Point> {
        self.grid.end()
    }
    /// Frontier cells of the current run, empty when no run is active.
    pub fn frontier(&self) -> impl Iterator<Item = Point> + '_ {
        self.search
            .iter()
            .flat_map(|search| search.state().frontier())
            .map(|ix| self.grid.point(ix))
    }
    /// Explored cells of the current run in expansion order.
    pub fn explored(&self) -> impl Iterator<Item = Point> + '_ {
        self.search
            .iter()
            .flat_map(|search| search.state().explored())
            .map(|ix| self.grid.point(ix))
    }
    /// The path found by the current run from end to start.
    pub fn best_path(&self) -> Result<Vec<Point>, UsageError> {
        match &self.search {
            Some(search) => search.best_path(&self.grid),
            None => {
                warn!("Best path requested without a search");
                Err(UsageError::PathNotReady)
            }
        }
    }

    /// Checks whether the end cell can be reached from the start cell at all, using the
    /// connected components of the grid. [None] if an endpoint is unset.
    pub fn reachable(&mut self) -> Option<bool> {
        self.grid.update();
        let (start, end) = (self.grid.start()?, self.grid.end()?);
        Some(self.grid.reachable(&start, &end))
    }

    /// Clears the bookkeeping of every cell. The run that wrote it is dropped with it; blocks and
    /// endpoints are kept.
    pub fn reset_cell_state(&mut self) {
        self.search = None;
        self.grid.reset_cell_state()
    }
    /// Drops the run and clears the grid.
    pub fn full_reset(&mut self) {
        info!("Full reset");
        self.search = None;
        self.grid.full_reset();
    }
    /// Clears everything and fills the grid with random blocks and endpoints.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        self.full_reset();
        self.grid.randomize(rng);
    }
}

impl fmt::Display for Pathfinder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let path = self
            .search
            .iter()
            .flat_map(|search| search.best_path_ixs(&self.grid))
            .collect::<Vec<usize>>();
        self.grid.fmt_with_path(f, &path)
    }
}
