use grid_util::point::Point;
use num_traits::Zero;

/// Cost type shared by path costs, heuristic values and ranks.
pub type Cost = f64;

/// Search bookkeeping for a single grid position. The position is fixed at creation, everything
/// else is written by the active search and cleared by [PathingGrid::reset_cell_state](crate::PathingGrid::reset_cell_state).
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    position: Point,
    pub(crate) parent: Option<usize>,
    pub(crate) heuristic_value: Cost,
    pub(crate) path_cost: Cost,
    pub(crate) explored: bool,
    pub(crate) on_frontier: bool,
}

impl Cell {
    pub fn new(position: Point) -> Cell {
        Cell {
            position,
            parent: None,
            heuristic_value: Zero::zero(),
            path_cost: Zero::zero(),
            explored: false,
            on_frontier: false,
        }
    }
    pub fn position(&self) -> Point {
        self.position
    }
    /// Row-major index of the cell this one was reached from, if any.
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }
    /// Straight-line distance to the end cell, recorded when the cell joins the frontier.
    pub fn heuristic_value(&self) -> Cost {
        self.heuristic_value
    }
    /// Number of moves from the start cell along the current parent chain.
    pub fn path_cost(&self) -> Cost {
        self.path_cost
    }
    pub fn explored(&self) -> bool {
        self.explored
    }
    pub fn on_frontier(&self) -> bool {
        self.on_frontier
    }
    /// True if no search has touched this cell since the last reset.
    pub fn is_pristine(&self) -> bool {
        self.parent.is_none()
            && self.heuristic_value.is_zero()
            && self.path_cost.is_zero()
            && !self.explored
            && !self.on_frontier
    }
    pub(crate) fn reset(&mut self) {
        self.parent = None;
        self.heuristic_value = Zero::zero();
        self.path_cost = Zero::zero();
        self.explored = false;
        self.on_frontier = false;
    }
}
