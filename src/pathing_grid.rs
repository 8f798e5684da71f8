use crate::cell::{Cell, Cost};
use crate::error::UsageError;
use crate::BLOCK_DENSITY;
use core::fmt;
use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexSet;
use itertools::Itertools;
use log::{info, warn};
use petgraph::unionfind::UnionFind;
use rand::Rng;
use std::str::FromStr;

pub(crate) type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// What an edit turns a cell into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Block,
    Start,
    End,
}

impl FromStr for Role {
    type Err = UsageError;

    /// Accepts the menu labels `Block`, `Start` and `End` in any letter case.
    fn from_str(s: &str) -> Result<Role, UsageError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "block" => Ok(Role::Block),
            "start" => Ok(Role::Start),
            "end" => Ok(Role::End),
            _ => Err(UsageError::UnknownRole(s.to_owned())),
        }
    }
}

/// [PathingGrid] is a square array of [Cell]s together with the set of blocked cells and the
/// optional start and end cells. Cells are addressed by [Point] or by their row-major index.
/// Connected components of the free cells are tracked in a [UnionFind] structure so that
/// reachability can be checked without running a search.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    side_length: usize,
    // Row-major rather than a grid_util grid: parent links, the blocked set and the search
    // collections all hold plain cell indices, and each cell carries its own position.
    cells: Vec<Cell>,
    blocked: FxIndexSet<usize>,
    start: Option<usize>,
    end: Option<usize>,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl PathingGrid {
    /// Creates an empty `side_length` by `side_length` grid. A side length of zero is a
    /// programming error.
    pub fn new(side_length: usize) -> PathingGrid {
        assert!(side_length > 0, "grid side length must be positive");
        let cells = (0..side_length * side_length)
            .map(|ix| {
                Cell::new(Point::new(
                    (ix % side_length) as i32,
                    (ix / side_length) as i32,
                ))
            })
            .collect();
        PathingGrid {
            side_length,
            cells,
            blocked: FxIndexSet::default(),
            start: None,
            end: None,
            components: UnionFind::new(side_length * side_length),
            components_dirty: true,
        }
    }
    pub fn side_length(&self) -> usize {
        self.side_length
    }
    pub fn point_in_bounds(&self, point: &Point) -> bool {
        let side = self.side_length as i32;
        point.x >= 0 && point.y >= 0 && point.x < side && point.y < side
    }
    /// Row-major index of an in-bounds point. Panics if the point lies outside the grid.
    pub fn get_ix_point(&self, point: &Point) -> usize {
        assert!(
            self.point_in_bounds(point),
            "{:?} is outside a grid of side {}",
            point,
            self.side_length
        );
        point.y as usize * self.side_length + point.x as usize
    }
    pub fn point(&self, ix: usize) -> Point {
        self.cells[ix].position()
    }
    pub fn cell(&self, ix: usize) -> &Cell {
        &self.cells[ix]
    }
    pub(crate) fn cell_mut(&mut self, ix: usize) -> &mut Cell {
        &mut self.cells[ix]
    }
    pub fn cell_at(&self, point: &Point) -> &Cell {
        self.cell(self.get_ix_point(point))
    }
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    pub fn is_blocked(&self, point: &Point) -> bool {
        self.blocked.contains(&self.get_ix_point(point))
    }
    /// Blocked points in the order they were placed.
    pub fn blocked(&self) -> impl Iterator<Item = Point> + '_ {
        self.blocked.iter().map(|&ix| self.point(ix))
    }
    pub fn start(&self) -> Option<Point> {
        self.start.map(|ix| self.point(ix))
    }
    pub fn end(&self) -> Option<Point> {
        self.end.map(|ix| self.point(ix))
    }
    pub(crate) fn start_ix(&self) -> Option<usize> {
        self.start
    }
    pub(crate) fn end_ix(&self) -> Option<usize> {
        self.end
    }

    /// Applies an edit to the cell at `point`. Start and end overwrite a block on the same cell,
    /// and a block placed on the start or end cell unsets that endpoint, so an endpoint is never
    /// blocked.
    pub fn set_role(&mut self, point: Point, role: Role) {
        let ix = self.get_ix_point(&point);
        match role {
            Role::Block => {
                if self.start == Some(ix) {
                    self.start = None;
                }
                if self.end == Some(ix) {
                    self.end = None;
                }
                if self.blocked.insert(ix) {
                    // Blocking may split a component, which a union-find cannot undo.
                    self.components_dirty = true;
                }
            }
            Role::Start => {
                self.start = Some(ix);
                self.unblock(ix);
            }
            Role::End => {
                self.end = Some(ix);
                self.unblock(ix);
            }
        }
    }
    /// Like [set_role](Self::set_role) but takes the role as a label. Unknown labels leave the
    /// grid untouched.
    pub fn set_role_str(&mut self, point: Point, role: &str) -> Result<(), UsageError> {
        match role.parse::<Role>() {
            Ok(role) => {
                self.set_role(point, role);
                Ok(())
            }
            Err(e) => {
                warn!("Ignoring edit of {:?}: {}", point, e);
                Err(e)
            }
        }
    }
    fn unblock(&mut self, ix: usize) {
        if self.blocked.shift_remove(&ix) {
            for n in self.neighbour_ixs(ix) {
                self.components.union(ix, n);
            }
        }
    }

    fn can_move_to(&self, point: &Point) -> bool {
        self.point_in_bounds(point) && !self.blocked.contains(&self.get_ix_point(point))
    }
    /// Free axis-aligned neighbours in the fixed order left, up, down, right. Search ties are
    /// broken by this order, so it must not change.
    pub(crate) fn neighbour_ixs(&self, ix: usize) -> Vec<usize> {
        let p = self.point(ix);
        [
            Point::new(p.x - 1, p.y),
            Point::new(p.x, p.y - 1),
            Point::new(p.x, p.y + 1),
            Point::new(p.x + 1, p.y),
        ]
        .into_iter()
        .filter(|n| self.can_move_to(n))
        .map(|n| self.get_ix_point(&n))
        .collect()
    }
    /// The unblocked neighbours of `point` in the order left, up, down, right.
    pub fn neighbours(&self, point: &Point) -> Vec<Point> {
        self.neighbour_ixs(self.get_ix_point(point))
            .into_iter()
            .map(|ix| self.point(ix))
            .collect()
    }

    /// Euclidean distance between two points.
    pub fn heuristic(&self, a: &Point, b: &Point) -> Cost {
        let (dx, dy) = (a.x - b.x, a.y - b.y);
        ((dx * dx + dy * dy) as Cost).sqrt()
    }
    pub(crate) fn heuristic_ix(&self, a: usize, b: usize) -> Cost {
        self.heuristic(&self.point(a), &self.point(b))
    }
    /// Number of parent links between the cell and the root of its parent chain. All moves cost
    /// one, so this is the path cost from the start cell.
    pub fn accumulated_cost(&self, point: &Point) -> Cost {
        self.accumulated_cost_ix(self.get_ix_point(point))
    }
    pub(crate) fn accumulated_cost_ix(&self, ix: usize) -> Cost {
        std::iter::successors(self.cells[ix].parent, |&p| self.cells[p].parent).count() as Cost
    }
    /// Points `child` at `parent` and refreshes its path cost.
    pub(crate) fn set_parent(&mut self, child: usize, parent: usize) {
        debug_assert!(!self.cells[child].explored, "explored cells keep their parent");
        self.cells[child].parent = Some(parent);
        self.cells[child].path_cost = self.accumulated_cost_ix(child);
    }
    /// Checks whether reaching `child` through `candidate` is cheaper than through its current
    /// parent.
    pub(crate) fn is_better_parent(&self, candidate: usize, child: usize) -> bool {
        match self.cells[child].parent {
            Some(parent) => self.cells[candidate].path_cost < self.cells[parent].path_cost,
            None => false,
        }
    }

    /// Clears the search bookkeeping of every cell. Blocks and endpoints are kept.
    pub fn reset_cell_state(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.reset();
        }
    }
    /// Clears the bookkeeping, the blocks and both endpoints.
    pub fn full_reset(&mut self) {
        info!("Resetting grid of side {}", self.side_length);
        self.reset_cell_state();
        self.blocked.clear();
        self.start = None;
        self.end = None;
        self.components_dirty = true;
    }

    /// Places `round(side² * BLOCK_DENSITY)` blocks at random positions (repeats allowed), then a
    /// random start and a random end. Endpoints overwrite blocks as with any other edit.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        let n = self.side_length;
        let n_blocks = ((n * n) as f64 * BLOCK_DENSITY).round() as usize;
        info!("Placing {} random blocks", n_blocks);
        let random_point =
            |rng: &mut R| Point::new(rng.gen_range(0..n) as i32, rng.gen_range(0..n) as i32);
        for _ in 0..n_blocks {
            let p = random_point(rng);
            self.set_role(p, Role::Block);
        }
        let start = random_point(rng);
        self.set_role(start, Role::Start);
        let end = random_point(rng);
        self.set_role(end, Role::End);
    }

    /// Checks that `path` is a non-empty sequence of free cells in which every consecutive pair
    /// is one axis-aligned move apart.
    pub fn is_valid_path(&self, path: &[Point]) -> bool {
        !path.is_empty()
            && path.iter().all(|p| self.can_move_to(p))
            && path
                .iter()
                .tuple_windows()
                .all(|(a, b)| (a.x - b.x).abs() + (a.y - b.y).abs() == 1)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }
    /// Generates a new [UnionFind] structure and links up free 4-neighbours to the same
    /// components.
    pub fn generate_components(&mut self) {
        info!("Generating connected components");
        let n = self.side_length;
        self.components = UnionFind::new(n * n);
        self.components_dirty = false;
        for ix in 0..n * n {
            if self.blocked.contains(&ix) {
                continue;
            }
            let p = self.point(ix);
            [Point::new(p.x + 1, p.y), Point::new(p.x, p.y + 1)]
                .into_iter()
                .filter(|q| self.can_move_to(q))
                .map(|q| self.get_ix_point(&q))
                .collect::<Vec<_>>()
                .into_iter()
                .for_each(|q| {
                    self.components.union(ix, q);
                });
        }
    }
    /// Checks if start and goal are free cells on the same component. Only meaningful after
    /// [update](Self::update) when the grid has been edited.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        self.can_move_to(start)
            && self.can_move_to(goal)
            && self
                .components
                .equiv(self.get_ix_point(start), self.get_ix_point(goal))
    }
    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        !self.reachable(start, goal)
    }

    fn symbol(&self, ix: usize, path: &[usize]) -> char {
        let cell = &self.cells[ix];
        if self.start == Some(ix) {
            'S'
        } else if self.end == Some(ix) {
            'E'
        } else if self.blocked.contains(&ix) {
            '#'
        } else if path.contains(&ix) {
            '*'
        } else if cell.explored {
            'x'
        } else if cell.on_frontier {
            'o'
        } else {
            '.'
        }
    }
    /// Writes one line per row, top row first, marking the cells of `path` with `*`.
    pub(crate) fn fmt_with_path(&self, f: &mut fmt::Formatter, path: &[usize]) -> fmt::Result {
        for y in 0..self.side_length {
            let row: String = (0..self.side_length)
                .map(|x| self.symbol(y * self.side_length + x, path))
                .collect();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_with_path(f, &[])
    }
}
