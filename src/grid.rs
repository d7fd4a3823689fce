use core::fmt;
use std::str::FromStr;

use grid_util::point::Point;
use itertools::iproduct;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::cell::{Cell, CellState};
use crate::error::ParseGridError;
use crate::N_SMALLVEC_SIZE;

/// [Grid] owns a flat, row-major array of [Cell]s. Every cell caches the coordinates of its
/// open orthogonal neighbors; the cache is only rebuilt by an explicit call to
/// [rebuild_adjacency](Grid::rebuild_adjacency), so marking obstacles during interactive editing
/// stays cheap. Toggling an obstacle flags the adjacency as dirty and searches refuse to run on a
/// dirty grid.
///
/// Alongside the neighbor lists the grid keeps [UnionFind] connected components over the open
/// cells, regenerated on every rebuild.
///
/// Coordinates are [Point]s with `x` as the column and `y` as the row.
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    components: UnionFind<usize>,
    adjacency_dirty: bool,
}

impl Default for Grid {
    fn default() -> Grid {
        Grid::new(0, 0)
    }
}

impl Grid {
    /// Allocates a `width` x `height` grid of [Empty](CellState::Empty) cells.
    pub fn new(width: usize, height: usize) -> Grid {
        let cells = iproduct!(0..height, 0..width)
            .map(|(y, x)| Cell::new(Point::new(x as i32, y as i32)))
            .collect();
        Grid {
            width,
            height,
            cells,
            components: UnionFind::new(width * height),
            adjacency_dirty: true,
        }
    }
    /// Square grid with `size` cells per side.
    pub fn build(size: usize) -> Grid {
        Grid::new(size, size)
    }
    /// Discards every marking and cached neighbor list, leaving a freshly built grid of the same
    /// dimensions.
    pub fn clear(&mut self) {
        *self = self.cleared();
    }
    /// A freshly built grid with the same dimensions. `self` is left untouched.
    #[must_use]
    pub fn cleared(&self) -> Grid {
        Grid::new(self.width, self.height)
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }
    /// Row-major index of an in-bounds point.
    pub(crate) fn get_ix_point(&self, p: &Point) -> usize {
        p.y as usize * self.width + p.x as usize
    }
    fn checked_ix(&self, p: Point) -> usize {
        assert!(
            self.in_bounds(p),
            "{} is outside the {}x{} grid",
            p,
            self.width,
            self.height
        );
        self.get_ix_point(&p)
    }
    pub fn get(&self, p: Point) -> Option<&Cell> {
        if self.in_bounds(p) {
            Some(&self.cells[self.get_ix_point(&p)])
        } else {
            None
        }
    }
    /// Panics if `p` is outside the grid.
    pub fn cell(&self, p: Point) -> &Cell {
        &self.cells[self.checked_ix(p)]
    }
    pub fn state(&self, p: Point) -> CellState {
        self.cell(p).state
    }
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
    /// All coordinates in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells.iter().map(Cell::position)
    }
    /// First cell in row-major order holding `state`.
    pub fn find(&self, state: CellState) -> Option<Point> {
        self.cells
            .iter()
            .find(|c| c.state == state)
            .map(Cell::position)
    }

    /// Sets the state of the cell at (`row`, `col`). Panics if out of range.
    pub fn mark(&mut self, row: usize, col: usize, state: CellState) {
        self.mark_point(Point::new(col as i32, row as i32), state);
    }
    /// Sets the state of a single cell. Adding or removing an obstacle invalidates the adjacency.
    pub fn mark_point(&mut self, p: Point, state: CellState) {
        let ix = self.checked_ix(p);
        let cell = &mut self.cells[ix];
        if cell.is_obstacle() != (state == CellState::Obstacle) {
            self.adjacency_dirty = true;
        }
        cell.state = state;
    }
    /// Used by the search, which never touches obstacles.
    pub(crate) fn set_search_state(&mut self, p: Point, state: CellState) {
        debug_assert!(state.is_search_mark());
        let ix = self.get_ix_point(&p);
        debug_assert!(!self.cells[ix].is_obstacle());
        self.cells[ix].state = state;
    }
    /// Returns frontier, visited and path cells to [Empty](CellState::Empty) while keeping the
    /// start, end and obstacles, so another search can run on the same layout.
    pub fn reset_search(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| c.state.is_search_mark()) {
            cell.state = CellState::Empty;
        }
    }

    pub fn is_adjacency_fresh(&self) -> bool {
        !self.adjacency_dirty
    }
    /// Cached neighbor list of a cell. An empty list is valid for an enclosed cell.
    pub fn neighbors_of(&self, p: Point) -> &[Point] {
        self.cell(p).neighbors()
    }
    fn open_neighbors(&self, p: Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        [
            Point::new(p.x, p.y + 1),
            Point::new(p.x, p.y - 1),
            Point::new(p.x + 1, p.y),
            Point::new(p.x - 1, p.y),
        ]
        .into_iter()
        .filter(|&n| self.in_bounds(n) && !self.cells[self.get_ix_point(&n)].is_obstacle())
        .collect()
    }
    /// Recomputes every neighbor list from the current obstacle markings and regenerates the
    /// connected components.
    pub fn rebuild_adjacency(&mut self) {
        debug!(
            "Rebuilding adjacency for {}x{} grid",
            self.width, self.height
        );
        for ix in 0..self.cells.len() {
            let neighbors = self.open_neighbors(self.cells[ix].position());
            self.cells[ix].neighbors = neighbors;
        }
        self.adjacency_dirty = false;
        self.generate_components();
    }
    /// Generates a new [UnionFind] structure and links up open cells with their cached neighbors.
    fn generate_components(&mut self) {
        debug!("Generating connected components");
        let mut components = UnionFind::new(self.cells.len());
        for (ix, cell) in self.cells.iter().enumerate() {
            if cell.is_obstacle() {
                continue;
            }
            for n in cell.neighbors() {
                components.union(ix, self.get_ix_point(n));
            }
        }
        self.components = components;
    }
    /// Retrieves the component id a given [Point] belongs to, as of the last rebuild.
    pub fn component(&self, p: &Point) -> usize {
        self.components.find(self.checked_ix(*p))
    }
    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }
    /// Checks if start and goal are not on the same component. Out-of-bounds points are never
    /// reachable.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.in_bounds(*start) && self.in_bounds(*goal) {
            !self
                .components
                .equiv(self.get_ix_point(start), self.get_ix_point(goal))
        } else {
            true
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            let line: String = row.iter().map(|c| c.state.glyph()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Parses the [Display] form: one line per row, one glyph per cell. Blank lines and surrounding
/// whitespace are ignored. The parsed grid still needs
/// [rebuild_adjacency](Grid::rebuild_adjacency).
impl FromStr for Grid {
    type Err = ParseGridError;

    fn from_str(s: &str) -> Result<Grid, ParseGridError> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let width = match rows.first() {
            Some(first) => first.chars().count(),
            None => return Err(ParseGridError::Empty),
        };
        let mut grid = Grid::new(width, rows.len());
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(ParseGridError::Ragged {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                let state = CellState::from_glyph(glyph)
                    .ok_or(ParseGridError::UnknownGlyph { glyph, row, col })?;
                grid.mark(row, col, state);
            }
        }
        Ok(grid)
    }
}
