use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexMap;
use log::warn;

use crate::cell::CellState;
use crate::grid::Grid;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Maps each reached cell to the cell that produced its current best tentative cost. The start
/// cell never has an entry.
pub type PredecessorMap = FxIndexMap<Point, Point>;

/// A shortest path found by a search. Only the cells strictly between start and end are stored,
/// ordered from the end back towards the start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    start: Point,
    end: Point,
    cells: Vec<Point>,
}

impl Path {
    pub(crate) fn new(start: Point, end: Point, cells: Vec<Point>) -> Path {
        Path { start, end, cells }
    }
    pub fn start(&self) -> Point {
        self.start
    }
    pub fn end(&self) -> Point {
        self.end
    }
    /// Intermediate cells in end-to-start order: the first is adjacent to the end, the last is
    /// adjacent to the start.
    pub fn cells(&self) -> &[Point] {
        &self.cells
    }
    pub fn into_vec(self) -> Vec<Point> {
        self.cells
    }
    /// Intermediate cells in start-to-end order.
    pub fn to_start_order(&self) -> Vec<Point> {
        self.cells.iter().rev().copied().collect()
    }
    /// Every cell visited when walking the path, start and end included.
    pub fn waypoints(&self) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.cells.len() + 2);
        points.push(self.start);
        points.extend(self.cells.iter().rev());
        if self.end != self.start {
            points.push(self.end);
        }
        points
    }
    /// Number of moves from start to end, which is also the path cost under unit edge weights.
    pub fn steps(&self) -> usize {
        if self.start == self.end {
            0
        } else {
            self.cells.len() + 1
        }
    }
    /// True when start and end are the same cell or direct neighbors.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Walks the predecessor chain from `end` back to the cell without a predecessor (the start),
/// marking every cell in between as [Path](CellState::Path) and reporting each change through
/// `on_change`. Returns the cells in end-to-start order, neither endpoint included.
///
/// An `end` without a predecessor entry yields an empty path.
pub fn reconstruct<F>(
    predecessors: &PredecessorMap,
    end: Point,
    grid: &mut Grid,
    on_change: &mut F,
) -> Vec<Point>
where
    F: FnMut(Point, CellState),
{
    if !predecessors.contains_key(&end) {
        warn!("{} has no predecessor, nothing to reconstruct", end);
        return Vec::new();
    }
    let cells: Vec<Point> =
        std::iter::successors(predecessors.get(&end).copied(), |p| {
            predecessors.get(p).copied()
        })
        .take_while(|p| predecessors.contains_key(p))
        // A chain can never be longer than the map; this bounds a malformed, cyclic map
        .take(predecessors.len())
        .collect();
    for &p in &cells {
        grid.set_search_state(p, CellState::Path);
        on_change(p, CellState::Path);
    }
    cells
}
