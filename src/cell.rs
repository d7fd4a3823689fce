use grid_util::point::Point;
use smallvec::SmallVec;

use crate::N_SMALLVEC_SIZE;

/// Observable state of a single cell. The search only ever moves cells between
/// [Empty](CellState::Empty), [Frontier](CellState::Frontier),
/// [Visited](CellState::Visited) and [Path](CellState::Path); the remaining
/// states are set by whoever edits the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Empty,
    Start,
    End,
    Obstacle,
    Frontier,
    Visited,
    Path,
}

impl CellState {
    /// Glyph used by the text form of a [Grid](crate::grid::Grid).
    pub fn glyph(self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Start => 'S',
            CellState::End => 'E',
            CellState::Obstacle => '#',
            CellState::Frontier => 'o',
            CellState::Visited => 'x',
            CellState::Path => '*',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<CellState> {
        match glyph {
            '.' => Some(CellState::Empty),
            'S' => Some(CellState::Start),
            'E' => Some(CellState::End),
            '#' => Some(CellState::Obstacle),
            'o' => Some(CellState::Frontier),
            'x' => Some(CellState::Visited),
            '*' => Some(CellState::Path),
            _ => None,
        }
    }

    /// States written by a search, as opposed to by the user.
    pub fn is_search_mark(self) -> bool {
        matches!(
            self,
            CellState::Frontier | CellState::Visited | CellState::Path
        )
    }
}

/// A single grid position. Neighbors are stored as coordinates into the owning
/// grid and are only meaningful after
/// [rebuild_adjacency](crate::grid::Grid::rebuild_adjacency).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pos: Point,
    pub(crate) state: CellState,
    pub(crate) neighbors: SmallVec<[Point; N_SMALLVEC_SIZE]>,
}

impl Cell {
    pub(crate) fn new(pos: Point) -> Cell {
        Cell {
            pos,
            state: CellState::Empty,
            neighbors: SmallVec::new(),
        }
    }
    pub fn position(&self) -> Point {
        self.pos
    }
    pub fn row(&self) -> usize {
        self.pos.y as usize
    }
    pub fn col(&self) -> usize {
        self.pos.x as usize
    }
    pub fn state(&self) -> CellState {
        self.state
    }
    pub fn is_obstacle(&self) -> bool {
        self.state == CellState::Obstacle
    }
    /// Cached orthogonal neighbors that were not obstacles at the last rebuild.
    pub fn neighbors(&self) -> &[Point] {
        &self.neighbors
    }
}
