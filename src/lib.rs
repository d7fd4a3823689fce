//! # grid_stepsearch
//!
//! Shortest paths between two cells of an obstacle grid, computed one relaxation step at a time
//! so the search can be animated. Movement is 4-connected and every move costs [EDGE_COST].
//!
//! A [Grid] caches each cell's open neighbors; the cache is rebuilt explicitly with
//! [Grid::rebuild_adjacency] after editing obstacles. A [SearchEngine] then runs a uniform-cost
//! search over it, reporting every cell that enters the frontier, gets visited or ends up on the
//! path through a callback, and returns the [Path] or [SearchError::NoPathFound].
//!
//! ```
//! use grid_stepsearch::{CellState, Grid, SearchEngine};
//!
//! let mut grid: Grid = "S..\n.#.\n..E".parse().unwrap();
//! grid.rebuild_adjacency();
//! let start = grid.find(CellState::Start).unwrap();
//! let end = grid.find(CellState::End).unwrap();
//! let mut changes = 0;
//! let path = SearchEngine::new()
//!     .run(&mut grid, start, end, |_, _| changes += 1)
//!     .unwrap();
//! assert_eq!(path.steps(), 4);
//! assert!(changes > 0);
//! ```
pub mod cell;
pub mod error;
pub mod frontier;
pub mod grid;
pub mod layout;
pub mod path;
pub mod search;

use grid_util::point::Point;

pub use cell::{Cell, CellState};
pub use error::{EmptyFrontier, ParseGridError, SearchError};
pub use frontier::{Frontier, FrontierEntry};
pub use grid::Grid;
pub use layout::GridLayout;
pub use path::{reconstruct, Path, PredecessorMap};
pub use search::heuristic::{Heuristic, Manhattan, UniformCost};
pub use search::{Search, SearchEngine, Step, UNREACHABLE};

/// Path cost type.
pub type Cost = u32;
/// Cost of a single orthogonal move.
pub const EDGE_COST: Cost = 1;
/// Inline capacity of neighbor lists; a cell has at most four orthogonal neighbors.
pub const N_SMALLVEC_SIZE: usize = 4;

/// Number of orthogonal moves between two cells on an empty grid.
pub fn manhattan_distance(a: &Point, b: &Point) -> Cost {
    a.manhattan_distance(b) as Cost
}
