use grid_util::point::Point;
use thiserror::Error;

/// Ways a search can end without producing a path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The frontier ran dry before the end cell was popped.
    #[error("no path exists between start and end")]
    NoPathFound,

    #[error("search was cancelled")]
    Cancelled,

    /// Obstacles changed after the last adjacency rebuild.
    #[error("adjacency is stale, call rebuild_adjacency() before searching")]
    StaleAdjacency,

    #[error("{0} lies outside the grid")]
    OutOfBounds(Point),

    /// [step](crate::search::Search::step) was called after the search terminated.
    #[error("search has already finished")]
    Finished,
}

/// Returned by [Frontier::pop_min](crate::frontier::Frontier::pop_min) when no entries remain.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("frontier is empty")]
pub struct EmptyFrontier;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseGridError {
    #[error("grid text contains no rows")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell glyph {glyph:?} at row {row}, column {col}")]
    UnknownGlyph { glyph: char, row: usize, col: usize },
}
