use grid_util::point::Point;

use crate::{manhattan_distance, Cost};

/// Estimate of the remaining cost from a cell to the end, added to the tentative cost to form
/// the frontier priority.
pub trait Heuristic {
    fn estimate(&self, from: &Point, to: &Point) -> Cost;
}

/// Orders the frontier by accumulated cost alone, which makes the search a plain uniform-cost
/// (Dijkstra) search. This is the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UniformCost;

impl Heuristic for UniformCost {
    fn estimate(&self, _: &Point, _: &Point) -> Cost {
        0
    }
}

/// Manhattan distance to the end times a factor. With a factor of 1 the estimate never
/// overshoots on a 4-connected unit grid, so paths stay optimal while fewer cells are expanded.
/// Larger factors trade optimality for speed.
#[derive(Clone, Debug, PartialEq)]
pub struct Manhattan {
    pub factor: f32,
}

impl Manhattan {
    pub fn new() -> Manhattan {
        Manhattan { factor: 1.0 }
    }
}

impl Default for Manhattan {
    fn default() -> Manhattan {
        Manhattan::new()
    }
}

impl Heuristic for Manhattan {
    fn estimate(&self, from: &Point, to: &Point) -> Cost {
        (manhattan_distance(from, to) as f32 * self.factor) as Cost
    }
}
