//! The relaxation loop.
//!
//! Every cell is in one of three sets: unseen, open (queued with a tentative cost) or settled
//! (cost final). The start enters the open set with cost 0. Each iteration pops the cheapest open
//! entry; stale duplicates of settled cells are discarded, the end cell terminates the search and
//! anything else has its neighbors relaxed before being settled.
//!
//! Observable state changes (a cell entering the frontier, being visited, or becoming part of
//! the path) are written to the [Grid] and reported through a callback in the exact order they
//! happen. The start and end cells keep their markers and are never reported.
use grid_util::point::Point;
use log::{info, trace, warn};
use smallvec::SmallVec;

use crate::cell::CellState;
use crate::error::{EmptyFrontier, SearchError};
use crate::frontier::Frontier;
use crate::grid::Grid;
use crate::path::{reconstruct, Path, PredecessorMap};
use crate::{Cost, EDGE_COST, N_SMALLVEC_SIZE};

pub mod heuristic;

use heuristic::{Heuristic, UniformCost};

/// Tentative cost of a cell that has not been reached.
pub const UNREACHABLE: Cost = Cost::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SearchSet {
    Unseen,
    Open,
    Settled,
}

/// Outcome of a single [Search::step].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// The cell was settled and its neighbors relaxed.
    Expanded(Point),
    /// A stale entry for an already settled cell was dropped.
    Discarded(Point),
    /// The end cell was reached; the path has been marked on the grid.
    Found(Path),
}

/// Configures and starts searches. The heuristic defaults to [UniformCost], which orders the
/// frontier by accumulated cost only.
#[derive(Clone, Debug, Default)]
pub struct SearchEngine<H = UniformCost> {
    pub heuristic: H,
    /// Fail with [NoPathFound](SearchError::NoPathFound) up front when the connected components
    /// say the end cannot be reached, instead of exhausting the frontier. No cell changes state in
    /// that case.
    pub skip_unreachable: bool,
}

impl SearchEngine<UniformCost> {
    pub fn new() -> SearchEngine<UniformCost> {
        SearchEngine::with_heuristic(UniformCost)
    }
}

impl<H: Heuristic> SearchEngine<H> {
    pub fn with_heuristic(heuristic: H) -> SearchEngine<H> {
        SearchEngine {
            heuristic,
            skip_unreachable: false,
        }
    }

    /// Prepares a search from `start` to `end` that is advanced one iteration at a time with
    /// [Search::step]. The grid stays mutably borrowed until the search is dropped.
    pub fn begin<'a>(
        &'a self,
        grid: &'a mut Grid,
        start: Point,
        end: Point,
    ) -> Result<Search<'a, H>, SearchError> {
        for p in [start, end] {
            if !grid.in_bounds(p) {
                return Err(SearchError::OutOfBounds(p));
            }
        }
        if !grid.is_adjacency_fresh() {
            warn!("Refusing to search {} -> {} on stale adjacency", start, end);
            return Err(SearchError::StaleAdjacency);
        }
        if self.skip_unreachable && grid.unreachable(&start, &end) {
            info!("{} is not reachable from {}", end, start);
            return Err(SearchError::NoPathFound);
        }
        info!("Searching for a path from {} to {}", start, end);
        Ok(Search::new(grid, &self.heuristic, start, end))
    }

    /// Runs a search to completion, calling `on_change` for every observable state change.
    pub fn run<F>(
        &self,
        grid: &mut Grid,
        start: Point,
        end: Point,
        on_change: F,
    ) -> Result<Path, SearchError>
    where
        F: FnMut(Point, CellState),
    {
        self.run_cancellable(grid, start, end, on_change, || false)
    }

    /// Like [run](Self::run), but consults `should_cancel` before every iteration and stops with
    /// [Cancelled](SearchError::Cancelled) when it returns true. Cells marked so far keep their
    /// markings.
    pub fn run_cancellable<F, FC>(
        &self,
        grid: &mut Grid,
        start: Point,
        end: Point,
        mut on_change: F,
        mut should_cancel: FC,
    ) -> Result<Path, SearchError>
    where
        F: FnMut(Point, CellState),
        FC: FnMut() -> bool,
    {
        let mut search = self.begin(grid, start, end)?;
        loop {
            if should_cancel() {
                info!("Search cancelled after {} expansions", search.expanded());
                return Err(SearchError::Cancelled);
            }
            if let Step::Found(path) = search.step(&mut on_change)? {
                return Ok(path);
            }
        }
    }
}

/// A search in progress. See the [module documentation](crate::search) for the loop it runs.
pub struct Search<'a, H> {
    grid: &'a mut Grid,
    heuristic: &'a H,
    start: Point,
    end: Point,
    frontier: Frontier<Point, Cost>,
    costs: Vec<Cost>,
    sets: Vec<SearchSet>,
    predecessors: PredecessorMap,
    expanded: usize,
    finished: bool,
}

impl<'a, H: Heuristic> Search<'a, H> {
    fn new(grid: &'a mut Grid, heuristic: &'a H, start: Point, end: Point) -> Search<'a, H> {
        let mut costs = vec![UNREACHABLE; grid.len()];
        let mut sets = vec![SearchSet::Unseen; grid.len()];
        let start_ix = grid.get_ix_point(&start);
        costs[start_ix] = 0;
        sets[start_ix] = SearchSet::Open;
        let mut frontier = Frontier::new();
        frontier.push(heuristic.estimate(&start, &end), start);
        Search {
            grid,
            heuristic,
            start,
            end,
            frontier,
            costs,
            sets,
            predecessors: PredecessorMap::default(),
            expanded: 0,
            finished: false,
        }
    }

    /// Performs one iteration of the loop: pops one frontier entry and handles it.
    pub fn step<F>(&mut self, on_change: &mut F) -> Result<Step, SearchError>
    where
        F: FnMut(Point, CellState),
    {
        if self.finished {
            return Err(SearchError::Finished);
        }
        let curr = match self.frontier.pop_min() {
            Ok(entry) => entry.node,
            Err(EmptyFrontier) => {
                self.finished = true;
                info!(
                    "No path from {} to {} after {} expansions",
                    self.start, self.end, self.expanded
                );
                return Err(SearchError::NoPathFound);
            }
        };
        let curr_ix = self.grid.get_ix_point(&curr);
        if self.sets[curr_ix] == SearchSet::Settled {
            trace!("Discarding stale entry for {}", curr);
            return Ok(Step::Discarded(curr));
        }
        if curr == self.end {
            self.sets[curr_ix] = SearchSet::Settled;
            self.finished = true;
            let cells = if self.end == self.start {
                Vec::new()
            } else {
                reconstruct(&self.predecessors, self.end, self.grid, on_change)
            };
            let path = Path::new(self.start, self.end, cells);
            info!(
                "Found path of {} steps from {} to {} after {} expansions",
                path.steps(),
                self.start,
                self.end,
                self.expanded
            );
            return Ok(Step::Found(path));
        }

        trace!("Expanding {}", curr);
        let candidate = self.costs[curr_ix] + EDGE_COST;
        let neighbors: SmallVec<[Point; N_SMALLVEC_SIZE]> =
            SmallVec::from_slice(self.grid.neighbors_of(curr));
        for n in neighbors {
            let n_ix = self.grid.get_ix_point(&n);
            if self.sets[n_ix] == SearchSet::Settled || candidate >= self.costs[n_ix] {
                continue;
            }
            self.costs[n_ix] = candidate;
            self.predecessors.insert(n, curr);
            let discovered = !self.frontier.contains(&n);
            let priority = candidate.saturating_add(self.heuristic.estimate(&n, &self.end));
            self.frontier.push(priority, n);
            if discovered && self.sets[n_ix] == SearchSet::Unseen {
                self.sets[n_ix] = SearchSet::Open;
                self.paint(n, CellState::Frontier, on_change);
            }
        }
        self.sets[curr_ix] = SearchSet::Settled;
        self.paint(curr, CellState::Visited, on_change);
        self.expanded += 1;
        Ok(Step::Expanded(curr))
    }

    fn paint<F>(&mut self, p: Point, state: CellState, on_change: &mut F)
    where
        F: FnMut(Point, CellState),
    {
        if p != self.start && p != self.end {
            self.grid.set_search_state(p, state);
            on_change(p, state);
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }
    pub fn end(&self) -> Point {
        self.end
    }
    pub fn is_finished(&self) -> bool {
        self.finished
    }
    /// Number of cells settled so far, the end excluded.
    pub fn expanded(&self) -> usize {
        self.expanded
    }
    /// Number of queued frontier entries, stale duplicates included.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }
    /// Number of distinct cells waiting in the frontier.
    pub fn frontier_cells(&self) -> usize {
        self.frontier.distinct_len()
    }
    /// Best known cost from the start, or [None] if the cell has not been reached.
    pub fn tentative_cost(&self, p: Point) -> Option<Cost> {
        if !self.grid.in_bounds(p) {
            return None;
        }
        match self.costs[self.grid.get_ix_point(&p)] {
            UNREACHABLE => None,
            c => Some(c),
        }
    }
    pub fn predecessors(&self) -> &PredecessorMap {
        &self.predecessors
    }
    /// Read access to the grid between steps, e.g. for redrawing.
    pub fn grid(&self) -> &Grid {
        &*self.grid
    }
}
