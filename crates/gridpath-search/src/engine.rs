//! The step-wise Dijkstra engine.
//!
//! [`PathfindingEngine::step`] performs exactly one heap extraction and
//! returns the events it produced. The engine never sleeps or loops on its
//! own; pacing belongs to the [`StepScheduler`](crate::StepScheduler).

use gridpath_core::{GridModel, SearchLock, UNREACHABLE};

use crate::error::{SearchError, SearchResult};
use crate::events::{DisplayDistance, Outcome, PathNode, SearchEvent, SearchSummary};
use crate::heap::MinHeap;
use crate::reconstruct::reconstruct;

/// Why a search failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailureKind {
    NoPath,
    Trapped,
}

/// Engine state machine.
///
/// `Idle → Running → {Succeeded, Failed(_)}`. Terminal states stay put until
/// [`reset`](PathfindingEngine::reset) or a new
/// [`start`](PathfindingEngine::start).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineState {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed(FailureKind),
}

impl EngineState {
    #[inline]
    pub fn is_running(self) -> bool {
        self == Self::Running
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed(_))
    }

    /// The outcome for a terminal state.
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            Self::Succeeded => Some(Outcome::Succeeded),
            Self::Failed(FailureKind::NoPath) => Some(Outcome::NoPathFound),
            Self::Failed(FailureKind::Trapped) => Some(Outcome::Trapped),
            Self::Idle | Self::Running => None,
        }
    }
}

/// Incremental single-source shortest-path search with unit edge cost.
///
/// The frontier is a [`MinHeap`] of flat cell indices. Relaxation pushes a
/// fresh entry instead of decreasing a key; entries that surface for a wall,
/// an already visited cell, or with a key that no longer matches the cell's
/// best distance are discarded.
///
/// A running engine holds the [`SearchLock`] of the grid it was started on.
/// That grid refuses edits until the search finishes or is cancelled, and
/// [`step`](Self::step) refuses any other grid with
/// [`SearchError::LockLost`].
#[derive(Debug, Default)]
pub struct PathfindingEngine {
    state: EngineState,
    lock: Option<SearchLock>,
    heap: MinHeap<usize>,
    end: usize,
    visited_count: usize,
    discarded_count: usize,
    // scratch buffers reused across steps
    nbuf: Vec<usize>,
    pub(crate) events: Vec<SearchEvent>,
}

impl PathfindingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Cells settled so far in the current (or last) run.
    #[inline]
    pub fn visited_count(&self) -> usize {
        self.visited_count
    }

    /// Stale heap entries dropped so far in the current (or last) run.
    #[inline]
    pub fn discarded_count(&self) -> usize {
        self.discarded_count
    }

    /// Entries currently waiting in the frontier.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.heap.len()
    }

    /// Begin a search on `grid` from its start cell towards its end cell.
    ///
    /// Locks the grid and clears its search-derived state. Rejected while a
    /// search is already running, or when another search holds `grid`.
    pub fn start(&mut self, grid: &mut GridModel) -> SearchResult<()> {
        if self.state.is_running() {
            log::warn!("search start rejected: already running");
            return Err(SearchError::AlreadyRunning);
        }
        if grid.start_idx() == grid.end_idx() {
            return Err(SearchError::StartIsEnd(grid.start()));
        }

        let lock = grid.lock_search()?;
        let s = grid.start_idx();
        grid.set_distance(&lock, s, 0, None)?;

        self.lock = Some(lock);
        self.heap.clear();
        self.heap.insert(0, s);
        self.end = grid.end_idx();
        self.visited_count = 0;
        self.discarded_count = 0;
        self.events.clear();
        self.state = EngineState::Running;

        log::info!(
            "search started: start {} end {} on {}x{} grid",
            grid.start(),
            grid.end(),
            grid.size(),
            grid.size()
        );
        Ok(())
    }

    /// Perform one extraction from the frontier.
    ///
    /// Returns the events produced by this step. An empty slice means a
    /// stale entry was discarded and the caller should step again.
    pub fn step(&mut self, grid: &mut GridModel) -> SearchResult<&[SearchEvent]> {
        if !self.state.is_running() {
            return Err(SearchError::NotRunning);
        }
        let Some(lock) = self.lock.as_ref().filter(|l| grid.holds(l)) else {
            log::warn!("step rejected: grid is not locked by this search");
            return Err(SearchError::LockLost);
        };
        self.events.clear();

        let Some((key, ci)) = self.heap.extract_min() else {
            log::info!(
                "no path found to {} after visiting {} cells",
                grid.end(),
                self.visited_count
            );
            return self.finish(grid, EngineState::Failed(FailureKind::NoPath), None);
        };

        let cell = grid.cell_at(ci);
        if cell.is_wall() || cell.is_visited() || key != cell.distance() {
            self.discarded_count += 1;
            log::trace!("discarded stale entry {} (key {})", grid.pos(ci), DisplayDistance(key));
            return Ok(&self.events);
        }

        let current = cell.distance();
        if current == UNREACHABLE {
            log::error!(
                "trapped: unreached cell {} extracted from a non-empty frontier",
                grid.pos(ci)
            );
            return self.finish(grid, EngineState::Failed(FailureKind::Trapped), None);
        }

        grid.mark_visited(lock, ci)?;
        self.visited_count += 1;
        let cp = grid.pos(ci);
        log::debug!(
            "step {}: visiting {} distance {}",
            self.visited_count,
            cp,
            current
        );
        self.events.push(SearchEvent::Visited {
            row: cp.row,
            col: cp.col,
            distance: current,
            visited_count: self.visited_count,
        });

        if ci == self.end {
            let path = reconstruct(grid, ci);
            log::info!(
                "reached {} in {} steps ({} discarded), path length {}",
                cp,
                self.visited_count,
                self.discarded_count,
                path.len().saturating_sub(1)
            );
            return self.finish(grid, EngineState::Succeeded, Some(path));
        }

        self.nbuf.clear();
        grid.neighbors(ci, &mut self.nbuf);
        let candidate = current + 1;
        for &ni in self.nbuf.iter() {
            let old = grid.cell_at(ni).distance();
            if candidate >= old {
                continue;
            }
            grid.set_distance(lock, ni, candidate, Some(ci))?;
            self.heap.insert(candidate, ni);

            let np = grid.pos(ni);
            log::trace!(
                "relaxed {}: {} -> {}",
                np,
                DisplayDistance(old),
                candidate
            );
            self.events.push(SearchEvent::Relaxed {
                row: np.row,
                col: np.col,
                old_distance: old,
                new_distance: candidate,
            });
        }

        Ok(&self.events)
    }

    /// Step until the search leaves `Running` and return the final summary.
    ///
    /// Used where no pacing is wanted (tests, batch runs).
    pub fn run_to_end(&mut self, grid: &mut GridModel) -> SearchResult<SearchSummary> {
        loop {
            if let Some(SearchEvent::Done(summary)) = self.step(grid)?.last() {
                return Ok(summary.clone());
            }
        }
    }

    /// Abort a running search and return to `Idle`, unlocking `grid` if it
    /// is the grid being searched. No terminal event is emitted.
    pub fn cancel(&mut self, grid: &mut GridModel) -> SearchResult<()> {
        if !self.state.is_running() {
            return Err(SearchError::NotRunning);
        }
        if let Some(lock) = self.lock.take() {
            if grid.holds(&lock) {
                grid.unlock_search(lock)?;
            } else {
                log::warn!("cancelled search did not hold the given grid");
            }
        }
        self.heap.clear();
        self.events.clear();
        self.state = EngineState::Idle;
        log::info!("search cancelled after {} visited cells", self.visited_count);
        Ok(())
    }

    /// Return a finished engine to `Idle`. Rejected while running.
    pub fn reset(&mut self) -> SearchResult<()> {
        if self.state.is_running() {
            return Err(SearchError::AlreadyRunning);
        }
        self.heap.clear();
        self.events.clear();
        self.visited_count = 0;
        self.discarded_count = 0;
        self.state = EngineState::Idle;
        Ok(())
    }

    fn finish(
        &mut self,
        grid: &mut GridModel,
        state: EngineState,
        path: Option<Vec<PathNode>>,
    ) -> SearchResult<&[SearchEvent]> {
        self.heap.clear();
        self.state = state;
        if let Some(lock) = self.lock.take() {
            grid.unlock_search(lock)?;
        }
        if let Some(outcome) = state.outcome() {
            self.events.push(SearchEvent::Done(SearchSummary {
                outcome,
                visited_count: self.visited_count,
                path,
            }));
        }
        Ok(&self.events)
    }
}
