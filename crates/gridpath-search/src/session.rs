//! The [`Session`]: one grid, one engine, one search at a time.
//!
//! All grid edits go through the session, which rejects them while the
//! engine is running. The grid enforces the same rule underneath through
//! its search lock.

use std::time::Duration;

use gridpath_core::{GridConfig, GridModel, Pos};

use crate::engine::{EngineState, PathfindingEngine};
use crate::error::{SearchResult, SessionError, SessionResult};
use crate::events::{Outcome, PathNode, SearchEvent};

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for creating a [`Session`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionConfig {
    pub grid: GridConfig,
    /// Pause between scheduler ticks.
    pub tick_interval: Duration,
}

impl SessionConfig {
    pub const DEFAULT_TICK: Duration = Duration::from_millis(10);
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            tick_interval: Self::DEFAULT_TICK,
        }
    }
}

// ---------------------------------------------------------------------------
// EditMode / SearchStats
// ---------------------------------------------------------------------------

/// What a click on a cell does.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EditMode {
    #[default]
    Wall,
    Start,
    End,
}

/// Counters shown alongside the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    pub visited: usize,
    /// Stale frontier entries dropped so far.
    pub discarded: usize,
    /// Entries waiting in the frontier.
    pub frontier: usize,
    /// Number of cells on the found path, 0 when none.
    pub path_length: usize,
    /// Distance recorded at the end cell on success.
    pub total_distance: Option<i32>,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    grid: GridModel,
    engine: PathfindingEngine,
    stats: SearchStats,
}

impl Session {
    /// Create a session with a fresh grid built from `config`.
    pub fn new(config: SessionConfig) -> SessionResult<Self> {
        let grid = GridModel::from_config(&config.grid)?;
        Ok(Self {
            config,
            grid,
            engine: PathfindingEngine::new(),
            stats: SearchStats::default(),
        })
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[inline]
    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    #[inline]
    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    fn ensure_idle(&self) -> SessionResult<()> {
        if self.engine.state().is_running() {
            log::warn!("grid edit rejected while the search is running");
            return Err(SessionError::RejectedEdit);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Edits
    // -----------------------------------------------------------------------

    /// Flip the wall at `p`. Returns the new wall flag.
    pub fn toggle_wall(&mut self, p: Pos) -> SessionResult<bool> {
        self.ensure_idle()?;
        Ok(self.grid.toggle_wall(p)?)
    }

    /// Force the wall flag at `p`.
    pub fn set_wall(&mut self, p: Pos, wall: bool) -> SessionResult<()> {
        self.ensure_idle()?;
        Ok(self.grid.set_wall(p, wall)?)
    }

    pub fn set_start(&mut self, p: Pos) -> SessionResult<()> {
        self.ensure_idle()?;
        Ok(self.grid.set_start(p)?)
    }

    pub fn set_end(&mut self, p: Pos) -> SessionResult<()> {
        self.ensure_idle()?;
        Ok(self.grid.set_end(p)?)
    }

    /// Apply a click at `p` under the given mode.
    pub fn apply_edit(&mut self, mode: EditMode, p: Pos) -> SessionResult<()> {
        match mode {
            EditMode::Wall => self.toggle_wall(p).map(|_| ()),
            EditMode::Start => self.set_start(p),
            EditMode::End => self.set_end(p),
        }
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Replace the grid with a fresh one from the configuration. Walls are
    /// dropped and start/end return to their configured cells.
    pub fn reset_grid(&mut self) -> SessionResult<()> {
        self.ensure_idle()?;
        self.grid = GridModel::from_config(&self.config.grid)?;
        self.engine.reset()?;
        self.stats = SearchStats::default();
        log::info!("grid has been reset");
        Ok(())
    }

    /// Clear search-derived state, keeping walls and roles.
    pub fn clear_path(&mut self) -> SessionResult<()> {
        self.ensure_idle()?;
        self.grid.reset_search_state()?;
        self.engine.reset()?;
        self.stats = SearchStats::default();
        log::info!("path has been cleared");
        Ok(())
    }

    /// Start a new search. Allowed from `Idle` or a terminal state.
    pub fn start(&mut self) -> SessionResult<()> {
        self.engine
            .start(&mut self.grid)
            .map_err(SessionError::RejectedStart)?;
        self.stats = SearchStats::default();
        Ok(())
    }

    /// Advance the running search by one step.
    pub fn step(&mut self) -> SearchResult<&[SearchEvent]> {
        self.engine.step(&mut self.grid)?;
        let events = &self.engine.events;
        for ev in events {
            match ev {
                SearchEvent::Visited { visited_count, .. } => {
                    self.stats.visited = *visited_count;
                }
                SearchEvent::Done(summary) => {
                    self.stats.visited = summary.visited_count;
                    if summary.outcome == Outcome::Succeeded {
                        self.stats.path_length = summary.path.as_ref().map_or(0, Vec::len);
                        self.stats.total_distance = self.grid.end_distance();
                    }
                }
                SearchEvent::Relaxed { .. } => {}
            }
        }
        self.stats.discarded = self.engine.discarded_count();
        self.stats.frontier = self.engine.frontier_len();
        Ok(events)
    }

    /// Abort the running search.
    pub fn cancel(&mut self) -> SearchResult<()> {
        self.engine.cancel(&mut self.grid)
    }

    /// Mark one path cell during playback.
    pub fn mark_path(&mut self, node: &PathNode) -> SessionResult<()> {
        self.ensure_idle()?;
        Ok(self.grid.mark_path(node.pos)?)
    }
}
