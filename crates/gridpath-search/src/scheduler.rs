//! Externally paced stepping: [`Stepper`], [`CancelToken`],
//! [`StepScheduler`].
//!
//! The scheduler is the only place that sleeps. Each tick is exactly one
//! `step()` call, discards included, and cancellation is checked once per
//! tick boundary. The cancel flag is cleared when a run or playback ends,
//! so a request made before one starts still stops it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crate::engine::EngineState;
use crate::error::{SearchError, SearchResult};
use crate::events::{Outcome, PathNode, SearchEvent, SearchSummary};
use crate::session::Session;

// ---------------------------------------------------------------------------
// Stepper
// ---------------------------------------------------------------------------

/// Something the scheduler can drive one step at a time.
pub trait Stepper {
    /// Perform one step and return the events it produced.
    fn step(&mut self) -> SearchResult<&[SearchEvent]>;

    /// Current engine state.
    fn state(&self) -> EngineState;

    /// Abort the running search.
    fn cancel(&mut self) -> SearchResult<()>;
}

impl Stepper for Session {
    fn step(&mut self) -> SearchResult<&[SearchEvent]> {
        Session::step(self)
    }

    fn state(&self) -> EngineState {
        Session::state(self)
    }

    fn cancel(&mut self) -> SearchResult<()> {
        Session::cancel(self)
    }
}

// ---------------------------------------------------------------------------
// CancelToken
// ---------------------------------------------------------------------------

/// A cooperative-cancellation flag backed by an [`AtomicBool`].
///
/// Clones share the same flag, so a token handed to a UI callback (or to
/// another thread) can stop a run in progress.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    done: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }

    #[inline]
    fn clear(&self) {
        self.done.store(false, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// StepScheduler
// ---------------------------------------------------------------------------

/// How a scheduled run ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Finished(Outcome),
    Cancelled,
}

/// Drives a [`Stepper`] at a fixed pace until it leaves `Running` or is
/// cancelled.
#[derive(Debug)]
pub struct StepScheduler {
    interval: Duration,
    token: CancelToken,
    ticks: usize,
}

impl Default for StepScheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(10))
    }
}

impl StepScheduler {
    /// Create a scheduler that waits `interval` between ticks. A zero
    /// interval never sleeps.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            token: CancelToken::new(),
            ticks: 0,
        }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Ticks spent by the last [`run`](Self::run) or
    /// [`play_path`](Self::play_path).
    #[inline]
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// A handle that cancels the current run, or the next one if none is in
    /// progress.
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Request cancellation. Takes effect at the next tick boundary.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Step `stepper` until it finishes or the run is cancelled.
    ///
    /// `on_tick` sees the events of every step (an empty slice for a
    /// discarded entry). `on_done` sees the terminal summary once. On
    /// cancellation the stepper is cancelled too and `on_done` is not called.
    pub fn run<S, T, D>(
        &mut self,
        stepper: &mut S,
        mut on_tick: T,
        mut on_done: D,
    ) -> SearchResult<RunOutcome>
    where
        S: Stepper + ?Sized,
        T: FnMut(&[SearchEvent]),
        D: FnMut(&SearchSummary),
    {
        if !stepper.state().is_running() {
            return Err(SearchError::NotRunning);
        }
        self.ticks = 0;
        let out = self.drive(stepper, &mut on_tick, &mut on_done);
        self.token.clear();
        out
    }

    fn drive<S, T, D>(
        &mut self,
        stepper: &mut S,
        on_tick: &mut T,
        on_done: &mut D,
    ) -> SearchResult<RunOutcome>
    where
        S: Stepper + ?Sized,
        T: FnMut(&[SearchEvent]),
        D: FnMut(&SearchSummary),
    {
        loop {
            if self.token.is_cancelled() {
                stepper.cancel()?;
                log::info!("run cancelled after {} ticks", self.ticks);
                return Ok(RunOutcome::Cancelled);
            }

            let events = stepper.step()?;
            self.ticks += 1;
            on_tick(events);
            if let Some(SearchEvent::Done(summary)) = events.last() {
                on_done(summary);
                return Ok(RunOutcome::Finished(summary.outcome));
            }
            if let Some(outcome) = stepper.state().outcome() {
                return Ok(RunOutcome::Finished(outcome));
            }

            self.pace();
        }
    }

    /// Hand the path cells to `on_cell` one per tick.
    ///
    /// Returns `false` if cancelled before the last cell.
    pub fn play_path<F>(&mut self, path: &[PathNode], mut on_cell: F) -> bool
    where
        F: FnMut(usize, &PathNode),
    {
        self.ticks = 0;
        let finished = self.feed(path, &mut on_cell);
        self.token.clear();
        finished
    }

    fn feed<F>(&mut self, path: &[PathNode], on_cell: &mut F) -> bool
    where
        F: FnMut(usize, &PathNode),
    {
        for (i, node) in path.iter().enumerate() {
            if self.token.is_cancelled() {
                log::info!("path playback cancelled at cell {i}");
                return false;
            }
            on_cell(i, node);
            self.ticks += 1;
            if i + 1 < path.len() {
                self.pace();
            }
        }
        log::info!("path playback complete");
        true
    }

    fn pace(&self) {
        if !self.interval.is_zero() {
            thread::sleep(self.interval);
        }
    }
}
