//! Incremental shortest-path search over a [`GridModel`](gridpath_core::GridModel).
//!
//! - [`MinHeap`]: binary min-heap with deterministic tie order
//! - [`PathfindingEngine`]: Dijkstra with unit edge cost, one extraction per
//!   [`step`](PathfindingEngine::step), behind an explicit [`EngineState`]
//! - [`reconstruct`]: predecessor walk from the end cell
//! - [`StepScheduler`]: external pacing and cooperative cancellation
//! - [`Session`]: grid + engine + stats, rejecting edits while running
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use gridpath_search::{Outcome, RunOutcome, Session, SessionConfig, StepScheduler};
//!
//! let mut session = Session::new(SessionConfig::default()).unwrap();
//! session.start().unwrap();
//!
//! let mut scheduler = StepScheduler::new(Duration::ZERO);
//! let mut path_len = 0;
//! let out = scheduler
//!     .run(&mut session, |_events| {}, |done| {
//!         path_len = done.path.as_ref().map_or(0, Vec::len);
//!     })
//!     .unwrap();
//!
//! assert_eq!(out, RunOutcome::Finished(Outcome::Succeeded));
//! assert_eq!(path_len, 21);
//! ```

mod engine;
mod error;
mod events;
mod heap;
mod reconstruct;
mod scheduler;
mod session;

pub use engine::{EngineState, FailureKind, PathfindingEngine};
pub use error::{SearchError, SearchResult, SessionError, SessionResult};
pub use events::{DisplayDistance, Outcome, PathNode, SearchEvent, SearchSummary};
pub use heap::MinHeap;
pub use reconstruct::reconstruct;
pub use scheduler::{CancelToken, RunOutcome, StepScheduler, Stepper};
pub use session::{EditMode, SearchStats, Session, SessionConfig};
