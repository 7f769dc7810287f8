//! Search and session error types.

use thiserror::Error;

use gridpath_core::{GridError, Pos};

/// Errors produced by [`PathfindingEngine`](crate::PathfindingEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("a search is already running")]
    AlreadyRunning,

    #[error("no search is running")]
    NotRunning,

    #[error("start and end share cell {0}")]
    StartIsEnd(Pos),

    /// The grid passed to a step does not hold this search's lock.
    #[error("the grid is not locked by this search")]
    LockLost,

    #[error(transparent)]
    Grid(#[from] GridError),
}

pub type SearchResult<T> = Result<T, SearchError>;

/// Errors produced by [`Session`](crate::Session).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A grid mutation was attempted while a search is running.
    #[error("grid edits are rejected while a search is running")]
    RejectedEdit,

    #[error("search start rejected: {0}")]
    RejectedStart(#[source] SearchError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Grid(#[from] GridError),
}

pub type SessionResult<T> = Result<T, SessionError>;
