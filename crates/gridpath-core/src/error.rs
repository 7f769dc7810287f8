//! Grid error type.

use thiserror::Error;

use crate::Pos;

/// Errors produced by [`GridModel`](crate::GridModel) construction and edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("position {0} is outside the grid")]
    OutOfBounds(Pos),

    #[error("grid size must be positive, got {0}")]
    InvalidSize(i32),

    #[error("start and end cannot share cell {0}")]
    StartIsEnd(Pos),

    #[error("cell {0} holds the start or end and cannot become a wall")]
    ProtectedCell(Pos),

    #[error("cell {0} already holds the other role")]
    RoleConflict(Pos),

    #[error("grid is locked by a running search")]
    Locked,

    #[error("search lock does not belong to this grid")]
    LockMismatch,

    #[error("cell index {0} is outside the grid")]
    BadIndex(usize),

    #[error("cell {0} needs an adjacent, closer, non-wall predecessor")]
    BadPredecessor(Pos),

    #[error("cell {0} was not reached by the search")]
    Unreached(Pos),
}

/// Shorthand result type for grid operations.
pub type GridResult<T> = Result<T, GridError>;
