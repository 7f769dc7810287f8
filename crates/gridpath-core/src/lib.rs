//! **gridpath-core**: the mutable grid behind the step-wise shortest-path
//! demonstrator.
//!
//! This crate owns cell state and topology: geometry primitives, the
//! [`Cell`] record, and the [`GridModel`] arena with its edit operations
//! (wall toggling, start/end relocation, search-state reset). The search
//! itself lives in `gridpath-search`; it writes results only while holding
//! the grid's [`SearchLock`], and the grid refuses edits for that long.

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;

pub use cell::{Cell, UNREACHABLE};
pub use error::{GridError, GridResult};
pub use geom::{Pos, Range};
pub use grid::{GridConfig, GridModel, SearchLock};
