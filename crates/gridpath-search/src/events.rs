//! Observable events emitted while stepping a search.

use std::fmt;

use gridpath_core::{Pos, UNREACHABLE};

/// One cell of a reconstructed path with its distance from the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Pos,
    pub distance: i32,
}

/// How a finished search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The end cell was settled.
    Succeeded,
    /// The frontier ran dry before reaching the end cell.
    NoPathFound,
    /// An unreached cell came off a non-empty frontier. Indicates a bug in
    /// the heap or relaxation logic.
    Trapped,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Succeeded => "succeeded",
            Self::NoPathFound => "no path found",
            Self::Trapped => "trapped",
        })
    }
}

/// Terminal report carried by [`SearchEvent::Done`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchSummary {
    pub outcome: Outcome,
    pub visited_count: usize,
    /// Start-to-end path, present only on success.
    pub path: Option<Vec<PathNode>>,
}

impl SearchSummary {
    /// Number of edges on the path, if one was found.
    pub fn path_length(&self) -> Option<usize> {
        self.path.as_ref().map(|p| p.len().saturating_sub(1))
    }
}

/// An event produced by one engine step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchEvent {
    /// A cell was settled.
    Visited {
        row: i32,
        col: i32,
        distance: i32,
        visited_count: usize,
    },
    /// A neighbour got a shorter tentative distance.
    /// `old_distance` is [`UNREACHABLE`] on first discovery.
    Relaxed {
        row: i32,
        col: i32,
        old_distance: i32,
        new_distance: i32,
    },
    /// The search reached a terminal state.
    Done(SearchSummary),
}

impl SearchEvent {
    /// The cell an event refers to, if any.
    pub fn pos(&self) -> Option<Pos> {
        match *self {
            Self::Visited { row, col, .. } | Self::Relaxed { row, col, .. } => {
                Some(Pos::new(row, col))
            }
            Self::Done(_) => None,
        }
    }
}

/// Formats a distance, printing [`UNREACHABLE`] as `inf`.
pub struct DisplayDistance(pub i32);

impl fmt::Display for DisplayDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == UNREACHABLE {
            f.write_str("inf")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
