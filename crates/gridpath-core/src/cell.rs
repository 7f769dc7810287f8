//! The [`Cell`] type: one square of the search grid.

/// Sentinel distance meaning "not reached yet" (infinity).
pub const UNREACHABLE: i32 = i32::MAX;

/// A single grid cell.
///
/// The role flags (`wall`, `start`, `end`) are edited through
/// [`GridModel`](crate::GridModel) so that its invariants hold. The remaining
/// fields are search-derived and are rewritten on every run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub(crate) wall: bool,
    pub(crate) start: bool,
    pub(crate) end: bool,
    pub(crate) distance: i32,
    pub(crate) visited: bool,
    /// Flat index of the predecessor cell in the owning grid.
    pub(crate) predecessor: Option<usize>,
    pub(crate) path: bool,
}

impl Default for Cell {
    #[inline]
    fn default() -> Self {
        Self {
            wall: false,
            start: false,
            end: false,
            distance: UNREACHABLE,
            visited: false,
            predecessor: None,
            path: false,
        }
    }
}

impl Cell {
    #[inline]
    pub fn is_wall(&self) -> bool {
        self.wall
    }

    #[inline]
    pub fn is_start(&self) -> bool {
        self.start
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.end
    }

    /// Best known distance from the start, or [`UNREACHABLE`].
    #[inline]
    pub fn distance(&self) -> i32 {
        self.distance
    }

    /// Whether a finite distance has been recorded.
    #[inline]
    pub fn is_reached(&self) -> bool {
        self.distance != UNREACHABLE
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Flat index of the predecessor, if any.
    #[inline]
    pub fn predecessor(&self) -> Option<usize> {
        self.predecessor
    }

    #[inline]
    pub fn is_path(&self) -> bool {
        self.path
    }

    /// Clear every search-derived field, keeping the role flags.
    #[inline]
    pub(crate) fn reset_search(&mut self) {
        self.distance = UNREACHABLE;
        self.visited = false;
        self.predecessor = None;
        self.path = false;
    }
}
