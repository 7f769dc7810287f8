//! The [`GridModel`]: a fixed `N × N` arena of [`Cell`]s.
//!
//! Cells live in one flat row-major `Vec`. Predecessor links are stored as
//! indices into that `Vec`, so a grid is a plain value: cloning it yields an
//! independent snapshot.
//!
//! While a search runs it holds the grid's [`SearchLock`]. Every edit fails
//! with [`GridError::Locked`] until the lock is released, and only the lock
//! holder can write distances, predecessors and visited marks.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::cell::{Cell, UNREACHABLE};
use crate::error::{GridError, GridResult};
use crate::geom::{Pos, Range};

// ---------------------------------------------------------------------------
// GridConfig
// ---------------------------------------------------------------------------

/// Initial grid dimensions and role placement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    pub size: i32,
    pub start: Pos,
    pub end: Pos,
}

impl GridConfig {
    pub const DEFAULT_SIZE: i32 = 25;
    pub const DEFAULT_START: Pos = Pos::new(5, 5);
    pub const DEFAULT_END: Pos = Pos::new(15, 15);
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
            start: Self::DEFAULT_START,
            end: Self::DEFAULT_END,
        }
    }
}

// ---------------------------------------------------------------------------
// SearchLock
// ---------------------------------------------------------------------------

static NEXT_LOCK: AtomicU64 = AtomicU64::new(1);

/// Exclusive write access to a grid's search-derived fields.
///
/// Obtained from [`GridModel::lock_search`] and handed back through
/// [`GridModel::unlock_search`]. Lock ids are unique per process, so a lock
/// is never accepted by any grid other than the one that issued it.
#[derive(Debug, PartialEq, Eq)]
pub struct SearchLock(u64);

// ---------------------------------------------------------------------------
// GridModel
// ---------------------------------------------------------------------------

/// Cell state and topology for one search grid.
///
/// Exactly one cell carries the start role and exactly one the end role; a
/// role holder is never a wall. Every edit preserves both rules or fails
/// with a [`GridError`] and leaves the grid untouched.
///
/// With the `serde` feature a grid serializes as its size, roles and wall
/// list. Deserializing rebuilds it through [`GridModel::create`], so a
/// malformed snapshot is rejected instead of producing a broken grid.
#[derive(Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GridSnapshot", into = "GridSnapshot")
)]
pub struct GridModel {
    cells: Vec<Cell>,
    range: Range,
    start: usize,
    end: usize,
    lock: Option<u64>,
}

/// A clone is an unlocked copy. A running search keeps writing to the grid
/// it locked.
impl Clone for GridModel {
    fn clone(&self) -> Self {
        Self {
            cells: self.cells.clone(),
            range: self.range,
            start: self.start,
            end: self.end,
            lock: None,
        }
    }
}

/// Grids compare by content; the lock is not part of it.
impl PartialEq for GridModel {
    fn eq(&self, other: &Self) -> bool {
        self.range == other.range
            && self.start == other.start
            && self.end == other.end
            && self.cells == other.cells
    }
}

impl Eq for GridModel {}

impl GridModel {
    /// Create a wall-free `size × size` grid with the given roles.
    pub fn create(size: i32, start: Pos, end: Pos) -> GridResult<Self> {
        if size <= 0 {
            return Err(GridError::InvalidSize(size));
        }
        let range = Range::square(size);
        for p in [start, end] {
            if !range.contains(p) {
                return Err(GridError::OutOfBounds(p));
            }
        }
        if start == end {
            return Err(GridError::StartIsEnd(start));
        }

        let mut grid = Self {
            cells: vec![Cell::default(); range.len()],
            range,
            start: 0,
            end: 0,
            lock: None,
        };
        grid.start = grid.flat(start);
        grid.end = grid.flat(end);
        grid.cells[grid.start].start = true;
        grid.cells[grid.end].end = true;
        Ok(grid)
    }

    /// Create a grid from a [`GridConfig`].
    pub fn from_config(config: &GridConfig) -> GridResult<Self> {
        Self::create(config.size, config.start, config.end)
    }

    /// Side length `N`.
    #[inline]
    pub fn size(&self) -> i32 {
        self.range.height()
    }

    /// The bounding range `[0, N) × [0, N)`.
    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    /// Number of cells (`N²`).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a position to a flat index. Returns `None` if out of range.
    #[inline]
    pub fn idx(&self, p: Pos) -> Option<usize> {
        self.range.contains(p).then(|| self.flat(p))
    }

    /// Convert a flat index back to a position.
    #[inline]
    pub fn pos(&self, idx: usize) -> Pos {
        let n = self.size() as usize;
        Pos::new((idx / n) as i32, (idx % n) as i32)
    }

    #[inline]
    fn flat(&self, p: Pos) -> usize {
        p.row as usize * self.size() as usize + p.col as usize
    }

    fn checked_idx(&self, p: Pos) -> GridResult<usize> {
        self.idx(p).ok_or(GridError::OutOfBounds(p))
    }

    fn check_index(&self, idx: usize) -> GridResult<()> {
        if idx < self.cells.len() {
            Ok(())
        } else {
            Err(GridError::BadIndex(idx))
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The cell at `p`, if in range.
    #[inline]
    pub fn cell(&self, p: Pos) -> Option<&Cell> {
        self.idx(p).map(|i| &self.cells[i])
    }

    /// The cell at flat index `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn cell_at(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn start(&self) -> Pos {
        self.pos(self.start)
    }

    #[inline]
    pub fn end(&self) -> Pos {
        self.pos(self.end)
    }

    #[inline]
    pub fn start_idx(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn end_idx(&self) -> usize {
        self.end
    }

    /// Number of wall cells.
    pub fn walls(&self) -> usize {
        self.cells.iter().filter(|c| c.wall).count()
    }

    /// Append the in-bounds, non-wall axis neighbours of `idx` into `buf`,
    /// in the order up, down, left, right. The caller clears `buf`.
    pub fn neighbors(&self, idx: usize, buf: &mut Vec<usize>) {
        for np in self.pos(idx).neighbors_4() {
            if let Some(ni) = self.idx(np) {
                if !self.cells[ni].wall {
                    buf.push(ni);
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Search lock
    // -----------------------------------------------------------------------

    /// Whether a search currently holds the grid.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.lock.is_some()
    }

    /// Whether `lock` is the one this grid issued and still honours.
    #[inline]
    pub fn holds(&self, lock: &SearchLock) -> bool {
        self.lock == Some(lock.0)
    }

    /// Claim the grid for a search.
    ///
    /// Clears all search-derived state. Fails with [`GridError::Locked`] if
    /// another search already holds the grid.
    pub fn lock_search(&mut self) -> GridResult<SearchLock> {
        self.ensure_unlocked()?;
        self.clear_search();
        let id = NEXT_LOCK.fetch_add(1, Ordering::Relaxed);
        self.lock = Some(id);
        Ok(SearchLock(id))
    }

    /// Release a lock obtained from [`lock_search`](Self::lock_search).
    /// Search results stay in place.
    pub fn unlock_search(&mut self, lock: SearchLock) -> GridResult<()> {
        if !self.holds(&lock) {
            return Err(GridError::LockMismatch);
        }
        self.lock = None;
        Ok(())
    }

    /// Drop the lock without its holder and clear the abandoned search
    /// state. The former holder's writes fail from then on.
    pub fn break_lock(&mut self) {
        if self.lock.take().is_some() {
            self.clear_search();
        }
    }

    fn ensure_unlocked(&self) -> GridResult<()> {
        if self.lock.is_some() {
            return Err(GridError::Locked);
        }
        Ok(())
    }

    fn check_lock(&self, lock: &SearchLock) -> GridResult<()> {
        if !self.holds(lock) {
            return Err(GridError::LockMismatch);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Edits
    // -----------------------------------------------------------------------

    /// Flip the wall flag at `p`. Returns the new flag.
    ///
    /// Start and end cells cannot become walls.
    pub fn toggle_wall(&mut self, p: Pos) -> GridResult<bool> {
        self.ensure_unlocked()?;
        let i = self.checked_idx(p)?;
        let wall = !self.cells[i].wall;
        self.set_wall_at(i, p, wall)?;
        Ok(wall)
    }

    /// Set the wall flag at `p` to `wall`, as used when painting by drag.
    pub fn set_wall(&mut self, p: Pos, wall: bool) -> GridResult<()> {
        self.ensure_unlocked()?;
        let i = self.checked_idx(p)?;
        self.set_wall_at(i, p, wall)
    }

    fn set_wall_at(&mut self, i: usize, p: Pos, wall: bool) -> GridResult<()> {
        let c = &mut self.cells[i];
        if c.start || c.end {
            return Err(GridError::ProtectedCell(p));
        }
        c.wall = wall;
        Ok(())
    }

    /// Move the start role to `p`, clearing any wall there.
    pub fn set_start(&mut self, p: Pos) -> GridResult<()> {
        self.ensure_unlocked()?;
        let i = self.checked_idx(p)?;
        if i == self.end {
            return Err(GridError::RoleConflict(p));
        }
        self.cells[self.start].start = false;
        let c = &mut self.cells[i];
        c.start = true;
        c.wall = false;
        self.start = i;
        Ok(())
    }

    /// Move the end role to `p`, clearing any wall there.
    pub fn set_end(&mut self, p: Pos) -> GridResult<()> {
        self.ensure_unlocked()?;
        let i = self.checked_idx(p)?;
        if i == self.start {
            return Err(GridError::RoleConflict(p));
        }
        self.cells[self.end].end = false;
        let c = &mut self.cells[i];
        c.end = true;
        c.wall = false;
        self.end = i;
        Ok(())
    }

    /// Clear distance, visited, predecessor and path on every cell.
    /// Walls and roles are left alone.
    pub fn reset_search_state(&mut self) -> GridResult<()> {
        self.ensure_unlocked()?;
        self.clear_search();
        Ok(())
    }

    fn clear_search(&mut self) {
        for c in self.cells.iter_mut() {
            c.reset_search();
        }
    }

    /// Mark the reached cell at `p` as part of the final path. The path mark
    /// replaces the visited mark.
    pub fn mark_path(&mut self, p: Pos) -> GridResult<()> {
        self.ensure_unlocked()?;
        let i = self.checked_idx(p)?;
        let c = &mut self.cells[i];
        if !c.is_reached() {
            return Err(GridError::Unreached(p));
        }
        c.path = true;
        c.visited = false;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Search-derived fields
    // -----------------------------------------------------------------------

    /// Record a distance and predecessor for `idx`.
    ///
    /// `predecessor` must be a non-wall axis neighbour with a smaller
    /// distance, so predecessor chains always end at a cell without one.
    pub fn set_distance(
        &mut self,
        lock: &SearchLock,
        idx: usize,
        distance: i32,
        predecessor: Option<usize>,
    ) -> GridResult<()> {
        self.check_lock(lock)?;
        self.check_index(idx)?;
        if let Some(pi) = predecessor {
            self.check_index(pi)?;
            let pc = &self.cells[pi];
            if pc.wall || pc.distance >= distance || !self.pos(pi).is_adjacent(self.pos(idx)) {
                return Err(GridError::BadPredecessor(self.pos(idx)));
            }
        }
        let c = &mut self.cells[idx];
        c.distance = distance;
        c.predecessor = predecessor;
        Ok(())
    }

    /// Mark `idx` as settled by the search.
    pub fn mark_visited(&mut self, lock: &SearchLock, idx: usize) -> GridResult<()> {
        self.check_lock(lock)?;
        self.check_index(idx)?;
        self.cells[idx].visited = true;
        Ok(())
    }

    /// Distance recorded at the end cell, if it was reached.
    pub fn end_distance(&self) -> Option<i32> {
        let d = self.cells[self.end].distance;
        (d != UNREACHABLE).then_some(d)
    }
}

// ---------------------------------------------------------------------------
// Serialized form
// ---------------------------------------------------------------------------

/// Size, roles and walls. Search state is not persisted.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GridSnapshot {
    size: i32,
    start: Pos,
    end: Pos,
    walls: Vec<Pos>,
}

#[cfg(feature = "serde")]
impl From<GridModel> for GridSnapshot {
    fn from(grid: GridModel) -> Self {
        let walls = grid
            .range
            .iter()
            .zip(&grid.cells)
            .filter(|(_, c)| c.wall)
            .map(|(p, _)| p)
            .collect();
        Self {
            size: grid.size(),
            start: grid.start(),
            end: grid.end(),
            walls,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<GridSnapshot> for GridModel {
    type Error = GridError;

    fn try_from(snap: GridSnapshot) -> GridResult<Self> {
        let mut grid = Self::create(snap.size, snap.start, snap.end)?;
        for p in snap.walls {
            grid.set_wall(p, true)?;
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridModel {
        GridModel::from_config(&GridConfig::default()).unwrap()
    }

    #[test]
    fn create_flags_only_start_and_end() {
        let g = grid();
        assert_eq!(g.size(), 25);
        assert_eq!(g.len(), 625);
        assert_eq!(g.start(), Pos::new(5, 5));
        assert_eq!(g.end(), Pos::new(15, 15));
        assert_eq!(g.cells().iter().filter(|c| c.is_start()).count(), 1);
        assert_eq!(g.cells().iter().filter(|c| c.is_end()).count(), 1);
        assert_eq!(g.walls(), 0);
        assert!(g.cells().iter().all(|c| !c.is_reached()));
        assert!(!g.is_locked());
    }

    #[test]
    fn create_rejects_bad_input() {
        let p = Pos::new(1, 1);
        assert_eq!(GridModel::create(5, p, p), Err(GridError::StartIsEnd(p)));
        assert_eq!(
            GridModel::create(0, Pos::ZERO, p),
            Err(GridError::InvalidSize(0))
        );
        assert_eq!(
            GridModel::create(5, Pos::ZERO, Pos::new(5, 0)),
            Err(GridError::OutOfBounds(Pos::new(5, 0)))
        );
    }

    #[test]
    fn idx_pos_roundtrip() {
        let g = GridModel::create(4, Pos::ZERO, Pos::new(3, 3)).unwrap();
        for p in g.range().iter() {
            let i = g.idx(p).unwrap();
            assert_eq!(g.pos(i), p);
        }
        assert_eq!(g.idx(Pos::new(-1, 0)), None);
        assert_eq!(g.idx(Pos::new(0, 4)), None);
    }

    #[test]
    fn neighbors_order_and_filtering() {
        let mut g = GridModel::create(3, Pos::ZERO, Pos::new(2, 2)).unwrap();
        let mut buf = Vec::new();
        let center = g.idx(Pos::new(1, 1)).unwrap();
        g.neighbors(center, &mut buf);
        let got: Vec<_> = buf.iter().map(|&i| g.pos(i)).collect();
        assert_eq!(
            got,
            vec![Pos::new(0, 1), Pos::new(2, 1), Pos::new(1, 0), Pos::new(1, 2)]
        );

        g.toggle_wall(Pos::new(2, 1)).unwrap();
        buf.clear();
        g.neighbors(center, &mut buf);
        let got: Vec<_> = buf.iter().map(|&i| g.pos(i)).collect();
        assert_eq!(got, vec![Pos::new(0, 1), Pos::new(1, 0), Pos::new(1, 2)]);

        // Corner cells only see in-bounds neighbours.
        buf.clear();
        g.neighbors(g.idx(Pos::ZERO).unwrap(), &mut buf);
        let got: Vec<_> = buf.iter().map(|&i| g.pos(i)).collect();
        assert_eq!(got, vec![Pos::new(1, 0), Pos::new(0, 1)]);
    }

    #[test]
    fn toggle_wall_flips_and_protects_roles() {
        let mut g = grid();
        let p = Pos::new(0, 0);
        assert_eq!(g.toggle_wall(p), Ok(true));
        assert!(g.cell(p).unwrap().is_wall());
        assert_eq!(g.toggle_wall(p), Ok(false));
        assert!(!g.cell(p).unwrap().is_wall());

        let before = g.clone();
        assert_eq!(
            g.toggle_wall(g.start()),
            Err(GridError::ProtectedCell(Pos::new(5, 5)))
        );
        assert_eq!(
            g.toggle_wall(g.end()),
            Err(GridError::ProtectedCell(Pos::new(15, 15)))
        );
        assert_eq!(
            g.toggle_wall(Pos::new(25, 0)),
            Err(GridError::OutOfBounds(Pos::new(25, 0)))
        );
        assert_eq!(g, before);
    }

    #[test]
    fn set_wall_is_idempotent() {
        let mut g = grid();
        let p = Pos::new(3, 4);
        g.set_wall(p, true).unwrap();
        g.set_wall(p, true).unwrap();
        assert_eq!(g.walls(), 1);
        g.set_wall(p, false).unwrap();
        assert_eq!(g.walls(), 0);
    }

    #[test]
    fn set_start_moves_role_and_clears_wall() {
        let mut g = grid();
        let p = Pos::new(1, 2);
        g.toggle_wall(p).unwrap();
        g.set_start(p).unwrap();
        assert_eq!(g.start(), p);
        let c = g.cell(p).unwrap();
        assert!(c.is_start() && !c.is_wall());
        assert!(!g.cell(Pos::new(5, 5)).unwrap().is_start());
        assert_eq!(g.cells().iter().filter(|c| c.is_start()).count(), 1);
    }

    #[test]
    fn set_end_moves_role() {
        let mut g = grid();
        g.set_end(Pos::new(20, 20)).unwrap();
        assert_eq!(g.end(), Pos::new(20, 20));
        assert!(!g.cell(Pos::new(15, 15)).unwrap().is_end());
        assert_eq!(g.cells().iter().filter(|c| c.is_end()).count(), 1);
    }

    #[test]
    fn roles_cannot_coincide() {
        let mut g = grid();
        let before = g.clone();
        assert_eq!(
            g.set_start(Pos::new(15, 15)),
            Err(GridError::RoleConflict(Pos::new(15, 15)))
        );
        assert_eq!(
            g.set_end(Pos::new(5, 5)),
            Err(GridError::RoleConflict(Pos::new(5, 5)))
        );
        assert_eq!(g, before);
    }

    #[test]
    fn set_start_on_itself_is_noop() {
        let mut g = grid();
        let before = g.clone();
        g.set_start(Pos::new(5, 5)).unwrap();
        assert_eq!(g, before);
    }

    #[test]
    fn reset_search_state_is_idempotent() {
        let mut g = grid();
        g.toggle_wall(Pos::new(0, 0)).unwrap();
        let s = g.start_idx();
        let n = g.idx(Pos::new(4, 5)).unwrap();
        let lock = g.lock_search().unwrap();
        g.set_distance(&lock, s, 0, None).unwrap();
        g.set_distance(&lock, n, 1, Some(s)).unwrap();
        g.mark_visited(&lock, s).unwrap();
        g.unlock_search(lock).unwrap();
        g.mark_path(Pos::new(4, 5)).unwrap();

        g.reset_search_state().unwrap();
        let once = g.clone();
        g.reset_search_state().unwrap();
        assert_eq!(g, once);

        assert!(g.cell(Pos::new(0, 0)).unwrap().is_wall());
        assert_eq!(g.start(), Pos::new(5, 5));
        assert!(g.cells().iter().all(|c| {
            !c.is_reached() && !c.is_visited() && c.predecessor().is_none() && !c.is_path()
        }));
    }

    #[test]
    fn mark_path_replaces_visited() {
        let mut g = grid();
        let i = g.start_idx();
        let lock = g.lock_search().unwrap();
        g.set_distance(&lock, i, 0, None).unwrap();
        g.mark_visited(&lock, i).unwrap();
        g.unlock_search(lock).unwrap();
        g.mark_path(g.start()).unwrap();
        let c = g.cell_at(i);
        assert!(c.is_path());
        assert!(!c.is_visited());
    }

    #[test]
    fn mark_path_needs_a_reached_cell() {
        let mut g = grid();
        assert_eq!(
            g.mark_path(Pos::new(1, 1)),
            Err(GridError::Unreached(Pos::new(1, 1)))
        );
        assert_eq!(
            g.mark_path(Pos::new(-1, 0)),
            Err(GridError::OutOfBounds(Pos::new(-1, 0)))
        );
    }

    #[test]
    fn end_distance() {
        let mut g = grid();
        assert_eq!(g.end_distance(), None);
        let e = g.end_idx();
        let lock = g.lock_search().unwrap();
        g.set_distance(&lock, e, 20, None).unwrap();
        assert_eq!(g.end_distance(), Some(20));
    }

    #[test]
    fn edits_fail_while_locked() {
        let mut g = grid();
        let lock = g.lock_search().unwrap();
        let before = g.clone();

        assert_eq!(g.toggle_wall(Pos::new(2, 2)), Err(GridError::Locked));
        assert_eq!(g.set_wall(Pos::new(2, 2), true), Err(GridError::Locked));
        assert_eq!(g.set_start(Pos::new(0, 0)), Err(GridError::Locked));
        assert_eq!(g.set_end(Pos::new(0, 4)), Err(GridError::Locked));
        assert_eq!(g.reset_search_state(), Err(GridError::Locked));
        assert_eq!(g.mark_path(g.start()), Err(GridError::Locked));
        assert_eq!(g.lock_search(), Err(GridError::Locked));
        assert_eq!(g, before);

        g.unlock_search(lock).unwrap();
        assert!(!g.is_locked());
        g.set_end(Pos::new(0, 4)).unwrap();
    }

    #[test]
    fn lock_belongs_to_its_grid() {
        let mut a = grid();
        let mut b = grid();
        let la = a.lock_search().unwrap();
        let lb = b.lock_search().unwrap();
        assert!(a.holds(&la));
        assert!(!a.holds(&lb));
        assert_eq!(
            a.set_distance(&lb, a.start_idx(), 0, None),
            Err(GridError::LockMismatch)
        );
        assert_eq!(a.mark_visited(&lb, 0), Err(GridError::LockMismatch));
        assert_eq!(a.unlock_search(lb), Err(GridError::LockMismatch));
        assert!(a.is_locked());

        // A clone copies the content but not the lock.
        let copy = a.clone();
        assert!(!copy.holds(&la));
        assert_eq!(copy, a);
    }

    #[test]
    fn search_writes_are_validated() {
        let mut g = GridModel::create(3, Pos::ZERO, Pos::new(2, 2)).unwrap();
        g.toggle_wall(Pos::new(1, 1)).unwrap();
        let lock = g.lock_search().unwrap();
        let s = g.start_idx();
        g.set_distance(&lock, s, 0, None).unwrap();

        assert_eq!(
            g.set_distance(&lock, 9, 1, None),
            Err(GridError::BadIndex(9))
        );
        assert_eq!(g.mark_visited(&lock, 42), Err(GridError::BadIndex(42)));
        // Not adjacent.
        assert_eq!(
            g.set_distance(&lock, 8, 1, Some(s)),
            Err(GridError::BadPredecessor(Pos::new(2, 2)))
        );
        // Not closer.
        assert_eq!(
            g.set_distance(&lock, 1, 0, Some(s)),
            Err(GridError::BadPredecessor(Pos::new(0, 1)))
        );
        // Wall predecessor.
        let wall = g.idx(Pos::new(1, 1)).unwrap();
        assert_eq!(
            g.set_distance(&lock, 5, 9, Some(wall)),
            Err(GridError::BadPredecessor(Pos::new(1, 2)))
        );
        g.set_distance(&lock, 1, 1, Some(s)).unwrap();
        assert_eq!(g.cell_at(1).predecessor(), Some(s));
    }

    #[test]
    fn break_lock_abandons_the_search() {
        let mut g = grid();
        let lock = g.lock_search().unwrap();
        g.set_distance(&lock, g.start_idx(), 0, None).unwrap();
        g.break_lock();

        assert!(!g.is_locked());
        assert!(!g.holds(&lock));
        assert!(g.cells().iter().all(|c| !c.is_reached()));
        assert_eq!(
            g.mark_visited(&lock, g.start_idx()),
            Err(GridError::LockMismatch)
        );
        g.toggle_wall(Pos::new(0, 0)).unwrap();
    }

    #[test]
    fn lock_search_clears_previous_results() {
        let mut g = grid();
        let lock = g.lock_search().unwrap();
        g.set_distance(&lock, g.end_idx(), 3, None).unwrap();
        g.unlock_search(lock).unwrap();
        assert_eq!(g.end_distance(), Some(3));

        let _lock = g.lock_search().unwrap();
        assert_eq!(g.end_distance(), None);
    }
}
