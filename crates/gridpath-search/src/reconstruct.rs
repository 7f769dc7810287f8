use gridpath_core::GridModel;

use crate::events::PathNode;

/// Walk predecessor links back from `end` and return the path in
/// start-to-end order.
///
/// The walk stops at the first cell without a predecessor, which after a
/// successful run is the start cell. Returns an empty path when `end` is
/// outside the grid, or has no predecessor and is not itself the start.
pub fn reconstruct(grid: &GridModel, end: usize) -> Vec<PathNode> {
    let Some(last) = grid.cells().get(end) else {
        return Vec::new();
    };
    if last.predecessor().is_none() && end != grid.start_idx() {
        return Vec::new();
    }

    let mut path = Vec::new();
    let mut ci = Some(end);
    while let Some(i) = ci {
        let c = grid.cell_at(i);
        path.push(PathNode {
            pos: grid.pos(i),
            distance: c.distance(),
        });
        ci = c.predecessor();
    }
    path.reverse();
    path
}
