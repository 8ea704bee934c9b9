//! Marking the ancestry of a cell as the current path.

use crate::grid::Grid;

/// Clear every `in_path` mark, then mark `from` and each of its ancestors.
///
/// Returns the number of cells marked (path edges + 1). Costs O(grid size).
pub fn trace(grid: &mut Grid, from: usize) -> usize {
    grid.clear_path();
    mark_chain(grid, from, |_| {})
}

/// Walk parent links from `from`, marking each cell, and report every index
/// to `visit`.
fn mark_chain(grid: &mut Grid, from: usize, mut visit: impl FnMut(usize)) -> usize {
    let mut marked = 0;
    let mut cur = Some(from);
    while let Some(i) = cur {
        let cell = grid.cell_at_mut(i);
        cell.in_path = true;
        visit(i);
        marked += 1;
        cur = cell.parent;
        debug_assert!(marked <= grid.len(), "parent chain has a cycle");
    }
    marked
}

/// Incremental path marker.
///
/// Remembers the chain it marked last and unmarks only that chain before
/// marking the new one, so each call costs O(chain length) instead of a
/// full grid sweep. The marks it leaves are the same as [`trace`]'s as long
/// as nothing else touches `in_path` in between.
#[derive(Debug, Clone, Default)]
pub struct PathTracer {
    chain: Vec<usize>,
}

impl PathTracer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the ancestry of `from`. Returns the number of cells marked.
    pub fn trace(&mut self, grid: &mut Grid, from: usize) -> usize {
        self.clear(grid);
        let chain = &mut self.chain;
        mark_chain(grid, from, |i| chain.push(i))
    }

    /// Unmark the last traced chain.
    pub fn clear(&mut self, grid: &mut Grid) {
        for i in self.chain.drain(..) {
            if i < grid.len() {
                grid.cell_at_mut(i).in_path = false;
            }
        }
    }

    /// Forget the last chain without touching any grid, for use after the
    /// grid it referred to has been replaced.
    pub fn forget(&mut self) {
        self.chain.clear();
    }
}
