//! Path queries and output.

use navgrid_core::NavCell;

use crate::NavGrid;
use crate::worker::{NavWorkerState, WorkerId};

impl NavWorkerState {
    /// Number of cells in the found path, both endpoints included.
    fn output_count(&self, from: NavCell, to: NavCell) -> usize {
        let mut count = 1;
        let mut itr = to;
        while itr != from {
            itr = self.came_from[self.index(itr)];
            count += 1;
        }
        count
    }

    /// Write the found path into `out`, starting at `from`.
    ///
    /// The chain is walked backwards from `to` and each cell is stored at its
    /// reversed offset; cells past the end of `out` are dropped.
    fn output(&mut self, from: NavCell, to: NavCell, out: &mut [NavCell]) -> usize {
        let count = self.output_count(from, to);

        let mut itr = to;
        let mut slot = count - 1;
        loop {
            self.stats.path_output_cells += 1;
            if let Some(dst) = out.get_mut(slot) {
                *dst = itr;
            }
            if itr == from {
                break;
            }
            itr = self.came_from[self.index(itr)];
            slot -= 1;
        }
        count.min(out.len())
    }
}

impl NavGrid {
    /// Find a 4-connected path of unblocked cells from `from` to `to`.
    ///
    /// The path, `from` and `to` included, is written to `out`. Returns the
    /// number of cells written: 0 if there is no path, otherwise the path
    /// length capped at `out.len()` (a longer path is truncated to its first
    /// `out.len()` cells).
    ///
    /// Paths are not guaranteed to be the shortest possible.
    pub fn path(&self, worker: WorkerId, from: NavCell, to: NavCell, out: &mut [NavCell]) -> usize {
        debug_assert!(self.in_bounds(from), "cell {from} outside the grid");
        debug_assert!(self.in_bounds(to), "cell {to} outside the grid");

        if self.blocked(from) || self.blocked(to) {
            return 0;
        }
        if self.island(from) != self.island(to) {
            return 0;
        }

        let mut s = self.worker_state(worker);
        if self.search(&mut s, from, to) {
            s.output(from, to, out)
        } else {
            0
        }
    }
}
