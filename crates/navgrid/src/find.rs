//! Breadth-first neighbourhood queries.

use navgrid_core::NavCell;

use crate::NavGrid;
use crate::islands::NAV_ISLAND_BLOCKED;
use crate::worker::{NavWorkerState, WorkerId};

impl NavGrid {
    /// Breadth-first search from `from` for cells matching `pred`.
    ///
    /// The search crosses blocked and unblocked cells alike. Matches are
    /// written to `out` in search order until it is full; returns how many
    /// were written.
    fn find(
        &self,
        s: &mut NavWorkerState,
        from: NavCell,
        out: &mut [NavCell],
        pred: impl Fn(NavCell) -> bool,
    ) -> usize {
        assert!(!out.is_empty(), "find output must not be empty");

        s.stats.find_count += 1;
        s.stats.find_itr_enqueues += 1;

        s.marked.clear_all();
        s.marked.set(self.cell_index(from));
        s.queue[0] = from;
        let mut start = 0;
        let mut end = 1;

        let mut count = 0;
        // Every cell is queued at most once, the queue never overflows.
        while start != end {
            s.stats.find_itr_cells += 1;

            let cell = s.queue[start];
            start += 1;
            if pred(cell) {
                out[count] = cell;
                count += 1;
                if count == out.len() {
                    return count;
                }
            }

            for n in self.neighbors(cell) {
                let ni = self.cell_index(n);
                if s.marked.test(ni) {
                    continue;
                }
                s.stats.find_itr_enqueues += 1;
                s.marked.set(ni);
                s.queue[end] = n;
                end += 1;
            }
        }
        count
    }

    /// The unblocked cell closest to `cell` (in breadth-first order).
    ///
    /// Returns `cell` itself if it is unblocked, or if no cell is.
    pub fn closest_unblocked(&self, worker: WorkerId, cell: NavCell) -> NavCell {
        debug_assert!(self.in_bounds(cell), "cell {cell} outside the grid");
        let mut res = [cell];
        let mut s = self.worker_state(worker);
        if self.find(&mut s, cell, &mut res, |c| !self.blocked(c)) > 0 {
            res[0]
        } else {
            cell
        }
    }

    /// Up to `out.len()` unblocked cells around `cell`, closest first.
    ///
    /// # Panics
    ///
    /// Panics if `out` is empty.
    pub fn closest_unblocked_n(
        &self,
        worker: WorkerId,
        cell: NavCell,
        out: &mut [NavCell],
    ) -> usize {
        debug_assert!(self.in_bounds(cell), "cell {cell} outside the grid");
        let mut s = self.worker_state(worker);
        self.find(&mut s, cell, out, |c| !self.blocked(c))
    }

    /// The cell closest to `to` that can be reached from `from`.
    ///
    /// Returns `from` when `from` is blocked or nothing matches.
    pub fn closest_reachable(&self, worker: WorkerId, from: NavCell, to: NavCell) -> NavCell {
        debug_assert!(self.in_bounds(from), "cell {from} outside the grid");
        debug_assert!(self.in_bounds(to), "cell {to} outside the grid");
        let island = self.island(from);
        if island == NAV_ISLAND_BLOCKED {
            return from;
        }
        let mut res = [from];
        let mut s = self.worker_state(worker);
        if self.find(&mut s, to, &mut res, |c| self.island(c) == island) > 0 {
            res[0]
        } else {
            from
        }
    }
}
