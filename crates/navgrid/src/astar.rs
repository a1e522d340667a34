//! A* search over unblocked cells.
//!
//! The open set is a dense array kept sorted on descending fScore, so the
//! best candidate is always at the tail and popping is O(1). Insertion
//! binary-searches the slot and shifts the tail up by one.

use navgrid_core::NavCell;

use crate::NavGrid;
use crate::distance::manhattan;
use crate::worker::NavWorkerState;

/// Estimated cost between two cells.
///
/// Manhattan distance with a greedy multiplier of 2 over the unit step cost:
/// fewer cells are visited at the price of paths that are not always the
/// shortest.
#[inline]
pub(crate) fn heuristic(from: NavCell, to: NavCell) -> u32 {
    const COST_PER_CELL: u32 = 1;
    const MULTIPLIER: u32 = 2;
    manhattan(from, to) * COST_PER_CELL * MULTIPLIER
}

impl NavWorkerState {
    /// Insert `cell` into the open set, ordered on fScore (highest first).
    ///
    /// Equal scores go after the existing ones so the newest pops first.
    /// `cell` must not be in the open set yet.
    pub(crate) fn enqueue(&mut self, cell: NavCell) {
        self.stats.path_itr_enqueues += 1;

        let f = self.f_scores[self.index(cell)];
        let count = self.queue_count;
        let pos = self.queue[..count].partition_point(|&c| f <= self.f_scores[self.index(c)]);
        self.queue.copy_within(pos..count, pos + 1);
        self.queue[pos] = cell;
        self.queue_count += 1;
    }

    #[inline]
    fn pop(&mut self) -> Option<NavCell> {
        self.queue_count = self.queue_count.checked_sub(1)?;
        Some(self.queue[self.queue_count])
    }
}

impl NavGrid {
    /// Run A* from `from` to `to` in the worker's scratch state.
    ///
    /// Returns `true` once `to` is popped from the open set; `came_from` then
    /// holds the chain back to `from`. Both cells must be unblocked.
    pub(crate) fn search(&self, s: &mut NavWorkerState, from: NavCell, to: NavCell) -> bool {
        s.marked.clear_all();
        s.g_scores.fill(u32::MAX);
        s.f_scores.fill(u32::MAX);

        s.stats.path_count += 1;
        s.stats.path_itr_enqueues += 1;

        let from_idx = self.cell_index(from);
        s.g_scores[from_idx] = 0;
        s.f_scores[from_idx] = heuristic(from, to);
        s.queue[0] = from;
        s.queue_count = 1;
        s.marked.set(from_idx);

        while let Some(cell) = s.pop() {
            s.stats.path_itr_cells += 1;
            if cell == to {
                return true;
            }
            let idx = self.cell_index(cell);
            s.marked.clear(idx);

            let tentative_g = s.g_scores[idx] + 1;
            for n in self.neighbors(cell) {
                let ni = self.cell_index(n);
                if self.cells[ni] > 0 {
                    continue;
                }
                if tentative_g >= s.g_scores[ni] {
                    continue;
                }
                // Better route to `n`. If it is already open it keeps its
                // current queue position.
                s.came_from[ni] = cell;
                s.g_scores[ni] = tentative_g;
                s.f_scores[ni] = tentative_g.saturating_add(heuristic(n, to));
                if !s.marked.test(ni) {
                    s.enqueue(n);
                    s.marked.set(ni);
                }
            }
        }
        false
    }
}
