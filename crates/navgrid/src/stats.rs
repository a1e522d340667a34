//! Diagnostic counters.

use std::mem::size_of;
use std::sync::{Mutex, OnceLock};

use navgrid_core::NavCell;

use crate::NavGrid;
use crate::worker::NavWorkerState;

/// Aggregated statistics of a [`NavGrid`], see [`NavGrid::stats`].
///
/// Query counters are cumulative since creation or the last
/// [`NavGrid::stats_reset`]. Cell counts, island count and data sizes are a
/// snapshot taken by the `stats` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavStats {
    pub cell_count_total: u64,
    pub cell_count_axis: u64,
    pub blocker_add_count: u64,
    pub island_count: u64,
    pub island_computes: u64,
    /// Number of A* searches.
    pub path_count: u64,
    /// Cells visited while writing paths, including those beyond the buffer.
    pub path_output_cells: u64,
    /// Cells popped from the open set.
    pub path_itr_cells: u64,
    /// Cells pushed into the open set, including the start cell.
    pub path_itr_enqueues: u64,
    pub find_count: u64,
    pub find_itr_cells: u64,
    pub find_itr_enqueues: u64,
    pub line_query_count: u64,
    /// Number of workers that allocated their scratch state.
    pub worker_count: u64,
    /// Bytes owned by the grid itself.
    pub grid_data_size: u64,
    /// Bytes owned by all allocated worker states.
    pub worker_data_size: u64,
}

/// Per-worker counters, drained into [`NavStats`] by [`NavGrid::stats`].
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct WorkerStats {
    pub(crate) path_count: u64,
    pub(crate) path_output_cells: u64,
    pub(crate) path_itr_cells: u64,
    pub(crate) path_itr_enqueues: u64,
    pub(crate) find_count: u64,
    pub(crate) find_itr_cells: u64,
    pub(crate) find_itr_enqueues: u64,
    pub(crate) line_query_count: u64,
}

impl WorkerStats {
    /// Add the counters to `totals` and zero them.
    pub(crate) fn drain_into(&mut self, totals: &mut NavStats) {
        let s = std::mem::take(self);
        totals.path_count += s.path_count;
        totals.path_output_cells += s.path_output_cells;
        totals.path_itr_cells += s.path_itr_cells;
        totals.path_itr_enqueues += s.path_itr_enqueues;
        totals.find_count += s.find_count;
        totals.find_itr_cells += s.find_itr_cells;
        totals.find_itr_enqueues += s.find_itr_enqueues;
        totals.line_query_count += s.line_query_count;
    }
}

impl NavGrid {
    /// Collect statistics.
    ///
    /// Worker counters are moved into the grid totals, so every query is
    /// reported exactly once across successive calls.
    pub fn stats(&mut self) -> NavStats {
        let total = self.cell_count_total;
        let grid_data_size = size_of::<NavGrid>()
            + total * size_of::<u8>()
            + total * size_of::<crate::NavIsland>()
            + self.workers.len() * size_of::<OnceLock<Mutex<NavWorkerState>>>()
            + self.island_stack.capacity() * size_of::<NavCell>();

        self.stats.cell_count_total = total as u64;
        self.stats.cell_count_axis = u64::from(self.cell_count_axis);
        self.stats.island_count = u64::from(self.island_count);
        self.stats.grid_data_size = grid_data_size as u64;
        self.stats.worker_count = 0;
        self.stats.worker_data_size = 0;

        let stats = &mut self.stats;
        for slot in self.workers.iter_mut() {
            let Some(state) = slot.get_mut() else {
                continue;
            };
            let state = state.get_mut().unwrap_or_else(|e| e.into_inner());
            state.stats.drain_into(stats);
            stats.worker_count += 1;
            stats.worker_data_size += state.data_size() as u64;
        }
        self.stats
    }

    /// Zero every cumulative counter, including those held by the workers.
    pub fn stats_reset(&mut self) {
        self.stats = NavStats::default();
        for slot in self.workers.iter_mut() {
            if let Some(state) = slot.get_mut() {
                let state = state.get_mut().unwrap_or_else(|e| e.into_inner());
                state.stats = WorkerStats::default();
            }
        }
    }
}
