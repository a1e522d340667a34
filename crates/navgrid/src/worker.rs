//! Per-worker scratch state.
//!
//! Every query that needs scratch memory takes a [`WorkerId`]. The grid keeps
//! one lazily created [`NavWorkerState`] per identity, so workers with
//! distinct identities never share buffers and searches never allocate after
//! a worker's first query.

use std::fmt;
use std::mem::size_of;
use std::sync::{Mutex, MutexGuard, PoisonError};

use navgrid_core::NavCell;

use crate::NavGrid;
use crate::stats::WorkerStats;

/// Capacity of the worker table.
pub const NAV_WORKERS_MAX: usize = 64;

/// Identity of a worker thread, used to pick its scratch state.
///
/// Callers running queries concurrently must use distinct identities.
/// Sharing one is not unsafe, the queries just serialise on the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct WorkerId(u8);

impl WorkerId {
    /// Create a worker identity.
    ///
    /// # Panics
    ///
    /// Panics if `index >= NAV_WORKERS_MAX`.
    pub fn new(index: usize) -> Self {
        match Self::try_new(index) {
            Some(id) => id,
            None => panic!("worker index {index} exceeds the limit of {NAV_WORKERS_MAX}"),
        }
    }

    pub fn try_new(index: usize) -> Option<Self> {
        (index < NAV_WORKERS_MAX).then_some(Self(index as u8))
    }

    #[inline]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

/// Error returned when converting an index at or above [`NAV_WORKERS_MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerIdOutOfRange(pub u8);

impl fmt::Display for WorkerIdOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "worker index {} exceeds the limit of {NAV_WORKERS_MAX}", self.0)
    }
}

impl std::error::Error for WorkerIdOutOfRange {}

impl TryFrom<u8> for WorkerId {
    type Error = WorkerIdOutOfRange;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::try_new(usize::from(index)).ok_or(WorkerIdOutOfRange(index))
    }
}

impl From<WorkerId> for u8 {
    fn from(id: WorkerId) -> u8 {
        id.0
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "worker#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// MarkedCells
// ---------------------------------------------------------------------------

/// Fixed-size bit set with one bit per cell.
pub(crate) struct MarkedCells {
    words: Box<[u64]>,
}

impl MarkedCells {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(64)].into_boxed_slice(),
        }
    }

    #[inline]
    pub(crate) fn set(&mut self, idx: usize) {
        self.words[idx / 64] |= 1u64 << (idx % 64);
    }

    #[inline]
    pub(crate) fn clear(&mut self, idx: usize) {
        self.words[idx / 64] &= !(1u64 << (idx % 64));
    }

    #[inline]
    pub(crate) fn test(&self, idx: usize) -> bool {
        self.words[idx / 64] & (1u64 << (idx % 64)) != 0
    }

    pub(crate) fn clear_all(&mut self) {
        self.words.fill(0);
    }

    fn data_size(&self) -> usize {
        self.words.len() * size_of::<u64>()
    }
}

// ---------------------------------------------------------------------------
// NavWorkerState
// ---------------------------------------------------------------------------

/// Search buffers owned by one worker, sized once to the grid's cell count.
pub(crate) struct NavWorkerState {
    pub(crate) cell_count_axis: usize,
    /// Open-set membership during A*, visited cells during find.
    pub(crate) marked: MarkedCells,
    /// Open set sorted on descending fScore (A*), FIFO (find).
    pub(crate) queue: Box<[NavCell]>,
    pub(crate) queue_count: usize,
    pub(crate) g_scores: Box<[u32]>,
    pub(crate) f_scores: Box<[u32]>,
    pub(crate) came_from: Box<[NavCell]>,
    pub(crate) stats: WorkerStats,
}

impl NavWorkerState {
    pub(crate) fn new(cell_count_axis: usize, cell_count_total: usize) -> Self {
        Self {
            cell_count_axis,
            marked: MarkedCells::new(cell_count_total),
            queue: vec![NavCell::ZERO; cell_count_total].into_boxed_slice(),
            queue_count: 0,
            g_scores: vec![u32::MAX; cell_count_total].into_boxed_slice(),
            f_scores: vec![u32::MAX; cell_count_total].into_boxed_slice(),
            came_from: vec![NavCell::ZERO; cell_count_total].into_boxed_slice(),
            stats: WorkerStats::default(),
        }
    }

    #[inline]
    pub(crate) fn index(&self, cell: NavCell) -> usize {
        usize::from(cell.y) * self.cell_count_axis + usize::from(cell.x)
    }

    pub(crate) fn data_size(&self) -> usize {
        size_of::<Mutex<NavWorkerState>>()
            + self.marked.data_size()
            + self.queue.len() * size_of::<NavCell>()
            + self.g_scores.len() * size_of::<u32>()
            + self.f_scores.len() * size_of::<u32>()
            + self.came_from.len() * size_of::<NavCell>()
    }
}

impl NavGrid {
    /// Lock the scratch state of `worker`, allocating it on first use.
    pub(crate) fn worker_state(&self, worker: WorkerId) -> MutexGuard<'_, NavWorkerState> {
        let slot = self.workers[worker.index()].get_or_init(|| {
            log::debug!(
                "nav grid: allocating scratch for {worker} ({} cells)",
                self.cell_count_total
            );
            Mutex::new(NavWorkerState::new(
                usize::from(self.cell_count_axis),
                self.cell_count_total,
            ))
        });
        // Queries reset every buffer they read before use.
        slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
