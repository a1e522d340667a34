//! Island labelling.
//!
//! An island is a maximal set of unblocked cells connected through cardinal
//! neighbours. Two cells on different islands can never be joined by a path,
//! which lets [`NavGrid::path`] reject such queries without searching.

use navgrid_core::NavCell;

use crate::NavGrid;

/// Island label of a cell.
pub type NavIsland = u32;

/// Label carried by every blocked cell.
pub const NAV_ISLAND_BLOCKED: NavIsland = NavIsland::MAX;

const NAV_ISLAND_NONE: NavIsland = 0;

impl NavGrid {
    /// Relabel every cell; islands are numbered from 1 in row-major order of
    /// their first cell.
    pub(crate) fn compute_islands(&mut self) {
        self.islands.fill(NAV_ISLAND_NONE);

        let mut label = NAV_ISLAND_NONE;
        let mut stack = std::mem::take(&mut self.island_stack);

        for start in 0..self.cell_count_total {
            if self.islands[start] != NAV_ISLAND_NONE {
                continue;
            }
            if self.cells[start] > 0 {
                self.islands[start] = NAV_ISLAND_BLOCKED;
                continue;
            }
            label += 1;

            // Iterative DFS from `start`.
            let axis = usize::from(self.cell_count_axis);
            stack.clear();
            stack.push(NavCell::new((start % axis) as u16, (start / axis) as u16));
            self.islands[start] = label;

            while let Some(cell) = stack.pop() {
                for n in self.neighbors(cell) {
                    let ni = self.cell_index(n);
                    if self.islands[ni] == NAV_ISLAND_NONE && self.cells[ni] == 0 {
                        self.islands[ni] = label;
                        stack.push(n);
                    }
                }
            }
        }

        self.island_stack = stack;
        self.island_count = label;
        self.stats.island_computes += 1;
        log::debug!("nav grid: computed {label} islands");
    }

    /// Island label of `cell`, [`NAV_ISLAND_BLOCKED`] if it is blocked.
    pub fn island(&self, cell: NavCell) -> NavIsland {
        self.islands[self.cell_index(cell)]
    }

    /// Number of islands found by the last update.
    pub fn island_count(&self) -> u32 {
        self.island_count
    }

    /// Whether a path between `from` and `to` exists.
    ///
    /// O(1): both cells must be unblocked and on the same island.
    pub fn reachable(&self, from: NavCell, to: NavCell) -> bool {
        let island = self.island(from);
        island != NAV_ISLAND_BLOCKED && island == self.island(to)
    }
}
