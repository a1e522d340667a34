//! Blocker accounting.
//!
//! Every cell holds a counter of the blockers covering it; a cell is blocked
//! while its counter is non-zero. Blockers only ever add to the counters, the
//! whole store is reset with [`NavUpdate::blocker_clear_all`] and rebuilt.

use navgrid_core::{Aabb, BoxRotated, NavCell, NavRegion, Sphere};

use crate::NavGrid;

impl NavGrid {
    /// Begin an update phase.
    ///
    /// The returned handle borrows the grid mutably, so no query can run until
    /// it is dropped. Island labels are recomputed when the handle goes away if
    /// the occupancy changed.
    pub fn update(&mut self) -> NavUpdate<'_> {
        NavUpdate {
            grid: self,
            dirty: false,
        }
    }

    /// Whether any blocker covers `cell`.
    #[inline]
    pub fn blocked(&self, cell: NavCell) -> bool {
        self.cells[self.cell_index(cell)] > 0
    }

    /// Whether any blocked cell overlaps the rotated box.
    pub fn blocked_box_rotated(&self, shape: &BoxRotated) -> bool {
        self.map_box(&shape.bounds())
            .iter()
            .any(|cell| self.blocked(cell) && shape.overlaps_aabb(&self.cell_box(cell)))
    }

    /// Whether any blocked cell overlaps the sphere.
    pub fn blocked_sphere(&self, sphere: &Sphere) -> bool {
        self.map_box(&sphere.bounds())
            .iter()
            .any(|cell| self.blocked(cell) && sphere.overlaps_aabb(&self.cell_box(cell)))
    }

    /// Whether the box reaches into the vertical band of the cells.
    fn in_band(&self, aabb: &Aabb) -> bool {
        let band_min = self.cell_offset.y;
        let band_max = band_min + self.cell_height;
        !(aabb.max.y < band_min || aabb.min.y > band_max)
    }
}

/// Exclusive write access to the occupancy of a [`NavGrid`].
///
/// ```
/// use navgrid::{NavGrid, NavGridConfig};
/// use navgrid_core::{Aabb, NavCell, Vec3};
///
/// let mut grid = NavGrid::new(NavGridConfig::default().with_size(10.0));
/// {
///     let mut update = grid.update();
///     update.blocker_clear_all();
///     update.blocker_add_box(&Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::ONE));
/// }
/// assert!(grid.blocked(NavCell::new(5, 5)));
/// ```
#[must_use = "blockers are only applied through the returned handle"]
pub struct NavUpdate<'a> {
    grid: &'a mut NavGrid,
    dirty: bool,
}

impl NavUpdate<'_> {
    /// Read access to the grid while updating.
    pub fn grid(&self) -> &NavGrid {
        &*self.grid
    }

    /// Remove every blocker.
    pub fn blocker_clear_all(&mut self) {
        self.grid.cells.fill(0);
        self.dirty = true;
    }

    /// Block every cell covered by the box.
    ///
    /// Boxes that lie entirely above or below the cells are ignored. Returns
    /// the number of cells that were incremented.
    pub fn blocker_add_box(&mut self, aabb: &Aabb) -> usize {
        if !self.grid.in_band(aabb) {
            return 0;
        }
        let region = self.grid.map_box(aabb);
        self.add_cells(region, |_| true)
    }

    /// Block every cell whose bounds overlap the rotated box.
    ///
    /// Returns the number of cells that were incremented.
    pub fn blocker_add_box_rotated(&mut self, shape: &BoxRotated) -> usize {
        let region = self.grid.map_box(&shape.bounds());
        self.add_cells(region, |cell_box| shape.overlaps_aabb(cell_box))
    }

    /// Block every cell whose bounds overlap the sphere.
    ///
    /// Returns the number of cells that were incremented.
    pub fn blocker_add_sphere(&mut self, sphere: &Sphere) -> usize {
        let region = self.grid.map_box(&sphere.bounds());
        self.add_cells(region, |cell_box| sphere.overlaps_aabb(cell_box))
    }

    fn add_cells(&mut self, region: NavRegion, overlaps: impl Fn(&Aabb) -> bool) -> usize {
        let mut count = 0;
        for cell in region {
            if !overlaps(&self.grid.cell_box(cell)) {
                continue;
            }
            let idx = self.grid.cell_index(cell);
            // Saturate so a stacked cell never wraps back to unblocked.
            self.grid.cells[idx] = self.grid.cells[idx].saturating_add(1);
            count += 1;
        }
        self.grid.stats.blocker_add_count += 1;
        self.dirty |= count > 0;
        count
    }

    /// End the update phase.
    pub fn finish(self) {}
}

impl Drop for NavUpdate<'_> {
    fn drop(&mut self) {
        if self.dirty {
            self.grid.compute_islands();
        }
    }
}
