//! The [`NavGrid`] resource and its world ↔ cell mapping.

use std::sync::{Mutex, OnceLock};

use glam::Vec3;
use navgrid_core::{Aabb, NavCell, NavRegion};

use crate::config::{NavConfigError, NavGridConfig};
use crate::islands::NavIsland;
use crate::stats::NavStats;
use crate::worker::{NAV_WORKERS_MAX, NavWorkerState};

/// A fixed-resolution 2D occupancy grid on the world XZ plane.
///
/// Queries take `&self` and may run from many threads at once, each with its
/// own [`WorkerId`](crate::WorkerId). Blockers are written through the
/// exclusive [`NavUpdate`](crate::NavUpdate) handle returned by
/// [`update`](Self::update).
pub struct NavGrid {
    pub(crate) cell_count_axis: u16,
    pub(crate) cell_count_total: usize,
    pub(crate) cell_density: f32,
    pub(crate) cell_size: f32,
    pub(crate) cell_height: f32,
    /// World position of the center of cell (0, 0).
    pub(crate) cell_offset: Vec3,
    pub(crate) config: NavGridConfig,
    /// Blocker count per cell, row-major.
    pub(crate) cells: Box<[u8]>,
    pub(crate) islands: Box<[NavIsland]>,
    pub(crate) island_count: u32,
    pub(crate) island_stack: Vec<NavCell>,
    pub(crate) workers: Box<[OnceLock<Mutex<NavWorkerState>>]>,
    pub(crate) stats: NavStats,
}

/// Result of mapping a world position to a cell.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MapResult {
    pub(crate) cell: NavCell,
    pub(crate) clamped_x: bool,
    pub(crate) clamped_y: bool,
}

impl NavGrid {
    /// Create a grid.
    ///
    /// # Panics
    ///
    /// Panics if `config` is invalid, see [`NavGridConfig::validate`].
    pub fn new(config: NavGridConfig) -> Self {
        match Self::try_new(config) {
            Ok(grid) => grid,
            Err(e) => panic!("{e}"),
        }
    }

    /// Create a grid, reporting invalid parameters as an error.
    pub fn try_new(config: NavGridConfig) -> Result<Self, NavConfigError> {
        config.validate()?;

        let cell_count_axis = config.cell_count_axis() as u16;
        let cell_count_total = usize::from(cell_count_axis) * usize::from(cell_count_axis);
        let half = config.size * 0.5;

        let mut grid = Self {
            cell_count_axis,
            cell_count_total,
            cell_density: config.density,
            cell_size: 1.0 / config.density,
            cell_height: config.height,
            cell_offset: config.center - Vec3::new(half, 0.0, half),
            config,
            cells: vec![0; cell_count_total].into_boxed_slice(),
            islands: vec![0; cell_count_total].into_boxed_slice(),
            island_count: 0,
            island_stack: Vec::new(),
            workers: (0..NAV_WORKERS_MAX).map(|_| OnceLock::new()).collect(),
            stats: NavStats::default(),
        };
        grid.compute_islands();

        log::debug!(
            "nav grid: created {axis}x{axis} cells (size {}, density {})",
            config.size,
            config.density,
            axis = cell_count_axis,
        );
        Ok(grid)
    }

    /// The parameters the grid was created with.
    pub fn config(&self) -> &NavGridConfig {
        &self.config
    }

    /// World-space edge length of the grid.
    pub fn size(&self) -> f32 {
        self.config.size
    }

    /// Region covering every cell of the grid.
    pub fn bounds(&self) -> NavRegion {
        NavRegion::new(0, 0, self.cell_count_axis, self.cell_count_axis)
    }

    /// World-space extent of a single cell: `(cell_size, cell_height, cell_size)`.
    pub fn cell_size(&self) -> Vec3 {
        Vec3::new(self.cell_size, self.cell_height, self.cell_size)
    }

    pub fn cell_count_axis(&self) -> u16 {
        self.cell_count_axis
    }

    pub fn cell_count_total(&self) -> usize {
        self.cell_count_total
    }

    #[inline]
    pub(crate) fn in_bounds(&self, cell: NavCell) -> bool {
        cell.in_region(&self.bounds())
    }

    #[inline]
    pub(crate) fn cell_index(&self, cell: NavCell) -> usize {
        debug_assert!(self.in_bounds(cell), "cell {cell} outside the grid");
        usize::from(cell.y) * usize::from(self.cell_count_axis) + usize::from(cell.x)
    }

    /// World-space center of the cell footprint, at the bottom of the cell.
    pub fn position(&self, cell: NavCell) -> Vec3 {
        debug_assert!(self.in_bounds(cell), "cell {cell} outside the grid");
        self.cell_offset + Vec3::new(f32::from(cell.x), 0.0, f32::from(cell.y)) * self.cell_size
    }

    /// World-space bounds of the cell.
    pub fn cell_box(&self, cell: NavCell) -> Aabb {
        let center = self.position(cell);
        let half = self.cell_size * 0.5;
        Aabb {
            min: center - Vec3::new(half, 0.0, half),
            max: center + Vec3::new(half, self.cell_height, half),
        }
    }

    pub(crate) fn map(&self, pos: Vec3) -> MapResult {
        let local = ((pos - self.cell_offset) * self.cell_density).round();
        let max = f32::from(self.cell_count_axis - 1);
        let clamp = |v: f32| -> (f32, bool) {
            if v < 0.0 {
                (0.0, true)
            } else if v > max {
                (max, true)
            } else {
                (v, false)
            }
        };
        let (x, clamped_x) = clamp(local.x);
        let (y, clamped_y) = clamp(local.z);
        MapResult {
            cell: NavCell::new(x as u16, y as u16),
            clamped_x,
            clamped_y,
        }
    }

    /// Cell containing the world position, clamped to the grid.
    pub fn at_position(&self, pos: Vec3) -> NavCell {
        self.map(pos).cell
    }

    /// Region of cells covered by a world-space box.
    ///
    /// A box entirely outside the grid on some axis maps to an empty region.
    pub fn map_box(&self, aabb: &Aabb) -> NavRegion {
        let lo = self.map(aabb.min);
        let hi = self.map(aabb.max);
        let mut max = hi.cell;
        if !(lo.clamped_x && hi.clamped_x) {
            max.x += 1;
        }
        if !(lo.clamped_y && hi.clamped_y) {
            max.y += 1;
        }
        NavRegion { min: lo.cell, max }
    }

    /// Square neighbourhood of `radius` cells around `cell`, clamped to the grid.
    pub fn region(&self, cell: NavCell, radius: u16) -> NavRegion {
        debug_assert!(self.in_bounds(cell), "cell {cell} outside the grid");
        let last = u32::from(self.cell_count_axis) - 1;
        let grow = |v: u16| -> (u16, u16) {
            let lo = v.saturating_sub(radius);
            let hi = (u32::from(v) + u32::from(radius)).min(last) + 1;
            (lo, hi as u16)
        };
        let (min_x, max_x) = grow(cell.x);
        let (min_y, max_y) = grow(cell.y);
        NavRegion {
            min: NavCell::new(min_x, min_y),
            max: NavCell::new(max_x, max_y),
        }
    }

    /// World distance between the centers of two cells.
    pub fn distance(&self, a: NavCell, b: NavCell) -> f32 {
        let a = Vec3::new(f32::from(a.x), 0.0, f32::from(a.y));
        let b = Vec3::new(f32::from(b.x), 0.0, f32::from(b.y));
        a.distance(b) * self.cell_size
    }

    /// Manhattan distance between two cells, in cells.
    pub fn manhattan_dist(&self, a: NavCell, b: NavCell) -> u32 {
        crate::manhattan(a, b)
    }

    /// Chebyshev distance between two cells, in cells.
    pub fn chebyshev_dist(&self, a: NavCell, b: NavCell) -> u32 {
        crate::chebyshev(a, b)
    }
}

impl std::fmt::Debug for NavGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavGrid")
            .field("cell_count_axis", &self.cell_count_axis)
            .field("cell_size", &self.cell_size)
            .field("cell_height", &self.cell_height)
            .field("cell_offset", &self.cell_offset)
            .field("island_count", &self.island_count)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngExt, SeedableRng};

    fn grid10() -> NavGrid {
        NavGrid::new(NavGridConfig::new(Vec3::ZERO, 10.0, 1.0, 2.0))
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    #[test]
    fn create() {
        let g = grid10();
        assert_eq!(g.cell_count_axis(), 10);
        assert_eq!(g.cell_count_total(), 100);
        assert_eq!(g.size(), 10.0);
        assert_eq!(g.bounds(), NavRegion::new(0, 0, 10, 10));
        assert_eq!(g.cell_size(), Vec3::new(1.0, 2.0, 1.0));
        assert_eq!(g.cell_offset, Vec3::new(-5.0, 0.0, -5.0));
    }

    #[test]
    fn in_bounds_follows_bounds() {
        let g = grid10();
        assert!(g.in_bounds(NavCell::new(0, 0)));
        assert!(g.in_bounds(NavCell::new(9, 9)));
        assert!(!g.in_bounds(NavCell::new(10, 0)));
        assert!(!g.in_bounds(NavCell::new(0, 10)));
    }

    #[test]
    fn try_new_reports_errors() {
        let bad = NavGridConfig::default().with_density(0.0);
        assert!(matches!(
            NavGrid::try_new(bad),
            Err(NavConfigError::DensityOutOfRange(_))
        ));
    }

    #[test]
    #[should_panic(expected = "nav grid: height")]
    fn new_panics_on_invalid() {
        let _ = NavGrid::new(NavGridConfig::default().with_height(-1.0));
    }

    #[test]
    fn is_send_and_sync() {
        fn check<T: Send + Sync>() {}
        check::<NavGrid>();
    }

    // -----------------------------------------------------------------------
    // Mapping
    // -----------------------------------------------------------------------

    #[test]
    fn position_and_box() {
        let g = NavGrid::new(NavGridConfig::new(Vec3::new(10.0, 3.0, 0.0), 4.0, 2.0, 1.5));
        assert_eq!(g.cell_count_axis(), 8);
        assert_eq!(g.position(NavCell::ZERO), Vec3::new(8.0, 3.0, -2.0));
        assert_eq!(g.position(NavCell::new(2, 1)), Vec3::new(9.0, 3.0, -1.5));

        let b = g.cell_box(NavCell::new(2, 1));
        assert_eq!(b.min, Vec3::new(8.75, 3.0, -1.75));
        assert_eq!(b.max, Vec3::new(9.25, 4.5, -1.25));
    }

    #[test]
    fn at_position_round_trip() {
        let g = NavGrid::new(NavGridConfig::new(Vec3::new(3.0, 0.0, -7.0), 20.0, 2.0, 2.0));
        let half_cell = g.cell_size * 0.5 + 1e-4;
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let pos = Vec3::new(
                rng.random_range(-6.5..12.5),
                0.0,
                rng.random_range(-16.5..2.5),
            );
            let center = g.position(g.at_position(pos));
            assert!((center.x - pos.x).abs() <= half_cell, "{pos} -> {center}");
            assert!((center.z - pos.z).abs() <= half_cell, "{pos} -> {center}");
        }
    }

    #[test]
    fn at_position_clamps() {
        let g = grid10();
        assert_eq!(g.at_position(Vec3::new(-1e5, 0.0, 1e5)), NavCell::new(0, 9));
        assert_eq!(g.at_position(Vec3::new(1e9, 50.0, -1e9)), NavCell::new(9, 0));
        assert_eq!(g.at_position(Vec3::splat(f32::NAN)), NavCell::ZERO);
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let pos = Vec3::new(rng.random_range(-1e4..1e4), 0.0, rng.random_range(-1e4..1e4));
            assert!(g.bounds().contains(g.at_position(pos)));
        }
    }

    #[test]
    fn map_box_exclusive_max() {
        let g = grid10();
        let r = g.map_box(&Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0)));
        assert_eq!(r, NavRegion::new(4, 4, 7, 7));

        // A point still covers its cell.
        let r = g.map_box(&Aabb::new(Vec3::ZERO, Vec3::ZERO));
        assert_eq!(r.len(), 1);
        assert!(r.contains(NavCell::new(5, 5)));
    }

    #[test]
    fn map_box_outside_is_empty() {
        let g = grid10();
        let left = Aabb::new(Vec3::new(-50.0, 0.0, -1.0), Vec3::new(-40.0, 1.0, 1.0));
        assert!(g.map_box(&left).is_empty());
        let right = Aabb::new(Vec3::new(40.0, 0.0, -1.0), Vec3::new(50.0, 1.0, 1.0));
        assert!(g.map_box(&right).is_empty());
        // Partially outside: clamped on one side only.
        let edge = Aabb::new(Vec3::new(-50.0, 0.0, -0.2), Vec3::new(-4.0, 1.0, 0.2));
        assert_eq!(g.map_box(&edge), NavRegion::new(0, 5, 2, 6));
    }

    #[test]
    fn region_clamps() {
        let g = grid10();
        assert_eq!(g.region(NavCell::new(5, 5), 1), NavRegion::new(4, 4, 7, 7));
        assert_eq!(g.region(NavCell::new(0, 9), 2), NavRegion::new(0, 7, 3, 10));
        assert_eq!(g.region(NavCell::new(3, 3), u16::MAX), g.bounds());
    }

    #[test]
    fn distances() {
        let g = NavGrid::new(NavGridConfig::new(Vec3::ZERO, 10.0, 2.0, 2.0));
        let a = NavCell::new(0, 0);
        let b = NavCell::new(3, 4);
        assert!((g.distance(a, b) - 2.5).abs() < 1e-6);
        assert_eq!(g.manhattan_dist(a, b), 7);
        assert_eq!(g.chebyshev_dist(a, b), 4);
    }
}
