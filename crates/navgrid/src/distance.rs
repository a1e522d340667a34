use navgrid_core::NavCell;

/// Manhattan (L1) distance between two cells.
#[inline]
pub fn manhattan(a: NavCell, b: NavCell) -> u32 {
    u32::from(a.x.abs_diff(b.x)) + u32::from(a.y.abs_diff(b.y))
}

/// Chebyshev (L∞) distance between two cells.
#[inline]
pub fn chebyshev(a: NavCell, b: NavCell) -> u32 {
    u32::from(a.x.abs_diff(b.x).max(a.y.abs_diff(b.y)))
}
