//! Grid primitives: [`NavCell`] and [`NavRegion`].
//!
//! Cells use unsigned 16-bit coordinates; `x` grows along world X and `y`
//! along world Z.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

// ---------------------------------------------------------------------------
// NavCell
// ---------------------------------------------------------------------------

/// Identifier of a navigation cell.
///
/// A cell is representable as a single packed `u32` (`x` in the low half, `y`
/// in the high half); equality, hashing and ordering all go through that
/// packed value.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavCell {
    pub x: u16,
    pub y: u16,
}

impl NavCell {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new cell.
    #[inline]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// The packed representation: `x | y << 16`.
    #[inline]
    pub const fn packed(self) -> u32 {
        self.x as u32 | (self.y as u32) << 16
    }

    /// Inverse of [`packed`](Self::packed).
    #[inline]
    pub const fn from_packed(data: u32) -> Self {
        Self {
            x: data as u16,
            y: (data >> 16) as u16,
        }
    }

    /// Whether the cell is inside the half-open region.
    #[inline]
    pub fn in_region(self, r: &NavRegion) -> bool {
        r.contains(self)
    }
}

// --- trait impls for NavCell ---

impl PartialEq for NavCell {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.packed() == other.packed()
    }
}

impl Eq for NavCell {}

impl Hash for NavCell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.packed().hash(state);
    }
}

impl PartialOrd for NavCell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NavCell {
    /// Row-major: `y` first, then `x`.
    fn cmp(&self, other: &Self) -> Ordering {
        self.packed().cmp(&other.packed())
    }
}

impl fmt::Display for NavCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(u16, u16)> for NavCell {
    fn from((x, y): (u16, u16)) -> Self {
        Self::new(x, y)
    }
}

// ---------------------------------------------------------------------------
// NavRegion
// ---------------------------------------------------------------------------

/// A half-open rectangle of cells \[min, max). `min` is inclusive, `max` is
/// exclusive.
///
/// Used to describe the footprint of a blocking volume on the grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavRegion {
    pub min: NavCell,
    pub max: NavCell,
}

impl NavRegion {
    /// Create a new region from two corners and canonicalize so that
    /// `min` ≤ `max` on each axis.
    #[inline]
    pub fn new(x0: u16, y0: u16, x1: u16, y1: u16) -> Self {
        Self {
            min: NavCell::new(x0.min(x1), y0.min(y1)),
            max: NavCell::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// Width of the region in cells.
    #[inline]
    pub fn width(self) -> u32 {
        u32::from(self.max.x).saturating_sub(u32::from(self.min.x))
    }

    /// Height of the region in cells.
    #[inline]
    pub fn height(self) -> u32 {
        u32::from(self.max.y).saturating_sub(u32::from(self.min.y))
    }

    /// Total number of cells in the region.
    #[inline]
    pub fn len(self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Whether the region covers no cells.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Whether `cell` is inside the half-open region.
    #[inline]
    pub fn contains(self, cell: NavCell) -> bool {
        cell.x >= self.min.x && cell.x < self.max.x && cell.y >= self.min.y && cell.y < self.max.y
    }

    /// Intersection of two regions.
    ///
    /// If the two regions do not overlap, the zero (empty) region is returned.
    #[inline]
    pub fn intersect(self, other: NavRegion) -> Self {
        let r = Self {
            min: NavCell::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y)),
            max: NavCell::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y)),
        };
        if r.is_empty() { Self::default() } else { r }
    }

    /// Row-major iterator over every cell in the region.
    #[inline]
    pub fn iter(self) -> RegionIter {
        RegionIter {
            region: self,
            cur: self.min,
        }
    }
}

impl IntoIterator for NavRegion {
    type Item = NavCell;
    type IntoIter = RegionIter;
    #[inline]
    fn into_iter(self) -> RegionIter {
        self.iter()
    }
}

impl fmt::Display for NavRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// RegionIter
// ---------------------------------------------------------------------------

/// Row-major iterator over the cells in a [`NavRegion`].
#[derive(Clone, Debug)]
pub struct RegionIter {
    region: NavRegion,
    cur: NavCell,
}

impl Iterator for RegionIter {
    type Item = NavCell;

    #[inline]
    fn next(&mut self) -> Option<NavCell> {
        if self.cur.y >= self.region.max.y || self.region.is_empty() {
            return None;
        }
        let cell = self.cur;
        if self.cur.x + 1 >= self.region.max.x {
            self.cur.x = self.region.min.x;
            self.cur.y += 1;
        } else {
            self.cur.x += 1;
        }
        Some(cell)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.region.is_empty() || self.cur.y >= self.region.max.y {
            return (0, Some(0));
        }
        let w = self.region.width() as usize;
        let remaining_in_row = (self.region.max.x - self.cur.x) as usize;
        let remaining_rows = (self.region.max.y - self.cur.y - 1) as usize;
        let total = remaining_in_row + remaining_rows * w;
        (total, Some(total))
    }
}

impl ExactSizeIterator for RegionIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    // -----------------------------------------------------------------------
    // NavCell
    // -----------------------------------------------------------------------

    #[test]
    fn cell_packing() {
        let c = NavCell::new(3, 7);
        assert_eq!(c.packed(), 3 | 7 << 16);
        assert_eq!(NavCell::from_packed(c.packed()), c);
        assert_eq!(NavCell::from_packed(u32::MAX), NavCell::new(u16::MAX, u16::MAX));
    }

    #[test]
    fn cell_order_is_row_major() {
        let mut cells = vec![NavCell::new(1, 1), NavCell::new(5, 0), NavCell::new(0, 1)];
        cells.sort();
        assert_eq!(cells, vec![NavCell::new(5, 0), NavCell::new(0, 1), NavCell::new(1, 1)]);
    }

    #[test]
    fn cell_hash_matches_eq() {
        let mut set = HashSet::new();
        set.insert(NavCell::new(2, 9));
        assert!(set.contains(&NavCell::from((2, 9))));
        assert!(!set.contains(&NavCell::new(9, 2)));
    }

    // -----------------------------------------------------------------------
    // NavRegion
    // -----------------------------------------------------------------------

    #[test]
    fn region_basics() {
        let r = NavRegion::new(0, 0, 3, 2);
        assert_eq!(r.width(), 3);
        assert_eq!(r.height(), 2);
        assert_eq!(r.len(), 6);
        assert!(!r.is_empty());
        assert!(r.contains(NavCell::new(0, 0)));
        assert!(r.contains(NavCell::new(2, 1)));
        assert!(!r.contains(NavCell::new(3, 0)));
        assert!(!r.contains(NavCell::new(0, 2)));
    }

    #[test]
    fn cell_in_region() {
        let r = NavRegion::new(2, 2, 5, 4);
        assert!(NavCell::new(2, 2).in_region(&r));
        assert!(NavCell::new(4, 3).in_region(&r));
        assert!(!NavCell::new(5, 3).in_region(&r));
        assert!(!NavCell::new(4, 4).in_region(&r));
        assert!(!NavCell::new(1, 3).in_region(&r));
    }

    #[test]
    fn region_auto_canonicalize() {
        let r = NavRegion::new(3, 2, 0, 0);
        assert_eq!(r.min, NavCell::new(0, 0));
        assert_eq!(r.max, NavCell::new(3, 2));
    }

    #[test]
    fn degenerate_region_is_empty() {
        let r = NavRegion {
            min: NavCell::new(4, 4),
            max: NavCell::new(4, 9),
        };
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.iter().count(), 0);

        // Inverted regions report zero size instead of underflowing.
        let inverted = NavRegion {
            min: NavCell::new(5, 5),
            max: NavCell::new(2, 2),
        };
        assert_eq!(inverted.len(), 0);
        assert_eq!(inverted.iter().count(), 0);
    }

    #[test]
    fn region_iter_row_major() {
        let r = NavRegion::new(1, 1, 4, 3);
        let cells: Vec<_> = r.iter().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(r.iter().len(), 6);
        assert_eq!(cells[0], NavCell::new(1, 1));
        assert_eq!(cells[2], NavCell::new(3, 1));
        assert_eq!(cells[3], NavCell::new(1, 2));
        assert_eq!(cells[5], NavCell::new(3, 2));
    }

    #[test]
    fn region_iter_at_coordinate_limit() {
        let r = NavRegion::new(u16::MAX - 2, 0, u16::MAX, 1);
        assert_eq!(r.iter().count(), 2);
    }

    #[test]
    fn region_intersect() {
        let a = NavRegion::new(0, 0, 4, 4);
        let b = NavRegion::new(2, 2, 6, 6);
        assert_eq!(a.intersect(b), NavRegion::new(2, 2, 4, 4));

        let c = NavRegion::new(5, 5, 7, 7);
        assert!(a.intersect(c).is_empty());
        assert_eq!(a.intersect(c), NavRegion::default());
    }
}
