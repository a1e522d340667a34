use navgrid_core::NavCell;

use crate::NavGrid;

/// Up to four cardinal neighbours of a cell, in the order +x, -x, +y, -y.
#[derive(Debug, Clone, Copy)]
pub struct Neighbors {
    cells: [NavCell; 4],
    len: u8,
}

impl Neighbors {
    #[inline]
    fn push(&mut self, cell: NavCell) {
        self.cells[usize::from(self.len)] = cell;
        self.len += 1;
    }

    #[inline]
    pub fn as_slice(&self) -> &[NavCell] {
        &self.cells[..usize::from(self.len)]
    }
}

impl IntoIterator for Neighbors {
    type Item = NavCell;
    type IntoIter = std::iter::Take<std::array::IntoIter<NavCell, 4>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter().take(usize::from(self.len))
    }
}

impl NavGrid {
    /// The 4-connected neighbours of `cell` that lie inside the grid.
    #[inline]
    pub fn neighbors(&self, cell: NavCell) -> Neighbors {
        let axis = self.cell_count_axis;
        let mut n = Neighbors {
            cells: [NavCell::ZERO; 4],
            len: 0,
        };
        if u32::from(cell.x) + 1 < u32::from(axis) {
            n.push(NavCell::new(cell.x + 1, cell.y));
        }
        if cell.x >= 1 {
            n.push(NavCell::new(cell.x - 1, cell.y));
        }
        if u32::from(cell.y) + 1 < u32::from(axis) {
            n.push(NavCell::new(cell.x, cell.y + 1));
        }
        if cell.y >= 1 {
            n.push(NavCell::new(cell.x, cell.y - 1));
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use crate::{NavGrid, NavGridConfig};
    use navgrid_core::NavCell;

    #[test]
    fn cardinal_order_and_bounds() {
        let g = NavGrid::new(NavGridConfig::default().with_size(4.0));
        let n = g.neighbors(NavCell::new(1, 1));
        assert_eq!(
            n.as_slice(),
            &[
                NavCell::new(2, 1),
                NavCell::new(0, 1),
                NavCell::new(1, 2),
                NavCell::new(1, 0),
            ]
        );

        let corner: Vec<_> = g.neighbors(NavCell::new(0, 0)).into_iter().collect();
        assert_eq!(corner, vec![NavCell::new(1, 0), NavCell::new(0, 1)]);

        let far = g.neighbors(NavCell::new(3, 3));
        assert_eq!(far.as_slice(), &[NavCell::new(2, 3), NavCell::new(3, 2)]);
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        let g = NavGrid::new(NavGridConfig::default().with_size(1.0));
        assert!(g.neighbors(NavCell::ZERO).as_slice().is_empty());
    }
}
