use navgrid_core::NavCell;

use crate::NavGrid;
use crate::worker::WorkerId;

impl NavGrid {
    /// Whether any blocked cell lies on the line between the two cells.
    ///
    /// The line is rasterised with a variant of Xiaolin Wu's algorithm: when
    /// it is not axis aligned two cells are tested per step, which closes
    /// the gaps a thin line could slip through diagonally.
    pub fn line_blocked(&self, worker: WorkerId, from: NavCell, to: NavCell) -> bool {
        debug_assert!(self.in_bounds(from), "cell {from} outside the grid");
        debug_assert!(self.in_bounds(to), "cell {to} outside the grid");
        self.worker_state(worker).stats.line_query_count += 1;
        self.any_in_line(from, to, |c| self.blocked(c))
    }

    fn any_in_line(&self, a: NavCell, b: NavCell, pred: impl Fn(NavCell) -> bool) -> bool {
        let (mut ax, mut ay) = (i32::from(a.x), i32::from(a.y));
        let (mut bx, mut by) = (i32::from(b.x), i32::from(b.y));

        // Walk along the major axis.
        let steep = (by - ay).abs() > (bx - ax).abs();
        if steep {
            std::mem::swap(&mut ax, &mut ay);
            std::mem::swap(&mut bx, &mut by);
        }
        if ax > bx {
            std::mem::swap(&mut ax, &mut bx);
            std::mem::swap(&mut ay, &mut by);
        }
        let gradient = if bx != ax {
            (by - ay) as f32 / (bx - ax) as f32
        } else {
            1.0
        };
        let wide = ay != by;
        let axis = i32::from(self.cell_count_axis);

        let probe = |major: i32, minor: i32| -> bool {
            let at = |minor: i32| {
                if steep {
                    NavCell::new(minor as u16, major as u16)
                } else {
                    NavCell::new(major as u16, minor as u16)
                }
            };
            pred(at(minor)) || (wide && minor + 1 < axis && pred(at(minor + 1)))
        };

        if probe(ax, ay) {
            return true;
        }
        let mut intersect = ay as f32 + gradient;
        for major in ax + 1..bx {
            if probe(major, intersect as i32) {
                return true;
            }
            intersect += gradient;
        }
        probe(bx, by)
    }
}
