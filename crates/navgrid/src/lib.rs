//! Grid-based occupancy and pathfinding for real-time simulations.
//!
//! A [`NavGrid`] is a fixed-resolution square grid laid over the world XZ
//! plane. It answers two questions cheaply and repeatedly from many worker
//! threads at once:
//!
//! - **Is this cell blocked?** ([`NavGrid::blocked`]), backed by per-cell
//!   blocker counters written during an exclusive update phase
//!   ([`NavGrid::update`]).
//! - **What is a walkable route?** ([`NavGrid::path`]), an A\* search over
//!   4-connected unblocked cells.
//!
//! Searches run in per-worker scratch buffers that are allocated on a
//! worker's first query and reused afterwards, so queries do not allocate
//! once warmed up. Each call names its [`WorkerId`]; concurrent callers must
//! use distinct identities.
//!
//! Further queries: closest unblocked or reachable cells
//! ([`NavGrid::closest_unblocked`], [`NavGrid::closest_reachable`]), line
//! tests ([`NavGrid::line_blocked`]) and island labels
//! ([`NavGrid::island`], [`NavGrid::reachable`]).
//!
//! ```
//! use navgrid::{NavGrid, NavGridConfig, WorkerId};
//! use navgrid_core::{Aabb, NavCell, Vec3};
//!
//! let mut grid = NavGrid::new(NavGridConfig::default().with_size(10.0));
//! grid.update()
//!     .blocker_add_box(&Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 1.0, 1.0)));
//!
//! let mut path = [NavCell::ZERO; 64];
//! let n = grid.path(WorkerId::new(0), NavCell::new(9, 9), NavCell::new(0, 9), &mut path);
//! assert_eq!(path[0], NavCell::new(9, 9));
//! assert_eq!(path[n - 1], NavCell::new(0, 9));
//! ```

mod astar;
mod config;
mod distance;
mod find;
mod grid;
mod islands;
mod line;
mod neighbors;
mod occupancy;
mod path;
mod stats;
mod worker;

pub use config::{NAV_CENTER_MAX, NAV_PARAM_MAX, NAV_PARAM_MIN, NavConfigError, NavGridConfig};
pub use distance::{chebyshev, manhattan};
pub use grid::NavGrid;
pub use islands::{NAV_ISLAND_BLOCKED, NavIsland};
pub use neighbors::Neighbors;
pub use occupancy::NavUpdate;
pub use stats::NavStats;
pub use worker::{NAV_WORKERS_MAX, WorkerId, WorkerIdOutOfRange};

pub use navgrid_core::{Aabb, BoxRotated, NavCell, NavRegion, Sphere};
