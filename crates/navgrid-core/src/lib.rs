//! **navgrid-core**: value types shared by the navigation grid.
//!
//! This crate provides the grid primitives ([`NavCell`], [`NavRegion`]) and
//! the world-space shapes ([`Aabb`], [`BoxRotated`], [`Sphere`]) used to
//! describe blocking volumes. World-space math is done with [`glam`].

pub mod geom;
pub mod shape;

pub use geom::{NavCell, NavRegion, RegionIter};
pub use shape::{Aabb, BoxRotated, Sphere};

pub use glam::{Quat, Vec3};
