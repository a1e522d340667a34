//! World-space shapes used to describe blocking volumes.
//!
//! [`Aabb`] is an axis-aligned box, [`BoxRotated`] an oriented box (a local
//! box rotated around its own center) and [`Sphere`] a ball. Overlap tests
//! against axis-aligned boxes are inclusive: touching shapes overlap.

use glam::{Quat, Vec3};

// ---------------------------------------------------------------------------
// Aabb
// ---------------------------------------------------------------------------

/// Axis-aligned bounding box.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from two corners, canonicalized so that `min` ≤ `max`.
    #[inline]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box of the given total `size` around `center`.
    #[inline]
    pub fn from_center(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest box containing a sphere.
    #[inline]
    pub fn from_sphere(center: Vec3, radius: f32) -> Self {
        Self {
            min: center - Vec3::splat(radius),
            max: center + Vec3::splat(radius),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// The eight corners.
    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    /// Point inside (or on) the box closest to `point`.
    #[inline]
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }

    #[inline]
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }
}

// ---------------------------------------------------------------------------
// BoxRotated
// ---------------------------------------------------------------------------

/// An oriented box: `aabb` rotated by `rotation` around its own center.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoxRotated {
    pub aabb: Aabb,
    pub rotation: Quat,
}

impl Default for BoxRotated {
    fn default() -> Self {
        Self {
            aabb: Aabb::default(),
            rotation: Quat::IDENTITY,
        }
    }
}

impl BoxRotated {
    #[inline]
    pub fn new(aabb: Aabb, rotation: Quat) -> Self {
        Self { aabb, rotation }
    }

    /// Box of the given total `size` around `center`, rotated by `rotation`.
    #[inline]
    pub fn from_center(center: Vec3, size: Vec3, rotation: Quat) -> Self {
        Self::new(Aabb::from_center(center, size), rotation)
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        self.aabb.center()
    }

    /// The eight corners in world space.
    pub fn corners(&self) -> [Vec3; 8] {
        let center = self.aabb.center();
        self.aabb
            .corners()
            .map(|p| center + self.rotation * (p - center))
    }

    /// World-space axis-aligned bounds of the rotated box.
    pub fn bounds(&self) -> Aabb {
        let corners = self.corners();
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for p in corners {
            min = min.min(p);
            max = max.max(p);
        }
        Aabb { min, max }
    }

    /// Separating Axis Theorem test against an axis-aligned box.
    ///
    /// Candidate axes: the three world axes, the three local axes of the
    /// rotated box and the nine cross products between them. If the
    /// projections overlap on every axis the boxes overlap.
    pub fn overlaps_aabb(&self, other: &Aabb) -> bool {
        let points_a = self.corners();
        let points_b = other.corners();

        // World axes reduce to interval checks against the aabb.
        for (axis, min_b, max_b) in [
            (Vec3::Y, other.min.y, other.max.y),
            (Vec3::Z, other.min.z, other.max.z),
            (Vec3::X, other.min.x, other.max.x),
        ] {
            let (min_a, max_a) = sat_project(axis, &points_a);
            if !sat_overlapping(min_a, max_a, min_b, max_b) {
                return false;
            }
        }

        let axes_a = [
            self.rotation * Vec3::X,
            self.rotation * Vec3::Y,
            self.rotation * Vec3::Z,
        ];
        for axis in axes_a {
            if !sat_overlapping_points(axis, &points_a, &points_b) {
                return false;
            }
        }

        // A zero cross product (parallel axes) projects everything to 0 and
        // never separates.
        for axis_a in axes_a {
            for axis_b in [Vec3::X, Vec3::Y, Vec3::Z] {
                if !sat_overlapping_points(axis_a.cross(axis_b), &points_a, &points_b) {
                    return false;
                }
            }
        }
        true
    }

    /// Whether the box overlaps a sphere.
    pub fn overlaps_sphere(&self, sphere: &Sphere) -> bool {
        let center = self.aabb.center();
        let local = center + self.rotation.inverse() * (sphere.center - center);
        let closest = self.aabb.closest_point(local);
        closest.distance_squared(local) <= sphere.radius * sphere.radius
    }
}

fn sat_project(axis: Vec3, points: &[Vec3; 8]) -> (f32, f32) {
    points.iter().fold((f32::MAX, f32::MIN), |(min, max), p| {
        let dist = p.dot(axis);
        (min.min(dist), max.max(dist))
    })
}

fn sat_overlapping(min1: f32, max1: f32, min2: f32, max2: f32) -> bool {
    (min1..=max1).contains(&min2) || (min2..=max2).contains(&min1)
}

fn sat_overlapping_points(axis: Vec3, a: &[Vec3; 8], b: &[Vec3; 8]) -> bool {
    let (min_a, max_a) = sat_project(axis, a);
    let (min_b, max_b) = sat_project(axis, b);
    sat_overlapping(min_a, max_a, min_b, max_b)
}

// ---------------------------------------------------------------------------
// Sphere
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    #[inline]
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_sphere(self.center, self.radius)
    }

    #[inline]
    pub fn overlaps_aabb(&self, aabb: &Aabb) -> bool {
        let closest = aabb.closest_point(self.center);
        closest.distance_squared(self.center) <= self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    fn approx(a: Vec3, b: Vec3) -> bool {
        a.abs_diff_eq(b, 1e-4)
    }

    // -----------------------------------------------------------------------
    // Aabb
    // -----------------------------------------------------------------------

    #[test]
    fn aabb_canonicalize() {
        let b = Aabb::new(Vec3::new(1.0, -1.0, 3.0), Vec3::new(-1.0, 1.0, 2.0));
        assert_eq!(b.min, Vec3::new(-1.0, -1.0, 2.0));
        assert_eq!(b.max, Vec3::new(1.0, 1.0, 3.0));
        assert_eq!(b.center(), Vec3::new(0.0, 0.0, 2.5));
    }

    #[test]
    fn aabb_overlap_is_inclusive() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let touching = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        let apart = Aabb::new(Vec3::new(1.5, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(a.overlaps(&touching));
        assert!(!a.overlaps(&apart));
        assert!(a.contains_point(Vec3::splat(0.5)));
        assert!(!a.contains_point(Vec3::splat(1.5)));
    }

    // -----------------------------------------------------------------------
    // BoxRotated
    // -----------------------------------------------------------------------

    #[test]
    fn identity_rotation_bounds_match_box() {
        let b = BoxRotated::from_center(Vec3::new(2.0, 0.0, 2.0), Vec3::ONE, Quat::IDENTITY);
        let bounds = b.bounds();
        assert!(approx(bounds.min, b.aabb.min));
        assert!(approx(bounds.max, b.aabb.max));
    }

    #[test]
    fn rotated_bounds_grow() {
        let b = BoxRotated::from_center(
            Vec3::ZERO,
            Vec3::new(2.0, 2.0, 2.0),
            Quat::from_rotation_y(FRAC_PI_4),
        );
        let bounds = b.bounds();
        let half_diag = 2.0_f32.sqrt();
        assert!(approx(bounds.max, Vec3::new(half_diag, 1.0, half_diag)));
        assert!(approx(bounds.min, Vec3::new(-half_diag, -1.0, -half_diag)));
    }

    #[test]
    fn rotated_box_misses_corner_of_its_bounds() {
        // A diamond (square rotated 45 degrees) does not reach the corners of
        // its own bounding box.
        let b = BoxRotated::from_center(
            Vec3::ZERO,
            Vec3::new(2.0, 2.0, 2.0),
            Quat::from_rotation_y(FRAC_PI_4),
        );
        let corner = Aabb::from_center(Vec3::new(1.2, 0.0, 1.2), Vec3::splat(0.2));
        assert!(b.bounds().overlaps(&corner));
        assert!(!b.overlaps_aabb(&corner));

        let center = Aabb::from_center(Vec3::ZERO, Vec3::splat(0.2));
        assert!(b.overlaps_aabb(&center));

        let edge = Aabb::from_center(Vec3::new(1.3, 0.0, 0.0), Vec3::splat(0.2));
        assert!(b.overlaps_aabb(&edge));
    }

    #[test]
    fn rotated_box_separated_vertically() {
        let b = BoxRotated::from_center(
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::ONE,
            Quat::from_rotation_y(0.3),
        );
        let ground = Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        assert!(!b.overlaps_aabb(&ground));
    }

    #[test]
    fn rotated_box_sphere_overlap() {
        let b = BoxRotated::from_center(
            Vec3::ZERO,
            Vec3::new(4.0, 1.0, 1.0),
            Quat::from_rotation_y(FRAC_PI_4),
        );
        // Along the rotated long axis.
        let along = b.rotation * Vec3::new(1.8, 0.0, 0.0);
        assert!(b.overlaps_sphere(&Sphere::new(along, 0.1)));
        // Same distance along world X is outside the thin box.
        assert!(!b.overlaps_sphere(&Sphere::new(Vec3::new(1.8, 0.0, 0.0), 0.1)));
    }

    // -----------------------------------------------------------------------
    // Sphere
    // -----------------------------------------------------------------------

    #[test]
    fn sphere_aabb_overlap() {
        let s = Sphere::new(Vec3::ZERO, 1.0);
        assert_eq!(s.bounds(), Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0)));

        let near = Aabb::new(Vec3::new(0.5, -0.1, -0.1), Vec3::new(2.0, 0.1, 0.1));
        assert!(s.overlaps_aabb(&near));

        // Inside the bounds of the sphere but beyond its radius.
        let corner = Aabb::new(Vec3::splat(0.8), Vec3::splat(1.0));
        assert!(!s.overlaps_aabb(&corner));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn box_rotated_round_trip() {
        let b = BoxRotated::from_center(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::ONE,
            Quat::from_rotation_y(0.5),
        );
        let json = serde_json::to_string(&b).unwrap();
        let back: BoxRotated = serde_json::from_str(&json).unwrap();
        assert_eq!(back, b);
    }
}
