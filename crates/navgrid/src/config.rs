//! Grid construction parameters.

use std::fmt;

use glam::Vec3;

/// Exclusive lower bound for `size` and `density`.
pub const NAV_PARAM_MIN: f32 = 1e-4;
/// Exclusive upper bound for `size` and `density`.
pub const NAV_PARAM_MAX: f32 = 1e4;
/// Upper bound for the magnitude of `center`.
pub const NAV_CENTER_MAX: f32 = 1e6;

/// Parameters of a [`NavGrid`](crate::NavGrid).
///
/// The grid is square: it covers `size × size` world units on the XZ plane
/// around `center`, with `density` cells per world unit. `height` is the
/// vertical extent of every cell, starting at `center.y`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavGridConfig {
    pub center: Vec3,
    pub size: f32,
    pub density: f32,
    pub height: f32,
}

impl Default for NavGridConfig {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            size: 100.0,
            density: 1.0,
            height: 2.0,
        }
    }
}

impl NavGridConfig {
    pub fn new(center: Vec3, size: f32, density: f32, height: f32) -> Self {
        Self {
            center,
            size,
            density,
            height,
        }
    }

    pub fn with_center(mut self, center: Vec3) -> Self {
        self.center = center;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Number of cells along each axis, `round(size * density)`.
    ///
    /// Only meaningful for a configuration that passes [`validate`](Self::validate).
    pub fn cell_count_axis(&self) -> u32 {
        (self.size * self.density).round() as u32
    }

    /// Check every parameter, returning the first violation.
    pub fn validate(&self) -> Result<(), NavConfigError> {
        let in_range = |v: f32| v > NAV_PARAM_MIN && v < NAV_PARAM_MAX;
        if !in_range(self.size) {
            return Err(NavConfigError::SizeOutOfRange(self.size));
        }
        if !in_range(self.density) {
            return Err(NavConfigError::DensityOutOfRange(self.density));
        }
        if !(self.height > NAV_PARAM_MIN) || !self.height.is_finite() {
            return Err(NavConfigError::HeightOutOfRange(self.height));
        }
        if !self.center.is_finite() || self.center.abs().max_element() >= NAV_CENTER_MAX {
            return Err(NavConfigError::CenterOutOfRange(self.center));
        }
        let axis = (self.size * self.density).round();
        if axis < 1.0 {
            return Err(NavConfigError::EmptyGrid {
                size: self.size,
                density: self.density,
            });
        }
        if axis > f32::from(u16::MAX) {
            return Err(NavConfigError::TooManyCells { axis: axis as u32 });
        }
        Ok(())
    }
}

/// Errors reported for an invalid [`NavGridConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum NavConfigError {
    /// `size` is not within `(1e-4, 1e4)`.
    SizeOutOfRange(f32),
    /// `density` is not within `(1e-4, 1e4)`.
    DensityOutOfRange(f32),
    /// `height` is not above `1e-4`.
    HeightOutOfRange(f32),
    /// `center` is not finite or too far from the origin.
    CenterOutOfRange(Vec3),
    /// `size * density` rounds to zero cells.
    EmptyGrid { size: f32, density: f32 },
    /// The cell count per axis does not fit a cell coordinate.
    TooManyCells { axis: u32 },
}

impl fmt::Display for NavConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeOutOfRange(v) => {
                write!(f, "nav grid: size {v} outside ({NAV_PARAM_MIN}, {NAV_PARAM_MAX})")
            }
            Self::DensityOutOfRange(v) => {
                write!(f, "nav grid: density {v} outside ({NAV_PARAM_MIN}, {NAV_PARAM_MAX})")
            }
            Self::HeightOutOfRange(v) => {
                write!(f, "nav grid: height {v} must be above {NAV_PARAM_MIN}")
            }
            Self::CenterOutOfRange(c) => {
                write!(f, "nav grid: center {c} must be finite and within {NAV_CENTER_MAX}")
            }
            Self::EmptyGrid { size, density } => {
                write!(f, "nav grid: size {size} at density {density} has no cells")
            }
            Self::TooManyCells { axis } => {
                write!(f, "nav grid: {axis} cells per axis exceeds {}", u16::MAX)
            }
        }
    }
}

impl std::error::Error for NavConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = NavGridConfig::default();
        assert_eq!(cfg.validate(), Ok(()));
        assert_eq!(cfg.cell_count_axis(), 100);
    }

    #[test]
    fn cell_count_rounds() {
        let cfg = NavGridConfig::default().with_size(10.4).with_density(2.0);
        assert_eq!(cfg.cell_count_axis(), 21);
        let cfg = NavGridConfig::default().with_size(10.0).with_density(1.0);
        assert_eq!(cfg.cell_count_axis(), 10);
    }

    #[test]
    fn rejects_out_of_range() {
        let base = NavGridConfig::default();
        assert_eq!(
            base.with_size(0.0).validate(),
            Err(NavConfigError::SizeOutOfRange(0.0))
        );
        assert_eq!(
            base.with_size(1e4).validate(),
            Err(NavConfigError::SizeOutOfRange(1e4))
        );
        assert!(matches!(
            base.with_density(f32::NAN).validate(),
            Err(NavConfigError::DensityOutOfRange(_))
        ));
        assert_eq!(
            base.with_height(0.0).validate(),
            Err(NavConfigError::HeightOutOfRange(0.0))
        );
        assert!(matches!(
            base.with_center(Vec3::new(0.0, f32::INFINITY, 0.0)).validate(),
            Err(NavConfigError::CenterOutOfRange(_))
        ));
        assert!(matches!(
            base.with_center(Vec3::new(2e6, 0.0, 0.0)).validate(),
            Err(NavConfigError::CenterOutOfRange(_))
        ));
    }

    #[test]
    fn rejects_bad_cell_counts() {
        let tiny = NavGridConfig::default().with_size(0.1).with_density(1.0);
        assert!(matches!(tiny.validate(), Err(NavConfigError::EmptyGrid { .. })));

        let huge = NavGridConfig::default().with_size(9000.0).with_density(9000.0);
        assert!(matches!(huge.validate(), Err(NavConfigError::TooManyCells { .. })));
    }

    #[test]
    fn error_display() {
        let e = NavConfigError::TooManyCells { axis: 70000 };
        assert_eq!(e.to_string(), "nav grid: 70000 cells per axis exceeds 65535");
        let boxed: Box<dyn std::error::Error> = Box::new(NavConfigError::SizeOutOfRange(-1.0));
        assert!(boxed.to_string().contains("size -1"));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let cfg = NavGridConfig::new(Vec3::new(1.0, 2.0, 3.0), 50.0, 2.0, 1.5);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: NavGridConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
