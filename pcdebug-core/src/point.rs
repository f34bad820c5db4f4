//! Point types and related functionality

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// An 8-bit RGB color
pub type Rgb = [u8; 3];

/// A point with color information
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct ColoredPoint3f {
    pub position: Point3f,
    pub color: Rgb,
}

impl ColoredPoint3f {
    pub fn new(position: Point3f, color: Rgb) -> Self {
        Self { position, color }
    }
}

impl Default for ColoredPoint3f {
    fn default() -> Self {
        Self {
            position: Point3f::origin(),
            color: [255, 255, 255],
        }
    }
}

/// Anything that has a position in space
pub trait Positioned {
    fn position(&self) -> Point3f;
}

impl Positioned for Point3f {
    fn position(&self) -> Point3f {
        *self
    }
}

impl Positioned for ColoredPoint3f {
    fn position(&self) -> Point3f {
        self.position
    }
}

/// Convert a color with components in `[0, 1]` to 8-bit RGB
pub fn rgb_from_unit(color: [f32; 3]) -> Rgb {
    color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Convert an 8-bit RGB color to components in `[0, 1]`
pub fn rgb_to_unit(color: Rgb) -> [f32; 3] {
    color.map(|c| c as f32 / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_color_conversion() {
        assert_eq!(rgb_from_unit([1.0, 0.0, 0.4]), [255, 0, 102]);
        assert_eq!(rgb_from_unit([2.0, -1.0, 0.5]), [255, 0, 128]);
        assert_eq!(rgb_to_unit([255, 0, 0]), [1.0, 0.0, 0.0]);
    }
}
