//! Point cloud data structures and functionality

use crate::point::*;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// A generic point cloud container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointCloud<T> {
    pub points: Vec<T>,
}

/// A point cloud with 3D points
pub type PointCloud3f = PointCloud<Point3f>;

/// A point cloud with colored points
pub type ColoredPointCloud3f = PointCloud<ColoredPoint3f>;

impl<T> PointCloud<T> {
    /// Create a new empty point cloud
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
        }
    }

    /// Create a new point cloud with specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Create a point cloud from a vector of points
    pub fn from_points(points: Vec<T>) -> Self {
        Self { points }
    }

    /// Get the number of points in the cloud
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the point cloud is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Add a point to the cloud
    pub fn push(&mut self, point: T) {
        self.points.push(point);
    }

    /// Get an iterator over the points
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.points.iter()
    }
}

impl<T: Positioned> PointCloud<T> {
    /// Positions of all points, dropping any per-point attributes
    pub fn positions(&self) -> Vec<Point3f> {
        self.points.iter().map(Positioned::position).collect()
    }
}

impl PointCloud<ColoredPoint3f> {
    /// Build a colored cloud where every point has the same color
    pub fn from_positions(positions: impl IntoIterator<Item = Point3f>, color: Rgb) -> Self {
        positions
            .into_iter()
            .map(|position| ColoredPoint3f::new(position, color))
            .collect()
    }

    /// Overwrite the color of every point
    pub fn paint_uniform_color(&mut self, color: Rgb) {
        for point in &mut self.points {
            point.color = color;
        }
    }
}

impl<T> Default for PointCloud<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for PointCloud<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl<'a, T> IntoIterator for &'a PointCloud<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl<T> FromIterator<T> for PointCloud<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            points: Vec::from_iter(iter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_uniform_color() {
        let mut cloud = ColoredPointCloud3f::from_positions(
            vec![Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 2.0, 3.0)],
            [10, 20, 30],
        );
        cloud.paint_uniform_color([255, 0, 0]);

        assert_eq!(cloud.len(), 2);
        assert!(cloud.iter().all(|p| p.color == [255, 0, 0]));
        assert_eq!(cloud[1].position, Point3f::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_positions_drop_colors() {
        let cloud = ColoredPointCloud3f::from_positions(vec![Point3f::new(1.0, 1.0, 1.0)], [0, 0, 0]);
        assert_eq!(cloud.positions(), vec![Point3f::new(1.0, 1.0, 1.0)]);
    }
}
