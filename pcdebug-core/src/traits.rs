//! Core traits for pcdebug

use crate::{point::*, point_cloud::*};

/// Trait for drawable/renderable objects
pub trait Drawable {
    /// Get the axis-aligned bounding box of the object
    fn bounding_box(&self) -> (Point3f, Point3f);

    /// Get the centroid of the object
    fn center(&self) -> Point3f;
}

impl<T: Positioned> Drawable for PointCloud<T> {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        if self.is_empty() {
            return (Point3f::origin(), Point3f::origin());
        }

        let first_point = self.points[0].position();
        let mut min = first_point;
        let mut max = first_point;

        for point in &self.points {
            let p = point.position();
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);

            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        (min, max)
    }

    fn center(&self) -> Point3f {
        if self.is_empty() {
            return Point3f::origin();
        }

        // Accumulate in f64 so large scans do not lose precision
        let mut sum = [0.0f64; 3];
        for point in &self.points {
            let p = point.position();
            sum[0] += p.x as f64;
            sum[1] += p.y as f64;
            sum[2] += p.z as f64;
        }
        let n = self.len() as f64;
        Point3f::new((sum[0] / n) as f32, (sum[1] / n) as f32, (sum[2] / n) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_center_is_centroid() {
        // Centroid differs from the bounding box midpoint here
        let cloud = PointCloud::from_points(vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(4.0, 8.0, -4.0),
        ]);

        let center = cloud.center();
        assert_relative_eq!(center.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(center.y, 2.0, epsilon = 1e-6);
        assert_relative_eq!(center.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_bounding_box_of_colored_cloud() {
        let cloud = ColoredPointCloud3f::from_positions(
            vec![Point3f::new(-1.0, 2.0, 0.5), Point3f::new(3.0, -2.0, 1.5)],
            [0, 0, 0],
        );

        let (min, max) = cloud.bounding_box();
        assert_eq!(min, Point3f::new(-1.0, -2.0, 0.5));
        assert_eq!(max, Point3f::new(3.0, 2.0, 1.5));
    }

    #[test]
    fn test_empty_cloud_is_at_origin() {
        let cloud = PointCloud3f::new();
        assert_eq!(cloud.center(), Point3f::origin());
        assert_eq!(cloud.bounding_box(), (Point3f::origin(), Point3f::origin()));
    }
}
