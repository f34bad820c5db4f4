//! Oriented bounding boxes
//!
//! The minimal box is searched over the principal axes of the cloud: for each
//! principal axis taken as the box height, the points are projected onto the
//! orthogonal plane and the minimum-area enclosing rectangle of their convex
//! hull is found with rotating calipers. The candidate with the smallest volume
//! wins.

use crate::point::*;
use crate::point_cloud::PointCloud;
use nalgebra::{Matrix3, SymmetricEigen, Vector2, Vector3};
use serde::{Deserialize, Serialize};

type Vec2 = Vector2<f64>;
type Vec3 = Vector3<f64>;

/// Corner index pairs forming the twelve edges of a box.
///
/// Corner `i` sits at `+extent/2` along axis `k` when bit `k` of `i` is set.
pub const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1), (2, 3), (4, 5), (6, 7),
    (0, 2), (1, 3), (4, 6), (5, 7),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

/// A box with arbitrary orientation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientedBoundingBox {
    pub center: Point3f,
    /// Columns are the box axes, forming a right-handed orthonormal basis
    pub rotation: Matrix3<f32>,
    /// Full side lengths along each box axis
    pub extent: Vector3f,
}

impl OrientedBoundingBox {
    /// Degenerate box collapsed onto a single point
    pub fn at_point(center: Point3f) -> Self {
        Self {
            center,
            rotation: Matrix3::identity(),
            extent: Vector3f::zeros(),
        }
    }

    /// Compute the minimal oriented bounding box of a set of points
    pub fn minimal(points: &[Point3f]) -> Self {
        if points.is_empty() {
            return Self::at_point(Point3f::origin());
        }
        if points.len() == 1 {
            return Self::at_point(points[0]);
        }

        let pts: Vec<Vec3> = points
            .iter()
            .map(|p| Vec3::new(p.x as f64, p.y as f64, p.z as f64))
            .collect();
        let axes = principal_axes(&pts);

        let mut best = fit_to_axes(&pts, axes.column(0).into_owned(), axes.column(1).into_owned());
        for k in 0..3 {
            let u: Vec3 = axes.column((k + 1) % 3).into_owned();
            let v: Vec3 = axes.column((k + 2) % 3).into_owned();
            let planar: Vec<Vec2> = pts.iter().map(|p| Vec2::new(p.dot(&u), p.dot(&v))).collect();

            let direction = min_area_direction(&convex_hull(planar));
            let a = (u * direction.x + v * direction.y).normalize();
            let b = (u * -direction.y + v * direction.x).normalize();

            let candidate = fit_to_axes(&pts, a, b);
            if candidate.volume < best.volume {
                best = candidate;
            }
        }
        best.into_box()
    }

    /// Box volume
    pub fn volume(&self) -> f32 {
        self.extent.x * self.extent.y * self.extent.z
    }

    /// The eight corners, see [`BOX_EDGES`] for their ordering
    pub fn corners(&self) -> [Point3f; 8] {
        let half = self.extent * 0.5;
        std::array::from_fn(|i| {
            let local = Vector3f::new(
                if i & 1 != 0 { half.x } else { -half.x },
                if i & 2 != 0 { half.y } else { -half.y },
                if i & 4 != 0 { half.z } else { -half.z },
            );
            self.center + self.rotation * local
        })
    }

    /// Line segments outlining the box
    pub fn edges(&self) -> Vec<(Point3f, Point3f)> {
        let corners = self.corners();
        BOX_EDGES.iter().map(|&(a, b)| (corners[a], corners[b])).collect()
    }

    /// Whether `point` lies inside the box, allowing `tolerance` on every side
    pub fn contains(&self, point: &Point3f, tolerance: f32) -> bool {
        let local = self.rotation.transpose() * (point - self.center);
        let half = self.extent * 0.5;
        (0..3).all(|k| local[k].abs() <= half[k] + tolerance)
    }
}

impl<T: Positioned> PointCloud<T> {
    /// Minimal oriented bounding box of the cloud
    pub fn minimal_oriented_bounding_box(&self) -> OrientedBoundingBox {
        OrientedBoundingBox::minimal(&self.positions())
    }
}

struct Candidate {
    center: Vec3,
    axes: Matrix3<f64>,
    extent: Vec3,
    volume: f64,
}

impl Candidate {
    fn into_box(self) -> OrientedBoundingBox {
        OrientedBoundingBox {
            center: Point3f::new(self.center.x as f32, self.center.y as f32, self.center.z as f32),
            rotation: self.axes.cast::<f32>(),
            extent: self.extent.cast::<f32>(),
        }
    }
}

/// Eigenvectors of the covariance matrix, as columns
fn principal_axes(pts: &[Vec3]) -> Matrix3<f64> {
    let n = pts.len() as f64;
    let mean = pts.iter().fold(Vec3::zeros(), |acc, p| acc + p) / n;
    let covariance = pts.iter().fold(Matrix3::zeros(), |acc, p| {
        let d = p - mean;
        acc + d * d.transpose()
    }) / n;

    let eigen = SymmetricEigen::new(covariance);
    let axes = eigen.eigenvectors;
    if axes.iter().all(|v| v.is_finite()) {
        axes
    } else {
        Matrix3::identity()
    }
}

/// Tight box along the orthonormal axes `a`, `b` and `a x b`
fn fit_to_axes(pts: &[Vec3], a: Vec3, b: Vec3) -> Candidate {
    let c = a.cross(&b).normalize();
    let axes = Matrix3::from_columns(&[a, b, c]);

    let mut min = Vec3::repeat(f64::INFINITY);
    let mut max = Vec3::repeat(f64::NEG_INFINITY);
    for p in pts {
        let local = axes.transpose() * p;
        min = min.inf(&local);
        max = max.sup(&local);
    }

    let extent = max - min;
    let center = axes * ((min + max) * 0.5);
    Candidate {
        center,
        axes,
        extent,
        volume: extent.x * extent.y * extent.z,
    }
}

fn cross2(o: &Vec2, a: &Vec2, b: &Vec2) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Andrew's monotone chain; returns the hull in counter-clockwise order
fn convex_hull(mut pts: Vec<Vec2>) -> Vec<Vec2> {
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }

    let mut hull: Vec<Vec2> = Vec::with_capacity(pts.len() * 2);
    for p in pts.iter() {
        while hull.len() >= 2 && cross2(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(*p);
    }
    let lower_len = hull.len() + 1;
    for p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len && cross2(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(*p);
    }
    hull.pop();
    hull
}

/// Edge direction of the minimum-area rectangle enclosing the hull
fn min_area_direction(hull: &[Vec2]) -> Vec2 {
    let mut best = Vec2::new(1.0, 0.0);
    let mut best_area = f64::INFINITY;

    for i in 0..hull.len() {
        let edge = hull[(i + 1) % hull.len()] - hull[i];
        let length = edge.norm();
        if length <= f64::EPSILON {
            continue;
        }
        let e = edge / length;
        let n = Vec2::new(-e.y, e.x);

        let (mut min_e, mut max_e, mut min_n, mut max_n) =
            (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY);
        for p in hull {
            let pe = p.dot(&e);
            let pn = p.dot(&n);
            min_e = min_e.min(pe);
            max_e = max_e.max(pe);
            min_n = min_n.min(pn);
            max_n = max_n.max(pn);
        }

        let area = (max_e - min_e) * (max_n - min_n);
        if area < best_area {
            best_area = area;
            best = e;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Rotation3;

    fn grid_box(size: [f32; 3]) -> Vec<Point3f> {
        let mut points = Vec::new();
        for i in 0..=4 {
            for j in 0..=4 {
                for k in 0..=4 {
                    points.push(Point3f::new(
                        size[0] * i as f32 / 4.0,
                        size[1] * j as f32 / 4.0,
                        size[2] * k as f32 / 4.0,
                    ));
                }
            }
        }
        points
    }

    #[test]
    fn test_axis_aligned_box() {
        let points = grid_box([4.0, 2.0, 1.0]);
        let obb = OrientedBoundingBox::minimal(&points);

        assert_relative_eq!(obb.volume(), 8.0, epsilon = 1e-3);
        assert_relative_eq!(obb.center.x, 2.0, epsilon = 1e-4);
        assert_relative_eq!(obb.center.y, 1.0, epsilon = 1e-4);
        assert_relative_eq!(obb.center.z, 0.5, epsilon = 1e-4);

        let mut sides = [obb.extent.x, obb.extent.y, obb.extent.z];
        sides.sort_by(|a, b| a.total_cmp(b));
        assert_relative_eq!(sides[0], 1.0, epsilon = 1e-4);
        assert_relative_eq!(sides[1], 2.0, epsilon = 1e-4);
        assert_relative_eq!(sides[2], 4.0, epsilon = 1e-4);
    }

    #[test]
    fn test_rotated_box_is_tighter_than_aabb() {
        let rotation = Rotation3::from_euler_angles(0.3, -0.5, 0.9);
        let points: Vec<Point3f> = grid_box([5.0, 2.0, 1.0])
            .into_iter()
            .map(|p| rotation * p + Vector3f::new(10.0, -3.0, 2.0))
            .collect();
        let obb = OrientedBoundingBox::minimal(&points);

        assert_relative_eq!(obb.volume(), 10.0, epsilon = 0.05);
        for p in &points {
            assert!(obb.contains(p, 1e-3), "point {:?} outside box", p);
        }

        let cloud = PointCloud::from_points(points);
        let (min, max) = crate::Drawable::bounding_box(&cloud);
        let aabb_volume = (max - min).iter().product::<f32>();
        assert!(obb.volume() < aabb_volume);
    }

    #[test]
    fn test_rotation_is_orthonormal_and_right_handed() {
        let points = grid_box([3.0, 1.0, 2.0]);
        let obb = OrientedBoundingBox::minimal(&points);

        let should_be_identity = obb.rotation.transpose() * obb.rotation;
        assert_relative_eq!(should_be_identity, Matrix3::identity(), epsilon = 1e-4);
        assert_relative_eq!(obb.rotation.determinant(), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_degenerate_inputs() {
        let empty = OrientedBoundingBox::minimal(&[]);
        assert_eq!(empty.volume(), 0.0);

        let single = OrientedBoundingBox::minimal(&[Point3f::new(1.0, 2.0, 3.0)]);
        assert_eq!(single.center, Point3f::new(1.0, 2.0, 3.0));

        // Collinear points give a flat box that still contains them
        let line = vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 1.0, 0.0),
            Point3f::new(2.0, 2.0, 0.0),
        ];
        let obb = OrientedBoundingBox::minimal(&line);
        assert_relative_eq!(obb.volume(), 0.0, epsilon = 1e-6);
        for p in &line {
            assert!(obb.contains(p, 1e-4));
        }
    }

    #[test]
    fn test_corners_and_edges() {
        let obb = OrientedBoundingBox {
            center: Point3f::origin(),
            rotation: Matrix3::identity(),
            extent: Vector3f::new(2.0, 4.0, 6.0),
        };

        let corners = obb.corners();
        assert_eq!(corners[0], Point3f::new(-1.0, -2.0, -3.0));
        assert_eq!(corners[7], Point3f::new(1.0, 2.0, 3.0));

        let edges = obb.edges();
        assert_eq!(edges.len(), 12);
        let total: f32 = edges.iter().map(|(a, b)| (b - a).norm()).sum();
        assert_relative_eq!(total, 4.0 * (2.0 + 4.0 + 6.0), epsilon = 1e-5);
    }
}
