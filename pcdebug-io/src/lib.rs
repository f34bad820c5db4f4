//! I/O operations for point clouds
//!
//! Reads and writes the colored point clouds inspected by the viewer.
//! Only PLY is currently understood; other extensions are rejected with
//! [`pcdebug_core::Error::UnsupportedFormat`].

pub mod ply;

use pcdebug_core::{ColoredPointCloud3f, Result};
use std::path::Path;

/// File extension of point cloud files picked up from item folders
pub const POINT_CLOUD_EXTENSION: &str = "ply";

/// Trait for reading point clouds from files
pub trait PointCloudReader {
    fn read_point_cloud<P: AsRef<Path>>(path: P) -> Result<ColoredPointCloud3f>;
}

/// Trait for writing point clouds to files
pub trait PointCloudWriter {
    fn write_point_cloud<P: AsRef<Path>>(cloud: &ColoredPointCloud3f, path: P) -> Result<()>;
}

/// Whether `path` names a point cloud file this crate can read
pub fn is_point_cloud_file<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(POINT_CLOUD_EXTENSION))
}

/// Auto-detect format and read point cloud
pub fn read_point_cloud<P: AsRef<Path>>(path: P) -> Result<ColoredPointCloud3f> {
    let path = path.as_ref();
    if !is_point_cloud_file(path) {
        return Err(pcdebug_core::Error::UnsupportedFormat(
            format!("Unsupported point cloud format: {:?}", path.extension())
        ));
    }

    let cloud = ply::PlyReader::read_point_cloud(path)?;
    tracing::debug!("Read {} points from {}", cloud.len(), path.display());
    Ok(cloud)
}

/// Auto-detect format and write point cloud
pub fn write_point_cloud<P: AsRef<Path>>(cloud: &ColoredPointCloud3f, path: P) -> Result<()> {
    let path = path.as_ref();
    if !is_point_cloud_file(path) {
        return Err(pcdebug_core::Error::UnsupportedFormat(
            format!("Unsupported point cloud format: {:?}", path.extension())
        ));
    }
    ply::PlyWriter::write_point_cloud(cloud, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pcdebug_core::{ColoredPoint3f, Error, Point3f};

    #[test]
    fn test_ply_point_cloud_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cloud.ply");

        let cloud = ColoredPointCloud3f::from_points(vec![
            ColoredPoint3f::new(Point3f::new(0.0, 0.0, 0.0), [255, 0, 0]),
            ColoredPoint3f::new(Point3f::new(1.5, -2.0, 0.25), [0, 128, 0]),
            ColoredPoint3f::new(Point3f::new(0.0, 1.0, 3.0), [10, 20, 30]),
        ]);

        write_point_cloud(&cloud, &path).unwrap();
        let loaded = read_point_cloud(&path).unwrap();

        assert_eq!(cloud.len(), loaded.len());
        for (original, loaded) in cloud.iter().zip(loaded.iter()) {
            assert_relative_eq!(original.position.x, loaded.position.x, epsilon = 1e-6);
            assert_relative_eq!(original.position.y, loaded.position.y, epsilon = 1e-6);
            assert_relative_eq!(original.position.z, loaded.position.z, epsilon = 1e-6);
            assert_eq!(original.color, loaded.color);
        }
    }

    #[test]
    fn test_ascii_ply_without_colors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.ply");

        let ply_content = "ply
format ascii 1.0
comment written by hand
element vertex 2
property double x
property double y
property double z
end_header
1.0 2.0 3.0
-4.0 5.5 6.0
";
        std::fs::write(&path, ply_content).unwrap();

        let cloud = read_point_cloud(&path).unwrap();
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud[1].position, Point3f::new(-4.0, 5.5, 6.0));
        assert_eq!(cloud[0].color, ply::DEFAULT_POINT_COLOR);
    }

    #[test]
    fn test_float_colors_are_scaled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("float_colors.ply");

        let ply_content = "ply
format ascii 1.0
element vertex 1
property float x
property float y
property float z
property float red
property float green
property float blue
end_header
0 0 0 1.0 0.0 0.5
";
        std::fs::write(&path, ply_content).unwrap();

        let cloud = read_point_cloud(&path).unwrap();
        assert_eq!(cloud[0].color, [255, 0, 128]);
    }

    #[test]
    fn test_missing_coordinate_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ply");

        let ply_content = "ply
format ascii 1.0
element vertex 1
property float x
property float y
end_header
0 0
";
        std::fs::write(&path, ply_content).unwrap();

        assert!(matches!(read_point_cloud(&path), Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_extension_dispatch() {
        assert!(is_point_cloud_file("a/b/item_01.ply"));
        assert!(is_point_cloud_file("ITEM.PLY"));
        assert!(!is_point_cloud_file("item_01.dbg"));
        assert!(!is_point_cloud_file("item"));

        let result = read_point_cloud("scan.las");
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_point_cloud(dir.path().join("absent.ply"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
