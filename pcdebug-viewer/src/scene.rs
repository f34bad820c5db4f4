//! Static scene geometry shown behind the items

use pcdebug_core::{ColoredPointCloud3f, Drawable, Error, Point3f, Result, Rgb};
use pcdebug_io::read_point_cloud;
use std::path::Path;

pub const SCENE_FILE: &str = "scene_surface.ply";
pub const BOUNDARY_FILE: &str = "scene_boundary.ply";

pub const SCENE_COLOR: Rgb = [102, 102, 102];
pub const BOUNDARY_COLOR: Rgb = [77, 77, 204];

/// Scene cloud plus optional boundary overlay, fixed after construction
#[derive(Debug, Clone)]
pub struct SceneContext {
    scene: ColoredPointCloud3f,
    boundary: Option<ColoredPointCloud3f>,
    center: Point3f,
}

impl SceneContext {
    /// An empty boundary cloud counts as no boundary
    pub fn new(scene: ColoredPointCloud3f, boundary: Option<ColoredPointCloud3f>) -> Self {
        let center = scene.center();
        Self {
            scene,
            boundary: boundary.filter(|cloud| !cloud.is_empty()),
            center,
        }
    }

    /// Read and paint the scene files in `debug_dir`
    pub fn load<P: AsRef<Path>>(debug_dir: P) -> Result<Self> {
        let debug_dir = debug_dir.as_ref();

        let scene_path = debug_dir.join(SCENE_FILE);
        if !scene_path.is_file() {
            return Err(Error::NotFound(format!("scene cloud {}", scene_path.display())));
        }
        let mut scene = read_point_cloud(&scene_path)?;
        scene.paint_uniform_color(SCENE_COLOR);
        tracing::info!("Scene point cloud: {} points", scene.len());

        let boundary_path = debug_dir.join(BOUNDARY_FILE);
        let boundary = if boundary_path.is_file() {
            let mut boundary = read_point_cloud(&boundary_path)?;
            boundary.paint_uniform_color(BOUNDARY_COLOR);
            tracing::info!("Boundary point cloud: {} points", boundary.len());
            Some(boundary)
        } else {
            tracing::warn!("No boundary cloud at {}", boundary_path.display());
            None
        };

        let context = Self::new(scene, boundary);
        tracing::info!("Center of scene: {:?}", context.center());
        Ok(context)
    }

    pub fn scene(&self) -> &ColoredPointCloud3f {
        &self.scene
    }

    pub fn boundary(&self) -> Option<&ColoredPointCloud3f> {
        self.boundary.as_ref()
    }

    /// Centroid of the scene cloud
    pub fn center(&self) -> Point3f {
        self.center
    }

    /// Length of the scene's axis-aligned bounding box diagonal
    pub fn extent(&self) -> f32 {
        let (min, max) = self.scene.bounding_box();
        (max - min).norm()
    }
}
