//! Render surface capability
//!
//! The navigator never talks to a renderer directly. Everything it draws goes
//! through [`RenderSurface`], keyed by [`GeometryKey`] so a surface can refuse
//! to draw the same geometry twice or remove something it never drew.

use pcdebug_core::{ColoredPointCloud3f, Error, OrientedBoundingBox, Point3f, Result, Rgb, Vector3f};
use std::collections::BTreeMap;

/// Handle of a geometry placed on a surface
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeometryKey {
    Scene,
    Boundary,
    Origin,
    Item(String),
    ItemBox(String),
}

/// Geometry payload handed to a surface
#[derive(Debug, Clone, Copy)]
pub enum Geometry<'a> {
    Cloud(&'a ColoredPointCloud3f),
    Box { bbox: &'a OrientedBoundingBox, color: Rgb },
    /// Coordinate axes drawn as red, green and blue lines
    Frame { origin: Point3f, size: f32 },
}

/// Background color of a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    #[default]
    Light,
    Dark,
}

impl Background {
    pub fn color(self) -> [f32; 3] {
        match self {
            Background::Light => [1.0, 1.0, 1.0],
            Background::Dark => [0.0, 0.0, 0.0],
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Background::Light => Background::Dark,
            Background::Dark => Background::Light,
        }
    }

    /// Classify an arbitrary color: light only when every channel is non-zero
    pub fn from_color(color: [f32; 3]) -> Self {
        if color.iter().all(|&c| c > 0.0) {
            Background::Light
        } else {
            Background::Dark
        }
    }
}

/// What the navigator needs from a rendering backend
pub trait RenderSurface {
    /// Draw `geometry` under `key`; fails with [`Error::SurfaceState`] if `key` is already drawn
    fn add_geometry(&mut self, key: GeometryKey, geometry: Geometry<'_>) -> Result<()>;

    /// Stop drawing `key`; fails with [`Error::SurfaceState`] if `key` is not drawn
    fn remove_geometry(&mut self, key: &GeometryKey) -> Result<()>;

    fn set_background(&mut self, background: Background);

    /// Point the camera at `target`, placing the eye along `front` from it
    fn look_at(&mut self, target: Point3f, front: Vector3f);

    /// Grow or shrink rendered points by `delta` pixels
    fn adjust_point_size(&mut self, delta: f32);
}

/// A call received by a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Add(GeometryKey),
    Remove(GeometryKey),
    Background(Background),
    LookAt(Point3f, Vector3f),
    PointSize(f32),
}

/// In-memory surface that records what is drawn
#[derive(Debug, Default)]
pub struct RecordingSurface {
    drawn: BTreeMap<GeometryKey, usize>,
    calls: Vec<SurfaceCall>,
    background: Background,
    point_size_delta: f32,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_drawn(&self, key: &GeometryKey) -> bool {
        self.drawn.contains_key(key)
    }

    /// Keys currently drawn, in key order
    pub fn drawn(&self) -> Vec<GeometryKey> {
        self.drawn.keys().cloned().collect()
    }

    /// Number of vertices or segments held for `key`
    pub fn primitive_count(&self, key: &GeometryKey) -> Option<usize> {
        self.drawn.get(key).copied()
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn background(&self) -> Background {
        self.background
    }

    pub fn point_size_delta(&self) -> f32 {
        self.point_size_delta
    }

    /// Most recent camera target and front direction
    pub fn camera(&self) -> Option<(Point3f, Vector3f)> {
        self.calls.iter().rev().find_map(|call| match call {
            SurfaceCall::LookAt(target, front) => Some((*target, *front)),
            _ => None,
        })
    }
}

impl RenderSurface for RecordingSurface {
    fn add_geometry(&mut self, key: GeometryKey, geometry: Geometry<'_>) -> Result<()> {
        if self.drawn.contains_key(&key) {
            return Err(Error::SurfaceState(format!("{:?} is already drawn", key)));
        }
        let primitives = match geometry {
            Geometry::Cloud(cloud) => cloud.len(),
            Geometry::Box { .. } => pcdebug_core::BOX_EDGES.len(),
            Geometry::Frame { .. } => 3,
        };
        self.calls.push(SurfaceCall::Add(key.clone()));
        self.drawn.insert(key, primitives);
        Ok(())
    }

    fn remove_geometry(&mut self, key: &GeometryKey) -> Result<()> {
        if self.drawn.remove(key).is_none() {
            return Err(Error::SurfaceState(format!("{:?} is not drawn", key)));
        }
        self.calls.push(SurfaceCall::Remove(key.clone()));
        Ok(())
    }

    fn set_background(&mut self, background: Background) {
        self.background = background;
        self.calls.push(SurfaceCall::Background(background));
    }

    fn look_at(&mut self, target: Point3f, front: Vector3f) {
        self.calls.push(SurfaceCall::LookAt(target, front));
    }

    fn adjust_point_size(&mut self, delta: f32) {
        self.point_size_delta += delta;
        self.calls.push(SurfaceCall::PointSize(delta));
    }
}
