//! # pcdebug GPU
//!
//! wgpu rendering backend for the pcdebug viewer: a device context bound to a
//! winit window and a renderer that draws colored point clouds as screen-aligned
//! quads plus line segments for box outlines and overlays.

pub mod device;
pub mod renderer;

// Re-export commonly used items
pub use device::GpuContext;
pub use renderer::{PointCloudRenderer, PointVertex, RenderConfig, colored_cloud_to_vertices, segments_to_vertices};
