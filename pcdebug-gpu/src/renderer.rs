use crate::device::GpuContext;
use pcdebug_core::{rgb_to_unit, ColoredPointCloud3f, Error, Point3f, Result, Rgb};
use nalgebra::Matrix4;
use bytemuck::{Pod, Zeroable};
use std::sync::Arc;
use winit::window::Window;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Vertices per point quad
const QUAD_VERTICES: u32 = 6;

/// Vertex data shared by point and line rendering
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl PointVertex {
    pub fn from_point(point: &Point3f, color: [f32; 3]) -> Self {
        Self {
            position: [point.x, point.y, point.z],
            color,
        }
    }

    /// Vertex buffer layout descriptor
    pub fn desc<'a>(step_mode: wgpu::VertexStepMode) -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointVertex>() as wgpu::BufferAddress,
            step_mode,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // Color
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Camera uniform data
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub viewport: [f32; 2],
    pub point_size: f32,
    pub _padding: f32,
}

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Point size in pixels
    pub point_size: f32,
    pub background_color: [f64; 4],
    pub enable_depth_test: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            point_size: 3.0,
            background_color: [1.0, 1.0, 1.0, 1.0],
            enable_depth_test: true,
        }
    }
}

/// Point and line renderer drawing into a window surface
pub struct PointCloudRenderer {
    pub gpu_context: GpuContext,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub point_pipeline: wgpu::RenderPipeline,
    pub line_pipeline: wgpu::RenderPipeline,
    pub camera_uniform: CameraUniform,
    pub camera_buffer: wgpu::Buffer,
    pub camera_bind_group: wgpu::BindGroup,
    pub config: RenderConfig,
    depth_view: wgpu::TextureView,
    point_buffer: Option<(wgpu::Buffer, u32)>,
    line_buffer: Option<(wgpu::Buffer, u32)>,
}

impl PointCloudRenderer {
    /// Create new renderer for `window`
    pub async fn new(window: Arc<Window>, config: RenderConfig) -> Result<Self> {
        let size = window.inner_size();
        let (gpu_context, surface) = GpuContext::for_window(window).await?;

        let surface_caps = surface.get_capabilities(&gpu_context.adapter);
        let surface_format = surface_caps.formats.iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| Error::Gpu("Surface reports no supported formats".to_string()))?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&gpu_context.device, &surface_config);

        let camera_uniform = CameraUniform {
            view_proj: Matrix4::<f32>::identity().into(),
            viewport: [surface_config.width as f32, surface_config.height as f32],
            point_size: config.point_size,
            _padding: 0.0,
        };

        let camera_buffer = gpu_context.create_buffer_init(
            "Camera Buffer",
            &[camera_uniform],
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        );

        let camera_bind_group_layout = gpu_context.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("camera_bind_group_layout"),
        });

        let camera_bind_group = gpu_context.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        let shader = gpu_context.create_shader_module(
            "Point Cloud Shader",
            include_str!("shaders/point_cloud.wgsl"),
        );

        let render_pipeline_layout = gpu_context.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Point Cloud Render Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout],
            push_constant_ranges: &[],
        });

        let build_pipeline = |label: &str, entry_point: &str, step_mode, topology| {
            gpu_context.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&render_pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point,
                    buffers: &[PointVertex::desc(step_mode)],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: "fs_main",
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_config.format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    unclipped_depth: false,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    conservative: false,
                },
                depth_stencil: if config.enable_depth_test {
                    Some(wgpu::DepthStencilState {
                        format: DEPTH_FORMAT,
                        depth_write_enabled: true,
                        depth_compare: wgpu::CompareFunction::Less,
                        stencil: wgpu::StencilState::default(),
                        bias: wgpu::DepthBiasState::default(),
                    })
                } else {
                    None
                },
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                multiview: None,
            })
        };

        let point_pipeline = build_pipeline(
            "Point Render Pipeline",
            "vs_point",
            wgpu::VertexStepMode::Instance,
            wgpu::PrimitiveTopology::TriangleList,
        );
        let line_pipeline = build_pipeline(
            "Line Render Pipeline",
            "vs_line",
            wgpu::VertexStepMode::Vertex,
            wgpu::PrimitiveTopology::LineList,
        );

        let depth_view = create_depth_view(&gpu_context.device, &surface_config);

        Ok(Self {
            gpu_context,
            surface,
            surface_config,
            point_pipeline,
            line_pipeline,
            camera_uniform,
            camera_buffer,
            camera_bind_group,
            config,
            depth_view,
            point_buffer: None,
            line_buffer: None,
        })
    }

    /// Update the combined view-projection matrix
    pub fn update_camera(&mut self, view_matrix: Matrix4<f32>, proj_matrix: Matrix4<f32>) {
        let view_proj = proj_matrix * view_matrix;
        self.camera_uniform.view_proj = view_proj.into();
        self.camera_uniform.viewport = [self.surface_config.width as f32, self.surface_config.height as f32];
        self.camera_uniform.point_size = self.config.point_size;

        self.gpu_context.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&self.camera_uniform),
        );
    }

    /// Resize renderer surface
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.surface_config.width = new_size.width;
            self.surface_config.height = new_size.height;
            self.surface.configure(&self.gpu_context.device, &self.surface_config);
            self.depth_view = create_depth_view(&self.gpu_context.device, &self.surface_config);
        }
    }

    pub fn set_background_color(&mut self, color: [f64; 3]) {
        self.config.background_color = [color[0], color[1], color[2], 1.0];
    }

    /// Replace the uploaded geometry; `lines` holds pairs of segment endpoints
    pub fn set_geometry(&mut self, points: &[PointVertex], lines: &[PointVertex]) {
        self.point_buffer = self.upload("Point Instance Buffer", points);
        self.line_buffer = self.upload("Line Vertex Buffer", lines);
    }

    fn upload(&self, label: &str, vertices: &[PointVertex]) -> Option<(wgpu::Buffer, u32)> {
        if vertices.is_empty() {
            return None;
        }
        let buffer = self.gpu_context.create_buffer_init(label, vertices, wgpu::BufferUsages::VERTEX);
        Some((buffer, vertices.len() as u32))
    }

    /// Draw the uploaded geometry
    pub fn render(&self) -> Result<()> {
        let output = self.surface.get_current_texture()
            .map_err(|e| Error::Gpu(format!("Failed to get surface texture: {:?}", e)))?;

        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.gpu_context.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Point Cloud Render Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Point Cloud Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: self.config.background_color[0],
                            g: self.config.background_color[1],
                            b: self.config.background_color[2],
                            a: self.config.background_color[3],
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: if self.config.enable_depth_test {
                    Some(wgpu::RenderPassDepthStencilAttachment {
                        view: &self.depth_view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    })
                } else {
                    None
                },
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

            if let Some((buffer, count)) = &self.point_buffer {
                render_pass.set_pipeline(&self.point_pipeline);
                render_pass.set_vertex_buffer(0, buffer.slice(..));
                render_pass.draw(0..QUAD_VERTICES, 0..*count);
            }

            if let Some((buffer, count)) = &self.line_buffer {
                render_pass.set_pipeline(&self.line_pipeline);
                render_pass.set_vertex_buffer(0, buffer.slice(..));
                render_pass.draw(0..*count, 0..1);
            }
        }

        self.gpu_context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn create_depth_view(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> wgpu::TextureView {
    let size = wgpu::Extent3d {
        width: config.width,
        height: config.height,
        depth_or_array_layers: 1,
    };

    device
        .create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        })
        .create_view(&wgpu::TextureViewDescriptor::default())
}

/// Convert a colored point cloud to render vertices
pub fn colored_cloud_to_vertices(cloud: &ColoredPointCloud3f) -> Vec<PointVertex> {
    cloud.points.iter()
        .map(|point| PointVertex::from_point(&point.position, rgb_to_unit(point.color)))
        .collect()
}

/// Convert line segments to line-list vertices of a single color
pub fn segments_to_vertices(segments: &[(Point3f, Point3f)], color: Rgb) -> Vec<PointVertex> {
    let color = rgb_to_unit(color);
    segments.iter()
        .flat_map(|(a, b)| [PointVertex::from_point(a, color), PointVertex::from_point(b, color)])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcdebug_core::ColoredPoint3f;

    #[test]
    fn test_vertex_layout_is_packed() {
        assert_eq!(std::mem::size_of::<PointVertex>(), 24);
        assert_eq!(std::mem::size_of::<CameraUniform>() % 16, 0);
    }

    #[test]
    fn test_colored_cloud_to_vertices() {
        let cloud = ColoredPointCloud3f::from_points(vec![
            ColoredPoint3f::new(Point3f::new(1.0, 2.0, 3.0), [255, 0, 0]),
        ]);
        let vertices = colored_cloud_to_vertices(&cloud);
        assert_eq!(vertices, vec![PointVertex { position: [1.0, 2.0, 3.0], color: [1.0, 0.0, 0.0] }]);
    }

    #[test]
    fn test_segments_expand_to_pairs() {
        let segments = vec![
            (Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 0.0, 0.0)),
            (Point3f::new(0.0, 0.0, 0.0), Point3f::new(0.0, 1.0, 0.0)),
        ];
        let vertices = segments_to_vertices(&segments, [0, 255, 0]);
        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[3].position, [0.0, 1.0, 0.0]);
        assert!(vertices.iter().all(|v| v.color == [0.0, 1.0, 0.0]));
    }
}
