//! Interactive viewer window
//!
//! [`WindowSurface`] draws the navigator's geometry with the wgpu point
//! renderer, and [`InteractiveViewer`] runs the winit event loop that turns
//! key presses into [`Command`]s.

use std::collections::BTreeMap;
use std::sync::Arc;
use winit::{
    dpi::{LogicalSize, PhysicalPosition},
    event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use crate::camera::Camera;
use crate::command::Command;
use crate::config::ViewOptions;
use crate::navigator::{Flow, Navigator};
use crate::picker::DirectoryPicker;
use crate::surface::{Background, Geometry, GeometryKey, RenderSurface};
use pcdebug_core::{Error, Point3f, Result, Rgb, Vector3f};
use pcdebug_gpu::{colored_cloud_to_vertices, segments_to_vertices, PointCloudRenderer, PointVertex, RenderConfig};

const WINDOW_TITLE: &str = "Localization debug viewer";

const MIN_POINT_SIZE: f32 = 1.0;
const MAX_POINT_SIZE: f32 = 32.0;

const ORBIT_SPEED: f32 = 0.01;
const PAN_SPEED: f32 = 0.002;
const ZOOM_SPEED: f32 = 0.1;

const AXIS_COLORS: [Rgb; 3] = [[255, 0, 0], [0, 255, 0], [0, 0, 255]];

/// Vertices uploaded for one geometry key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawBatch {
    pub points: Vec<PointVertex>,
    /// Pairs of segment endpoints
    pub lines: Vec<PointVertex>,
}

impl DrawBatch {
    pub fn from_geometry(geometry: Geometry<'_>) -> Self {
        match geometry {
            Geometry::Cloud(cloud) => Self {
                points: colored_cloud_to_vertices(cloud),
                lines: Vec::new(),
            },
            Geometry::Box { bbox, color } => Self {
                points: Vec::new(),
                lines: segments_to_vertices(&bbox.edges(), color),
            },
            Geometry::Frame { origin, size } => {
                let lines = [Vector3f::x(), Vector3f::y(), Vector3f::z()]
                    .iter()
                    .zip(AXIS_COLORS)
                    .flat_map(|(axis, color)| segments_to_vertices(&[(origin, origin + axis * size)], color))
                    .collect();
                Self {
                    points: Vec::new(),
                    lines,
                }
            }
        }
    }
}

/// Render surface backed by a window
pub struct WindowSurface {
    renderer: PointCloudRenderer,
    camera: Camera,
    batches: BTreeMap<GeometryKey, DrawBatch>,
    dirty: bool,
}

impl WindowSurface {
    pub fn new(renderer: PointCloudRenderer, camera: Camera) -> Self {
        Self {
            renderer,
            camera,
            batches: BTreeMap::new(),
            dirty: true,
        }
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Apply persisted options on top of the current camera and render state
    pub fn apply_view_options(&mut self, options: &ViewOptions) {
        if let Some(color) = options.background_color {
            self.renderer.set_background_color(color.map(f64::from));
        }
        if let Some(size) = options.point_size {
            self.renderer.config.point_size = size.clamp(MIN_POINT_SIZE, MAX_POINT_SIZE);
        }
        if let Some(target) = options.lookat() {
            self.camera.target = target;
        }
        let front = options.front().unwrap_or(self.camera.front);
        let up = options.up().unwrap_or(self.camera.up);
        self.camera.orient(front, up);
        if let Some(zoom) = options.zoom {
            if zoom > 0.0 {
                self.camera.distance *= zoom;
            }
        }
    }

    pub fn resize(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        self.renderer.resize(size);
        if size.height > 0 {
            self.camera.aspect_ratio = size.width as f32 / size.height as f32;
        }
    }

    /// Upload changed geometry and draw a frame
    pub fn draw(&mut self) -> Result<()> {
        if self.dirty {
            let points: Vec<PointVertex> = self.batches.values().flat_map(|b| b.points.iter().copied()).collect();
            let lines: Vec<PointVertex> = self.batches.values().flat_map(|b| b.lines.iter().copied()).collect();
            self.renderer.set_geometry(&points, &lines);
            self.dirty = false;
        }
        self.renderer
            .update_camera(self.camera.view_matrix(), self.camera.projection_matrix());
        self.renderer.render()
    }
}

impl RenderSurface for WindowSurface {
    fn add_geometry(&mut self, key: GeometryKey, geometry: Geometry<'_>) -> Result<()> {
        if self.batches.contains_key(&key) {
            return Err(Error::SurfaceState(format!("{:?} is already drawn", key)));
        }
        self.batches.insert(key, DrawBatch::from_geometry(geometry));
        self.dirty = true;
        Ok(())
    }

    fn remove_geometry(&mut self, key: &GeometryKey) -> Result<()> {
        if self.batches.remove(key).is_none() {
            return Err(Error::SurfaceState(format!("{:?} is not drawn", key)));
        }
        self.dirty = true;
        Ok(())
    }

    fn set_background(&mut self, background: Background) {
        self.renderer.set_background_color(background.color().map(f64::from));
    }

    fn look_at(&mut self, target: Point3f, front: Vector3f) {
        self.camera.look_at(target, front);
    }

    fn adjust_point_size(&mut self, delta: f32) {
        let size = (self.renderer.config.point_size + delta).clamp(MIN_POINT_SIZE, MAX_POINT_SIZE);
        self.renderer.config.point_size = size;
        tracing::info!("Point size {}", size);
    }
}

#[derive(Debug, Default)]
struct MouseState {
    last_position: Option<PhysicalPosition<f64>>,
    left_pressed: bool,
    right_pressed: bool,
}

/// Window plus event loop around a [`Navigator`]
pub struct InteractiveViewer<P> {
    navigator: Navigator,
    picker: P,
    options: ViewOptions,
}

impl<P: DirectoryPicker + 'static> InteractiveViewer<P> {
    pub fn new(navigator: Navigator, picker: P, options: ViewOptions) -> Self {
        Self {
            navigator,
            picker,
            options,
        }
    }

    /// Open the window and block until it is closed
    pub fn run(self) -> Result<()> {
        let Self {
            mut navigator,
            mut picker,
            options,
        } = self;

        let event_loop =
            EventLoop::new().map_err(|e| Error::Visualization(format!("Failed to create event loop: {}", e)))?;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(WINDOW_TITLE)
                .with_inner_size(LogicalSize::new(1200.0, 800.0))
                .build(&event_loop)
                .map_err(|e| Error::Visualization(format!("Failed to create window: {}", e)))?,
        );

        let renderer = pollster::block_on(PointCloudRenderer::new(window.clone(), RenderConfig::default()))?;

        let mut camera = Camera::default();
        camera.frame(navigator.scene().extent() * 0.5);
        let mut surface = WindowSurface::new(renderer, camera);
        surface.resize(window.inner_size());

        navigator.attach(&mut surface);
        surface.apply_view_options(&options);
        tracing::info!("Viewer ready");

        let mut mouse = MouseState::default();

        event_loop
            .run(move |event, target| {
                target.set_control_flow(ControlFlow::Wait);

                let Event::WindowEvent { event, .. } = event else {
                    return;
                };

                match event {
                    WindowEvent::CloseRequested => target.exit(),
                    WindowEvent::Resized(size) => {
                        surface.resize(size);
                        window.request_redraw();
                    }
                    WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                        let command = match &event.logical_key {
                            Key::Named(NamedKey::Escape) => Some(Command::Quit),
                            Key::Character(c) => Command::from_key(c.as_str()),
                            _ => None,
                        };
                        if let Some(command) = command {
                            if navigator.dispatch(command, &mut surface, &mut picker) == Flow::Exit {
                                target.exit();
                            }
                            window.request_redraw();
                        }
                    }
                    WindowEvent::MouseInput { state, button, .. } => match button {
                        MouseButton::Left => mouse.left_pressed = state == ElementState::Pressed,
                        MouseButton::Right => mouse.right_pressed = state == ElementState::Pressed,
                        _ => {}
                    },
                    WindowEvent::CursorMoved { position, .. } => {
                        if let Some(last) = mouse.last_position {
                            let dx = (position.x - last.x) as f32;
                            let dy = (position.y - last.y) as f32;
                            if mouse.left_pressed {
                                surface.camera_mut().orbit(dx * ORBIT_SPEED, dy * ORBIT_SPEED);
                                window.request_redraw();
                            } else if mouse.right_pressed {
                                surface.camera_mut().pan(dx * PAN_SPEED, dy * PAN_SPEED);
                                window.request_redraw();
                            }
                        }
                        mouse.last_position = Some(position);
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        let scroll = match delta {
                            MouseScrollDelta::LineDelta(_, y) => y,
                            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                        };
                        surface.camera_mut().zoom(scroll * ZOOM_SPEED);
                        window.request_redraw();
                    }
                    WindowEvent::RedrawRequested => {
                        if let Err(e) = surface.draw() {
                            tracing::warn!("Render error: {}", e);
                        }
                    }
                    _ => {}
                }
            })
            .map_err(|e| Error::Visualization(format!("Event loop error: {}", e)))?;

        Ok(())
    }
}
