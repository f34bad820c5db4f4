//! Item navigation
//!
//! The navigator is the only thing that changes what a [`RenderSurface`]
//! draws. Each piece of geometry it may add is guarded by a flag (the catalog's
//! `visible`, `bbox_drawn` and `edges_shown`) so it is added at most once and
//! removed only after it was added.

use crate::catalog::{load_catalog, Catalog};
use crate::command::Command;
use crate::picker::DirectoryPicker;
use crate::scene::SceneContext;
use crate::statistics::{self, ParameterStats};
use crate::surface::{Background, Geometry, GeometryKey, RenderSurface};
use pcdebug_core::{Point3f, Result, Rgb, Vector3f};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Direction from the look-at point towards the camera after a view reset
pub const RESET_FRONT: Vector3f = Vector3f::new(0.0, 0.0, -1.0);

/// Axis length of the coordinate frame drawn at the origin
pub const ORIGIN_FRAME_SIZE: f32 = 100.0;

pub const BOUNDING_BOX_COLOR: Rgb = [0, 160, 0];

/// Pixels added or removed per point size command
pub const POINT_SIZE_STEP: f32 = 1.0;

/// Display toggles independent of the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayState {
    pub bbox_shown: bool,
    pub edges_shown: bool,
    pub background: Background,
}

impl DisplayState {
    pub fn with_background(background: Background) -> Self {
        Self {
            background,
            ..Self::default()
        }
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            bbox_shown: true,
            edges_shown: false,
            background: Background::Light,
        }
    }
}

/// Whether the host loop should keep running after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Navigator {
    catalog: Catalog,
    scene: SceneContext,
    display: DisplayState,
    /// Whether the current item's box is on the surface
    bbox_drawn: bool,
    /// Where the directory picker starts
    items_root: PathBuf,
}

impl Navigator {
    pub fn new(scene: SceneContext, catalog: Catalog, items_root: impl Into<PathBuf>) -> Self {
        Self {
            catalog,
            scene,
            display: DisplayState::default(),
            bbox_drawn: false,
            items_root: items_root.into(),
        }
    }

    pub fn with_display(mut self, display: DisplayState) -> Self {
        self.display = display;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn scene(&self) -> &SceneContext {
        &self.scene
    }

    pub fn display(&self) -> DisplayState {
        self.display
    }

    /// Initial draw: scene, origin frame, the first item and the camera
    pub fn attach(&mut self, surface: &mut dyn RenderSurface) {
        surface.set_background(self.display.background);
        report(surface.add_geometry(GeometryKey::Scene, Geometry::Cloud(self.scene.scene())));
        report(surface.add_geometry(
            GeometryKey::Origin,
            Geometry::Frame {
                origin: Point3f::origin(),
                size: ORIGIN_FRAME_SIZE,
            },
        ));

        if self.display.edges_shown {
            self.display.edges_shown = false;
            self.show_edges(surface);
        }

        self.show_current(surface);
        self.log_current();
        self.reset_view(surface);
    }

    /// Run one command against `surface`
    pub fn dispatch(
        &mut self,
        command: Command,
        surface: &mut dyn RenderSurface,
        picker: &mut dyn DirectoryPicker,
    ) -> Flow {
        tracing::debug!("Command {:?}", command);
        match command {
            Command::NextItem => self.select_next(surface),
            Command::PreviousItem => self.select_previous(surface),
            Command::ToggleVisibility => self.toggle_visibility(surface),
            Command::ToggleBoundingBox => self.toggle_bbox(surface),
            Command::ToggleEdges => self.toggle_edges(surface),
            Command::ToggleBackground => self.toggle_background(surface),
            Command::Reload => self.reload(surface, picker),
            Command::ResetView => self.reset_view(surface),
            Command::Statistics => {
                self.statistics();
            }
            Command::GrowPoints => surface.adjust_point_size(POINT_SIZE_STEP),
            Command::ShrinkPoints => surface.adjust_point_size(-POINT_SIZE_STEP),
            Command::Quit => return Flow::Exit,
        }
        Flow::Continue
    }

    pub fn select_next(&mut self, surface: &mut dyn RenderSurface) {
        self.step(surface, true);
    }

    pub fn select_previous(&mut self, surface: &mut dyn RenderSurface) {
        self.step(surface, false);
    }

    fn step(&mut self, surface: &mut dyn RenderSurface, forward: bool) {
        if self.catalog.is_empty() {
            tracing::warn!("No items loaded");
            return;
        }
        self.hide_current(surface);
        self.catalog.step(forward);
        self.show_current(surface);
        self.log_current();
    }

    pub fn toggle_visibility(&mut self, surface: &mut dyn RenderSurface) {
        if self.catalog.is_empty() {
            tracing::warn!("No items loaded");
            return;
        }
        if self.catalog.is_visible() {
            self.hide_current(surface);
        } else {
            self.show_current(surface);
        }
        self.log_current();
    }

    /// Flip the box flag; a hidden item picks it up when shown again
    pub fn toggle_bbox(&mut self, surface: &mut dyn RenderSurface) {
        self.display.bbox_shown = !self.display.bbox_shown;
        tracing::info!("Bounding box {}", on_off(self.display.bbox_shown));

        if self.catalog.is_visible() {
            self.hide_current(surface);
            self.show_current(surface);
            self.log_current();
        }
    }

    pub fn toggle_edges(&mut self, surface: &mut dyn RenderSurface) {
        if self.display.edges_shown {
            self.hide_edges(surface);
        } else {
            self.show_edges(surface);
        }
    }

    fn show_edges(&mut self, surface: &mut dyn RenderSurface) {
        let Some(boundary) = self.scene.boundary() else {
            tracing::warn!("No boundary geometry loaded");
            return;
        };
        if !self.display.edges_shown {
            report(surface.add_geometry(GeometryKey::Boundary, Geometry::Cloud(boundary)));
            self.display.edges_shown = true;
        }
    }

    fn hide_edges(&mut self, surface: &mut dyn RenderSurface) {
        if self.scene.boundary().is_some() && self.display.edges_shown {
            report(surface.remove_geometry(&GeometryKey::Boundary));
            self.display.edges_shown = false;
        }
    }

    pub fn toggle_background(&mut self, surface: &mut dyn RenderSurface) {
        self.display.background = self.display.background.toggled();
        surface.set_background(self.display.background);
    }

    /// Look at the scene centroid along [`RESET_FRONT`]
    pub fn reset_view(&mut self, surface: &mut dyn RenderSurface) {
        surface.look_at(self.scene.center(), RESET_FRONT);
    }

    /// Replace the catalog with one loaded from a picked directory
    ///
    /// A cancelled pick changes nothing. A failed load leaves an empty catalog.
    pub fn reload(&mut self, surface: &mut dyn RenderSurface, picker: &mut dyn DirectoryPicker) {
        let Some(directory) = picker.pick_directory(&self.items_root) else {
            tracing::warn!("No path selected");
            return;
        };

        self.hide_current(surface);

        let catalog = match load_catalog(&directory) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::error!("Could not load items from {}: {}", directory.display(), e);
                Catalog::default()
            }
        };
        self.catalog = catalog;
        self.show_current(surface);
        self.log_current();
    }

    /// Compute and log annotation statistics over the catalog
    pub fn statistics(&self) -> BTreeMap<String, ParameterStats> {
        tracing::info!("Computing statistics...");
        let stats = statistics::compute(&self.catalog);
        statistics::report(&stats);
        stats
    }

    fn show_current(&mut self, surface: &mut dyn RenderSurface) {
        if self.catalog.is_visible() {
            return;
        }
        let Some(item) = self.catalog.current() else {
            return;
        };

        report(surface.add_geometry(GeometryKey::Item(item.id.clone()), Geometry::Cloud(&item.geometry)));
        if self.display.bbox_shown {
            report(surface.add_geometry(
                GeometryKey::ItemBox(item.id.clone()),
                Geometry::Box {
                    bbox: &item.bounding_box,
                    color: BOUNDING_BOX_COLOR,
                },
            ));
            self.bbox_drawn = true;
        }
        self.catalog.set_visible(true);
    }

    fn hide_current(&mut self, surface: &mut dyn RenderSurface) {
        if !self.catalog.is_visible() {
            return;
        }
        let Some(item) = self.catalog.current() else {
            return;
        };

        report(surface.remove_geometry(&GeometryKey::Item(item.id.clone())));
        if self.bbox_drawn {
            report(surface.remove_geometry(&GeometryKey::ItemBox(item.id.clone())));
            self.bbox_drawn = false;
        }
        self.catalog.set_visible(false);
    }

    fn log_current(&self) {
        match self.catalog.current() {
            Some(item) => tracing::info!(
                "{}::{} ({}): \n{}",
                self.catalog.cursor(),
                item.id,
                if self.catalog.is_visible() { "shown" } else { "hidden" },
                item.annotation_text
            ),
            None => tracing::warn!("No items loaded"),
        }
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

/// Surface refusals are logged and otherwise ignored
fn report(result: Result<()>) {
    if let Err(e) = result {
        tracing::warn!("{}", e);
    }
}
