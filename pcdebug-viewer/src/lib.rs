//! Debug viewer for localization point clouds
//!
//! Loads a scene plus a folder of candidate items and lets an operator step
//! through them:
//! - Catalog loading with per-item annotations
//! - Item navigation against a render surface
//! - Annotation parameter statistics
//! - Interactive window with keyboard commands

pub mod camera;
pub mod catalog;
pub mod command;
pub mod config;
pub mod interactive_viewer;
pub mod logging;
pub mod navigator;
pub mod picker;
pub mod scene;
pub mod statistics;
pub mod surface;

pub use catalog::{load_catalog, Catalog, Item};
pub use command::{help_text, Command};
pub use config::{SdkPaths, ViewOptions};
pub use interactive_viewer::{InteractiveViewer, WindowSurface};
pub use navigator::{DisplayState, Flow, Navigator};
pub use picker::{DialogPicker, DirectoryPicker};
pub use scene::SceneContext;
pub use statistics::ParameterStats;
pub use surface::{Background, Geometry, GeometryKey, RecordingSurface, RenderSurface};
