//! Item catalog and the directory loader that builds it

use pcdebug_core::{ColoredPointCloud3f, Error, OrientedBoundingBox, Result, Rgb};
use pcdebug_io::{is_point_cloud_file, read_point_cloud};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Color painted on every loaded item
pub const ITEM_COLOR: Rgb = [255, 0, 0];

/// Extension of the diagnostic text file next to each item cloud
pub const ANNOTATION_EXTENSION: &str = "dbg";

/// One candidate point cloud under inspection
#[derive(Debug, Clone)]
pub struct Item {
    pub id: String,
    pub geometry: ColoredPointCloud3f,
    pub bounding_box: OrientedBoundingBox,
    pub annotation_text: String,
}

impl Item {
    /// Build an item, computing its bounding box from `geometry`
    pub fn new(id: impl Into<String>, geometry: ColoredPointCloud3f, annotation_text: impl Into<String>) -> Self {
        let bounding_box = geometry.minimal_oriented_bounding_box();
        Self {
            id: id.into(),
            geometry,
            bounding_box,
            annotation_text: annotation_text.into(),
        }
    }
}

/// Ordered items plus the navigation cursor
///
/// `visible` tracks whether the item under the cursor is on a surface. A
/// freshly built catalog has drawn nothing yet.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
    cursor: usize,
    visible: bool,
}

impl Catalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            cursor: 0,
            visible: false,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Item under the cursor, `None` for an empty catalog
    pub fn current(&self) -> Option<&Item> {
        self.items.get(self.cursor)
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Move the cursor by one, wrapping in both directions
    pub(crate) fn step(&mut self, forward: bool) {
        let n = self.items.len();
        if n == 0 {
            return;
        }
        self.cursor = if forward {
            (self.cursor + 1) % n
        } else {
            (self.cursor + n - 1) % n
        };
    }
}

/// Load every point cloud in `directory` together with its annotation
///
/// Items are painted with [`ITEM_COLOR`] and sorted by id. A missing or
/// unreadable annotation yields empty text; a cloud that fails to load fails
/// the whole catalog.
pub fn load_catalog<P: AsRef<Path>>(directory: P) -> Result<Catalog> {
    let directory = directory.as_ref();
    tracing::info!("Loading point clouds from {}", directory.display());

    let entries = fs::read_dir(directory)
        .map_err(|e| Error::NotFound(format!("{}: {}", directory.display(), e)))?;

    let mut items = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && is_point_cloud_file(&path) {
            items.push(load_item(&path)?);
        }
    }
    items.sort_by(|a, b| a.id.cmp(&b.id));

    tracing::info!("Loaded {} point clouds", items.len());
    Ok(Catalog::new(items))
}

fn load_item(path: &Path) -> Result<Item> {
    let id = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| Error::InvalidData(format!("No file stem in {}", path.display())))?;

    let mut geometry = read_point_cloud(path)?;
    geometry.paint_uniform_color(ITEM_COLOR);

    let annotation_text = read_annotation(&path.with_extension(ANNOTATION_EXTENSION), &id);
    tracing::debug!("Item {}: {} points", id, geometry.len());

    Ok(Item::new(id, geometry, annotation_text))
}

fn read_annotation(path: &Path, id: &str) -> String {
    match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!("No annotation for item {} ({} missing)", id, path.display());
            String::new()
        }
        Err(e) => {
            tracing::warn!("Could not read annotation {}: {}", path.display(), e);
            String::new()
        }
    }
}
