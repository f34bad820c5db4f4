//! End-to-end tests for a viewing session
//!
//! These tests lay out an SDK debug folder on disk, load it the way the
//! binary does and drive the navigator against a recording surface.

use pcdebug_core::{ColoredPointCloud3f, Point3f};
use pcdebug_io::write_point_cloud;
use pcdebug_viewer::config::{DEBUG_FOLDER, SDK_FOLDER, VIEW_OPTIONS_FILE};
use pcdebug_viewer::scene::{BOUNDARY_FILE, SCENE_FILE};
use pcdebug_viewer::*;
use std::fs;
use std::path::{Path, PathBuf};

struct FixedPicker(Option<PathBuf>);

impl DirectoryPicker for FixedPicker {
    fn pick_directory(&mut self, _initial: &Path) -> Option<PathBuf> {
        self.0.take()
    }
}

/// Unit cube corners shifted by `offset`
fn cube(offset: f32) -> ColoredPointCloud3f {
    let points = (0..8).map(|i| {
        Point3f::new(
            offset + (i & 1) as f32,
            ((i >> 1) & 1) as f32,
            ((i >> 2) & 1) as f32,
        )
    });
    ColoredPointCloud3f::from_positions(points, [10, 20, 30])
}

fn write_items(dir: &Path, ids: &[&str]) {
    fs::create_dir_all(dir).unwrap();
    for (i, id) in ids.iter().enumerate() {
        write_point_cloud(&cube(i as f32 * 3.0), dir.join(format!("{}.ply", id))).unwrap();
        fs::write(
            dir.join(format!("{}.dbg", id)),
            format!("fitness: {}\nangle: {}\nnote: rejected\n", i + 1, 10 * i),
        )
        .unwrap();
    }
}

/// Base directory with scene, boundary and an items folder
fn sdk_layout() -> (tempfile::TempDir, SdkPaths, PathBuf) {
    let base = tempfile::tempdir().unwrap();
    let debug_dir = base.path().join(SDK_FOLDER).join(DEBUG_FOLDER);
    fs::create_dir_all(&debug_dir).unwrap();
    write_point_cloud(&cube(0.0), debug_dir.join(SCENE_FILE)).unwrap();
    write_point_cloud(&cube(5.0), debug_dir.join(BOUNDARY_FILE)).unwrap();

    let items = debug_dir.join("rejected");
    write_items(&items, &["c_item", "a_item", "b_item"]);

    let paths = SdkPaths::resolve(base.path(), SDK_FOLDER, DEBUG_FOLDER).unwrap();
    (base, paths, items)
}

#[test]
fn test_full_session() {
    let (_base, paths, items) = sdk_layout();

    let scene = SceneContext::load(&paths.debug_dir).unwrap();
    let catalog = load_catalog(&items).unwrap();
    let mut navigator = Navigator::new(scene, catalog, &paths.debug_dir);
    let mut surface = RecordingSurface::new();
    let mut picker = FixedPicker(None);

    navigator.attach(&mut surface);
    assert!(surface.is_drawn(&GeometryKey::Item("a_item".to_string())));
    assert!(surface.is_drawn(&GeometryKey::ItemBox("a_item".to_string())));
    assert_eq!(surface.primitive_count(&GeometryKey::Item("a_item".to_string())), Some(8));

    for key in ["l", "l", "e", "b", "k"] {
        let command = Command::from_key(key).unwrap();
        assert_eq!(navigator.dispatch(command, &mut surface, &mut picker), Flow::Continue);
    }

    assert_eq!(navigator.catalog().cursor(), 2);
    assert!(!navigator.catalog().is_visible());
    assert!(!navigator.display().bbox_shown);
    assert_eq!(
        surface.drawn(),
        vec![GeometryKey::Scene, GeometryKey::Boundary, GeometryKey::Origin]
    );

    navigator.dispatch(Command::ToggleVisibility, &mut surface, &mut picker);
    assert!(surface.is_drawn(&GeometryKey::Item("c_item".to_string())));
    assert!(!surface.is_drawn(&GeometryKey::ItemBox("c_item".to_string())));

    let stats = navigator.statistics();
    assert_eq!(stats.keys().collect::<Vec<_>>(), vec!["angle", "fitness"]);
    assert_eq!(stats["fitness"].count, 3);
    assert!((stats["fitness"].mean - 2.0).abs() < 1e-12);
    assert!((stats["angle"].max - 20.0).abs() < 1e-12);

    assert_eq!(navigator.dispatch(Command::from_key("Q").unwrap(), &mut surface, &mut picker), Flow::Exit);
}

#[test]
fn test_reload_from_picker() {
    let (base, paths, items) = sdk_layout();
    let other = base.path().join("other");
    write_items(&other, &["z_item"]);

    let scene = SceneContext::load(&paths.debug_dir).unwrap();
    let mut navigator = Navigator::new(scene, load_catalog(&items).unwrap(), &paths.debug_dir);
    let mut surface = RecordingSurface::new();
    navigator.attach(&mut surface);

    let mut picker = FixedPicker(Some(other));
    navigator.dispatch(Command::Reload, &mut surface, &mut picker);

    assert_eq!(navigator.catalog().len(), 1);
    assert_eq!(
        surface.drawn(),
        vec![
            GeometryKey::Scene,
            GeometryKey::Origin,
            GeometryKey::Item("z_item".to_string()),
            GeometryKey::ItemBox("z_item".to_string()),
        ]
    );

    // The picker is now exhausted, so a second reload is cancelled
    navigator.dispatch(Command::Reload, &mut surface, &mut picker);
    assert_eq!(navigator.catalog().len(), 1);
    assert!(navigator.catalog().is_visible());
}

#[test]
fn test_view_options_set_initial_background() {
    let (_base, paths, items) = sdk_layout();
    fs::write(paths.view_options_file(), r#"{ "background_color": [0.0, 0.0, 0.0] }"#).unwrap();
    assert!(paths.view_options_file().ends_with(VIEW_OPTIONS_FILE));

    let options = ViewOptions::load_or_default(paths.view_options_file());
    let background = options.background_color.map(Background::from_color).unwrap_or_default();

    let scene = SceneContext::load(&paths.debug_dir).unwrap();
    let mut navigator = Navigator::new(scene, load_catalog(&items).unwrap(), &paths.debug_dir)
        .with_display(DisplayState::with_background(background));
    let mut surface = RecordingSurface::new();
    navigator.attach(&mut surface);
    assert_eq!(surface.background(), Background::Dark);

    navigator.dispatch(Command::ToggleBackground, &mut surface, &mut FixedPicker(None));
    assert_eq!(surface.background(), Background::Light);
}

#[test]
fn test_missing_debug_folder_is_fatal() {
    let base = tempfile::tempdir().unwrap();
    let result = SdkPaths::resolve(base.path(), SDK_FOLDER, DEBUG_FOLDER);
    assert!(matches!(result, Err(pcdebug_core::Error::NotFound(_))));
}
