//! Startup paths and persisted view options

use pcdebug_core::{Error, Point3f, Result, Vector3f};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// SDK folder under the base directory
pub const SDK_FOLDER: &str = "PhotoneoLocalizationSDK";

/// Debug output folder under the SDK folder
pub const DEBUG_FOLDER: &str = "LOCALIZATION_DEBUG";

/// View options file under the SDK folder
pub const VIEW_OPTIONS_FILE: &str = "viewpoint.json";

/// Directories the viewer reads from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkPaths {
    pub sdk_dir: PathBuf,
    pub debug_dir: PathBuf,
}

impl SdkPaths {
    /// Join the folder names onto `base_dir`; the debug folder must exist
    pub fn resolve<P: AsRef<Path>>(base_dir: P, sdk_folder: &str, debug_folder: &str) -> Result<Self> {
        let sdk_dir = base_dir.as_ref().join(sdk_folder);
        let debug_dir = sdk_dir.join(debug_folder);

        if !debug_dir.is_dir() {
            return Err(Error::NotFound(format!("debug folder {}", debug_dir.display())));
        }
        tracing::debug!("Debug folder: {}", debug_dir.display());

        Ok(Self { sdk_dir, debug_dir })
    }

    pub fn view_options_file(&self) -> PathBuf {
        self.sdk_dir.join(VIEW_OPTIONS_FILE)
    }
}

/// Initial render settings; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
    pub background_color: Option<[f32; 3]>,
    pub point_size: Option<f32>,
    pub front: Option<[f32; 3]>,
    pub lookat: Option<[f32; 3]>,
    pub up: Option<[f32; 3]>,
    /// Fraction of the framed distance, smaller is closer
    pub zoom: Option<f32>,
}

impl ViewOptions {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Parse(format!("view options: {}", e)))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    /// Defaults when the file is missing or malformed
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(options) => {
                tracing::info!("View options from {}", path.display());
                options
            }
            Err(Error::Io(e)) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!("No view options at {}", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Ignoring view options {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn front(&self) -> Option<Vector3f> {
        self.front.map(Vector3f::from)
    }

    pub fn lookat(&self) -> Option<Point3f> {
        self.lookat.map(Point3f::from)
    }

    pub fn up(&self) -> Option<Vector3f> {
        self.up.map(Vector3f::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_requires_debug_folder() {
        let dir = tempfile::tempdir().unwrap();
        let missing = SdkPaths::resolve(dir.path(), SDK_FOLDER, DEBUG_FOLDER);
        assert!(matches!(missing, Err(Error::NotFound(_))));

        fs::create_dir_all(dir.path().join(SDK_FOLDER).join(DEBUG_FOLDER)).unwrap();
        let paths = SdkPaths::resolve(dir.path(), SDK_FOLDER, DEBUG_FOLDER).unwrap();
        assert_eq!(paths.debug_dir, dir.path().join(SDK_FOLDER).join(DEBUG_FOLDER));
        assert_eq!(paths.view_options_file(), dir.path().join(SDK_FOLDER).join(VIEW_OPTIONS_FILE));
    }

    #[test]
    fn test_partial_view_options() {
        let options = ViewOptions::from_json(r#"{ "point_size": 2.5, "front": [0, 0, -1] }"#).unwrap();
        assert_eq!(options.point_size, Some(2.5));
        assert_eq!(options.front(), Some(Vector3f::new(0.0, 0.0, -1.0)));
        assert!(options.background_color.is_none());
        assert!(options.lookat().is_none());

        assert_eq!(ViewOptions::from_json("{}").unwrap(), ViewOptions::default());
    }

    #[test]
    fn test_malformed_or_missing_view_options_fall_back() {
        assert!(matches!(ViewOptions::from_json("{ not json"), Err(Error::Parse(_))));

        let dir = tempfile::tempdir().unwrap();
        assert_eq!(ViewOptions::load_or_default(dir.path().join("absent.json")), ViewOptions::default());

        let path = dir.path().join(VIEW_OPTIONS_FILE);
        fs::write(&path, r#"{ "zoom": "close" }"#).unwrap();
        assert_eq!(ViewOptions::load_or_default(&path), ViewOptions::default());

        fs::write(&path, r#"{ "background_color": [0, 0, 0], "zoom": 0.5 }"#).unwrap();
        let options = ViewOptions::load_or_default(&path);
        assert_eq!(options.background_color, Some([0.0, 0.0, 0.0]));
        assert_eq!(options.zoom, Some(0.5));
    }
}
