//! Directory selection for reloading items

use std::path::{Path, PathBuf};

/// Source of item directories; `None` means the operator cancelled
pub trait DirectoryPicker {
    fn pick_directory(&mut self, initial: &Path) -> Option<PathBuf>;
}

/// Native folder dialog
#[derive(Debug, Clone)]
pub struct DialogPicker {
    title: String,
}

impl DialogPicker {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into() }
    }
}

impl Default for DialogPicker {
    fn default() -> Self {
        Self::new("Select rejected folder")
    }
}

impl DirectoryPicker for DialogPicker {
    fn pick_directory(&mut self, initial: &Path) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title(self.title.as_str())
            .set_directory(initial)
            .pick_folder()
    }
}
