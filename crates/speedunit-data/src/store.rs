//! File-backed [`PreferenceStore`].

use std::path::{Path, PathBuf};

use speedunit_core::prefs::{PreferenceStore, UserPreferences};

use crate::loader::{DataLoadError, load_preferences, save_preferences};

/// File name the add-on uses inside its install directory.
pub const SETTINGS_FILE_NAME: &str = "settings.dat";

#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `settings.dat` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SETTINGS_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferenceStore {
    type Error = DataLoadError;

    fn load(&self) -> Result<UserPreferences, DataLoadError> {
        load_preferences(&self.path)
    }

    fn save(&self, prefs: &UserPreferences) -> Result<(), DataLoadError> {
        save_preferences(&self.path, prefs)
    }
}
