//! Preference persistence for Speed Unit Changer.
//!
//! [`FilePreferenceStore`] plugs into the core's `PreferenceStore` seam.
//! Files are read whole or not at all: any unknown, missing or malformed
//! core key fails the load, and the add-on then falls back to defaults.

pub mod loader;
pub mod schema;
pub mod settings;
pub mod store;

pub use loader::{DataLoadError, Format, load_preferences, save_preferences};
pub use store::FilePreferenceStore;
