//! Reading and writing the preferences file.
//!
//! The format is picked from the file extension. `settings.dat` (and
//! `.cfg`) use the flat `key = value` format the add-on has always
//! written; `.toml`, `.json` and `.ron` carry the same record through serde.

use std::path::{Path, PathBuf};

use speedunit_core::prefs::UserPreferences;

use crate::schema::PreferencesData;
use crate::settings;

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading or saving preferences.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A key appears more than once in a flat settings file.
    #[error("duplicate key '{key}' in {file}")]
    DuplicateKey { file: PathBuf, key: String },

    /// A key parsed but holds a value outside its range.
    #[error("invalid value for '{key}' in {file}: {detail}")]
    InvalidValue {
        file: PathBuf,
        key: &'static str,
        detail: String,
    },

    /// A serialization error occurred.
    #[error("could not encode {file}: {detail}")]
    Encode { file: PathBuf, detail: String },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported preference file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Flat `key = value` lines.
    Settings,
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("dat") | Some("cfg") => Ok(Format::Settings),
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// Decoding
// ===========================================================================

/// Decode preferences from file content. `file` is only used in errors.
pub fn decode_preferences(
    content: &str,
    format: Format,
    file: &Path,
) -> Result<UserPreferences, DataLoadError> {
    let parse_err = |detail: String| DataLoadError::Parse {
        file: file.to_path_buf(),
        detail,
    };

    let data: PreferencesData = match format {
        Format::Settings => settings::from_settings_str(content, file)?,
        Format::Ron => ron::from_str(content).map_err(|e| parse_err(e.to_string()))?,
        Format::Json => serde_json::from_str(content).map_err(|e| parse_err(e.to_string()))?,
        Format::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string()))?,
    };

    data.resolve(file)
}

/// Read and decode a preferences file.
pub fn load_preferences(path: &Path) -> Result<UserPreferences, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    decode_preferences(&content, format, path)
}

// ===========================================================================
// Encoding
// ===========================================================================

/// Encode preferences in the given format.
pub fn encode_preferences(
    prefs: &UserPreferences,
    format: Format,
    file: &Path,
) -> Result<String, DataLoadError> {
    let data = PreferencesData::from(prefs);
    let encode_err = |detail: String| DataLoadError::Encode {
        file: file.to_path_buf(),
        detail,
    };

    match format {
        Format::Settings => Ok(settings::to_settings_string(&data)),
        Format::Ron => ron::ser::to_string_pretty(&data, ron::ser::PrettyConfig::default())
            .map_err(|e| encode_err(e.to_string())),
        Format::Json => serde_json::to_string_pretty(&data).map_err(|e| encode_err(e.to_string())),
        Format::Toml => toml::to_string_pretty(&data).map_err(|e| encode_err(e.to_string())),
    }
}

/// Encode and write a preferences file, replacing any existing one.
pub fn save_preferences(path: &Path, prefs: &UserPreferences) -> Result<(), DataLoadError> {
    let format = detect_format(path)?;
    let content = encode_preferences(prefs, format, path)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use speedunit_core::units::{AltitudeUnit, SpeedUnit};
    use std::fs;

    /// Create a temporary directory with a unique name for test isolation.
    fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "speedunit_data_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Clean up a test directory.
    fn cleanup(dir: &Path) {
        let _ = fs::remove_dir_all(dir);
    }

    fn sample() -> UserPreferences {
        UserPreferences {
            speed_unit: SpeedUnit::Knots,
            altitude_unit: AltitudeUnit::Feet,
            show_secondary_slot: true,
            show_speed_in_orbit_mode: false,
            ..UserPreferences::default()
        }
    }

    // -----------------------------------------------------------------------
    // detect_format
    // -----------------------------------------------------------------------

    #[test]
    fn detect_format_settings() {
        assert_eq!(detect_format(Path::new("settings.dat")).unwrap(), Format::Settings);
        assert_eq!(detect_format(Path::new("settings.cfg")).unwrap(), Format::Settings);
    }

    #[test]
    fn detect_format_serde_formats() {
        assert_eq!(detect_format(Path::new("p.ron")).unwrap(), Format::Ron);
        assert_eq!(detect_format(Path::new("p.toml")).unwrap(), Format::Toml);
        assert_eq!(detect_format(Path::new("p.json")).unwrap(), Format::Json);
    }

    #[test]
    fn detect_format_unsupported() {
        assert!(matches!(
            detect_format(Path::new("settings.xml")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
        assert!(detect_format(Path::new("settings")).is_err());
    }

    // -----------------------------------------------------------------------
    // decode
    // -----------------------------------------------------------------------

    #[test]
    fn decode_original_settings_file() {
        let content = concat!(
            "unit = 3\nalt = True\nx = 120\ny = 80\naltunit = 4\n",
            "changeThreshold = 250\nsSpeed = False\n",
        );
        let prefs =
            decode_preferences(content, Format::Settings, Path::new("settings.dat")).unwrap();
        assert_eq!(prefs.speed_unit, SpeedUnit::Knots);
        assert_eq!(prefs.altitude_unit, AltitudeUnit::Feet);
        assert!(prefs.show_secondary_slot);
        assert!(!prefs.show_speed_in_orbit_mode);
        assert_eq!(prefs.window_position.x, 120);
        assert_eq!(prefs.apsis_alternation.threshold_ticks, 250);
        assert!(!prefs.apsis_alternation.enabled);
    }

    #[test]
    fn decode_toml_and_json() {
        let toml_src = "unit = 1\nalt = false\naltunit = 2\nsSpeed = true\n";
        let from_toml = decode_preferences(toml_src, Format::Toml, Path::new("p.toml")).unwrap();
        assert_eq!(from_toml.speed_unit, SpeedUnit::KilometersPerHour);
        assert_eq!(from_toml.altitude_unit, AltitudeUnit::Miles);

        let json_src = r#"{"unit": 1, "alt": false, "altunit": 2, "sSpeed": true}"#;
        let from_json = decode_preferences(json_src, Format::Json, Path::new("p.json")).unwrap();
        assert_eq!(from_toml, from_json);
    }

    #[test]
    fn decode_rejects_unknown_key_in_any_format() {
        let json_src = r#"{"unit": 1, "alt": false, "altunit": 2, "sSpeed": true, "colour": 3}"#;
        assert!(matches!(
            decode_preferences(json_src, Format::Json, Path::new("p.json")),
            Err(DataLoadError::Parse { .. })
        ));
    }

    #[test]
    fn decode_rejects_missing_required_key() {
        let toml_src = "unit = 1\nalt = false\nsSpeed = true\n";
        assert!(decode_preferences(toml_src, Format::Toml, Path::new("p.toml")).is_err());
    }

    // -----------------------------------------------------------------------
    // files
    // -----------------------------------------------------------------------

    #[test]
    fn save_then_load_every_format() {
        let dir = make_test_dir("every_format");
        for name in ["settings.dat", "prefs.toml", "prefs.json", "prefs.ron"] {
            let path = dir.join(name);
            save_preferences(&path, &sample()).unwrap();
            assert_eq!(load_preferences(&path).unwrap(), sample(), "{name}");
        }
        cleanup(&dir);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = make_test_dir("missing");
        let err = load_preferences(&dir.join("settings.dat")).unwrap_err();
        assert!(matches!(err, DataLoadError::Io(_)));
        cleanup(&dir);
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = make_test_dir("no_parent");
        let path = dir.join("nope").join("settings.dat");
        assert!(matches!(
            save_preferences(&path, &sample()),
            Err(DataLoadError::Io(_))
        ));
        cleanup(&dir);
    }
}
