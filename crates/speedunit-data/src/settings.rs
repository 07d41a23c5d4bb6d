//! The flat `key = value` settings format.
//!
//! ```text
//! unit = 3
//! alt = True
//! altunit = 0
//! sSpeed = True
//! ```
//!
//! Lines are trimmed; blank lines and `//` comments are skipped. Values
//! are typed loosely (integer, then case-insensitive boolean, else
//! string) into a TOML table, which is then deserialized into
//! [`PreferencesData`] so that the same field checks apply as for the
//! serde formats. Booleans are written `True`/`False`, the spelling older
//! files use.

use std::fmt::Write as _;
use std::path::Path;

use crate::loader::DataLoadError;
use crate::schema::PreferencesData;

const COMMENT: &str = "//";

/// Parse a flat settings file into a table of typed values.
pub fn parse_settings(content: &str, file: &Path) -> Result<toml::Table, DataLoadError> {
    let mut table = toml::Table::new();

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(COMMENT) {
            continue;
        }

        let (key, value) = line.split_once('=').ok_or_else(|| DataLoadError::Parse {
            file: file.to_path_buf(),
            detail: format!("line {}: expected 'key = value'", index + 1),
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(DataLoadError::Parse {
                file: file.to_path_buf(),
                detail: format!("line {}: empty key", index + 1),
            });
        }
        if table.contains_key(key) {
            return Err(DataLoadError::DuplicateKey {
                file: file.to_path_buf(),
                key: key.to_string(),
            });
        }

        table.insert(key.to_string(), typed_value(value.trim()));
    }

    Ok(table)
}

fn typed_value(value: &str) -> toml::Value {
    if let Ok(i) = value.parse::<i64>() {
        toml::Value::Integer(i)
    } else if value.eq_ignore_ascii_case("true") {
        toml::Value::Boolean(true)
    } else if value.eq_ignore_ascii_case("false") {
        toml::Value::Boolean(false)
    } else {
        toml::Value::String(value.to_string())
    }
}

/// Parse and deserialize a flat settings file.
pub fn from_settings_str(content: &str, file: &Path) -> Result<PreferencesData, DataLoadError> {
    let table = parse_settings(content, file)?;
    toml::Value::Table(table)
        .try_into()
        .map_err(|e: toml::de::Error| DataLoadError::Parse {
            file: file.to_path_buf(),
            detail: e.to_string(),
        })
}

/// Write a record in the flat format, core keys first.
pub fn to_settings_string(data: &PreferencesData) -> String {
    let mut out = String::new();
    entry(&mut out, "unit", data.unit);
    entry(&mut out, "alt", flag(data.alt));
    entry(&mut out, "altunit", data.altunit);
    entry(&mut out, "sSpeed", flag(data.s_speed));
    if let Some(x) = data.x {
        entry(&mut out, "x", x);
    }
    if let Some(y) = data.y {
        entry(&mut out, "y", y);
    }
    if let Some(t) = data.change_threshold {
        entry(&mut out, "changeThreshold", t);
    }
    if let Some(a) = data.alternate_apsis {
        entry(&mut out, "alternateApsis", flag(a));
    }
    out
}

fn entry(out: &mut String, key: &str, value: impl std::fmt::Display) {
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{key} = {value}");
}

fn flag(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}
