//! On-disk preference record.
//!
//! Field names match the keys of the original `settings.dat`, so the same
//! record is read from the flat key-value format and from TOML, JSON and
//! RON. Unknown keys are rejected, and the four core keys are required;
//! either failure throws away the whole record.

use std::path::Path;

use serde::{Deserialize, Serialize};
use speedunit_core::prefs::{
    ApsisAlternation, DEFAULT_WINDOW_POSITION, UserPreferences, WindowPosition,
};
use speedunit_core::units::{AltitudeUnit, SpeedUnit};

use crate::loader::DataLoadError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreferencesData {
    /// Speed unit ordinal.
    pub unit: i64,
    /// Secondary slot enabled.
    pub alt: bool,
    /// Altitude unit ordinal.
    pub altunit: i64,
    /// Keep speed visible in orbit mode.
    #[serde(rename = "sSpeed")]
    pub s_speed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    #[serde(
        rename = "changeThreshold",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub change_threshold: Option<i64>,
    #[serde(
        rename = "alternateApsis",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub alternate_apsis: Option<bool>,
}

impl From<&UserPreferences> for PreferencesData {
    fn from(prefs: &UserPreferences) -> Self {
        Self {
            unit: prefs.speed_unit.ordinal() as i64,
            alt: prefs.show_secondary_slot,
            altunit: prefs.altitude_unit.ordinal() as i64,
            s_speed: prefs.show_speed_in_orbit_mode,
            x: Some(prefs.window_position.x),
            y: Some(prefs.window_position.y),
            change_threshold: Some(i64::from(prefs.apsis_alternation.threshold_ticks)),
            alternate_apsis: Some(prefs.apsis_alternation.enabled),
        }
    }
}

impl PreferencesData {
    /// Validate the record and build preferences from it. Optional keys
    /// that are absent take their own defaults.
    pub fn resolve(&self, file: &Path) -> Result<UserPreferences, DataLoadError> {
        let speed_unit = SpeedUnit::from_ordinal(self.unit)
            .ok_or_else(|| invalid(file, "unit", format!("no speed unit {}", self.unit)))?;
        let altitude_unit = AltitudeUnit::from_ordinal(self.altunit)
            .ok_or_else(|| invalid(file, "altunit", format!("no altitude unit {}", self.altunit)))?;

        let defaults = ApsisAlternation::default();
        let threshold_ticks = match self.change_threshold {
            None => defaults.threshold_ticks,
            Some(t) => u32::try_from(t).ok().filter(|&t| t >= 1).ok_or_else(|| {
                invalid(file, "changeThreshold", format!("{t} is not a tick count"))
            })?,
        };

        Ok(UserPreferences {
            speed_unit,
            altitude_unit,
            show_secondary_slot: self.alt,
            show_speed_in_orbit_mode: self.s_speed,
            apsis_alternation: ApsisAlternation {
                enabled: self.alternate_apsis.unwrap_or(defaults.enabled),
                threshold_ticks,
            },
            window_position: WindowPosition {
                x: self.x.unwrap_or(DEFAULT_WINDOW_POSITION.x),
                y: self.y.unwrap_or(DEFAULT_WINDOW_POSITION.y),
            },
        })
    }
}

fn invalid(file: &Path, key: &'static str, detail: String) -> DataLoadError {
    DataLoadError::InvalidValue {
        file: file.to_path_buf(),
        key,
        detail,
    }
}
