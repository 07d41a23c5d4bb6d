//! Persisted user preferences and the store they live in.

use crate::units::{AltitudeUnit, SpeedUnit};

/// Ticks between apsis flips when alternation is on.
pub const DEFAULT_APSIS_THRESHOLD: u32 = 500;

/// Default top-left corner of the configuration window.
pub const DEFAULT_WINDOW_POSITION: WindowPosition = WindowPosition { x: 50, y: 50 };

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

/// Everything the player can configure. Loaded once when the add-on
/// starts, edited through the configuration panel, saved on shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserPreferences {
    pub speed_unit: SpeedUnit,
    pub altitude_unit: AltitudeUnit,
    /// Whether the secondary slot (altitude, apsides, target) is driven.
    pub show_secondary_slot: bool,
    /// In orbit mode, keep speed in the primary slot and stack both
    /// apsides in the secondary slot. When off, periapsis takes the
    /// primary slot.
    pub show_speed_in_orbit_mode: bool,
    pub apsis_alternation: ApsisAlternation,
    pub window_position: WindowPosition,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            speed_unit: SpeedUnit::MetersPerSecond,
            altitude_unit: AltitudeUnit::Meters,
            show_secondary_slot: false,
            show_speed_in_orbit_mode: true,
            apsis_alternation: ApsisAlternation::default(),
            window_position: DEFAULT_WINDOW_POSITION,
        }
    }
}

/// Show one apsis at a time instead of stacking both, flipping every
/// `threshold_ticks` ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApsisAlternation {
    pub enabled: bool,
    /// Always at least 1.
    pub threshold_ticks: u32,
}

impl Default for ApsisAlternation {
    fn default() -> Self {
        Self {
            enabled: false,
            threshold_ticks: DEFAULT_APSIS_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPosition {
    pub x: i32,
    pub y: i32,
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Where preferences are loaded from and saved to.
///
/// Implementations report failures; the caller decides how to recover.
/// The add-on never lets a store error reach the host.
pub trait PreferenceStore {
    type Error: std::error::Error;

    fn load(&self) -> Result<UserPreferences, Self::Error>;

    fn save(&self, prefs: &UserPreferences) -> Result<(), Self::Error>;
}

/// Load preferences, substituting the defaults on any failure.
pub fn load_or_default<S: PreferenceStore>(store: &S) -> UserPreferences {
    match store.load() {
        Ok(prefs) => prefs,
        Err(e) => {
            log::debug!("using default preferences: {e}");
            UserPreferences::default()
        }
    }
}

/// Save preferences, logging on failure. Returns whether the save worked.
pub fn save_or_log<S: PreferenceStore>(store: &S, prefs: &UserPreferences) -> bool {
    match store.save(prefs) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("could not save preferences: {e}");
            false
        }
    }
}
