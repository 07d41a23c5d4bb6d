//! Seams to the host game.
//!
//! The host owns the HUD widget, the flight state and the per-frame
//! callbacks. This module describes what the add-on needs from each:
//! a snapshot of flight data per tick, a two-slot text display to write
//! into, and a way to find that display once the host has built it.

// ---------------------------------------------------------------------------
// Flight data
// ---------------------------------------------------------------------------

/// Which speed the stock HUD is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Surface,
    Orbit,
    Target,
}

/// Flight state for one tick, filled in by the host. All values are SI.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlightSnapshot {
    pub mode: DisplayMode,
    pub surface_speed: f64,
    pub orbital_speed: f64,
    pub target_speed: f64,
    /// Current Mach number as computed by the simulation's atmosphere model.
    pub mach: f64,
    /// Vessel altitude above sea level.
    pub altitude: f64,
    /// Height of the terrain below the vessel. Zero or negative over water.
    pub terrain_altitude: f64,
    pub apoapsis: f64,
    /// Negative when the trajectory has no stable periapsis.
    pub periapsis: f64,
    pub target_name: Option<String>,
}

/// A speed together with the Mach number, when Mach means anything for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedSample {
    pub meters_per_second: f64,
    pub mach: Option<f64>,
}

impl FlightSnapshot {
    /// The speed matching the current display mode. Only surface-relative
    /// speed carries a Mach number.
    pub fn speed(&self) -> SpeedSample {
        match self.mode {
            DisplayMode::Surface => SpeedSample {
                meters_per_second: self.surface_speed,
                mach: Some(self.mach),
            },
            DisplayMode::Orbit => SpeedSample {
                meters_per_second: self.orbital_speed,
                mach: None,
            },
            DisplayMode::Target => SpeedSample {
                meters_per_second: self.target_speed,
                mach: None,
            },
        }
    }

    /// Altitude above ground level. Terrain at or below sea level is
    /// ignored, so over oceans this is the sea-level altitude.
    pub fn altitude_above_ground(&self) -> f64 {
        if self.terrain_altitude > 0.0 {
            self.altitude - self.terrain_altitude
        } else {
            self.altitude
        }
    }

    pub fn has_periapsis(&self) -> bool {
        self.periapsis >= 0.0
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// Font size class for a slot. The host maps these to real sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextSize {
    #[default]
    Regular,
    /// For long or multi-line secondary text.
    Compact,
}

/// The stock speed display: a primary line (normally speed) and a
/// secondary line (normally the mode title). The add-on writes into it
/// but never creates it.
pub trait SpeedDisplay {
    fn set_primary(&mut self, text: &str, size: TextSize);

    fn set_secondary(&mut self, text: &str, size: TextSize);
}

/// Finds the host's display widget. Returns `None` while the host has not
/// built it yet.
pub trait DisplayLocator {
    type Display: SpeedDisplay;

    fn locate(&mut self) -> Option<Self::Display>;
}

/// A display that is looked up lazily and then kept.
pub struct DisplaySlot<L: DisplayLocator> {
    locator: L,
    display: Option<L::Display>,
}

impl<L: DisplayLocator> DisplaySlot<L> {
    pub fn new(locator: L) -> Self {
        Self {
            locator,
            display: None,
        }
    }

    /// The display, locating it first if needed. `None` means the host
    /// has not built it yet; try again next tick.
    pub fn resolve(&mut self) -> Option<&mut L::Display> {
        if !self.is_resolved() {
            self.display = self.locator.locate();
            if self.is_resolved() {
                log::debug!("speed display found");
            }
        }
        self.display.as_mut()
    }

    pub fn is_resolved(&self) -> bool {
        self.display.is_some()
    }
}
