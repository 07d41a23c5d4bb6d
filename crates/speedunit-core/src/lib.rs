//! Speed Unit Changer core -- unit conversion and HUD slot policy for a
//! space-flight game's speed display.
//!
//! The stock speed display shows speed in m/s and a title line naming the
//! reference frame. This crate rewrites both lines in player-selected units
//! without depending on any particular host engine: the host supplies a
//! [`host::FlightSnapshot`] each frame and a [`host::SpeedDisplay`] to write
//! into, and everything else is decided here.
//!
//! # Per-frame flow
//!
//! 1. The host calls [`addon::SpeedUnitChanger::late_update`] with the
//!    current flight state.
//! 2. The display is located lazily; until it exists, the tick does nothing.
//! 3. [`policy::DisplayUpdatePolicy`] decides the text of each slot.
//! 4. The resulting [`policy::DisplayFrame`] is written to the display.
//!
//! # Key Types
//!
//! - [`units`] -- The unit table and `convert_speed` / `convert_distance` /
//!   `convert_apsis`.
//! - [`prefs::UserPreferences`] -- Persisted player choices and the
//!   [`prefs::PreferenceStore`] seam.
//! - [`policy::DisplayUpdatePolicy`] -- Slot decisions per display mode.
//! - [`toggle::WindowToggle`] -- Shared open/closed flag between the
//!   toolbar button and the add-on.
//! - [`panel::PanelLayout`] -- Description of the configuration window.

pub mod addon;
pub mod apsis;
pub mod host;
pub mod panel;
pub mod policy;
pub mod prefs;
pub mod toggle;
pub mod toolbar;
pub mod units;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
