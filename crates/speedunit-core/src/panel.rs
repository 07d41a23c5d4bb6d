//! Host-independent model of the configuration window.
//!
//! The host's GUI draws a [`PanelLayout`] however it likes and reports
//! what the player changed as [`PanelEdit`]s, which are applied to the
//! preferences here.

use crate::prefs::{UserPreferences, WindowPosition};
use crate::units::{AltitudeUnit, SpeedUnit};

pub const WINDOW_TITLE: &str = "Speed Unit Changer";
pub const WINDOW_WIDTH: u32 = 185;
pub const WINDOW_HEIGHT: u32 = 380;

/// Errors from applying a panel edit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PanelError {
    #[error("no speed unit at index {0}")]
    SpeedUnitIndex(usize),

    #[error("no altitude unit at index {0}")]
    AltitudeUnitIndex(usize),
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// One row of the window, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelRow {
    Toggle {
        field: ToggleField,
        label: &'static str,
        value: bool,
    },
    Heading(&'static str),
    SelectionGrid {
        field: GridField,
        options: Vec<&'static str>,
        selected: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleField {
    ShowSecondarySlot,
    ShowSpeedInOrbitMode,
    AlternateApsis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridField {
    SpeedUnit,
    AltitudeUnit,
}

/// Everything needed to draw the window this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLayout {
    pub title: &'static str,
    pub position: WindowPosition,
    pub width: u32,
    pub height: u32,
    pub rows: Vec<PanelRow>,
}

impl PanelLayout {
    pub fn describe(prefs: &UserPreferences) -> Self {
        let rows = vec![
            PanelRow::Toggle {
                field: ToggleField::ShowSecondarySlot,
                label: "Show Altitude",
                value: prefs.show_secondary_slot,
            },
            PanelRow::Toggle {
                field: ToggleField::ShowSpeedInOrbitMode,
                label: "Show speed in orbit",
                value: prefs.show_speed_in_orbit_mode,
            },
            PanelRow::Toggle {
                field: ToggleField::AlternateApsis,
                label: "Alternate Ap/Pe",
                value: prefs.apsis_alternation.enabled,
            },
            PanelRow::Heading("Speed unit selection"),
            PanelRow::SelectionGrid {
                field: GridField::SpeedUnit,
                options: SpeedUnit::ALL.iter().map(|u| u.display_name()).collect(),
                selected: prefs.speed_unit.ordinal(),
            },
            PanelRow::Heading("Altitude unit selection"),
            PanelRow::SelectionGrid {
                field: GridField::AltitudeUnit,
                options: AltitudeUnit::ALL.iter().map(|u| u.display_name()).collect(),
                selected: prefs.altitude_unit.ordinal(),
            },
        ];

        Self {
            title: WINDOW_TITLE,
            position: prefs.window_position,
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            rows,
        }
    }
}

// ---------------------------------------------------------------------------
// Edits
// ---------------------------------------------------------------------------

/// A change made by the player in the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEdit {
    Toggle(ToggleField, bool),
    Select(GridField, usize),
    /// The window was dragged.
    Move(WindowPosition),
}

impl UserPreferences {
    /// Apply an edit. Invalid selections leave the preferences unchanged.
    pub fn apply_edit(&mut self, edit: PanelEdit) -> Result<(), PanelError> {
        match edit {
            PanelEdit::Toggle(ToggleField::ShowSecondarySlot, v) => self.show_secondary_slot = v,
            PanelEdit::Toggle(ToggleField::ShowSpeedInOrbitMode, v) => {
                self.show_speed_in_orbit_mode = v
            }
            PanelEdit::Toggle(ToggleField::AlternateApsis, v) => self.apsis_alternation.enabled = v,
            PanelEdit::Select(GridField::SpeedUnit, index) => {
                self.speed_unit = SpeedUnit::ALL
                    .get(index)
                    .copied()
                    .ok_or(PanelError::SpeedUnitIndex(index))?;
            }
            PanelEdit::Select(GridField::AltitudeUnit, index) => {
                self.altitude_unit = AltitudeUnit::ALL
                    .get(index)
                    .copied()
                    .ok_or(PanelError::AltitudeUnitIndex(index))?;
            }
            PanelEdit::Move(position) => self.window_position = position,
        }
        Ok(())
    }
}
