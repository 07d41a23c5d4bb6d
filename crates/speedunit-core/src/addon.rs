//! The add-on as the host sees it: start, a late update per frame, a
//! configuration window while the toolbar toggle is open, and shutdown.

use crate::host::{DisplayLocator, DisplaySlot, FlightSnapshot};
use crate::panel::{PanelEdit, PanelError, PanelLayout};
use crate::policy::{DisplayFrame, DisplayUpdatePolicy};
use crate::prefs::{PreferenceStore, UserPreferences, load_or_default, save_or_log};
use crate::toggle::WindowToggle;

pub struct SpeedUnitChanger<S: PreferenceStore, L: DisplayLocator> {
    store: S,
    prefs: UserPreferences,
    slot: DisplaySlot<L>,
    policy: DisplayUpdatePolicy,
    toggle: WindowToggle,
}

impl<S: PreferenceStore, L: DisplayLocator> SpeedUnitChanger<S, L> {
    /// Load preferences from `store` (defaults if that fails) and get
    /// ready to look for the display through `locator`.
    pub fn start(store: S, locator: L, toggle: WindowToggle) -> Self {
        let prefs = load_or_default(&store);
        Self {
            store,
            prefs,
            slot: DisplaySlot::new(locator),
            policy: DisplayUpdatePolicy::new(),
            toggle,
        }
    }

    /// Run one tick. Returns the frame that was written, or `None` while
    /// the display has not been found yet.
    pub fn late_update(&mut self, flight: &FlightSnapshot) -> Option<DisplayFrame> {
        let display = self.slot.resolve()?;
        let frame = self.policy.decide(&self.prefs, flight);
        frame.apply(display);
        Some(frame)
    }

    /// The configuration window to draw this frame, if it is open.
    pub fn config_panel(&self) -> Option<PanelLayout> {
        self.toggle
            .is_open()
            .then(|| PanelLayout::describe(&self.prefs))
    }

    pub fn apply_edit(&mut self, edit: PanelEdit) -> Result<(), PanelError> {
        self.prefs.apply_edit(edit)
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.prefs
    }

    pub fn preferences_mut(&mut self) -> &mut UserPreferences {
        &mut self.prefs
    }

    /// Save preferences. A failed save is logged and otherwise ignored.
    pub fn shutdown(self) -> bool {
        save_or_log(&self.store, &self.prefs)
    }
}
