//! Fakes for the host seams, shared by unit and integration tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`. Every fake is
//! a cheap handle around shared state, so a test can keep one clone for
//! inspection and hand another to the code under test.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::host::{DisplayLocator, DisplayMode, FlightSnapshot, SpeedDisplay, TextSize};
use crate::prefs::{PreferenceStore, UserPreferences};
use crate::toolbar::{AppLauncher, ButtonCallback};

// ===========================================================================
// Flight snapshots
// ===========================================================================

pub fn surface_flight(speed: f64, altitude: f64, terrain_altitude: f64) -> FlightSnapshot {
    FlightSnapshot {
        mode: DisplayMode::Surface,
        surface_speed: speed,
        altitude,
        terrain_altitude,
        ..FlightSnapshot::default()
    }
}

pub fn orbit_flight(speed: f64, apoapsis: f64, periapsis: f64) -> FlightSnapshot {
    FlightSnapshot {
        mode: DisplayMode::Orbit,
        orbital_speed: speed,
        apoapsis,
        periapsis,
        ..FlightSnapshot::default()
    }
}

pub fn target_flight(speed: f64, name: &str) -> FlightSnapshot {
    FlightSnapshot {
        mode: DisplayMode::Target,
        target_speed: speed,
        target_name: Some(name.to_string()),
        ..FlightSnapshot::default()
    }
}

// ===========================================================================
// Display
// ===========================================================================

#[derive(Debug, Default)]
struct DisplayState {
    primary: Option<(String, TextSize)>,
    secondary: Option<(String, TextSize)>,
    writes: usize,
}

/// Records the last text written to each slot.
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay(Rc<RefCell<DisplayState>>);

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primary(&self) -> Option<(String, TextSize)> {
        self.0.borrow().primary.clone()
    }

    pub fn secondary(&self) -> Option<(String, TextSize)> {
        self.0.borrow().secondary.clone()
    }

    /// Total number of slot writes.
    pub fn writes(&self) -> usize {
        self.0.borrow().writes
    }
}

impl SpeedDisplay for RecordingDisplay {
    fn set_primary(&mut self, text: &str, size: TextSize) {
        let mut state = self.0.borrow_mut();
        state.primary = Some((text.to_string(), size));
        state.writes += 1;
    }

    fn set_secondary(&mut self, text: &str, size: TextSize) {
        let mut state = self.0.borrow_mut();
        state.secondary = Some((text.to_string(), size));
        state.writes += 1;
    }
}

/// Finds its display only after `misses` failed lookups.
pub struct DelayedLocator {
    display: RecordingDisplay,
    misses: u32,
    attempts: Rc<Cell<u32>>,
}

impl DelayedLocator {
    pub fn new(display: RecordingDisplay, misses: u32) -> Self {
        Self {
            display,
            misses,
            attempts: Rc::new(Cell::new(0)),
        }
    }

    /// Counter of `locate` calls, readable after the locator is moved.
    pub fn attempts_handle(&self) -> Rc<Cell<u32>> {
        Rc::clone(&self.attempts)
    }
}

impl DisplayLocator for DelayedLocator {
    type Display = RecordingDisplay;

    fn locate(&mut self) -> Option<RecordingDisplay> {
        self.attempts.set(self.attempts.get() + 1);
        if self.misses > 0 {
            self.misses -= 1;
            return None;
        }
        Some(self.display.clone())
    }
}

// ===========================================================================
// Preference store
// ===========================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemoryStoreError {
    #[error("nothing stored")]
    Empty,
    #[error("store unavailable")]
    Unavailable,
}

#[derive(Debug, Default)]
struct StoreState {
    stored: Option<UserPreferences>,
    saved: Option<UserPreferences>,
    failing: bool,
}

/// In-memory [`PreferenceStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore(Rc<RefCell<StoreState>>);

impl MemoryStore {
    /// An empty store; loading from it fails.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(prefs: UserPreferences) -> Self {
        let store = Self::new();
        store.0.borrow_mut().stored = Some(prefs);
        store
    }

    /// A store whose loads and saves always fail.
    pub fn failing() -> Self {
        let store = Self::new();
        store.0.borrow_mut().failing = true;
        store
    }

    /// The most recently saved preferences.
    pub fn saved(&self) -> Option<UserPreferences> {
        self.0.borrow().saved
    }
}

impl PreferenceStore for MemoryStore {
    type Error = MemoryStoreError;

    fn load(&self) -> Result<UserPreferences, MemoryStoreError> {
        let state = self.0.borrow();
        if state.failing {
            return Err(MemoryStoreError::Unavailable);
        }
        state.saved.or(state.stored).ok_or(MemoryStoreError::Empty)
    }

    fn save(&self, prefs: &UserPreferences) -> Result<(), MemoryStoreError> {
        let mut state = self.0.borrow_mut();
        if state.failing {
            return Err(MemoryStoreError::Unavailable);
        }
        state.saved = Some(*prefs);
        Ok(())
    }
}

// ===========================================================================
// App launcher
// ===========================================================================

struct RegisteredButton {
    id: u32,
    on_enable: ButtonCallback,
    on_disable: ButtonCallback,
}

#[derive(Default)]
struct LauncherState {
    buttons: Vec<RegisteredButton>,
    failures_left: u32,
    next_id: u32,
}

/// [`AppLauncher`] that keeps buttons in memory and lets tests click them.
#[derive(Clone, Default)]
pub struct FakeLauncher(Rc<RefCell<LauncherState>>);

impl FakeLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects the first `failures` registrations.
    pub fn failing_first(failures: u32) -> Self {
        let launcher = Self::new();
        launcher.0.borrow_mut().failures_left = failures;
        launcher
    }

    pub fn registered(&self) -> usize {
        self.0.borrow().buttons.len()
    }

    /// Switch every registered button on.
    pub fn click_on(&self) {
        for button in &self.0.borrow().buttons {
            (button.on_enable)();
        }
    }

    /// Switch every registered button off.
    pub fn click_off(&self) {
        for button in &self.0.borrow().buttons {
            (button.on_disable)();
        }
    }
}

impl AppLauncher for FakeLauncher {
    type Button = u32;
    type Error = &'static str;

    fn add_button(
        &mut self,
        on_enable: ButtonCallback,
        on_disable: ButtonCallback,
    ) -> Result<u32, &'static str> {
        let mut state = self.0.borrow_mut();
        if state.failures_left > 0 {
            state.failures_left -= 1;
            return Err("launcher not ready");
        }
        let id = state.next_id;
        state.next_id += 1;
        state.buttons.push(RegisteredButton {
            id,
            on_enable,
            on_disable,
        });
        Ok(id)
    }

    fn remove_button(&mut self, button: u32) {
        self.0.borrow_mut().buttons.retain(|b| b.id != button);
    }
}
