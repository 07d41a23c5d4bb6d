//! Headless HUD: fly a scripted ascent, orbit and rendezvous and print
//! what the speed display would show on each frame.
//!
//! Run with `RUST_LOG=debug` to see display discovery and preference
//! fallbacks.

use speedunit_core::addon::SpeedUnitChanger;
use speedunit_core::host::{DisplayLocator, SpeedDisplay, TextSize};
use speedunit_core::prefs::UserPreferences;
use speedunit_core::test_utils::{MemoryStore, orbit_flight, surface_flight, target_flight};
use speedunit_core::toggle::WindowToggle;
use speedunit_core::units::{AltitudeUnit, SpeedUnit};

/// Prints each write instead of drawing it.
struct StdoutDisplay;

impl SpeedDisplay for StdoutDisplay {
    fn set_primary(&mut self, text: &str, _size: TextSize) {
        println!("  primary   | {text}");
    }

    fn set_secondary(&mut self, text: &str, size: TextSize) {
        let marker = if size == TextSize::Compact { " (compact)" } else { "" };
        for line in text.lines() {
            println!("  secondary | {line}{marker}");
        }
    }
}

/// Pretends the HUD takes a couple of frames to appear.
struct SlowLocator {
    frames_until_ready: u32,
}

impl DisplayLocator for SlowLocator {
    type Display = StdoutDisplay;

    fn locate(&mut self) -> Option<StdoutDisplay> {
        if self.frames_until_ready > 0 {
            self.frames_until_ready -= 1;
            return None;
        }
        Some(StdoutDisplay)
    }
}

fn main() {
    env_logger::init();

    let prefs = UserPreferences {
        speed_unit: SpeedUnit::Mach,
        altitude_unit: AltitudeUnit::Meters,
        show_secondary_slot: true,
        ..UserPreferences::default()
    };
    let store = MemoryStore::with(prefs);
    let mut addon = SpeedUnitChanger::start(
        store.clone(),
        SlowLocator {
            frames_until_ready: 2,
        },
        WindowToggle::new(),
    );

    let script = [
        ("pad", surface_flight(0.0, 75.0, 70.0)),
        ("climb", surface_flight(180.0, 4_500.0, 60.0)),
        ("transonic", {
            let mut f = surface_flight(330.0, 11_000.0, 0.0);
            f.mach = 1.02;
            f
        }),
        ("coast", orbit_flight(2_050.0, 82_000.0, -350_000.0)),
        ("circularized", orbit_flight(2_280.0, 250_000.0, 120_000.0)),
        ("high orbit", orbit_flight(900.0, 11_400_000.0, 2_863_000.0)),
        ("rendezvous", target_flight(3.4, "Mun Orbital Refueling Depot Mk2")),
    ];

    for (frame, (label, flight)) in script.iter().enumerate() {
        println!("frame {frame}: {label}");
        match addon.late_update(flight) {
            None => println!("  (display not ready)"),
            Some(written) if written.is_empty() => println!("  (stock readout)"),
            Some(_) => {}
        }
    }

    addon.shutdown();
    if let Some(saved) = store.saved() {
        println!("saved speed unit: {}", saved.speed_unit.display_name());
    }
}
