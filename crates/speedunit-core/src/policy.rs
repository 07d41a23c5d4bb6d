//! Per-tick decision of what the two HUD slots show.
//!
//! The policy is pure decision logic: [`DisplayUpdatePolicy::decide`] turns
//! the preferences and a [`FlightSnapshot`] into a [`DisplayFrame`], and the
//! frame is written to a [`SpeedDisplay`] separately. A slot left as `None`
//! in the frame is not touched, so the host's own text stays there.
//!
//! # Slots by mode
//!
//! | Mode    | Primary                            | Secondary           |
//! |---------|------------------------------------|---------------------|
//! | Surface | converted surface speed            | `AGL: ` + altitude  |
//! | Orbit   | speed, or `Pe:` when not stacked   | `Ap:` (+ `Pe:` row) |
//! | Target  | converted target-relative speed    | `->` + target name  |
//!
//! The secondary column only applies when the secondary slot is enabled.
//! A primary slot showing speed in m/s is skipped, because the stock text
//! already says exactly that, except in orbit without a periapsis, where
//! speed is forced back in.

use std::borrow::Cow;

use crate::apsis::{Apsis, ApsisCounter};
use crate::host::{DisplayMode, FlightSnapshot, SpeedDisplay, TextSize};
use crate::prefs::UserPreferences;
use crate::units::{SpeedUnit, convert_apsis, convert_distance, convert_speed};

/// Target names longer than this are truncated.
pub const MAX_TARGET_NAME_CHARS: usize = 18;
const TRUNCATION_MARKER: &str = "...";

const AGL_PREFIX: &str = "AGL: ";
const TARGET_PREFIX: &str = "->";

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// Text for one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotText {
    pub text: String,
    pub size: TextSize,
}

impl SlotText {
    pub fn regular(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: TextSize::Regular,
        }
    }

    pub fn compact(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: TextSize::Compact,
        }
    }
}

/// The output of one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayFrame {
    pub primary: Option<SlotText>,
    pub secondary: Option<SlotText>,
}

impl DisplayFrame {
    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.secondary.is_none()
    }

    /// Write the frame. Slots without text are left alone.
    pub fn apply<D: SpeedDisplay + ?Sized>(&self, display: &mut D) {
        if let Some(slot) = &self.primary {
            display.set_primary(&slot.text, slot.size);
        }
        if let Some(slot) = &self.secondary {
            display.set_secondary(&slot.text, slot.size);
        }
    }
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Whether the primary slot may be skipped when it would only repeat the
/// stock m/s readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpeedSlot {
    SkipWhenStock,
    Forced,
}

#[derive(Debug, Default)]
pub struct DisplayUpdatePolicy {
    apsis: ApsisCounter,
}

impl DisplayUpdatePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide both slots for this tick.
    pub fn decide(&mut self, prefs: &UserPreferences, flight: &FlightSnapshot) -> DisplayFrame {
        if !prefs.show_secondary_slot {
            return DisplayFrame {
                primary: speed_text(prefs, flight, SpeedSlot::SkipWhenStock),
                secondary: None,
            };
        }

        match flight.mode {
            DisplayMode::Surface => {
                let agl = convert_distance(flight.altitude_above_ground(), prefs.altitude_unit);
                DisplayFrame {
                    primary: speed_text(prefs, flight, SpeedSlot::SkipWhenStock),
                    secondary: Some(SlotText::regular(format!("{AGL_PREFIX}{}", agl.compact()))),
                }
            }
            DisplayMode::Orbit => self.decide_orbit(prefs, flight),
            DisplayMode::Target => DisplayFrame {
                primary: speed_text(prefs, flight, SpeedSlot::SkipWhenStock),
                secondary: flight
                    .target_name
                    .as_deref()
                    .map(|name| SlotText::compact(target_text(name))),
            },
        }
    }

    fn decide_orbit(&mut self, prefs: &UserPreferences, flight: &FlightSnapshot) -> DisplayFrame {
        let apoapsis = apsis_text(Apsis::Apoapsis, flight.apoapsis);

        if !flight.has_periapsis() {
            return DisplayFrame {
                primary: speed_text(prefs, flight, SpeedSlot::Forced),
                secondary: Some(SlotText::regular(apoapsis)),
            };
        }

        let periapsis = apsis_text(Apsis::Periapsis, flight.periapsis);

        if !prefs.show_speed_in_orbit_mode {
            return DisplayFrame {
                primary: Some(SlotText::regular(periapsis)),
                secondary: Some(SlotText::regular(apoapsis)),
            };
        }

        let secondary = if prefs.apsis_alternation.enabled {
            match self.apsis.advance(prefs.apsis_alternation.threshold_ticks) {
                Apsis::Apoapsis => SlotText::regular(apoapsis),
                Apsis::Periapsis => SlotText::regular(periapsis),
            }
        } else {
            SlotText::compact(format!("{apoapsis}\n{periapsis}"))
        };

        DisplayFrame {
            primary: speed_text(prefs, flight, SpeedSlot::SkipWhenStock),
            secondary: Some(secondary),
        }
    }
}

fn speed_text(
    prefs: &UserPreferences,
    flight: &FlightSnapshot,
    slot: SpeedSlot,
) -> Option<SlotText> {
    if slot == SpeedSlot::SkipWhenStock && prefs.speed_unit == SpeedUnit::MetersPerSecond {
        return None;
    }
    let speed = flight.speed();
    let reading = convert_speed(speed.meters_per_second, prefs.speed_unit, speed.mach);
    Some(SlotText::regular(reading.to_string()))
}

fn apsis_text(apsis: Apsis, meters: f64) -> String {
    format!("{}{}", apsis.prefix(), convert_apsis(meters).compact())
}

/// Secondary-slot text for a target: `->` and the (possibly truncated) name.
pub fn target_text(name: &str) -> String {
    format!("{TARGET_PREFIX}{}", truncate_target_name(name))
}

/// Cut names longer than [`MAX_TARGET_NAME_CHARS`] down to exactly that
/// many characters, the last three being `...`. Counts characters, not
/// bytes.
pub fn truncate_target_name(name: &str) -> Cow<'_, str> {
    if name.chars().count() <= MAX_TARGET_NAME_CHARS {
        return Cow::Borrowed(name);
    }
    let keep = MAX_TARGET_NAME_CHARS - TRUNCATION_MARKER.len();
    let mut truncated: String = name.chars().take(keep).collect();
    truncated.push_str(TRUNCATION_MARKER);
    Cow::Owned(truncated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::ApsisAlternation;
    use crate::test_utils::*;
    use crate::units::AltitudeUnit;

    fn prefs(speed_unit: SpeedUnit) -> UserPreferences {
        UserPreferences {
            speed_unit,
            show_secondary_slot: true,
            ..UserPreferences::default()
        }
    }

    fn primary(frame: &DisplayFrame) -> Option<&str> {
        frame.primary.as_ref().map(|s| s.text.as_str())
    }

    fn secondary(frame: &DisplayFrame) -> Option<&str> {
        frame.secondary.as_ref().map(|s| s.text.as_str())
    }

    // -----------------------------------------------------------------------
    // Surface
    // -----------------------------------------------------------------------

    #[test]
    fn surface_converts_speed_and_shows_agl() {
        let mut policy = DisplayUpdatePolicy::new();
        let flight = surface_flight(100.0, 2_000.0, 500.0);
        let frame = policy.decide(&prefs(SpeedUnit::KilometersPerHour), &flight);

        assert_eq!(primary(&frame), Some("360.0 km/h"));
        assert_eq!(secondary(&frame), Some("AGL: 1500.000m"));
    }

    #[test]
    fn surface_mps_leaves_primary_untouched() {
        let mut policy = DisplayUpdatePolicy::new();
        let flight = surface_flight(100.0, 10.0, 0.0);
        let frame = policy.decide(&prefs(SpeedUnit::MetersPerSecond), &flight);
        assert_eq!(frame.primary, None);
        assert!(frame.secondary.is_some());
    }

    #[test]
    fn surface_high_altitude_scales_to_megameters() {
        let mut policy = DisplayUpdatePolicy::new();
        let prefs = UserPreferences {
            altitude_unit: AltitudeUnit::Meters,
            ..prefs(SpeedUnit::MetersPerSecond)
        };
        let frame = policy.decide(&prefs, &surface_flight(0.0, 12_000_000.0, 0.0));
        assert_eq!(secondary(&frame), Some("AGL: 12.000Mm"));
    }

    #[test]
    fn surface_mach_uses_simulation_mach() {
        let mut policy = DisplayUpdatePolicy::new();
        let mut flight = surface_flight(400.0, 8_000.0, 0.0);
        flight.mach = 1.234;
        let frame = policy.decide(&prefs(SpeedUnit::Mach), &flight);
        assert_eq!(primary(&frame), Some("1.23 Mach"));
    }

    #[test]
    fn secondary_disabled_only_drives_primary() {
        let mut policy = DisplayUpdatePolicy::new();
        let prefs = UserPreferences {
            speed_unit: SpeedUnit::Knots,
            ..UserPreferences::default()
        };
        for flight in [
            surface_flight(10.0, 100.0, 0.0),
            orbit_flight(2000.0, 250_000.0, 90_000.0),
            target_flight(10.0, "Station"),
        ] {
            let frame = policy.decide(&prefs, &flight);
            assert!(frame.primary.is_some());
            assert_eq!(frame.secondary, None);
        }
    }

    // -----------------------------------------------------------------------
    // Orbit
    // -----------------------------------------------------------------------

    #[test]
    fn orbit_stacks_both_apsides_under_speed() {
        let mut policy = DisplayUpdatePolicy::new();
        let frame = policy.decide(
            &prefs(SpeedUnit::KilometersPerHour),
            &orbit_flight(2_000.0, 250_000.0, 90_000.0),
        );
        assert_eq!(primary(&frame), Some("7200.0 km/h"));
        let slot = frame.secondary.unwrap();
        assert_eq!(slot.text, "Ap:250.000km\nPe:90000.000m");
        assert_eq!(slot.size, TextSize::Compact);
    }

    #[test]
    fn orbit_without_speed_moves_periapsis_to_primary() {
        let mut policy = DisplayUpdatePolicy::new();
        let prefs = UserPreferences {
            show_speed_in_orbit_mode: false,
            ..prefs(SpeedUnit::KilometersPerHour)
        };
        let frame = policy.decide(&prefs, &orbit_flight(2_000.0, 250_000.0, 120_000.0));
        assert_eq!(primary(&frame), Some("Pe:120.000km"));
        assert_eq!(secondary(&frame), Some("Ap:250.000km"));
    }

    #[test]
    fn orbit_negative_periapsis_forces_speed() {
        let mut policy = DisplayUpdatePolicy::new();
        let frame = policy.decide(
            &prefs(SpeedUnit::MetersPerSecond),
            &orbit_flight(1_234.56, 250_000.0, -500.0),
        );
        assert_eq!(secondary(&frame), Some("Ap:250.000km"));
        assert_eq!(primary(&frame), Some("1234.6 m/s"));
    }

    #[test]
    fn orbit_mach_falls_back_to_mps() {
        let mut policy = DisplayUpdatePolicy::new();
        let flight = orbit_flight(2_250.0, 250_000.0, 80_000.0);
        let frame = policy.decide(&prefs(SpeedUnit::Mach), &flight);
        assert_eq!(primary(&frame), Some("2250.0 m/s"));
    }

    #[test]
    fn orbit_alternation_flips_after_threshold() {
        let mut policy = DisplayUpdatePolicy::new();
        let prefs = UserPreferences {
            apsis_alternation: ApsisAlternation {
                enabled: true,
                threshold_ticks: 2,
            },
            ..prefs(SpeedUnit::Knots)
        };
        let flight = orbit_flight(2_000.0, 250_000.0, 90_000.0);

        let shown: Vec<String> = (0..5)
            .map(|_| policy.decide(&prefs, &flight).secondary.unwrap().text)
            .collect();
        assert_eq!(
            shown,
            [
                "Ap:250.000km",
                "Ap:250.000km",
                "Pe:90000.000m",
                "Pe:90000.000m",
                "Ap:250.000km"
            ]
        );
    }

    #[test]
    fn alternation_does_not_count_without_periapsis() {
        let mut policy = DisplayUpdatePolicy::new();
        let prefs = UserPreferences {
            apsis_alternation: ApsisAlternation {
                enabled: true,
                threshold_ticks: 2,
            },
            ..prefs(SpeedUnit::Knots)
        };
        let suborbital = orbit_flight(2_000.0, 250_000.0, -1.0);
        policy.decide(&prefs, &suborbital);
        policy.decide(&prefs, &suborbital);

        let stable = orbit_flight(2_000.0, 250_000.0, 90_000.0);
        for _ in 0..2 {
            let frame = policy.decide(&prefs, &stable);
            assert_eq!(secondary(&frame), Some("Ap:250.000km"));
        }
        let frame = policy.decide(&prefs, &stable);
        assert_eq!(secondary(&frame), Some("Pe:90000.000m"));
    }

    // -----------------------------------------------------------------------
    // Target
    // -----------------------------------------------------------------------

    #[test]
    fn target_shows_name_and_relative_speed() {
        let mut policy = DisplayUpdatePolicy::new();
        let flight = target_flight(10.0, "Kerbin Station");
        let frame = policy.decide(&prefs(SpeedUnit::FeetPerSecond), &flight);
        assert_eq!(primary(&frame), Some("32.8 ft/s"));
        let slot = frame.secondary.unwrap();
        assert_eq!(slot.text, "->Kerbin Station");
        assert_eq!(slot.size, TextSize::Compact);
    }

    #[test]
    fn target_without_name_leaves_secondary_alone() {
        let mut policy = DisplayUpdatePolicy::new();
        let mut flight = target_flight(10.0, "x");
        flight.target_name = None;
        let frame = policy.decide(&prefs(SpeedUnit::Knots), &flight);
        assert_eq!(frame.secondary, None);
    }

    #[test]
    fn long_target_name_truncated_to_eighteen() {
        let name = "Mun Orbital Refueling Depot Mk2";
        assert_eq!(name.chars().count(), 31);
        let truncated = truncate_target_name(name);
        assert_eq!(truncated.chars().count(), 18);
        assert_eq!(truncated, "Mun Orbital Ref...");
    }

    #[test]
    fn short_target_name_passes_through() {
        let name = "Eighteen chars abc";
        assert_eq!(name.len(), 18);
        assert!(matches!(truncate_target_name(name), Cow::Borrowed(_)));
        assert_eq!(target_text(name), "->Eighteen chars abc");
    }

    #[test]
    fn truncation_counts_characters() {
        let name = "Ωmega relay satellite";
        let truncated = truncate_target_name(name);
        assert_eq!(truncated.chars().count(), 18);
        assert!(truncated.starts_with("Ωmega relay sat"));
    }

    // -----------------------------------------------------------------------
    // Frame
    // -----------------------------------------------------------------------

    #[test]
    fn apply_writes_only_present_slots() {
        let display = RecordingDisplay::new();
        let mut target = display.clone();
        let frame = DisplayFrame {
            primary: None,
            secondary: Some(SlotText::regular("AGL: 1.000m")),
        };
        frame.apply(&mut target);

        assert_eq!(display.primary(), None);
        assert_eq!(display.secondary(), Some(("AGL: 1.000m".to_string(), TextSize::Regular)));
    }
}
