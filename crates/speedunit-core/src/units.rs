//! Unit table and conversion routines.
//!
//! Every selectable unit is described by one row of data: how to get from
//! the SI value to the unit, how many decimals to print, the label, and
//! (for distances) which auto-scale ladder applies. A single generic routine
//! per quantity walks that table, so adding a unit means adding a row.
//!
//! All inputs are SI: meters per second for speeds, meters for distances.

use std::fmt;

// ---------------------------------------------------------------------------
// Conversion factors
// ---------------------------------------------------------------------------

pub const KMH_PER_MPS: f64 = 3.6;
pub const MPH_PER_MPS: f64 = 2.23693629;
pub const KNOTS_PER_MPS: f64 = 1.94384449;
pub const FEET_PER_METER: f64 = 3.2808399;
pub const METERS_PER_KILOMETER: f64 = 1000.0;
pub const METERS_PER_MILE: f64 = 1609.344;
pub const METERS_PER_NAUTICAL_MILE: f64 = 1852.0;
pub const METERS_PER_MEGAMETER: f64 = 1_000_000.0;

/// Raw meter values strictly above this are shown in kilometers.
pub const KILOMETER_THRESHOLD: f64 = 100_000.0;
/// Raw meter values strictly above this are shown in megameters.
pub const MEGAMETER_THRESHOLD: f64 = 10_000_000.0;

const SPEED_DECIMALS: usize = 1;
const MACH_DECIMALS: usize = 2;
const DISTANCE_DECIMALS: usize = 3;

// ---------------------------------------------------------------------------
// Formatted reading
// ---------------------------------------------------------------------------

/// A value ready for the HUD: magnitude already rounded and printed, plus
/// the label of the unit it ended up in (which may differ from the
/// selected unit after auto-scaling or the Mach fallback).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedReading {
    pub magnitude: String,
    pub unit_label: &'static str,
}

impl FormattedReading {
    fn new(value: f64, decimals: usize, unit_label: &'static str) -> Self {
        Self {
            magnitude: format!("{value:.decimals$}"),
            unit_label,
        }
    }

    /// Magnitude and label with no separator, e.g. `250.000km`.
    /// Used for the space-constrained distance readouts.
    pub fn compact(&self) -> String {
        format!("{}{}", self.magnitude, self.unit_label)
    }
}

/// Prints `magnitude label`, e.g. `123.4 km/h`.
impl fmt::Display for FormattedReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.magnitude, self.unit_label)
    }
}

// ---------------------------------------------------------------------------
// Speed units
// ---------------------------------------------------------------------------

/// Selectable speed unit. The discriminant is the ordinal persisted in
/// the preferences file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpeedUnit {
    #[default]
    MetersPerSecond = 0,
    KilometersPerHour = 1,
    MilesPerHour = 2,
    Knots = 3,
    FeetPerSecond = 4,
    Mach = 5,
}

/// How a speed unit is derived from the SI value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeedScale {
    /// Multiply meters per second by this factor.
    Factor(f64),
    /// Use the Mach number supplied by the simulation.
    Mach,
}

/// One row of the speed unit table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedUnitSpec {
    pub scale: SpeedScale,
    pub decimals: usize,
    pub label: &'static str,
    pub display_name: &'static str,
}

impl SpeedUnit {
    /// All units, in ordinal order.
    pub const ALL: [SpeedUnit; 6] = [
        SpeedUnit::MetersPerSecond,
        SpeedUnit::KilometersPerHour,
        SpeedUnit::MilesPerHour,
        SpeedUnit::Knots,
        SpeedUnit::FeetPerSecond,
        SpeedUnit::Mach,
    ];

    pub fn spec(self) -> SpeedUnitSpec {
        let (scale, decimals, label, display_name) = match self {
            SpeedUnit::MetersPerSecond => (
                SpeedScale::Factor(1.0),
                SPEED_DECIMALS,
                "m/s",
                "Meters per second (m/s)",
            ),
            SpeedUnit::KilometersPerHour => (
                SpeedScale::Factor(KMH_PER_MPS),
                SPEED_DECIMALS,
                "km/h",
                "Kilometers per hour (km/h)",
            ),
            SpeedUnit::MilesPerHour => (
                SpeedScale::Factor(MPH_PER_MPS),
                SPEED_DECIMALS,
                "mph",
                "Miles per hour (mph)",
            ),
            SpeedUnit::Knots => (
                SpeedScale::Factor(KNOTS_PER_MPS),
                SPEED_DECIMALS,
                "knots",
                "Knots (nmi/h)",
            ),
            SpeedUnit::FeetPerSecond => (
                SpeedScale::Factor(FEET_PER_METER),
                SPEED_DECIMALS,
                "ft/s",
                "Feet per second (ft/s)",
            ),
            SpeedUnit::Mach => (SpeedScale::Mach, MACH_DECIMALS, "Mach", "Mach"),
        };
        SpeedUnitSpec {
            scale,
            decimals,
            label,
            display_name,
        }
    }

    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Look up a unit by its persisted ordinal. Out-of-range ordinals
    /// (including negative ones) have no unit.
    pub fn from_ordinal(ordinal: i64) -> Option<Self> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn label(self) -> &'static str {
        self.spec().label
    }

    /// Long name shown in the configuration window.
    pub fn display_name(self) -> &'static str {
        self.spec().display_name
    }
}

// ---------------------------------------------------------------------------
// Altitude units
// ---------------------------------------------------------------------------

/// Selectable altitude unit. The discriminant is the persisted ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AltitudeUnit {
    #[default]
    Meters = 0,
    Kilometers = 1,
    Miles = 2,
    NauticalMiles = 3,
    Feet = 4,
}

/// How a distance unit is derived from meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistanceScale {
    Multiply(f64),
    Divide(f64),
}

impl DistanceScale {
    pub fn apply(self, meters: f64) -> f64 {
        match self {
            DistanceScale::Multiply(f) => meters * f,
            DistanceScale::Divide(d) => meters / d,
        }
    }
}

/// One rung of an auto-scale ladder: raw meter values strictly above
/// `above_meters` are divided by `divisor` and labelled `label`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleStep {
    pub above_meters: f64,
    pub divisor: f64,
    pub label: &'static str,
}

const TO_MEGAMETERS: ScaleStep = ScaleStep {
    above_meters: MEGAMETER_THRESHOLD,
    divisor: METERS_PER_MEGAMETER,
    label: "Mm",
};

const TO_KILOMETERS: ScaleStep = ScaleStep {
    above_meters: KILOMETER_THRESHOLD,
    divisor: METERS_PER_KILOMETER,
    label: "km",
};

/// Ladder for metric readings, largest rung first.
pub const METRIC_LADDER: &[ScaleStep] = &[TO_MEGAMETERS, TO_KILOMETERS];

/// One row of the altitude unit table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AltitudeUnitSpec {
    /// Scale and label used when no ladder rung applies.
    pub scale: DistanceScale,
    pub label: &'static str,
    pub display_name: &'static str,
    /// Checked in order before falling back to `scale`. Empty for units
    /// that never auto-scale.
    pub ladder: &'static [ScaleStep],
}

impl AltitudeUnit {
    /// All units, in ordinal order.
    pub const ALL: [AltitudeUnit; 5] = [
        AltitudeUnit::Meters,
        AltitudeUnit::Kilometers,
        AltitudeUnit::Miles,
        AltitudeUnit::NauticalMiles,
        AltitudeUnit::Feet,
    ];

    pub fn spec(self) -> AltitudeUnitSpec {
        match self {
            AltitudeUnit::Meters => AltitudeUnitSpec {
                scale: DistanceScale::Multiply(1.0),
                label: "m",
                display_name: "Meters (m)",
                ladder: METRIC_LADDER,
            },
            // Same ladder as Meters: short distances still read in m.
            AltitudeUnit::Kilometers => AltitudeUnitSpec {
                scale: DistanceScale::Multiply(1.0),
                label: "m",
                display_name: "Kilometers (km)",
                ladder: METRIC_LADDER,
            },
            AltitudeUnit::Miles => AltitudeUnitSpec {
                scale: DistanceScale::Divide(METERS_PER_MILE),
                label: "mi",
                display_name: "Miles (mi)",
                ladder: &[],
            },
            AltitudeUnit::NauticalMiles => AltitudeUnitSpec {
                scale: DistanceScale::Divide(METERS_PER_NAUTICAL_MILE),
                label: "nmi",
                display_name: "Nautical miles (nmi)",
                ladder: &[],
            },
            AltitudeUnit::Feet => AltitudeUnitSpec {
                scale: DistanceScale::Multiply(FEET_PER_METER),
                label: "ft",
                display_name: "Feet (ft)",
                ladder: &[],
            },
        }
    }

    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn from_ordinal(ordinal: i64) -> Option<Self> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn display_name(self) -> &'static str {
        self.spec().display_name
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

/// Convert a speed to the selected unit.
///
/// `mach` is the simulation's Mach number and is only present when the
/// speed is surface-relative. Mach is meaningless against a target or in
/// orbit, so without it a Mach selection reports plain m/s instead.
pub fn convert_speed(
    meters_per_second: f64,
    unit: SpeedUnit,
    mach: Option<f64>,
) -> FormattedReading {
    let spec = unit.spec();
    match (spec.scale, mach) {
        (SpeedScale::Factor(factor), _) => {
            FormattedReading::new(meters_per_second * factor, spec.decimals, spec.label)
        }
        (SpeedScale::Mach, Some(mach)) => FormattedReading::new(mach, spec.decimals, spec.label),
        (SpeedScale::Mach, None) => {
            convert_speed(meters_per_second, SpeedUnit::MetersPerSecond, None)
        }
    }
}

/// Convert an altitude to the selected unit, auto-scaling where the
/// unit's ladder allows it.
pub fn convert_distance(meters: f64, unit: AltitudeUnit) -> FormattedReading {
    let spec = unit.spec();
    scale_distance(meters, spec.ladder, spec.scale, spec.label)
}

/// Convert an apoapsis or periapsis. Always metric, whatever altitude
/// unit is selected.
pub fn convert_apsis(meters: f64) -> FormattedReading {
    scale_distance(meters, METRIC_LADDER, DistanceScale::Multiply(1.0), "m")
}

fn scale_distance(
    meters: f64,
    ladder: &[ScaleStep],
    base: DistanceScale,
    base_label: &'static str,
) -> FormattedReading {
    match ladder.iter().find(|step| meters > step.above_meters) {
        Some(step) => {
            FormattedReading::new(meters / step.divisor, DISTANCE_DECIMALS, step.label)
        }
        None => FormattedReading::new(base.apply(meters), DISTANCE_DECIMALS, base_label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speed(v: f64, unit: SpeedUnit) -> String {
        convert_speed(v, unit, Some(0.0)).to_string()
    }

    #[test]
    fn speed_table_factors() {
        assert_eq!(speed(100.0, SpeedUnit::MetersPerSecond), "100.0 m/s");
        assert_eq!(speed(100.0, SpeedUnit::KilometersPerHour), "360.0 km/h");
        assert_eq!(speed(100.0, SpeedUnit::MilesPerHour), "223.7 mph");
        assert_eq!(speed(100.0, SpeedUnit::Knots), "194.4 knots");
        assert_eq!(speed(100.0, SpeedUnit::FeetPerSecond), "328.1 ft/s");
    }

    #[test]
    fn mach_passes_through_with_two_decimals() {
        let r = convert_speed(340.0, SpeedUnit::Mach, Some(1.0123));
        assert_eq!(r.magnitude, "1.01");
        assert_eq!(r.unit_label, "Mach");
    }

    #[test]
    fn mach_without_surface_context_falls_back_to_mps() {
        let r = convert_speed(2245.67, SpeedUnit::Mach, None);
        assert_eq!(r, convert_speed(2245.67, SpeedUnit::MetersPerSecond, None));
        assert_eq!(r.to_string(), "2245.7 m/s");
    }

    #[test]
    fn mach_context_ignored_for_factor_units() {
        assert_eq!(
            convert_speed(10.0, SpeedUnit::Knots, None),
            convert_speed(10.0, SpeedUnit::Knots, Some(3.0))
        );
    }

    #[test]
    fn distance_thresholds_are_strict() {
        let m = |v: f64| convert_distance(v, AltitudeUnit::Meters).compact();
        assert_eq!(m(100_000.0), "100000.000m");
        assert_eq!(m(100_000.01), "100.000km");
        assert_eq!(m(10_000_000.0), "10000.000km");
        assert_eq!(m(10_000_000.01), "10.000Mm");
    }

    #[test]
    fn kilometers_follow_the_metric_ladder() {
        let km = |m: f64| convert_distance(m, AltitudeUnit::Kilometers).compact();
        assert_eq!(km(500.0), "500.000m");
        assert_eq!(km(100_000.0), "100000.000m");
        assert_eq!(km(250_000.0), "250.000km");
        assert_eq!(km(12_000_000.0), "12.000Mm");
        for m in [0.0, 99_999.0, 100_000.5, 10_000_000.0, 46_400_000.0] {
            assert_eq!(
                convert_distance(m, AltitudeUnit::Kilometers),
                convert_distance(m, AltitudeUnit::Meters)
            );
        }
    }

    #[test]
    fn imperial_and_nautical_never_scale() {
        let miles = convert_distance(16_093_440.0, AltitudeUnit::Miles);
        assert_eq!(miles.compact(), "10000.000mi");
        let nautical = convert_distance(18_520_000.0, AltitudeUnit::NauticalMiles);
        assert_eq!(nautical.compact(), "10000.000nmi");
        let feet = convert_distance(50_000_000.0, AltitudeUnit::Feet);
        assert_eq!(feet.unit_label, "ft");
        assert_eq!(feet.magnitude, format!("{:.3}", 50_000_000.0 * FEET_PER_METER));
    }

    #[test]
    fn apsis_uses_metric_ladder() {
        assert_eq!(convert_apsis(75_000.0).compact(), "75000.000m");
        assert_eq!(convert_apsis(250_000.0).compact(), "250.000km");
        assert_eq!(convert_apsis(46_400_000.0).compact(), "46.400Mm");
    }

    #[test]
    fn negative_distances_stay_in_base_unit() {
        assert_eq!(convert_apsis(-500.0).compact(), "-500.000m");
    }

    #[test]
    fn ordinals_round_trip_and_reject_out_of_range() {
        for unit in SpeedUnit::ALL {
            assert_eq!(SpeedUnit::from_ordinal(unit.ordinal() as i64), Some(unit));
        }
        for unit in AltitudeUnit::ALL {
            assert_eq!(AltitudeUnit::from_ordinal(unit.ordinal() as i64), Some(unit));
        }
        assert_eq!(SpeedUnit::from_ordinal(6), None);
        assert_eq!(SpeedUnit::from_ordinal(-1), None);
        assert_eq!(AltitudeUnit::from_ordinal(5), None);
    }

    #[test]
    fn display_names() {
        assert_eq!(SpeedUnit::Knots.display_name(), "Knots (nmi/h)");
        assert_eq!(AltitudeUnit::NauticalMiles.display_name(), "Nautical miles (nmi)");
    }
}
