//! Apsis alternation: when apoapsis and periapsis have to share one slot,
//! show each for a fixed number of ticks in turn.

/// Which apsis is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Apsis {
    Apoapsis,
    Periapsis,
}

impl Apsis {
    pub fn prefix(self) -> &'static str {
        match self {
            Apsis::Apoapsis => "Ap:",
            Apsis::Periapsis => "Pe:",
        }
    }
}

/// Tick counter driving the alternation. Starts on apoapsis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApsisCounter {
    ticks: u32,
    show_apoapsis: bool,
}

impl ApsisCounter {
    pub fn new() -> Self {
        Self {
            ticks: 0,
            show_apoapsis: true,
        }
    }

    /// Pick the apsis for this tick, then count the tick. Once `threshold`
    /// ticks have been counted the choice flips and the count restarts.
    pub fn advance(&mut self, threshold: u32) -> Apsis {
        let shown = self.current();
        self.ticks += 1;
        if self.ticks >= threshold.max(1) {
            self.show_apoapsis = !self.show_apoapsis;
            self.ticks = 0;
        }
        shown
    }

    pub fn current(&self) -> Apsis {
        if self.show_apoapsis {
            Apsis::Apoapsis
        } else {
            Apsis::Periapsis
        }
    }
}

impl Default for ApsisCounter {
    fn default() -> Self {
        Self::new()
    }
}
