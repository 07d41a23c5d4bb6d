//! Shared "configuration window open" flag.
//!
//! The toolbar button flips it and the add-on reads it. Both hold a clone
//! of the same handle, handed to them at construction.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Default)]
pub struct WindowToggle(Arc<AtomicBool>);

impl WindowToggle {
    /// A new, closed toggle.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn set(&self, open: bool) {
        self.0.store(open, Ordering::Relaxed);
    }

    pub fn open(&self) {
        self.set(true);
    }

    pub fn close(&self) {
        self.set(false);
    }
}
