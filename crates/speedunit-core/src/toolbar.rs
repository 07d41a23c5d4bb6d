//! Toolbar button that opens and closes the configuration window.

use std::fmt;

use crate::toggle::WindowToggle;

/// Callback run when the button is switched on or off.
pub type ButtonCallback = Box<dyn Fn()>;

/// The host's application launcher, where mods register toolbar buttons.
pub trait AppLauncher {
    type Button;
    type Error: fmt::Display;

    fn add_button(
        &mut self,
        on_enable: ButtonCallback,
        on_disable: ButtonCallback,
    ) -> Result<Self::Button, Self::Error>;

    fn remove_button(&mut self, button: Self::Button);
}

/// Owns the registration of one launcher button wired to a [`WindowToggle`].
pub struct ToolbarButton<A: AppLauncher> {
    launcher: A,
    button: Option<A::Button>,
    toggle: WindowToggle,
}

impl<A: AppLauncher> ToolbarButton<A> {
    pub fn new(launcher: A, toggle: WindowToggle) -> Self {
        Self {
            launcher,
            button: None,
            toggle,
        }
    }

    /// Close the window and try to register the button.
    pub fn start(&mut self) {
        self.toggle.close();
        self.on_launcher_ready();
    }

    /// Register the button if it is not registered yet. Hosts call this
    /// again when the launcher reports that it is ready, so a failed
    /// registration during `start` gets another chance.
    pub fn on_launcher_ready(&mut self) {
        if self.is_registered() {
            return;
        }
        let open = self.toggle.clone();
        let close = self.toggle.clone();
        match self
            .launcher
            .add_button(Box::new(move || open.open()), Box::new(move || close.close()))
        {
            Ok(button) => self.button = Some(button),
            Err(e) => log::warn!("could not add toolbar button: {e}"),
        }
    }

    pub fn is_registered(&self) -> bool {
        self.button.is_some()
    }

    /// Unregister the button.
    pub fn destroy(&mut self) {
        if let Some(button) = self.button.take() {
            self.launcher.remove_button(button);
        }
    }
}
