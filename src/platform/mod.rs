//! Platform abstraction layer
//!
//! Turns raw key-down/key-up events into the held-control flags the
//! simulation reads. Only the latest state of each key survives until the
//! next tick; nothing is queued.

use crate::settings::KeyBindings;
use crate::sim::{Control, TickInput};

/// Latest held state of every bound key
#[derive(Debug, Clone, Default)]
pub struct KeyboardInput {
    bindings: KeyBindings,
    held: TickInput,
}

impl KeyboardInput {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held: TickInput::default(),
        }
    }

    /// Record a key transition. Returns the control it drove, if bound.
    pub fn handle_key(&mut self, key: &str, pressed: bool) -> Option<Control> {
        let control = self.bindings.control_for(key)?;
        self.held.set(control, pressed);
        log::trace!("{} {}", control.as_str(), if pressed { "held" } else { "released" });
        Some(control)
    }

    /// Release everything (window lost focus)
    pub fn release_all(&mut self) {
        self.held = TickInput::default();
    }

    /// Snapshot for the next tick
    pub fn snapshot(&self) -> TickInput {
        self.held
    }
}
