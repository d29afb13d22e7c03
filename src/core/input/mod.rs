//=========================================================================
// Input System
//
// High-level interface for locomotion input handling.
// Wraps the key bindings and the `InputState`, translating batches of
// platform key events into logical input-code transitions.
//
// Responsibilities:
// - Aggregate and process batches of raw key events
// - Update the persistent `InputState` each tick
// - Expose the read-only snapshot to the locomotion arbiter
//
// Notes:
// This system is owned and updated by the CoreSystemsOrchestrator.
//
//=========================================================================

//=== Submodules ==========================================================
pub mod event;
mod input_state;
mod key_bindings;

//=== Public API ==========================================================
pub use event::{InputEvent, KeyCode};
pub use input_state::{InputCode, InputState, UnknownInputCode};
pub use key_bindings::KeyBindings;

//=== External Crates =====================================================
use log::{debug, trace};

//=== InputSystem =========================================================
//
// Owns the key bindings and the locomotion input snapshot.
//
pub struct InputSystem {
    bindings: KeyBindings,
    input_state: InputState,
}

impl InputSystem {
    //--- Construction -----------------------------------------------------

    /// Creates an input system with the default key bindings.
    pub fn new() -> Self {
        Self::with_bindings(KeyBindings::default())
    }

    /// Creates an input system with custom key bindings.
    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            input_state: InputState::new(),
        }
    }

    //--- process_batches() ------------------------------------------------
    //
    // Consumes all event batches received during the current tick.
    //
    pub fn process_batches(&mut self, batches: &mut Vec<Vec<InputEvent>>) {
        for batch in batches.drain(..) {
            self.process_events(&batch);
        }

        if self.input_state.has_changed() {
            debug!(target: "core::input", "Input updated: {:?}", self.input_state);
            self.input_state.reset_changed();
        }
    }

    /// Applies a single batch of key events in order.
    pub fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            let Some((key, is_down)) = event.key_transition() else {
                continue;
            };

            match self.bindings.apply(key, is_down) {
                Some((code, held)) => {
                    self.input_state.set_pressed(code, held);
                }
                None => trace!(target: "core::input", "Unbound key {:?} ignored", key),
            }
        }
    }

    /// Releases every key and code (window focus lost).
    pub fn release_all(&mut self) {
        self.bindings.release_all();
        self.input_state.release_all();
    }

    //--- Query Methods ----------------------------------------------------

    /// Read-only snapshot consumed by the arbiter.
    pub fn state(&self) -> &InputState {
        &self.input_state
    }

    /// Current key bindings.
    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    //--- Rebinding --------------------------------------------------------

    /// Binds a key at runtime.
    ///
    /// A held key is released from its old code first and must be pressed
    /// again to drive the new one.
    pub fn bind(&mut self, key: KeyCode, code: InputCode) {
        self.release_key(key);
        self.bindings.bind(key, code);
    }

    /// Unbinds a key at runtime, releasing its code if the key was held.
    pub fn unbind(&mut self, key: KeyCode) {
        self.release_key(key);
        self.bindings.unbind(key);
    }

    fn release_key(&mut self, key: KeyCode) {
        if !self.bindings.is_held(key) {
            return;
        }
        if let Some((code, held)) = self.bindings.apply(key, false) {
            debug!(target: "core::input", "Rebinding held key {:?}, {} held = {}", key, code, held);
            self.input_state.set_pressed(code, held);
        }
    }

    /// Returns `true` while the code is held.
    pub fn is_pressed(&self, code: InputCode) -> bool {
        self.input_state.is_pressed(code)
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
