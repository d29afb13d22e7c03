//=========================================================================
// Key Bindings
//=========================================================================
//
// Maps physical keys to logical locomotion input codes.
//
// Architecture:
//   KeyCode → HashMap → InputCode
//
// Several keys may drive the same code (W and ArrowUp both move forward).
// A code counts as pressed while at least one of its keys is held, so
// releasing one of two held keys does not release the code.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, HashSet};

//=== Internal Dependencies ===============================================

use super::event::KeyCode;
use super::input_state::InputCode;

//=== KeyBindings =========================================================

/// Key → input code lookup with held-key bookkeeping.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyCode, InputCode>,
    held: HashSet<KeyCode>,
}

impl KeyBindings {
    /// Creates an empty binding table.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
            held: HashSet::new(),
        }
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a key to an input code, replacing any previous binding.
    pub fn bind(&mut self, key: KeyCode, code: InputCode) -> &mut Self {
        self.bindings.insert(key, code);
        self
    }

    /// Removes the binding for a key.
    pub fn unbind(&mut self, key: KeyCode) -> &mut Self {
        self.bindings.remove(&key);
        self.held.remove(&key);
        self
    }

    /// Returns the code bound to a key, if any.
    pub fn code_for(&self, key: KeyCode) -> Option<InputCode> {
        self.bindings.get(&key).copied()
    }

    /// Returns every key bound to a code.
    pub fn keys_for(&self, code: InputCode) -> impl Iterator<Item = KeyCode> + '_ {
        self.bindings
            .iter()
            .filter(move |(_, c)| **c == code)
            .map(|(k, _)| *k)
    }

    //--- Event Mapping ----------------------------------------------------

    /// Applies a key transition and returns the resulting code state.
    ///
    /// Returns `None` for unbound keys. Otherwise returns the code and
    /// whether any of its keys is still held after this transition.
    pub(crate) fn apply(&mut self, key: KeyCode, is_down: bool) -> Option<(InputCode, bool)> {
        let code = self.code_for(key)?;

        if is_down {
            self.held.insert(key);
        } else {
            self.held.remove(&key);
        }

        let still_held = self
            .held
            .iter()
            .any(|k| self.bindings.get(k) == Some(&code));

        Some((code, still_held))
    }

    /// Returns `true` while the key is physically held.
    pub(crate) fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Forgets all held keys (focus loss).
    pub(crate) fn release_all(&mut self) {
        self.held.clear();
    }
}

impl Default for KeyBindings {
    /// WASD-style defaults: W / ArrowUp forward, either Shift sprints,
    /// Space jumps, P poses.
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings
            .bind(KeyCode::KeyW, InputCode::MoveForward)
            .bind(KeyCode::ArrowUp, InputCode::MoveForward)
            .bind(KeyCode::ShiftLeft, InputCode::Sprint)
            .bind(KeyCode::ShiftRight, InputCode::Sprint)
            .bind(KeyCode::Space, InputCode::Jump)
            .bind(KeyCode::KeyP, InputCode::Pose);
        bindings
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=== Binding API =====================================================

    #[test]
    fn defaults_cover_every_code() {
        let bindings = KeyBindings::default();
        for code in InputCode::ALL {
            assert!(bindings.keys_for(code).count() > 0, "{code} has no key");
        }
    }

    #[test]
    fn default_keys() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.code_for(KeyCode::KeyW), Some(InputCode::MoveForward));
        assert_eq!(bindings.code_for(KeyCode::ShiftLeft), Some(InputCode::Sprint));
        assert_eq!(bindings.code_for(KeyCode::Space), Some(InputCode::Jump));
        assert_eq!(bindings.code_for(KeyCode::KeyP), Some(InputCode::Pose));
        assert_eq!(bindings.code_for(KeyCode::KeyQ), None);
    }

    #[test]
    fn rebinding_replaces_previous_code() {
        let mut bindings = KeyBindings::default();
        bindings.bind(KeyCode::Space, InputCode::Pose);
        assert_eq!(bindings.code_for(KeyCode::Space), Some(InputCode::Pose));
    }

    #[test]
    fn unbind_removes_key() {
        let mut bindings = KeyBindings::default();
        bindings.unbind(KeyCode::KeyW);
        assert_eq!(bindings.code_for(KeyCode::KeyW), None);
        assert_eq!(bindings.keys_for(InputCode::MoveForward).count(), 1);
    }

    //=== Event Mapping ===================================================

    #[test]
    fn unbound_key_maps_to_nothing() {
        let mut bindings = KeyBindings::default();
        assert_eq!(bindings.apply(KeyCode::KeyZ, true), None);
    }

    #[test]
    fn press_and_release_single_key() {
        let mut bindings = KeyBindings::default();
        assert_eq!(
            bindings.apply(KeyCode::KeyW, true),
            Some((InputCode::MoveForward, true))
        );
        assert_eq!(
            bindings.apply(KeyCode::KeyW, false),
            Some((InputCode::MoveForward, false))
        );
    }

    #[test]
    fn code_stays_held_while_another_key_is_down() {
        let mut bindings = KeyBindings::default();
        bindings.apply(KeyCode::ShiftLeft, true);
        bindings.apply(KeyCode::ShiftRight, true);

        assert_eq!(
            bindings.apply(KeyCode::ShiftLeft, false),
            Some((InputCode::Sprint, true))
        );
        assert_eq!(
            bindings.apply(KeyCode::ShiftRight, false),
            Some((InputCode::Sprint, false))
        );
    }

    #[test]
    fn release_all_forgets_held_keys() {
        let mut bindings = KeyBindings::default();
        bindings.apply(KeyCode::KeyW, true);
        assert!(bindings.is_held(KeyCode::KeyW));
        bindings.release_all();
        assert!(!bindings.is_held(KeyCode::KeyW));

        assert_eq!(
            bindings.apply(KeyCode::ArrowUp, false),
            Some((InputCode::MoveForward, false))
        );
    }
}
