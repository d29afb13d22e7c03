//=========================================================================
// Input Event Types
//
// Defines the internal representation of low-level keyboard events.
//
// This module abstracts away platform-specific input (e.g. Winit) into a
// unified, engine-friendly format consumed by the input system.
//
// Responsibilities:
// - Represent physical keys in a stable, portable way
// - Carry press/release transitions from the platform to the core thread
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    KeyBindings (key → input code)
//         ↓
//    InputState (input code → pressed)
// ```
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// `KeyW` is always the same physical key regardless of keyboard layout
/// (QWERTY vs AZERTY).
///
/// Coverage:
/// - Alphanumeric keys (A-Z, 0-9)
/// - Arrow keys
/// - Both shift keys
/// - Common special keys (Space, Enter, Escape, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Modifier Keys ----------------------------------------------------

    ShiftLeft,
    ShiftRight,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,

    /// Fallback for keys not explicitly mapped by the input layer.
    Unidentified,
}

//=== InputEvent ==========================================================

/// Low-level keyboard transition from the platform layer.
///
/// Events are compared by type + key, so a buffer can drop exact
/// consecutive duplicates (OS auto-repeat that slipped through).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// Key pressed down.
    KeyDown { key: KeyCode },

    /// Key released.
    KeyUp { key: KeyCode },

    /// Unrecognized or unsupported event. Ignored by the input system.
    Unidentified,
}

impl InputEvent {
    /// Returns the key and its new pressed state, if this is a key event.
    pub fn key_transition(&self) -> Option<(KeyCode, bool)> {
        match *self {
            Self::KeyDown { key } => Some((key, true)),
            Self::KeyUp { key } => Some((key, false)),
            Self::Unidentified => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn key_down_and_up_are_distinct() {
        let down = InputEvent::KeyDown { key: KeyCode::KeyW };
        let up = InputEvent::KeyUp { key: KeyCode::KeyW };
        assert_ne!(down, up);
    }

    #[test]
    fn key_transition_reports_direction() {
        assert_eq!(
            InputEvent::KeyDown { key: KeyCode::Space }.key_transition(),
            Some((KeyCode::Space, true))
        );
        assert_eq!(
            InputEvent::KeyUp { key: KeyCode::Space }.key_transition(),
            Some((KeyCode::Space, false))
        );
        assert_eq!(InputEvent::Unidentified.key_transition(), None);
    }

    #[test]
    fn hashset_deduplicates_identical_events() {
        let mut set = HashSet::new();
        set.insert(InputEvent::KeyDown { key: KeyCode::KeyW });
        set.insert(InputEvent::KeyDown { key: KeyCode::KeyW });
        set.insert(InputEvent::KeyUp { key: KeyCode::KeyW });
        assert_eq!(set.len(), 2);
    }
}
