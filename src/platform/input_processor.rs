//=========================================================================
// Input Processor
//=========================================================================
//
// Converts winit keyboard events into engine InputEvents.
//
// Architecture:
//   Winit KeyEvent → InputProcessor → InputEvent (engine type) → InputBuffer
//
// OS key repeat is filtered: only real press/release transitions reach
// the core. Unmapped keys (F-keys, numpad, media keys) are filtered
// (returns None).
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::event::{InputEvent, KeyCode};

//=== InputProcessor ======================================================

/// Converts winit key events to engine InputEvents.
pub(crate) struct InputProcessor;

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self
    }

    //--- Event Processing -------------------------------------------------

    /// Converts a winit KeyEvent (filters repeats and unmapped keys).
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        if key_event.repeat {
            return None;
        }

        let key_code = match key_event.physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            _ => return None,
        };

        self.create_key_input_event(key_code, key_event.state)
    }

    //--- Internal Helpers -------------------------------------------------

    fn create_key_input_event(&self, key: KeyCode, state: ElementState) -> Option<InputEvent> {
        if key == KeyCode::Unidentified {
            return None;
        }

        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown { key },
            ElementState::Released => InputEvent::KeyUp { key },
        })
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts winit physical key codes to engine key codes.
///
/// Maps A-Z, 0-9, arrows, both shift keys and common special keys.
/// Everything else returns `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------

            Digit0 => KeyCode::Digit0,
            Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2,
            Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4,
            Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6,
            Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8,
            Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------

            KeyA => KeyCode::KeyA,
            KeyB => KeyCode::KeyB,
            KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD,
            KeyE => KeyCode::KeyE,
            KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG,
            KeyH => KeyCode::KeyH,
            KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ,
            KeyK => KeyCode::KeyK,
            KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM,
            KeyN => KeyCode::KeyN,
            KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP,
            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyT => KeyCode::KeyT,
            KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV,
            KeyW => KeyCode::KeyW,
            KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY,
            KeyZ => KeyCode::KeyZ,

            //--- Arrows -------------------------------------------------------

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Modifiers ----------------------------------------------------

            ShiftLeft => KeyCode::ShiftLeft,
            ShiftRight => KeyCode::ShiftRight,

            //--- Special ------------------------------------------------------

            Space => KeyCode::Space,
            Enter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,

            //--- Unmapped (return Unidentified) -------------------------------

            _ => KeyCode::Unidentified,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_key_down_event() {
        let processor = InputProcessor::new();
        let event = processor.create_key_input_event(KeyCode::KeyW, ElementState::Pressed);
        assert_eq!(event, Some(InputEvent::KeyDown { key: KeyCode::KeyW }));
    }

    #[test]
    fn create_key_up_event() {
        let processor = InputProcessor::new();
        let event = processor.create_key_input_event(KeyCode::Space, ElementState::Released);
        assert_eq!(event, Some(InputEvent::KeyUp { key: KeyCode::Space }));
    }

    #[test]
    fn unidentified_keys_are_filtered() {
        let processor = InputProcessor::new();
        let event = processor.create_key_input_event(
            KeyCode::from(WinitKeyCode::F13),
            ElementState::Pressed,
        );
        assert_eq!(event, None);
    }

    #[test]
    fn keycode_conversion_alphabetic() {
        assert_eq!(KeyCode::from(WinitKeyCode::KeyA), KeyCode::KeyA);
        assert_eq!(KeyCode::from(WinitKeyCode::KeyP), KeyCode::KeyP);
        assert_eq!(KeyCode::from(WinitKeyCode::KeyW), KeyCode::KeyW);
    }

    #[test]
    fn keycode_conversion_locomotion_keys() {
        assert_eq!(KeyCode::from(WinitKeyCode::ShiftLeft), KeyCode::ShiftLeft);
        assert_eq!(KeyCode::from(WinitKeyCode::ShiftRight), KeyCode::ShiftRight);
        assert_eq!(KeyCode::from(WinitKeyCode::Space), KeyCode::Space);
        assert_eq!(KeyCode::from(WinitKeyCode::ArrowUp), KeyCode::ArrowUp);
    }

    #[test]
    fn keycode_conversion_unmapped() {
        assert_eq!(KeyCode::from(WinitKeyCode::ControlLeft), KeyCode::Unidentified);
        assert_eq!(KeyCode::from(WinitKeyCode::F1), KeyCode::Unidentified);
    }
}
