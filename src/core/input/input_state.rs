//=========================================================================
// Input State
//
// Maintains the current locomotion input snapshot.
//
// Responsibilities:
// - Track which input codes are held (pressed / released)
// - Normalize unknown codes to "not pressed"
// - Detect per-tick state changes for change logging
//
// Notes:
// Writes come from key events delivered by the platform thread; the
// arbiter reads the snapshot once per tick. Both happen on the logic
// thread, so no synchronization is needed. Reads across different codes
// within one tick may straddle two events, which is harmless because the
// decision table is re-evaluated in full every tick.
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

//=== External Crates =====================================================
use log::warn;

//=== InputCode ===========================================================

/// Logical locomotion input, decoupled from the physical key producing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputCode {
    MoveForward,
    Sprint,
    Jump,
    Pose,
}

impl InputCode {
    /// Every code, in decision-table order.
    pub const ALL: [InputCode; 4] = [
        InputCode::MoveForward,
        InputCode::Sprint,
        InputCode::Jump,
        InputCode::Pose,
    ];

    /// Canonical name of the code (`"MoveForward"`, `"Sprint"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MoveForward => "MoveForward",
            Self::Sprint => "Sprint",
            Self::Jump => "Jump",
            Self::Pose => "Pose",
        }
    }
}

impl fmt::Display for InputCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a name that is not an [`InputCode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownInputCode(pub String);

impl FromStr for InputCode {
    type Err = UnknownInputCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputCode::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| UnknownInputCode(s.to_string()))
    }
}

//=== InputState ==========================================================

/// Pressed/released snapshot for all locomotion input codes.
///
/// Presence in the `pressed` set means the code is held.
#[derive(Default)]
pub struct InputState {
    pressed: HashSet<InputCode>,
    has_changed: bool,
}

impl InputState {
    //--- Constructor ------------------------------------------------------

    /// Creates a state with nothing pressed.
    pub fn new() -> Self {
        Self {
            pressed: HashSet::with_capacity(InputCode::ALL.len()),
            has_changed: false,
        }
    }

    //--- Mutation ---------------------------------------------------------

    /// Records a raw press/release transition.
    ///
    /// Returns `true` if the stored state actually changed.
    pub fn set_pressed(&mut self, code: InputCode, is_down: bool) -> bool {
        let changed = if is_down {
            self.pressed.insert(code)
        } else {
            self.pressed.remove(&code)
        };
        self.has_changed |= changed;
        changed
    }

    /// Name-keyed variant of [`set_pressed`](Self::set_pressed).
    ///
    /// Unknown names are ignored and reported; they can never become
    /// pressed.
    pub fn set_pressed_by_name(&mut self, name: &str, is_down: bool) -> bool {
        match name.parse::<InputCode>() {
            Ok(code) => self.set_pressed(code, is_down),
            Err(UnknownInputCode(name)) => {
                warn!(target: "core::input", "Ignoring unknown input code {:?}", name);
                false
            }
        }
    }

    /// Releases every code.
    pub fn release_all(&mut self) {
        if !self.pressed.is_empty() {
            self.pressed.clear();
            self.has_changed = true;
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Returns `true` while the code is held.
    pub fn is_pressed(&self, code: InputCode) -> bool {
        self.pressed.contains(&code)
    }

    /// Name-keyed query; unknown names are never pressed.
    pub fn is_pressed_by_name(&self, name: &str) -> bool {
        name.parse::<InputCode>()
            .map(|code| self.is_pressed(code))
            .unwrap_or(false)
    }

    /// Returns whether any code changed since the last
    /// [`reset_changed`](Self::reset_changed).
    pub fn has_changed(&self) -> bool {
        self.has_changed
    }

    pub(crate) fn reset_changed(&mut self) {
        self.has_changed = false;
    }
}

//=== Debug Trait =========================================================
//
// Example:
//
// ```text
// InputState { has_changed: true, pressed: ["MoveForward", "Sprint"] }
// ```
//
impl fmt::Debug for InputState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pressed: Vec<_> = InputCode::ALL
            .into_iter()
            .filter(|code| self.is_pressed(*code))
            .map(|code| code.as_str())
            .collect();

        f.debug_struct("InputState")
            .field("has_changed", &self.has_changed)
            .field("pressed", &pressed)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
