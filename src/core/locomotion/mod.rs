//=========================================================================
// Locomotion
//=========================================================================
//
// Policy layer on top of the animation system: which action is canonical
// this tick, and how fast the world scrolls under the character.
//
// Architecture:
//   InputState ──> LocomotionArbiter ──target speed──> WorldScroller
//                        │
//                        └──transition_to()──> AnimationBlender
//
//=========================================================================

//=== Module Declarations =================================================

mod arbiter;
mod scroller;

//=== Public API ==========================================================

pub use arbiter::{Arbitration, CharacterLocomotionState, LockState, LocomotionArbiter};
pub use scroller::{smoothed_approach, wrap_offset, WorldScroller};

//=== LocomotionAction ====================================================

/// The five outcomes of the locomotion decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocomotionAction {
    Idle,
    Walk,
    Run,
    Jump,
    Pose,
}

impl LocomotionAction {
    /// Every action, in catalog-name order of the decision table.
    pub const ALL: [LocomotionAction; 5] = [
        LocomotionAction::Idle,
        LocomotionAction::Walk,
        LocomotionAction::Run,
        LocomotionAction::Jump,
        LocomotionAction::Pose,
    ];

    /// Catalog name of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walk => "walk",
            Self::Run => "run",
            Self::Jump => "jump",
            Self::Pose => "pose",
        }
    }

    /// Looks up an action by catalog name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.as_str() == name)
    }

    /// Default world speed while this action is canonical.
    pub fn nominal_speed(&self) -> f32 {
        match self {
            Self::Idle | Self::Pose => 0.0,
            Self::Walk => 1.0,
            Self::Run | Self::Jump => 4.0,
        }
    }
}

impl std::fmt::Display for LocomotionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for action in LocomotionAction::ALL {
            assert_eq!(LocomotionAction::from_name(action.as_str()), Some(action));
        }
        assert_eq!(LocomotionAction::from_name("dash"), None);
    }

    #[test]
    fn nominal_speeds_match_table() {
        assert_eq!(LocomotionAction::Idle.nominal_speed(), 0.0);
        assert_eq!(LocomotionAction::Walk.nominal_speed(), 1.0);
        assert_eq!(LocomotionAction::Run.nominal_speed(), 4.0);
        assert_eq!(LocomotionAction::Jump.nominal_speed(), 4.0);
        assert_eq!(LocomotionAction::Pose.nominal_speed(), 0.0);
    }
}
