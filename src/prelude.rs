//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types.
//
// Usage:
//   use treadmill_locomotion::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine and configuration
pub use crate::config::{BlendConfig, LocomotionConfig};
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::error::LocomotionError;

// Input
pub use crate::core::input::{InputCode, InputEvent, InputState, KeyBindings, KeyCode};

// Animation
pub use crate::core::animation::{ActionCatalog, ActionWeight, AnimationBlender, ClipAsset};

// Locomotion
pub use crate::core::frame_loop::{FrameLoop, FrameSnapshot};
pub use crate::core::locomotion::{LocomotionAction, LocomotionArbiter, WorldScroller};
