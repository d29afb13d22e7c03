//=========================================================================
// Animation System
//=========================================================================
//
// Playable actions, the sealed catalog that owns them, and the blender
// that crossfades between them.
//
// Architecture:
//   ClipAsset* ──from_assets()──> ActionCatalog { name → AnimationAction }
//                                        ↑
//   AnimationBlender ──transition_to()/advance()──┘
//
//=========================================================================

//=== Module Declarations =================================================

mod action;
mod blender;
mod catalog;

//=== Public API ==========================================================

pub use action::{AnimationAction, AnimationClip, ClipAsset};
pub use blender::{ActionWeight, AnimationBlender};
pub use catalog::ActionCatalog;
