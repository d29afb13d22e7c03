//=========================================================================
// Animation Blender
//=========================================================================
//
// Crossfade mechanics between catalog actions, independent of why a
// transition is requested.
//
// Transition:
// ```text
//   from ──fade_out(d_out)──> weight 0 → stop()
//   to   ──reset()──fade_in(d_in)──> weight 1
//   canonical = to   (immediately)
// ```
//
// Both actions keep playing during the overlap window; only the incoming
// one is canonical.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::catalog::ActionCatalog;
use crate::error::{LocomotionError, Result};

//=== ActionWeight ========================================================

/// Blend weight of one playing action, reported to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionWeight {
    pub name: String,
    pub weight: f32,
}

//=== AnimationBlender ====================================================

/// Tracks the canonical action and drives crossfades on the catalog.
#[derive(Debug, Default)]
pub struct AnimationBlender {
    active: Option<String>,
}

impl AnimationBlender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical action name, `None` before anything has played.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    //--- Transitions ------------------------------------------------------

    /// Starts `name` at full weight with no fade (initial pose after load).
    pub fn play_immediately(&mut self, catalog: &mut ActionCatalog, name: &str) -> Result<()> {
        catalog.get_mut(name)?.reset().set_weight(1.0).play();
        self.active = Some(name.to_string());
        debug!(target: "locomotion", "Playing {:?} at full weight", name);
        Ok(())
    }

    /// Crossfades from `from` to `to`.
    ///
    /// Returns `Ok(false)` without touching playback when `from == to` or
    /// when `to` is already canonical, so repeated requests never restart
    /// a fade or rewind the clip. An unregistered `from` (e.g. `"none"`)
    /// simply has nothing to fade out.
    ///
    /// # Errors
    ///
    /// [`LocomotionError::UnknownAction`] if `to` is not registered; no
    /// playback state changes in that case.
    pub fn transition_to(
        &mut self,
        catalog: &mut ActionCatalog,
        from: &str,
        to: &str,
        fade_out: f32,
        fade_in: f32,
    ) -> Result<bool> {
        if !catalog.contains(to) {
            return Err(LocomotionError::UnknownAction(to.to_string()));
        }

        if from == to || self.active.as_deref() == Some(to) {
            return Ok(false);
        }

        if let Ok(outgoing) = catalog.get_mut(from) {
            outgoing.fade_out(fade_out);
        }

        catalog.get_mut(to)?.reset().fade_in(fade_in).play();
        self.active = Some(to.to_string());

        debug!(
            target: "locomotion",
            "Crossfade {:?} -> {:?} (out {:.2}s, in {:.2}s)",
            from, to, fade_out, fade_in
        );
        Ok(true)
    }

    //--- Time Advance -----------------------------------------------------

    /// Advances clip time and fades of every action by `dt` seconds.
    pub fn advance(&self, catalog: &mut ActionCatalog, dt: f32) {
        for action in catalog.actions_mut() {
            action.advance(dt);
        }
    }

    /// Weights of all playing actions, sorted by name.
    pub fn weights(&self, catalog: &ActionCatalog) -> Vec<ActionWeight> {
        let mut weights: Vec<ActionWeight> = catalog
            .iter()
            .filter(|(_, action)| action.is_playing())
            .map(|(name, action)| ActionWeight {
                name: name.to_string(),
                weight: action.weight(),
            })
            .collect();
        weights.sort_by(|a, b| a.name.cmp(&b.name));
        weights
    }

    /// Stops every action and forgets the canonical one.
    pub fn reset(&mut self, catalog: &mut ActionCatalog) {
        for action in catalog.actions_mut() {
            action.stop();
        }
        self.active = None;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
