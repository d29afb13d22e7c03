//=========================================================================
// Action Catalog
//=========================================================================
//
// Named set of playable actions for one character.
//
// Lifecycle:
//   new() → register()* → seal() → get()/get_mut() for playback only
//
// Sealing validates that the base locomotion set is present. Once sealed
// the set of names is frozen; playback state inside each action still
// changes every tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::action::{AnimationAction, AnimationClip, ClipAsset};
use crate::core::locomotion::LocomotionAction;
use crate::error::{LocomotionError, Result};

//=== ActionCatalog =======================================================

/// Name → action registry with a sealed/unsealed lifecycle.
#[derive(Debug, Default)]
pub struct ActionCatalog {
    actions: HashMap<String, AnimationAction>,
    sealed: bool,
}

impl ActionCatalog {
    /// Names every sealed catalog must contain.
    pub const REQUIRED: [&'static str; 3] = ["idle", "walk", "run"];

    /// Creates an empty, unsealed catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds and seals a catalog from loaded clips.
    ///
    /// Clip speeds default to the nominal speed of the matching
    /// locomotion action, or zero for names outside the locomotion set.
    pub fn from_assets<I>(assets: I) -> Result<Self>
    where
        I: IntoIterator<Item = ClipAsset>,
    {
        let mut catalog = Self::new();

        for asset in assets {
            let speed = asset.speed.unwrap_or_else(|| {
                LocomotionAction::from_name(&asset.name)
                    .map(|action| action.nominal_speed())
                    .unwrap_or(0.0)
            });
            let clip = AnimationClip {
                name: asset.name.clone(),
                duration: asset.duration,
                looping: asset.looping,
            };
            catalog.register(asset.name, AnimationAction::new(clip, speed))?;
        }

        catalog.seal()?;
        Ok(catalog)
    }

    //--- Registration -----------------------------------------------------

    /// Registers an action under `name`.
    ///
    /// Re-registering a name replaces the previous action. Fails with
    /// [`LocomotionError::CatalogSealed`] once the catalog is sealed.
    pub fn register(&mut self, name: impl Into<String>, action: AnimationAction) -> Result<()> {
        let name = name.into();

        if self.sealed {
            return Err(LocomotionError::CatalogSealed(name));
        }

        debug!(target: "locomotion", "Registering action {:?} (speed {})", name, action.speed());
        if self.actions.insert(name.clone(), action).is_some() {
            warn!(target: "locomotion", "Action {:?} was already registered and has been replaced", name);
        }
        Ok(())
    }

    /// Freezes the set of names.
    ///
    /// Fails with [`LocomotionError::UnknownAction`] naming the first
    /// missing base action; the catalog then stays unsealed.
    pub fn seal(&mut self) -> Result<()> {
        if let Some(missing) = Self::REQUIRED.iter().find(|name| !self.contains(name)) {
            return Err(LocomotionError::UnknownAction((*missing).to_string()));
        }

        self.sealed = true;
        Ok(())
    }

    //--- Queries ----------------------------------------------------------

    /// Returns the action registered under `name`.
    pub fn get(&self, name: &str) -> Result<&AnimationAction> {
        self.actions
            .get(name)
            .ok_or_else(|| LocomotionError::UnknownAction(name.to_string()))
    }

    /// Mutable access to an action's playback state.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut AnimationAction> {
        self.actions
            .get_mut(name)
            .ok_or_else(|| LocomotionError::UnknownAction(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &AnimationAction)> {
        self.actions.iter().map(|(name, action)| (name.as_str(), action))
    }

    pub(crate) fn actions_mut(&mut self) -> impl Iterator<Item = &mut AnimationAction> {
        self.actions.values_mut()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
