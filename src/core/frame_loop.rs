//=========================================================================
// Frame Loop
//=========================================================================
//
// Drives one logical tick of the character.
//
// Tick pipeline:
// ```text
//   elapsed ──clamp(max_frame_step)──┐
//                                    ↓
//   LocomotionArbiter::update(input, elapsed)
//   AnimationBlender::advance(elapsed)
//   WorldScroller::update(elapsed, target_speed)
//                                    ↓
//                              FrameSnapshot ──> render/present
// ```
//
// Until `load()` succeeds every tick is a no-op that reports `"none"`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::config::LocomotionConfig;
use crate::core::animation::{ActionCatalog, ActionWeight, AnimationBlender, ClipAsset};
use crate::core::input::InputState;
use crate::core::locomotion::{Arbitration, LocomotionAction, LocomotionArbiter, WorldScroller};
use crate::error::Result;

//=== FrameSnapshot =======================================================

/// Per-tick output for the rendering/animation-playback layer.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    /// Canonical action name, `"none"` before load.
    pub active_action: &'static str,

    /// Weights of every playing action (two during a crossfade).
    pub weights: Vec<ActionWeight>,

    /// Smoothed world speed.
    pub speed: f32,

    /// Speed the world is steering toward.
    pub target_speed: f32,

    /// World-scroll offset in `[0, period)`.
    pub offset: f32,

    pub locked: bool,
}

//=== FrameLoop ===========================================================

/// Owns the character's catalog, blender, arbiter and world scroller.
pub struct FrameLoop {
    config: LocomotionConfig,
    catalog: ActionCatalog,
    blender: AnimationBlender,
    arbiter: LocomotionArbiter,
    scroller: WorldScroller,
    loaded: bool,
}

impl FrameLoop {
    //--- Construction -----------------------------------------------------

    /// Creates an unloaded character.
    pub fn new(config: LocomotionConfig) -> Self {
        Self {
            catalog: ActionCatalog::new(),
            blender: AnimationBlender::new(),
            arbiter: LocomotionArbiter::new(&config),
            scroller: WorldScroller::new(&config),
            loaded: false,
            config,
        }
    }

    //--- Lifecycle --------------------------------------------------------

    /// Builds and seals the catalog from loaded clips and starts `idle`.
    ///
    /// On error the character stays (or returns to) the unloaded state.
    pub fn load<I>(&mut self, assets: I) -> Result<()>
    where
        I: IntoIterator<Item = ClipAsset>,
    {
        self.dispose();

        let mut catalog = ActionCatalog::from_assets(assets)?;
        let mut blender = AnimationBlender::new();
        blender.play_immediately(&mut catalog, LocomotionAction::Idle.as_str())?;
        self.arbiter.begin(&catalog)?;

        info!(target: "locomotion", "Character loaded with actions {:?}", catalog.names());

        self.catalog = catalog;
        self.blender = blender;
        self.scroller.reset();
        self.loaded = true;
        Ok(())
    }

    /// Tears the character down, cancelling any pending lock.
    ///
    /// Subsequent ticks are no-ops until the next successful `load()`.
    pub fn dispose(&mut self) {
        if !self.loaded {
            return;
        }

        debug!(target: "locomotion", "Disposing character");
        self.arbiter.dispose();
        self.blender.reset(&mut self.catalog);
        self.catalog = ActionCatalog::new();
        self.scroller.reset();
        self.loaded = false;
    }

    //--- Tick -------------------------------------------------------------

    /// Runs one tick and returns the snapshot for presentation.
    pub fn tick(&mut self, input: &InputState, elapsed: Duration) -> Result<FrameSnapshot> {
        if !self.loaded {
            return Ok(self.snapshot());
        }

        let elapsed = if elapsed > self.config.max_frame_step {
            warn!(
                target: "locomotion",
                "Clamping frame step {:?} to {:?}",
                elapsed, self.config.max_frame_step
            );
            self.config.max_frame_step
        } else {
            elapsed
        };

        let outcome = self
            .arbiter
            .update(input, elapsed, &mut self.catalog, &mut self.blender)?;

        if let Arbitration::Transitioned { from, to } = outcome {
            debug!(
                target: "locomotion",
                "{} -> {} (target speed {})",
                from, to, self.arbiter.target_speed()
            );
        }

        self.blender.advance(&mut self.catalog, elapsed.as_secs_f32());
        self.scroller.update(elapsed, self.arbiter.target_speed());

        Ok(self.snapshot())
    }

    fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            active_action: self.arbiter.active_action_name(),
            weights: self.blender.weights(&self.catalog),
            speed: self.scroller.current_speed(),
            target_speed: self.arbiter.target_speed(),
            offset: self.scroller.offset(),
            locked: self.arbiter.is_locked(),
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn catalog(&self) -> &ActionCatalog {
        &self.catalog
    }

    pub fn arbiter(&self) -> &LocomotionArbiter {
        &self.arbiter
    }

    pub fn scroller(&self) -> &WorldScroller {
        &self.scroller
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
