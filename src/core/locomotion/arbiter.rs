//=========================================================================
// Locomotion Arbiter
//=========================================================================
//
// Per-tick decision of which action is canonical.
//
// Decision table (first match wins):
// ```text
//   1  locked                 → unchanged
//   2  Jump                   → jump   (acquires lock)
//   3  MoveForward + Sprint   → run
//   4  MoveForward            → walk
//   5  Pose                   → pose
//   6  otherwise              → idle
// ```
//
// Lock state machine:
//   Unlocked ──rule 2──> Locked { expires_at = clock + lock_duration }
//   Locked   ──clock >= expires_at──> Unlocked (same tick re-arbitrates)
//
// `clock` is accumulated simulated time, so the lock is deterministic and
// no timer outlives the character.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::LocomotionAction;
use crate::config::{BlendConfig, LocomotionConfig};
use crate::core::animation::{ActionCatalog, AnimationBlender};
use crate::core::input::{InputCode, InputState};
use crate::error::Result;

//=== LockState ===========================================================

/// Whether arbitration is currently blocked by an uninterruptible action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockState {
    #[default]
    Unlocked,

    /// Blocked until the arbiter clock reaches `expires_at`.
    Locked { expires_at: Duration },
}

//=== CharacterLocomotionState ============================================

/// The arbiter's mutable record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CharacterLocomotionState {
    /// Canonical action, `None` until assets are loaded.
    pub active: Option<LocomotionAction>,

    /// Speed the world scroller is steering toward.
    pub target_speed: f32,

    pub lock: LockState,
}

impl CharacterLocomotionState {
    /// Canonical action name, or `"none"` before load.
    pub fn active_action_name(&self) -> &'static str {
        self.active.map(|action| action.as_str()).unwrap_or("none")
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.lock, LockState::Locked { .. })
    }
}

//=== Arbitration =========================================================

/// What a single [`LocomotionArbiter::update`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arbitration {
    /// Assets are not loaded yet; nothing was evaluated.
    NotReady,

    /// A lock is active; input was ignored.
    Locked,

    /// The decision matched the canonical action.
    Unchanged(LocomotionAction),

    /// The canonical action changed.
    Transitioned {
        from: LocomotionAction,
        to: LocomotionAction,
    },
}

//=== LocomotionArbiter ===================================================

pub struct LocomotionArbiter {
    state: CharacterLocomotionState,
    clock: Duration,
    lock_duration: Duration,
    blend: BlendConfig,
    first_transition_pending: bool,
}

impl LocomotionArbiter {
    //--- Construction -----------------------------------------------------

    pub fn new(config: &LocomotionConfig) -> Self {
        Self {
            state: CharacterLocomotionState::default(),
            clock: Duration::ZERO,
            lock_duration: config.lock_duration,
            blend: config.blend,
            first_transition_pending: false,
        }
    }

    /// Starts arbitrating against a sealed catalog with `idle` canonical.
    ///
    /// The caller is expected to have started `idle` on the blender.
    pub fn begin(&mut self, catalog: &ActionCatalog) -> Result<()> {
        let idle = LocomotionAction::Idle;
        self.state = CharacterLocomotionState {
            active: Some(idle),
            target_speed: catalog.get(idle.as_str())?.speed(),
            lock: LockState::Unlocked,
        };
        self.clock = Duration::ZERO;
        self.first_transition_pending = true;
        Ok(())
    }

    /// Returns to the pre-load state, dropping any pending lock.
    pub fn dispose(&mut self) {
        if self.state.is_locked() {
            debug!(target: "locomotion", "Disposing with an active lock, lock dropped");
        }
        self.state = CharacterLocomotionState::default();
        self.clock = Duration::ZERO;
        self.first_transition_pending = false;
    }

    //--- Decision Table ---------------------------------------------------

    /// Evaluates rules 2–6 against the input snapshot.
    ///
    /// Pure in `input` for a given catalog. `jump` and `pose` are only
    /// eligible when the catalog registers them.
    pub fn decide(input: &InputState, catalog: &ActionCatalog) -> LocomotionAction {
        let forward = input.is_pressed(InputCode::MoveForward);

        if input.is_pressed(InputCode::Jump) && catalog.contains(LocomotionAction::Jump.as_str()) {
            LocomotionAction::Jump
        } else if forward && input.is_pressed(InputCode::Sprint) {
            LocomotionAction::Run
        } else if forward {
            LocomotionAction::Walk
        } else if input.is_pressed(InputCode::Pose) && catalog.contains(LocomotionAction::Pose.as_str()) {
            LocomotionAction::Pose
        } else {
            LocomotionAction::Idle
        }
    }

    //--- Update -----------------------------------------------------------

    /// Runs one tick of arbitration.
    ///
    /// Advances the arbiter clock by `elapsed`, releases an expired lock,
    /// then applies the decision table and crossfades on change.
    pub fn update(
        &mut self,
        input: &InputState,
        elapsed: Duration,
        catalog: &mut ActionCatalog,
        blender: &mut AnimationBlender,
    ) -> Result<Arbitration> {
        let Some(active) = self.state.active else {
            return Ok(Arbitration::NotReady);
        };

        self.clock += elapsed;

        if let LockState::Locked { expires_at } = self.state.lock {
            if self.clock < expires_at {
                trace!(target: "locomotion", "Locked for another {:?}", expires_at - self.clock);
                return Ok(Arbitration::Locked);
            }
            debug!(target: "locomotion", "Lock released at {:?}", self.clock);
            self.state.lock = LockState::Unlocked;
        }

        let decided = Self::decide(input, catalog);

        if decided == LocomotionAction::Jump {
            let expires_at = self.clock + self.lock_duration;
            debug!(target: "locomotion", "Lock acquired until {:?}", expires_at);
            self.state.lock = LockState::Locked { expires_at };
        }

        if decided == active {
            return Ok(Arbitration::Unchanged(active));
        }

        let fade_out = if self.first_transition_pending {
            self.blend.first_fade_out
        } else {
            self.blend.fade_out
        };

        blender.transition_to(catalog, active.as_str(), decided.as_str(), fade_out, self.blend.fade_in)?;

        self.first_transition_pending = false;
        self.state.active = Some(decided);
        self.state.target_speed = catalog.get(decided.as_str())?.speed();

        Ok(Arbitration::Transitioned { from: active, to: decided })
    }

    //--- Queries ----------------------------------------------------------

    pub fn state(&self) -> &CharacterLocomotionState {
        &self.state
    }

    pub fn active_action_name(&self) -> &'static str {
        self.state.active_action_name()
    }

    pub fn target_speed(&self) -> f32 {
        self.state.target_speed
    }

    pub fn is_locked(&self) -> bool {
        self.state.is_locked()
    }

    /// Accumulated simulated time since [`begin`](Self::begin).
    pub fn clock(&self) -> Duration {
        self.clock
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::animation::ClipAsset;

    const TICK: Duration = Duration::from_millis(100);

    struct Rig {
        arbiter: LocomotionArbiter,
        catalog: ActionCatalog,
        blender: AnimationBlender,
        input: InputState,
    }

    impl Rig {
        fn with_assets(assets: Vec<ClipAsset>) -> Self {
            let mut catalog = ActionCatalog::from_assets(assets).unwrap();
            let mut blender = AnimationBlender::new();
            blender.play_immediately(&mut catalog, "idle").unwrap();
            let mut arbiter = LocomotionArbiter::new(&LocomotionConfig::default());
            arbiter.begin(&catalog).unwrap();
            Self { arbiter, catalog, blender, input: InputState::new() }
        }

        fn new() -> Self {
            Self::with_assets(ClipAsset::standard_set())
        }

        fn press(&mut self, code: InputCode) {
            self.input.set_pressed(code, true);
        }

        fn release(&mut self, code: InputCode) {
            self.input.set_pressed(code, false);
        }

        fn tick(&mut self) -> Arbitration {
            self.arbiter
                .update(&self.input, TICK, &mut self.catalog, &mut self.blender)
                .unwrap()
        }
    }

    //=== Decision Table ==================================================

    #[test]
    fn decide_covers_every_input_combination() {
        let catalog = ActionCatalog::from_assets(ClipAsset::standard_set()).unwrap();

        for mask in 0u8..16 {
            let mut input = InputState::new();
            for (bit, code) in InputCode::ALL.into_iter().enumerate() {
                input.set_pressed(code, mask & (1 << bit) != 0);
            }

            let forward = input.is_pressed(InputCode::MoveForward);
            let sprint = input.is_pressed(InputCode::Sprint);
            let jump = input.is_pressed(InputCode::Jump);
            let pose = input.is_pressed(InputCode::Pose);

            let expected = if jump {
                LocomotionAction::Jump
            } else if forward && sprint {
                LocomotionAction::Run
            } else if forward {
                LocomotionAction::Walk
            } else if pose {
                LocomotionAction::Pose
            } else {
                LocomotionAction::Idle
            };

            assert_eq!(LocomotionArbiter::decide(&input, &catalog), expected, "mask {mask:04b}");
        }
    }

    #[test]
    fn sprint_alone_is_idle() {
        let catalog = ActionCatalog::from_assets(ClipAsset::standard_set()).unwrap();
        let mut input = InputState::new();
        input.set_pressed(InputCode::Sprint, true);
        assert_eq!(LocomotionArbiter::decide(&input, &catalog), LocomotionAction::Idle);
    }

    #[test]
    fn base_catalog_skips_jump_and_pose_rules() {
        let assets = vec![
            ClipAsset::new("idle", 1.0),
            ClipAsset::new("walk", 1.0),
            ClipAsset::new("run", 1.0),
        ];
        let catalog = ActionCatalog::from_assets(assets).unwrap();

        let mut input = InputState::new();
        input.set_pressed(InputCode::Jump, true);
        input.set_pressed(InputCode::Pose, true);
        assert_eq!(LocomotionArbiter::decide(&input, &catalog), LocomotionAction::Idle);

        input.set_pressed(InputCode::MoveForward, true);
        assert_eq!(LocomotionArbiter::decide(&input, &catalog), LocomotionAction::Walk);
    }

    //=== Update ==========================================================

    #[test]
    fn update_before_begin_is_noop() {
        let mut catalog = ActionCatalog::new();
        let mut blender = AnimationBlender::new();
        let mut arbiter = LocomotionArbiter::new(&LocomotionConfig::default());
        let mut input = InputState::new();
        input.set_pressed(InputCode::MoveForward, true);

        let outcome = arbiter.update(&input, TICK, &mut catalog, &mut blender).unwrap();

        assert_eq!(outcome, Arbitration::NotReady);
        assert_eq!(arbiter.active_action_name(), "none");
        assert_eq!(arbiter.clock(), Duration::ZERO);
        assert_eq!(blender.active(), None);
    }

    #[test]
    fn forward_transitions_idle_to_walk() {
        let mut rig = Rig::new();
        rig.press(InputCode::MoveForward);

        assert_eq!(
            rig.tick(),
            Arbitration::Transitioned { from: LocomotionAction::Idle, to: LocomotionAction::Walk }
        );
        assert_eq!(rig.arbiter.active_action_name(), "walk");
        assert_eq!(rig.arbiter.target_speed(), 1.0);
        assert_eq!(rig.blender.active(), Some("walk"));
    }

    #[test]
    fn unchanged_decision_does_not_transition() {
        let mut rig = Rig::new();
        rig.press(InputCode::MoveForward);
        rig.tick();

        assert_eq!(rig.tick(), Arbitration::Unchanged(LocomotionAction::Walk));
    }

    #[test]
    fn first_transition_uses_first_fade_out() {
        let mut rig = Rig::new();
        rig.press(InputCode::MoveForward);
        rig.tick();

        // idle fades out over 0.5 s on the first transition
        rig.blender.advance(&mut rig.catalog, 0.25);
        let idle = rig.catalog.get("idle").unwrap();
        assert!((idle.weight() - 0.5).abs() < 1e-5);

        // later transitions use 0.25 s
        rig.press(InputCode::Sprint);
        rig.tick();
        rig.blender.advance(&mut rig.catalog, 0.25);
        assert!(!rig.catalog.get("walk").unwrap().is_playing());
    }

    #[test]
    fn jump_locks_for_configured_duration() {
        let mut rig = Rig::new();
        rig.press(InputCode::Jump);

        assert_eq!(
            rig.tick(),
            Arbitration::Transitioned { from: LocomotionAction::Idle, to: LocomotionAction::Jump }
        );
        assert!(rig.arbiter.is_locked());
        assert_eq!(rig.arbiter.target_speed(), 4.0);

        rig.release(InputCode::Jump);
        rig.press(InputCode::MoveForward);

        // 9 more ticks: 1000 ms after acquisition is not yet reached
        for _ in 0..9 {
            assert_eq!(rig.tick(), Arbitration::Locked);
            assert_eq!(rig.arbiter.active_action_name(), "jump");
        }

        assert_eq!(
            rig.tick(),
            Arbitration::Transitioned { from: LocomotionAction::Jump, to: LocomotionAction::Walk }
        );
        assert!(!rig.arbiter.is_locked());
    }

    #[test]
    fn holding_jump_relocks_without_restarting_clip() {
        let mut rig = Rig::new();
        rig.press(InputCode::Jump);
        rig.tick();

        for _ in 0..9 {
            rig.tick();
            rig.blender.advance(&mut rig.catalog, TICK.as_secs_f32());
        }
        let phase = rig.catalog.get("jump").unwrap().time();

        assert_eq!(rig.tick(), Arbitration::Unchanged(LocomotionAction::Jump));
        assert!(rig.arbiter.is_locked());
        assert_eq!(rig.catalog.get("jump").unwrap().time(), phase);
    }

    #[test]
    fn dispose_drops_lock_and_stops_arbitration() {
        let mut rig = Rig::new();
        rig.press(InputCode::Jump);
        rig.tick();

        rig.arbiter.dispose();

        assert!(!rig.arbiter.is_locked());
        assert_eq!(rig.tick(), Arbitration::NotReady);
        assert_eq!(rig.arbiter.active_action_name(), "none");
    }
}
