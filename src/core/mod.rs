//=========================================================================
// Core Systems Orchestrator
//
// Central coordinator for the character running on the logic
// (non-platform) thread.
//
// Responsibilities:
// - Own the input system and the character's frame loop
// - Receive platform events (input, focus, assets) over the bridge
// - Maintain deterministic pacing using a fixed tick rate (TPS)
// - Publish one FrameSnapshot per tick back to the platform
//
// Notes:
// The orchestrator runs independently from the platform layer. It owns
// each subsystem directly; communication with the platform occurs only
// through channels. Snapshots are offered with `try_send`, so a slow
// presenter drops frames instead of stalling the simulation.
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================
use crossbeam_channel::{Receiver, Sender, TrySendError};
use log::{error, info, trace};

//=== Submodules ==========================================================
pub mod animation;
pub mod frame_loop;
pub mod input;
pub mod locomotion;
pub(crate) mod platform_bridge;

//=== Internal Modules ====================================================
use crate::config::LocomotionConfig;
use frame_loop::{FrameLoop, FrameSnapshot};
use input::{InputSystem, KeyBindings};
use platform_bridge::{EventCollector, PlatformEvent, TickControl};

//=== CoreSystemsOrchestrator =============================================
//
// Manages the lifetime and update scheduling of the core systems.
//
pub(crate) struct CoreSystemsOrchestrator {
    input: InputSystem,
    frame_loop: FrameLoop,
}

impl CoreSystemsOrchestrator {
    //--- Construction -----------------------------------------------------
    //
    // Initializes all core systems but does not yet start the logic thread.
    //
    pub fn new(config: LocomotionConfig, bindings: KeyBindings) -> Self {
        Self {
            input: InputSystem::with_bindings(bindings),
            frame_loop: FrameLoop::new(config),
        }
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Spawns the logic thread that ticks the character at a fixed
    // update frequency (TPS - ticks per second).
    //
    // Each tick:
    //  1. Collects platform events
    //  2. Applies focus loss, asset delivery and input
    //  3. Runs the frame loop with the measured elapsed time
    //  4. Offers the snapshot to the platform
    //  5. Sleeps to maintain fixed pacing
    //
    // On exit the character is disposed before the thread ends.
    //
    pub fn spawn_core_thread(
        self,
        receiver: Receiver<PlatformEvent>,
        snapshots: Sender<FrameSnapshot>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut orchestrator = self;
            let mut collector = EventCollector::new(receiver);
            let mut last_tick = Instant::now();

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                if collector.collect_frame() == TickControl::Exit {
                    info!(target: "core", "Core thread exiting");
                    break;
                }

                //--- Step 2-3: Update subsystems ---------------------------
                let elapsed = frame_start.duration_since(last_tick);
                last_tick = frame_start;

                //--- Step 4: Publish ---------------------------------------
                if let Some(snapshot) = orchestrator.run_tick(&mut collector, elapsed) {
                    match snapshots.try_send(snapshot) {
                        Ok(()) => {}
                        Err(TrySendError::Full(_)) => {
                            trace!(target: "core", "Snapshot channel full, frame dropped");
                        }
                        Err(TrySendError::Disconnected(_)) => {
                            trace!(target: "core", "Snapshot receiver gone");
                        }
                    }
                }

                //--- Step 5: Maintain deterministic pacing ----------------
                let busy = frame_start.elapsed();
                if busy < frame_duration {
                    thread::sleep(frame_duration - busy);
                }
            }

            orchestrator.frame_loop.dispose();
        })
    }

    //--- run_tick() -------------------------------------------------------
    //
    // Applies this tick's platform events and advances the character.
    // Returns `None` only when the tick itself failed (logged).
    //
    fn run_tick(&mut self, collector: &mut EventCollector, elapsed: Duration) -> Option<FrameSnapshot> {
        if collector.take_focus_lost() {
            info!(target: "core", "Focus lost, releasing all inputs");
            self.input.release_all();
        }

        if let Some(assets) = collector.take_assets() {
            if let Err(e) = self.frame_loop.load(assets) {
                error!(target: "core", "Failed to load character: {}", e);
            }
        }

        let mut batches = collector.take_batches();
        self.input.process_batches(&mut batches);

        match self.frame_loop.tick(self.input.state(), elapsed) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                error!(target: "core", "Frame tick failed: {}", e);
                None
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
