//=========================================================================
// Treadmill Engine
//
// Main entry point and coordinator.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_tps()              ├─ spawns core thread
//         ├─ with_channel_capacity() ├─ spawns asset loader thread
//         ├─ with_config()           ├─ runs platform
//         ├─ with_bindings()         └─ blocks until exit
//         └─ with_asset_loader()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info, warn};

//=== Internal Dependencies ===============================================

use crate::config::LocomotionConfig;
use crate::core::animation::ClipAsset;
use crate::core::frame_loop::FrameSnapshot;
use crate::core::input::KeyBindings;
use crate::core::platform_bridge::PlatformEvent;
use crate::core::CoreSystemsOrchestrator;
use crate::platform::Platform;

//=== AssetLoader =========================================================

/// Produces the character's clips, run once on a dedicated thread.
pub type AssetLoader = Box<dyn FnOnce() -> Vec<ClipAsset> + Send + 'static>;

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 events
/// - **Config**: [`LocomotionConfig::default`]
/// - **Bindings**: [`KeyBindings::default`] (W/↑ forward, Shift sprint,
///   Space jump, P pose)
/// - **Assets**: [`ClipAsset::standard_set`]
///
/// # Examples
///
/// Simple usage with defaults:
/// ```no_run
/// use treadmill_locomotion::EngineBuilder;
///
/// EngineBuilder::new().build().run();
/// ```
///
/// Advanced configuration:
/// ```no_run
/// use std::time::Duration;
/// use treadmill_locomotion::{EngineBuilder, LocomotionConfig};
/// use treadmill_locomotion::core::animation::ClipAsset;
///
/// EngineBuilder::new()
///     .with_tps(120.0)
///     .with_config(LocomotionConfig::default().with_lock_duration(Duration::from_millis(800)))
///     .with_asset_loader(|| {
///         vec![
///             ClipAsset::new("idle", 2.0),
///             ClipAsset::new("walk", 1.0),
///             ClipAsset::new("run", 0.7).with_speed(5.0),
///         ]
///     })
///     .build()
///     .run();
/// ```
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    config: LocomotionConfig,
    bindings: KeyBindings,
    asset_loader: AssetLoader,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            config: LocomotionConfig::default(),
            bindings: KeyBindings::default(),
            asset_loader: Box::new(ClipAsset::standard_set),
        }
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the capacity of both bridge channels (events in, snapshots out).
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Replaces the locomotion tunables.
    pub fn with_config(mut self, config: LocomotionConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the key bindings.
    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// Sets the closure that produces the character's clips.
    ///
    /// It runs on its own thread after the core thread starts; until it
    /// returns, the character stays unloaded and ignores input.
    pub fn with_asset_loader<F>(mut self, loader: F) -> Self
    where
        F: FnOnce() -> Vec<ClipAsset> + Send + 'static,
    {
        self.asset_loader = Box::new(loader);
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine {
        info!(
            target: "core",
            "Building engine (TPS: {}, channel: {})",
            self.tps, self.channel_capacity
        );

        Engine {
            orchestrator: CoreSystemsOrchestrator::new(self.config, self.bindings),
            asset_loader: self.asset_loader,
            tps: self.tps,
            channel_capacity: self.channel_capacity,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Treadmill locomotion runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► InputSystem, FrameLoop
///   │
///   ├─► Asset loader (one-shot thread)
///   │
///   └─► Platform (Event Loop)
///         └─► Window, Input Polling, Presentation
///
/// Communication: PlatformEvent in, FrameSnapshot out
/// ```
pub struct Engine {
    orchestrator: CoreSystemsOrchestrator,
    asset_loader: AssetLoader,
    tps: f64,
    channel_capacity: usize,
}

impl Engine {
    //--- Execution --------------------------------------------------------

    /// Starts the runtime and blocks until the window closes.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the event and snapshot channels
    /// 2. Spawns the logic thread running at the configured TPS
    /// 3. Spawns the asset loader, which posts `AssetsLoaded`
    /// 4. Runs the platform event loop (blocks here)
    /// 5. On window close: core thread disposes the character and exits
    pub fn run(self) {
        info!(target: "core", "Starting engine runtime (TPS: {})", self.tps);

        //--- 1. Create communication channels ----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);
        let (snapshot_tx, snapshot_rx) = bounded::<FrameSnapshot>(self.channel_capacity);

        //--- 2. Spawn the core logic thread -------------------------------
        let core_handle = self.orchestrator.spawn_core_thread(rx, snapshot_tx, self.tps);
        info!(target: "core", "Core logic thread spawned");

        //--- 3. Spawn the asset loader ------------------------------------
        let loader_handle = spawn_asset_loader(self.asset_loader, tx.clone());

        //--- 4. Launch the platform subsystem -----------------------------
        let platform = Platform::new(tx, snapshot_rx);
        info!(target: "platform", "Platform initialized, entering event loop");

        if let Err(e) = platform.run() {
            error!(target: "platform", "Platform error: {}", e);
        }

        info!(target: "platform", "Platform event loop exited");

        //--- 5. Cleanup ---------------------------------------------------
        if loader_handle.join().is_err() {
            error!(target: "core", "Asset loader panicked");
        }

        match core_handle.join() {
            Ok(()) => info!(target: "core", "Core thread terminated cleanly"),
            Err(e) => error!(target: "core", "Core thread panicked: {:?}", e),
        }

        info!(target: "core", "Engine shutdown complete");
    }
}

/// Runs the loader on its own thread and posts the result to the core.
fn spawn_asset_loader(loader: AssetLoader, sender: Sender<PlatformEvent>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let assets = loader();
        info!(target: "core", "Asset loader produced {} clips", assets.len());

        if sender.send(PlatformEvent::AssetsLoaded(assets)).is_err() {
            warn!(target: "core", "Core thread gone before assets arrived");
        }
    })
}

//=========================================================================
// Unit Tests
//=========================================================================
