//=========================================================================
// Treadmill Locomotion - Library Root
//
// Keyboard-driven locomotion for a single animated character that stays
// in place while the world scrolls beneath it.
//
// Responsibilities:
// - Expose the runtime facade (`EngineBuilder` / `Engine`)
// - Expose the deterministic core (input, animation, locomotion,
//   frame loop) for headless use and testing
// - Keep the OS integration (`platform`) private
//
// Typical usage:
// ```no_run
// use treadmill_locomotion::EngineBuilder;
//
// fn main() {
//     EngineBuilder::new().build().run();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the per-tick logic. It does not touch the OS and can be
// driven directly with explicit `Duration` ticks.
//
pub mod config;
pub mod core;
pub mod error;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the winit window and event loop. `engine` wires the
// platform and core threads together.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use config::{BlendConfig, LocomotionConfig};
pub use engine::{AssetLoader, Engine, EngineBuilder};
pub use error::{LocomotionError, Result};
