//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-core interface types (events and errors).
//
// Defines the contract for communication between platform and core threads.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::animation::ClipAsset;
use crate::core::input::event::InputEvent;

//=== PlatformEvent =======================================================

/// Events sent to the core thread over the bridge channel.
#[derive(Debug, Clone)]
pub(crate) enum PlatformEvent {
    /// Key transitions buffered during one platform frame, in order.
    Inputs { events: Vec<InputEvent> },

    /// Window lost keyboard focus; every held key is released.
    FocusLost,

    /// Clip assets finished loading (sent once by the loader thread).
    AssetsLoaded(Vec<ClipAsset>),

    /// Window close requested.
    WindowClosed,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug, Error)]
pub(crate) enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    #[error("Event loop creation failed: {0}")]
    EventLoopCreation(#[source] winit::error::EventLoopError),

    /// Event loop execution error.
    #[error("Event loop error: {0}")]
    EventLoopExecution(#[source] winit::error::EventLoopError),
}
