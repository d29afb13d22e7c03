//=========================================================================
// Platform Subsystem
//
// Bridges winit (OS-level events) with the core thread via channels.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────────┐
//  │  Winit Event Loop        │    │  Core Systems        │
//  │   ↓                      │    │                      │
//  │  InputProcessor          │    │  InputSystem         │
//  │   └─ Converts keys,      │    │  ↓                   │
//  │      drops OS repeat     │    │  FrameLoop           │
//  │   ↓                      │    │   ├─ Arbiter         │
//  │  InputBuffer             │    │   ├─ Blender         │
//  │   ↓                      │    │   └─ WorldScroller   │
//  │  RedrawRequested         │    │                      │
//  │   ├─ flush ──────────────┼───>│  PlatformEvent       │
//  │   └─ present <───────────┼────┤  FrameSnapshot       │
//  └──────────────────────────┘    └──────────────────────┘
//
//  Frame Boundary: RedrawRequested
//    → All buffered input sent atomically
//    → Latest snapshot presented (window title)
//    → Core processes at fixed TPS (independent of refresh rate)
//    → Empty buffers NOT sent
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: Batches all input atomically,
//   ensuring deterministic order even with high event rates
// - **Focus loss releases everything**: a key released while another
//   window has focus never reaches us, so the core drops all held codes
// - **Graceful channel disconnect**: If core thread dies, platform logs
//   warning but continues running to allow window closure
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `Engine::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::{Receiver, Sender};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::frame_loop::FrameSnapshot;
use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Platform ============================================================

const WINDOW_TITLE: &str = "Treadmill Locomotion";

/// Window manager, input aggregator and snapshot presenter.
///
/// Runs on the main thread and talks to the core thread exclusively
/// through two channels: events out, snapshots in.
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    /// Buffers key transitions until frame boundary.
    buffer: InputBuffer,

    /// Channel to send events to core thread.
    event_sender: Sender<PlatformEvent>,

    /// Snapshots published by the core thread.
    snapshots: Receiver<FrameSnapshot>,

    /// Most recent snapshot, kept across frames with no new data.
    latest: Option<FrameSnapshot>,

    input_processor: InputProcessor,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates a new platform instance.
    ///
    /// Does not create window yet - that happens lazily in `resumed()`.
    pub fn new(event_sender: Sender<PlatformEvent>, snapshots: Receiver<FrameSnapshot>) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            buffer: InputBuffer::new(),
            event_sender,
            snapshots,
            latest: None,
            input_processor: InputProcessor::new(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS winit requirement).
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Flushes buffered key transitions to the core thread.
    ///
    /// If the channel is disconnected (core thread panicked or exited
    /// early), logs a warning and drops the events so the user can still
    /// close the window.
    fn flush_input_buffer(&mut self) {
        if let Some(events) = self.buffer.drain() {
            let count = events.len();
            trace!(target: "platform::input", "Flushing {} key events", count);

            if self.event_sender.send(PlatformEvent::Inputs { events }).is_err() {
                warn!(
                    target: "platform::input",
                    "Channel disconnected, dropping {} events",
                    count
                );
            }
        }
    }

    /// Pulls every pending snapshot and keeps the newest.
    ///
    /// Returns `true` if a new snapshot arrived.
    fn poll_snapshots(&mut self) -> bool {
        match self.snapshots.try_iter().last() {
            Some(snapshot) => {
                self.latest = Some(snapshot);
                true
            }
            None => false,
        }
    }

    fn present(&mut self) {
        if !self.poll_snapshots() {
            return;
        }
        if let (Some(window), Some(snapshot)) = (&self.window, &self.latest) {
            window.set_title(&format_title(snapshot));
        }
    }

    fn notify(&self, event: PlatformEvent) {
        if self.event_sender.send(event).is_err() {
            debug!(target: "platform", "Core thread already gone");
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

/// Window title summarizing a snapshot.
fn format_title(snapshot: &FrameSnapshot) -> String {
    let mut title = format!(
        "{} | {} | speed {:.2} | offset {:.2}",
        WINDOW_TITLE, snapshot.active_action, snapshot.speed, snapshot.offset
    );
    if snapshot.locked {
        title.push_str(" | locked");
    }
    title
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when app becomes active (startup or mobile resume).
    ///
    /// Creates the window if it doesn't exist yet.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(800, 600));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.notify(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.notify(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::Focused(false) => {
                debug!(target: "platform::input", "Focus lost, discarding buffered input");
                self.buffer.clear();
                self.notify(PlatformEvent::FocusLost);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(key_event) {
                    self.buffer.push(event);
                } else {
                    trace!(target: "platform::input", "Repeat or unmapped key ignored");
                }
            }

            WindowEvent::RedrawRequested => {
                // Frame boundary: flush input, present latest state
                self.flush_input_buffer();
                self.present();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
