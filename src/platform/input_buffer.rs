//=========================================================================
// Input Buffer
//
// Collects key transitions between two platform frames. Acts as a
// transient aggregator between the winit event loop and the bridge
// channel.
//
// Responsibilities:
// - Store incoming key transitions per frame, in arrival order
// - Drop exact consecutive duplicates (auto-repeat that slipped through)
// - Hand the whole frame over via `drain()`
//
// Notes:
// The buffer keeps its allocation across frames; `drain()` swaps in a
// fresh vector of the same capacity.
//=========================================================================

//=== Internal Modules ====================================================
use crate::core::input::event::InputEvent;

//=== InputBuffer Struct ==================================================
pub(crate) struct InputBuffer {
    events: Vec<InputEvent>,
}

impl InputBuffer {
    const BASE_CAPACITY: usize = 64;

    //--- Construction -----------------------------------------------------
    pub(crate) fn new() -> Self {
        Self {
            events: Vec::with_capacity(Self::BASE_CAPACITY),
        }
    }

    //--- Event Handling ---------------------------------------------------
    //
    // Appends a key transition. Duplicate consecutive events are ignored
    // to prevent flooding.
    //
    pub(crate) fn push(&mut self, event: InputEvent) {
        if self.events.last() != Some(&event) {
            self.events.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns this frame's events, or `None` if nothing was buffered so
    // empty frames are never sent.
    //
    pub(crate) fn drain(&mut self) -> Option<Vec<InputEvent>> {
        if self.is_empty() {
            return None;
        }
        let capacity = self.events.capacity();
        Some(std::mem::replace(&mut self.events, Vec::with_capacity(capacity)))
    }

    //--- Utilities --------------------------------------------------------
    pub(crate) fn clear(&mut self) {
        self.events.clear();
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
