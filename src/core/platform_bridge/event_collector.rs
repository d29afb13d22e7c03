//=========================================================================
// Event Collector
//=========================================================================
//
// Platform event collector with bounded polling and shutdown detection.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → input_batches
//                                             → pending assets
//                                             → focus-lost flag
//                                             → TickControl
//
// Never blocks: tick pacing belongs to the orchestrator.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::animation::ClipAsset;
use crate::core::input::event::InputEvent;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Collects platform events with bounded polling and batch extraction.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    input_batches: Vec<Vec<InputEvent>>,
    assets: Option<Vec<ClipAsset>>,
    focus_lost: bool,
}

impl EventCollector {
    const MAX_EVENTS_PER_FRAME: usize = 100;

    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            input_batches: Vec::with_capacity(4),
            assets: None,
            focus_lost: false,
        }
    }

    /// Collects pending platform events (bounded to prevent starvation).
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.input_batches.clear();
        let mut drained = 0;

        while drained < Self::MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= Self::MAX_EVENTS_PER_FRAME {
            warn!(target: "core", "Event queue backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }

    /// Returns collected input batches for this frame.
    #[cfg(test)]
    pub(crate) fn batches(&self) -> &[Vec<InputEvent>] {
        &self.input_batches
    }

    /// Takes ownership of collected input batches, leaving empty vec.
    pub(crate) fn take_batches(&mut self) -> Vec<Vec<InputEvent>> {
        std::mem::take(&mut self.input_batches)
    }

    /// Takes a pending asset delivery, if one arrived.
    pub(crate) fn take_assets(&mut self) -> Option<Vec<ClipAsset>> {
        self.assets.take()
    }

    /// Returns `true` once per focus loss.
    pub(crate) fn take_focus_lost(&mut self) -> bool {
        std::mem::take(&mut self.focus_lost)
    }

    fn handle_event(&mut self, event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::Inputs { events } => {
                if !events.is_empty() {
                    self.input_batches.push(events);
                }
            }
            PlatformEvent::FocusLost => {
                // Presses collected before the loss are already stale
                self.input_batches.clear();
                self.focus_lost = true;
            }
            PlatformEvent::AssetsLoaded(assets) => {
                info!(target: "core", "Received {} clip assets", assets.len());
                if self.assets.replace(assets).is_some() {
                    warn!(target: "core", "Superseded an unapplied asset delivery");
                }
            }
            PlatformEvent::WindowClosed => return TickControl::Exit,
        }
        TickControl::Continue
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;
    use crossbeam_channel::unbounded;

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key }
    }

    #[test]
    fn collect_handles_empty_queue() {
        let (_tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        let result = collector.collect_frame();

        assert_eq!(result, TickControl::Continue);
        assert!(collector.batches().is_empty());
    }

    #[test]
    fn collect_aggregates_multiple_events() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Inputs { events: vec![key_down(KeyCode::KeyW)] }).unwrap();
        tx.send(PlatformEvent::Inputs { events: vec![key_down(KeyCode::ShiftLeft)] }).unwrap();

        let result = collector.collect_frame();

        assert_eq!(result, TickControl::Continue);
        assert_eq!(collector.batches().len(), 2);
    }

    #[test]
    fn collect_skips_empty_batches() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Inputs { events: vec![] }).unwrap();
        collector.collect_frame();

        assert!(collector.batches().is_empty());
    }

    #[test]
    fn collect_returns_exit_on_window_closed() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::WindowClosed).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }

    #[test]
    fn collect_clears_previous_batches() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Inputs { events: vec![key_down(KeyCode::Space)] }).unwrap();
        collector.collect_frame();
        assert_eq!(collector.batches().len(), 1);

        collector.collect_frame();
        assert!(collector.batches().is_empty());
    }

    #[test]
    fn collect_returns_exit_on_disconnect() {
        let (tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        drop(tx);

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }

    #[test]
    fn collect_is_bounded_per_frame() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        for _ in 0..150 {
            tx.send(PlatformEvent::Inputs { events: vec![key_down(KeyCode::KeyW)] }).unwrap();
        }

        collector.collect_frame();
        assert_eq!(collector.batches().len(), 100);

        collector.collect_frame();
        assert_eq!(collector.batches().len(), 50);
    }

    //=== Assets & Focus ==================================================

    #[test]
    fn assets_are_taken_once() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::AssetsLoaded(ClipAsset::standard_set())).unwrap();
        collector.collect_frame();

        assert_eq!(collector.take_assets().map(|a| a.len()), Some(5));
        assert!(collector.take_assets().is_none());
    }

    #[test]
    fn focus_lost_drops_earlier_batches() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Inputs { events: vec![key_down(KeyCode::KeyW)] }).unwrap();
        tx.send(PlatformEvent::FocusLost).unwrap();
        tx.send(PlatformEvent::Inputs { events: vec![key_down(KeyCode::Space)] }).unwrap();
        collector.collect_frame();

        assert!(collector.take_focus_lost());
        assert!(!collector.take_focus_lost());
        assert_eq!(collector.take_batches(), vec![vec![key_down(KeyCode::Space)]]);
    }
}
