//=========================================================================
// Touch Queue
//
// Producer half of the touch transport.
//
// The queue is an unbounded MPSC channel used in a single-producer
// discipline: the pointer normalizer enqueues, the touch panel drains.
// Channel FIFO ordering carries the no-reorder invariant; unboundedness
// carries the no-drop invariant.
//
//=========================================================================

//=== External Crates =====================================================

use crossbeam_channel::{unbounded, Sender};
use log::warn;

//=== Internal Modules ====================================================

use super::event::TouchEvent;
use super::panel::TouchPanel;

//=== Construction ========================================================

/// Creates a connected queue: the sender half for the pointer side and
/// the panel (receiver half) for the game side.
pub fn channel() -> (TouchSender, TouchPanel) {
    let (tx, rx) = unbounded();
    (TouchSender { tx }, TouchPanel::new(rx))
}

//=== TouchSender =========================================================

/// Enqueues normalized touch events for the panel to drain.
#[derive(Debug, Clone)]
pub struct TouchSender {
    tx: Sender<TouchEvent>,
}

impl TouchSender {
    /// Appends an event to the queue.
    ///
    /// If the panel side is gone (game torn down while host input is
    /// still arriving), the event is dropped with a warning. The host
    /// keeps delivering input regardless, so this must not panic.
    pub fn enqueue(&self, event: TouchEvent) {
        if self.tx.send(event).is_err() {
            warn!(
                target: "touch",
                "Touch panel disconnected, dropping {:?} for pointer {}",
                event.phase, event.id
            );
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::super::event::TouchPhase;
    use super::*;

    #[test]
    fn enqueued_events_reach_the_panel() {
        let (tx, mut panel) = channel();

        tx.enqueue(TouchEvent::new(1, TouchPhase::Pressed, 5.0, 6.0));
        tx.enqueue(TouchEvent::new(1, TouchPhase::Released, 5.0, 6.0));

        let events = panel.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].phase, TouchPhase::Pressed);
        assert_eq!(events[1].phase, TouchPhase::Released);
    }

    #[test]
    fn enqueue_after_panel_dropped_does_not_panic() {
        let (tx, panel) = channel();
        drop(panel);

        tx.enqueue(TouchEvent::new(3, TouchPhase::Moved, 1.0, 2.0));
    }
}
