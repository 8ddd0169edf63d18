//=========================================================================
// Touch Panel
//
// Consumer half of the touch transport.
//
// Drained once per game tick: everything that arrived since the last
// tick comes out in arrival order, ready for the game's input handling.
// Draining never blocks; an empty queue yields an empty drain.
//
//=========================================================================

//=== External Crates =====================================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::debug;

//=== Internal Modules ====================================================

use super::event::TouchEvent;

//=== TouchPanel ==========================================================

/// Drains queued touch events in arrival order.
#[derive(Debug)]
pub struct TouchPanel {
    rx: Receiver<TouchEvent>,
}

impl TouchPanel {
    pub(crate) fn new(rx: Receiver<TouchEvent>) -> Self {
        Self { rx }
    }

    //--- Draining ---------------------------------------------------------

    /// Appends all currently queued events to `out`, oldest first.
    ///
    /// A disconnected producer just ends the drain: the sender half died
    /// with the pointer side during teardown, and whatever was already
    /// queued has still been delivered.
    pub fn drain_into(&mut self, out: &mut Vec<TouchEvent>) {
        loop {
            match self.rx.try_recv() {
                Ok(event) => out.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    debug!(target: "touch", "Touch queue producer disconnected");
                    break;
                }
            }
        }
    }

    /// Convenience wrapper returning a fresh vector.
    pub fn drain(&mut self) -> Vec<TouchEvent> {
        let mut events = Vec::new();
        self.drain_into(&mut events);
        events
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::super::event::TouchPhase;
    use super::super::queue::channel;
    use super::*;

    #[test]
    fn drain_on_empty_queue_yields_nothing() {
        let (_tx, mut panel) = channel();
        assert!(panel.drain().is_empty());
    }

    #[test]
    fn drain_preserves_arrival_order() {
        let (tx, mut panel) = channel();

        // Mixed ids and phases, deliberately interleaved.
        let sequence = [
            TouchEvent::new(1, TouchPhase::Pressed, 1.0, 1.0),
            TouchEvent::new(2, TouchPhase::Pressed, 2.0, 2.0),
            TouchEvent::new(1, TouchPhase::Moved, 3.0, 3.0),
            TouchEvent::new(2, TouchPhase::Moved, 4.0, 4.0),
            TouchEvent::new(1, TouchPhase::Released, 5.0, 5.0),
            TouchEvent::new(2, TouchPhase::Released, 6.0, 6.0),
        ];
        for event in sequence {
            tx.enqueue(event);
        }

        assert_eq!(panel.drain(), sequence.to_vec());
    }

    #[test]
    fn drain_empties_the_queue() {
        let (tx, mut panel) = channel();
        tx.enqueue(TouchEvent::new(1, TouchPhase::Pressed, 0.0, 0.0));

        assert_eq!(panel.drain().len(), 1);
        assert!(panel.drain().is_empty());
    }

    #[test]
    fn drain_into_appends_without_clearing() {
        let (tx, mut panel) = channel();
        let mut out = vec![TouchEvent::new(9, TouchPhase::Released, 9.0, 9.0)];

        tx.enqueue(TouchEvent::new(1, TouchPhase::Pressed, 1.0, 1.0));
        panel.drain_into(&mut out);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].id, 9);
        assert_eq!(out[1].id, 1);
    }

    #[test]
    fn drain_survives_producer_disconnect() {
        let (tx, mut panel) = channel();
        tx.enqueue(TouchEvent::new(1, TouchPhase::Pressed, 1.0, 1.0));
        drop(tx);

        // Already-queued event is still delivered.
        assert_eq!(panel.drain().len(), 1);
        assert!(panel.drain().is_empty());
    }
}
