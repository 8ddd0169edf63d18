//=========================================================================
// Pointer Normalizer
//
// Converts raw host pointer events into normalized touch events.
//
// Hosts deliver pointer positions in device-independent pixels (DIPs);
// the game works in physical pixels. The normalizer applies the
// display's DIP scale factor and enqueues the result. That is the whole
// job: no filtering, no deduplication, no gesture recognition, no
// per-pointer state. Gesture logic lives downstream of the queue.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::Arc;

//=== External Crates =====================================================

use log::trace;

//=== Internal Modules ====================================================

use crate::core::touch::{TouchEvent, TouchPhase, TouchSender};
use crate::platform::host::DisplayMetrics;

//=== Constants ===========================================================

/// Baseline DPI at which one DIP equals one physical pixel.
pub const REFERENCE_DPI: f32 = 96.0;

//=== PointerNormalizer ===================================================

/// Stateless DIP-to-physical transform in front of the touch queue.
///
/// Display metrics are queried per event rather than cached; the scale
/// factor follows display changes between events.
pub struct PointerNormalizer {
    queue: TouchSender,
    display: Arc<dyn DisplayMetrics>,
}

impl PointerNormalizer {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(queue: TouchSender, display: Arc<dyn DisplayMetrics>) -> Self {
        Self { queue, display }
    }

    //--- Pointer Callbacks ------------------------------------------------

    /// Pointer made contact at `(x, y)` DIPs.
    pub fn on_pressed(&self, id: u32, x: f32, y: f32) {
        self.push(id, TouchPhase::Pressed, x, y);
    }

    /// Pointer moved to `(x, y)` DIPs while in contact.
    pub fn on_moved(&self, id: u32, x: f32, y: f32) {
        self.push(id, TouchPhase::Moved, x, y);
    }

    /// Pointer broke contact at `(x, y)` DIPs.
    pub fn on_released(&self, id: u32, x: f32, y: f32) {
        self.push(id, TouchPhase::Released, x, y);
    }

    //--- Internal Helpers -------------------------------------------------

    fn push(&self, id: u32, phase: TouchPhase, x: f32, y: f32) {
        let scale = self.display.logical_dpi() / REFERENCE_DPI;
        let event = TouchEvent::new(id, phase, x * scale, y * scale);

        trace!(
            target: "platform::input",
            "Pointer {} {:?} at ({}, {}) physical",
            id, phase, event.x, event.y
        );
        self.queue.enqueue(event);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::core::touch;

    //--- Fixtures ---------------------------------------------------------

    struct FixedDpi(f32);

    impl DisplayMetrics for FixedDpi {
        fn logical_dpi(&self) -> f32 {
            self.0
        }
    }

    /// DPI readable as f32 bits, mutable between events.
    struct AdjustableDpi(AtomicU32);

    impl AdjustableDpi {
        fn new(dpi: f32) -> Self {
            Self(AtomicU32::new(dpi.to_bits()))
        }

        fn set(&self, dpi: f32) {
            self.0.store(dpi.to_bits(), Ordering::SeqCst);
        }
    }

    impl DisplayMetrics for AdjustableDpi {
        fn logical_dpi(&self) -> f32 {
            f32::from_bits(self.0.load(Ordering::SeqCst))
        }
    }

    fn make_normalizer(dpi: f32) -> (PointerNormalizer, touch::TouchPanel) {
        let (tx, panel) = touch::channel();
        (PointerNormalizer::new(tx, Arc::new(FixedDpi(dpi))), panel)
    }

    //--- Scaling ----------------------------------------------------------

    #[test]
    fn baseline_dpi_is_the_identity_transform() {
        let (normalizer, mut panel) = make_normalizer(96.0);

        normalizer.on_pressed(1, 120.0, 80.0);

        let events = panel.drain();
        assert_eq!(events, vec![TouchEvent::new(1, TouchPhase::Pressed, 120.0, 80.0)]);
    }

    #[test]
    fn scale_is_exact_multiplication_by_dpi_over_96() {
        // Known (dpi, raw, expected) triples.
        let cases = [
            (144.0_f32, (100.0_f32, 60.0_f32), (150.0_f32, 90.0_f32)),
            (192.0, (10.0, 20.0), (20.0, 40.0)),
            (240.0, (4.0, 8.0), (10.0, 20.0)),
            (48.0, (100.0, 100.0), (50.0, 50.0)),
        ];

        for (dpi, (raw_x, raw_y), (want_x, want_y)) in cases {
            let (normalizer, mut panel) = make_normalizer(dpi);
            normalizer.on_moved(7, raw_x, raw_y);

            let events = panel.drain();
            assert_eq!(events.len(), 1);
            assert_eq!((events[0].x, events[0].y), (want_x, want_y), "dpi {}", dpi);
        }
    }

    #[test]
    fn each_callback_maps_to_its_phase() {
        let (normalizer, mut panel) = make_normalizer(96.0);

        normalizer.on_pressed(1, 0.0, 0.0);
        normalizer.on_moved(1, 1.0, 1.0);
        normalizer.on_released(1, 2.0, 2.0);

        let phases: Vec<_> = panel.drain().into_iter().map(|e| e.phase).collect();
        assert_eq!(
            phases,
            vec![TouchPhase::Pressed, TouchPhase::Moved, TouchPhase::Released]
        );
    }

    //--- Ordering ---------------------------------------------------------

    #[test]
    fn events_dequeue_in_callback_order_across_pointers() {
        let (normalizer, mut panel) = make_normalizer(96.0);

        normalizer.on_pressed(1, 1.0, 1.0);
        normalizer.on_pressed(2, 2.0, 2.0);
        normalizer.on_moved(2, 3.0, 3.0);
        normalizer.on_moved(1, 4.0, 4.0);
        normalizer.on_released(2, 5.0, 5.0);
        normalizer.on_released(1, 6.0, 6.0);

        let ids: Vec<_> = panel.drain().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 2, 1, 2, 1]);
    }

    //--- Display Changes --------------------------------------------------

    #[test]
    fn dpi_is_queried_per_event() {
        let display = Arc::new(AdjustableDpi::new(96.0));
        let (tx, mut panel) = touch::channel();
        let normalizer = PointerNormalizer::new(tx, display.clone());

        normalizer.on_pressed(1, 100.0, 100.0);
        display.set(192.0);
        normalizer.on_moved(1, 100.0, 100.0);

        let events = panel.drain();
        assert_eq!((events[0].x, events[0].y), (100.0, 100.0));
        assert_eq!((events[1].x, events[1].y), (200.0, 200.0));
    }
}
