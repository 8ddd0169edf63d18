//=========================================================================
// Host Capabilities
//
// The two capabilities the bridge consumes from its host.
//
// Hosts are opaque: the bridge never owns a window, a compositor, or a
// display. It receives a frame-request capability when the surface
// connects and queries display metrics when pointer events arrive.
// Anything that can provide these two traits can host the bridge.
//
//=========================================================================

//=== FrameRequestHost ====================================================

/// Fire-and-forget "another frame, please" capability.
///
/// Handed to the frame driver when the surface connects. Requesting a
/// frame only schedules a future callback; it must not block and must
/// tolerate being called from the middle of a frame callback.
pub trait FrameRequestHost: Send + Sync {
    fn request_frame(&self);
}

//=== DisplayMetrics ======================================================

/// Query for the presenting display's logical DPI.
///
/// Hosts guarantee a positive value. Queried per pointer event rather
/// than cached: logical DPI changes when the surface moves between
/// displays or the device rotates.
pub trait DisplayMetrics: Send + Sync {
    fn logical_dpi(&self) -> f32;
}
