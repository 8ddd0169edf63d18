//=========================================================================
// Surface State
//
// Shared record of the surface the host is currently compositing.
//
// Holds the device/context/target handle bundle from the most recent
// frame callback plus the dimensions the host last requested for the
// render target. Written only by the frame driver; read by the game
// window for size queries and by the renderer when it needs the raw
// bundle.
//
// Notes:
// The record is shared behind a mutex so a write from the host's
// callback thread is visible to the next read from the game's side.
// There is exactly one writer, so contention is a non-issue.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::{Arc, Mutex, MutexGuard};

//=== Internal Modules ====================================================

use super::{ContextHandle, DeviceHandle, TargetHandle};

//=== SurfaceState ========================================================

/// Snapshot of the host surface: current handle bundle and requested size.
///
/// Handles are `None` until the first frame callback arrives; dimensions
/// are zero until the host announces a desired target size (or the
/// attach-time surface size seeds them).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceState {
    /// Device identity from the most recent frame callback.
    pub device: Option<DeviceHandle>,

    /// Rendering context identity from the most recent frame callback.
    pub context: Option<ContextHandle>,

    /// Render target identity, refreshed on every frame callback.
    pub target: Option<TargetHandle>,

    /// Most recently requested target width, in pixels.
    pub width: f32,

    /// Most recently requested target height, in pixels.
    pub height: f32,
}

//=== SharedSurface =======================================================

/// Cloneable handle to the one shared [`SurfaceState`] record.
///
/// A clone refers to the same underlying record. The frame driver holds
/// the writing clone; the game window and renderer hold reading clones.
#[derive(Debug, Clone, Default)]
pub struct SharedSurface {
    inner: Arc<Mutex<SurfaceState>>,
}

impl SharedSurface {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self::default()
    }

    //--- Writers ----------------------------------------------------------

    /// Stores the full handle bundle. Used when the surface first connects
    /// and whenever the host swaps the device/context pair.
    pub fn store_bundle(
        &self,
        device: DeviceHandle,
        context: ContextHandle,
        target: TargetHandle,
    ) {
        let mut state = self.lock();
        state.device = Some(device);
        state.context = Some(context);
        state.target = Some(target);
    }

    /// Refreshes the render target identity for the current frame.
    pub fn store_target(&self, target: TargetHandle) {
        self.lock().target = Some(target);
    }

    /// Records the dimensions the host wants the render target to have.
    pub fn store_dimensions(&self, width: f32, height: f32) {
        let mut state = self.lock();
        state.width = width;
        state.height = height;
    }

    //--- Readers ----------------------------------------------------------

    /// Returns the last requested (width, height).
    pub fn dimensions(&self) -> (f32, f32) {
        let state = self.lock();
        (state.width, state.height)
    }

    /// Returns a copy of the full record.
    pub fn snapshot(&self) -> SurfaceState {
        *self.lock()
    }

    //--- Internal Helpers -------------------------------------------------

    // A poisoned lock still holds the last written state, which remains
    // the latest surface information available.
    fn lock(&self) -> MutexGuard<'_, SurfaceState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
