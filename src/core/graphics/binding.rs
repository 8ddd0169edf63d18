//=========================================================================
// Graphics Binding
//
// The engine's attachment point to the host's graphics objects.
//
// The renderer draws against whatever device/context/target this binding
// currently names. The frame driver keeps the binding current: a full
// device rebind when the host swaps the device or context, a target
// update on every frame, and a reset of the bound targets back to the
// frame's default before the tick runs.
//
// Notes:
// Each device rebind bumps a generation counter. Renderer-side caches
// keyed on device objects compare generations to find out their objects
// died with the old device.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::{Arc, Mutex, MutexGuard};

//=== External Crates =====================================================

use log::{info, trace};

//=== Internal Modules ====================================================

use super::{ContextHandle, DeviceHandle, TargetHandle};

//=== GraphicsBinding =====================================================

/// Current device/context/target attachment of the renderer.
///
/// Device and context are recorded here only when a rebind happens; the
/// startup bundle lives in the surface record, where the renderer picks
/// it up when it first comes online.
#[derive(Debug, Default)]
pub struct GraphicsBinding {
    device: Option<DeviceHandle>,
    context: Option<ContextHandle>,

    /// Default target for the current frame (the host's back buffer).
    target: Option<TargetHandle>,

    /// Target the render pipeline is bound to right now. Draw passes may
    /// point this at offscreen targets; a reset points it back at the
    /// frame's default.
    bound: Option<TargetHandle>,

    /// Incremented on every device rebind.
    generation: u64,
}

impl GraphicsBinding {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Updates ----------------------------------------------------------

    /// Rebinds the renderer to a new device/context pair.
    ///
    /// Everything created against the previous device is invalid after
    /// this call; the generation bump is how downstream caches learn that.
    pub fn update_device(&mut self, device: DeviceHandle, context: ContextHandle) {
        self.device = Some(device);
        self.context = Some(context);
        self.generation += 1;

        info!(
            target: "graphics",
            "Device rebind: {:?}/{:?} (generation {})",
            device, context, self.generation
        );
    }

    /// Makes `target` the default render target for the current frame.
    pub fn update_target(&mut self, target: TargetHandle) {
        trace!(target: "graphics", "Target update: {:?}", target);
        self.target = Some(target);
    }

    /// Rebinds the pipeline to the frame's default target.
    pub fn reset_render_targets(&mut self) {
        self.bound = self.target;
    }

    /// Binds an arbitrary target (offscreen passes).
    pub fn bind_target(&mut self, target: TargetHandle) {
        self.bound = Some(target);
    }

    //--- Queries ----------------------------------------------------------

    pub fn device(&self) -> Option<DeviceHandle> {
        self.device
    }

    pub fn context(&self) -> Option<ContextHandle> {
        self.context
    }

    pub fn target(&self) -> Option<TargetHandle> {
        self.target
    }

    pub fn bound_target(&self) -> Option<TargetHandle> {
        self.bound
    }

    pub fn device_generation(&self) -> u64 {
        self.generation
    }
}

//=== SharedGraphics ======================================================

/// Cloneable handle to the one shared [`GraphicsBinding`].
///
/// The frame driver holds the writing clone; the renderer holds a
/// reading clone. Forwarding methods take the lock per call, which
/// matches the callback-granularity access pattern on both sides.
#[derive(Debug, Clone, Default)]
pub struct SharedGraphics {
    inner: Arc<Mutex<GraphicsBinding>>,
}

impl SharedGraphics {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self::default()
    }

    //--- Forwarding -------------------------------------------------------

    pub fn update_device(&self, device: DeviceHandle, context: ContextHandle) {
        self.lock().update_device(device, context);
    }

    pub fn update_target(&self, target: TargetHandle) {
        self.lock().update_target(target);
    }

    pub fn reset_render_targets(&self) {
        self.lock().reset_render_targets();
    }

    pub fn bind_target(&self, target: TargetHandle) {
        self.lock().bind_target(target);
    }

    pub fn device_generation(&self) -> u64 {
        self.lock().device_generation()
    }

    pub fn bound_target(&self) -> Option<TargetHandle> {
        self.lock().bound_target()
    }

    /// Runs `f` with the binding locked, for multi-field reads.
    pub fn with<R>(&self, f: impl FnOnce(&GraphicsBinding) -> R) -> R {
        f(&self.lock())
    }

    //--- Internal Helpers -------------------------------------------------

    fn lock(&self) -> MutexGuard<'_, GraphicsBinding> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_binding_has_generation_zero() {
        let binding = GraphicsBinding::new();
        assert_eq!(binding.device_generation(), 0);
        assert!(binding.device().is_none());
    }

    #[test]
    fn update_device_bumps_generation() {
        let mut binding = GraphicsBinding::new();

        binding.update_device(DeviceHandle(1), ContextHandle(1));
        assert_eq!(binding.device_generation(), 1);

        binding.update_device(DeviceHandle(2), ContextHandle(2));
        assert_eq!(binding.device_generation(), 2);
        assert_eq!(binding.device(), Some(DeviceHandle(2)));
        assert_eq!(binding.context(), Some(ContextHandle(2)));
    }

    #[test]
    fn update_target_does_not_bump_generation() {
        let mut binding = GraphicsBinding::new();
        binding.update_target(TargetHandle(7));

        assert_eq!(binding.device_generation(), 0);
        assert_eq!(binding.target(), Some(TargetHandle(7)));
    }

    #[test]
    fn reset_rebinds_the_default_target() {
        let mut binding = GraphicsBinding::new();
        binding.update_target(TargetHandle(7));
        binding.bind_target(TargetHandle(42));
        assert_eq!(binding.bound_target(), Some(TargetHandle(42)));

        binding.reset_render_targets();
        assert_eq!(binding.bound_target(), Some(TargetHandle(7)));
    }

    #[test]
    fn shared_clones_observe_writes() {
        let writer = SharedGraphics::new();
        let reader = writer.clone();

        writer.update_device(DeviceHandle(3), ContextHandle(4));

        assert_eq!(reader.device_generation(), 1);
        reader.with(|b| {
            assert_eq!(b.device(), Some(DeviceHandle(3)));
            assert_eq!(b.context(), Some(ContextHandle(4)));
        });
    }
}
