//=========================================================================
// Frame Driver
//
// Adapts host frame callbacks into the engine's run loop.
//
// The host compositor decides when a frame is due and calls `draw` with
// a fresh device/context/target bundle. The driver keeps the graphics
// binding current, ticks the game exactly once, and re-arms by asking
// the host for another frame. The first callback doubles as startup:
// it seeds the surface record and starts the game.
//
// Key Design Decisions:
// - **Compare before store**: device-change detection compares incoming
//   handles against the previously stored pair before overwriting them,
//   and the resulting flag is forced off on the initializing call. The
//   first bundle is a set, not a change; treating it as a change would
//   trigger a full device rebind on startup.
// - **Disconnect is a guard, not an error**: a frame callback after
//   disconnect still updates the target and ticks the game; only the
//   re-arm is skipped. The host owns callback delivery and may let one
//   straggle in after tearing the surface down.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::Arc;
use std::time::Instant;

//=== External Crates =====================================================

use log::{error, info, trace};

//=== Internal Modules ====================================================

use crate::core::graphics::{ContextHandle, DeviceHandle, SharedGraphics, SharedSurface, TargetHandle};
use crate::game::RunBehavior;
use crate::platform::host::FrameRequestHost;
use crate::runtime::GameRunner;

//=== FrameDriver =========================================================

/// Receives surface callbacks and forwards them into the engine.
///
/// One driver exists per bridge. The host calls `connect` when the
/// surface comes up, `draw` once per composited frame,
/// `prepare_resources` when it sizes the target, and `disconnect` when
/// the surface goes away.
pub struct FrameDriver {
    runner: GameRunner,
    surface: SharedSurface,
    graphics: SharedGraphics,

    /// Re-arm capability; present only while the surface is connected.
    host: Option<Arc<dyn FrameRequestHost>>,

    /// Device/context pair from the previous callback, for change
    /// detection by identity.
    stored_device: Option<DeviceHandle>,
    stored_context: Option<ContextHandle>,
}

impl FrameDriver {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        runner: GameRunner,
        surface: SharedSurface,
        graphics: SharedGraphics,
    ) -> Self {
        Self {
            runner,
            surface,
            graphics,
            host: None,
            stored_device: None,
            stored_context: None,
        }
    }

    //--- Surface Lifecycle ------------------------------------------------

    /// Stores the host's frame-request capability. No other side effects.
    pub fn connect(&mut self, host: Arc<dyn FrameRequestHost>) {
        info!(target: "platform", "Surface connected");
        self.host = Some(host);
    }

    /// Drops the frame-request capability.
    ///
    /// Permanent as far as the driver is concerned: it never asks the
    /// host to reconnect. Frame callbacks arriving after this point are
    /// still serviced, minus the re-arm.
    pub fn disconnect(&mut self) {
        info!(target: "platform", "Surface disconnected");
        self.host = None;
    }

    //--- Frame Callback ---------------------------------------------------

    /// Services one "surface needs a frame" callback from the host.
    pub fn draw(&mut self, device: DeviceHandle, context: ContextHandle, target: TargetHandle) {
        let mut device_changed =
            self.stored_device != Some(device) || self.stored_context != Some(context);
        self.stored_device = Some(device);
        self.stored_context = Some(context);

        if !self.runner.initialized() {
            // First callback: seed the surface record and start the game.
            // The device is being set for the first time, not changed.
            self.surface.store_bundle(device, context, target);
            device_changed = false;

            if let Err(e) = self.runner.run(RunBehavior::Asynchronous) {
                error!(target: "platform", "Game start failed: {}", e);
            }
        }

        if device_changed {
            self.surface.store_bundle(device, context, target);
            self.graphics.update_device(device, context);
        }

        self.surface.store_target(target);
        self.graphics.update_target(target);
        self.graphics.reset_render_targets();
        self.runner.tick();

        match &self.host {
            Some(host) => host.request_frame(),
            None => trace!(target: "platform", "Surface torn down, skipping frame re-arm"),
        }
    }

    //--- Resource Preparation ---------------------------------------------

    /// Records the dimensions the host wants the next target to have.
    ///
    /// The host allocates the actual target from this size; the engine
    /// only exposes it through window-size queries. The present target
    /// time is accepted for interface parity and currently unused.
    pub fn prepare_resources(
        &mut self,
        _present_target: Instant,
        desired_width: f32,
        desired_height: f32,
    ) {
        trace!(
            target: "platform",
            "Resource preparation: {}x{}",
            desired_width, desired_height
        );
        self.surface.store_dimensions(desired_width, desired_height);
    }

    //--- Queries ----------------------------------------------------------

    pub fn runner(&self) -> &GameRunner {
        &self.runner
    }

    /// True while a frame-request capability is stored.
    pub fn connected(&self) -> bool {
        self.host.is_some()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::core::touch;
    use crate::core::window::GameWindow;
    use crate::game::{Game, GameContext};

    //--- Fixtures ---------------------------------------------------------

    #[derive(Default)]
    struct CountingHost {
        requests: AtomicUsize,
    }

    impl FrameRequestHost for CountingHost {
        fn request_frame(&self) {
            self.requests.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    struct TickProbe {
        initializes: AtomicUsize,
        ticks: AtomicUsize,
    }

    struct ProbeGame {
        probe: Arc<TickProbe>,
    }

    impl Game for ProbeGame {
        fn initialize(&mut self, _ctx: &mut GameContext<'_>) {
            self.probe.initializes.fetch_add(1, Ordering::SeqCst);
        }

        fn update(&mut self, _ctx: &mut GameContext<'_>) {
            self.probe.ticks.fetch_add(1, Ordering::SeqCst);
        }

        fn draw(&mut self, _ctx: &mut GameContext<'_>) {}
    }

    struct Rig {
        driver: FrameDriver,
        graphics: SharedGraphics,
        surface: SharedSurface,
        probe: Arc<TickProbe>,
    }

    fn make_rig() -> Rig {
        let _ = env_logger::builder().is_test(true).try_init();

        let probe = Arc::new(TickProbe::default());
        let surface = SharedSurface::new();
        let graphics = SharedGraphics::new();
        let (_tx, panel) = touch::channel();
        let runner = GameRunner::new(
            Box::new(ProbeGame { probe: probe.clone() }),
            panel,
            GameWindow::new(surface.clone()),
            String::new(),
        );
        let driver = FrameDriver::new(runner, surface.clone(), graphics.clone());
        Rig { driver, graphics, surface, probe }
    }

    const DEVICE_A: DeviceHandle = DeviceHandle(1);
    const CONTEXT_A: ContextHandle = ContextHandle(1);
    const DEVICE_B: DeviceHandle = DeviceHandle(2);
    const CONTEXT_B: ContextHandle = ContextHandle(2);

    //--- Startup ----------------------------------------------------------

    #[test]
    fn first_draw_starts_the_game_exactly_once() {
        let mut rig = make_rig();

        for frame in 0..5 {
            rig.driver.draw(DEVICE_A, CONTEXT_A, TargetHandle(frame));
        }

        assert!(rig.driver.runner().initialized());
        assert_eq!(rig.probe.initializes.load(Ordering::SeqCst), 1);
        assert_eq!(rig.probe.ticks.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn first_draw_seeds_the_surface_record() {
        let mut rig = make_rig();

        rig.driver.draw(DEVICE_A, CONTEXT_A, TargetHandle(3));

        let state = rig.surface.snapshot();
        assert_eq!(state.device, Some(DEVICE_A));
        assert_eq!(state.context, Some(CONTEXT_A));
        assert_eq!(state.target, Some(TargetHandle(3)));
    }

    //--- Device-Change Detection ------------------------------------------

    #[test]
    fn first_draw_does_not_rebind_the_device() {
        let mut rig = make_rig();

        rig.driver.draw(DEVICE_A, CONTEXT_A, TargetHandle(1));

        assert_eq!(rig.graphics.device_generation(), 0);
    }

    #[test]
    fn unchanged_handles_do_not_rebind() {
        let mut rig = make_rig();

        rig.driver.draw(DEVICE_A, CONTEXT_A, TargetHandle(1));
        rig.driver.draw(DEVICE_A, CONTEXT_A, TargetHandle(2));
        rig.driver.draw(DEVICE_A, CONTEXT_A, TargetHandle(3));

        assert_eq!(rig.graphics.device_generation(), 0);
    }

    #[test]
    fn swapped_device_rebinds_exactly_once() {
        let mut rig = make_rig();

        rig.driver.draw(DEVICE_A, CONTEXT_A, TargetHandle(1));
        rig.driver.draw(DEVICE_B, CONTEXT_B, TargetHandle(2));
        rig.driver.draw(DEVICE_B, CONTEXT_B, TargetHandle(3));

        assert_eq!(rig.graphics.device_generation(), 1);
        rig.graphics.with(|b| {
            assert_eq!(b.device(), Some(DEVICE_B));
            assert_eq!(b.context(), Some(CONTEXT_B));
        });
    }

    #[test]
    fn swapped_context_alone_also_rebinds() {
        let mut rig = make_rig();

        rig.driver.draw(DEVICE_A, CONTEXT_A, TargetHandle(1));
        rig.driver.draw(DEVICE_A, CONTEXT_B, TargetHandle(2));

        assert_eq!(rig.graphics.device_generation(), 1);
    }

    //--- Per-Frame Target Handling ----------------------------------------

    #[test]
    fn every_draw_refreshes_and_resets_the_target() {
        let mut rig = make_rig();

        rig.driver.draw(DEVICE_A, CONTEXT_A, TargetHandle(1));
        rig.graphics.bind_target(TargetHandle(99));

        rig.driver.draw(DEVICE_A, CONTEXT_A, TargetHandle(2));

        rig.graphics.with(|b| {
            assert_eq!(b.target(), Some(TargetHandle(2)));
            assert_eq!(b.bound_target(), Some(TargetHandle(2)));
        });
        assert_eq!(rig.surface.snapshot().target, Some(TargetHandle(2)));
    }

    //--- Re-Arming --------------------------------------------------------

    #[test]
    fn connected_draw_requests_another_frame() {
        let mut rig = make_rig();
        let host = Arc::new(CountingHost::default());
        rig.driver.connect(host.clone());

        rig.driver.draw(DEVICE_A, CONTEXT_A, TargetHandle(1));
        rig.driver.draw(DEVICE_A, CONTEXT_A, TargetHandle(2));

        assert_eq!(host.requests.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn disconnected_draw_still_ticks_but_does_not_rearm() {
        let mut rig = make_rig();
        let host = Arc::new(CountingHost::default());
        rig.driver.connect(host.clone());

        rig.driver.draw(DEVICE_A, CONTEXT_A, TargetHandle(1));
        rig.driver.disconnect();
        rig.driver.draw(DEVICE_A, CONTEXT_A, TargetHandle(2));

        assert_eq!(host.requests.load(Ordering::SeqCst), 1);
        assert_eq!(rig.probe.ticks.load(Ordering::SeqCst), 2);
        rig.graphics.with(|b| assert_eq!(b.target(), Some(TargetHandle(2))));
    }

    #[test]
    fn draw_without_ever_connecting_is_serviced() {
        let mut rig = make_rig();

        rig.driver.draw(DEVICE_A, CONTEXT_A, TargetHandle(1));

        assert_eq!(rig.probe.ticks.load(Ordering::SeqCst), 1);
        assert!(!rig.driver.connected());
    }

    //--- Resource Preparation ---------------------------------------------

    #[test]
    fn prepare_resources_sets_window_size_before_any_draw() {
        let mut rig = make_rig();

        rig.driver
            .prepare_resources(Instant::now(), 800.0, 480.0);

        let window = rig.driver.runner().window();
        assert_eq!(window.width(), 800.0);
        assert_eq!(window.height(), 480.0);
        assert_eq!(rig.probe.ticks.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn prepare_resources_tracks_the_latest_request() {
        let mut rig = make_rig();

        rig.driver.prepare_resources(Instant::now(), 800.0, 480.0);
        rig.driver.draw(DEVICE_A, CONTEXT_A, TargetHandle(1));
        rig.driver.prepare_resources(Instant::now(), 480.0, 800.0);

        assert_eq!(rig.driver.runner().window().size(), (480.0, 800.0));
    }
}
