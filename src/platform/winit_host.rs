//=========================================================================
// Desktop Host
//
// Plays the host role on desktop via Winit.
//
// Architecture:
// ```text
//  Winit Event Loop:                      Bridge:
//  ┌──────────────────────────┐          ┌───────────────────────┐
//  │  RedrawRequested         │ ───────▶ │  FrameDriver::draw    │
//  │  Resized                 │ ───────▶ │   ::prepare_resources │
//  │  CursorMoved/MouseInput/ │          │                       │
//  │  Touch (as DIPs)         │ ───────▶ │  PointerNormalizer    │
//  │  CloseRequested          │ ───────▶ │  FrameDriver::        │
//  │                          │          │    disconnect         │
//  │  Window::request_redraw  │ ◀─────── │  (re-arm inside draw) │
//  └──────────────────────────┘          └───────────────────────┘
// ```
//
// Key Design Decisions:
// - **The window IS the frame-request capability**: `request_redraw` is
//   fire-and-forget and callable mid-callback, which is exactly the
//   re-arm contract. The driver connecting to the window closes the
//   pump loop.
// - **Synthetic handle identities**: desktop has no compositor-supplied
//   device objects, so the host fabricates them. Device and context are
//   stable for the window's lifetime; the target cycles through a small
//   ring the way swapchain images do, exercising the per-frame target
//   update.
// - **Pointer events are delivered in DIPs**: Winit reports physical
//   coordinates, hosts deliver DIPs, so positions are divided by the
//   scale factor before entering the normalizer. Logical DPI is
//   `96 x scale factor`.
// - **Main thread requirement**: Winit mandates the main thread on
//   macOS/iOS, so `run()` must be called from the thread that owns the
//   process entry point.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Instant;

//=== External Crates =====================================================

use log::{debug, error, info};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, MouseButton, Touch, TouchPhase as WinitTouchPhase, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

//=== Internal Modules ====================================================

use crate::bridge::SurfaceBridge;
use crate::core::graphics::{ContextHandle, DeviceHandle, TargetHandle};
use crate::platform::host::{DisplayMetrics, FrameRequestHost};
use crate::platform::pointer::REFERENCE_DPI;

//=== Constants ===========================================================

/// Device identity for the lifetime of the desktop window.
const DESKTOP_DEVICE: DeviceHandle = DeviceHandle(1);

/// Context identity for the lifetime of the desktop window.
const DESKTOP_CONTEXT: ContextHandle = ContextHandle(1);

/// Number of render targets in the synthetic swapchain ring.
const TARGET_RING: u64 = 3;

/// Pointer id under which mouse input emulates a single touch contact.
const MOUSE_POINTER_ID: u32 = 0;

//=== Winit Integration ===================================================

/// `request_redraw` satisfies the re-arm contract directly.
impl FrameRequestHost for Window {
    fn request_frame(&self) {
        self.request_redraw();
    }
}

//=== DesktopDisplay ======================================================

/// Display metrics backed by the Winit window's scale factor.
///
/// Created before the window exists (the bridge needs it at attach
/// time) and updated by the host when the window reports its actual
/// scale factor. Reads are lock-free; DPI is stored as f32 bits.
#[derive(Debug)]
pub struct DesktopDisplay {
    dpi_bits: AtomicU32,
}

impl DesktopDisplay {
    pub fn new() -> Self {
        Self {
            dpi_bits: AtomicU32::new(REFERENCE_DPI.to_bits()),
        }
    }

    pub(crate) fn set_scale_factor(&self, scale_factor: f64) {
        let dpi = REFERENCE_DPI * scale_factor as f32;
        self.dpi_bits.store(dpi.to_bits(), Ordering::Relaxed);
    }
}

impl Default for DesktopDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayMetrics for DesktopDisplay {
    fn logical_dpi(&self) -> f32 {
        f32::from_bits(self.dpi_bits.load(Ordering::Relaxed))
    }
}

//=== HostError ===========================================================

/// Desktop host initialization and runtime errors.
///
/// Typically fatal: without an event loop there is no host.
#[derive(Debug)]
pub enum HostError {
    /// Failed to create the event loop (rare, indicates OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error.
    EventLoopExecution(winit::error::EventLoopError),
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
        }
    }
}

impl std::error::Error for HostError {}

//=== DesktopHost =========================================================

/// Winit-driven host for an attached [`SurfaceBridge`].
///
/// # Lifecycle
///
/// 1. **Construction**: `DesktopHost::new(bridge, display)`
/// 2. **Execution**: `host.run()` blocks in the event loop
/// 3. **Frame pump**: first `RedrawRequested` starts the game; each
///    subsequent one is a frame the driver re-arms itself
/// 4. **Shutdown**: window close disconnects the surface and exits
pub struct DesktopHost {
    bridge: SurfaceBridge,
    display: Arc<DesktopDisplay>,
    title: String,

    /// Created lazily in `resumed()` (mobile-style lifecycle).
    window: Option<Arc<Window>>,

    /// Frame counter driving the target ring.
    frame_index: u64,

    /// Last physical cursor position, for mouse-as-pointer emulation.
    cursor: (f64, f64),
    mouse_down: bool,
}

impl DesktopHost {
    //--- Construction -----------------------------------------------------

    /// Wraps an attached bridge. `display` must be the same metrics
    /// object the bridge was attached with, so pointer scaling follows
    /// the window's actual scale factor.
    pub fn new(bridge: SurfaceBridge, display: Arc<DesktopDisplay>) -> Self {
        Self {
            bridge,
            display,
            title: "Glasswing".to_string(),
            window: None,
            frame_index: 0,
            cursor: (0.0, 0.0),
            mouse_down: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if the event loop cannot be created or
    /// fails while running.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit
    /// requirement).
    pub fn run(mut self) -> Result<(), HostError> {
        debug!(target: "platform", "Starting desktop host event loop");

        let event_loop = EventLoop::new().map_err(HostError::EventLoopCreation)?;
        event_loop
            .run_app(&mut self)
            .map_err(HostError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Converts a physical position to the DIPs hosts deliver.
    fn to_dips(&self, x: f64, y: f64) -> (f32, f32) {
        let scale = (self.display.logical_dpi() / REFERENCE_DPI) as f64;
        ((x / scale) as f32, (y / scale) as f32)
    }

    fn next_target(&mut self) -> TargetHandle {
        let target = TargetHandle(1 + self.frame_index % TARGET_RING);
        self.frame_index += 1;
        target
    }

    fn forward_touch(&mut self, touch: Touch) {
        let (x, y) = self.to_dips(touch.location.x, touch.location.y);
        let id = touch.id as u32;
        let pointer = self.bridge.pointer();

        match touch.phase {
            WinitTouchPhase::Started => pointer.on_pressed(id, x, y),
            WinitTouchPhase::Moved => pointer.on_moved(id, x, y),
            WinitTouchPhase::Ended | WinitTouchPhase::Cancelled => {
                pointer.on_released(id, x, y)
            }
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Arc<Window>> {
        self.window.as_ref()
    }
}

//=== ApplicationHandler ==================================================

impl ApplicationHandler for DesktopHost {
    /// Called when the app becomes active (startup or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let (width, height) = self.bridge.frame_driver().runner().window().size();
        let attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(width.max(1.0), height.max(1.0)));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let window = Arc::new(window);
                self.display.set_scale_factor(window.scale_factor());

                let size = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    size.width, size.height, window.scale_factor()
                );

                let driver = self.bridge.frame_driver();
                driver.connect(window.clone());
                driver.prepare_resources(
                    Instant::now(),
                    size.width as f32,
                    size.height as f32,
                );

                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.bridge.frame_driver().disconnect();
                event_loop.exit();
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                debug!(target: "platform", "Scale factor changed: {}", scale_factor);
                self.display.set_scale_factor(scale_factor);
            }

            WindowEvent::Resized(size) => {
                self.bridge.frame_driver().prepare_resources(
                    Instant::now(),
                    size.width as f32,
                    size.height as f32,
                );
            }

            WindowEvent::RedrawRequested => {
                // The driver re-arms through the connected window.
                let target = self.next_target();
                self.bridge
                    .frame_driver()
                    .draw(DESKTOP_DEVICE, DESKTOP_CONTEXT, target);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x, position.y);
                if self.mouse_down {
                    let (x, y) = self.to_dips(position.x, position.y);
                    self.bridge.pointer().on_moved(MOUSE_POINTER_ID, x, y);
                }
            }

            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                let (x, y) = self.to_dips(self.cursor.0, self.cursor.1);
                match state {
                    ElementState::Pressed => {
                        self.mouse_down = true;
                        self.bridge.pointer().on_pressed(MOUSE_POINTER_ID, x, y);
                    }
                    ElementState::Released => {
                        self.mouse_down = false;
                        self.bridge.pointer().on_released(MOUSE_POINTER_ID, x, y);
                    }
                }
            }

            WindowEvent::Touch(touch) => self.forward_touch(touch),

            _ => {
                // Ignore: focus, keyboard, etc. (not surface concerns)
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{BridgeBuilder, MediaSinkHandle, SurfaceDescriptor};
    use crate::game::{Game, GameContext};

    struct NullGame;

    impl Game for NullGame {
        fn update(&mut self, _ctx: &mut GameContext<'_>) {}
        fn draw(&mut self, _ctx: &mut GameContext<'_>) {}
    }

    fn make_host() -> (DesktopHost, Arc<DesktopDisplay>) {
        let display = Arc::new(DesktopDisplay::new());
        let bridge = BridgeBuilder::new(NullGame)
            .launch_parameters("")
            .display(display.clone())
            .surface(SurfaceDescriptor { width: 800.0, height: 480.0 })
            .media_sink(MediaSinkHandle(1))
            .attach()
            .unwrap();
        (DesktopHost::new(bridge, display.clone()), display)
    }

    //--- DesktopDisplay ---------------------------------------------------

    #[test]
    fn display_defaults_to_reference_dpi() {
        let display = DesktopDisplay::new();
        assert_eq!(display.logical_dpi(), REFERENCE_DPI);
    }

    #[test]
    fn scale_factor_scales_logical_dpi() {
        let display = DesktopDisplay::new();
        display.set_scale_factor(2.0);
        assert_eq!(display.logical_dpi(), 192.0);

        display.set_scale_factor(1.5);
        assert_eq!(display.logical_dpi(), 144.0);
    }

    //--- DesktopHost ------------------------------------------------------

    #[test]
    fn window_is_created_lazily() {
        let (host, _display) = make_host();
        assert!(host.window().is_none());
    }

    #[test]
    fn dips_conversion_inverts_the_scale_factor() {
        let (host, display) = make_host();
        display.set_scale_factor(2.0);

        assert_eq!(host.to_dips(200.0, 100.0), (100.0, 50.0));
    }

    #[test]
    fn target_ring_cycles_without_repeating_adjacent_frames() {
        let (mut host, _display) = make_host();

        let first = host.next_target();
        let second = host.next_target();
        let third = host.next_target();
        let fourth = host.next_target();

        assert_ne!(first, second);
        assert_ne!(second, third);
        assert_eq!(first, fourth);
    }

    //--- HostError --------------------------------------------------------

    #[test]
    fn host_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<HostError>();
    }
}
