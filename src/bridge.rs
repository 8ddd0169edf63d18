//=========================================================================
// Surface Bridge
//
// Attach-time validation and wiring.
//
// Attaching validates the host capability bundle, constructs the game
// runner, and wires the two handler objects the host will call into:
// the frame driver (surface lifecycle and frame callbacks) and the
// pointer normalizer (pointer callbacks). Validation happens before any
// game object is constructed; each missing precondition fails fast with
// its own error.
//
// Ownership:
//   host page  ──owns──▶ surface
//   bridge     ──owns──▶ frame driver ──owns──▶ game runner ──owns──▶ game
//              ──owns──▶ pointer normalizer
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::Arc;

//=== External Crates =====================================================

use log::info;

//=== Internal Modules ====================================================

use crate::core::graphics::{SharedGraphics, SharedSurface};
use crate::core::touch;
use crate::core::window::GameWindow;
use crate::game::Game;
use crate::platform::{DisplayMetrics, FrameDriver, PointerNormalizer};
use crate::runtime::GameRunner;

//=== SurfaceDescriptor ===================================================

/// What the host page knows about its drawing surface at attach time.
///
/// The dimensions seed the window-size queries until the host's first
/// resource-preparation callback replaces them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceDescriptor {
    /// Surface width at attach time, in pixels.
    pub width: f32,

    /// Surface height at attach time, in pixels.
    pub height: f32,
}

//=== MediaSinkHandle =====================================================

/// Opaque identity of the host's media output element.
///
/// The bridge only verifies the host supplied one and carries it for
/// the media subsystem; playback wiring is not this layer's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MediaSinkHandle(pub u64);

//=== AttachError =========================================================

/// Attach-time precondition failures.
///
/// All unrecoverable: the host page is missing something the bridge
/// needs, and no game object has been constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachError {
    /// The host did not supply launch parameters.
    MissingLaunchParameters,

    /// The host page supplied no display metrics.
    MissingDisplay,

    /// The host page supplied no drawing surface.
    MissingSurface,

    /// The host page supplied no media element.
    MissingMediaSink,
}

impl std::fmt::Display for AttachError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingLaunchParameters => {
                write!(f, "The launch parameters were not supplied")
            }
            Self::MissingDisplay => {
                write!(f, "The display metrics capability could not be found")
            }
            Self::MissingSurface => write!(f, "The drawing surface could not be found"),
            Self::MissingMediaSink => {
                write!(f, "The media element could not be found, add one to the host page")
            }
        }
    }
}

impl std::error::Error for AttachError {}

//=== BridgeBuilder =======================================================

/// Collects the host capability bundle and attaches the bridge.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use glasswing::prelude::*;
///
/// struct MyGame;
/// impl Game for MyGame {
///     fn update(&mut self, _ctx: &mut GameContext<'_>) {}
///     fn draw(&mut self, _ctx: &mut GameContext<'_>) {}
/// }
///
/// struct Display;
/// impl DisplayMetrics for Display {
///     fn logical_dpi(&self) -> f32 { 96.0 }
/// }
///
/// let bridge = BridgeBuilder::new(MyGame)
///     .launch_parameters("")
///     .display(Arc::new(Display))
///     .surface(SurfaceDescriptor { width: 800.0, height: 480.0 })
///     .media_sink(MediaSinkHandle(1))
///     .attach()?;
/// # Ok::<(), glasswing::AttachError>(())
/// ```
pub struct BridgeBuilder {
    game: Box<dyn Game>,
    launch_parameters: Option<String>,
    display: Option<Arc<dyn DisplayMetrics>>,
    surface: Option<SurfaceDescriptor>,
    media_sink: Option<MediaSinkHandle>,
}

impl BridgeBuilder {
    //--- Construction -----------------------------------------------------

    pub fn new(game: impl Game) -> Self {
        Self {
            game: Box::new(game),
            launch_parameters: None,
            display: None,
            surface: None,
            media_sink: None,
        }
    }

    //--- Capability Bundle ------------------------------------------------

    /// Launch parameters from the host activation. An empty string is a
    /// valid supply; not calling this at all is the failure.
    pub fn launch_parameters(mut self, parameters: impl Into<String>) -> Self {
        self.launch_parameters = Some(parameters.into());
        self
    }

    /// Display metrics the pointer normalizer will query per event.
    pub fn display(mut self, display: Arc<dyn DisplayMetrics>) -> Self {
        self.display = Some(display);
        self
    }

    /// The drawing surface found on the host page.
    pub fn surface(mut self, surface: SurfaceDescriptor) -> Self {
        self.surface = Some(surface);
        self
    }

    /// The media element found on the host page.
    pub fn media_sink(mut self, sink: MediaSinkHandle) -> Self {
        self.media_sink = Some(sink);
        self
    }

    //--- Attachment -------------------------------------------------------

    /// Validates the bundle and wires the bridge.
    ///
    /// # Errors
    ///
    /// One [`AttachError`] variant per missing precondition, checked in
    /// a fixed order: launch parameters, display, surface, media sink.
    pub fn attach(self) -> Result<SurfaceBridge, AttachError> {
        let launch_parameters = self
            .launch_parameters
            .ok_or(AttachError::MissingLaunchParameters)?;
        let display = self.display.ok_or(AttachError::MissingDisplay)?;
        let descriptor = self.surface.ok_or(AttachError::MissingSurface)?;
        let media_sink = self.media_sink.ok_or(AttachError::MissingMediaSink)?;

        let surface = SharedSurface::new();
        surface.store_dimensions(descriptor.width, descriptor.height);

        let graphics = SharedGraphics::new();
        let (touch_tx, touch_panel) = touch::channel();

        let runner = GameRunner::new(
            self.game,
            touch_panel,
            GameWindow::new(surface.clone()),
            launch_parameters,
        );

        info!(
            target: "bridge",
            "Bridge attached ({}x{} surface)",
            descriptor.width, descriptor.height
        );

        Ok(SurfaceBridge {
            driver: FrameDriver::new(runner, surface, graphics.clone()),
            pointer: PointerNormalizer::new(touch_tx, display),
            graphics,
            media_sink,
        })
    }
}

//=== SurfaceBridge =======================================================

/// The attached bridge: the two handlers the host calls, plus the
/// engine-side graphics access point.
///
/// The game inside is constructed but not started; the first frame
/// callback the host delivers starts it.
pub struct SurfaceBridge {
    driver: FrameDriver,
    pointer: PointerNormalizer,
    graphics: SharedGraphics,
    media_sink: MediaSinkHandle,
}

impl SurfaceBridge {
    //--- Host-Facing Handlers ---------------------------------------------

    /// Surface lifecycle and frame callback handler.
    pub fn frame_driver(&mut self) -> &mut FrameDriver {
        &mut self.driver
    }

    /// Pointer callback handler.
    pub fn pointer(&self) -> &PointerNormalizer {
        &self.pointer
    }

    //--- Engine-Facing Access ---------------------------------------------

    /// Graphics binding the render pipeline draws against.
    pub fn graphics(&self) -> SharedGraphics {
        self.graphics.clone()
    }

    /// Media element identity carried for the media subsystem.
    pub fn media_sink(&self) -> MediaSinkHandle {
        self.media_sink
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
