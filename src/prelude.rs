//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use glasswing::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Attach path
pub use crate::bridge::{
    AttachError, BridgeBuilder, MediaSinkHandle, SurfaceBridge, SurfaceDescriptor,
};

// Game contract
pub use crate::game::{Game, GameContext, RunBehavior, RunError};
pub use crate::runtime::GameRunner;

// Host-facing handlers and capability seam
pub use crate::platform::{
    DesktopDisplay, DesktopHost, DisplayMetrics, FrameDriver, FrameRequestHost, HostError,
    PointerNormalizer,
};

// Engine-side state
pub use crate::core::graphics::{
    ContextHandle, DeviceHandle, GraphicsBinding, SharedGraphics, SharedSurface, SurfaceState,
    TargetHandle,
};
pub use crate::core::touch::{TouchEvent, TouchPhase};
pub use crate::core::window::GameWindow;
