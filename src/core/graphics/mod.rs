//=========================================================================
// Graphics Subsystem
//
// Engine-side view of the host's graphics objects.
//
// The host compositor owns the actual device, rendering context, and
// render target. This module never touches those objects directly; it
// works with opaque handle identities the host supplies on every frame
// callback, and tracks which identities the engine is currently bound to.
//
// Responsibilities:
// - Represent host graphics objects as opaque, comparable handles
// - Record the current surface bundle and requested dimensions
// - Apply device rebinds and per-frame target updates for the renderer
//
//=========================================================================

//=== Submodules ==========================================================

mod binding;
mod surface_state;

pub use binding::{GraphicsBinding, SharedGraphics};
pub use surface_state::{SharedSurface, SurfaceState};

//=== Handle Types ========================================================
//
// Identities assigned by the host. The bridge stores, compares, and
// forwards them; it never dereferences them. Identity comparison is how
// a host-side device swap (e.g. after a context loss) is detected.
//

/// Opaque identity of the host's graphics device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceHandle(pub u64);

/// Opaque identity of the host's rendering context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextHandle(pub u64);

/// Opaque identity of the render target the host wants drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetHandle(pub u64);
