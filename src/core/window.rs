//=========================================================================
// Game Window
//
// Size queries for a window the engine does not own.
//
// On a host-composited surface there is no engine-created window; the
// dimensions the game sees are whatever the host last requested for the
// render target. This type is a read-only view over the shared surface
// record.
//
//=========================================================================

//=== Internal Modules ====================================================

use crate::core::graphics::SharedSurface;

//=== GameWindow ==========================================================

/// Read-only window-size view backed by the shared surface record.
///
/// Dimensions come from the host: the surface's actual size at attach
/// time, then whatever each resource-preparation callback requests.
#[derive(Debug, Clone)]
pub struct GameWindow {
    surface: SharedSurface,
}

impl GameWindow {
    pub(crate) fn new(surface: SharedSurface) -> Self {
        Self { surface }
    }

    //--- Queries ----------------------------------------------------------

    pub fn width(&self) -> f32 {
        self.surface.dimensions().0
    }

    pub fn height(&self) -> f32 {
        self.surface.dimensions().1
    }

    pub fn size(&self) -> (f32, f32) {
        self.surface.dimensions()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
