//=========================================================================
// Platform Subsystem
//
// The host-facing half of the bridge.
//
// Architecture:
// ```text
//  Host (compositor / UI shell):        Engine Side:
//  ┌──────────────────────────┐        ┌──────────────────────┐
//  │  surface connect /       │        │  SurfaceState        │
//  │  disconnect              │        │  GraphicsBinding     │
//  │   ↓                      │        │   ↑ handle updates   │
//  │  frame callback ─────────┼──────▶ │  FrameDriver         │
//  │   ↑ request_frame        │        │   ↓ one tick/frame   │
//  │   │ (re-arm)             │        │  GameRunner          │
//  │                          │        │                      │
//  │  pointer callbacks ──────┼──────▶ │  PointerNormalizer   │
//  │  (positions in DIPs)     │        │   ↓ physical pixels  │
//  │                          │        │  Touch Queue         │
//  └──────────────────────────┘        └──────────────────────┘
// ```
//
// Key Design Decisions:
// - **The host owns the thread**: nothing here runs a loop. Handlers
//   are invoked by the host's pump, complete promptly, and return.
//   Continuity comes from the driver re-requesting a frame per draw.
// - **Capability traits at the seam**: the bridge consumes exactly two
//   host capabilities (frame requests, display metrics), so any host
//   that can provide them can drive the bridge. The Winit-backed
//   desktop host is one such implementation.
// - **No cross-component coupling**: the frame driver and the pointer
//   normalizer never talk to each other; they only share engine state
//   (the surface record, the touch queue) with the game.
//
// Responsibilities:
// - Receive surface lifecycle and frame callbacks (FrameDriver)
// - Normalize and enqueue pointer input (PointerNormalizer)
// - Define the host capability seam (host)
// - Provide the desktop host implementation (winit_host)
//
//=========================================================================

//=== Submodules ==========================================================

mod frame_driver;
mod host;
mod pointer;
mod winit_host;

//=== Public Exports ======================================================

pub use frame_driver::FrameDriver;
pub use host::{DisplayMetrics, FrameRequestHost};
pub use pointer::{PointerNormalizer, REFERENCE_DPI};
pub use winit_host::{DesktopDisplay, DesktopHost, HostError};
