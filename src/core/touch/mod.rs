//=========================================================================
// Touch Subsystem
//
// Order-preserving transport for normalized pointer input.
//
// Architecture:
// ```text
//  Host Input Thread:                Game Side:
//  ┌───────────────────────┐        ┌──────────────────┐
//  │  PointerNormalizer    │        │  GameRunner      │
//  │   ↓ TouchEvent        │        │   ↑ drain()      │
//  │  TouchSender ─────────┼────────┼─ TouchPanel      │
//  └───────────────────────┘  FIFO  └──────────────────┘
// ```
//
// Key Design Decisions:
// - **Unbounded channel**: events are never dropped or coalesced, so a
//   bound would have to block the host's input thread. Pointer input is
//   human-scale; the queue stays tiny in practice.
// - **Arrival order is delivery order**: a single producer feeds a
//   single consumer, so channel FIFO ordering is the queue invariant.
// - **No per-pointer state**: pointers are tracked only by opaque id.
//   Gesture recognition belongs to whatever consumes the panel.
//
//=========================================================================

//=== Submodules ==========================================================

mod event;
mod panel;
mod queue;

pub use event::{TouchEvent, TouchPhase};
pub use panel::TouchPanel;
pub use queue::{channel, TouchSender};
