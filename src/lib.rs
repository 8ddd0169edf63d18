//=========================================================================
// Glasswing — Library Root
//
// This crate bridges a host-composited drawing surface to a game run
// loop and touch input queue.
//
// The host (an OS compositor or UI shell) owns the surface and the
// thread: it decides when frames are due and when pointer events fire.
// Glasswing adapts those callbacks into engine primitives: a graphics
// binding kept current per frame, exactly one game tick per frame
// callback, and an order-preserving queue of touch events normalized
// from DIPs to physical pixels.
//
// Typical usage:
// ```no_run
// use std::sync::Arc;
// use glasswing::prelude::*;
//
// struct MyGame;
// impl Game for MyGame {
//     fn update(&mut self, _ctx: &mut GameContext<'_>) {}
//     fn draw(&mut self, _ctx: &mut GameContext<'_>) {}
// }
//
// let display = Arc::new(DesktopDisplay::new());
// let bridge = BridgeBuilder::new(MyGame)
//     .launch_parameters("")
//     .display(display.clone())
//     .surface(SurfaceDescriptor { width: 800.0, height: 480.0 })
//     .media_sink(MediaSinkHandle(1))
//     .attach()
//     .expect("host page is complete");
//
// DesktopHost::new(bridge, display).run().expect("event loop");
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the engine-side state the bridge writes into (graphics
// handles, touch queue, window sizing).
//
// `platform` is public, unlike a self-hosted engine's would be: users
// embedding the bridge in their own host call the frame driver and
// pointer normalizer directly.
//
pub mod core;
pub mod platform;

//--- Internal Modules ----------------------------------------------------
//
// `bridge` wires everything together at attach time; `game` and
// `runtime` define the game-facing contract. Their types are re-exported
// below, so the modules themselves stay private.
//
mod bridge;
mod game;
mod runtime;

pub mod prelude;

//--- Public Exports ------------------------------------------------------
//
// The attach path and the game contract are the entire day-to-day API;
// re-exporting them keeps `use glasswing::...` flat for applications.
//
pub use bridge::{AttachError, BridgeBuilder, MediaSinkHandle, SurfaceBridge, SurfaceDescriptor};
pub use game::{Game, GameContext, RunBehavior, RunError};
pub use runtime::GameRunner;
