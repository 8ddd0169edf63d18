//=========================================================================
// Game Interface
//
// The contract between the bridge and the game it hosts.
//
// Applications implement `Game`; the bridge constructs exactly one
// instance, starts it when the surface delivers its first frame
// callback, and ticks it once per callback thereafter. Each tick hands
// the game a `GameContext` with the input drained for that tick and the
// current window dimensions.
//
//=========================================================================

//=== Internal Modules ====================================================

use crate::core::touch::TouchEvent;
use crate::core::window::GameWindow;

//=== RunBehavior =========================================================

/// How the game loop is driven once started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunBehavior {
    /// Start returns immediately; the host's frame callbacks drive ticks.
    ///
    /// The only behavior a composited surface supports: the host owns
    /// the thread and decides when frames are due.
    Asynchronous,

    /// Engine-owned blocking loop. Not available on a composited
    /// surface; starting with this behavior is an error.
    Synchronous,
}

//=== GameContext =========================================================

/// Per-tick view of engine state handed to the game.
pub struct GameContext<'a> {
    /// Touch events drained for this tick, in arrival order.
    pub touches: &'a [TouchEvent],

    /// Window-size queries (host-requested target dimensions).
    pub window: &'a GameWindow,

    /// Launch parameters the host supplied at attach time.
    pub launch_parameters: &'a str,
}

//=== Game ================================================================

/// A game hosted behind a composited surface.
///
/// Lifecycle: `initialize` once, when the surface first connects; then
/// `update` and `draw`, in that order, once per frame callback. All
/// three run on whichever thread the host delivers callbacks on.
pub trait Game: Send + 'static {
    /// One-time setup. The context carries no touches yet.
    fn initialize(&mut self, _ctx: &mut GameContext<'_>) {}

    /// Advances game state by one tick.
    fn update(&mut self, ctx: &mut GameContext<'_>);

    /// Renders the current state to the bound target.
    fn draw(&mut self, ctx: &mut GameContext<'_>);
}

//=== RunError ============================================================

/// Errors from starting the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunError {
    /// The requested run behavior is not available on this platform.
    UnsupportedBehavior(RunBehavior),

    /// The game loop was already started.
    AlreadyRunning,
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedBehavior(behavior) => write!(
                f,
                "Run behavior {:?} is not supported on a composited surface",
                behavior
            ),
            Self::AlreadyRunning => write!(f, "The game loop was already started"),
        }
    }
}

impl std::error::Error for RunError {}

//=========================================================================
// Unit Tests
//=========================================================================
