//=========================================================================
// Game Runner
//
// Owns the one game instance and drives its tick pipeline.
//
// The runner is constructed at attach time but stays dormant until the
// frame driver starts it on the first frame callback. From then on,
// `initialized()` is permanently true and each host frame callback maps
// to exactly one `tick()`.
//
// Each tick:
//  1. Drains the touch panel (arrival order preserved)
//  2. Updates the game with the drained input
//  3. Draws the game against the currently bound target
//
//=========================================================================

//=== External Crates =====================================================

use log::info;

//=== Internal Modules ====================================================

use crate::core::touch::{TouchEvent, TouchPanel};
use crate::core::window::GameWindow;
use crate::game::{Game, GameContext, RunBehavior, RunError};

//=== GameRunner ==========================================================

/// The constructed game instance plus the state needed to tick it.
pub struct GameRunner {
    game: Box<dyn Game>,
    panel: TouchPanel,
    window: GameWindow,
    launch_parameters: String,
    initialized: bool,

    /// Reused across ticks to keep the per-frame path allocation-free.
    touch_scratch: Vec<TouchEvent>,
}

impl GameRunner {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        game: Box<dyn Game>,
        panel: TouchPanel,
        window: GameWindow,
        launch_parameters: String,
    ) -> Self {
        const TOUCH_SCRATCH_BASE: usize = 16;

        Self {
            game,
            panel,
            window,
            launch_parameters,
            initialized: false,
            touch_scratch: Vec::with_capacity(TOUCH_SCRATCH_BASE),
        }
    }

    //--- Lifecycle --------------------------------------------------------

    /// True once the game loop has been started. Never reverts.
    pub fn initialized(&self) -> bool {
        self.initialized
    }

    /// Starts the game loop.
    ///
    /// Only [`RunBehavior::Asynchronous`] is supported here: the host
    /// owns the thread, so start initializes the game and returns, and
    /// frame callbacks drive ticks from then on.
    ///
    /// # Errors
    ///
    /// [`RunError::UnsupportedBehavior`] for a synchronous start,
    /// [`RunError::AlreadyRunning`] for a second start.
    pub fn run(&mut self, behavior: RunBehavior) -> Result<(), RunError> {
        match behavior {
            RunBehavior::Synchronous => Err(RunError::UnsupportedBehavior(behavior)),
            RunBehavior::Asynchronous => {
                if self.initialized {
                    return Err(RunError::AlreadyRunning);
                }

                let mut ctx = GameContext {
                    touches: &[],
                    window: &self.window,
                    launch_parameters: &self.launch_parameters,
                };
                self.game.initialize(&mut ctx);
                self.initialized = true;

                info!(target: "runtime", "Game started (asynchronous)");
                Ok(())
            }
        }
    }

    /// Advances the game by exactly one tick.
    pub fn tick(&mut self) {
        self.touch_scratch.clear();
        self.panel.drain_into(&mut self.touch_scratch);

        let mut ctx = GameContext {
            touches: &self.touch_scratch,
            window: &self.window,
            launch_parameters: &self.launch_parameters,
        };
        self.game.update(&mut ctx);
        self.game.draw(&mut ctx);
    }

    //--- Queries ----------------------------------------------------------

    pub fn window(&self) -> &GameWindow {
        &self.window
    }

    pub fn launch_parameters(&self) -> &str {
        &self.launch_parameters
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
