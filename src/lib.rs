// Library interface for ufo-game
// This allows integration tests to access internal modules

pub mod cli;
pub mod engine;
pub mod game_loop;
pub mod logging;
pub mod tui;

// Re-export commonly used items for easier testing
pub use engine::{
    DangerLevel, GameState, GameStatus, GuessEngine, GuessOutcome, MAX_MISSES, Secret, SecretError,
};
pub use game_loop::{GameInterface, UserAction, game_loop};
