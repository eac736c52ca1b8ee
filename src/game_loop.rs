use crate::engine::{GameStatus, GuessEngine, GuessOutcome};
use crate::{debug_log, info_log};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    NewGame,
    Exit,
}

/// Front-end the game loop talks to. Implemented by the plain CLI and the TUI.
pub trait GameInterface {
    fn display_game(&mut self, engine: &GuessEngine);
    /// Next player action, or `None` when the input was not understood.
    fn read_action(&mut self) -> Option<UserAction>;
    fn display_new_game_message(&mut self);
    fn display_exit_message(&mut self);
}

pub fn game_loop<I: GameInterface + ?Sized>(engine: &mut GuessEngine, interface: &mut I) {
    info_log!(
        "game_loop() - Starting with a {}-letter codeword",
        engine.state().secret().len()
    );

    loop {
        interface.display_game(engine);

        match interface.read_action() {
            Some(UserAction::Guess(guess)) => {
                let outcome = engine.submit_guess(&guess);
                log_outcome(&guess, outcome, engine);
            }
            Some(UserAction::NewGame) => {
                engine.reset();
                info_log!("game_loop() - New game started");
                interface.display_new_game_message();
            }
            Some(UserAction::Exit) => {
                info_log!("game_loop() - Exit requested");
                interface.display_exit_message();
                break;
            }
            None => {}
        }
    }
}

fn log_outcome(guess: &str, outcome: GuessOutcome, engine: &GuessEngine) {
    match outcome {
        GuessOutcome::Rejected => {
            debug_log!("game_loop() - Ignored guess {:?}", guess);
        }
        GuessOutcome::Won(_) | GuessOutcome::Lost(_) => {
            let result = if engine.status() == GameStatus::Won { "won" } else { "lost" };
            info_log!(
                "game_loop() - Game {} with {} misses, pattern '{}'",
                result,
                engine.miss_count(),
                engine.pattern()
            );
        }
        _ => {
            info_log!(
                "game_loop() - Guess {:?}: {:?}, pattern '{}', misses {}",
                guess,
                outcome,
                engine.pattern(),
                engine.miss_count()
            );
        }
    }
}
