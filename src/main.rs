use std::io;
use std::process::ExitCode;

use ufo_game::cli::{CliInterface, parse_cli};
use ufo_game::engine::GuessEngine;
use ufo_game::game_loop::game_loop;
use ufo_game::logging::init_logging;
use ufo_game::tui::TuiInterface;

fn main() -> ExitCode {
    let cli = parse_cli();

    if let Err(e) = init_logging(cli.log_file.as_deref()) {
        eprintln!("Failed to set up logging: {e:#}");
        return ExitCode::FAILURE;
    }

    let mut engine = GuessEngine::new();

    if cli.plain {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock(), io::stdout());
        game_loop(&mut engine, &mut interface);
        return ExitCode::SUCCESS;
    }

    match TuiInterface::new() {
        Ok(mut interface) => {
            game_loop(&mut engine, &mut interface);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("failed to start terminal interface: {e}");
            eprintln!("Failed to start the terminal interface: {e}");
            eprintln!("Try again with --plain for line-based prompts.");
            ExitCode::FAILURE
        }
    }
}
