use clap::Parser;
use crate::debug_log;
use crate::engine::{DangerLevel, GameStatus, GuessEngine, MAX_MISSES};
use crate::game_loop::{GameInterface, UserAction};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// UFO: The Game - save your friend from alien abduction by guessing the codeword
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use plain line-based prompts instead of the full-screen interface
    #[arg(long)]
    pub plain: bool,

    /// Write the session log to this file instead of the default location
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

fn parse_action(input: &str) -> UserAction {
    match input.to_lowercase().as_str() {
        "exit" | "quit" => UserAction::Exit,
        "new" | "again" => UserAction::NewGame,
        _ => UserAction::Guess(input.to_string()),
    }
}

fn danger_label(level: DangerLevel) -> &'static str {
    match level {
        DangerLevel::Safe => "safe",
        DangerLevel::Elevated => "elevated",
        DangerLevel::Critical => "critical",
    }
}

/// Codeword as uppercase letters and placeholders separated by spaces.
#[must_use]
pub fn format_pattern(pattern: &str) -> String {
    pattern
        .chars()
        .map(|c| c.to_uppercase().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_letters(letters: &[char]) -> String {
    letters
        .iter()
        .map(|c| c.to_uppercase().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Line-based implementation of [`GameInterface`] over any reader/writer pair.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn write_game(&mut self, engine: &GuessEngine) -> std::io::Result<()> {
        let state = engine.state();
        let w = &mut self.writer;

        writeln!(w)?;
        writeln!(w, "Codeword: {}", format_pattern(&engine.pattern()))?;
        writeln!(
            w,
            "Failed Attempts ({}/{MAX_MISSES}): {}",
            engine.miss_count(),
            format_letters(engine.incorrect_guesses())
        )?;
        writeln!(
            w,
            "Danger Level: {}% ({})",
            state.danger_percent(),
            danger_label(state.danger_level())
        )?;
        writeln!(
            w,
            "Letters Found: {} | Remaining: {}",
            state.letters_found(),
            state.letters_remaining()
        )?;
        if !engine.notice().is_empty() {
            writeln!(w, "{}", engine.notice())?;
        }

        match engine.status() {
            GameStatus::InProgress => {
                writeln!(w, "Enter a letter ('new' to restart, 'exit' to quit):")?;
            }
            GameStatus::Won | GameStatus::Lost => {
                let codeword = format_pattern(&state.secret().to_string());
                writeln!(w, "The codeword was: {codeword}")?;
                writeln!(w, "Type 'again' to play again or 'exit' to quit:")?;
            }
        }
        w.flush()
    }

    fn write_line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.writer, "{text}") {
            debug_log!("CliInterface - write failed: {}", e);
        }
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn display_game(&mut self, engine: &GuessEngine) {
        if let Err(e) = self.write_game(engine) {
            debug_log!("CliInterface::display_game() - write failed: {}", e);
        }
    }

    fn read_action(&mut self) -> Option<UserAction> {
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => Some(UserAction::Exit),
            Ok(_) => Some(parse_action(input.trim())),
            Err(e) => {
                debug_log!("CliInterface::read_action() - read failed: {}", e);
                Some(UserAction::Exit)
            }
        }
    }

    fn display_new_game_message(&mut self) {
        self.write_line("New game started. A new person needs saving!");
    }

    fn display_exit_message(&mut self) {
        self.write_line("Exiting.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{INCORRECT_NOTICE, Secret};
    use std::io::Cursor;

    fn interface(input: &str) -> CliInterface<Cursor<&str>, Vec<u8>> {
        CliInterface::new(Cursor::new(input), Vec::new())
    }

    fn output(interface: CliInterface<Cursor<&str>, Vec<u8>>) -> String {
        String::from_utf8(interface.into_writer()).unwrap()
    }

    #[test]
    fn test_parse_cli_defaults() {
        let cli = Cli::parse_from(["ufo-game"]);
        assert!(!cli.plain);
        assert_eq!(cli.log_file, None);
    }

    #[test]
    fn test_parse_cli_with_options() {
        let cli = Cli::parse_from(["ufo-game", "--plain", "--log-file", "/tmp/ufo.log"]);
        assert!(cli.plain);
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/ufo.log")));
    }

    #[test]
    fn test_parse_action() {
        assert_eq!(parse_action("exit"), UserAction::Exit);
        assert_eq!(parse_action("QUIT"), UserAction::Exit);
        assert_eq!(parse_action("new"), UserAction::NewGame);
        assert_eq!(parse_action("Again"), UserAction::NewGame);
        assert_eq!(parse_action("a"), UserAction::Guess("a".to_string()));
        assert_eq!(parse_action("xyz"), UserAction::Guess("xyz".to_string()));
        assert_eq!(parse_action(""), UserAction::Guess(String::new()));
    }

    #[test]
    fn test_read_action_trims_input() {
        let mut cli = interface("  c  \n");
        assert_eq!(cli.read_action(), Some(UserAction::Guess("c".to_string())));
    }

    #[test]
    fn test_read_action_eof_exits() {
        let mut cli = interface("");
        assert_eq!(cli.read_action(), Some(UserAction::Exit));
    }

    #[test]
    fn test_format_pattern() {
        assert_eq!(format_pattern("c-de"), "C - D E");
        assert_eq!(format_pattern(""), "");
    }

    #[test]
    fn test_display_game_in_progress() {
        let mut engine = GuessEngine::with_secret(Secret::new("cat").unwrap());
        engine.submit_guess("c");
        engine.submit_guess("z");

        let mut cli = interface("");
        cli.display_game(&engine);
        let text = output(cli);

        assert!(text.contains("Codeword: C - -"));
        assert!(text.contains("Failed Attempts (1/7): Z"));
        assert!(text.contains("Danger Level: 14% (safe)"));
        assert!(text.contains("Letters Found: 1 | Remaining: 2"));
        assert!(text.contains(INCORRECT_NOTICE));
        assert!(!text.contains("The codeword was"));
    }

    #[test]
    fn test_display_game_over_shows_codeword() {
        let mut engine = GuessEngine::with_secret(Secret::new("ox").unwrap());
        for letter in ["a", "b", "c", "d", "e", "f", "g"] {
            engine.submit_guess(letter);
        }

        let mut cli = interface("");
        cli.display_game(&engine);
        let text = output(cli);

        assert!(text.contains("The codeword was: O X"));
        assert!(text.contains("Danger Level: 100% (critical)"));
        assert!(text.contains("'again'"));
    }
}
