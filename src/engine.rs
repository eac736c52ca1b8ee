//! Guess engine for the codeword game.
//!
//! The game state is a plain value ([`GameState`]) with a pure transition,
//! [`GameState::after_guess`]. [`GuessEngine`] owns the current state of one
//! session and remembers the notice produced by the last guess.

use std::fmt;
use thiserror::Error;

/// Word the player has to uncover when no other secret is given.
pub const DEFAULT_SECRET: &str = "codecademy";
/// Wrong guesses tolerated before the person is abducted.
pub const MAX_MISSES: usize = 7;
/// Marker shown for a position that has not been revealed yet.
pub const PLACEHOLDER: char = '-';

const ELEVATED_DANGER_MISSES: usize = 3;
const CRITICAL_DANGER_MISSES: usize = 5;

pub const CORRECT_NOTICE: &str = "Correct! You're closer to cracking the codeword.";
pub const INCORRECT_NOTICE: &str = "Incorrect! The tractor beam pulls the person in further.";
pub const REPEAT_NOTICE: &str = "You already guessed that letter!";
pub const WON_NOTICE: &str = "Hooray! You saved the person and earned a medal of honor!";
pub const LOST_NOTICE: &str = "Oh no! The UFO just flew away with another person!";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SecretError {
    #[error("secret word must not be empty")]
    Empty,
    #[error("secret word may only contain letters ('{0}' is not a letter)")]
    NotALetter(char),
}

/// The hidden word, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secret {
    letters: Vec<char>,
}

impl Secret {
    pub fn new(word: &str) -> Result<Self, SecretError> {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return Err(SecretError::Empty);
        }
        // lowercasing may expand a letter into a letter plus a combining mark
        if let Some(c) = word.chars().find(|c| !c.is_alphabetic()) {
            return Err(SecretError::NotALetter(c));
        }
        Ok(Self {
            letters: word.chars().collect(),
        })
    }

    #[must_use]
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}

impl Default for Secret {
    fn default() -> Self {
        Self {
            letters: DEFAULT_SECRET.chars().collect(),
        }
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.letters.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    #[must_use]
    pub fn is_over(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// How close the person is to being taken, bucketed for display colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DangerLevel {
    Safe,
    Elevated,
    Critical,
}

impl DangerLevel {
    #[must_use]
    pub fn from_misses(misses: usize) -> Self {
        if misses < ELEVATED_DANGER_MISSES {
            Self::Safe
        } else if misses < CRITICAL_DANGER_MISSES {
            Self::Elevated
        } else {
            Self::Critical
        }
    }
}

/// Result of a single guess submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Input ignored: not exactly one character, or the game is already over.
    Rejected,
    /// Letter was already tried; nothing changed.
    Repeat(char),
    /// Letter occurs in the secret; `revealed` positions were uncovered.
    Correct { letter: char, revealed: usize },
    /// Letter does not occur in the secret.
    Incorrect(char),
    /// Guess uncovered the last hidden position.
    Won(char),
    /// Guess used up the last allowed miss.
    Lost(char),
}

impl GuessOutcome {
    /// Text shown to the player, or `None` when the outcome leaves the
    /// previous notice in place.
    #[must_use]
    pub fn notice(self) -> Option<&'static str> {
        match self {
            Self::Rejected => None,
            Self::Repeat(_) => Some(REPEAT_NOTICE),
            Self::Correct { .. } => Some(CORRECT_NOTICE),
            Self::Incorrect(_) => Some(INCORRECT_NOTICE),
            Self::Won(_) => Some(WON_NOTICE),
            Self::Lost(_) => Some(LOST_NOTICE),
        }
    }
}

/// Snapshot of one game. Transitions return a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    secret: Secret,
    revealed: Vec<Option<char>>,
    incorrect: Vec<char>,
    status: GameStatus,
}

impl GameState {
    #[must_use]
    pub fn new(secret: Secret) -> Self {
        Self {
            revealed: vec![None; secret.len()],
            secret,
            incorrect: Vec::new(),
            status: GameStatus::InProgress,
        }
    }

    /// Apply one guess and return the resulting state with its outcome.
    ///
    /// A guess counts as repeated when it is among the incorrect letters or
    /// already revealed. Hidden positions are `None`, so guessing the
    /// placeholder `-` is an ordinary miss rather than a repeat.
    #[must_use]
    pub fn after_guess(&self, input: &str) -> (Self, GuessOutcome) {
        let Some(letter) = self.accept(input) else {
            return (self.clone(), GuessOutcome::Rejected);
        };

        if self.incorrect.contains(&letter) || self.revealed.contains(&Some(letter)) {
            return (self.clone(), GuessOutcome::Repeat(letter));
        }

        let mut next = self.clone();
        let mut revealed = 0;
        for (slot, &c) in next.revealed.iter_mut().zip(self.secret.letters()) {
            if c == letter {
                *slot = Some(c);
                revealed += 1;
            }
        }
        if revealed == 0 {
            next.incorrect.push(letter);
        }

        next.status = next.evaluate_status();
        let outcome = match next.status {
            GameStatus::Won => GuessOutcome::Won(letter),
            GameStatus::Lost => GuessOutcome::Lost(letter),
            GameStatus::InProgress if revealed > 0 => {
                GuessOutcome::Correct { letter, revealed }
            }
            GameStatus::InProgress => GuessOutcome::Incorrect(letter),
        };
        (next, outcome)
    }

    /// Normalised letter for a guess, or `None` if the guess must be ignored.
    fn accept(&self, input: &str) -> Option<char> {
        if self.status.is_over() {
            return None;
        }
        let mut chars = input.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let mut lower = c.to_lowercase();
        let letter = lower.next()?;
        if lower.next().is_some() {
            return None;
        }
        Some(letter)
    }

    fn evaluate_status(&self) -> GameStatus {
        if self.revealed.iter().all(Option::is_some) {
            GameStatus::Won
        } else if self.miss_count() >= MAX_MISSES {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        }
    }

    #[must_use]
    pub fn secret(&self) -> &Secret {
        &self.secret
    }

    /// Revealed letters by position; `None` is a hidden position.
    #[must_use]
    pub fn revealed(&self) -> &[Option<char>] {
        &self.revealed
    }

    /// Revealed pattern as text, hidden positions shown as [`PLACEHOLDER`].
    #[must_use]
    pub fn pattern(&self) -> String {
        self.revealed
            .iter()
            .map(|slot| slot.unwrap_or(PLACEHOLDER))
            .collect()
    }

    /// Incorrect letters in the order they were guessed.
    #[must_use]
    pub fn incorrect_guesses(&self) -> &[char] {
        &self.incorrect
    }

    #[must_use]
    pub fn miss_count(&self) -> usize {
        self.incorrect.len()
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_letter_revealed(&self, letter: char) -> bool {
        self.revealed.contains(&Some(letter))
    }

    #[must_use]
    pub fn letters_found(&self) -> usize {
        self.revealed.iter().filter(|slot| slot.is_some()).count()
    }

    #[must_use]
    pub fn letters_remaining(&self) -> usize {
        self.secret.len() - self.letters_found()
    }

    /// Misses relative to [`MAX_MISSES`], clamped to `0.0..=1.0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn abduction_level(&self) -> f64 {
        (self.miss_count() as f64 / MAX_MISSES as f64).clamp(0.0, 1.0)
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn danger_percent(&self) -> u16 {
        (self.abduction_level() * 100.0).round() as u16
    }

    #[must_use]
    pub fn danger_level(&self) -> DangerLevel {
        DangerLevel::from_misses(self.miss_count())
    }
}

/// Owns the game of one interactive session.
#[derive(Debug, Clone)]
pub struct GuessEngine {
    state: GameState,
    notice: Option<&'static str>,
}

impl GuessEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::with_secret(Secret::default())
    }

    #[must_use]
    pub fn with_secret(secret: Secret) -> Self {
        Self {
            state: GameState::new(secret),
            notice: None,
        }
    }

    /// Submit one guess. Rejected and repeated guesses never touch the
    /// revealed pattern or the misses.
    pub fn submit_guess(&mut self, input: &str) -> GuessOutcome {
        let (next, outcome) = self.state.after_guess(input);
        self.state = next;
        if let Some(notice) = outcome.notice() {
            self.notice = Some(notice);
        }
        outcome
    }

    /// Start over with the same secret.
    pub fn reset(&mut self) {
        self.state = GameState::new(self.state.secret.clone());
        self.notice = None;
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Notice describing the last accepted guess, empty after a reset.
    #[must_use]
    pub fn notice(&self) -> &str {
        self.notice.unwrap_or_default()
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    #[must_use]
    pub fn pattern(&self) -> String {
        self.state.pattern()
    }

    #[must_use]
    pub fn incorrect_guesses(&self) -> &[char] {
        self.state.incorrect_guesses()
    }

    #[must_use]
    pub fn miss_count(&self) -> usize {
        self.state.miss_count()
    }

    #[must_use]
    pub fn abduction_level(&self) -> f64 {
        self.state.abduction_level()
    }
}

impl Default for GuessEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat_engine() -> GuessEngine {
        GuessEngine::with_secret(Secret::new("cat").unwrap())
    }

    #[test]
    fn test_new_game_is_all_placeholders() {
        let engine = GuessEngine::new();
        assert_eq!(engine.pattern(), "----------");
        assert_eq!(engine.miss_count(), 0);
        assert!(engine.incorrect_guesses().is_empty());
        assert_eq!(engine.status(), GameStatus::InProgress);
        assert_eq!(engine.notice(), "");
    }

    #[test]
    fn test_cat_walkthrough() {
        let mut engine = cat_engine();

        assert_eq!(
            engine.submit_guess("c"),
            GuessOutcome::Correct {
                letter: 'c',
                revealed: 1
            }
        );
        assert_eq!(engine.pattern(), "c--");
        assert_eq!(engine.miss_count(), 0);

        assert_eq!(engine.submit_guess("z"), GuessOutcome::Incorrect('z'));
        assert_eq!(engine.pattern(), "c--");
        assert_eq!(engine.miss_count(), 1);

        engine.submit_guess("a");
        assert_eq!(engine.pattern(), "ca-");
        assert_eq!(engine.miss_count(), 1);

        assert_eq!(engine.submit_guess("t"), GuessOutcome::Won('t'));
        assert_eq!(engine.pattern(), "cat");
        assert_eq!(engine.status(), GameStatus::Won);
        assert_eq!(engine.notice(), WON_NOTICE);
    }

    #[test]
    fn test_all_occurrences_revealed_at_once() {
        let mut engine = GuessEngine::new();
        let outcome = engine.submit_guess("c");
        assert_eq!(
            outcome,
            GuessOutcome::Correct {
                letter: 'c',
                revealed: 2
            }
        );
        assert_eq!(engine.pattern(), "c---c-----");

        engine.submit_guess("d");
        engine.submit_guess("e");
        assert_eq!(engine.pattern(), "c-dec-de--");
    }

    #[test]
    fn test_uppercase_guess_is_folded() {
        let mut engine = cat_engine();
        engine.submit_guess("A");
        assert_eq!(engine.pattern(), "-a-");

        engine.submit_guess("Q");
        assert_eq!(engine.incorrect_guesses(), &['q']);
    }

    #[test]
    fn test_rejected_inputs_change_nothing() {
        let mut engine = cat_engine();
        engine.submit_guess("z");
        let before = engine.state().clone();

        for input in ["", "ab", "cat", "  "] {
            assert_eq!(engine.submit_guess(input), GuessOutcome::Rejected);
        }
        assert_eq!(engine.state(), &before);
        assert_eq!(engine.notice(), INCORRECT_NOTICE);
    }

    #[test]
    fn test_repeat_guess_is_idempotent() {
        let mut engine = cat_engine();
        engine.submit_guess("c");
        engine.submit_guess("x");
        let before = engine.state().clone();

        assert_eq!(engine.submit_guess("c"), GuessOutcome::Repeat('c'));
        assert_eq!(engine.submit_guess("x"), GuessOutcome::Repeat('x'));
        assert_eq!(engine.submit_guess("X"), GuessOutcome::Repeat('x'));
        assert_eq!(engine.state(), &before);
        assert_eq!(engine.miss_count(), 1);
        assert_eq!(engine.notice(), REPEAT_NOTICE);
    }

    #[test]
    fn test_seven_misses_lose() {
        let mut engine = cat_engine();
        for (i, letter) in ["b", "d", "e", "f", "g", "h"].iter().enumerate() {
            let expected = letter.chars().next().unwrap();
            assert_eq!(engine.submit_guess(letter), GuessOutcome::Incorrect(expected));
            assert_eq!(engine.miss_count(), i + 1);
            assert_eq!(engine.status(), GameStatus::InProgress);
        }
        assert_eq!(engine.submit_guess("i"), GuessOutcome::Lost('i'));
        assert_eq!(engine.status(), GameStatus::Lost);
        assert_eq!(engine.miss_count(), MAX_MISSES);
        assert_eq!(engine.notice(), LOST_NOTICE);
    }

    #[test]
    fn test_terminal_status_ignores_guesses() {
        let mut engine = cat_engine();
        for letter in ["c", "a", "t"] {
            engine.submit_guess(letter);
        }
        let won = engine.state().clone();
        assert_eq!(engine.submit_guess("z"), GuessOutcome::Rejected);
        assert_eq!(engine.state(), &won);

        let mut engine = cat_engine();
        for letter in ["b", "d", "e", "f", "g", "h", "i"] {
            engine.submit_guess(letter);
        }
        let lost = engine.state().clone();
        assert_eq!(engine.submit_guess("c"), GuessOutcome::Rejected);
        assert_eq!(engine.state(), &lost);
        assert_eq!(engine.notice(), LOST_NOTICE);
    }

    #[test]
    fn test_win_on_last_letter_with_six_misses() {
        let mut engine = cat_engine();
        for letter in ["b", "d", "e", "f", "g", "h", "c", "a"] {
            engine.submit_guess(letter);
        }
        assert_eq!(engine.miss_count(), 6);
        assert_eq!(engine.submit_guess("t"), GuessOutcome::Won('t'));
    }

    #[test]
    fn test_reset_restores_start() {
        let mut engine = cat_engine();
        for letter in ["c", "z", "y"] {
            engine.submit_guess(letter);
        }
        engine.reset();

        assert_eq!(engine.pattern(), "---");
        assert_eq!(engine.miss_count(), 0);
        assert!(engine.incorrect_guesses().is_empty());
        assert_eq!(engine.status(), GameStatus::InProgress);
        assert_eq!(engine.notice(), "");
        assert_eq!(engine.state().secret().to_string(), "cat");
    }

    #[test]
    fn test_reset_after_loss_allows_play() {
        let mut engine = cat_engine();
        for letter in ["b", "d", "e", "f", "g", "h", "i"] {
            engine.submit_guess(letter);
        }
        engine.reset();
        assert!(matches!(engine.submit_guess("c"), GuessOutcome::Correct { .. }));
    }

    #[test]
    fn test_placeholder_guess_is_a_miss() {
        let mut engine = cat_engine();
        assert_eq!(engine.submit_guess("-"), GuessOutcome::Incorrect('-'));
        assert_eq!(engine.pattern(), "---");
    }

    #[test]
    fn test_after_guess_leaves_original_untouched() {
        let state = GameState::new(Secret::new("cat").unwrap());
        let (next, outcome) = state.after_guess("a");
        assert_eq!(
            outcome,
            GuessOutcome::Correct {
                letter: 'a',
                revealed: 1
            }
        );
        assert_eq!(state.pattern(), "---");
        assert_eq!(next.pattern(), "-a-");
        assert!(next.is_letter_revealed('a'));
    }

    #[test]
    fn test_abduction_level_and_danger() {
        let mut engine = cat_engine();
        assert!(engine.abduction_level().abs() < f64::EPSILON);
        assert_eq!(engine.state().danger_level(), DangerLevel::Safe);

        for letter in ["b", "d", "e"] {
            engine.submit_guess(letter);
        }
        assert!((engine.abduction_level() - 3.0 / 7.0).abs() < 1e-9);
        assert_eq!(engine.state().danger_percent(), 43);
        assert_eq!(engine.state().danger_level(), DangerLevel::Elevated);

        for letter in ["f", "g"] {
            engine.submit_guess(letter);
        }
        assert_eq!(engine.state().danger_level(), DangerLevel::Critical);

        for letter in ["h", "i"] {
            engine.submit_guess(letter);
        }
        assert!((engine.abduction_level() - 1.0).abs() < f64::EPSILON);
        assert_eq!(engine.state().danger_percent(), 100);
    }

    #[test]
    fn test_letters_found_and_remaining() {
        let mut engine = GuessEngine::new();
        engine.submit_guess("e");
        assert_eq!(engine.state().letters_found(), 2);
        assert_eq!(engine.state().letters_remaining(), 8);
    }

    #[test]
    fn test_secret_validation() {
        assert_eq!(Secret::new(""), Err(SecretError::Empty));
        assert_eq!(Secret::new("ab1"), Err(SecretError::NotALetter('1')));
        assert_eq!(Secret::new("Moon").unwrap().to_string(), "moon");
        assert_eq!(Secret::default().to_string(), DEFAULT_SECRET);
    }

    #[test]
    fn test_secret_rejects_letters_that_lowercase_to_marks() {
        // 'İ' lowercases to 'i' followed by U+0307 COMBINING DOT ABOVE
        assert_eq!(Secret::new("İx"), Err(SecretError::NotALetter('\u{307}')));
        let secret = Secret::new("ÀÉx").unwrap();
        assert!(secret.letters().iter().all(|c| c.is_alphabetic() && !c.is_uppercase()));
        assert_eq!(secret.to_string(), "àéx");
    }

    #[test]
    fn test_incorrect_and_revealed_never_overlap() {
        let mut engine = GuessEngine::new();
        for letter in "qcwodzeaxmy".chars() {
            engine.submit_guess(&letter.to_string());
            for wrong in engine.incorrect_guesses() {
                assert!(!engine.state().is_letter_revealed(*wrong));
            }
        }
        assert_eq!(engine.status(), GameStatus::Won);
        assert_eq!(engine.incorrect_guesses(), &['q', 'w', 'z', 'x']);
    }
}
