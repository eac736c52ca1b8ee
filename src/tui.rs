//! TUI (Terminal User Interface) module for UFO: The Game
//!
//! Full-screen rendition of the game using Ratatui: the UFO scene, the
//! codeword slots, mission status and the guess input.
//!
//! # Architecture
//! - `TuiInterface`: owns the terminal, the one-letter input buffer and the
//!   animation clock; implements `GameInterface` for the game loop
//! - `RenderContext`: everything one frame needs, so rendering is a pure
//!   function that also runs on `TestBackend`
//!
//! # Animation
//! Events are polled every `EVENT_POLL_TIMEOUT_MS`; each idle poll advances
//! the tick that drives the UFO lights, beam particles, the danger pulse and
//! the eased height of the person in the beam.

use crate::engine::{
    CORRECT_NOTICE, DangerLevel, GameState, GameStatus, GuessEngine, INCORRECT_NOTICE, MAX_MISSES,
    REPEAT_NOTICE, Secret,
};
use crate::game_loop::{GameInterface, UserAction};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;
const SCENE_HEIGHT: u16 = 16;
const UFO_LIGHTS: usize = 5;
const BEAM_TOP_WIDTH: usize = 5;
const BEAM_PARTICLES: usize = 8;
const BEAM_CHAR: char = '░';
const PARTICLE_CHAR: char = '*';
const LEVEL_EASING: f64 = 0.35;
const LEVEL_SNAP: f64 = 0.01;
const PULSE_TICKS: usize = 5;

const UFO_ART: [&str; 3] = ["      ___      ", "  ___/   \\___  ", " (___________) "];
const PERSON_ART: [&str; 3] = [" o ", "/|\\", "/ \\"];

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const SUBTITLE_STYLE: Style = Style::new().fg(Color::Gray);
const UFO_STYLE: Style = Style::new().fg(Color::White);
const LIGHT_ON_STYLE: Style = Style::new()
    .fg(Color::LightBlue)
    .add_modifier(Modifier::BOLD);
const LIGHT_OFF_STYLE: Style = Style::new().fg(Color::DarkGray);
const BEAM_STYLE: Style = Style::new().fg(Color::Green);
const PERSON_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);
const REVEALED_STYLE: Style = Style::new()
    .fg(Color::Green)
    .bg(Color::DarkGray)
    .add_modifier(Modifier::BOLD);
const HIDDEN_STYLE: Style = Style::new().fg(Color::Gray).bg(Color::DarkGray);
const MISS_STYLE: Style = Style::new()
    .fg(Color::White)
    .bg(Color::Red)
    .add_modifier(Modifier::BOLD);
const LABEL_STYLE: Style = Style::new().fg(Color::Gray).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

fn danger_color(level: DangerLevel) -> Color {
    match level {
        DangerLevel::Safe => Color::Green,
        DangerLevel::Elevated => Color::Yellow,
        DangerLevel::Critical => Color::Red,
    }
}

fn notice_style(notice: &str) -> Style {
    match notice {
        CORRECT_NOTICE => SUCCESS_STYLE,
        INCORRECT_NOTICE => ERROR_STYLE,
        REPEAT_NOTICE => INFO_STYLE,
        _ => MESSAGE_STYLE,
    }
}

/// Row of the person's head inside a beam of `beam_rows` rows.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn person_top(beam_rows: usize, level: f64) -> usize {
    let travel = beam_rows.saturating_sub(PERSON_ART.len());
    let lift = (level.clamp(0.0, 1.0) * travel as f64).round() as usize;
    travel - lift.min(travel)
}

/// Move the displayed level a step toward `target`.
fn ease_level(shown: f64, target: f64) -> f64 {
    let next = shown + (target - shown) * LEVEL_EASING;
    if (target - next).abs() < LEVEL_SNAP { target } else { next }
}

/// Key handling while a game is running. Edits the one-letter `input` buffer.
fn guess_key_action(input: &mut String, key: KeyEvent) -> Option<UserAction> {
    match key.code {
        KeyCode::Esc => {
            info_log!("guess_key_action() - ESC pressed, returning Exit");
            Some(UserAction::Exit)
        }
        KeyCode::Enter if input.is_empty() => {
            debug_log!("guess_key_action() - Enter with empty input ignored");
            None
        }
        KeyCode::Enter => {
            let guess = std::mem::take(input);
            info_log!("guess_key_action() - Submitting guess '{}'", guess);
            Some(UserAction::Guess(guess))
        }
        KeyCode::Backspace => {
            input.clear();
            None
        }
        KeyCode::Char(_) if has_modifier_keys(&key) => {
            debug_log!(
                "guess_key_action() - Ignoring character with modifier: {:?}",
                key.modifiers
            );
            None
        }
        KeyCode::Char(c) => {
            input.clear();
            input.push(c);
            None
        }
        _ => {
            debug_log!("guess_key_action() - Ignoring key: {:?}", key.code);
            None
        }
    }
}

fn game_over_key_action(key: KeyEvent) -> Option<UserAction> {
    match key.code {
        KeyCode::Char('n' | 'N') | KeyCode::Enter => Some(UserAction::NewGame),
        KeyCode::Esc => Some(UserAction::Exit),
        _ => None,
    }
}

fn has_modifier_keys(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    game: &'a GameState,
    notice: &'a str,
    current_input: &'a str,
    shown_level: f64,
    tick: usize,
    exiting: bool,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and the animation clock.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    game: GameState,
    notice: String,
    current_input: String,
    shown_level: f64,
    tick: usize,
    exiting: bool,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            game: GameState::new(Secret::default()),
            notice: String::new(),
            current_input: String::new(),
            shown_level: 0.0,
            tick: 0,
            exiting: false,
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            game: &self.game,
            notice: &self.notice,
            current_input: &self.current_input,
            shown_level: self.shown_level,
            tick: self.tick,
            exiting: self.exiting,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn advance_animation(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        self.shown_level = ease_level(self.shown_level, self.game.abduction_level());
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),            // Title
                Constraint::Length(SCENE_HEIGHT), // UFO scene
                Constraint::Min(9),               // Codeword + mission status
                Constraint::Length(4),            // Input and message
                Constraint::Length(3),            // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_scene(f, chunks[1], ctx);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);
        Self::render_codeword(f, columns[0], ctx.game);
        Self::render_mission_status(f, columns[1], ctx.game);

        Self::render_input(f, chunks[3], ctx);
        Self::render_instructions(f, chunks[4], ctx);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled("UFO: THE GAME", HEADER_STYLE)),
            Line::from(Span::styled(
                "Save your friend from alien abduction by guessing the letters in the codeword.",
                SUBTITLE_STYLE,
            )),
        ];
        let title = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_scene(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let block = Block::default().title("Abduction").borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let beam_rows = (inner.height as usize).saturating_sub(UFO_ART.len() + 2);
        let mut lines: Vec<Line> = UFO_ART
            .iter()
            .map(|row| Line::from(Span::styled(*row, UFO_STYLE)))
            .collect();
        lines.push(Self::lights_line(ctx.tick));

        let top = person_top(beam_rows, ctx.shown_level);
        for row in 0..beam_rows {
            lines.push(Self::beam_line(row, beam_rows, top, ctx.tick));
        }
        lines.push(Self::danger_line(ctx.game, ctx.tick));

        let scene = Paragraph::new(lines).alignment(Alignment::Center);
        f.render_widget(scene, inner);
    }

    fn lights_line(tick: usize) -> Line<'static> {
        let lit = tick % UFO_LIGHTS;
        let mut spans = Vec::with_capacity(UFO_LIGHTS * 2);
        for i in 0..UFO_LIGHTS {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            let style = if i == lit { LIGHT_ON_STYLE } else { LIGHT_OFF_STYLE };
            spans.push(Span::styled("o", style));
        }
        Line::from(spans)
    }

    fn beam_line(row: usize, beam_rows: usize, person_top: usize, tick: usize) -> Line<'static> {
        let width = BEAM_TOP_WIDTH + 2 * row;
        let mut cells = vec![BEAM_CHAR; width];
        // particles drift upward one row per tick
        for j in 0..BEAM_PARTICLES {
            let particle_row = beam_rows - 1 - (tick + j * 3) % beam_rows;
            if particle_row == row {
                cells[(j * 7 + row) % width] = PARTICLE_CHAR;
            }
        }

        let figure = row
            .checked_sub(person_top)
            .and_then(|offset| PERSON_ART.get(offset));
        match figure {
            Some(figure) => {
                let mid = width / 2;
                let left: String = cells[..mid - 1].iter().collect();
                let right: String = cells[mid + 2..].iter().collect();
                Line::from(vec![
                    Span::styled(left, BEAM_STYLE),
                    Span::styled(*figure, PERSON_STYLE),
                    Span::styled(right, BEAM_STYLE),
                ])
            }
            None => Line::from(Span::styled(cells.into_iter().collect::<String>(), BEAM_STYLE)),
        }
    }

    fn danger_line(game: &GameState, tick: usize) -> Line<'static> {
        let mut style = Style::new().fg(danger_color(game.danger_level()));
        if (tick / PULSE_TICKS) % 2 == 0 {
            style = style.add_modifier(Modifier::BOLD);
        }
        Line::from(Span::styled(
            format!("Danger Level: {}%", game.danger_percent()),
            style,
        ))
    }

    fn render_codeword(f: &mut Frame, area: Rect, game: &GameState) {
        let mut slots = Vec::with_capacity(game.revealed().len() * 2);
        for (i, slot) in game.revealed().iter().enumerate() {
            if i > 0 {
                slots.push(Span::raw(" "));
            }
            slots.push(match slot {
                Some(letter) => Span::styled(
                    format!(" {} ", letter.to_uppercase()),
                    REVEALED_STYLE,
                ),
                None => Span::styled(" _ ", HIDDEN_STYLE),
            });
        }

        let lines = vec![Line::from(""), Line::from(slots)];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .block(Block::default().title("Codeword").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_mission_status(f: &mut Frame, area: Rect, game: &GameState) {
        let block = Block::default().title("Mission Status").borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Failed attempts label
                Constraint::Length(1), // Incorrect letters
                Constraint::Length(1), // Progress label
                Constraint::Length(1), // Gauge
                Constraint::Length(1), // Safe / Critical / Lost
                Constraint::Length(1), // Letters found / remaining
                Constraint::Min(0),
            ])
            .split(inner);

        let label = format!("Failed Attempts ({}/{MAX_MISSES}):", game.miss_count());
        f.render_widget(Paragraph::new(Span::styled(label, LABEL_STYLE)), rows[0]);

        let mut chips = Vec::with_capacity(game.incorrect_guesses().len() * 2);
        for letter in game.incorrect_guesses() {
            chips.push(Span::styled(format!(" {} ", letter.to_uppercase()), MISS_STYLE));
            chips.push(Span::raw(" "));
        }
        f.render_widget(Paragraph::new(Line::from(chips)), rows[1]);

        f.render_widget(
            Paragraph::new(Span::styled("Abduction Progress:", LABEL_STYLE)),
            rows[2],
        );
        let gauge = Gauge::default()
            .gauge_style(Style::new().fg(danger_color(game.danger_level())))
            .ratio(game.abduction_level())
            .label(format!("{}%", game.danger_percent()));
        f.render_widget(gauge, rows[3]);

        let scale = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(rows[4]);
        for (text, alignment, cell) in [
            ("Safe", Alignment::Left, scale[0]),
            ("Critical", Alignment::Center, scale[1]),
            ("Lost", Alignment::Right, scale[2]),
        ] {
            f.render_widget(
                Paragraph::new(text).style(SUBTITLE_STYLE).alignment(alignment),
                cell,
            );
        }

        let stats = Line::from(vec![
            Span::styled(game.letters_found().to_string(), SUCCESS_STYLE),
            Span::raw(" Letters Found   "),
            Span::styled(
                game.letters_remaining().to_string(),
                Style::new().fg(Color::LightBlue).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Remaining"),
        ]);
        f.render_widget(Paragraph::new(stats).alignment(Alignment::Center), rows[5]);
    }

    fn render_input(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let lines = match ctx.game.status() {
            GameStatus::InProgress => {
                let letter = ctx
                    .current_input
                    .chars()
                    .next()
                    .map_or(' ', |c| c.to_uppercase().next().unwrap_or(c));
                vec![
                    Line::from(vec![
                        Span::raw("Letter: "),
                        Span::styled(
                            format!(" {letter} "),
                            Style::new().fg(Color::White).bg(Color::DarkGray),
                        ),
                    ]),
                    Line::from(Span::styled(ctx.notice, notice_style(ctx.notice))),
                ]
            }
            status => {
                let style = if status == GameStatus::Won { SUCCESS_STYLE } else { ERROR_STYLE };
                vec![
                    Line::from(Span::styled(ctx.notice, style)),
                    Line::from(format!(
                        "The codeword was {}",
                        ctx.game.secret().to_string().to_uppercase()
                    )),
                ]
            }
        };

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().title("Guess").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let text = if ctx.exiting {
            "Exiting..."
        } else if ctx.game.status().is_over() {
            "N / ENTER: Play Again | ESC: Quit"
        } else {
            "Type a letter | ENTER: Guess | BACKSPACE: Clear | ESC: Quit"
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            self.advance_animation();
            return Ok(None);
        }

        let Event::Key(key) = event::read()? else {
            debug_log!("handle_input() - Ignoring non-key event");
            return Ok(None);
        };

        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != KeyEventKind::Press {
            return Ok(None);
        }

        // Filter out garbage characters from escape sequences (alt-tab and the like)
        if let KeyCode::Char(c) = key.code
            && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
        {
            debug_log!("handle_input() - Ignoring invalid character: {:?}", c);
            return Ok(None);
        }

        debug_log!(
            "handle_input() - Key event received: code={:?}, modifiers={:?}",
            key.code,
            key.modifiers
        );
        if self.game.status().is_over() {
            Ok(game_over_key_action(key))
        } else {
            Ok(guess_key_action(&mut self.current_input, key))
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_game(&mut self, engine: &GuessEngine) {
        self.game = engine.state().clone();
        self.notice = engine.notice().to_string();
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<UserAction> {
        loop {
            if let Err(e) = self.draw() {
                info_log!("read_action() - Draw failed, returning Exit: {}", e);
                return Some(UserAction::Exit);
            }

            match self.handle_input() {
                Ok(Some(action)) => {
                    info_log!("read_action() - Action received: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {}
                Err(e) => {
                    info_log!("read_action() - Error handling input, returning Exit: {}", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_new_game_message(&mut self) {
        self.current_input.clear();
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.exiting = true;
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
