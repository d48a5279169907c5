//! TUI (Terminal User Interface) for the assistant
//!
//! # Architecture
//! - `TuiModel`: board, input buffer and key handling; no terminal access
//! - `TuiInterface`: owns the terminal, renders a `TuiModel`, implements `GameInterface`
//!
//! # State Machine
//! `EnteringGuess` → `MarkingFeedback` → `ConfirmingFeedback` → back to `EnteringGuess`.
//! `GameOver` is entered once the game is solved or out of candidates.

use crate::error::EngineError;
use crate::feedback::{LetterJudgment, RoundFeedback};
use crate::game_state::{GameInterface, SuggestionView, UserAction, round_label};
use crate::word::{WORD_LENGTH, Word};
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
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Clone, Copy, PartialEq, Debug)]
enum LetterState {
    Empty,
    Entered,
    Judged(LetterJudgment),
}

impl LetterState {
    fn colors(self) -> (Color, Color) {
        match self {
            Self::Empty | Self::Entered => (Color::DarkGray, Color::White),
            Self::Judged(LetterJudgment::Correct) => (Color::Green, Color::Black),
            Self::Judged(LetterJudgment::Misplaced) => (Color::Yellow, Color::Black),
            Self::Judged(LetterJudgment::Absent) => (Color::Gray, Color::White),
        }
    }
}

#[derive(Debug, Clone)]
struct GuessRow {
    letters: [char; WORD_LENGTH],
    states: [LetterState; WORD_LENGTH],
}

impl GuessRow {
    fn from_guess(guess: &Word) -> Self {
        let mut letters = [' '; WORD_LENGTH];
        for (slot, &b) in letters.iter_mut().zip(guess.letters()) {
            *slot = (b as char).to_ascii_uppercase();
        }
        Self {
            letters,
            states: [LetterState::Entered; WORD_LENGTH],
        }
    }

    fn from_feedback(feedback: &RoundFeedback) -> Self {
        let mut row = Self::from_guess(&feedback.guess());
        for (state, &judgment) in row.states.iter_mut().zip(feedback.judgments()) {
            *state = LetterState::Judged(judgment);
        }
        row
    }

    /// The `c`/`m`/`w` string for a fully marked row.
    fn descriptor(&self) -> Option<String> {
        self.states
            .iter()
            .map(|state| match state {
                LetterState::Judged(judgment) => Some(judgment.to_char()),
                LetterState::Empty | LetterState::Entered => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TuiState {
    EnteringGuess,
    MarkingFeedback { marking_index: usize },
    ConfirmingFeedback,
    /// Game has ended (solution found or no candidates) - message stored in the model
    GameOver,
}

/// Everything the screen shows, plus the key handling that changes it.
#[derive(Debug)]
pub struct TuiModel {
    guesses: Vec<GuessRow>,
    current_input: String,
    state: TuiState,
    suggestions: Vec<String>,
    remaining: Option<usize>,
    round: usize,
    message: String,
    error_message: String,
    status: String,
}

impl Default for TuiModel {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiModel {
    pub fn new() -> Self {
        Self {
            guesses: Vec::new(),
            current_input: String::new(),
            state: TuiState::EnteringGuess,
            suggestions: Vec::new(),
            remaining: None,
            round: 1,
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
        }
    }

    /// Feeds one key press; returns an action once one is complete.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        if key.kind != KeyEventKind::Press {
            debug_log!("handle_key() - Ignoring non-Press key event: {:?}", key.kind);
            return None;
        }
        if Self::has_modifier_keys(&key) {
            debug_log!("handle_key() - Ignoring key with modifier: {:?}", key.modifiers);
            return None;
        }
        match self.state {
            TuiState::EnteringGuess => self.handle_guess_input(key),
            TuiState::MarkingFeedback { marking_index } => {
                self.handle_feedback_input(key, marking_index)
            }
            TuiState::ConfirmingFeedback => self.handle_confirming_feedback_input(key),
            TuiState::GameOver => Self::handle_game_over_input(key),
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        self.error_message.clear();
        match key.code {
            KeyCode::Char(c) if c.is_ascii_alphabetic() && self.current_input.len() < WORD_LENGTH => {
                self.current_input.push(c.to_ascii_uppercase());
                info_log!("handle_guess_input() - Input now: '{}'", self.current_input);
            }
            KeyCode::Backspace => {
                self.current_input.pop();
            }
            KeyCode::Enter if self.current_input.len() == WORD_LENGTH => {
                let guess = std::mem::take(&mut self.current_input);
                info_log!("handle_guess_input() - Submitting guess '{}'", guess);
                return Some(UserAction::Guess(guess));
            }
            KeyCode::Enter => {
                self.error_message = "Guess must be exactly 5 letters!".to_string();
            }
            KeyCode::Esc => return Some(UserAction::Exit),
            KeyCode::Char(c) if !c.is_ascii_alphabetic() => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
            }
            _ => {
                debug_log!("handle_guess_input() - Ignoring key: {:?}", key.code);
            }
        }
        None
    }

    fn handle_feedback_input(&mut self, key: KeyEvent, marking_index: usize) -> Option<UserAction> {
        let judgment = match key.code {
            KeyCode::Esc => return Some(UserAction::Exit),
            KeyCode::Char(c) => match LetterJudgment::from_char(c) {
                Some(judgment) => judgment,
                None => {
                    self.error_message = format!(
                        "Use C (correct), M (misplaced) or W (wrong). ('{}' is not valid)",
                        c.to_ascii_uppercase()
                    );
                    return None;
                }
            },
            KeyCode::Backspace if marking_index > 0 => {
                if let Some(row) = self.guesses.last_mut() {
                    row.states[marking_index - 1] = LetterState::Entered;
                }
                self.state = TuiState::MarkingFeedback {
                    marking_index: marking_index - 1,
                };
                return None;
            }
            _ => return None,
        };

        self.error_message.clear();
        if let Some(row) = self.guesses.last_mut() {
            row.states[marking_index] = LetterState::Judged(judgment);
        }
        self.state = if marking_index + 1 < WORD_LENGTH {
            TuiState::MarkingFeedback {
                marking_index: marking_index + 1,
            }
        } else {
            self.status = "Press ENTER to confirm feedback".to_string();
            TuiState::ConfirmingFeedback
        };
        None
    }

    fn handle_confirming_feedback_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Esc => Some(UserAction::Exit),
            KeyCode::Enter => {
                let descriptor = self.guesses.last().and_then(GuessRow::descriptor)?;
                info_log!("handle_confirming_feedback_input() - Feedback confirmed: {}", descriptor);
                self.state = TuiState::EnteringGuess;
                Some(UserAction::Feedback(descriptor))
            }
            KeyCode::Backspace => {
                if let Some(row) = self.guesses.last_mut() {
                    row.states[WORD_LENGTH - 1] = LetterState::Entered;
                }
                self.state = TuiState::MarkingFeedback {
                    marking_index: WORD_LENGTH - 1,
                };
                None
            }
            _ => None,
        }
    }

    fn handle_game_over_input(key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Char('n' | 'N') => Some(UserAction::NewGame),
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(UserAction::Exit),
            _ => None,
        }
    }

    /// Starts marking `guess`, reusing the unmarked row if the engine bounced
    /// the previous feedback.
    fn begin_feedback(&mut self, guess: &Word) {
        let needs_row = self
            .guesses
            .last()
            .is_none_or(|row| row.descriptor().is_some());
        if needs_row {
            self.guesses.push(GuessRow::from_guess(guess));
        }
        self.state = TuiState::MarkingFeedback { marking_index: 0 };
        self.status = format!("Mark each letter of {}: C, M or W", guess.to_uppercase());
    }

    fn show_view(&mut self, view: &SuggestionView) {
        self.guesses = view.history.iter().map(GuessRow::from_feedback).collect();
        self.suggestions = view.suggestions.iter().map(Word::to_uppercase).collect();
        self.remaining = Some(view.remaining);
        self.round = view.round;
        self.state = TuiState::EnteringGuess;
        self.status = format!("Round {} - enter your guess", view.round);
    }

    fn reset(&mut self, word_count: usize) {
        *self = Self::new();
        self.message = format!("New game started. Loaded {word_count} words.");
        self.status = "New game - Enter your first guess".to_string();
    }

    fn should_show_current_input(&self) -> bool {
        self.state == TuiState::EnteringGuess
    }
}

/// Main TUI interface component.
///
/// Manages terminal rendering and input polling for a `TuiModel`.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    model: TuiModel,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete");

        Ok(Self {
            terminal,
            model: TuiModel::new(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let model = &self.model;
        self.terminal.draw(|f| render(f, model))?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Polls until the model produces an action. Terminal errors become `Exit`.
    fn next_action(&mut self) -> UserAction {
        loop {
            if self.draw().is_err() {
                return UserAction::Exit;
            }
            match poll_key() {
                Ok(Some(key)) => {
                    if let Some(action) = self.model.handle_key(key) {
                        info_log!("next_action() - Action: {:?}", action);
                        return action;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    debug_log!("next_action() - Input error: {}", e);
                    return UserAction::Exit;
                }
            }
        }
    }
}

fn poll_key() -> io::Result<Option<KeyEvent>> {
    if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) => Ok(Some(key)),
        other => {
            debug_log!("poll_key() - Ignoring event: {:?}", other);
            Ok(None)
        }
    }
}

fn render(f: &mut Frame, model: &TuiModel) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Length(14), // Game board
            Constraint::Min(8),     // Info panel
            Constraint::Length(3),  // Status line
            Constraint::Length(3),  // Instructions
        ])
        .split(f.area());

    render_title(f, chunks[0], model.round);
    render_board(f, chunks[1], model);
    render_info(f, chunks[2], model);
    render_status(f, chunks[3], &model.status);
    render_instructions(f, chunks[4], model.state);
}

fn render_title(f: &mut Frame, area: Rect, round: usize) {
    let title = Paragraph::new(format!("WORDLE ASSISTANT - {}", round_label(round)))
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

#[allow(clippy::cast_possible_truncation)]
fn render_board(f: &mut Frame, area: Rect, model: &TuiModel) {
    let block = Block::default().title("Guesses").borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let available_rows = (inner.height / ROW_SPACING) as usize;
    let showing_current_input = model.should_show_current_input();
    let rows_needed = model.guesses.len() + usize::from(showing_current_input);
    let skip_count = rows_needed.saturating_sub(available_rows);
    let last_index = model.guesses.len().saturating_sub(1 + skip_count);

    for (display_index, row) in model.guesses.iter().skip(skip_count).enumerate() {
        let mut spans = tile_spans(&row.letters, &row.states);
        if let TuiState::MarkingFeedback { marking_index } = model.state
            && display_index == last_index
        {
            spans.push(Span::raw(format!(
                " <- Marking letter {} (C/M/W)",
                marking_index + 1
            )));
        }
        render_line(f, inner, display_index, spans);
    }

    if showing_current_input {
        let mut letters = [' '; WORD_LENGTH];
        for (slot, c) in letters.iter_mut().zip(model.current_input.chars()) {
            *slot = c;
        }
        let spans = tile_spans(&letters, &[LetterState::Empty; WORD_LENGTH]);
        render_line(f, inner, model.guesses.len().saturating_sub(skip_count), spans);
    }
}

fn tile_spans(letters: &[char; WORD_LENGTH], states: &[LetterState; WORD_LENGTH]) -> Vec<Span<'static>> {
    let mut spans = vec![Span::raw("  ")];
    for (letter, state) in letters.iter().zip(states) {
        let (bg_color, fg_color) = state.colors();
        spans.push(Span::styled(
            format!(" {letter} "),
            Style::default().fg(fg_color).bg(bg_color),
        ));
        spans.push(Span::raw(" "));
    }
    spans
}

#[allow(clippy::cast_possible_truncation)]
fn render_line(f: &mut Frame, area: Rect, row_index: usize, spans: Vec<Span>) {
    let y = area.y + (row_index as u16 * ROW_SPACING);
    if y >= area.y + area.height {
        return;
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)),
        Rect {
            x: area.x,
            y,
            width: area.width,
            height: 1,
        },
    );
}

fn render_info(f: &mut Frame, area: Rect, model: &TuiModel) {
    let mut lines = Vec::new();

    if let Some(remaining) = model.remaining {
        lines.push(Line::from(vec![Span::styled(
            format!("Possible candidates: {remaining}"),
            INFO_STYLE,
        )]));
        lines.push(Line::from(""));
    }

    if !model.suggestions.is_empty() {
        lines.push(Line::from(vec![Span::styled("Suggestions:", SUCCESS_STYLE)]));
        for (i, word) in model.suggestions.iter().enumerate() {
            lines.push(Line::from(format!("  {}. {word}", i + 1)));
        }
        lines.push(Line::from(""));
    }

    if !model.message.is_empty() {
        lines.push(Line::from(vec![Span::styled(model.message.as_str(), MESSAGE_STYLE)]));
    }
    if !model.error_message.is_empty() {
        lines.push(Line::from(vec![Span::styled(
            model.error_message.as_str(),
            ERROR_STYLE,
        )]));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("Information").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_status(f: &mut Frame, area: Rect, status: &str) {
    let status_text = if status.is_empty() { "Ready" } else { status };
    let paragraph = Paragraph::new(status_text)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(paragraph, area);
}

fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
    let text = match state {
        TuiState::EnteringGuess => "Type your 5-letter guess | ENTER: Submit | ESC: Quit",
        TuiState::MarkingFeedback { .. } => {
            "C: Correct | M: Misplaced | W: Wrong | BACKSPACE: Go back | ESC: Quit"
        }
        TuiState::ConfirmingFeedback => "ENTER: Confirm feedback | BACKSPACE: Go back and edit",
        TuiState::GameOver => "N: New Game | ESC: Quit",
    };
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

impl GameInterface for TuiInterface {
    fn display_suggestions(&mut self, view: &SuggestionView) {
        self.model.show_view(view);
        self.draw_or_log();
    }

    fn read_guess(&mut self) -> Option<UserAction> {
        Some(self.next_action())
    }

    fn read_feedback(&mut self, guess: &Word) -> Option<UserAction> {
        self.model.begin_feedback(guess);
        Some(self.next_action())
    }

    fn display_error(&mut self, error: &EngineError) {
        self.model.error_message = error.to_string();
        self.draw_or_log();
    }

    fn display_solution_found(&mut self, solution: &Word, rounds: usize) {
        self.model.state = TuiState::GameOver;
        if let Some(row) = self.model.guesses.last_mut() {
            row.states = [LetterState::Judged(LetterJudgment::Correct); WORD_LENGTH];
        }
        self.model.message = format!("✓ Solution found: {} in {rounds} rounds", solution.to_uppercase());
        self.model.status = format!("Game Over - Solution: {}", solution.to_uppercase());
        self.draw_or_log();
    }

    fn display_no_candidates_message(&mut self) {
        self.model.state = TuiState::GameOver;
        self.model.suggestions.clear();
        self.model.remaining = Some(0);
        self.model.message = "No candidates remain. Check your inputs.".to_string();
        self.model.status = "Error: No valid candidates found".to_string();
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.model.status = "Exiting application...".to_string();
        self.draw_or_log();
    }

    fn display_new_game_message(&mut self, word_count: usize) {
        self.model.reset(word_count);
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
