use clap::Parser;
use crossterm::style::Stylize;
use crate::error::EngineError;
use crate::feedback::{LetterJudgment, RoundFeedback};
use crate::game_state::{GameInterface, SuggestionView, UserAction, round_label};
use crate::word::Word;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Wordle assistant: narrows the word list from your feedback and suggests guesses
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited wordbank file
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Number of suggestions to present each round
    #[arg(
        short = 'n',
        long = "num-suggestions",
        default_value_t = 3,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub num_suggestions: u16,

    /// Increase logging verbosity; repeat for more
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only accept guesses that are in the word list
    #[arg(long)]
    pub strict: bool,

    /// Use the full-screen terminal interface
    #[arg(long, conflicts_with = "target")]
    pub tui: bool,

    /// Play automatically against a known answer and print the game
    #[arg(long, value_name = "WORD")]
    pub target: Option<String>,

    /// Write log output to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

fn read_input<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => None,
        Ok(_) => Some(input.trim().to_string()),
        Err(e) => {
            log::warn!("Failed to read input: {e}");
            None
        }
    }
}

/// Recognizes `exit` and `next`; anything else non-empty becomes `other(input)`.
fn parse_command(input: Option<String>, other: fn(String) -> UserAction) -> Option<UserAction> {
    let Some(input) = input else {
        // End of input.
        return Some(UserAction::Exit);
    };
    match input.to_lowercase().as_str() {
        "" => None,
        "exit" | "quit" => Some(UserAction::Exit),
        "next" => Some(UserAction::NewGame),
        _ => Some(other(input)),
    }
}

pub fn read_guess<R: BufRead, W: Write>(
    reader: &mut R,
    out: &mut W,
    game_over: bool,
) -> Option<UserAction> {
    if game_over {
        say(out, format_args!("\nEnter 'next' to start a new game or 'exit' to quit:"));
    } else {
        say(
            out,
            format_args!(
                "\nWhat was your guess? (5 letters, or 'exit' to quit, or 'next' to start a new game)"
            ),
        );
    }
    parse_command(read_input(reader), UserAction::Guess)
}

pub fn read_feedback<R: BufRead, W: Write>(
    reader: &mut R,
    out: &mut W,
    guess: &Word,
) -> Option<UserAction> {
    say(
        out,
        format_args!(
            "What was the result for {}? (c=correct, m=misplaced, w=wrong, e.g. wcmww)",
            guess.to_uppercase()
        ),
    );
    parse_command(read_input(reader), UserAction::Feedback)
}

/// Writes one line; a closed output is logged, not fatal.
fn say<W: Write>(out: &mut W, line: fmt::Arguments) {
    if let Err(e) = writeln!(out, "{line}") {
        log::warn!("Failed to write output: {e}");
    }
}

/// One guess as colored tiles.
pub fn render_feedback_row(feedback: &RoundFeedback) -> String {
    feedback
        .positions()
        .map(|(_, letter, judgment)| {
            let tile = format!(" {} ", (letter as char).to_ascii_uppercase());
            let styled = match judgment {
                LetterJudgment::Correct => tile.black().on_green(),
                LetterJudgment::Misplaced => tile.black().on_yellow(),
                LetterJudgment::Absent => tile.white().on_dark_grey(),
            };
            styled.to_string()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn display_board<W: Write>(out: &mut W, history: &[RoundFeedback]) {
    for feedback in history {
        say(out, format_args!("  {}", render_feedback_row(feedback)));
    }
}

pub fn display_suggestions<W: Write>(out: &mut W, view: &SuggestionView, verbose: bool) {
    say(out, format_args!("\n{}", round_label(view.round)));
    if !view.history.is_empty() {
        display_board(out, view.history);
    }
    if verbose && !view.constraints.is_empty() {
        say(out, format_args!("{}", view.constraints));
    }
    say(out, format_args!("Possible candidates: {}", view.remaining));
    say(out, format_args!("Here are my suggestions:"));
    for (i, word) in view.suggestions.iter().enumerate() {
        say(out, format_args!("{}. {}", i + 1, word.to_uppercase()));
    }
}

/// CLI implementation of the GameInterface trait
/// Reads answers from any `BufRead` and writes prompts and results to any `Write`.
pub struct CliInterface<R: BufRead, W: Write = io::Stdout> {
    reader: R,
    out: W,
    verbose: bool,
    game_over: bool,
}

impl<R: BufRead> CliInterface<R> {
    /// Prompts and results go to stdout.
    pub fn new(reader: R) -> Self {
        Self::with_output(reader, io::stdout())
    }
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn with_output(reader: R, out: W) -> Self {
        Self {
            reader,
            out,
            verbose: false,
            game_over: false,
        }
    }

    /// Also print the accumulated letter constraints each round.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn display_suggestions(&mut self, view: &SuggestionView) {
        display_suggestions(&mut self.out, view, self.verbose);
    }

    fn read_guess(&mut self) -> Option<UserAction> {
        read_guess(&mut self.reader, &mut self.out, self.game_over)
    }

    fn read_feedback(&mut self, guess: &Word) -> Option<UserAction> {
        read_feedback(&mut self.reader, &mut self.out, guess)
    }

    fn display_error(&mut self, error: &EngineError) {
        say(&mut self.out, format_args!("Invalid input: {error}"));
    }

    fn display_solution_found(&mut self, solution: &Word, rounds: usize) {
        self.game_over = true;
        say(
            &mut self.out,
            format_args!("Solution found: {} ({} rounds)", solution.to_uppercase(), rounds),
        );
    }

    fn display_no_candidates_message(&mut self) {
        self.game_over = true;
        say(
            &mut self.out,
            format_args!(
                "I ran out of words. Either the feedback contradicts itself or the answer is not in my word list."
            ),
        );
    }

    fn display_exit_message(&mut self) {
        say(&mut self.out, format_args!("Exiting."));
    }

    fn display_new_game_message(&mut self, word_count: usize) {
        self.game_over = false;
        say(
            &mut self.out,
            format_args!("New game started. Loaded {word_count} words."),
        );
    }
}
