use std::fmt;

use crate::constraints::ConstraintSet;
use crate::error::EngineError;
use crate::feedback::{RoundFeedback, grade, parse_judgments};
use crate::solver::{RankWeights, filter_candidates, rank_candidates};
use crate::word::Word;
use crate::wordbank::WordList;

pub const DEFAULT_SUGGESTIONS: usize = 3;
pub const MAX_ROUNDS: usize = 6;

/// "Round N of 6", or just "Round N" once play runs past the usual six.
pub fn round_label(round: usize) -> String {
    if round <= MAX_ROUNDS {
        format!("Round {round} of {MAX_ROUNDS}")
    } else {
        format!("Round {round}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    AwaitingGuess,
    AwaitingFeedback,
    Solved,
    Exhausted,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Solved | Self::Exhausted)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::AwaitingGuess => "awaiting a guess",
            Self::AwaitingFeedback => "awaiting feedback",
            Self::Solved => "solved",
            Self::Exhausted => "out of candidates",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// How many suggestions to return each round.
    pub suggestions: usize,
    /// Reject guesses that are not in the word list.
    pub strict: bool,
    pub weights: RankWeights,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            suggestions: DEFAULT_SUGGESTIONS,
            strict: false,
            weights: RankWeights::default(),
        }
    }
}

/// What the caller gets back after each round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    /// Round the next guess belongs to, or the last round played once terminal.
    pub round: usize,
    pub suggestions: Vec<Word>,
    pub remaining: usize,
    pub state: SessionState,
}

/// One game from first guess to solved or exhausted.
///
/// Candidates are re-derived from the word list and the accumulated
/// constraints every round rather than narrowed in place.
#[derive(Debug, Clone)]
pub struct Session<'a> {
    words: &'a WordList,
    config: SessionConfig,
    constraints: ConstraintSet,
    history: Vec<RoundFeedback>,
    candidates: Vec<Word>,
    suggestions: Vec<Word>,
    pending_guess: Option<Word>,
    round: usize,
    state: SessionState,
}

impl<'a> Session<'a> {
    pub fn new(words: &'a WordList, config: SessionConfig) -> Self {
        let candidates = words.words().to_vec();
        let (suggestions, state) = match rank_candidates(&candidates, config.suggestions, &config.weights) {
            Ok(suggestions) => (suggestions, SessionState::AwaitingGuess),
            Err(_) => (Vec::new(), SessionState::Exhausted),
        };
        log::info!("New session over {} words", words.len());
        Self {
            words,
            config,
            constraints: ConstraintSet::new(),
            history: Vec::new(),
            candidates,
            suggestions,
            pending_guess: None,
            round: 1,
            state,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn suggestions(&self) -> &[Word] {
        &self.suggestions
    }

    pub fn candidates(&self) -> &[Word] {
        &self.candidates
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    pub fn history(&self) -> &[RoundFeedback] {
        &self.history
    }

    pub fn pending_guess(&self) -> Option<Word> {
        self.pending_guess
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn report(&self) -> RoundReport {
        RoundReport {
            round: self.round,
            suggestions: self.suggestions.clone(),
            remaining: self.candidates.len(),
            state: self.state,
        }
    }

    fn expect_state(&self, expected: SessionState) -> Result<(), EngineError> {
        if self.state.is_terminal() {
            return Err(EngineError::GameOver);
        }
        if self.state != expected {
            return Err(EngineError::UnexpectedInput(self.state));
        }
        Ok(())
    }

    /// AWAITING_GUESS -> AWAITING_FEEDBACK.
    pub fn submit_guess(&mut self, raw: &str) -> Result<Word, EngineError> {
        self.expect_state(SessionState::AwaitingGuess)?;
        let guess = Word::parse(raw)?;
        if self.config.strict && !self.words.contains(&guess) {
            return Err(EngineError::UnknownGuess(guess.to_string()));
        }
        self.pending_guess = Some(guess);
        self.state = SessionState::AwaitingFeedback;
        Ok(guess)
    }

    /// Folds the feedback for the pending guess, then re-filters and re-ranks.
    pub fn submit_feedback(&mut self, raw: &str) -> Result<RoundReport, EngineError> {
        self.expect_state(SessionState::AwaitingFeedback)?;
        let judgments = parse_judgments(raw)?;
        let guess = self
            .pending_guess
            .ok_or(EngineError::UnexpectedInput(self.state))?;
        let feedback = RoundFeedback::new(guess, judgments);

        self.constraints.apply(&feedback);
        self.history.push(feedback);
        self.pending_guess = None;

        if feedback.is_win() {
            self.candidates = vec![guess];
            self.suggestions = vec![guess];
            self.state = SessionState::Solved;
            log::info!("Solved in round {}: {}", self.round, guess);
            return Ok(self.report());
        }

        self.candidates = filter_candidates(self.words, &self.constraints);
        match rank_candidates(&self.candidates, self.config.suggestions, &self.config.weights) {
            Ok(suggestions) => {
                self.suggestions = suggestions;
                self.state = SessionState::AwaitingGuess;
                self.round += 1;
            }
            Err(EngineError::Exhausted) => {
                self.suggestions.clear();
                self.state = SessionState::Exhausted;
                log::info!("No candidates left after round {}", self.round);
            }
            Err(e) => return Err(e),
        }
        Ok(self.report())
    }

    /// Convenience for callers that have both halves of a round at once.
    ///
    /// Both halves are validated before anything changes, so a rejected
    /// round leaves the session as it was.
    pub fn play_round(&mut self, guess: &str, feedback: &str) -> Result<RoundReport, EngineError> {
        parse_judgments(feedback)?;
        self.submit_guess(guess)?;
        self.submit_feedback(feedback)
    }
}

/// A round-by-round record of an [`autoplay`] game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoplayOutcome {
    pub rounds: Vec<RoundFeedback>,
    pub state: SessionState,
}

impl AutoplayOutcome {
    pub fn solved(&self) -> bool {
        self.state == SessionState::Solved
    }
}

/// Plays against a known `target`, always taking the top suggestion, for at
/// most `max_rounds` guesses.
pub fn autoplay(
    words: &WordList,
    target: Word,
    config: SessionConfig,
    max_rounds: usize,
) -> AutoplayOutcome {
    let mut session = Session::new(words, config);
    while !session.state().is_terminal() && session.history().len() < max_rounds {
        let Some(&guess) = session.suggestions().first() else {
            break;
        };
        let feedback = grade(guess, target);
        let played = match session.submit_guess(&guess.to_string()) {
            Ok(_) => session.submit_feedback(&feedback.descriptor()),
            Err(e) => Err(e),
        };
        if let Err(e) = played {
            log::warn!("Autoplay stopped: {e}");
            break;
        }
    }
    AutoplayOutcome {
        rounds: session.history().to_vec(),
        state: session.state(),
    }
}

// Front-end interface

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    Feedback(String),
    Exit,
    NewGame,
}

/// Everything a front end needs to draw the state between rounds.
#[derive(Debug, Clone)]
pub struct SuggestionView<'s> {
    pub round: usize,
    pub suggestions: &'s [Word],
    pub remaining: usize,
    pub history: &'s [RoundFeedback],
    pub constraints: &'s ConstraintSet,
}

impl<'s> SuggestionView<'s> {
    pub fn of(session: &'s Session<'_>) -> Self {
        Self {
            round: session.round(),
            suggestions: session.suggestions(),
            remaining: session.candidates().len(),
            history: session.history(),
            constraints: session.constraints(),
        }
    }
}

/// The narrow boundary between the engine and whatever talks to the user.
///
/// `read_*` return `None` when nothing usable was entered; the loop asks again.
pub trait GameInterface {
    fn display_suggestions(&mut self, view: &SuggestionView);
    fn read_guess(&mut self) -> Option<UserAction>;
    fn read_feedback(&mut self, guess: &Word) -> Option<UserAction>;
    fn display_error(&mut self, error: &EngineError);
    fn display_solution_found(&mut self, solution: &Word, rounds: usize);
    fn display_no_candidates_message(&mut self);
    fn display_exit_message(&mut self);
    fn display_new_game_message(&mut self, word_count: usize);
}

pub fn game_loop<I: GameInterface>(words: &WordList, config: &SessionConfig, interface: &mut I) {
    let mut session = Session::new(words, config.clone());
    interface.display_new_game_message(session.word_count());
    show_round(&session, interface);

    loop {
        let action = match (session.state(), session.pending_guess()) {
            (SessionState::AwaitingFeedback, Some(guess)) => interface.read_feedback(&guess),
            _ => interface.read_guess(),
        };
        let Some(action) = action else {
            continue;
        };

        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::NewGame => {
                session = Session::new(words, config.clone());
                interface.display_new_game_message(session.word_count());
                show_round(&session, interface);
            }
            UserAction::Guess(raw) => {
                if let Err(e) = session.submit_guess(&raw) {
                    interface.display_error(&e);
                }
            }
            UserAction::Feedback(raw) => match session.submit_feedback(&raw) {
                Ok(_) => show_round(&session, interface),
                Err(e) => interface.display_error(&e),
            },
        }
    }
}

fn show_round<I: GameInterface>(session: &Session<'_>, interface: &mut I) {
    match session.state() {
        SessionState::Solved => {
            if let Some(&solution) = session.candidates().first() {
                interface.display_solution_found(&solution, session.history().len());
            }
        }
        SessionState::Exhausted => interface.display_no_candidates_message(),
        SessionState::AwaitingGuess | SessionState::AwaitingFeedback => {
            interface.display_suggestions(&SuggestionView::of(session));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordbank::load_wordbank_from_str;

    fn list(data: &str) -> WordList {
        load_wordbank_from_str(data)
    }

    fn word(s: &str) -> Word {
        Word::parse(s).unwrap()
    }

    #[test]
    fn test_new_session_suggests_from_whole_list() {
        let words = list("crane\nslate\nraise\nstare");
        let session = Session::new(&words, SessionConfig::default());
        assert_eq!(session.state(), SessionState::AwaitingGuess);
        assert_eq!(session.round(), 1);
        assert_eq!(session.candidates().len(), 4);
        assert_eq!(session.suggestions().len(), 3);
        assert!(session.constraints().is_empty());
    }

    #[test]
    fn test_empty_word_list_starts_exhausted() {
        let words = list("");
        let session = Session::new(&words, SessionConfig::default());
        assert_eq!(session.state(), SessionState::Exhausted);
    }

    #[test]
    fn test_guess_then_feedback_transitions() {
        let words = list("crane\nslate\nraise\nstare");
        let mut session = Session::new(&words, SessionConfig::default());
        assert_eq!(session.submit_guess("CRANE").unwrap(), word("crane"));
        assert_eq!(session.state(), SessionState::AwaitingFeedback);

        let report = session.submit_feedback("wwcwc").unwrap();
        assert_eq!(report.round, 2);
        assert_eq!(report.state, SessionState::AwaitingGuess);
        assert_eq!(report.remaining, 1);
        assert_eq!(report.suggestions, vec![word("slate")]);
    }

    #[test]
    fn test_all_correct_solves_with_the_guess() {
        let words = list("crane\nslate");
        let mut session = Session::new(&words, SessionConfig::default());
        // Not in the list, still solved.
        let report = session.play_round("proxy", "ccccc").unwrap();
        assert_eq!(report.state, SessionState::Solved);
        assert_eq!(session.candidates(), &[word("proxy")]);
        assert_eq!(report.round, 1);
    }

    #[test]
    fn test_exhausted_when_nothing_fits() {
        let words = list("crane\nslate");
        let mut session = Session::new(&words, SessionConfig::default());
        let report = session.play_round("crane", "wwwww").unwrap();
        assert_eq!(report.state, SessionState::Exhausted);
        assert_eq!(report.remaining, 0);
        assert!(report.suggestions.is_empty());
        // The round that ran dry is the last one played.
        assert_eq!(report.round, 1);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_zero_suggestions_config_still_suggests() {
        let words = list("crane\nslate\nraise\nstare");
        let config = SessionConfig {
            suggestions: 0,
            ..SessionConfig::default()
        };
        let session = Session::new(&words, config.clone());
        assert_eq!(session.suggestions().len(), 1);

        let outcome = autoplay(&words, word("stare"), config, MAX_ROUNDS);
        assert!(outcome.solved());
    }

    #[test]
    fn test_round_label_drops_cap_after_six() {
        assert_eq!(round_label(1), "Round 1 of 6");
        assert_eq!(round_label(6), "Round 6 of 6");
        assert_eq!(round_label(7), "Round 7");
    }

    #[test]
    fn test_terminal_states_reject_input() {
        let words = list("crane\nslate");
        let mut session = Session::new(&words, SessionConfig::default());
        session.play_round("crane", "ccccc").unwrap();
        assert_eq!(session.submit_guess("slate"), Err(EngineError::GameOver));
        assert_eq!(session.submit_feedback("ccccc"), Err(EngineError::GameOver));
    }

    #[test]
    fn test_out_of_order_input_is_rejected() {
        let words = list("crane\nslate");
        let mut session = Session::new(&words, SessionConfig::default());
        assert_eq!(
            session.submit_feedback("wwwww"),
            Err(EngineError::UnexpectedInput(SessionState::AwaitingGuess))
        );
        session.submit_guess("crane").unwrap();
        assert_eq!(
            session.submit_guess("slate"),
            Err(EngineError::UnexpectedInput(SessionState::AwaitingFeedback))
        );
    }

    #[test]
    fn test_invalid_input_leaves_session_untouched() {
        let words = list("crane\nslate\nraise");
        let mut session = Session::new(&words, SessionConfig::default());
        assert!(matches!(session.submit_guess("cr4ne"), Err(EngineError::InvalidGuess(_))));
        assert_eq!(session.state(), SessionState::AwaitingGuess);

        session.submit_guess("crane").unwrap();
        assert!(matches!(session.submit_feedback("ccc"), Err(EngineError::InvalidFeedback(_))));
        assert_eq!(session.state(), SessionState::AwaitingFeedback);
        assert!(session.constraints().is_empty());
        assert!(session.history().is_empty());
        assert_eq!(session.round(), 1);
    }

    #[test]
    fn test_play_round_checks_feedback_before_guess() {
        let words = list("crane\nslate");
        let mut session = Session::new(&words, SessionConfig::default());
        assert!(matches!(
            session.play_round("crane", "xyz"),
            Err(EngineError::InvalidFeedback(_))
        ));
        assert_eq!(session.state(), SessionState::AwaitingGuess);
    }

    #[test]
    fn test_strict_mode_rejects_unknown_guesses() {
        let words = list("crane\nslate");
        let config = SessionConfig {
            strict: true,
            ..SessionConfig::default()
        };
        let mut session = Session::new(&words, config);
        assert_eq!(
            session.submit_guess("proxy"),
            Err(EngineError::UnknownGuess("proxy".to_string()))
        );
        assert!(session.submit_guess("slate").is_ok());
    }

    #[test]
    fn test_single_candidate_is_not_solved_until_confirmed() {
        let words = list("crane\nslate\nraise\nstare");
        let mut session = Session::new(&words, SessionConfig::default());
        let report = session.play_round("crane", "wwcwc").unwrap();
        assert_eq!(report.remaining, 1);
        assert_eq!(report.state, SessionState::AwaitingGuess);

        let report = session.play_round("slate", "ccccc").unwrap();
        assert_eq!(report.state, SessionState::Solved);
        assert_eq!(report.round, 2);
    }

    #[test]
    fn test_autoplay_solves_known_target() {
        let words = list("crane\nslate\nraise\nstare\nbrain\ntrain\ngrain");
        let outcome = autoplay(&words, word("grain"), SessionConfig::default(), MAX_ROUNDS);
        assert!(outcome.solved());
        assert_eq!(outcome.rounds.last().map(|r| r.guess()), Some(word("grain")));
        assert!(outcome.rounds.len() <= MAX_ROUNDS);
    }

    #[test]
    fn test_autoplay_respects_round_cap() {
        let words = list("crane\nslate\nraise\nstare\nbrain\ntrain\ngrain");
        let outcome = autoplay(&words, word("grain"), SessionConfig::default(), 0);
        assert!(outcome.rounds.is_empty());
        assert_eq!(outcome.state, SessionState::AwaitingGuess);
    }

    /// Records what the loop asked it to show and replays scripted actions.
    struct ScriptedInterface {
        actions: std::vec::IntoIter<UserAction>,
        events: Vec<String>,
    }

    impl ScriptedInterface {
        fn new(actions: Vec<UserAction>) -> Self {
            Self {
                actions: actions.into_iter(),
                events: Vec::new(),
            }
        }

        fn next_action(&mut self) -> Option<UserAction> {
            Some(self.actions.next().unwrap_or(UserAction::Exit))
        }
    }

    impl GameInterface for ScriptedInterface {
        fn display_suggestions(&mut self, view: &SuggestionView) {
            self.events.push(format!("round {} remaining {}", view.round, view.remaining));
        }
        fn read_guess(&mut self) -> Option<UserAction> {
            self.next_action()
        }
        fn read_feedback(&mut self, _guess: &Word) -> Option<UserAction> {
            self.next_action()
        }
        fn display_error(&mut self, error: &EngineError) {
            self.events.push(format!("error {error}"));
        }
        fn display_solution_found(&mut self, solution: &Word, rounds: usize) {
            self.events.push(format!("solved {solution} in {rounds}"));
        }
        fn display_no_candidates_message(&mut self) {
            self.events.push("exhausted".to_string());
        }
        fn display_exit_message(&mut self) {
            self.events.push("exit".to_string());
        }
        fn display_new_game_message(&mut self, word_count: usize) {
            self.events.push(format!("new game {word_count}"));
        }
    }

    #[test]
    fn test_game_loop_full_game() {
        let words = list("crane\nslate\nraise\nstare");
        let mut interface = ScriptedInterface::new(vec![
            UserAction::Guess("crane".into()),
            UserAction::Feedback("wwcwc".into()),
            UserAction::Guess("slate".into()),
            UserAction::Feedback("ccccc".into()),
        ]);
        game_loop(&words, &SessionConfig::default(), &mut interface);
        assert_eq!(
            interface.events,
            vec![
                "new game 4",
                "round 1 remaining 4",
                "round 2 remaining 1",
                "solved slate in 2",
                "exit",
            ]
        );
    }

    #[test]
    fn test_game_loop_reports_errors_and_new_game() {
        let words = list("crane\nslate");
        let mut interface = ScriptedInterface::new(vec![
            UserAction::Guess("cr4ne".into()),
            UserAction::Guess("crane".into()),
            UserAction::Feedback("ggggg".into()),
            UserAction::Feedback("wwwww".into()),
            UserAction::Guess("slate".into()),
            UserAction::NewGame,
        ]);
        game_loop(&words, &SessionConfig::default(), &mut interface);
        assert_eq!(interface.events[0], "new game 2");
        assert!(interface.events[2].starts_with("error guess"));
        assert!(interface.events[3].starts_with("error feedback"));
        assert_eq!(interface.events[4], "exhausted");
        assert_eq!(interface.events[5], "error the game is over, start a new one");
        assert_eq!(interface.events[6], "new game 2");
        assert_eq!(interface.events[7], "round 1 remaining 2");
        assert_eq!(interface.events.last().map(String::as_str), Some("exit"));
    }
}
