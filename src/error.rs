use thiserror::Error;

use crate::game_state::SessionState;

/// Everything the engine can refuse to do.
///
/// Validation errors never touch session state, so the caller can simply re-prompt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("guess \"{0}\" must be exactly 5 letters")]
    InvalidGuess(String),
    #[error("feedback \"{0}\" must be 5 characters, each one of 'c', 'm' or 'w'")]
    InvalidFeedback(String),
    #[error("guess \"{0}\" is not in the word list")]
    UnknownGuess(String),
    #[error("not expecting that input while {0}")]
    UnexpectedInput(SessionState),
    #[error("the game is over, start a new one")]
    GameOver,
    #[error("no candidate words remain")]
    Exhausted,
}
