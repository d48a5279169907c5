// Library interface for wordle-assistant
// The engine (word, feedback, constraints, solver, game_state) has no terminal
// dependencies; cli and tui are front ends over `GameInterface`.

pub mod cli;
pub mod constraints;
pub mod error;
pub mod feedback;
pub mod game_state;
pub mod logging;
pub mod solver;
pub mod tui;
pub mod word;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use constraints::{ConstraintSet, LetterSet};
pub use error::EngineError;
pub use feedback::{LetterJudgment, RoundFeedback, grade};
pub use game_state::{
    AutoplayOutcome, GameInterface, RoundReport, Session, SessionConfig, SessionState, UserAction,
    autoplay, game_loop,
};
pub use solver::{RankWeights, filter_candidates, rank_candidates};
pub use word::{WORD_LENGTH, Word};
pub use wordbank::{WordList, load_wordbank_from_file, load_wordbank_from_str};
