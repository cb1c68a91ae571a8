use thiserror::Error;

use crate::enemy::EnemyId;
use crate::words::WordDifficulty;

/// Errors raised by the session engine and its configuration layer
#[derive(Debug, Error)]
pub enum GameError {
    /// A difficulty's word pool has no words; the session refuses to start
    #[error("word pool `{0}` is empty")]
    EmptyWordPool(WordDifficulty),

    /// A pool word contains something other than ASCII letters and could never be typed
    #[error("word `{word}` in pool `{difficulty}` contains characters other than letters")]
    UntypeableWord {
        difficulty: WordDifficulty,
        word: String,
    },

    /// No word list was found for a difficulty
    #[error("no word list for `{0}`")]
    MissingWordList(WordDifficulty),

    /// A tuning value is outside its allowed range
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// The enemy was already destroyed (or never spawned)
    #[error("enemy {0} is not active")]
    EnemyNotActive(EnemyId),

    /// Restart is only accepted from the game-over screen
    #[error("restart requested while the session is still active")]
    SessionActive,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
