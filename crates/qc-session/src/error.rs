//! Error types for the game session.

use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while processing player input.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Malformed arguments to a known command.
    #[error("invalid choice: {0}")]
    InvalidChoice(String),

    /// Unknown command.
    #[error("unknown command: {0} (type 'help' for commands)")]
    UnknownCommand(String),

    /// A battle command was given outside a battle.
    #[error("you are not in a battle")]
    NoBattle,

    /// A non-battle command was given during a battle.
    #[error("finish the battle first: attack, ability, or run")]
    BattleInProgress,

    /// A game rule was violated.
    #[error(transparent)]
    Core(#[from] qc_core::QcError),

    /// Loading or saving failed.
    #[error(transparent)]
    Data(#[from] qc_data::DataError),
}
