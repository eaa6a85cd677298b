//! Error types
//!
//! Every failure is a value returned to the caller; nothing here aborts the
//! process. Out-of-order state machine calls are rejected, not fatal.

use thiserror::Error;

use crate::state::RoundPhase;

/// Errors produced while driving a game session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A state machine method was called in the wrong phase. The call is a
    /// rejected no-op; the session is left untouched.
    #[error("{action} is not valid in the {phase:?} phase")]
    InvalidTransition {
        /// The operation that was attempted.
        action: &'static str,
        /// The phase the machine was in.
        phase: RoundPhase,
    },

    /// Exit id missing from the exit table. Unreachable with a correctly
    /// paired board and table; treated as a configuration fault.
    #[error("unknown exit id `{0}`")]
    UnknownExit(String),

    /// Entry index outside the board's entry slots.
    #[error("entry index {index} out of range (board has {count} entry slots)")]
    InvalidEntry {
        /// The index that was requested.
        index: usize,
        /// Number of entry slots on the board.
        count: usize,
    },

    /// A drop is already in flight. New drops are rejected until the current
    /// one resolves.
    #[error("a drop is already in flight")]
    DropInFlight,
}

/// Errors produced while loading or validating a [`crate::GameConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Board width/height not positive finite numbers.
    #[error("board dimensions must be positive and finite")]
    InvalidDimensions,

    /// Board too small to fit the peg field between the clearance bands.
    #[error("board too small for the peg field clearances")]
    BoardTooSmall,

    /// Peg grid with zero rows or columns.
    #[error("peg grid needs at least one row and one column")]
    EmptyGrid,

    /// No exits configured.
    #[error("at least one exit must be configured")]
    NoExits,

    /// Two exits share an id.
    #[error("duplicate exit id `{0}`")]
    DuplicateExitId(String),

    /// Zero scored rounds.
    #[error("total_rounds must be at least 1")]
    NoRounds,

    /// Config JSON failed to parse.
    #[error("malformed config: {0}")]
    Malformed(#[from] serde_json::Error),
}
