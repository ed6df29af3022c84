//! Error types for the career engine.
//!
//! The pure reducers in this crate never fail: unknown ids are no-ops and
//! missing staff fall back to neutral defaults. Errors only surface at the
//! boundaries (snapshots, replays, setup files) and in the [`Career`]
//! session, which enforces the caller-side policies before delegating.
//!
//! [`Career`]: crate::session::Career

use thiserror::Error;

/// Result type alias using [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;

/// Top-level error type for the career engine.
#[derive(Debug, Error)]
pub enum GameError {
    /// Snapshot could not be encoded or decoded.
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Replay file was written by an incompatible version.
    #[error("Replay version mismatch: expected {expected}, found {found}")]
    ReplayVersion {
        /// Version this build understands.
        expected: u32,
        /// Version stored in the file.
        found: u32,
    },

    /// Reading or writing a replay file failed.
    #[error("Replay IO error: {0}")]
    Io(String),

    /// Career setup data is malformed.
    #[error("Failed to parse setup data: {0}")]
    SetupParse(String),

    /// A play command was issued while no game is being played.
    #[error("No interactive game in progress")]
    NoActiveGame,

    /// A new game was requested while another is still live.
    #[error("An interactive game is already in progress")]
    GameInProgress,

    /// The live game has not reached its final whistle yet.
    #[error("The interactive game has not finished")]
    GameNotFinished,

    /// The requested matchup does not exist or was already played.
    #[error("Matchup not available: {0}")]
    UnknownMatchup(String),

    /// The coach called a play the situation does not allow.
    #[error("Play call not available: {0}")]
    PlayNotAvailable(String),

    /// A caller-enforced precondition was not met.
    #[error(transparent)]
    Policy(#[from] PolicyViolation),
}

/// Preconditions the caller must hold before invoking a reducer.
///
/// The reducers assume these hold and do not re-check them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolicyViolation {
    /// The roster is at its cap.
    #[error("Roster is full ({cap} players)")]
    RosterFull {
        /// Roster cap in force.
        cap: usize,
    },

    /// The school cannot afford the hire.
    #[error("Insufficient budget: hire costs {cost}, budget is {budget}")]
    InsufficientBudget {
        /// Cost of the hire.
        cost: i64,
        /// Budget available.
        budget: i64,
    },

    /// No scouting points remain this week.
    #[error("No scouting points remaining")]
    NoScoutingPoints,

    /// No recruiting actions remain this week.
    #[error("No recruiting actions remaining")]
    NoRecruitingActions,

    /// The prospect is already fully scouted.
    #[error("Prospect is already fully scouted")]
    AlreadyScouted,

    /// A staff style dial was set outside 0-100.
    #[error("Style value {0} is outside 0-100")]
    StyleOutOfRange(u8),
}
