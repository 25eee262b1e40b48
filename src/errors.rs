use crate::{Move, Species};

/// Main error type for the dental-quest battle engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BattleEngineError {
    /// The move selector returned a move the player cannot use right now.
    /// Nothing in the battle was mutated; the selector is expected to retry.
    #[error("invalid move selection {selected}: {reason}")]
    InvalidMoveSelection {
        selected: Move,
        reason: MoveRejection,
    },

    /// Removing a move would leave the combatant with nothing to attack with
    #[error("refusing to remove the last move from {name}")]
    EmptyMoveset { name: String },

    /// A species missing from the content tables
    #[error("species not found in content tables: {0}")]
    UnknownSpecies(Species),

    /// A move missing from the content tables
    #[error("move not found in content tables: {0}")]
    UnknownMove(Move),

    /// A stage with no tier list in the content tables
    #[error("no opponents defined for stage {0}")]
    UnknownStage(u32),

    /// More than two traits share the same non-neutral rating
    #[error("at most two traits may be rated {0:?}")]
    InvalidTraits(schema::TraitRating),

    /// Content tables could not be read or parsed
    #[error("content error: {0}")]
    Content(String),
}

/// Why a selected move was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    NotKnown,
    Compromised,
}

impl std::fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveRejection::NotKnown => write!(f, "not in the combatant's arsenal"),
            MoveRejection::Compromised => write!(f, "compromised until the next action"),
        }
    }
}

impl From<std::io::Error> for BattleEngineError {
    fn from(err: std::io::Error) -> Self {
        BattleEngineError::Content(err.to_string())
    }
}

impl From<ron::error::SpannedError> for BattleEngineError {
    fn from(err: ron::error::SpannedError) -> Self {
        BattleEngineError::Content(err.to_string())
    }
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;
