use schema::{BattlerIndex, Move};
use thiserror::Error;

/// Main error type for the battle engine.
///
/// Only programming-level faults travel through this type. A move failing
/// its precondition is a game outcome and is reported through the move
/// history instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleEngineError {
    /// Error related to move data lookup or processing
    #[error("Move data error: {0}")]
    MoveData(#[from] MoveDataError),
    /// Error related to invalid battle state
    #[error("Battle state error: {0}")]
    BattleState(#[from] BattleStateError),
    /// Error related to invalid player actions
    #[error("Action error: {0}")]
    Action(#[from] ActionError),
}

/// Errors related to move data operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveDataError {
    /// The specified move was not found in the table
    #[error("Move not found: {0:?}")]
    MoveNotFound(Move),
    /// Move table text could not be parsed
    #[error("Malformed move data: {0}")]
    MalformedData(String),
    /// The same move appears twice in the table
    #[error("Duplicate move entry: {0:?}")]
    DuplicateEntry(Move),
}

/// Errors related to battle state validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleStateError {
    /// The combatant in a slot has already fainted or the slot is missing
    #[error("No usable combatant at {0}")]
    NoActiveCombatant(BattlerIndex),
    /// The pipeline was asked to advance after the battle ended
    #[error("Battle has already ended")]
    BattleOver,
    /// Battle state is in an inconsistent state
    #[error("Inconsistent battle state: {0}")]
    InconsistentState(String),
}

/// Errors related to player actions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Move index is out of bounds
    #[error("Invalid move index: {0}")]
    InvalidMoveIndex(usize),
    /// The combatant does not know the requested move
    #[error("{0} is not in the moveset")]
    MoveNotKnown(Move),
    /// A command was already queued for this battler this turn
    #[error("{0} already selected an action")]
    AlreadySubmitted(BattlerIndex),
    /// Action is not valid in the current pipeline state
    #[error("Invalid action: {0}")]
    InvalidAction(String),
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using MoveDataError
pub type MoveDataResult<T> = Result<T, MoveDataError>;
