//! Move resolution core for a turn-based monster battle.
//!
//! Moves are table-driven and resolve through a small state machine.
//! Turns run as a queue of phases that callers can pause between.

pub mod battle;
pub mod combatant;
pub mod config;
pub mod errors;
pub mod move_data;

// --- From the `schema` crate ---
pub use schema::{
    BattlerIndex, Move, MoveCategory, MoveData, MoveEffect, MovePower, MovePrecondition,
    MoveResult, StatType, TagKind, Target,
};

// --- From this crate's modules (`src/`) ---
pub use battle::phases::{Phase, PhaseKind};
pub use battle::resolution::{resolve_move, ResolutionState, ResolvedMove};
pub use battle::runner::{BattleRunner, RunStatus, StepOutcome};
pub use battle::state::{BattleEvent, BattleState, EventBus, GameState, TurnRng};
pub use battle::stat_stages::StatStages;
pub use battle::tags::{BattlerTag, BattlerTags, StackBoost, StatDeltas, TagAddOutcome};

pub use combatant::{BaseStats, Combatant, MoveInvocationRecord, PlayerAction, PlayerType};
pub use config::BattleConfig;
pub use move_data::{calculate_battle_power, get_move_data};

pub use errors::{
    ActionError, BattleEngineError, BattleResult, BattleStateError, MoveDataError, MoveDataResult,
};
