use crate::battle::state::BattleState;
use crate::combatant::PlayerAction;
use crate::errors::{ActionError, BattleResult};
use crate::move_data::get_move_data;
use schema::{BattlerIndex, Move, TagKind};
use std::collections::VecDeque;
use std::fmt;

/// Unit of work in the turn pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Opens a turn.
    TurnInit,
    /// Waits until both sides have a queued action.
    CommandSelection,
    /// Orders the queued actions and schedules their phases.
    TurnStart,
    Move { user: BattlerIndex, move_used: Move },
    /// Lands one stack boost of a tag added since the last phase.
    StatStageChange { target: BattlerIndex, tag: TagKind },
    Forfeit { battler: BattlerIndex },
    /// Expires turn-scoped tags and schedules the next turn.
    TurnEnd,
    BattleEnd { winner: BattlerIndex },
}

/// Phase discriminant used to name pause points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    TurnInit,
    CommandSelection,
    TurnStart,
    Move,
    StatStageChange,
    Forfeit,
    TurnEnd,
    BattleEnd,
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::TurnInit => PhaseKind::TurnInit,
            Phase::CommandSelection => PhaseKind::CommandSelection,
            Phase::TurnStart => PhaseKind::TurnStart,
            Phase::Move { .. } => PhaseKind::Move,
            Phase::StatStageChange { .. } => PhaseKind::StatStageChange,
            Phase::Forfeit { .. } => PhaseKind::Forfeit,
            Phase::TurnEnd => PhaseKind::TurnEnd,
            Phase::BattleEnd { .. } => PhaseKind::BattleEnd,
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PhaseKind::TurnInit => "TurnInitPhase",
            PhaseKind::CommandSelection => "CommandPhase",
            PhaseKind::TurnStart => "TurnStartPhase",
            PhaseKind::Move => "MovePhase",
            PhaseKind::StatStageChange => "StatStageChangePhase",
            PhaseKind::Forfeit => "ForfeitPhase",
            PhaseKind::TurnEnd => "TurnEndPhase",
            PhaseKind::BattleEnd => "BattleEndPhase",
        };
        write!(f, "{}", name)
    }
}

/// FIFO of pending phases. Phases may schedule more phases while running.
#[derive(Debug, Clone, Default)]
pub struct PhaseQueue {
    phases: VecDeque<Phase>,
}

impl PhaseQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, phase: Phase) {
        self.phases.push_back(phase);
    }

    /// Schedule a phase to run before everything already queued.
    pub fn push_front(&mut self, phase: Phase) {
        self.phases.push_front(phase);
    }

    pub fn pop_front(&mut self) -> Option<Phase> {
        self.phases.pop_front()
    }

    pub fn peek(&self) -> Option<&Phase> {
        self.phases.front()
    }

    pub fn clear(&mut self) {
        self.phases.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn kinds(&self) -> Vec<PhaseKind> {
        self.phases.iter().map(Phase::kind).collect()
    }
}

#[derive(Debug, Clone)]
struct ActionPriority {
    action_priority: i8, // Forfeit: 10, Move: 0
    move_priority: i8,   // Priority from move data (e.g., Protect)
    speed: u16,          // Effective speed for tiebreaking
}

fn calculate_action_priority(
    battler: BattlerIndex,
    action: &PlayerAction,
    state: &BattleState,
) -> BattleResult<ActionPriority> {
    match action {
        PlayerAction::Forfeit => Ok(ActionPriority {
            action_priority: 10,
            move_priority: 0,
            speed: 0,
        }),
        PlayerAction::UseMove { move_index } => {
            let combatant = state.combatant(battler);
            let move_used = combatant
                .moveset
                .get(*move_index)
                .copied()
                .ok_or(ActionError::InvalidMoveIndex(*move_index))?;
            Ok(ActionPriority {
                action_priority: 0,
                move_priority: get_move_data(move_used)?.priority,
                speed: combatant.effective_stat(schema::StatType::Spe),
            })
        }
    }
}

/// Order queued actions: forfeits first, then move priority, then speed.
/// Remaining ties go to the player side.
pub fn determine_action_order(
    state: &BattleState,
    actions: &[(BattlerIndex, PlayerAction)],
) -> BattleResult<Vec<(BattlerIndex, PlayerAction)>> {
    let mut prioritized = Vec::with_capacity(actions.len());
    for (battler, action) in actions {
        let priority = calculate_action_priority(*battler, action, state)?;
        prioritized.push((*battler, action.clone(), priority));
    }

    prioritized.sort_by(|a, b| {
        b.2.action_priority
            .cmp(&a.2.action_priority)
            .then_with(|| b.2.move_priority.cmp(&a.2.move_priority))
            .then_with(|| b.2.speed.cmp(&a.2.speed))
            .then_with(|| a.0.to_index().cmp(&b.0.to_index()))
    });

    Ok(prioritized
        .into_iter()
        .map(|(battler, action, _)| (battler, action))
        .collect())
}

/// Phase to schedule for one ordered action.
pub fn phase_for_action(
    state: &BattleState,
    battler: BattlerIndex,
    action: &PlayerAction,
) -> BattleResult<Phase> {
    match action {
        PlayerAction::Forfeit => Ok(Phase::Forfeit { battler }),
        PlayerAction::UseMove { move_index } => {
            let move_used = state
                .combatant(battler)
                .moveset
                .get(*move_index)
                .copied()
                .ok_or(ActionError::InvalidMoveIndex(*move_index))?;
            Ok(Phase::Move {
                user: battler,
                move_used,
            })
        }
    }
}
