use crate::battle::stat_stages::StatStages;
use crate::battle::state::{BattleEvent, BattleState, EventBus, GameState};
use crate::battle::tags::{StackBoost, TagAddOutcome};
use crate::combatant::{Combatant, MoveInvocationRecord};
use crate::errors::{BattleEngineError, BattleStateError};
use schema::{BattlerIndex, StatType, TagKind};
use thiserror::Error;

/// Atomic commands representing final state changes
#[derive(Debug, Clone, PartialEq)]
pub enum BattleCommand {
    // Direct state changes
    SetGameState(GameState),
    IncrementTurnNumber,
    ClearActionQueue,

    // Combatant modifications
    DealDamage {
        target: BattlerIndex,
        amount: u16,
    },
    Heal {
        target: BattlerIndex,
        amount: u16,
    },
    ChangeStatStage {
        target: BattlerIndex,
        stat: StatType,
        delta: i8,
    },
    AddTag {
        target: BattlerIndex,
        tag: TagKind,
    },
    RemoveTag {
        target: BattlerIndex,
        tag: TagKind,
    },
    /// Land one pending stack boost of `tag`.
    ApplyStackBoost {
        target: BattlerIndex,
        tag: TagKind,
    },
    ClearTurnEndTags {
        target: BattlerIndex,
    },
    RecordMove {
        target: BattlerIndex,
        record: MoveInvocationRecord,
    },

    // Battle flow
    EmitEvent(BattleEvent),
}

/// Error types for command execution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    #[error("{0} has already fainted")]
    TargetFainted(BattlerIndex),
}

impl From<ExecutionError> for BattleEngineError {
    fn from(err: ExecutionError) -> Self {
        match err {
            ExecutionError::TargetFainted(index) => {
                BattleStateError::NoActiveCombatant(index).into()
            }
        }
    }
}

/// Execute a batch of commands in order, stopping at the first failure
pub fn execute_command_batch(
    commands: Vec<BattleCommand>,
    state: &mut BattleState,
    bus: &mut EventBus,
) -> Result<(), ExecutionError> {
    for command in commands {
        execute_command(command, state, bus)?;
    }
    Ok(())
}

/// Emit one stage event per stat that moved since `before`.
fn emit_stage_changes(
    target: BattlerIndex,
    before: &StatStages,
    combatant: &Combatant,
    bus: &mut EventBus,
) {
    for change in combatant.stat_stages.changes_from(before) {
        bus.push(BattleEvent::StatStageChanged {
            target,
            stat: change.stat,
            old_stage: change.old_stage,
            new_stage: change.new_stage,
        });
    }
}

fn emit_boost_event(
    target: BattlerIndex,
    boost: StackBoost,
    state: &BattleState,
    bus: &mut EventBus,
) {
    if boost.applied == 0 {
        bus.push(BattleEvent::StatChangeBlocked {
            target,
            stat: boost.stat,
            rising: boost.requested > 0,
        });
    } else {
        let new_stage = state.combatant(target).get_stat_stage(boost.stat);
        bus.push(BattleEvent::StatStageChanged {
            target,
            stat: boost.stat,
            old_stage: new_stage - boost.applied,
            new_stage,
        });
    }
}

fn execute_deal_damage_command(
    target: BattlerIndex,
    amount: u16,
    state: &mut BattleState,
    bus: &mut EventBus,
) -> Result<(), ExecutionError> {
    let combatant = state.combatant_mut(target);
    if combatant.is_fainted() {
        return Err(ExecutionError::TargetFainted(target));
    }

    let did_faint = combatant.take_damage(amount);
    bus.push(BattleEvent::DamageDealt {
        target,
        damage: amount,
        remaining_hp: combatant.current_hp(),
    });

    if did_faint {
        bus.push(BattleEvent::CombatantFainted { target });
    }
    Ok(())
}

pub fn execute_command(
    command: BattleCommand,
    state: &mut BattleState,
    bus: &mut EventBus,
) -> Result<(), ExecutionError> {
    match command {
        BattleCommand::EmitEvent(event) => {
            bus.push(event);
            Ok(())
        }
        BattleCommand::DealDamage { target, amount } => {
            execute_deal_damage_command(target, amount, state, bus)
        }
        BattleCommand::Heal { target, amount } => {
            let combatant = state.combatant_mut(target);
            if combatant.is_fainted() {
                return Err(ExecutionError::TargetFainted(target));
            }
            let healed = combatant.heal(amount);
            if healed > 0 {
                bus.push(BattleEvent::CombatantHealed {
                    target,
                    amount: healed,
                    new_hp: combatant.current_hp(),
                });
            }
            Ok(())
        }
        BattleCommand::ChangeStatStage {
            target,
            stat,
            delta,
        } => {
            let stages = &mut state.combatant_mut(target).stat_stages;
            let old_stage = stages.get(stat);
            let applied = stages.apply_delta(stat, delta);
            if applied == 0 {
                if delta != 0 {
                    bus.push(BattleEvent::StatChangeBlocked {
                        target,
                        stat,
                        rising: delta > 0,
                    });
                }
            } else {
                bus.push(BattleEvent::StatStageChanged {
                    target,
                    stat,
                    old_stage,
                    new_stage: old_stage + applied,
                });
            }
            Ok(())
        }
        BattleCommand::AddTag { target, tag } => {
            match state.combatant_mut(target).add_tag(tag) {
                TagAddOutcome::Added => bus.push(BattleEvent::TagAdded { target, tag }),
                TagAddOutcome::Stacked { count } => {
                    bus.push(BattleEvent::TagStacked { target, tag, count })
                }
                TagAddOutcome::AtMaximum | TagAddOutcome::AlreadyPresent => {
                    tracing::debug!(%target, %tag, "tag add had no effect");
                }
            }
            Ok(())
        }
        BattleCommand::RemoveTag { target, tag } => {
            let combatant = state.combatant_mut(target);
            let before = combatant.stat_stages;
            if combatant.remove_tag(tag).is_some() {
                bus.push(BattleEvent::TagRemoved { target, tag });
                emit_stage_changes(target, &before, combatant, bus);
            }
            Ok(())
        }
        BattleCommand::ApplyStackBoost { target, tag } => {
            let Some(boosts) = state.combatant_mut(target).apply_stack_boost(tag) else {
                tracing::debug!(%target, %tag, "tag gone before its boost landed");
                return Ok(());
            };
            for boost in boosts {
                emit_boost_event(target, boost, state, bus);
            }
            Ok(())
        }
        BattleCommand::ClearTurnEndTags { target } => {
            let combatant = state.combatant_mut(target);
            let before = combatant.stat_stages;
            for tag in combatant.clear_turn_end_tags() {
                bus.push(BattleEvent::TagRemoved { target, tag });
            }
            emit_stage_changes(target, &before, combatant, bus);
            Ok(())
        }
        BattleCommand::RecordMove { target, record } => {
            state.combatant_mut(target).record_move(record);
            Ok(())
        }
        BattleCommand::SetGameState(new_state) => {
            state.game_state = new_state;
            Ok(())
        }
        BattleCommand::IncrementTurnNumber => {
            state.turn_number += 1;
            Ok(())
        }
        BattleCommand::ClearActionQueue => {
            state.action_queue = [None, None];
            Ok(())
        }
    }
}
