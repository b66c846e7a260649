//! Single move-use resolution.
//!
//! Every attempt walks one of two paths and always ends with exactly one
//! entry appended to the user's move history:
//!
//! ```text
//! PendingPrecondition -> PowerComputed -> EffectApplied -> Recorded
//! PendingPrecondition -> Failed -> Recorded
//! ```

use crate::battle::calculators::{DamageCalculator, DamageContext};
use crate::battle::commands::{execute_command_batch, BattleCommand};
use crate::battle::move_effects::{BattleMoveEffectExt, EffectContext};
use crate::battle::state::{BattleEvent, BattleState, EventBus, MoveFailureReason, TurnRng};
use crate::combatant::{Combatant, MoveInvocationRecord};
use crate::config::BattleConfig;
use crate::errors::{BattleResult, BattleStateError};
use crate::move_data::{calculate_battle_power, get_move_data};
use schema::{BattlerIndex, Move, MoveData, MovePrecondition, MoveResult, TagKind, Target};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
    PendingPrecondition,
    /// `None` for moves that never reach the damage step.
    PowerComputed {
        power: Option<u16>,
    },
    EffectApplied {
        result: MoveResult,
    },
    Failed {
        reason: MoveFailureReason,
    },
    Recorded {
        result: MoveResult,
    },
}

impl ResolutionState {
    pub fn can_advance_to(&self, next: &ResolutionState) -> bool {
        use ResolutionState::*;
        matches!(
            (self, next),
            (PendingPrecondition, PowerComputed { .. })
                | (PendingPrecondition, Failed { .. })
                | (PowerComputed { .. }, EffectApplied { .. })
                | (EffectApplied { .. }, Recorded { .. })
                | (Failed { .. }, Recorded { .. })
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ResolutionState::Recorded { .. })
    }
}

/// Outcome of one resolved move use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMove {
    pub record: MoveInvocationRecord,
    /// Every state visited, starting at `PendingPrecondition`.
    pub path: Vec<ResolutionState>,
}

struct MoveResolution {
    move_used: Move,
    path: Vec<ResolutionState>,
}

impl MoveResolution {
    fn new(move_used: Move) -> Self {
        Self {
            move_used,
            path: vec![ResolutionState::PendingPrecondition],
        }
    }

    fn current(&self) -> ResolutionState {
        // path is never empty
        self.path[self.path.len() - 1]
    }

    fn advance(&mut self, next: ResolutionState) -> BattleResult<()> {
        let current = self.current();
        if !current.can_advance_to(&next) {
            return Err(BattleStateError::InconsistentState(format!(
                "{} cannot move from {:?} to {:?}",
                self.move_used, current, next
            ))
            .into());
        }
        tracing::trace!(move_used = %self.move_used, from = ?current, to = ?next, "resolution step");
        self.path.push(next);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HitOutcome {
    Hit,
    Blocked,
    Missed,
}

/// Gate checked before anything else about the move is computed.
pub fn check_precondition(move_data: &MoveData, user: &Combatant) -> Option<MoveFailureReason> {
    if user.is_fainted() {
        return Some(MoveFailureReason::UserFainted);
    }
    match move_data.precondition {
        MovePrecondition::Always => None,
        MovePrecondition::RequiresStockpile => {
            (user.stockpile_count() == 0).then_some(MoveFailureReason::NoStockpile)
        }
        MovePrecondition::StockpileNotFull => (user.stockpile_count()
            >= BattleConfig::MAX_STOCKPILE_STACKS)
            .then_some(MoveFailureReason::StockpileFull),
    }
}

fn resolve_targets(user: BattlerIndex, move_data: &MoveData) -> Vec<BattlerIndex> {
    match move_data.target {
        Target::User => vec![user],
        Target::Target => vec![user.opponent()],
    }
}

fn check_hit(
    ctx: &DamageContext,
    state: &BattleState,
    bus: &mut EventBus,
    rng: &mut TurnRng,
    calculator: &mut dyn DamageCalculator,
) -> HitOutcome {
    if state.combatant(ctx.target).has_tag(TagKind::Protected) {
        bus.push(BattleEvent::MoveBlocked {
            target: ctx.target,
            move_used: ctx.move_used,
        });
        return HitOutcome::Blocked;
    }

    if calculator.move_hits(ctx, state, rng) {
        HitOutcome::Hit
    } else {
        bus.push(BattleEvent::MoveMissed {
            user: ctx.user,
            target: ctx.target,
            move_used: ctx.move_used,
        });
        HitOutcome::Missed
    }
}

/// Damage and effects for a move whose precondition passed.
fn apply_move(
    move_data: &MoveData,
    ctx: &DamageContext,
    state: &mut BattleState,
    bus: &mut EventBus,
    rng: &mut TurnRng,
    calculator: &mut dyn DamageCalculator,
) -> BattleResult<MoveResult> {
    let hit = if move_data.targets_opponent() {
        check_hit(ctx, state, bus, rng, calculator)
    } else {
        HitOutcome::Hit
    };
    let landed = hit == HitOutcome::Hit;

    if landed && move_data.is_damaging() {
        let damage = calculator.calculate_damage(ctx, state, rng);
        execute_command_batch(
            vec![BattleCommand::DealDamage {
                target: ctx.target,
                amount: damage,
            }],
            state,
            bus,
        )?;
    }

    let effect_context = EffectContext::new(ctx.user, ctx.target, ctx.move_used);
    for effect in &move_data.effects {
        // User-side effects such as stockpile consumption run even when the
        // opponent was missed or protected.
        if effect.needs_hit() && (!landed || state.combatant(ctx.target).is_fainted()) {
            continue;
        }
        let commands = effect.apply(&effect_context, state);
        execute_command_batch(commands, state, bus)?;
    }

    Ok(if landed {
        MoveResult::Success
    } else {
        MoveResult::Miss
    })
}

/// Resolve one use of `move_used` by `user` against the current state.
///
/// Errors only on programming or data faults. Game-level failures are
/// recorded as `MoveResult::Fail`.
pub fn resolve_move(
    user: BattlerIndex,
    move_used: Move,
    state: &mut BattleState,
    bus: &mut EventBus,
    rng: &mut TurnRng,
    calculator: &mut dyn DamageCalculator,
) -> BattleResult<ResolvedMove> {
    let move_data = get_move_data(move_used)?;
    let targets = resolve_targets(user, move_data);
    let mut resolution = MoveResolution::new(move_used);

    bus.push(BattleEvent::MoveUsed { user, move_used });

    let result = match check_precondition(move_data, state.combatant(user)) {
        Some(reason) => {
            tracing::debug!(%user, %move_used, ?reason, "move failed its precondition");
            resolution.advance(ResolutionState::Failed { reason })?;
            bus.push(BattleEvent::MoveFailed {
                user,
                move_used,
                reason,
            });
            MoveResult::Fail
        }
        None => {
            let power = if move_data.is_damaging() {
                let power = calculate_battle_power(move_data, state.combatant(user)).ok_or_else(
                    || {
                        BattleStateError::InconsistentState(format!(
                            "{} passed its precondition but has no usable power",
                            move_used
                        ))
                    },
                )?;
                bus.push(BattleEvent::PowerCalculated {
                    user,
                    move_used,
                    power,
                });
                Some(power)
            } else {
                None
            };
            resolution.advance(ResolutionState::PowerComputed { power })?;

            let ctx = DamageContext {
                user,
                target: user.opponent(),
                move_used,
                category: move_data.category,
                power: power.unwrap_or(0),
                accuracy: move_data.accuracy,
            };
            let result = apply_move(move_data, &ctx, state, bus, rng, calculator)?;
            resolution.advance(ResolutionState::EffectApplied { result })?;
            result
        }
    };

    let record = MoveInvocationRecord {
        move_used,
        result,
        targets,
    };
    execute_command_batch(
        vec![BattleCommand::RecordMove {
            target: user,
            record: record.clone(),
        }],
        state,
        bus,
    )?;
    resolution.advance(ResolutionState::Recorded { result })?;
    tracing::info!(%user, %move_used, ?result, "move recorded");

    Ok(ResolvedMove {
        record,
        path: resolution.path,
    })
}
