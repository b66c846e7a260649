mod stat_effects;
mod tag_effects;

use crate::battle::commands::BattleCommand;
use crate::battle::state::BattleState;
use schema::{BattlerIndex, Move, MoveEffect, Target};

use self::{stat_effects::*, tag_effects::*};

#[derive(Debug, Clone, Copy)]
pub struct EffectContext {
    pub user: BattlerIndex,
    pub target: BattlerIndex,
    pub move_used: Move,
}

impl EffectContext {
    pub fn new(user: BattlerIndex, target: BattlerIndex, move_used: Move) -> Self {
        Self {
            user,
            target,
            move_used,
        }
    }

    pub fn target_index(&self, target: Target) -> BattlerIndex {
        match target {
            Target::User => self.user,
            Target::Target => self.target,
        }
    }
}

pub trait BattleMoveEffectExt {
    /// Whether the effect lands on the opposing combatant, and so only
    /// applies when the move connects.
    fn needs_hit(&self) -> bool;

    /// Commands that realize this effect against the current state.
    fn apply(&self, context: &EffectContext, state: &BattleState) -> Vec<BattleCommand>;
}

impl BattleMoveEffectExt for MoveEffect {
    fn needs_hit(&self) -> bool {
        match self {
            MoveEffect::StatChange(target, _, _) | MoveEffect::AddTag(target, _) => {
                *target == Target::Target
            }
            MoveEffect::ConsumeStockpile | MoveEffect::HealPerStockpile => false,
        }
    }

    fn apply(&self, context: &EffectContext, state: &BattleState) -> Vec<BattleCommand> {
        match self {
            MoveEffect::StatChange(target, stat, stages) => {
                apply_stat_change_effect(*target, *stat, *stages, context, state)
            }
            MoveEffect::AddTag(target, tag) => apply_add_tag_effect(*target, *tag, context),
            MoveEffect::ConsumeStockpile => apply_consume_stockpile_effect(context, state),
            MoveEffect::HealPerStockpile => apply_heal_per_stockpile_effect(context, state),
        }
    }
}
