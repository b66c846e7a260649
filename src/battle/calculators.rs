use crate::battle::stat_stages::accuracy_stage_multiplier;
use crate::battle::state::{BattleState, TurnRng};
use crate::config::BattleConfig;
use schema::{BattlerIndex, Move, MoveCategory, StatType};

/// Everything the damage step needs to know about one hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageContext {
    pub user: BattlerIndex,
    pub target: BattlerIndex,
    pub move_used: Move,
    pub category: MoveCategory,
    /// Base power computed for this use of the move.
    pub power: u16,
    pub accuracy: Option<u8>,
}

/// Hit check and damage formula used by move resolution.
///
/// Implementations must not alter battle state; they only decide numbers.
pub trait DamageCalculator {
    fn move_hits(&mut self, ctx: &DamageContext, state: &BattleState, rng: &mut TurnRng) -> bool;

    fn calculate_damage(
        &mut self,
        ctx: &DamageContext,
        state: &BattleState,
        rng: &mut TurnRng,
    ) -> u16;
}

/// Stage-aware accuracy check and the classic level/power/attack/defense
/// formula with an 85-100% random spread.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardDamageCalculator;

impl DamageCalculator for StandardDamageCalculator {
    fn move_hits(&mut self, ctx: &DamageContext, state: &BattleState, rng: &mut TurnRng) -> bool {
        // If move has no accuracy value, it never misses
        let Some(base_accuracy) = ctx.accuracy else {
            return true;
        };

        let accuracy_stage = state.combatant(ctx.user).get_stat_stage(StatType::Acc);
        let evasion_stage = state.combatant(ctx.target).get_stat_stage(StatType::Eva);
        let adjusted_stage = accuracy_stage
            .saturating_sub(evasion_stage)
            .clamp(BattleConfig::MIN_STAT_STAGE, BattleConfig::MAX_STAT_STAGE);

        let modified_accuracy =
            (base_accuracy as f64 * accuracy_stage_multiplier(adjusted_stage)).round();
        let clamped_accuracy = modified_accuracy.clamp(1.0, 100.0) as u8;

        let roll = rng.next_outcome("Hit Check");
        roll <= clamped_accuracy
    }

    fn calculate_damage(
        &mut self,
        ctx: &DamageContext,
        state: &BattleState,
        rng: &mut TurnRng,
    ) -> u16 {
        let attacker = state.combatant(ctx.user);
        let defender = state.combatant(ctx.target);

        let (attack_stat, defense_stat) = match ctx.category {
            MoveCategory::Special => (StatType::SpAtk, StatType::SpDef),
            MoveCategory::Physical | MoveCategory::Status => (StatType::Atk, StatType::Def),
        };
        let attack = attacker.effective_stat(attack_stat).max(1) as u32;
        let defense = defender.effective_stat(defense_stat).max(1) as u32;
        let level = attacker.level as u32;

        let base = ((2 * level / 5 + 2) * ctx.power as u32 * attack / defense) / 50 + 2;

        // Map 1..=100 onto the 85..=100 spread
        let roll = rng.next_outcome("Damage Roll") as u32;
        let spread = 85 + (roll - 1) * 16 / 100;

        let damage = (base * spread / 100).max(1);
        damage.min(u16::MAX as u32) as u16
    }
}
