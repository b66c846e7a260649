//! A module for defining AI behaviors for battle opponents.

use crate::battle::resolution::check_precondition;
use crate::battle::state::{BattleState, TurnRng};
use crate::combatant::PlayerAction;
use crate::config::BattleConfig;
use crate::errors::BattleResult;
use crate::move_data::{calculate_battle_power, get_move_data};
use schema::{BattlerIndex, MoveCategory, MoveEffect, StatType, TagKind, Target};

/// A trait for any system that can decide on a battle action.
pub trait Behavior {
    /// Inspects the battle state and decides on the next action for the given battler.
    /// Any randomness is drawn from the battle's `TurnRng`.
    fn decide_action(
        &self,
        battler: BattlerIndex,
        battle_state: &BattleState,
        rng: &mut TurnRng,
    ) -> PlayerAction;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringAI;

impl ScoringAI {
    pub fn new() -> Self {
        Self
    }

    fn score_action(
        &self,
        action: &PlayerAction,
        battler: BattlerIndex,
        state: &BattleState,
        rng: &mut TurnRng,
    ) -> f32 {
        match action {
            PlayerAction::UseMove { move_index } => {
                self.score_move(*move_index, battler, state, rng).unwrap_or(-1.0)
            }
            PlayerAction::Forfeit => -1000.0, // Never choose to forfeit unless it's the only option.
        }
    }

    fn score_move(
        &self,
        move_index: usize,
        battler: BattlerIndex,
        state: &BattleState,
        rng: &mut TurnRng,
    ) -> BattleResult<f32> {
        let attacker = state.combatant(battler);
        let defender = state.combatant(battler.opponent());
        let Some(move_used) = attacker.moveset.get(move_index).copied() else {
            return Ok(-1.0);
        };
        let move_data = get_move_data(move_used)?;

        // A move that would fail outright is never worth picking.
        if check_precondition(move_data, attacker).is_some() {
            return Ok(-1.0);
        }

        // --- Step 1: Core damage score ---
        let mut damage_score = 0.0;
        if move_data.is_damaging() {
            let Some(power) = calculate_battle_power(move_data, attacker) else {
                return Ok(-1.0);
            };
            let attack_stat = match move_data.category {
                MoveCategory::Special => StatType::SpAtk,
                _ => StatType::Atk,
            };
            let level_scalar = (attacker.level as f32 * 2.0).max(1.0);
            let normalized_power = attacker.effective_stat(attack_stat) as f32 / level_scalar;
            damage_score = power as f32 * normalized_power;
        }

        // --- Step 2: Utility score ---
        let mut utility_score = 0.0;
        for effect in &move_data.effects {
            match effect {
                // Self-buffs are valuable if the stat isn't maxed out.
                MoveEffect::StatChange(Target::User, stat, stages) if *stages > 0 => {
                    let current_stage = attacker.get_stat_stage(*stat);
                    if current_stage < BattleConfig::MAX_STAT_STAGE {
                        let potential_gain = 1.0 - (current_stage as f32 / 6.0);
                        utility_score += 20.0 * (*stages as f32) * potential_gain;
                    }
                }
                // Opponent debuffs are valuable if the stat isn't minimized.
                MoveEffect::StatChange(Target::Target, stat, stages) if *stages < 0 => {
                    if defender.get_stat_stage(*stat) > BattleConfig::MIN_STAT_STAGE {
                        utility_score += 15.0 * (stages.abs() as f32);
                    }
                }
                MoveEffect::AddTag(Target::User, TagKind::Stockpiling) => {
                    let filled = attacker.stockpile_count() as f32
                        / BattleConfig::MAX_STOCKPILE_STACKS as f32;
                    utility_score += 40.0 * (1.0 - filled);
                }
                MoveEffect::AddTag(Target::User, TagKind::Protected) => {
                    if !attacker.has_tag(TagKind::Protected) {
                        utility_score += 5.0;
                    }
                }
                MoveEffect::HealPerStockpile => {
                    let missing = attacker.max_hp().saturating_sub(attacker.current_hp());
                    utility_score += 60.0 * (missing as f32 / attacker.max_hp().max(1) as f32);
                }
                _ => {}
            }
        }

        // --- Step 3: Combine scores ---
        let mut final_score = damage_score + utility_score;

        // Don't use a Status move if it has no utility (e.g., trying to boost a maxed stat).
        if move_data.category == MoveCategory::Status && utility_score < 1.0 {
            return Ok(-1.0);
        }

        if move_data.category != MoveCategory::Status {
            let accuracy = move_data.accuracy.unwrap_or(101); // Slight edge to sure-hit moves
            final_score *= accuracy as f32 / 100.0;
        }

        // Add a small random factor to break ties and prevent repetitive loops.
        let roll = rng.next_outcome("AI move jitter");
        let random_factor = 1.0 + ((roll - 1) as f32 / 99.0 * 0.1 - 0.05); // +/- 5%
        final_score *= random_factor;

        Ok(final_score)
    }
}

impl Behavior for ScoringAI {
    fn decide_action(
        &self,
        battler: BattlerIndex,
        battle_state: &BattleState,
        rng: &mut TurnRng,
    ) -> PlayerAction {
        let combatant = battle_state.combatant(battler);

        (0..combatant.moveset.len())
            .map(|move_index| PlayerAction::UseMove { move_index })
            .max_by_key(|action| {
                let score = self.score_action(action, battler, battle_state, rng);
                ordered_float::OrderedFloat(score)
            })
            .unwrap_or(PlayerAction::Forfeit)
    }
}
