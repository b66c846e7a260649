use super::EffectContext;
use crate::battle::commands::BattleCommand;
use crate::battle::state::BattleState;
use schema::{TagKind, Target};

pub(super) fn apply_add_tag_effect(
    target: Target,
    tag: TagKind,
    context: &EffectContext,
) -> Vec<BattleCommand> {
    vec![BattleCommand::AddTag {
        target: context.target_index(target),
        tag,
    }]
}

/// Drop the user's stockpile, which reverses the boosts it recorded.
pub(super) fn apply_consume_stockpile_effect(
    context: &EffectContext,
    state: &BattleState,
) -> Vec<BattleCommand> {
    if !state.combatant(context.user).has_tag(TagKind::Stockpiling) {
        return Vec::new();
    }
    vec![BattleCommand::RemoveTag {
        target: context.user,
        tag: TagKind::Stockpiling,
    }]
}

/// Heal 25% / 50% / 100% of max HP for 1 / 2 / 3 stacks.
pub(super) fn apply_heal_per_stockpile_effect(
    context: &EffectContext,
    state: &BattleState,
) -> Vec<BattleCommand> {
    let user = state.combatant(context.user);
    let max_hp = user.max_hp();
    let amount = match user.stockpile_count() {
        0 => return Vec::new(),
        1 => max_hp / 4,
        2 => max_hp / 2,
        _ => max_hp,
    };

    if amount == 0 || user.current_hp() >= max_hp {
        return Vec::new();
    }
    vec![BattleCommand::Heal {
        target: context.user,
        amount,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{create_test_battle, TestCombatantBuilder};
    use pretty_assertions::assert_eq;
    use schema::{BattlerIndex, Move};

    fn context(move_used: Move) -> EffectContext {
        EffectContext::new(BattlerIndex::Player, BattlerIndex::Enemy, move_used)
    }

    #[test]
    fn test_heal_amount_tracks_stack_count() {
        for (stacks, expected) in [(1u8, 50u16), (2, 100), (3, 200)] {
            let mut state = create_test_battle(
                TestCombatantBuilder::new("Swalot").with_max_hp(200).with_hp(1),
                TestCombatantBuilder::new("Magikarp"),
            );
            for _ in 0..stacks {
                state
                    .combatant_mut(BattlerIndex::Player)
                    .add_tag(TagKind::Stockpiling);
            }

            let commands = apply_heal_per_stockpile_effect(&context(Move::Swallow), &state);
            assert_eq!(
                commands,
                vec![BattleCommand::Heal {
                    target: BattlerIndex::Player,
                    amount: expected,
                }]
            );
        }
    }

    #[test]
    fn test_heal_skipped_at_full_hp() {
        let mut state = create_test_battle(
            TestCombatantBuilder::new("Swalot"),
            TestCombatantBuilder::new("Magikarp"),
        );
        state
            .combatant_mut(BattlerIndex::Player)
            .add_tag(TagKind::Stockpiling);

        assert!(apply_heal_per_stockpile_effect(&context(Move::Swallow), &state).is_empty());
    }

    #[test]
    fn test_consume_without_stockpile_does_nothing() {
        let state = create_test_battle(
            TestCombatantBuilder::new("Swalot"),
            TestCombatantBuilder::new("Magikarp"),
        );
        assert!(apply_consume_stockpile_effect(&context(Move::SpitUp), &state).is_empty());
    }

    #[test]
    fn test_add_tag_resolves_user_side() {
        let commands = apply_add_tag_effect(Target::User, TagKind::Protected, &context(Move::Protect));
        assert_eq!(
            commands,
            vec![BattleCommand::AddTag {
                target: BattlerIndex::Player,
                tag: TagKind::Protected,
            }]
        );
    }
}
