#[cfg(test)]
mod tests {
    use crate::battle::phases::PhaseKind;
    use crate::battle::state::BattleEvent;
    use crate::battle::tests::common::{assert_ok, spit_up_runner};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{BattlerIndex, Move, MoveResult, StatType, TagKind};

    #[rstest]
    #[case("quarter heal", 1, 35)]
    #[case("half heal", 2, 60)]
    #[case("full heal", 3, 100)]
    fn test_swallow_heals_by_stack_count_and_consumes(
        #[case] desc: &str,
        #[case] stacks: u8,
        #[case] expected_hp: u16,
    ) {
        let mut runner = spit_up_runner();
        let player = runner.state_mut().combatant_mut(BattlerIndex::Player);
        player.set_hp(10);
        for _ in 0..stacks {
            player.add_tag(TagKind::Stockpiling);
        }

        assert_ok(runner.select_move(BattlerIndex::Player, Move::Swallow));
        assert_ok(runner.run_until(PhaseKind::TurnInit));

        let player = runner.state().combatant(BattlerIndex::Player);
        assert_eq!(player.current_hp(), expected_hp, "{}", desc);
        assert_eq!(player.stockpile_count(), 0);
        assert_eq!(player.get_stat_stage(StatType::Def), 0);
        assert_eq!(player.get_stat_stage(StatType::SpDef), 0);
        assert_eq!(
            player.last_move_record().map(|record| record.result),
            Some(MoveResult::Success)
        );
    }

    #[test]
    fn test_swallow_fails_without_stacks() {
        let mut runner = spit_up_runner();
        runner
            .state_mut()
            .combatant_mut(BattlerIndex::Player)
            .set_hp(10);

        assert_ok(runner.select_move(BattlerIndex::Player, Move::Swallow));
        assert_ok(runner.run_until(PhaseKind::TurnInit));

        let player = runner.state().combatant(BattlerIndex::Player);
        assert_eq!(player.current_hp(), 10);
        assert_eq!(
            player.last_move_record().map(|record| record.targets.clone()),
            Some(vec![BattlerIndex::Player])
        );
        assert_eq!(
            player.last_move_record().map(|record| record.result),
            Some(MoveResult::Fail)
        );
    }

    #[test]
    fn test_swallow_at_full_hp_still_consumes() {
        let mut runner = spit_up_runner();
        runner
            .state_mut()
            .combatant_mut(BattlerIndex::Player)
            .add_tag(TagKind::Stockpiling);

        assert_ok(runner.select_move(BattlerIndex::Player, Move::Swallow));
        assert_ok(runner.run_until(PhaseKind::TurnInit));

        let player = runner.state().combatant(BattlerIndex::Player);
        assert_eq!(player.stockpile_count(), 0);
        assert!(!runner
            .events()
            .events()
            .iter()
            .any(|event| matches!(event, BattleEvent::CombatantHealed { .. })));
    }
}
