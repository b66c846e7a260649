#[cfg(test)]
mod tests {
    use crate::battle::phases::PhaseKind;
    use crate::battle::state::{BattleEvent, MoveFailureReason};
    use crate::battle::tests::common::{assert_ok, spit_up_runner};
    use pretty_assertions::assert_eq;
    use schema::{BattlerIndex, Move, MoveResult, StatType, TagKind};

    #[test]
    fn test_stockpile_move_builds_stacks_over_turns() {
        let mut runner = spit_up_runner();

        for expected_stacks in 1..=3u8 {
            assert_ok(runner.select_move(BattlerIndex::Player, Move::Stockpile));
            assert_ok(runner.run_turn());

            let player = runner.state().combatant(BattlerIndex::Player);
            assert_eq!(player.stockpile_count(), expected_stacks);
            assert_eq!(player.get_stat_stage(StatType::Def), expected_stacks as i8);
            assert_eq!(player.get_stat_stage(StatType::SpDef), expected_stacks as i8);
        }
        runner
            .events()
            .print_debug_with_message("Events for test_stockpile_move_builds_stacks_over_turns:");

        assert!(runner.events().events().contains(&BattleEvent::TagStacked {
            target: BattlerIndex::Player,
            tag: TagKind::Stockpiling,
            count: 3,
        }));
    }

    #[test]
    fn test_fourth_stockpile_fails_without_changes() {
        let mut runner = spit_up_runner();
        for _ in 0..3 {
            runner
                .state_mut()
                .combatant_mut(BattlerIndex::Player)
                .add_tag(TagKind::Stockpiling);
        }

        assert_ok(runner.select_move(BattlerIndex::Player, Move::Stockpile));
        assert_ok(runner.run_until(PhaseKind::TurnInit));

        let player = runner.state().combatant(BattlerIndex::Player);
        assert_eq!(player.stockpile_count(), 3);
        assert_eq!(player.get_stat_stage(StatType::Def), 3);
        assert_eq!(
            player.last_move_record().map(|record| record.result),
            Some(MoveResult::Fail)
        );
        assert!(runner.events().events().contains(&BattleEvent::MoveFailed {
            user: BattlerIndex::Player,
            move_used: Move::Stockpile,
            reason: MoveFailureReason::StockpileFull,
        }));
    }

    #[test]
    fn test_stockpile_survives_turn_end() {
        let mut runner = spit_up_runner();
        assert_ok(runner.select_move(BattlerIndex::Player, Move::Stockpile));
        assert_ok(runner.run_turn());
        assert_ok(runner.run_turn());

        assert_eq!(
            runner.state().combatant(BattlerIndex::Player).stockpile_count(),
            1
        );
    }

    #[test]
    fn test_stockpile_at_max_defense_still_stacks() {
        let mut runner = spit_up_runner();
        runner
            .state_mut()
            .combatant_mut(BattlerIndex::Player)
            .stat_stages
            .set(StatType::Def, 6);

        assert_ok(runner.select_move(BattlerIndex::Player, Move::Stockpile));
        assert_ok(runner.run_turn());

        let player = runner.state().combatant(BattlerIndex::Player);
        assert_eq!(player.stockpile_count(), 1);
        assert_eq!(player.get_stat_stage(StatType::Def), 6);
        assert_eq!(player.get_stat_stage(StatType::SpDef), 1);
    }
}
